//! The immutable record of one resolved encounter.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::constants::{THREAT_MAX, THREAT_MIN};
use crate::vessel::{CrewId, VesselId};

/// Per-crew health loss.
pub type HealthLoss = BTreeMap<CrewId, f64>;
/// Per-equipment-slot degradation increase.
pub type DegradationDelta = BTreeMap<usize, f64>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EncounterKind {
    Evaded,
    Negotiated,
    Fled,
    Victory,
    Harassment,
    Boarding,
}

impl EncounterKind {
    pub const ALL: [EncounterKind; 6] = [
        EncounterKind::Evaded,
        EncounterKind::Negotiated,
        EncounterKind::Fled,
        EncounterKind::Victory,
        EncounterKind::Harassment,
        EncounterKind::Boarding,
    ];

    pub fn label(self) -> &'static str {
        match self {
            EncounterKind::Evaded => "evaded",
            EncounterKind::Negotiated => "negotiated",
            EncounterKind::Fled => "fled",
            EncounterKind::Victory => "victory",
            EncounterKind::Harassment => "harassment",
            EncounterKind::Boarding => "boarding",
        }
    }
}

/// Post-variance strengths of the two sides.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CombatScores {
    pub defense: f64,
    pub attack: f64,
}

impl CombatScores {
    /// Defense over attack; a toothless attacker counts as overwhelmed.
    pub fn ratio(&self) -> f64 {
        if self.attack <= 0.0 {
            f64::INFINITY
        } else {
            self.defense / self.attack
        }
    }
}

/// What happened, with only the fields each outcome needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EncounterOutcome {
    Evaded {
        probability: f64,
    },
    Negotiated {
        negotiator: CrewId,
        ransom: u64,
    },
    Fled {
        scores: CombatScores,
        health_loss: HealthLoss,
        delay_hours: f64,
    },
    Victory {
        scores: CombatScores,
        credits_gained: u64,
        degradation: DegradationDelta,
    },
    Harassment {
        scores: CombatScores,
        health_loss: HealthLoss,
        degradation: DegradationDelta,
        delay_hours: f64,
    },
    Boarding {
        scores: CombatScores,
        health_loss: HealthLoss,
        credits_lost: u64,
        degradation: DegradationDelta,
    },
}

impl EncounterOutcome {
    pub fn kind(&self) -> EncounterKind {
        match self {
            Self::Evaded { .. } => EncounterKind::Evaded,
            Self::Negotiated { .. } => EncounterKind::Negotiated,
            Self::Fled { .. } => EncounterKind::Fled,
            Self::Victory { .. } => EncounterKind::Victory,
            Self::Harassment { .. } => EncounterKind::Harassment,
            Self::Boarding { .. } => EncounterKind::Boarding,
        }
    }

    pub fn scores(&self) -> Option<CombatScores> {
        match self {
            Self::Fled { scores, .. }
            | Self::Victory { scores, .. }
            | Self::Harassment { scores, .. }
            | Self::Boarding { scores, .. } => Some(*scores),
            Self::Evaded { .. } | Self::Negotiated { .. } => None,
        }
    }

    pub fn negotiator(&self) -> Option<CrewId> {
        match self {
            Self::Negotiated { negotiator, .. } => Some(*negotiator),
            _ => None,
        }
    }

    pub fn credits_gained(&self) -> u64 {
        match self {
            Self::Victory { credits_gained, .. } => *credits_gained,
            _ => 0,
        }
    }

    pub fn credits_lost(&self) -> u64 {
        match self {
            Self::Negotiated { ransom, .. } => *ransom,
            Self::Boarding { credits_lost, .. } => *credits_lost,
            _ => 0,
        }
    }

    pub fn health_loss(&self) -> Option<&HealthLoss> {
        match self {
            Self::Fled { health_loss, .. }
            | Self::Harassment { health_loss, .. }
            | Self::Boarding { health_loss, .. } => Some(health_loss),
            _ => None,
        }
    }

    pub fn degradation(&self) -> Option<&DegradationDelta> {
        match self {
            Self::Victory { degradation, .. }
            | Self::Harassment { degradation, .. }
            | Self::Boarding { degradation, .. } => Some(degradation),
            _ => None,
        }
    }

    pub fn delay_hours(&self) -> f64 {
        match self {
            Self::Fled { delay_hours, .. } | Self::Harassment { delay_hours, .. } => *delay_hours,
            _ => 0.0,
        }
    }
}

/// Built once by the pipeline, read by the applier and by logging.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncounterResult {
    vessel_id: VesselId,
    threat_level: u8,
    position_km: f64,
    is_catch_up: bool,
    outcome: EncounterOutcome,
}

impl EncounterResult {
    /// # Panics
    ///
    /// If `threat_level` is outside 1–10.
    pub fn new(
        vessel_id: VesselId,
        threat_level: u8,
        position_km: f64,
        is_catch_up: bool,
        outcome: EncounterOutcome,
    ) -> Self {
        assert!(
            (THREAT_MIN..=THREAT_MAX).contains(&threat_level),
            "threat level {} outside {}..={}",
            threat_level,
            THREAT_MIN,
            THREAT_MAX
        );
        Self {
            vessel_id,
            threat_level,
            position_km,
            is_catch_up,
            outcome,
        }
    }

    pub fn vessel_id(&self) -> VesselId {
        self.vessel_id
    }

    pub fn threat_level(&self) -> u8 {
        self.threat_level
    }

    pub fn position_km(&self) -> f64 {
        self.position_km
    }

    pub fn is_catch_up(&self) -> bool {
        self.is_catch_up
    }

    pub fn outcome(&self) -> &EncounterOutcome {
        &self.outcome
    }

    pub fn kind(&self) -> EncounterKind {
        self.outcome.kind()
    }
}
