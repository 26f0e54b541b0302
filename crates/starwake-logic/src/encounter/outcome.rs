//! Combat outcome classifier.

use serde::{Deserialize, Serialize};

use super::result::{CombatScores, EncounterKind};
use crate::config::EncounterTuning;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CombatOutcome {
    Victory,
    Harassment,
    Boarding,
}

impl CombatOutcome {
    pub fn kind(self) -> EncounterKind {
        match self {
            CombatOutcome::Victory => EncounterKind::Victory,
            CombatOutcome::Harassment => EncounterKind::Harassment,
            CombatOutcome::Boarding => EncounterKind::Boarding,
        }
    }
}

/// Classify a fight from its already-rolled scores.
///
/// Pure: no randomness. While catching up, a fight that would end in
/// boarding is downgraded to harassment.
pub fn determine_combat_outcome(
    defense: f64,
    attack: f64,
    is_catch_up: bool,
    tuning: &EncounterTuning,
) -> CombatOutcome {
    let ratio = CombatScores { defense, attack }.ratio();
    if ratio >= tuning.victory_threshold {
        CombatOutcome::Victory
    } else if ratio >= tuning.harassment_threshold || is_catch_up {
        CombatOutcome::Harassment
    } else {
        CombatOutcome::Boarding
    }
}
