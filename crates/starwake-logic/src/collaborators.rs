//! Interfaces the encounter pipeline consumes, with default implementations.
//!
//! | Trait | Default | Answers |
//! |-------|---------|---------|
//! | [`Navigation`] | [`FlightPlanNavigation`] | how far along its route a vessel is |
//! | [`JobAssignment`] | [`AssignedJobs`] | who is staffing a station |
//! | [`CommandStaff`] | [`ChainOfCommand`] | captain-derived bonuses and talks |
//! | [`MasteryPool`] | [`CheckpointMastery`] | evasion bonus from mastery checkpoints |
//! | [`Experience`] | [`crate::skills::SkillTrainer`] | experience and level-ups |
//! | [`CrewMortality`] | [`crate::health::MortalityWatch`] | what happens at zero health |
//!
//! The equipment catalog lives in [`crate::catalog`].

use serde::{Deserialize, Serialize};

use crate::health::DamageCause;
use crate::skills::{ExperienceEvent, LevelUp};
use crate::vessel::{CrewMember, CrewRole, Job, Vessel};
use crate::world::WorldState;

/// Position lookup.
pub trait Navigation {
    /// Distance travelled along the current route, in km.
    fn distance_km(&self, vessel: &Vessel, world: &WorldState) -> f64;
}

/// Reads distance straight off the vessel's flight plan.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlightPlanNavigation;

impl Navigation for FlightPlanNavigation {
    fn distance_km(&self, vessel: &Vessel, _world: &WorldState) -> f64 {
        vessel.flight_plan.as_ref().map_or(0.0, |plan| plan.distance_km)
    }
}

pub trait JobAssignment {
    /// Active crew currently assigned to `job`.
    fn crew_in_job<'v>(&self, vessel: &'v Vessel, job: Job) -> Vec<&'v CrewMember>;
}

/// Uses each crew member's own `job` field.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssignedJobs;

impl JobAssignment for AssignedJobs {
    fn crew_in_job<'v>(&self, vessel: &'v Vessel, job: Job) -> Vec<&'v CrewMember> {
        vessel.active_crew().filter(|c| c.job == job).collect()
    }
}

/// Bonuses granted by the commanding officer.
pub trait CommandStaff {
    /// Added to the evasion probability.
    fn piloting_bonus(&self, vessel: &Vessel) -> f64;
    /// Fraction knocked off a ransom.
    fn commerce_bonus(&self, vessel: &Vessel) -> f64;
    /// Flat defense bonus.
    fn rally_bonus(&self, vessel: &Vessel) -> f64;
    /// Whether anyone aboard has the authority to open talks.
    fn can_negotiate(&self, vessel: &Vessel) -> bool;
}

/// Bonuses come from a living captain; officers alone grant nothing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainOfCommand {
    /// Evasion bonus at 100 piloting.
    pub max_piloting_bonus: f64,
    /// Ransom discount at 100 negotiation.
    pub max_commerce_bonus: f64,
    pub rally_bonus: f64,
}

impl Default for ChainOfCommand {
    fn default() -> Self {
        Self {
            max_piloting_bonus: 0.10,
            max_commerce_bonus: 0.20,
            rally_bonus: 10.0,
        }
    }
}

impl ChainOfCommand {
    fn captain<'v>(&self, vessel: &'v Vessel) -> Option<&'v CrewMember> {
        vessel.active_crew().find(|c| c.role == CrewRole::Captain)
    }
}

impl CommandStaff for ChainOfCommand {
    fn piloting_bonus(&self, vessel: &Vessel) -> f64 {
        self.captain(vessel)
            .map_or(0.0, |c| c.skills.piloting / 100.0 * self.max_piloting_bonus)
    }

    fn commerce_bonus(&self, vessel: &Vessel) -> f64 {
        self.captain(vessel)
            .map_or(0.0, |c| c.skills.negotiation / 100.0 * self.max_commerce_bonus)
    }

    fn rally_bonus(&self, vessel: &Vessel) -> f64 {
        if self.captain(vessel).is_some() {
            self.rally_bonus
        } else {
            0.0
        }
    }

    fn can_negotiate(&self, vessel: &Vessel) -> bool {
        self.captain(vessel).is_some()
    }
}

/// Progression pool lookup.
pub trait MasteryPool {
    fn evasion_bonus(&self, world: &WorldState) -> f64;
}

/// Grants the bonus of the highest checkpoint the piloting pool has reached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckpointMastery {
    /// `(fill percent, evasion bonus)`, ascending by fill.
    pub checkpoints: Vec<(f64, f64)>,
}

impl Default for CheckpointMastery {
    fn default() -> Self {
        Self {
            checkpoints: vec![(10.0, 0.01), (25.0, 0.02), (50.0, 0.03), (95.0, 0.05)],
        }
    }
}

impl MasteryPool for CheckpointMastery {
    fn evasion_bonus(&self, world: &WorldState) -> f64 {
        self.checkpoints
            .iter()
            .filter(|(fill, _)| world.piloting_mastery >= *fill)
            .map(|(_, bonus)| *bonus)
            .fold(0.0, f64::max)
    }
}

/// Experience subsystem.
pub trait Experience {
    fn award_event(&mut self, vessel: &mut Vessel, event: &ExperienceEvent) -> Vec<LevelUp>;
}

/// Crew-mortality subsystem; runs after health has been reduced.
pub trait CrewMortality {
    fn record_damage(&mut self, crew: &mut CrewMember, cause: DamageCause);
}
