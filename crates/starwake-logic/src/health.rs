//! Crew health loss and mortality.
//!
//! Encounter damage is subtracted by the applier with a floor at zero; the
//! [`MortalityWatch`] then decides what zero means: the avatar is held at
//! one health point, anyone else is marked dead.

use serde::{Deserialize, Serialize};

use crate::collaborators::CrewMortality;
use crate::constants::{AVATAR_HEALTH_FLOOR, HEALTH_MAX};
use crate::encounter::EncounterKind;
use crate::vessel::{CrewId, CrewMember, CrewRole};

/// Subtract `loss` from `health`, keeping the result in `[0, 100]`.
///
/// Negative losses are ignored; encounters never heal.
pub fn apply_health_loss(health: f64, loss: f64) -> f64 {
    (health - loss.max(0.0)).clamp(0.0, HEALTH_MAX)
}

pub fn is_dead(health: f64) -> bool {
    health <= 0.0
}

/// What caused a crew member's injury.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DamageCause {
    Encounter(EncounterKind),
}

/// A crew death recorded by [`MortalityWatch`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeathRecord {
    pub crew_id: CrewId,
    pub name: String,
    pub cause: DamageCause,
}

/// Default crew-mortality collaborator.
#[derive(Debug, Clone, Default)]
pub struct MortalityWatch {
    deaths: Vec<DeathRecord>,
}

impl MortalityWatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn deaths(&self) -> &[DeathRecord] {
        &self.deaths
    }
}

impl CrewMortality for MortalityWatch {
    fn record_damage(&mut self, crew: &mut CrewMember, cause: DamageCause) {
        if crew.role == CrewRole::Avatar {
            crew.health = crew.health.max(AVATAR_HEALTH_FLOOR);
            return;
        }
        if crew.is_alive && is_dead(crew.health) {
            crew.is_alive = false;
            log::warn!("{} (crew {}) died: {:?}", crew.name, crew.id, cause);
            self.deaths.push(DeathRecord {
                crew_id: crew.id,
                name: crew.name.clone(),
                cause,
            });
        }
    }
}
