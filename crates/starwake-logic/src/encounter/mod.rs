//! Hostile encounter resolution.
//!
//! One call resolves a whole interdiction:
//!
//! ```text
//! threat ─► evasion gate ─► negotiation gate ─► defense/attack + variance
//!        ─► flee gate ─► outcome classifier ─► effect compiler ─► applier
//! ```
//!
//! The gates short-circuit on the first success. Everything up to the
//! effect compiler only reads state; [`apply::apply_encounter_result`] is
//! the single place an encounter mutates the vessel and world.

pub mod apply;
pub mod effects;
pub mod gates;
pub mod narrative;
pub mod outcome;
pub mod pipeline;
pub mod result;
pub mod scoring;
pub mod threat;

pub use apply::apply_encounter_result;
pub use outcome::{determine_combat_outcome, CombatOutcome};
pub use pipeline::resolve;
pub use result::{CombatScores, EncounterKind, EncounterOutcome, EncounterResult};

use crate::catalog::EquipmentCatalog;
use crate::collaborators::{CommandStaff, JobAssignment, MasteryPool, Navigation};
use crate::config::EncounterTuning;

/// Read-only collaborators and tuning shared by the pure pipeline stages.
#[derive(Clone, Copy)]
pub struct EncounterLookups<'a> {
    pub tuning: &'a EncounterTuning,
    pub catalog: &'a dyn EquipmentCatalog,
    pub navigation: &'a dyn Navigation,
    pub jobs: &'a dyn JobAssignment,
    pub command: &'a dyn CommandStaff,
    pub mastery: &'a dyn MasteryPool,
}
