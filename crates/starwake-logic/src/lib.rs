//! Pure encounter logic for Starwake.
//!
//! This crate resolves hostile encounters for vessels in transit. It does no
//! I/O and installs no logger: functions take plain data, draw randomness
//! through [`random::RandomSource`], and return results, so every stage is
//! unit-testable and the same code runs in the game host and in the
//! headless `starwake-simtest` harness.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`catalog`] | Equipment definitions and the catalog lookup trait |
//! | [`collaborators`] | Navigation, jobs, command, mastery, experience, mortality traits |
//! | [`config`] | Encounter tuning constants, JSON overrides, validation |
//! | [`constants`] | Stat ranges and standard item ids |
//! | [`encounter`] | Threat, gates, scoring, outcome, effects, applier |
//! | [`engine`] | Owns collaborators and randomness; resolve-and-apply entry point |
//! | [`health`] | Health loss and crew mortality |
//! | [`random`] | Injectable randomness: `rand` adapter and scripted draws |
//! | [`scheduler`] | Per-tick encounter rolls, cooldowns, catch-up, resolver hook |
//! | [`skills`] | Skill profiles, experience gain, encounter training |
//! | [`vessel`] | Vessels, crew, installed equipment, cargo, flight plans |
//! | [`world`] | Credits, encounter statistics, the event log |

pub mod catalog;
pub mod collaborators;
pub mod config;
pub mod constants;
pub mod encounter;
pub mod engine;
pub mod health;
pub mod random;
pub mod scheduler;
pub mod skills;
pub mod vessel;
pub mod world;

pub use encounter::{EncounterKind, EncounterOutcome, EncounterResult};
pub use engine::EncounterEngine;
pub use scheduler::{EncounterResolver, TickScheduler};
