//! Encounter engine: owns tuning, collaborators and randomness, and
//! resolves-then-applies encounters in one call.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::catalog::{EquipmentCatalog, StaticCatalog};
use crate::collaborators::{
    AssignedJobs, ChainOfCommand, CheckpointMastery, CommandStaff, CrewMortality, Experience,
    FlightPlanNavigation, JobAssignment, MasteryPool, Navigation,
};
use crate::config::EncounterTuning;
use crate::encounter::{apply_encounter_result, resolve, EncounterLookups, EncounterResult};
use crate::health::MortalityWatch;
use crate::random::{RandomSource, RngSource};
use crate::skills::SkillTrainer;
use crate::vessel::Vessel;
use crate::world::WorldState;

/// Main entry point for resolving encounters.
pub struct EncounterEngine {
    tuning: EncounterTuning,
    catalog: Box<dyn EquipmentCatalog>,
    navigation: Box<dyn Navigation>,
    jobs: Box<dyn JobAssignment>,
    command: Box<dyn CommandStaff>,
    mastery: Box<dyn MasteryPool>,
    experience: Box<dyn Experience>,
    mortality: Box<dyn CrewMortality>,
    rng: Box<dyn RandomSource>,
}

impl EncounterEngine {
    /// Default tuning, the built-in catalog, default collaborators, and
    /// thread-local entropy.
    pub fn standard() -> Self {
        Self {
            tuning: EncounterTuning::default(),
            catalog: Box::new(StaticCatalog::standard()),
            navigation: Box::new(FlightPlanNavigation),
            jobs: Box::new(AssignedJobs),
            command: Box::new(ChainOfCommand::default()),
            mastery: Box::new(CheckpointMastery::default()),
            experience: Box::new(SkillTrainer::default()),
            mortality: Box::new(MortalityWatch::new()),
            rng: Box::new(RngSource::thread()),
        }
    }

    /// Reproducible engine for replays and tests.
    pub fn seeded(seed: u64) -> Self {
        Self::standard().with_rng(RngSource(StdRng::seed_from_u64(seed)))
    }

    pub fn with_tuning(mut self, tuning: EncounterTuning) -> Self {
        self.tuning = tuning;
        self
    }

    pub fn with_catalog(mut self, catalog: impl EquipmentCatalog + 'static) -> Self {
        self.catalog = Box::new(catalog);
        self
    }

    pub fn with_navigation(mut self, navigation: impl Navigation + 'static) -> Self {
        self.navigation = Box::new(navigation);
        self
    }

    pub fn with_jobs(mut self, jobs: impl JobAssignment + 'static) -> Self {
        self.jobs = Box::new(jobs);
        self
    }

    pub fn with_command(mut self, command: impl CommandStaff + 'static) -> Self {
        self.command = Box::new(command);
        self
    }

    pub fn with_mastery(mut self, mastery: impl MasteryPool + 'static) -> Self {
        self.mastery = Box::new(mastery);
        self
    }

    pub fn with_experience(mut self, experience: impl Experience + 'static) -> Self {
        self.experience = Box::new(experience);
        self
    }

    pub fn with_mortality(mut self, mortality: impl CrewMortality + 'static) -> Self {
        self.mortality = Box::new(mortality);
        self
    }

    pub fn with_rng(mut self, rng: impl RandomSource + 'static) -> Self {
        self.rng = Box::new(rng);
        self
    }

    pub fn tuning(&self) -> &EncounterTuning {
        &self.tuning
    }

    pub fn catalog(&self) -> &dyn EquipmentCatalog {
        self.catalog.as_ref()
    }

    /// Read-only view handed to the pure pipeline stages.
    pub fn lookups(&self) -> EncounterLookups<'_> {
        EncounterLookups {
            tuning: &self.tuning,
            catalog: self.catalog.as_ref(),
            navigation: self.navigation.as_ref(),
            jobs: self.jobs.as_ref(),
            command: self.command.as_ref(),
            mastery: self.mastery.as_ref(),
        }
    }

    /// Resolve an encounter for `vessel` and commit its effects.
    pub fn resolve_encounter(
        &mut self,
        vessel: &mut Vessel,
        world: &mut WorldState,
        is_catch_up: bool,
    ) -> EncounterResult {
        let lookups = EncounterLookups {
            tuning: &self.tuning,
            catalog: self.catalog.as_ref(),
            navigation: self.navigation.as_ref(),
            jobs: self.jobs.as_ref(),
            command: self.command.as_ref(),
            mastery: self.mastery.as_ref(),
        };
        let result = resolve(vessel, world, is_catch_up, &lookups, self.rng.as_mut());
        apply_encounter_result(
            vessel,
            world,
            &result,
            self.experience.as_mut(),
            self.mortality.as_mut(),
        );
        result
    }
}
