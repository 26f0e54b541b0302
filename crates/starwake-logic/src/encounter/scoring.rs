//! Defense and attack scoring, plus the variance roll that precedes combat.

use serde::{Deserialize, Serialize};

use super::result::CombatScores;
use super::EncounterLookups;
use crate::catalog::EquipmentClass;
use crate::config::EncounterTuning;
use crate::random::RandomSource;
use crate::vessel::{Job, Vessel};

/// The five additive parts of a vessel's defense.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DefenseBreakdown {
    pub point_defense: f64,
    pub armory: f64,
    pub passive: f64,
    pub mass: f64,
    pub rally: f64,
}

impl DefenseBreakdown {
    pub fn total(&self) -> f64 {
        self.point_defense + self.armory + self.passive + self.mass + self.rally
    }
}

/// Multiplier point-defense guns get from crew at their stations.
pub fn staffing_multiplier(vessel: &Vessel, lookups: &EncounterLookups<'_>) -> f64 {
    let t = lookups.tuning;
    let best_gunner = lookups
        .jobs
        .crew_in_job(vessel, Job::PointDefense)
        .iter()
        .map(|c| c.skills.combat)
        .reduce(f64::max);
    match best_gunner {
        Some(skill) => 1.0 + t.staffing_base_bonus + skill / 100.0 * t.staffing_skill_weight,
        None => 1.0,
    }
}

pub fn defense_breakdown(vessel: &Vessel, lookups: &EncounterLookups<'_>) -> DefenseBreakdown {
    let t = lookups.tuning;
    let catalog = lookups.catalog;

    let staffing = staffing_multiplier(vessel, lookups);
    let point_defense: f64 = vessel
        .equipment_of_class(catalog, EquipmentClass::PointDefense)
        .map(|(_, inst, def)| def.attack_score.max(0.0) * inst.effectiveness() * staffing)
        .sum();

    let armory: f64 = lookups
        .jobs
        .crew_in_job(vessel, Job::Armory)
        .iter()
        .map(|crew| {
            let weapons: f64 = crew
                .equipped_of_class(catalog, EquipmentClass::PersonalWeapon)
                .map(|w| w.attack_score.max(0.0))
                .sum();
            let fitness = (crew.health / 100.0).clamp(0.0, 1.0);
            (crew.skills.combat * t.armory_skill_weight + weapons) * fitness
        })
        .sum();

    let passive: f64 = vessel
        .equipment
        .iter()
        .filter_map(|inst| catalog.lookup(&inst.item_id))
        .filter(|def| def.class.is_passive_defense())
        .map(|def| def.defense_bonus.max(0.0))
        .sum();

    let mass = vessel.total_mass_kg(catalog) * t.mass_defense_per_kg;
    let rally = lookups.command.rally_bonus(vessel);

    DefenseBreakdown {
        point_defense,
        armory,
        passive,
        mass: mass.max(0.0),
        rally: rally.max(0.0),
    }
}

pub fn defense_score(vessel: &Vessel, lookups: &EncounterLookups<'_>) -> f64 {
    defense_breakdown(vessel, lookups).total()
}

pub fn attack_score(threat_level: u8, tuning: &EncounterTuning) -> f64 {
    f64::from(threat_level) * tuning.attack_multiplier
}

/// Perturb both sides independently: defense first, then attack.
pub fn apply_variance(
    defense: f64,
    attack: f64,
    tuning: &EncounterTuning,
    rng: &mut dyn RandomSource,
) -> CombatScores {
    let defense = defense * rng.variance(tuning.defense_variance);
    let attack = attack * rng.variance(tuning.attack_variance);
    CombatScores { defense, attack }
}
