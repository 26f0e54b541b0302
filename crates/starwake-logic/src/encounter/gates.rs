//! Probabilistic gates: evasion, negotiation, and flight.
//!
//! Each gate turns the scoring context into a probability; a gate with no
//! chance at all returns zero (or `None`) and never consumes a random draw.

use serde::{Deserialize, Serialize};

use super::result::CombatScores;
use super::EncounterLookups;
use crate::catalog::EquipmentClass;
use crate::config::EncounterTuning;
use crate::random::RandomSource;
use crate::vessel::{CrewId, Job, Vessel};
use crate::world::WorldState;

/// Parts of the evasion chance, kept for logging.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EvasionOdds {
    pub velocity: f64,
    pub stealth: f64,
    pub helm: f64,
    pub command: f64,
    pub mastery: f64,
}

impl EvasionOdds {
    /// Sum of all parts, not clamped to 1.0.
    pub fn probability(&self) -> f64 {
        self.velocity + self.stealth + self.helm + self.command + self.mastery
    }
}

/// Evasion chance; all zero without an active flight plan.
pub fn evasion_odds(
    vessel: &Vessel,
    world: &WorldState,
    lookups: &EncounterLookups<'_>,
) -> EvasionOdds {
    let Some(plan) = vessel.active_flight_plan() else {
        return EvasionOdds::default();
    };
    let t = lookups.tuning;

    let velocity = (plan.velocity_km_s / t.evasion_velocity_divisor).min(t.evasion_velocity_cap);
    let stealth = if vessel.has_equipment_class(lookups.catalog, EquipmentClass::Stealth) {
        t.stealth_bonus
    } else {
        0.0
    };
    let helm = lookups
        .jobs
        .crew_in_job(vessel, Job::Helm)
        .iter()
        .map(|c| c.skills.piloting)
        .reduce(f64::max)
        .map_or(0.0, |skill| (skill / 100.0 * t.evasion_skill_weight).min(t.evasion_skill_cap));

    EvasionOdds {
        velocity: velocity.max(0.0),
        stealth,
        helm: helm.max(0.0),
        command: lookups.command.piloting_bonus(vessel).max(0.0),
        mastery: lookups.mastery.evasion_bonus(world).max(0.0),
    }
}

pub fn evasion_probability(
    vessel: &Vessel,
    world: &WorldState,
    lookups: &EncounterLookups<'_>,
) -> f64 {
    evasion_odds(vessel, world, lookups).probability()
}

/// Roll a gate. A probability of zero or less fails without drawing.
pub fn roll_gate(probability: f64, rng: &mut dyn RandomSource) -> bool {
    if probability <= 0.0 {
        return false;
    }
    rng.chance(probability)
}

/// Who would speak for the ship, and how likely they are to succeed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NegotiationOdds {
    pub negotiator: CrewId,
    pub probability: f64,
}

/// `None` when no commander is aboard or nobody qualified can speak.
pub fn negotiation_odds(
    vessel: &Vessel,
    lookups: &EncounterLookups<'_>,
) -> Option<NegotiationOdds> {
    if !lookups.command.can_negotiate(vessel) {
        return None;
    }
    vessel
        .active_crew()
        .filter(|c| c.role.can_parley())
        .max_by(|a, b| a.skills.negotiation.total_cmp(&b.skills.negotiation))
        .map(|best| NegotiationOdds {
            negotiator: best.id,
            probability: (best.skills.negotiation / lookups.tuning.negotiation_divisor).max(0.0),
        })
}

/// Ransom demanded once talks succeed.
///
/// `rate` is drawn from the configured band, scaled by `threat / 10`, and
/// reduced by the commander's commerce bonus.
pub fn compute_ransom(
    credits: u64,
    threat_level: u8,
    commerce_bonus: f64,
    tuning: &EncounterTuning,
    rng: &mut dyn RandomSource,
) -> u64 {
    let rate = rng.uniform(tuning.ransom_rate_min, tuning.ransom_rate_max)
        * f64::from(threat_level)
        / 10.0
        * (1.0 - commerce_bonus.clamp(0.0, 1.0));
    let demanded = (credits as f64 * rate).floor() as u64;
    demanded.max(tuning.min_ransom)
}

/// Flee chance, or `None` when the fight is not lopsided enough to try.
pub fn flee_probability(
    scores: &CombatScores,
    velocity_km_s: f64,
    tuning: &EncounterTuning,
) -> Option<f64> {
    if scores.ratio() >= tuning.flee_ratio_threshold {
        return None;
    }
    let velocity_bonus =
        (velocity_km_s.max(0.0) / tuning.flee_velocity_divisor).min(tuning.flee_velocity_cap);
    Some(tuning.flee_base_chance + velocity_bonus)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::StaticCatalog;
    use crate::collaborators::{
        AssignedJobs, ChainOfCommand, CheckpointMastery, FlightPlanNavigation,
    };
    use crate::constants::items;
    use crate::random::ScriptedRandom;
    use crate::skills::SkillProfile;
    use crate::vessel::{CrewMember, CrewRole, EquipmentInstance, FlightPlan};

    struct Fixture {
        tuning: EncounterTuning,
        catalog: StaticCatalog,
        command: ChainOfCommand,
        mastery: CheckpointMastery,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                tuning: EncounterTuning::default(),
                catalog: StaticCatalog::standard(),
                command: ChainOfCommand::default(),
                mastery: CheckpointMastery::default(),
            }
        }

        fn lookups(&self) -> EncounterLookups<'_> {
            EncounterLookups {
                tuning: &self.tuning,
                catalog: &self.catalog,
                navigation: &FlightPlanNavigation,
                jobs: &AssignedJobs,
                command: &self.command,
                mastery: &self.mastery,
            }
        }
    }

    fn member(id: u32, role: CrewRole, job: Job, skills: SkillProfile) -> CrewMember {
        CrewMember::new(id, "crew", role, job, skills)
    }

    fn under_way(velocity: f64) -> Vessel {
        let mut v = Vessel::new(1, "Petrel", 10_000.0);
        v.flight_plan = Some(FlightPlan::new("Titan", 100.0, velocity));
        v
    }

    #[test]
    fn no_flight_plan_no_evasion() {
        let f = Fixture::new();
        let mut v = Vessel::new(1, "Petrel", 10_000.0);
        v.equipment.push(EquipmentInstance::new(items::SENSOR_JAMMER));
        v.crew.push(member(
            1,
            CrewRole::Captain,
            Job::Helm,
            SkillProfile::new(100.0, 0.0, 0.0, 0.0),
        ));
        let mut world = WorldState::default();
        world.piloting_mastery = 100.0;
        assert_eq!(evasion_probability(&v, &world, &f.lookups()), 0.0);

        let mut rng = ScriptedRandom::constant(0.0);
        assert!(!roll_gate(0.0, &mut rng));
        assert_eq!(rng.draws(), 0);
    }

    #[test]
    fn evasion_terms_capped_individually() {
        let f = Fixture::new();
        let mut v = under_way(1_000.0);
        v.crew.push(member(1, CrewRole::Crew, Job::Helm, SkillProfile::new(100.0, 0.0, 0.0, 0.0)));
        let odds = evasion_odds(&v, &WorldState::default(), &f.lookups());
        assert!((odds.velocity - 0.25).abs() < 1e-9);
        assert!((odds.helm - 0.25).abs() < 1e-9);
        assert_eq!(odds.stealth, 0.0);
        assert_eq!(odds.command, 0.0);
    }

    #[test]
    fn evasion_sum_not_clamped() {
        let f = Fixture::new();
        let mut v = under_way(1_000.0);
        v.equipment.push(EquipmentInstance::new(items::SENSOR_JAMMER));
        v.crew.push(member(
            1,
            CrewRole::Captain,
            Job::Helm,
            SkillProfile::new(100.0, 0.0, 0.0, 0.0),
        ));
        let mut world = WorldState::default();
        world.piloting_mastery = 100.0;
        let mut tuning = EncounterTuning::default();
        tuning.stealth_bonus = 0.6;
        let lookups = EncounterLookups {
            tuning: &tuning,
            ..f.lookups()
        };
        // 0.25 + 0.6 + 0.25 + 0.10 + 0.05
        let p = evasion_probability(&v, &world, &lookups);
        assert!((p - 1.25).abs() < 1e-9);
        let mut rng = ScriptedRandom::constant(0.999);
        assert!(roll_gate(p, &mut rng));
    }

    #[test]
    fn negotiation_requires_commander() {
        let f = Fixture::new();
        let mut v = under_way(10.0);
        v.crew.push(member(
            1,
            CrewRole::Officer,
            Job::Helm,
            SkillProfile::new(0.0, 100.0, 0.0, 0.0),
        ));
        assert!(negotiation_odds(&v, &f.lookups()).is_none());

        v.crew.push(member(
            2,
            CrewRole::Captain,
            Job::Unassigned,
            SkillProfile::new(0.0, 40.0, 0.0, 0.0),
        ));
        let odds = negotiation_odds(&v, &f.lookups()).unwrap();
        // The officer speaks once the captain authorises talks.
        assert_eq!(odds.negotiator, 1);
        assert!((odds.probability - 0.5).abs() < 1e-9);
    }

    #[test]
    fn ordinary_crew_never_negotiate() {
        let f = Fixture::new();
        let mut v = under_way(10.0);
        v.crew.push(member(
            1,
            CrewRole::Captain,
            Job::Unassigned,
            SkillProfile::new(0.0, 10.0, 0.0, 0.0),
        ));
        v.crew.push(member(2, CrewRole::Crew, Job::Helm, SkillProfile::new(0.0, 100.0, 0.0, 0.0)));
        assert_eq!(negotiation_odds(&v, &f.lookups()).unwrap().negotiator, 1);
    }

    #[test]
    fn ransom_scaled_and_floored() {
        let t = EncounterTuning::default();
        // rate = 0.10 × 5/10 = 0.05 → 500.05 of 10,001
        let mut mid = ScriptedRandom::constant(0.5);
        assert_eq!(compute_ransom(10_001, 5, 0.0, &t, &mut mid), 500);
        // commerce bonus knocks a quarter off
        let mut mid = ScriptedRandom::constant(0.5);
        assert_eq!(compute_ransom(10_001, 5, 0.25, &t, &mut mid), 375);
        // poor ships still pay the minimum
        let mut mid = ScriptedRandom::constant(0.5);
        assert_eq!(compute_ransom(100, 5, 0.0, &t, &mut mid), 50);
    }

    #[test]
    fn flee_only_when_lopsided() {
        let t = EncounterTuning::default();
        let even = CombatScores { defense: 50.0, attack: 100.0 };
        assert!(flee_probability(&even, 100.0, &t).is_none());

        let lopsided = CombatScores { defense: 10.0, attack: 100.0 };
        assert!((flee_probability(&lopsided, 0.0, &t).unwrap() - 0.3).abs() < 1e-9);
        assert!((flee_probability(&lopsided, 100.0, &t).unwrap() - 0.55).abs() < 1e-9);
        assert!((flee_probability(&lopsided, 10_000.0, &t).unwrap() - 0.55).abs() < 1e-9);
    }
}
