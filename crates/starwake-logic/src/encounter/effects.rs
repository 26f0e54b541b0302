//! Effect compiler: turns a chosen outcome into concrete deltas.
//!
//! Nothing here mutates state. Each crew member gets their own random draw,
//! in crew order; equipment wear is fixed per outcome.

use super::outcome::CombatOutcome;
use super::result::{CombatScores, DegradationDelta, EncounterOutcome, HealthLoss};
use super::EncounterLookups;
use crate::catalog::EquipmentClass;
use crate::config::EncounterTuning;
use crate::random::RandomSource;
use crate::vessel::Vessel;

/// One whole-number loss per active crew member, drawn from `min..=max`.
fn draw_health_loss(
    vessel: &Vessel,
    min: u32,
    max: u32,
    rng: &mut dyn RandomSource,
) -> HealthLoss {
    vessel
        .active_crew()
        .map(|crew| (crew.id, f64::from(rng.whole(min, max))))
        .collect()
}

fn point_defense_wear(
    vessel: &Vessel,
    lookups: &EncounterLookups<'_>,
    amount: f64,
) -> DegradationDelta {
    vessel
        .equipment_of_class(lookups.catalog, EquipmentClass::PointDefense)
        .map(|(slot, _, _)| (slot, amount))
        .collect()
}

fn flight_delay(vessel: &Vessel, fraction: f64) -> f64 {
    vessel.remaining_flight_hours() * fraction
}

pub fn compile_victory(
    vessel: &Vessel,
    threat_level: u8,
    scores: CombatScores,
    lookups: &EncounterLookups<'_>,
) -> EncounterOutcome {
    let t = lookups.tuning;
    EncounterOutcome::Victory {
        scores,
        credits_gained: u64::from(threat_level) * t.bounty_per_threat,
        degradation: point_defense_wear(vessel, lookups, t.victory_degradation),
    }
}

pub fn compile_harassment(
    vessel: &Vessel,
    scores: CombatScores,
    lookups: &EncounterLookups<'_>,
    rng: &mut dyn RandomSource,
) -> EncounterOutcome {
    let t = lookups.tuning;
    let health_loss = draw_health_loss(
        vessel,
        t.harassment_health_loss_min,
        t.harassment_health_loss_max,
        rng,
    );
    EncounterOutcome::Harassment {
        scores,
        health_loss,
        degradation: point_defense_wear(vessel, lookups, t.harassment_degradation),
        delay_hours: flight_delay(vessel, t.harassment_delay_fraction),
    }
}

/// Boarders injure everyone (armor halves it), take a cut of the credits,
/// and damage every installed item.
pub fn compile_boarding(
    vessel: &Vessel,
    credits: u64,
    scores: CombatScores,
    lookups: &EncounterLookups<'_>,
    rng: &mut dyn RandomSource,
) -> EncounterOutcome {
    let t = lookups.tuning;

    let health_loss: HealthLoss = vessel
        .active_crew()
        .map(|crew| {
            let draw = rng.whole(t.boarding_health_loss_min, t.boarding_health_loss_max);
            let mut loss = f64::from(draw);
            if crew.wears_armor(lookups.catalog) {
                loss *= t.boarding_armor_factor;
            }
            (crew.id, loss)
        })
        .collect();

    let steal_rate = rng.uniform(t.steal_rate_min, t.steal_rate_max);
    let credits_lost = (credits as f64 * steal_rate).floor() as u64;

    let degradation: DegradationDelta = (0..vessel.equipment.len())
        .map(|slot| (slot, t.boarding_degradation))
        .collect();

    EncounterOutcome::Boarding {
        scores,
        health_loss,
        credits_lost: credits_lost.min(credits),
        degradation,
    }
}

pub fn compile_flee(
    vessel: &Vessel,
    scores: CombatScores,
    tuning: &EncounterTuning,
    rng: &mut dyn RandomSource,
) -> EncounterOutcome {
    let health_loss = draw_health_loss(
        vessel,
        tuning.flee_health_loss_min,
        tuning.flee_health_loss_max,
        rng,
    );
    EncounterOutcome::Fled {
        scores,
        health_loss,
        delay_hours: flight_delay(vessel, tuning.flee_delay_fraction),
    }
}

/// Deltas for a classified fight.
pub fn compile_effects(
    outcome: CombatOutcome,
    vessel: &Vessel,
    credits: u64,
    threat_level: u8,
    scores: CombatScores,
    lookups: &EncounterLookups<'_>,
    rng: &mut dyn RandomSource,
) -> EncounterOutcome {
    match outcome {
        CombatOutcome::Victory => compile_victory(vessel, threat_level, scores, lookups),
        CombatOutcome::Harassment => compile_harassment(vessel, scores, lookups, rng),
        CombatOutcome::Boarding => compile_boarding(vessel, credits, scores, lookups, rng),
    }
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
    use crate::vessel::{CrewMember, CrewRole, EquipmentInstance, FlightPlan, Job};

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

    const SCORES: CombatScores = CombatScores {
        defense: 50.0,
        attack: 100.0,
    };

    fn armed_vessel() -> Vessel {
        let mut v = Vessel::new(1, "Gannet", 30_000.0);
        v.flight_plan = Some(FlightPlan::new("Europa", 40.0, 25.0));
        v.equipment.push(EquipmentInstance::new(items::PD_TURRET));
        v.equipment.push(EquipmentInstance::new(items::SHIELD_EMITTER));
        v.equipment.push(EquipmentInstance::new(items::FLAK_BATTERY));
        let skills = SkillProfile::new(20.0, 20.0, 20.0, 20.0);
        v.crew.push(CrewMember::new(1, "Ash", CrewRole::Crew, Job::Armory, skills.clone()));
        v.crew.push(
            CrewMember::new(2, "Bex", CrewRole::Crew, Job::Armory, skills)
                .with_equipped(items::BOARDING_ARMOR),
        );
        v
    }

    #[test]
    fn victory_bounty_and_pd_wear() {
        let f = Fixture::new();
        let v = armed_vessel();
        let out = compile_victory(&v, 5, SCORES, &f.lookups());
        assert_eq!(out.credits_gained(), 250);
        let wear = out.degradation().unwrap();
        assert_eq!(wear.len(), 2);
        assert_eq!(wear.get(&0), Some(&2.0));
        assert_eq!(wear.get(&2), Some(&2.0));
        assert!(wear.get(&1).is_none());
    }

    #[test]
    fn harassment_draws_per_crew() {
        let f = Fixture::new();
        let v = armed_vessel();
        let mut rng = ScriptedRandom::new(vec![0.0, 0.999]);
        let out = compile_harassment(&v, SCORES, &f.lookups(), &mut rng);
        let loss = out.health_loss().unwrap();
        assert_eq!(loss.get(&1), Some(&5.0));
        assert_eq!(loss.get(&2), Some(&15.0));
        assert_eq!(rng.draws(), 2);
        assert!((out.delay_hours() - 4.0).abs() < 1e-9);
        assert_eq!(out.degradation().unwrap().get(&0), Some(&5.0));
    }

    #[test]
    fn boarding_armor_halves_same_draw() {
        let f = Fixture::new();
        let v = armed_vessel();
        let mut rng = ScriptedRandom::constant(0.5);
        let out = compile_boarding(&v, 1_000, SCORES, &f.lookups(), &mut rng);
        let loss = out.health_loss().unwrap();
        let unprotected = loss[&1];
        let protected = loss[&2];
        assert!((protected - unprotected * 0.5).abs() < 1e-9);
        assert!(unprotected >= 10.0 && unprotected <= 30.0);
    }

    #[test]
    fn boarding_steals_and_wears_everything() {
        let f = Fixture::new();
        let v = armed_vessel();
        // Two crew draws, then the steal rate at the bottom of the band.
        let mut rng = ScriptedRandom::new(vec![0.5, 0.5, 0.0]);
        let out = compile_boarding(&v, 1_001, SCORES, &f.lookups(), &mut rng);
        assert_eq!(out.credits_lost(), 100);
        let wear = out.degradation().unwrap();
        assert_eq!(wear.len(), 3);
        assert!(wear.values().all(|d| *d == 10.0));
    }

    #[test]
    fn boarding_broke_ship_loses_nothing() {
        let f = Fixture::new();
        let v = armed_vessel();
        let mut rng = ScriptedRandom::constant(0.9);
        let out = compile_boarding(&v, 0, SCORES, &f.lookups(), &mut rng);
        assert_eq!(out.credits_lost(), 0);
    }

    #[test]
    fn dead_crew_not_injured() {
        let f = Fixture::new();
        let mut v = armed_vessel();
        v.crew[0].is_alive = false;
        let mut rng = ScriptedRandom::constant(0.5);
        let out = compile_harassment(&v, SCORES, &f.lookups(), &mut rng);
        assert!(out.health_loss().unwrap().get(&1).is_none());
    }

    #[test]
    fn flee_minor_injuries_and_delay() {
        let f = Fixture::new();
        let v = armed_vessel();
        let mut rng = ScriptedRandom::constant(0.999);
        let out = compile_flee(&v, SCORES, &f.tuning, &mut rng);
        assert!(out.health_loss().unwrap().values().all(|l| *l == 5.0));
        assert!((out.delay_hours() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn no_flight_plan_no_delay() {
        let f = Fixture::new();
        let mut v = armed_vessel();
        v.flight_plan = None;
        let mut rng = ScriptedRandom::constant(0.5);
        let out = compile_harassment(&v, SCORES, &f.lookups(), &mut rng);
        assert_eq!(out.delay_hours(), 0.0);
    }
}
