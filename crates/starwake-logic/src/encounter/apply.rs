//! The only place an encounter writes to the vessel and world.

use super::narrative::describe;
use super::result::EncounterResult;
use crate::collaborators::{CrewMortality, Experience};
use crate::constants::DEGRADATION_MAX;
use crate::health::{apply_health_loss, DamageCause};
use crate::skills::{ExperienceEvent, LevelUp};
use crate::vessel::Vessel;
use crate::world::{EncounterStats, LogKind, WorldState};

/// Commit a resolved encounter. Not idempotent: call once per result.
///
/// Order matters: health is reduced before mortality runs, and the
/// experience event is built last so level-ups follow the encounter entry
/// in the log.
pub fn apply_encounter_result(
    vessel: &mut Vessel,
    world: &mut WorldState,
    result: &EncounterResult,
    experience: &mut dyn Experience,
    mortality: &mut dyn CrewMortality,
) -> Vec<LevelUp> {
    let outcome = result.outcome();
    let kind = result.kind();

    vessel.last_encounter_at = Some(world.sim_time);
    world
        .encounter_stats
        .get_or_insert_with(EncounterStats::default)
        .record(kind);

    let gained = outcome.credits_gained();
    if gained > 0 {
        world.credit(gained);
    }
    let lost = outcome.credits_lost();
    if lost > 0 {
        world.debit(lost);
    }

    if let Some(losses) = outcome.health_loss() {
        let cause = DamageCause::Encounter(kind);
        for (&crew_id, &loss) in losses {
            if let Some(crew) = vessel.crew_member_mut(crew_id) {
                crew.health = apply_health_loss(crew.health, loss);
                mortality.record_damage(crew, cause);
            }
        }
    }

    if let Some(wear) = outcome.degradation() {
        for (&slot, &delta) in wear {
            if let Some(item) = vessel.equipment.get_mut(slot) {
                item.degradation = (item.degradation + delta).clamp(0.0, DEGRADATION_MAX);
            }
        }
    }

    let delay = outcome.delay_hours();
    if delay > 0.0 {
        if let Some(plan) = vessel.flight_plan.as_mut() {
            plan.extend(delay);
        }
    }

    let text = describe(result, vessel);
    log::info!("[encounter] {}", text);
    world
        .log
        .append(world.sim_time, LogKind::Encounter, text, Some(vessel.name.clone()));

    let level_ups = experience.award_event(vessel, &ExperienceEvent::from_result(result));
    for up in &level_ups {
        let text = format!("{} reached {} level {}.", up.crew_name, up.skill.label(), up.level);
        log::info!("[level-up] {}", text);
        world
            .log
            .append(world.sim_time, LogKind::LevelUp, text, Some(up.crew_name.clone()));
    }
    level_ups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encounter::result::{DegradationDelta, HealthLoss};
    use crate::encounter::{CombatScores, EncounterKind, EncounterOutcome};
    use crate::health::MortalityWatch;
    use crate::skills::{SkillProfile, SkillTrainer};
    use crate::vessel::{CrewMember, CrewRole, EquipmentInstance, FlightPlan, Job};

    const SCORES: CombatScores = CombatScores {
        defense: 10.0,
        attack: 100.0,
    };

    fn vessel() -> Vessel {
        let mut v = Vessel::new(2, "Shrike", 25_000.0);
        v.flight_plan = Some(FlightPlan::new("Ceres", 20.0, 30.0));
        v.equipment.push(EquipmentInstance::worn("pd_turret", 95.0));
        v.equipment.push(EquipmentInstance::worn("shield_emitter", 3.0));
        let ode = SkillProfile::new(0.0, 0.0, 38.0, 0.0);
        let fenn = SkillProfile::new(0.0, 0.0, 10.0, 0.0);
        v.crew.push(CrewMember::new(1, "Ode", CrewRole::Avatar, Job::Armory, ode).with_health(8.0));
        let fenn = CrewMember::new(2, "Fenn", CrewRole::Crew, Job::Armory, fenn).with_health(12.0);
        v.crew.push(fenn);
        v
    }

    fn apply(
        v: &mut Vessel,
        world: &mut WorldState,
        outcome: EncounterOutcome,
    ) -> (Vec<LevelUp>, MortalityWatch) {
        let result = EncounterResult::new(v.id, 4, 1.0e7, false, outcome);
        let mut trainer = SkillTrainer::default();
        let mut watch = MortalityWatch::new();
        let ups = apply_encounter_result(v, world, &result, &mut trainer, &mut watch);
        (ups, watch)
    }

    #[test]
    fn boarding_clamps_everything() {
        let mut v = vessel();
        let mut world = WorldState::new(80);
        world.sim_time = 12.5;
        let outcome = EncounterOutcome::Boarding {
            scores: SCORES,
            health_loss: HealthLoss::from([(1, 30.0), (2, 30.0)]),
            credits_lost: 500,
            degradation: DegradationDelta::from([(0, 10.0), (1, -50.0), (9, 10.0)]),
        };
        let (_, watch) = apply(&mut v, &mut world, outcome);

        assert_eq!(world.credits, 0);
        assert_eq!(v.equipment[0].degradation, 100.0);
        assert_eq!(v.equipment[1].degradation, 0.0);
        assert_eq!(v.last_encounter_at, Some(12.5));

        // The avatar survives at 1; ordinary crew die.
        assert_eq!(v.crew[0].health, 1.0);
        assert!(v.crew[0].is_alive);
        assert_eq!(v.crew[1].health, 0.0);
        assert!(!v.crew[1].is_alive);
        assert_eq!(watch.deaths().len(), 1);
    }

    #[test]
    fn victory_credits_and_stats() {
        let mut v = vessel();
        let mut world = WorldState::new(1_000);
        assert!(world.stats().is_none());
        let outcome = EncounterOutcome::Victory {
            scores: SCORES,
            credits_gained: 200,
            degradation: DegradationDelta::new(),
        };
        apply(&mut v, &mut world, outcome);
        assert_eq!(world.credits, 1_200);
        assert_eq!(world.lifetime_earned, 200);
        assert_eq!(world.stats().unwrap().count(EncounterKind::Victory), 1);
        assert_eq!(world.stats().unwrap().total(), 1);
    }

    #[test]
    fn negotiated_ransom_debits() {
        let mut v = vessel();
        let mut world = WorldState::new(1_000);
        apply(&mut v, &mut world, EncounterOutcome::Negotiated { negotiator: 1, ransom: 150 });
        assert_eq!(world.credits, 850);
        assert_eq!(world.lifetime_earned, 0);
    }

    #[test]
    fn delay_extends_flight_plan() {
        let mut v = vessel();
        let mut world = WorldState::new(0);
        let outcome = EncounterOutcome::Fled {
            scores: SCORES,
            health_loss: HealthLoss::new(),
            delay_hours: 1.5,
        };
        apply(&mut v, &mut world, outcome);
        assert!((v.flight_plan.as_ref().unwrap().total_hours - 21.5).abs() < 1e-9);
    }

    #[test]
    fn log_has_encounter_then_level_ups() {
        let mut v = vessel();
        v.crew[1].health = 100.0;
        let mut world = WorldState::new(0);
        world.sim_time = 3.0;
        let outcome = EncounterOutcome::Victory {
            scores: SCORES,
            credits_gained: 200,
            degradation: DegradationDelta::new(),
        };
        let (ups, _) = apply(&mut v, &mut world, outcome);

        // Ode at 38 combat gains 80 × 0.05 = 4 → 42, crossing level 4.
        assert!(ups.iter().any(|u| u.crew_id == 1 && u.level == 4));
        let entries = world.log.entries();
        assert_eq!(entries[0].kind, LogKind::Encounter);
        assert_eq!(entries[0].subject.as_deref(), Some("Shrike"));
        assert_eq!(entries[0].timestamp, 3.0);
        assert_eq!(world.log.of_kind(LogKind::LevelUp).count(), ups.len());
    }
}
