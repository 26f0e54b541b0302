//! Resolution pipeline: reads state, draws randomness, returns a result.

use super::effects::{compile_effects, compile_flee};
use super::gates::{
    compute_ransom, evasion_odds, flee_probability, negotiation_odds, roll_gate,
};
use super::outcome::determine_combat_outcome;
use super::result::{EncounterOutcome, EncounterResult};
use super::scoring::{apply_variance, attack_score, defense_score};
use super::threat::assess_threat;
use super::EncounterLookups;
use crate::random::RandomSource;
use crate::vessel::Vessel;
use crate::world::WorldState;

/// Resolve one encounter without touching any state.
///
/// Draw order: evasion, negotiation, ransom, defense variance, attack
/// variance, flee, then the effect compiler's per-crew draws. Gates with
/// zero probability are skipped without a draw.
pub fn resolve(
    vessel: &Vessel,
    world: &WorldState,
    is_catch_up: bool,
    lookups: &EncounterLookups<'_>,
    rng: &mut dyn RandomSource,
) -> EncounterResult {
    let tuning = lookups.tuning;
    let position_km = lookups.navigation.distance_km(vessel, world);
    let cargo_kg = vessel.cargo_weight_kg(lookups.catalog);
    let threat = assess_threat(position_km, cargo_kg, tuning);
    let finish =
        |outcome| EncounterResult::new(vessel.id, threat, position_km, is_catch_up, outcome);

    let evasion = evasion_odds(vessel, world, lookups);
    let evade_p = evasion.probability();
    log::debug!(
        "[encounter] {} threat {} at {:.0} km, cargo {:.0} kg, evasion {:.3} {:?}",
        vessel.name,
        threat,
        position_km,
        cargo_kg,
        evade_p,
        evasion
    );
    if roll_gate(evade_p, rng) {
        return finish(EncounterOutcome::Evaded { probability: evade_p });
    }

    if let Some(odds) = negotiation_odds(vessel, lookups) {
        log::debug!(
            "[encounter] {} negotiation {:.3} (crew {})",
            vessel.name,
            odds.probability,
            odds.negotiator
        );
        if roll_gate(odds.probability, rng) {
            let commerce = lookups.command.commerce_bonus(vessel);
            let ransom = compute_ransom(world.credits, threat, commerce, tuning, rng);
            return finish(EncounterOutcome::Negotiated {
                negotiator: odds.negotiator,
                ransom,
            });
        }
    }

    let defense = defense_score(vessel, lookups);
    let attack = attack_score(threat, tuning);
    let scores = apply_variance(defense, attack, tuning, rng);
    log::debug!(
        "[encounter] {} defense {:.1} → {:.1}, attack {:.1} → {:.1}",
        vessel.name,
        defense,
        scores.defense,
        attack,
        scores.attack
    );

    if let Some(flee_p) = flee_probability(&scores, vessel.velocity_km_s(), tuning) {
        log::debug!("[encounter] {} flee {:.3}", vessel.name, flee_p);
        if roll_gate(flee_p, rng) {
            return finish(compile_flee(vessel, scores, tuning, rng));
        }
    }

    let combat = determine_combat_outcome(scores.defense, scores.attack, is_catch_up, tuning);
    finish(compile_effects(combat, vessel, world.credits, threat, scores, lookups, rng))
}
