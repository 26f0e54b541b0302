//! Tick scheduler: advances time and decides when encounters happen.
//!
//! The resolver is registered at startup as a boxed trait object. Vessels
//! are walked one at a time, so no vessel ever has two encounters in flight.

use crate::config::EncounterTuning;
use crate::encounter::gates::roll_gate;
use crate::encounter::EncounterResult;
use crate::engine::EncounterEngine;
use crate::random::{RandomSource, RngSource};
use crate::vessel::Vessel;
use crate::world::{LogKind, WorldState};

/// Anything that can resolve and commit an encounter.
pub trait EncounterResolver {
    fn resolve_encounter(
        &mut self,
        vessel: &mut Vessel,
        world: &mut WorldState,
        is_catch_up: bool,
    ) -> EncounterResult;
}

impl EncounterResolver for EncounterEngine {
    fn resolve_encounter(
        &mut self,
        vessel: &mut Vessel,
        world: &mut WorldState,
        is_catch_up: bool,
    ) -> EncounterResult {
        EncounterEngine::resolve_encounter(self, vessel, world, is_catch_up)
    }
}

pub struct TickScheduler {
    resolver: Option<Box<dyn EncounterResolver>>,
    rng: Box<dyn RandomSource>,
    cooldown_hours: f64,
    chance_per_tick: f64,
}

impl TickScheduler {
    pub fn new(tuning: &EncounterTuning) -> Self {
        Self {
            resolver: None,
            rng: Box::new(RngSource::thread()),
            cooldown_hours: tuning.encounter_cooldown_hours,
            chance_per_tick: tuning.encounter_chance_per_tick,
        }
    }

    pub fn with_rng(mut self, rng: impl RandomSource + 'static) -> Self {
        self.rng = Box::new(rng);
        self
    }

    pub fn set_encounter_resolver(&mut self, resolver: Box<dyn EncounterResolver>) {
        self.resolver = Some(resolver);
    }

    pub fn has_resolver(&self) -> bool {
        self.resolver.is_some()
    }

    /// True once `cooldown_hours` have passed since the vessel's last encounter.
    pub fn cooldown_elapsed(&self, vessel: &Vessel, now: f64) -> bool {
        vessel
            .last_encounter_at
            .map_or(true, |at| now - at >= self.cooldown_hours)
    }

    /// Advance the world by `delta_hours` and roll for encounters.
    pub fn tick(
        &mut self,
        vessels: &mut [Vessel],
        world: &mut WorldState,
        delta_hours: f64,
        is_catch_up: bool,
    ) -> Vec<EncounterResult> {
        let delta = delta_hours.max(0.0);
        world.sim_time += delta;
        if self.resolver.is_none() {
            log::warn!("[scheduler] no encounter resolver registered; skipping encounters");
        }

        let mut results = Vec::new();
        for vessel in vessels.iter_mut() {
            let Some(plan) = vessel.flight_plan.as_mut() else {
                continue;
            };
            plan.advance(delta);
            if plan.is_complete() {
                let text = format!("{} arrived at {}.", vessel.name, plan.destination);
                vessel.flight_plan = None;
                log::info!("[scheduler] {}", text);
                world
                    .log
                    .append(world.sim_time, LogKind::Arrival, text, Some(vessel.name.clone()));
                continue;
            }

            if self.resolver.is_none() || !self.cooldown_elapsed(vessel, world.sim_time) {
                continue;
            }
            if !roll_gate(self.chance_per_tick, self.rng.as_mut()) {
                continue;
            }
            if let Some(resolver) = self.resolver.as_mut() {
                results.push(resolver.resolve_encounter(vessel, world, is_catch_up));
            }
        }
        results
    }

    /// Replay `ticks` offline ticks. Boarding cannot happen here.
    pub fn catch_up(
        &mut self,
        vessels: &mut [Vessel],
        world: &mut WorldState,
        ticks: u32,
        delta_hours: f64,
    ) -> Vec<EncounterResult> {
        let mut results = Vec::new();
        for _ in 0..ticks {
            results.extend(self.tick(vessels, world, delta_hours, true));
        }
        results
    }
}
