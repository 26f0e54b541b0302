//! Vessel aggregate: crew, installed equipment, cargo, and flight plan.
//!
//! These are plain data types. The encounter applier is the only code that
//! mutates them during an encounter; the scheduler advances flight plans
//! between encounters.

use serde::{Deserialize, Serialize};

use crate::catalog::{EquipmentCatalog, EquipmentClass, EquipmentDef};
use crate::constants::{DEGRADATION_MAX, HEALTH_MAX};
use crate::skills::SkillProfile;

pub type VesselId = u32;
pub type CrewId = u32;

/// Rank aboard. Only the captain commands; officers deputise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CrewRole {
    Captain,
    /// Acting/deputy officer. Can speak for the ship but cannot open talks.
    Officer,
    Crew,
    /// The player's own character. Never dies.
    Avatar,
}

impl CrewRole {
    /// Roles whose negotiation skill counts once talks are possible.
    pub fn can_parley(self) -> bool {
        matches!(self, Self::Captain | Self::Officer)
    }
}

/// Station a crew member is assigned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Job {
    Helm,
    PointDefense,
    Armory,
    Engineering,
    Unassigned,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrewMember {
    pub id: CrewId,
    pub name: String,
    pub role: CrewRole,
    pub job: Job,
    /// 0–100.
    pub health: f64,
    pub is_alive: bool,
    pub skills: SkillProfile,
    /// Catalog ids of personally carried items.
    pub equipped: Vec<String>,
}

impl CrewMember {
    pub fn new(id: CrewId, name: &str, role: CrewRole, job: Job, skills: SkillProfile) -> Self {
        Self {
            id,
            name: name.to_string(),
            role,
            job,
            health: HEALTH_MAX,
            is_alive: true,
            skills,
            equipped: Vec::new(),
        }
    }

    pub fn with_equipped(mut self, item_id: &str) -> Self {
        self.equipped.push(item_id.to_string());
        self
    }

    pub fn with_health(mut self, health: f64) -> Self {
        self.health = health.clamp(0.0, HEALTH_MAX);
        self
    }

    /// Alive and able to take part in an encounter.
    pub fn is_active(&self) -> bool {
        self.is_alive && self.health > 0.0
    }

    /// Personal items of `class`, resolved through the catalog.
    pub fn equipped_of_class<'c>(
        &'c self,
        catalog: &'c dyn EquipmentCatalog,
        class: EquipmentClass,
    ) -> impl Iterator<Item = &'c EquipmentDef> + 'c {
        self.equipped
            .iter()
            .filter_map(move |id| catalog.lookup(id))
            .filter(move |def| def.class == class)
    }

    pub fn wears_armor(&self, catalog: &dyn EquipmentCatalog) -> bool {
        self.equipped_of_class(catalog, EquipmentClass::PersonalArmor)
            .next()
            .is_some()
    }
}

/// One installed item with its wear.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentInstance {
    pub item_id: String,
    /// 0–100; effectiveness falls as this rises.
    pub degradation: f64,
}

impl EquipmentInstance {
    pub fn new(item_id: &str) -> Self {
        Self {
            item_id: item_id.to_string(),
            degradation: 0.0,
        }
    }

    pub fn worn(item_id: &str, degradation: f64) -> Self {
        Self {
            item_id: item_id.to_string(),
            degradation: degradation.clamp(0.0, DEGRADATION_MAX),
        }
    }

    /// Combat effectiveness multiplier: 1.0 new, 0.5 fully worn.
    pub fn effectiveness(&self) -> f64 {
        1.0 - self.degradation.clamp(0.0, DEGRADATION_MAX) / 200.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CargoItem {
    pub item_id: String,
    pub quantity: u32,
}

impl CargoItem {
    pub fn new(item_id: &str, quantity: u32) -> Self {
        Self {
            item_id: item_id.to_string(),
            quantity,
        }
    }
}

/// An in-progress journey.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightPlan {
    pub destination: String,
    /// Planned flight time in hours, including delays.
    pub total_hours: f64,
    pub elapsed_hours: f64,
    /// Distance covered since departure.
    pub distance_km: f64,
    pub velocity_km_s: f64,
}

impl FlightPlan {
    pub fn new(destination: &str, total_hours: f64, velocity_km_s: f64) -> Self {
        Self {
            destination: destination.to_string(),
            total_hours: total_hours.max(0.0),
            elapsed_hours: 0.0,
            distance_km: 0.0,
            velocity_km_s: velocity_km_s.max(0.0),
        }
    }

    pub fn remaining_hours(&self) -> f64 {
        (self.total_hours - self.elapsed_hours).max(0.0)
    }

    pub fn is_complete(&self) -> bool {
        self.elapsed_hours >= self.total_hours
    }

    /// Move the plan forward by `hours` of flight.
    pub fn advance(&mut self, hours: f64) {
        let hours = hours.max(0.0).min(self.remaining_hours());
        self.elapsed_hours += hours;
        self.distance_km += self.velocity_km_s * hours * 3600.0;
    }

    /// Push arrival back by `hours`.
    pub fn extend(&mut self, hours: f64) {
        self.total_hours += hours.max(0.0);
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vessel {
    pub id: VesselId,
    pub name: String,
    pub hull_mass_kg: f64,
    pub flight_plan: Option<FlightPlan>,
    pub crew: Vec<CrewMember>,
    pub equipment: Vec<EquipmentInstance>,
    pub cargo: Vec<CargoItem>,
    /// Sim time (hours) of the last resolved encounter.
    pub last_encounter_at: Option<f64>,
}

impl Vessel {
    pub fn new(id: VesselId, name: &str, hull_mass_kg: f64) -> Self {
        Self {
            id,
            name: name.to_string(),
            hull_mass_kg: hull_mass_kg.max(0.0),
            flight_plan: None,
            crew: Vec::new(),
            equipment: Vec::new(),
            cargo: Vec::new(),
            last_encounter_at: None,
        }
    }

    /// The flight plan, if the vessel is still under way.
    pub fn active_flight_plan(&self) -> Option<&FlightPlan> {
        self.flight_plan.as_ref().filter(|plan| !plan.is_complete())
    }

    /// Current velocity, zero when not under way.
    pub fn velocity_km_s(&self) -> f64 {
        self.active_flight_plan()
            .map_or(0.0, |plan| plan.velocity_km_s)
    }

    pub fn remaining_flight_hours(&self) -> f64 {
        self.active_flight_plan()
            .map_or(0.0, FlightPlan::remaining_hours)
    }

    pub fn crew_member(&self, id: CrewId) -> Option<&CrewMember> {
        self.crew.iter().find(|c| c.id == id)
    }

    pub fn crew_member_mut(&mut self, id: CrewId) -> Option<&mut CrewMember> {
        self.crew.iter_mut().find(|c| c.id == id)
    }

    pub fn active_crew(&self) -> impl Iterator<Item = &CrewMember> {
        self.crew.iter().filter(|c| c.is_active())
    }

    /// Installed items of `class`, with their slot index.
    pub fn equipment_of_class<'c>(
        &'c self,
        catalog: &'c dyn EquipmentCatalog,
        class: EquipmentClass,
    ) -> impl Iterator<Item = (usize, &'c EquipmentInstance, &'c EquipmentDef)> + 'c {
        self.equipment
            .iter()
            .enumerate()
            .filter_map(move |(slot, inst)| catalog.lookup(&inst.item_id).map(|d| (slot, inst, d)))
            .filter(move |(_, _, def)| def.class == class)
    }

    pub fn has_equipment_class(
        &self,
        catalog: &dyn EquipmentCatalog,
        class: EquipmentClass,
    ) -> bool {
        self.equipment_of_class(catalog, class).next().is_some()
    }

    /// Cargo weight; unknown ids weigh nothing.
    pub fn cargo_weight_kg(&self, catalog: &dyn EquipmentCatalog) -> f64 {
        self.cargo
            .iter()
            .filter_map(|c| catalog.lookup(&c.item_id).map(|d| d.weight_kg * f64::from(c.quantity)))
            .sum()
    }

    /// Hull, installed equipment, and cargo.
    pub fn total_mass_kg(&self, catalog: &dyn EquipmentCatalog) -> f64 {
        let equipment: f64 = self
            .equipment
            .iter()
            .filter_map(|e| catalog.lookup(&e.item_id).map(|d| d.weight_kg))
            .sum();
        self.hull_mass_kg + equipment + self.cargo_weight_kg(catalog)
    }
}
