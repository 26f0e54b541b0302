//! Equipment catalog: static definitions for installable and personal items.
//!
//! The encounter pipeline only ever asks the catalog for a definition by id;
//! [`StaticCatalog`] is the default in-memory implementation and can be
//! loaded from the same JSON the harness bundles.
//!
//! ```
//! use starwake_logic::catalog::{EquipmentCatalog, EquipmentClass, StaticCatalog};
//!
//! let catalog = StaticCatalog::standard();
//! let turret = catalog.lookup("pd_turret").unwrap();
//! assert_eq!(turret.class, EquipmentClass::PointDefense);
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::items;

/// Functional class of an item, which decides how encounters use it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentClass {
    /// Ship-mounted guns; scale with staffing and wear.
    PointDefense,
    Shield,
    Deflector,
    /// Detection countermeasure; grants the evasion bonus.
    Stealth,
    PersonalWeapon,
    /// Worn by crew; halves boarding injuries.
    PersonalArmor,
    Cargo,
    Utility,
}

impl EquipmentClass {
    /// Shields and deflectors add a flat bonus to defense.
    pub fn is_passive_defense(self) -> bool {
        matches!(self, Self::Shield | Self::Deflector)
    }
}

/// Catalog entry for one item type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentDef {
    pub id: String,
    pub name: String,
    pub class: EquipmentClass,
    #[serde(default)]
    pub weight_kg: f64,
    #[serde(default)]
    pub attack_score: f64,
    #[serde(default)]
    pub defense_bonus: f64,
    #[serde(default)]
    pub value: u64,
    /// Ore per hour; unused by encounters but part of the catalog record.
    #[serde(default)]
    pub mining_rate: f64,
}

impl EquipmentDef {
    fn new(id: &str, name: &str, class: EquipmentClass, weight_kg: f64) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            class,
            weight_kg,
            attack_score: 0.0,
            defense_bonus: 0.0,
            value: 0,
            mining_rate: 0.0,
        }
    }

    fn attack(mut self, score: f64) -> Self {
        self.attack_score = score;
        self
    }

    fn defense(mut self, bonus: f64) -> Self {
        self.defense_bonus = bonus;
        self
    }

    fn value(mut self, value: u64) -> Self {
        self.value = value;
        self
    }

    fn mining(mut self, rate: f64) -> Self {
        self.mining_rate = rate;
        self
    }
}

/// Lookup of item definitions by id.
pub trait EquipmentCatalog {
    fn lookup(&self, id: &str) -> Option<&EquipmentDef>;
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog JSON is malformed: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("duplicate catalog id `{0}`")]
    DuplicateId(String),
}

/// In-memory catalog keyed by item id.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    items: HashMap<String, EquipmentDef>,
}

impl StaticCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a list of definitions, rejecting duplicate ids.
    pub fn from_defs(defs: Vec<EquipmentDef>) -> Result<Self, CatalogError> {
        let mut catalog = Self::new();
        for def in defs {
            if catalog.items.contains_key(&def.id) {
                return Err(CatalogError::DuplicateId(def.id));
            }
            catalog.items.insert(def.id.clone(), def);
        }
        Ok(catalog)
    }

    /// Parse a JSON array of definitions.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let defs: Vec<EquipmentDef> = serde_json::from_str(json)?;
        Self::from_defs(defs)
    }

    /// The built-in item set, matching `data/equipment_catalog.json`.
    pub fn standard() -> Self {
        use EquipmentClass::*;
        let defs = [
            EquipmentDef::new(items::PD_TURRET, "Point-Defense Turret", PointDefense, 1_200.0)
                .attack(40.0)
                .value(4_000),
            EquipmentDef::new(items::FLAK_BATTERY, "Flak Battery", PointDefense, 2_500.0)
                .attack(65.0)
                .value(7_500),
            EquipmentDef::new(items::SHIELD_EMITTER, "Shield Emitter", Shield, 900.0)
                .defense(20.0)
                .value(5_000),
            EquipmentDef::new(items::DEFLECTOR_ARRAY, "Deflector Array", Deflector, 1_500.0)
                .defense(12.0)
                .value(3_000),
            EquipmentDef::new(items::SENSOR_JAMMER, "Sensor Jammer", Stealth, 300.0).value(6_000),
            EquipmentDef::new(items::PULSE_PISTOL, "Pulse Pistol", PersonalWeapon, 2.0)
                .attack(6.0)
                .value(400),
            EquipmentDef::new(items::BOARDING_RIFLE, "Boarding Rifle", PersonalWeapon, 5.0)
                .attack(12.0)
                .value(900),
            EquipmentDef::new(items::BOARDING_ARMOR, "Boarding Armor", PersonalArmor, 18.0)
                .value(1_200),
            EquipmentDef::new(items::MINING_LASER, "Mining Laser", Utility, 800.0)
                .mining(4.0)
                .value(2_500),
            EquipmentDef::new(items::ORE_CRATE, "Ore Crate", Cargo, 1_000.0).value(150),
            EquipmentDef::new(items::MEDICAL_SUPPLIES, "Medical Supplies", Cargo, 50.0).value(300),
        ];
        let items = defs.into_iter().map(|d| (d.id.clone(), d)).collect();
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &EquipmentDef> {
        self.items.values()
    }
}

impl EquipmentCatalog for StaticCatalog {
    fn lookup(&self, id: &str) -> Option<&EquipmentDef> {
        self.items.get(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_catalog_has_every_constant() {
        let catalog = StaticCatalog::standard();
        for id in [
            items::PD_TURRET,
            items::FLAK_BATTERY,
            items::SHIELD_EMITTER,
            items::DEFLECTOR_ARRAY,
            items::SENSOR_JAMMER,
            items::PULSE_PISTOL,
            items::BOARDING_RIFLE,
            items::BOARDING_ARMOR,
            items::MINING_LASER,
            items::ORE_CRATE,
            items::MEDICAL_SUPPLIES,
        ] {
            assert!(catalog.lookup(id).is_some(), "missing {}", id);
        }
        assert_eq!(catalog.len(), 11);
    }

    #[test]
    fn passive_defense_classes() {
        assert!(EquipmentClass::Shield.is_passive_defense());
        assert!(EquipmentClass::Deflector.is_passive_defense());
        assert!(!EquipmentClass::PointDefense.is_passive_defense());
        assert!(!EquipmentClass::Stealth.is_passive_defense());
    }

    #[test]
    fn json_defaults_missing_numbers() {
        let json = r#"[{"id": "decoy", "name": "Decoy Drone", "class": "stealth"}]"#;
        let catalog = StaticCatalog::from_json(json).unwrap();
        let decoy = catalog.lookup("decoy").unwrap();
        assert_eq!(decoy.class, EquipmentClass::Stealth);
        assert_eq!(decoy.weight_kg, 0.0);
        assert_eq!(decoy.value, 0);
    }

    #[test]
    fn json_rejects_duplicates() {
        let json = r#"[
            {"id": "a", "name": "A", "class": "cargo"},
            {"id": "a", "name": "A again", "class": "cargo"}
        ]"#;
        let err = StaticCatalog::from_json(json).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateId(id) if id == "a"));
    }

    #[test]
    fn json_parse_error() {
        let err = StaticCatalog::from_json("{not json").unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
    }

    #[test]
    fn unknown_id_is_none() {
        assert!(StaticCatalog::standard().lookup("warp_core").is_none());
    }
}
