//! Game constants: state bounds and built-in catalog item ids.
//!
//! Tunable encounter numbers live in [`crate::config::EncounterTuning`];
//! the values here are fixed domain bounds that never change per game.

/// Health scale for crew members.
pub const HEALTH_MAX: f64 = 100.0;
/// Health floor for the player avatar, who never dies.
pub const AVATAR_HEALTH_FLOOR: f64 = 1.0;

/// Equipment wear scale.
pub const DEGRADATION_MAX: f64 = 100.0;

/// Skill scale shared by every skill category.
pub const SKILL_MAX: f64 = 100.0;

/// Threat level bounds.
pub const THREAT_MIN: u8 = 1;
pub const THREAT_MAX: u8 = 10;

/// Item ids shipped in the built-in catalog and `data/equipment_catalog.json`.
pub mod items {
    // Point defense
    pub const PD_TURRET: &str = "pd_turret";
    pub const FLAK_BATTERY: &str = "flak_battery";
    // Passive defense
    pub const SHIELD_EMITTER: &str = "shield_emitter";
    pub const DEFLECTOR_ARRAY: &str = "deflector_array";
    // Detection countermeasures
    pub const SENSOR_JAMMER: &str = "sensor_jammer";
    // Personal kit
    pub const PULSE_PISTOL: &str = "pulse_pistol";
    pub const BOARDING_RIFLE: &str = "boarding_rifle";
    pub const BOARDING_ARMOR: &str = "boarding_armor";
    // Utility & cargo
    pub const MINING_LASER: &str = "mining_laser";
    pub const ORE_CRATE: &str = "ore_crate";
    pub const MEDICAL_SUPPLIES: &str = "medical_supplies";
}
