//! Encounter tuning: every number the pipeline uses, with validation.
//!
//! Defaults are the shipped balance. Hosts can override any subset from
//! JSON; missing fields keep their defaults.
//!
//! ```
//! use starwake_logic::config::{validate_tuning, EncounterTuning};
//!
//! let tuning = EncounterTuning::from_json(r#"{"bounty_per_threat": 80}"#).unwrap();
//! assert_eq!(tuning.bounty_per_threat, 80);
//! assert!(validate_tuning(&tuning).is_empty());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncounterTuning {
    // Threat
    pub position_divisor_km: f64,
    pub cargo_divisor_kg: f64,
    /// Highest threat distance alone can produce.
    pub base_threat_cap: u8,

    // Evasion
    pub evasion_velocity_divisor: f64,
    pub evasion_velocity_cap: f64,
    pub stealth_bonus: f64,
    pub evasion_skill_weight: f64,
    pub evasion_skill_cap: f64,

    // Negotiation
    pub negotiation_divisor: f64,
    pub ransom_rate_min: f64,
    pub ransom_rate_max: f64,
    pub min_ransom: u64,

    // Defense
    pub staffing_base_bonus: f64,
    pub staffing_skill_weight: f64,
    pub armory_skill_weight: f64,
    pub mass_defense_per_kg: f64,

    // Attack & variance
    pub attack_multiplier: f64,
    pub defense_variance: f64,
    pub attack_variance: f64,

    // Flee
    pub flee_ratio_threshold: f64,
    pub flee_base_chance: f64,
    pub flee_velocity_divisor: f64,
    pub flee_velocity_cap: f64,
    pub flee_health_loss_min: u32,
    pub flee_health_loss_max: u32,
    pub flee_delay_fraction: f64,

    // Outcome
    pub victory_threshold: f64,
    pub harassment_threshold: f64,

    // Effects
    pub bounty_per_threat: u64,
    pub victory_degradation: f64,
    pub harassment_health_loss_min: u32,
    pub harassment_health_loss_max: u32,
    pub harassment_degradation: f64,
    pub harassment_delay_fraction: f64,
    pub boarding_health_loss_min: u32,
    pub boarding_health_loss_max: u32,
    /// Multiplier on boarding injuries for armored crew.
    pub boarding_armor_factor: f64,
    pub steal_rate_min: f64,
    pub steal_rate_max: f64,
    pub boarding_degradation: f64,

    // Scheduling
    pub encounter_cooldown_hours: f64,
    pub encounter_chance_per_tick: f64,
}

impl Default for EncounterTuning {
    fn default() -> Self {
        Self {
            position_divisor_km: 10_000_000.0,
            cargo_divisor_kg: 5_000.0,
            base_threat_cap: 8,

            evasion_velocity_divisor: 200.0,
            evasion_velocity_cap: 0.25,
            stealth_bonus: 0.15,
            evasion_skill_weight: 0.25,
            evasion_skill_cap: 0.25,

            negotiation_divisor: 200.0,
            ransom_rate_min: 0.05,
            ransom_rate_max: 0.15,
            min_ransom: 50,

            staffing_base_bonus: 0.2,
            staffing_skill_weight: 0.3,
            armory_skill_weight: 0.5,
            mass_defense_per_kg: 0.0005,

            attack_multiplier: 12.0,
            defense_variance: 0.15,
            attack_variance: 0.30,

            flee_ratio_threshold: 0.25,
            flee_base_chance: 0.3,
            flee_velocity_divisor: 400.0,
            flee_velocity_cap: 0.25,
            flee_health_loss_min: 1,
            flee_health_loss_max: 5,
            flee_delay_fraction: 0.05,

            victory_threshold: 1.5,
            harassment_threshold: 0.75,

            bounty_per_threat: 50,
            victory_degradation: 2.0,
            harassment_health_loss_min: 5,
            harassment_health_loss_max: 15,
            harassment_degradation: 5.0,
            harassment_delay_fraction: 0.1,
            boarding_health_loss_min: 10,
            boarding_health_loss_max: 30,
            boarding_armor_factor: 0.5,
            steal_rate_min: 0.10,
            steal_rate_max: 0.25,
            boarding_degradation: 10.0,

            encounter_cooldown_hours: 6.0,
            encounter_chance_per_tick: 0.05,
        }
    }
}

impl EncounterTuning {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Tuning validation error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TuningError {
    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: f64 },
    #[error("{name} band is inverted: min {min} > max {max}")]
    InvertedBand { name: &'static str, min: f64, max: f64 },
    #[error("{name} must be a fraction in [0, 1), got {value}")]
    FractionOutOfRange { name: &'static str, value: f64 },
    #[error("victory threshold {victory} must exceed harassment threshold {harassment}")]
    ThresholdOrder { victory: f64, harassment: f64 },
    #[error("base threat cap {0} must be between 1 and 10")]
    BaseThreatCap(u8),
}

/// Validate a tuning, returning all errors found.
pub fn validate_tuning(t: &EncounterTuning) -> Vec<TuningError> {
    let mut errors = Vec::new();

    let divisors = [
        ("position_divisor_km", t.position_divisor_km),
        ("cargo_divisor_kg", t.cargo_divisor_kg),
        ("evasion_velocity_divisor", t.evasion_velocity_divisor),
        ("negotiation_divisor", t.negotiation_divisor),
        ("flee_velocity_divisor", t.flee_velocity_divisor),
        ("attack_multiplier", t.attack_multiplier),
    ];
    for (name, value) in divisors {
        if !(value > 0.0) {
            errors.push(TuningError::NonPositive { name, value });
        }
    }

    let bands = [
        ("ransom_rate", t.ransom_rate_min, t.ransom_rate_max),
        ("steal_rate", t.steal_rate_min, t.steal_rate_max),
        (
            "flee_health_loss",
            f64::from(t.flee_health_loss_min),
            f64::from(t.flee_health_loss_max),
        ),
        (
            "harassment_health_loss",
            f64::from(t.harassment_health_loss_min),
            f64::from(t.harassment_health_loss_max),
        ),
        (
            "boarding_health_loss",
            f64::from(t.boarding_health_loss_min),
            f64::from(t.boarding_health_loss_max),
        ),
    ];
    for (name, min, max) in bands {
        if min > max {
            errors.push(TuningError::InvertedBand { name, min, max });
        }
    }

    let fractions = [
        ("defense_variance", t.defense_variance),
        ("attack_variance", t.attack_variance),
        ("ransom_rate_max", t.ransom_rate_max),
        ("steal_rate_max", t.steal_rate_max),
        ("flee_delay_fraction", t.flee_delay_fraction),
        ("harassment_delay_fraction", t.harassment_delay_fraction),
        ("encounter_chance_per_tick", t.encounter_chance_per_tick),
    ];
    for (name, value) in fractions {
        if !(0.0..1.0).contains(&value) {
            errors.push(TuningError::FractionOutOfRange { name, value });
        }
    }

    if t.victory_threshold <= t.harassment_threshold {
        errors.push(TuningError::ThresholdOrder {
            victory: t.victory_threshold,
            harassment: t.harassment_threshold,
        });
    }

    if !(1..=10).contains(&t.base_threat_cap) {
        errors.push(TuningError::BaseThreatCap(t.base_threat_cap));
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_tuning_is_valid() {
        assert!(validate_tuning(&EncounterTuning::default()).is_empty());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let t = EncounterTuning::from_json(r#"{"attack_multiplier": 20.0}"#).unwrap();
        assert_eq!(t.attack_multiplier, 20.0);
        assert_eq!(t.victory_threshold, 1.5);
    }

    #[test]
    fn inverted_band_reported() {
        let t = EncounterTuning {
            boarding_health_loss_min: 40,
            boarding_health_loss_max: 30,
            ..EncounterTuning::default()
        };
        let errors = validate_tuning(&t);
        assert_eq!(
            errors,
            vec![TuningError::InvertedBand {
                name: "boarding_health_loss",
                min: 40.0,
                max: 30.0
            }]
        );
    }

    #[test]
    fn zero_divisor_reported() {
        let t = EncounterTuning {
            position_divisor_km: 0.0,
            ..EncounterTuning::default()
        };
        assert!(validate_tuning(&t)
            .iter()
            .any(|e| matches!(e, TuningError::NonPositive { name: "position_divisor_km", .. })));
    }

    #[test]
    fn thresholds_out_of_order() {
        let t = EncounterTuning {
            victory_threshold: 0.5,
            ..EncounterTuning::default()
        };
        assert!(validate_tuning(&t)
            .iter()
            .any(|e| matches!(e, TuningError::ThresholdOrder { .. })));
    }

    #[test]
    fn variance_must_be_fraction() {
        let t = EncounterTuning {
            attack_variance: 1.2,
            ..EncounterTuning::default()
        };
        assert!(validate_tuning(&t)
            .iter()
            .any(|e| matches!(e, TuningError::FractionOutOfRange { name: "attack_variance", .. })));
    }

    #[test]
    fn error_messages_render() {
        let msg = TuningError::BaseThreatCap(12).to_string();
        assert!(msg.contains("12"));
    }
}
