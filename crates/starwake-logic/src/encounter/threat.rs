//! Threat assessment from route distance and cargo weight.

use crate::config::EncounterTuning;
use crate::constants::{THREAT_MAX, THREAT_MIN};

/// Threat level 1–10.
///
/// Distance gives a base of `floor(km / divisor)` held to `1..=base_threat_cap`;
/// every full `cargo_divisor_kg` of cargo adds one more, and the sum is held
/// to `1..=10`.
pub fn assess_threat(distance_km: f64, cargo_weight_kg: f64, tuning: &EncounterTuning) -> u8 {
    let base_cap = f64::from(tuning.base_threat_cap.clamp(THREAT_MIN, THREAT_MAX));
    let base = (distance_km.max(0.0) / tuning.position_divisor_km)
        .floor()
        .clamp(f64::from(THREAT_MIN), base_cap);
    let cargo_bonus = (cargo_weight_kg.max(0.0) / tuning.cargo_divisor_kg).floor();
    let threat = (base + cargo_bonus).clamp(f64::from(THREAT_MIN), f64::from(THREAT_MAX));
    // NaN from a zero divisor lands on the minimum.
    if threat.is_nan() {
        return THREAT_MIN;
    }
    threat as u8
}
