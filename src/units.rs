//! Unit systems and conversion constants.
//!
//! Room geometry may be given in feet or meters. The Sabine constant is
//! metric and panel coverage is quoted in square feet, so both directions
//! are needed.

use serde::{Deserialize, Serialize};

pub const SQ_FEET_TO_SQ_METERS: f64 = 0.092903;
pub const SQ_METERS_TO_SQ_FEET: f64 = 10.7639;
pub const CU_FEET_TO_CU_METERS: f64 = 0.0283168;
pub const CU_METERS_TO_CU_FEET: f64 = 35.3147;

/// Speed of sound in air at room temperature (ft/s).
pub const SPEED_OF_SOUND_FT_S: f64 = 1130.0;

/// Speed of sound in air at room temperature (m/s).
pub const SPEED_OF_SOUND_M_S: f64 = 343.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    /// Feet, square feet, cubic feet.
    #[default]
    Imperial,
    /// Meters, square meters, cubic meters.
    Metric,
}

impl UnitSystem {
    /// Speed of sound expressed in this system's length unit per second.
    pub fn speed_of_sound(self) -> f64 {
        match self {
            UnitSystem::Imperial => SPEED_OF_SOUND_FT_S,
            UnitSystem::Metric => SPEED_OF_SOUND_M_S,
        }
    }

    pub fn length_unit(self) -> &'static str {
        match self {
            UnitSystem::Imperial => "ft",
            UnitSystem::Metric => "m",
        }
    }

    pub fn area_to_metric(self, area: f64) -> f64 {
        match self {
            UnitSystem::Imperial => area * SQ_FEET_TO_SQ_METERS,
            UnitSystem::Metric => area,
        }
    }

    pub fn area_to_imperial(self, area: f64) -> f64 {
        match self {
            UnitSystem::Imperial => area,
            UnitSystem::Metric => area * SQ_METERS_TO_SQ_FEET,
        }
    }

    pub fn volume_to_metric(self, volume: f64) -> f64 {
        match self {
            UnitSystem::Imperial => volume * CU_FEET_TO_CU_METERS,
            UnitSystem::Metric => volume,
        }
    }

    pub fn volume_to_imperial(self, volume: f64) -> f64 {
        match self {
            UnitSystem::Imperial => volume,
            UnitSystem::Metric => volume * CU_METERS_TO_CU_FEET,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speed_of_sound() {
        assert_eq!(UnitSystem::Imperial.speed_of_sound(), 1130.0);
        assert_eq!(UnitSystem::Metric.speed_of_sound(), 343.0);
    }

    #[test]
    fn test_conversions_are_identity_in_own_system() {
        assert_eq!(UnitSystem::Metric.area_to_metric(12.5), 12.5);
        assert_eq!(UnitSystem::Imperial.area_to_imperial(12.5), 12.5);
        assert_eq!(UnitSystem::Metric.volume_to_metric(30.0), 30.0);
        assert_eq!(UnitSystem::Imperial.volume_to_imperial(30.0), 30.0);
    }

    #[test]
    fn test_area_round_trip() {
        let sq_ft = 588.5;
        let sq_m = UnitSystem::Imperial.area_to_metric(sq_ft);
        assert!((sq_m - 54.6734).abs() < 1e-3);
        let back = UnitSystem::Metric.area_to_imperial(sq_m);
        assert!((back - sq_ft).abs() < 1e-2);
    }

    #[test]
    fn test_volume_to_metric() {
        let m3 = UnitSystem::Imperial.volume_to_metric(1068.46);
        assert!((m3 - 30.2554).abs() < 1e-3);
    }
}
