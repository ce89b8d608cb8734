//! Speech Transmission Index prediction.
//!
//! Empirical relationships between reverberation and intelligibility. STI
//! runs from 0 (unintelligible) to 1 (perfect).

use std::fmt;

use serde::{Deserialize, Serialize};

/// RT60 reduction (seconds) that earns the full predicted STI gain.
pub const REFERENCE_RT60_IMPROVEMENT: f64 = 0.3;

/// Fraction of the theoretical STI gain that is predicted.
pub const CONSERVATISM: f64 = 0.7;

/// Highest STI these models will predict.
pub const MAX_STI: f64 = 0.95;

/// Lowest STI [`estimate_from_rt60`] will return.
pub const MIN_ESTIMATED_STI: f64 = 0.3;

/// RT60 (seconds) at which speech is considered fully intelligible.
pub const DEFAULT_TARGET_RT60: f64 = 0.4;

/// Predicted STI after an average RT60 reduction of `rt60_improvement` seconds.
///
/// The gain towards `target_sti` scales with the improvement up to
/// [`REFERENCE_RT60_IMPROVEMENT`] and is capped at the target. A negative
/// improvement lowers the STI; no floor is applied.
pub fn predict_improvement(current_sti: f64, target_sti: f64, rt60_improvement: f64) -> f64 {
    let factor = (rt60_improvement / REFERENCE_RT60_IMPROVEMENT).min(1.0);
    let delta = factor * (target_sti - current_sti) * CONSERVATISM;
    target_sti.min(current_sti + delta)
}

/// Rough STI from average RT60: degrades inversely with `avg_rt60 / target_rt60`.
pub fn estimate_from_rt60(avg_rt60: f64, target_rt60: f64) -> f64 {
    if avg_rt60 <= target_rt60 {
        return MAX_STI;
    }
    let sti = MAX_STI / (avg_rt60 / target_rt60);
    sti.clamp(MIN_ESTIMATED_STI, MAX_STI)
}

/// Where in the room a measurement was taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PositionType {
    /// Corners gain the most from treatment.
    Corner,
    /// On-air talent positions.
    Talent,
    #[default]
    General,
}

impl PositionType {
    /// Multiplier applied to the room-wide STI gain.
    pub fn factor(self) -> f64 {
        match self {
            PositionType::Corner => 1.3,
            PositionType::Talent => 1.2,
            PositionType::General => 1.0,
        }
    }

    /// Parses `"corner"`, `"talent"` or `"general"` (any case).
    /// Anything else is treated as `General`.
    pub fn from_key(key: &str) -> Self {
        match key.trim().to_ascii_lowercase().as_str() {
            "corner" => PositionType::Corner,
            "talent" => PositionType::Talent,
            _ => PositionType::General,
        }
    }
}

/// STI at one position given the room-wide gain `base_improvement`.
///
/// Capped at [`MAX_STI`]; there is no lower bound, so a negative gain can
/// take the result below `current_sti`.
pub fn position_adjusted(current_sti: f64, base_improvement: f64, position: PositionType) -> f64 {
    MAX_STI.min(current_sti + base_improvement * position.factor())
}

/// Intelligibility rating bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StiRating {
    Bad,
    Poor,
    Fair,
    Good,
    Excellent,
}

impl StiRating {
    pub fn as_str(self) -> &'static str {
        match self {
            StiRating::Bad => "Bad",
            StiRating::Poor => "Poor",
            StiRating::Fair => "Fair",
            StiRating::Good => "Good",
            StiRating::Excellent => "Excellent",
        }
    }
}

impl fmt::Display for StiRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Each band includes its lower bound: 0.75 is Excellent, 0.3 is Poor.
pub fn classify(sti: f64) -> StiRating {
    if sti >= 0.75 {
        StiRating::Excellent
    } else if sti >= 0.6 {
        StiRating::Good
    } else if sti >= 0.45 {
        StiRating::Fair
    } else if sti >= 0.3 {
        StiRating::Poor
    } else {
        StiRating::Bad
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predict_full_improvement() {
        // 0.67 + (0.75 - 0.67) * 0.7
        let sti = predict_improvement(0.67, 0.75, 0.5);
        assert!((sti - 0.726).abs() < 1e-12);
    }

    #[test]
    fn test_predict_partial_improvement() {
        let sti = predict_improvement(0.6, 0.8, 0.15);
        assert!((sti - (0.6 + 0.5 * 0.2 * 0.7)).abs() < 1e-12);
    }

    #[test]
    fn test_predict_never_exceeds_target() {
        for current in [0.0, 0.3, 0.5, 0.74, 0.75] {
            for improvement in [0.3, 0.31, 1.0, 10.0] {
                assert!(predict_improvement(current, 0.75, improvement) <= 0.75);
            }
        }
    }

    #[test]
    fn test_predict_zero_improvement() {
        assert_eq!(predict_improvement(0.67, 0.75, 0.0), 0.67);
    }

    #[test]
    fn test_predict_negative_improvement_is_unclamped() {
        let sti = predict_improvement(0.67, 0.75, -0.3);
        assert!((sti - (0.67 - 0.08 * 0.7)).abs() < 1e-12);
        assert!(sti < 0.67);
        // Large degradation goes below zero
        assert!(predict_improvement(0.1, 0.75, -3.0) < 0.0);
    }

    #[test]
    fn test_estimate_from_rt60() {
        assert_eq!(estimate_from_rt60(0.3, DEFAULT_TARGET_RT60), 0.95);
        assert_eq!(estimate_from_rt60(0.4, DEFAULT_TARGET_RT60), 0.95);
        assert!((estimate_from_rt60(0.8, 0.4) - 0.475).abs() < 1e-12);
        // Very long reverberation bottoms out at 0.3
        assert_eq!(estimate_from_rt60(5.0, 0.4), 0.3);
    }

    #[test]
    fn test_position_factors() {
        assert_eq!(PositionType::Corner.factor(), 1.3);
        assert_eq!(PositionType::Talent.factor(), 1.2);
        assert_eq!(PositionType::General.factor(), 1.0);
        assert_eq!(PositionType::from_key("Corner"), PositionType::Corner);
        assert_eq!(PositionType::from_key("talent"), PositionType::Talent);
        assert_eq!(PositionType::from_key("ceiling"), PositionType::General);
    }

    #[test]
    fn test_position_adjusted() {
        let corner = position_adjusted(0.58, 0.1, PositionType::Corner);
        assert!((corner - 0.71).abs() < 1e-12);
        let unknown = position_adjusted(0.58, 0.1, PositionType::from_key("balcony"));
        assert!((unknown - 0.68).abs() < 1e-12);
        assert_eq!(position_adjusted(0.9, 0.2, PositionType::Talent), 0.95);
    }

    #[test]
    fn test_position_adjusted_negative_is_unclamped() {
        let sti = position_adjusted(0.2, -0.5, PositionType::Corner);
        assert!((sti - (0.2 - 0.65)).abs() < 1e-12);
        assert!(sti < 0.0);
    }

    #[test]
    fn test_classify_boundaries() {
        assert_eq!(classify(0.75), StiRating::Excellent);
        assert_eq!(classify(0.74999), StiRating::Good);
        assert_eq!(classify(0.6), StiRating::Good);
        assert_eq!(classify(0.45), StiRating::Fair);
        assert_eq!(classify(0.3), StiRating::Poor);
        assert_eq!(classify(0.29999), StiRating::Bad);
        assert_eq!(classify(-1.0), StiRating::Bad);
        assert_eq!(classify(0.75).to_string(), "Excellent");
    }

    #[test]
    fn test_ratings_are_ordered() {
        assert!(StiRating::Excellent > StiRating::Good);
        assert!(StiRating::Poor > StiRating::Bad);
    }
}
