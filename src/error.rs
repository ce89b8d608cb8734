//! Errors raised by the acoustics engine.
//!
//! Every failure is a local validation failure detected before any result
//! is computed, so callers either get a complete value or one of these.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, AcousticsError>;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum AcousticsError {
    #[error("absorption coefficient must be within (0, 1), got {0}")]
    InvalidAbsorption(f64),

    #[error("RT60 must be greater than zero, got {0} s")]
    InvalidRT60(f64),

    #[error("unknown panel thickness: {0:?}")]
    UnknownThickness(String),

    #[error("surface area must be greater than zero, got {0}")]
    InvalidSurfaceArea(f64),

    #[error("invalid frequency band [{min}, {max}] Hz: max must exceed min")]
    InvalidBand { min: f64, max: f64 },

    #[error("frequency map has no bands")]
    EmptyFrequencyMap,

    #[error("{name} must be greater than zero, got {value}")]
    InvalidDimension { name: &'static str, value: f64 },

    #[error("{name} must be a non-negative number, got {value}")]
    InvalidTolerance { name: &'static str, value: f64 },
}

/// Fails with [`AcousticsError::InvalidDimension`] unless `value > 0` (NaN fails).
pub(crate) fn ensure_positive(name: &'static str, value: f64) -> Result<()> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(AcousticsError::InvalidDimension { name, value })
    }
}

/// Fails with [`AcousticsError::InvalidTolerance`] unless `value >= 0` (NaN fails).
pub(crate) fn ensure_non_negative(name: &'static str, value: f64) -> Result<()> {
    if value >= 0.0 {
        Ok(())
    } else {
        Err(AcousticsError::InvalidTolerance { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_positive() {
        assert!(ensure_positive("width", 1.0).is_ok());
        assert_eq!(
            ensure_positive("width", 0.0),
            Err(AcousticsError::InvalidDimension {
                name: "width",
                value: 0.0
            })
        );
        assert!(ensure_positive("width", f64::NAN).is_err());
    }

    #[test]
    fn test_ensure_non_negative() {
        assert!(ensure_non_negative("cluster tolerance", 0.0).is_ok());
        assert!(ensure_non_negative("cluster tolerance", 2.5).is_ok());
        assert_eq!(
            ensure_non_negative("cluster tolerance", -1.0),
            Err(AcousticsError::InvalidTolerance {
                name: "cluster tolerance",
                value: -1.0
            })
        );
        assert!(ensure_non_negative("cluster tolerance", f64::NAN).is_err());
        assert_eq!(
            AcousticsError::InvalidTolerance {
                name: "near tolerance",
                value: -2.0
            }
            .to_string(),
            "near tolerance must be a non-negative number, got -2"
        );
    }

    #[test]
    fn test_messages() {
        let err = AcousticsError::InvalidBand {
            min: 100.0,
            max: 50.0,
        };
        assert_eq!(
            err.to_string(),
            "invalid frequency band [100, 50] Hz: max must exceed min"
        );
        let err = AcousticsError::UnknownThickness("7_inch".to_string());
        assert_eq!(err.to_string(), "unknown panel thickness: \"7_inch\"");
    }
}
