//! Reverberation time from the Sabine and Eyring equations.
//!
//! All formulas use the metric constant 0.161, so volume must be in m^3 and
//! surface area in m^2.

use crate::bands::{FrequencyMap, value_or_zero};
use crate::error::{AcousticsError, Result, ensure_positive};

/// Sabine constant for metric units (s/m).
pub const SABINE_CONSTANT: f64 = 0.161;

/// Lower bound applied to the treated absorption coefficient.
pub const MIN_ALPHA: f64 = 0.01;

/// Upper bound applied to the treated absorption coefficient.
pub const MAX_ALPHA: f64 = 0.99;

fn check_alpha(alpha: f64) -> Result<()> {
    if alpha > 0.0 && alpha < 1.0 {
        Ok(())
    } else {
        Err(AcousticsError::InvalidAbsorption(alpha))
    }
}

fn check_room(volume: f64, surface_area: f64) -> Result<()> {
    ensure_positive("volume", volume)?;
    if surface_area > 0.0 {
        Ok(())
    } else {
        Err(AcousticsError::InvalidSurfaceArea(surface_area))
    }
}

/// Sabine RT60: `0.161 * V / (S * alpha)`.
///
/// Suited to rooms with low average absorption.
pub fn sabine(volume: f64, surface_area: f64, alpha: f64) -> Result<f64> {
    check_alpha(alpha)?;
    check_room(volume, surface_area)?;
    Ok(SABINE_CONSTANT * volume / (surface_area * alpha))
}

/// Eyring RT60: `0.161 * V / (-S * ln(1 - alpha))`.
///
/// Always shorter than Sabine for the same alpha; the gap grows with alpha.
pub fn eyring(volume: f64, surface_area: f64, alpha: f64) -> Result<f64> {
    check_alpha(alpha)?;
    check_room(volume, surface_area)?;
    Ok(SABINE_CONSTANT * volume / (-surface_area * (1.0 - alpha).ln()))
}

/// Average absorption coefficient implied by a measured RT60 (inverse Sabine).
pub fn absorption_from_rt60(rt60: f64, volume: f64, surface_area: f64) -> Result<f64> {
    if rt60.is_nan() || rt60 <= 0.0 {
        return Err(AcousticsError::InvalidRT60(rt60));
    }
    check_room(volume, surface_area)?;
    Ok(SABINE_CONSTANT * volume / (rt60 * surface_area))
}

/// Predicted RT60 per band after treatment.
///
/// For every band in `baseline`, the measured RT60 is converted to an
/// absorption coefficient, `added` is added and `removed` subtracted (a band
/// missing from either counts as 0), and the result is clamped to
/// [`MIN_ALPHA`, `MAX_ALPHA`] before going back through Sabine. Bands missing
/// from `baseline` are not computed.
pub fn with_treatment(
    baseline: &FrequencyMap,
    volume: f64,
    surface_area: f64,
    added: &FrequencyMap,
    removed: &FrequencyMap,
) -> Result<FrequencyMap> {
    baseline
        .iter()
        .map(|(&band, &rt60)| {
            let current = absorption_from_rt60(rt60, volume, surface_area)?;
            let alpha = current + value_or_zero(added, band) - value_or_zero(removed, band);
            let alpha = alpha.clamp(MIN_ALPHA, MAX_ALPHA);
            Ok((band, sabine(volume, surface_area, alpha)?))
        })
        .collect()
}

/// Arithmetic mean of all band values.
///
/// Fails with [`AcousticsError::EmptyFrequencyMap`] when there are no bands.
pub fn average(rt60: &FrequencyMap) -> Result<f64> {
    if rt60.is_empty() {
        return Err(AcousticsError::EmptyFrequencyMap);
    }
    Ok(rt60.values().sum::<f64>() / rt60.len() as f64)
}
