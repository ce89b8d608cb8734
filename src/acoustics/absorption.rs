//! Acoustic panel catalog and absorption totals.
//!
//! Panels are fabric-wrapped mineral wool, 2' x 4' each. Thick panels have
//! coefficients above 1.0 because of edge diffraction.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::bands::{FrequencyMap, NUM_OCTAVE_BANDS, OCTAVE_BAND_FREQUENCIES, from_octave_bands};
use crate::error::{AcousticsError, Result};

/// Coverage of one panel in square feet (2' x 4').
pub const PANEL_COVERAGE_SQ_FT: f64 = 8.0;

/// Default velvet drape coverage in square feet.
pub const DEFAULT_DRAPE_AREA: f64 = 40.0;

/// Velvet drape (30-40 lbs, hung from the lighting grid).
const DRAPE_ABSORPTION: [f64; NUM_OCTAVE_BANDS] = [0.15, 0.30, 0.55, 0.75, 0.80, 0.70];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PanelThickness {
    /// High frequencies (1 kHz and up), budget option.
    #[serde(rename = "2_inch")]
    TwoInch,
    /// Mid to high frequencies (500 Hz and up).
    #[serde(rename = "3_inch")]
    ThreeInch,
    /// Broadband, usable down to 125 Hz.
    #[serde(rename = "5_5_inch")]
    FiveAndHalfInch,
    /// Bass trap.
    #[serde(rename = "11_inch")]
    ElevenInch,
}

impl PanelThickness {
    pub const ALL: [PanelThickness; 4] = [
        PanelThickness::TwoInch,
        PanelThickness::ThreeInch,
        PanelThickness::FiveAndHalfInch,
        PanelThickness::ElevenInch,
    ];

    /// Stable identifier, e.g. `"5_5_inch"`.
    pub fn key(self) -> &'static str {
        match self {
            PanelThickness::TwoInch => "2_inch",
            PanelThickness::ThreeInch => "3_inch",
            PanelThickness::FiveAndHalfInch => "5_5_inch",
            PanelThickness::ElevenInch => "11_inch",
        }
    }

    /// Nominal thickness in inches.
    pub fn inches(self) -> f64 {
        match self {
            PanelThickness::TwoInch => 2.0,
            PanelThickness::ThreeInch => 3.0,
            PanelThickness::FiveAndHalfInch => 5.5,
            PanelThickness::ElevenInch => 11.0,
        }
    }

    /// Static catalog entry for this thickness.
    pub fn spec(self) -> PanelSpec {
        match self {
            PanelThickness::TwoInch => {
                PanelSpec::new(self, 0.80, 20.0, [0.15, 0.40, 0.75, 0.80, 0.85, 0.85])
            }
            PanelThickness::ThreeInch => {
                PanelSpec::new(self, 0.95, 25.0, [0.25, 0.60, 0.90, 0.95, 0.98, 0.98])
            }
            PanelThickness::FiveAndHalfInch => {
                PanelSpec::new(self, 1.15, 30.0, [0.45, 0.80, 1.05, 1.15, 1.18, 1.15])
            }
            PanelThickness::ElevenInch => {
                PanelSpec::new(self, 1.35, 45.0, [0.75, 1.10, 1.25, 1.35, 1.30, 1.20])
            }
        }
    }

    /// Absorption coefficients over the six standard bands.
    pub fn curve(self) -> FrequencyMap {
        self.spec().curve()
    }
}

impl fmt::Display for PanelThickness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for PanelThickness {
    type Err = AcousticsError;

    fn from_str(s: &str) -> Result<Self> {
        let key = s.trim();
        PanelThickness::ALL
            .into_iter()
            .find(|t| t.key() == key)
            .ok_or_else(|| AcousticsError::UnknownThickness(key.to_string()))
    }
}

/// Physical properties of one panel type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelSpec {
    pub thickness: PanelThickness,
    /// Coverage area in square feet.
    pub coverage_area: f64,
    /// Noise Reduction Coefficient.
    pub nrc: f64,
    /// Cost per panel in dollars.
    pub cost: f64,
    /// Absorption coefficients per octave band (may exceed 1.0).
    pub absorption: [f64; NUM_OCTAVE_BANDS],
}

impl PanelSpec {
    fn new(
        thickness: PanelThickness,
        nrc: f64,
        cost: f64,
        absorption: [f64; NUM_OCTAVE_BANDS],
    ) -> Self {
        Self {
            thickness,
            coverage_area: PANEL_COVERAGE_SQ_FT,
            nrc,
            cost,
            absorption,
        }
    }

    pub fn curve(&self) -> FrequencyMap {
        from_octave_bands(self.absorption)
    }
}

/// Absorption coefficients of the removable velvet drape.
pub fn drape_curve() -> FrequencyMap {
    from_octave_bands(DRAPE_ABSORPTION)
}

/// Number of panels proposed per thickness.
///
/// Thicknesses that are not listed count as zero. Counts never go negative.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PanelConfiguration {
    counts: BTreeMap<PanelThickness, u32>,
}

impl PanelConfiguration {
    /// Empty configuration (no panels).
    pub fn new() -> Self {
        Self::default()
    }

    /// The default treatment proposal: 3 x 2", 6 x 3", 12 x 5.5", 4 x 11".
    pub fn default_treatment() -> Self {
        Self::new()
            .with_count(PanelThickness::TwoInch, 3)
            .with_count(PanelThickness::ThreeInch, 6)
            .with_count(PanelThickness::FiveAndHalfInch, 12)
            .with_count(PanelThickness::ElevenInch, 4)
    }

    /// Sets the count for `thickness`, builder style.
    pub fn with_count(mut self, thickness: PanelThickness, count: u32) -> Self {
        self.counts.insert(thickness, count);
        self
    }

    /// Panels of `thickness`; zero when absent.
    pub fn count(&self, thickness: PanelThickness) -> u32 {
        self.counts.get(&thickness).copied().unwrap_or(0)
    }

    /// Sets the count for one thickness. Negative requests clamp to zero.
    pub fn update_count(&mut self, thickness: PanelThickness, count: i64) {
        let count = count.clamp(0, i64::from(u32::MAX)) as u32;
        self.counts.insert(thickness, count);
    }

    /// Restores the default treatment proposal.
    pub fn reset(&mut self) {
        *self = Self::default_treatment();
    }

    /// Thicknesses with a non-zero count, thinnest first.
    pub fn iter(&self) -> impl Iterator<Item = (PanelThickness, u32)> + '_ {
        self.counts
            .iter()
            .filter(|&(_, &count)| count > 0)
            .map(|(&t, &count)| (t, count))
    }

    /// Panels across every thickness.
    pub fn total_panels(&self) -> u64 {
        self.counts.values().map(|&c| u64::from(c)).sum()
    }

    /// True when no panels are installed.
    pub fn is_empty(&self) -> bool {
        self.total_panels() == 0
    }
}

impl FromIterator<(PanelThickness, u32)> for PanelConfiguration {
    fn from_iter<I: IntoIterator<Item = (PanelThickness, u32)>>(iter: I) -> Self {
        Self {
            counts: iter.into_iter().collect(),
        }
    }
}

fn ensure_surface_area(surface_area: f64) -> Result<()> {
    if surface_area > 0.0 {
        Ok(())
    } else {
        Err(AcousticsError::InvalidSurfaceArea(surface_area))
    }
}

/// Absorption coefficient added by the panels, per standard band.
///
/// Each panel contributes `coverage * alpha(band) / surface_area`.
/// `surface_area` is the room's total surface in square feet.
pub fn total_absorption(config: &PanelConfiguration, surface_area: f64) -> Result<FrequencyMap> {
    ensure_surface_area(surface_area)?;

    let mut totals = [0.0; NUM_OCTAVE_BANDS];
    for (thickness, count) in config.iter() {
        let spec = thickness.spec();
        for (total, alpha) in totals.iter_mut().zip(spec.absorption) {
            *total += f64::from(count) * spec.coverage_area * alpha / surface_area;
        }
    }
    Ok(from_octave_bands(totals))
}

/// Absorption coefficient contributed by a drape of `drape_area` square feet.
pub fn drape_absorption(surface_area: f64, drape_area: f64) -> Result<FrequencyMap> {
    ensure_surface_area(surface_area)?;

    Ok(OCTAVE_BAND_FREQUENCIES
        .into_iter()
        .zip(DRAPE_ABSORPTION)
        .map(|(band, alpha)| (band, alpha * drape_area / surface_area))
        .collect())
}

/// Total panel cost in dollars.
pub fn total_cost(config: &PanelConfiguration) -> f64 {
    config
        .iter()
        .map(|(thickness, count)| f64::from(count) * thickness.spec().cost)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    const STUDIO_AREA: f64 = 588.5;

    #[test]
    fn test_catalog_values() {
        let spec = PanelThickness::FiveAndHalfInch.spec();
        assert_eq!(spec.coverage_area, 8.0);
        assert_eq!(spec.cost, 30.0);
        assert_eq!(spec.nrc, 1.15);
        assert_eq!(spec.curve()[&1000], 1.15);

        let costs: Vec<f64> = PanelThickness::ALL.iter().map(|t| t.spec().cost).collect();
        assert_eq!(costs, vec![20.0, 25.0, 30.0, 45.0]);
        assert_eq!(PanelThickness::FiveAndHalfInch.inches(), 5.5);
    }

    #[test]
    fn test_curves_cover_standard_bands() {
        for thickness in PanelThickness::ALL {
            let curve = thickness.curve();
            let keys: Vec<u32> = curve.keys().copied().collect();
            assert_eq!(keys, OCTAVE_BAND_FREQUENCIES.to_vec(), "{thickness}");
        }
        // Thick panels exceed 1.0
        assert!(PanelThickness::ElevenInch.curve()[&1000] > 1.0);
    }

    #[test]
    fn test_parse_thickness() {
        assert_eq!("2_inch".parse::<PanelThickness>(), Ok(PanelThickness::TwoInch));
        assert_eq!(
            " 5_5_inch ".parse::<PanelThickness>(),
            Ok(PanelThickness::FiveAndHalfInch)
        );
        assert_eq!(
            "7_inch".parse::<PanelThickness>(),
            Err(AcousticsError::UnknownThickness("7_inch".to_string()))
        );
        for t in PanelThickness::ALL {
            assert_eq!(t.to_string().parse::<PanelThickness>(), Ok(t));
        }
    }

    #[test]
    fn test_total_absorption_sums_panels() {
        let config = PanelConfiguration::new().with_count(PanelThickness::ThreeInch, 5);
        let added = total_absorption(&config, STUDIO_AREA).unwrap();
        assert_eq!(added.len(), NUM_OCTAVE_BANDS);
        let expected = 5.0 * 8.0 * 0.9 / STUDIO_AREA;
        assert!((added[&500] - expected).abs() < 1e-12);
    }

    #[test]
    fn test_total_absorption_grows_with_count() {
        let few = PanelConfiguration::new().with_count(PanelThickness::ThreeInch, 5);
        let many = PanelConfiguration::new().with_count(PanelThickness::ThreeInch, 20);
        let few = total_absorption(&few, STUDIO_AREA).unwrap();
        let many = total_absorption(&many, STUDIO_AREA).unwrap();
        assert!(few[&500] < many[&500]);
    }

    #[test]
    fn test_total_absorption_empty_config() {
        let added = total_absorption(&PanelConfiguration::new(), STUDIO_AREA).unwrap();
        assert_eq!(added.len(), NUM_OCTAVE_BANDS);
        assert!(added.values().all(|&v| v == 0.0));

        let zeros = PanelConfiguration::new().with_count(PanelThickness::ElevenInch, 0);
        let added = total_absorption(&zeros, STUDIO_AREA).unwrap();
        assert!(added.values().all(|&v| v == 0.0));
    }

    #[test]
    fn test_invalid_surface_area() {
        let config = PanelConfiguration::default_treatment();
        assert_eq!(
            total_absorption(&config, 0.0),
            Err(AcousticsError::InvalidSurfaceArea(0.0))
        );
        assert!(total_absorption(&config, -10.0).is_err());
        assert!(drape_absorption(0.0, DEFAULT_DRAPE_AREA).is_err());
    }

    #[test]
    fn test_drape_absorption() {
        let drape = drape_absorption(STUDIO_AREA, DEFAULT_DRAPE_AREA).unwrap();
        assert_eq!(drape.len(), NUM_OCTAVE_BANDS);
        assert!((drape[&125] - 0.15 * 40.0 / STUDIO_AREA).abs() < 1e-12);
        assert!((drape[&2000] - 0.8 * 40.0 / STUDIO_AREA).abs() < 1e-12);
        assert_eq!(drape_curve()[&1000], 0.75);
    }

    #[test]
    fn test_cost_and_count() {
        let config = PanelConfiguration::default_treatment();
        assert_eq!(total_cost(&config), 750.0);
        assert_eq!(config.total_panels(), 25);
        assert_eq!(total_cost(&PanelConfiguration::new()), 0.0);
    }

    #[test]
    fn test_update_count_clamps() {
        let mut config = PanelConfiguration::default_treatment();
        config.update_count(PanelThickness::TwoInch, -4);
        assert_eq!(config.count(PanelThickness::TwoInch), 0);
        assert_eq!(config.total_panels(), 22);
        config.update_count(PanelThickness::TwoInch, 7);
        assert_eq!(config.count(PanelThickness::TwoInch), 7);

        config.reset();
        assert_eq!(config, PanelConfiguration::default_treatment());
    }

    #[test]
    fn test_iter_skips_zero_counts() {
        let config: PanelConfiguration = [
            (PanelThickness::ElevenInch, 2),
            (PanelThickness::TwoInch, 0),
            (PanelThickness::ThreeInch, 1),
        ]
        .into_iter()
        .collect();
        let listed: Vec<_> = config.iter().collect();
        assert_eq!(
            listed,
            vec![(PanelThickness::ThreeInch, 1), (PanelThickness::ElevenInch, 2)]
        );
        assert_eq!(config.count(PanelThickness::FiveAndHalfInch), 0);
    }

    #[test]
    fn test_configuration_serde_keys() {
        let config = PanelConfiguration::new()
            .with_count(PanelThickness::FiveAndHalfInch, 12)
            .with_count(PanelThickness::TwoInch, 3);
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(json, r#"{"2_inch":3,"5_5_inch":12}"#);
        let back: PanelConfiguration = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
        assert!(serde_json::from_str::<PanelConfiguration>(r#"{"7_inch":1}"#).is_err());
    }
}
