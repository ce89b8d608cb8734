//! Room geometry and measured room presets.
//!
//! Width runs along x, depth along y and height along z. For mode analysis
//! the x, y and z extents map to the "length", "width" and "height" axes.

use serde::{Deserialize, Serialize};

use crate::acoustics::sti::{DEFAULT_TARGET_RT60, PositionType};
use crate::bands::{FrequencyMap, from_octave_bands};
use crate::error::{AcousticsError, Result, ensure_positive};
use crate::units::UnitSystem;

/// Immutable room geometry. Volume and surface area are fixed at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGeometry")]
pub struct RoomGeometry {
    width: f64,
    depth: f64,
    height: f64,
    volume: f64,
    surface_area: f64,
    units: UnitSystem,
}

/// Unvalidated wire form; volume and area are optional and derived when absent.
#[derive(Deserialize)]
struct RawGeometry {
    width: f64,
    depth: f64,
    height: f64,
    volume: Option<f64>,
    surface_area: Option<f64>,
    #[serde(default)]
    units: UnitSystem,
}

impl TryFrom<RawGeometry> for RoomGeometry {
    type Error = AcousticsError;

    fn try_from(raw: RawGeometry) -> Result<Self> {
        let room = Self::rectangular(raw.width, raw.depth, raw.height, raw.units)?;
        match (raw.volume, raw.surface_area) {
            (None, None) => Ok(room),
            (volume, surface_area) => Self::with_measured(
                raw.width,
                raw.depth,
                raw.height,
                volume.unwrap_or(room.volume),
                surface_area.unwrap_or(room.surface_area),
                raw.units,
            ),
        }
    }
}

impl RoomGeometry {
    /// Rectangular room; volume and surface area are derived from the dimensions.
    pub fn rectangular(width: f64, depth: f64, height: f64, units: UnitSystem) -> Result<Self> {
        ensure_positive("width", width)?;
        ensure_positive("depth", depth)?;
        ensure_positive("height", height)?;
        Ok(Self {
            width,
            depth,
            height,
            volume: width * depth * height,
            surface_area: 2.0 * (width * depth + width * height + depth * height),
            units,
        })
    }

    /// Room with surveyed volume and surface area.
    ///
    /// Used for spaces that are not simple boxes (or where the treated
    /// surface area differs from the box estimate). The dimensions are still
    /// needed for mode analysis.
    pub fn with_measured(
        width: f64,
        depth: f64,
        height: f64,
        volume: f64,
        surface_area: f64,
        units: UnitSystem,
    ) -> Result<Self> {
        let mut room = Self::rectangular(width, depth, height, units)?;
        ensure_positive("volume", volume)?;
        ensure_positive("surface area", surface_area)?;
        room.volume = volume;
        room.surface_area = surface_area;
        Ok(room)
    }

    /// Extent along x, in the room's own units.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Extent along y.
    pub fn depth(&self) -> f64 {
        self.depth
    }

    /// Extent along z.
    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn units(&self) -> UnitSystem {
        self.units
    }

    /// Volume in the room's own units.
    pub fn volume(&self) -> f64 {
        self.volume
    }

    /// Total surface area in the room's own units.
    pub fn surface_area(&self) -> f64 {
        self.surface_area
    }

    /// Volume in cubic meters.
    pub fn volume_m3(&self) -> f64 {
        self.units.volume_to_metric(self.volume)
    }

    /// Volume in cubic feet.
    pub fn volume_ft3(&self) -> f64 {
        self.units.volume_to_imperial(self.volume)
    }

    /// Surface area in square meters.
    pub fn surface_area_m2(&self) -> f64 {
        self.units.area_to_metric(self.surface_area)
    }

    /// Surface area in square feet.
    pub fn surface_area_ft2(&self) -> f64 {
        self.units.area_to_imperial(self.surface_area)
    }

    /// Extents along (x, y, z).
    pub fn dimensions(&self) -> [f64; 3] {
        [self.width, self.depth, self.height]
    }
}

/// Measured acoustic baseline of an untreated room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Baseline {
    /// RT60 per band in seconds.
    pub rt60: FrequencyMap,
    /// Measured average STI.
    pub sti: f64,
    /// STI the treatment aims for.
    pub target_sti: f64,
    /// RT60 considered optimal for speech in this room (seconds).
    #[serde(default = "default_target_rt60")]
    pub target_rt60: f64,
}

fn default_target_rt60() -> f64 {
    DEFAULT_TARGET_RT60
}

/// STI measured at one listening position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementPosition {
    pub name: String,
    pub sti: f64,
    pub kind: PositionType,
}

impl MeasurementPosition {
    /// Creates a position from its label, measured STI and kind.
    pub fn new(name: &str, sti: f64, kind: PositionType) -> Self {
        Self {
            name: name.to_string(),
            sti,
            kind,
        }
    }
}

/// A named room with its geometry and measured baseline.
#[derive(Debug, Clone, PartialEq)]
pub struct RoomPreset {
    pub name: &'static str,
    pub geometry: RoomGeometry,
    pub baseline: Baseline,
    pub positions: Vec<MeasurementPosition>,
}

impl RoomPreset {
    /// Studio 8: 12.3' x 10.6' x 8.2' broadcast studio.
    pub fn studio_8() -> Self {
        Self {
            name: "Studio 8",
            geometry: RoomGeometry {
                width: 12.3,
                depth: 10.6,
                height: 8.2,
                volume: 1068.46,
                surface_area: 588.5,
                units: UnitSystem::Imperial,
            },
            baseline: Baseline {
                rt60: from_octave_bands([0.85, 0.92, 0.78, 0.71, 0.68, 0.55]),
                sti: 0.67,
                target_sti: 0.75,
                // ITU-R BS.1116 broadcast target
                target_rt60: 0.3,
            },
            positions: vec![
                MeasurementPosition::new("Host A (Reference)", 0.95, PositionType::General),
                MeasurementPosition::new("Host C (Talent)", 0.67, PositionType::Talent),
                MeasurementPosition::new("Mid Room", 0.71, PositionType::General),
                MeasurementPosition::new("NE Corner", 0.58, PositionType::Corner),
                MeasurementPosition::new("SE Corner", 0.62, PositionType::Corner),
                MeasurementPosition::new("Ceiling", 0.64, PositionType::General),
            ],
        }
    }

    /// The Hub: roughly hexagonal space, dimensions and areas are estimates.
    pub fn the_hub() -> Self {
        Self {
            name: "The Hub",
            geometry: RoomGeometry {
                width: 15.0,
                depth: 14.0,
                height: 9.0,
                volume: 1900.0,
                surface_area: 1400.0,
                units: UnitSystem::Imperial,
            },
            baseline: Baseline {
                rt60: from_octave_bands([0.72, 0.78, 0.65, 0.58, 0.52, 0.48]),
                sti: 0.71,
                target_sti: 0.75,
                target_rt60: 0.4,
            },
            positions: Vec::new(),
        }
    }

    /// Every built-in preset.
    pub fn all() -> Vec<Self> {
        vec![Self::studio_8(), Self::the_hub()]
    }

    /// Case-insensitive lookup by preset name.
    pub fn by_name(name: &str) -> Option<Self> {
        Self::all()
            .into_iter()
            .find(|p| p.name.eq_ignore_ascii_case(name.trim()))
    }
}
