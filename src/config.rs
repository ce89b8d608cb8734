//! Engine tunables.
//!
//! Every field has a default, so a TOML file only needs the values it
//! changes:
//!
//! ```toml
//! drape_area = 55.0
//! target_rt60 = 0.35
//!
//! [modes]
//! max_frequency = 200.0
//! cluster_tolerance = 6.0
//! ```

use serde::{Deserialize, Serialize};

use crate::acoustics::absorption::DEFAULT_DRAPE_AREA;
use crate::error::{Result, ensure_non_negative, ensure_positive};
use crate::units::UnitSystem;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Drape coverage removed when drape removal is on (sq ft).
    pub drape_area: f64,
    /// Target RT60 (s) for the RT60-only STI estimate. Overrides the
    /// room baseline's own target when set.
    pub target_rt60: Option<f64>,
    pub modes: ModeConfig,
}

/// Room mode search and grouping parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModeConfig {
    /// Modes above this frequency (Hz) are discarded.
    pub max_frequency: f64,
    /// Highest order searched along each axis.
    pub max_order: u32,
    /// Speed of sound in the geometry's length unit per second.
    /// When unset, it follows the room's unit system.
    pub speed_of_sound: Option<f64>,
    /// Window (Hz) used when looking up modes near a frequency.
    pub near_tolerance: f64,
    /// Maximum gap (Hz) between neighbouring modes in a cluster.
    pub cluster_tolerance: f64,
    /// Smallest group reported as a cluster.
    pub min_cluster_size: usize,
}

impl EngineConfig {
    /// Built-in defaults: 40 sq ft of drape, baseline target RT60.
    pub fn new() -> Self {
        Self {
            drape_area: DEFAULT_DRAPE_AREA,
            target_rt60: None,
            modes: ModeConfig::new(),
        }
    }

    /// Parses a TOML document; missing fields keep their defaults.
    pub fn from_toml_str(s: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    pub fn validate(&self) -> Result<()> {
        ensure_positive("drape area", self.drape_area)?;
        if let Some(t) = self.target_rt60 {
            ensure_positive("target RT60", t)?;
        }
        self.modes.validate()
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ModeConfig {
    /// Searches to 300 Hz and order 5, clustering within 10 Hz.
    pub fn new() -> Self {
        Self {
            max_frequency: 300.0,
            max_order: 5,
            speed_of_sound: None,
            near_tolerance: 5.0,
            cluster_tolerance: 10.0,
            min_cluster_size: 2,
        }
    }

    /// Speed of sound to use for a room measured in `units`.
    pub fn speed_of_sound_for(&self, units: UnitSystem) -> f64 {
        self.speed_of_sound.unwrap_or_else(|| units.speed_of_sound())
    }

    pub fn validate(&self) -> Result<()> {
        ensure_positive("max mode frequency", self.max_frequency)?;
        if let Some(c) = self.speed_of_sound {
            ensure_positive("speed of sound", c)?;
        }
        ensure_non_negative("near tolerance", self.near_tolerance)?;
        ensure_non_negative("cluster tolerance", self.cluster_tolerance)
    }
}

impl Default for ModeConfig {
    fn default() -> Self {
        Self::new()
    }
}
