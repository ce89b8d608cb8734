//! Room mode (standing wave) analysis for rectangular rooms.
//!
//! `f = (c / 2) * sqrt((nx / Lx)^2 + (ny / Ly)^2 + (nz / Lz)^2)`
//!
//! Axial modes involve one pair of parallel surfaces and are the strongest,
//! tangential modes involve two pairs, oblique modes all three.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ModeConfig;
use crate::error::{AcousticsError, Result, ensure_positive};
use crate::room::RoomGeometry;
use crate::units::SPEED_OF_SOUND_FT_S;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModeKind {
    Axial,
    Tangential,
    Oblique,
}

impl ModeKind {
    /// Kind implied by the number of non-zero orders (1, 2 or 3).
    fn from_active_axes(active: usize) -> Self {
        match active {
            1 => ModeKind::Axial,
            2 => ModeKind::Tangential,
            _ => ModeKind::Oblique,
        }
    }

    pub fn strength(self) -> ModeStrength {
        match self {
            ModeKind::Axial => ModeStrength::Strong,
            ModeKind::Tangential => ModeStrength::Medium,
            ModeKind::Oblique => ModeStrength::Weak,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ModeKind::Axial => "Axial",
            ModeKind::Tangential => "Tangential",
            ModeKind::Oblique => "Oblique",
        }
    }
}

impl fmt::Display for ModeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Axis an axial mode runs along; non-axial modes are `Mixed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModeAxis {
    Length,
    Width,
    Height,
    Mixed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModeStrength {
    Strong,
    Medium,
    Weak,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomMode {
    /// Resonant frequency in Hz.
    pub frequency: f64,
    pub kind: ModeKind,
    pub axis: ModeAxis,
    /// Mode orders (nx, ny, nz).
    pub order: [u32; 3],
    pub strength: ModeStrength,
    /// e.g. "Axial (1,0,0)"
    pub label: String,
}

impl RoomMode {
    fn new(order: [u32; 3], frequency: f64) -> Self {
        let active = order.iter().filter(|&&n| n > 0).count();
        let kind = ModeKind::from_active_axes(active);
        let axis = match (kind, order) {
            (ModeKind::Axial, [n, 0, 0]) if n > 0 => ModeAxis::Length,
            (ModeKind::Axial, [0, n, 0]) if n > 0 => ModeAxis::Width,
            (ModeKind::Axial, _) => ModeAxis::Height,
            _ => ModeAxis::Mixed,
        };
        let [nx, ny, nz] = order;
        Self {
            frequency,
            kind,
            axis,
            order,
            strength: kind.strength(),
            label: format!("{kind} ({nx},{ny},{nz})"),
        }
    }
}

/// Search limits for [`identify_modes`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModeSearch {
    pub max_frequency: f64,
    pub max_order: u32,
    /// Speed of sound in the same length unit as the room dimensions.
    pub speed_of_sound: f64,
}

impl ModeSearch {
    /// Defaults for dimensions in feet: 300 Hz, order 5, 1130 ft/s.
    pub fn new() -> Self {
        Self {
            max_frequency: 300.0,
            max_order: 5,
            speed_of_sound: SPEED_OF_SOUND_FT_S,
        }
    }
}

impl Default for ModeSearch {
    fn default() -> Self {
        Self::new()
    }
}

/// Enumerates all modes up to `search.max_order` per axis, excluding
/// (0,0,0), keeping those at or below `search.max_frequency`.
///
/// The result is sorted by frequency; equal frequencies keep enumeration
/// order (nx outermost, nz innermost).
pub fn identify_modes(
    length: f64,
    width: f64,
    height: f64,
    search: &ModeSearch,
) -> Result<Vec<RoomMode>> {
    ensure_positive("length", length)?;
    ensure_positive("width", width)?;
    ensure_positive("height", height)?;
    ensure_positive("speed of sound", search.speed_of_sound)?;

    let half_c = search.speed_of_sound / 2.0;
    let mut modes = Vec::new();

    for nx in 0..=search.max_order {
        for ny in 0..=search.max_order {
            for nz in 0..=search.max_order {
                if nx == 0 && ny == 0 && nz == 0 {
                    continue;
                }
                let frequency = half_c
                    * ((nx as f64 / length).powi(2)
                        + (ny as f64 / width).powi(2)
                        + (nz as f64 / height).powi(2))
                    .sqrt();
                if frequency > search.max_frequency {
                    continue;
                }
                modes.push(RoomMode::new([nx, ny, nz], frequency));
            }
        }
    }

    // Stable sort
    modes.sort_by(|a, b| a.frequency.total_cmp(&b.frequency));
    Ok(modes)
}

/// Modes within `tolerance` Hz of `target` (inclusive).
pub fn modes_near(modes: &[RoomMode], target: f64, tolerance: f64) -> Vec<&RoomMode> {
    modes
        .iter()
        .filter(|m| (m.frequency - target).abs() <= tolerance)
        .collect()
}

/// Modes per Hz within `[min_freq, max_freq]` (inclusive).
pub fn modal_density(modes: &[RoomMode], min_freq: f64, max_freq: f64) -> Result<f64> {
    if min_freq.is_nan() || max_freq.is_nan() || max_freq <= min_freq {
        return Err(AcousticsError::InvalidBand {
            min: min_freq,
            max: max_freq,
        });
    }
    let count = modes
        .iter()
        .filter(|m| m.frequency >= min_freq && m.frequency <= max_freq)
        .count();
    Ok(count as f64 / (max_freq - min_freq))
}

/// Groups of closely spaced modes.
///
/// Modes are sorted by frequency and a mode joins the running group when it
/// is within `tolerance` Hz of the group's last mode (not its first), so a
/// group can span more than `tolerance` overall. Groups smaller than
/// `min_size` are dropped.
pub fn find_clusters(modes: &[RoomMode], tolerance: f64, min_size: usize) -> Vec<Vec<&RoomMode>> {
    let mut sorted: Vec<&RoomMode> = modes.iter().collect();
    sorted.sort_by(|a, b| a.frequency.total_cmp(&b.frequency));

    let mut clusters = Vec::new();
    let mut current: Vec<&RoomMode> = Vec::new();

    for mode in sorted {
        if let Some(last) = current.last() {
            if mode.frequency - last.frequency > tolerance {
                let closed = std::mem::take(&mut current);
                if closed.len() >= min_size {
                    clusters.push(closed);
                }
            }
        }
        current.push(mode);
    }
    if !current.is_empty() && current.len() >= min_size {
        clusters.push(current);
    }

    clusters
}

/// Axial modes only.
pub fn axial_modes(modes: &[RoomMode]) -> Vec<&RoomMode> {
    modes.iter().filter(|m| m.kind == ModeKind::Axial).collect()
}

/// Summary of the modal behaviour of one room, for overlays.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModeReport {
    pub modes: Vec<RoomMode>,
    pub axial: Vec<RoomMode>,
    pub clusters: Vec<Vec<RoomMode>>,
    /// Modes per Hz between 0 and the search limit.
    pub modal_density: f64,
}

impl ModeReport {
    /// Modes within `tolerance` Hz of `target`.
    pub fn near(&self, target: f64, tolerance: f64) -> Vec<&RoomMode> {
        modes_near(&self.modes, target, tolerance)
    }
}

/// Runs the mode search on a room using [`ModeConfig`] parameters.
#[derive(Debug, Clone, Default)]
pub struct ModeAnalyzer {
    config: ModeConfig,
}

impl ModeAnalyzer {
    /// Creates an analyzer with the given search and grouping parameters.
    pub fn new(config: ModeConfig) -> Self {
        Self { config }
    }

    /// Parameters this analyzer runs with.
    pub fn config(&self) -> &ModeConfig {
        &self.config
    }

    /// Search limits for `room`, with the speed of sound matched to its units.
    pub fn search_for(&self, room: &RoomGeometry) -> ModeSearch {
        ModeSearch {
            max_frequency: self.config.max_frequency,
            max_order: self.config.max_order,
            speed_of_sound: self.config.speed_of_sound_for(room.units()),
        }
    }

    /// Modes in `report` within the configured near tolerance of `target` Hz.
    pub fn modes_near<'a>(&self, report: &'a ModeReport, target: f64) -> Vec<&'a RoomMode> {
        report.near(target, self.config.near_tolerance)
    }

    /// Identifies, groups and summarizes the modes of `room`.
    pub fn analyze(&self, room: &RoomGeometry) -> Result<ModeReport> {
        let search = self.search_for(room);
        let [length, width, height] = room.dimensions();
        let modes = identify_modes(length, width, height, &search)?;

        let axial = axial_modes(&modes).into_iter().cloned().collect();
        let clusters = find_clusters(
            &modes,
            self.config.cluster_tolerance,
            self.config.min_cluster_size,
        )
        .into_iter()
        .map(|c| c.into_iter().cloned().collect())
        .collect::<Vec<Vec<RoomMode>>>();
        let modal_density = modal_density(&modes, 0.0, search.max_frequency)?;

        debug!(
            modes = modes.len(),
            clusters = clusters.len(),
            modal_density,
            "room mode analysis"
        );

        Ok(ModeReport {
            modes,
            axial,
            clusters,
            modal_density,
        })
    }
}
