use serde::Serialize;
use tracing::{debug, trace};

use super::absorption::{PanelConfiguration, drape_absorption, total_absorption, total_cost};
use super::rt60::{average, with_treatment};
use super::sti::{
    StiRating, classify, estimate_from_rt60, position_adjusted, predict_improvement,
};
use crate::bands::FrequencyMap;
use crate::config::EngineConfig;
use crate::error::Result;
use crate::room::{Baseline, MeasurementPosition, RoomGeometry, RoomPreset};

/// Predicted acoustics of a room with a proposed treatment.
///
/// A pure function of (baseline, geometry, panel configuration, drape flag);
/// recomputed in full on every change.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AcousticState {
    pub baseline_rt60: FrequencyMap,
    pub predicted_rt60: FrequencyMap,
    pub baseline_sti: f64,
    pub predicted_sti: f64,
    /// Average baseline RT60 minus average predicted RT60 (seconds).
    pub rt60_improvement: f64,
    /// STI estimated from the predicted average RT60 alone.
    pub estimated_sti: f64,
    pub total_cost: f64,
    pub total_panels: u64,
}

impl AcousticState {
    /// Rating of the predicted STI.
    pub fn rating(&self) -> StiRating {
        classify(self.predicted_sti)
    }

    pub fn sti_gain(&self) -> f64 {
        self.predicted_sti - self.baseline_sti
    }
}

/// Predicted STI at one measured position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionPrediction {
    pub name: String,
    pub current_sti: f64,
    pub predicted_sti: f64,
    pub rating: StiRating,
}

/// Combines panel absorption, RT60 and STI models into one prediction.
#[derive(Debug, Clone, Default)]
pub struct TreatmentEvaluator {
    config: EngineConfig,
}

impl TreatmentEvaluator {
    /// Creates an evaluator with the given engine settings.
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Settings this evaluator runs with.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Predicts RT60 and STI for `panels`, optionally with the drape removed.
    ///
    /// Absorption fractions use the surface area in square feet (panel
    /// coverage unit); RT60 uses metric volume and area. The RT60-only STI
    /// estimate targets [`EngineConfig::target_rt60`] when set, otherwise the
    /// baseline's own target.
    pub fn evaluate(
        &self,
        room: &RoomGeometry,
        baseline: &Baseline,
        panels: &PanelConfiguration,
        drape_removal: bool,
    ) -> Result<AcousticState> {
        let area_ft2 = room.surface_area_ft2();
        let added = total_absorption(panels, area_ft2)?;
        let removed = if drape_removal {
            drape_absorption(area_ft2, self.config.drape_area)?
        } else {
            FrequencyMap::new()
        };
        trace!(?added, ?removed, "absorption change per band");

        let predicted_rt60 = with_treatment(
            &baseline.rt60,
            room.volume_m3(),
            room.surface_area_m2(),
            &added,
            &removed,
        )?;

        let baseline_avg = average(&baseline.rt60)?;
        let predicted_avg = average(&predicted_rt60)?;
        let rt60_improvement = baseline_avg - predicted_avg;
        let predicted_sti =
            predict_improvement(baseline.sti, baseline.target_sti, rt60_improvement);
        let target_rt60 = self.config.target_rt60.unwrap_or(baseline.target_rt60);

        let state = AcousticState {
            baseline_rt60: baseline.rt60.clone(),
            predicted_rt60,
            baseline_sti: baseline.sti,
            predicted_sti,
            rt60_improvement,
            estimated_sti: estimate_from_rt60(predicted_avg, target_rt60),
            total_cost: total_cost(panels),
            total_panels: panels.total_panels(),
        };

        debug!(
            panels = state.total_panels,
            drape_removal,
            baseline_avg,
            predicted_avg,
            predicted_sti,
            "evaluated treatment"
        );
        Ok(state)
    }

    /// [`Self::evaluate`] on a preset's geometry and baseline.
    pub fn evaluate_preset(
        &self,
        preset: &RoomPreset,
        panels: &PanelConfiguration,
        drape_removal: bool,
    ) -> Result<AcousticState> {
        self.evaluate(&preset.geometry, &preset.baseline, panels, drape_removal)
    }

    /// Spreads the room-wide STI gain of `state` over measured positions.
    pub fn position_predictions(
        &self,
        state: &AcousticState,
        positions: &[MeasurementPosition],
    ) -> Vec<PositionPrediction> {
        let gain = state.sti_gain();
        positions
            .iter()
            .map(|p| {
                let predicted_sti = position_adjusted(p.sti, gain, p.kind);
                PositionPrediction {
                    name: p.name.clone(),
                    current_sti: p.sti,
                    predicted_sti,
                    rating: classify(predicted_sti),
                }
            })
            .collect()
    }
}
