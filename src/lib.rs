pub mod acoustics;
pub mod bands;
pub mod config;
pub mod error;
pub mod room;
pub mod units;

// Prelude
pub use acoustics::absorption::{PanelConfiguration, PanelSpec, PanelThickness};
pub use acoustics::modes::{ModeAnalyzer, ModeReport, RoomMode};
pub use acoustics::sti::{PositionType, StiRating};
pub use acoustics::treatment::{AcousticState, TreatmentEvaluator};
pub use bands::{FrequencyMap, NUM_OCTAVE_BANDS, OCTAVE_BAND_FREQUENCIES};
pub use config::{EngineConfig, ModeConfig};
pub use error::{AcousticsError, Result};
pub use room::{Baseline, RoomGeometry, RoomPreset};
pub use units::UnitSystem;
