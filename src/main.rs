use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use studio_acoustics::acoustics::treatment::PositionPrediction;
use studio_acoustics::{
    AcousticState, EngineConfig, ModeAnalyzer, ModeReport, PanelConfiguration, PanelThickness,
    RoomPreset, TreatmentEvaluator,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Room {
    Studio8,
    Hub,
}

/// Predicts RT60 and STI for a proposed acoustic panel treatment.
#[derive(Debug, Parser)]
#[command(name = "studio-acoustics", version)]
struct Args {
    /// Room preset to evaluate.
    #[arg(long, value_enum, default_value = "studio8")]
    room: Room,

    /// TOML file with engine settings.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override a panel count, e.g. `--panel 11_inch=6`. Repeatable.
    #[arg(long = "panel", value_parser = parse_panel)]
    panels: Vec<(PanelThickness, i64)>,

    /// Keep the velvet drape instead of removing it.
    #[arg(long)]
    keep_drape: bool,

    /// Print the predicted state as JSON.
    #[arg(long)]
    json: bool,

    /// List room modes within the configured tolerance of this frequency (Hz).
    #[arg(long)]
    near: Option<f64>,
}

fn parse_panel(s: &str) -> std::result::Result<(PanelThickness, i64), String> {
    let (key, count) = s
        .split_once('=')
        .ok_or_else(|| format!("expected THICKNESS=COUNT, got {s:?}"))?;
    let thickness = key.parse::<PanelThickness>().map_err(|e| e.to_string())?;
    let count = count
        .trim()
        .parse::<i64>()
        .map_err(|e| format!("invalid count {count:?}: {e}"))?;
    Ok((thickness, count))
}

fn init_logging() {
    let filter =
        EnvFilter::try_from_env("STUDIO_ACOUSTICS_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&PathBuf>) -> Result<EngineConfig> {
    let config = match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            EngineConfig::from_toml_str(&text)
                .with_context(|| format!("parsing {}", path.display()))?
        }
        None => EngineConfig::new(),
    };
    config.validate()?;
    Ok(config)
}

fn print_state(preset: &RoomPreset, state: &AcousticState) {
    let g = &preset.geometry;
    let unit = g.units().length_unit();
    println!(
        "{} ({} x {} x {} {unit})",
        preset.name,
        g.width(),
        g.depth(),
        g.height()
    );
    println!("{:-<44}", "");
    println!("{:>8} {:>16} {:>16}", "Freq", "Baseline RT60", "Predicted RT60");
    println!("{:-<44}", "");
    for (band, baseline) in &state.baseline_rt60 {
        let predicted = state
            .predicted_rt60
            .get(band)
            .map(|v| format!("{v:.3}"))
            .unwrap_or_else(|| "---".to_string());
        println!("{band:>5} Hz {baseline:>16.3} {predicted:>16}");
    }
    println!("{:-<44}", "");
    println!("RT60 improvement: {:.3} s", state.rt60_improvement);
    println!(
        "STI: {:.3} -> {:.3} ({})",
        state.baseline_sti,
        state.predicted_sti,
        state.rating()
    );
    println!("Panels: {}  Cost: ${:.2}", state.total_panels, state.total_cost);
}

fn print_panels(panels: &PanelConfiguration) {
    for (thickness, count) in panels.iter() {
        println!("  {count:>3} x {}\" ({})", thickness.inches(), thickness.key());
    }
}

fn print_positions(predictions: &[PositionPrediction]) {
    if predictions.is_empty() {
        return;
    }
    println!();
    println!("Positions:");
    for p in predictions {
        println!(
            "  {:<20} {:.2} -> {:.2} ({})",
            p.name, p.current_sti, p.predicted_sti, p.rating
        );
    }
}

fn print_near(analyzer: &ModeAnalyzer, report: &ModeReport, target: f64) {
    let tolerance = analyzer.config().near_tolerance;
    let near = analyzer.modes_near(report, target);
    println!("  within {tolerance} Hz of {target} Hz: {}", near.len());
    for m in near {
        println!("    {} @ {:.1} Hz ({})", m.label, m.frequency, m.kind);
    }
}

fn print_modes(report: &ModeReport) {
    println!();
    println!(
        "Room modes: {} ({} axial), {:.3} modes/Hz",
        report.modes.len(),
        report.axial.len(),
        report.modal_density
    );
    for cluster in &report.clusters {
        let labels: Vec<String> = cluster
            .iter()
            .map(|m| format!("{} @ {:.1} Hz", m.label, m.frequency))
            .collect();
        println!("  cluster: {}", labels.join(", "));
    }
}

fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();

    let config = load_config(args.config.as_ref())?;
    let preset = match args.room {
        Room::Studio8 => RoomPreset::studio_8(),
        Room::Hub => RoomPreset::the_hub(),
    };

    let mut panels = PanelConfiguration::default_treatment();
    for &(thickness, count) in &args.panels {
        panels.update_count(thickness, count);
    }
    if panels.is_empty() {
        warn!(room = preset.name, "no panels configured");
    }
    info!(room = preset.name, panels = panels.total_panels(), "evaluating treatment");

    let evaluator = TreatmentEvaluator::new(config.clone());
    let state = evaluator
        .evaluate_preset(&preset, &panels, !args.keep_drape)
        .with_context(|| format!("evaluating {}", preset.name))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&state)?);
        return Ok(());
    }

    print_state(&preset, &state);
    print_panels(&panels);
    print_positions(&evaluator.position_predictions(&state, &preset.positions));

    let analyzer = ModeAnalyzer::new(config.modes);
    let report = analyzer.analyze(&preset.geometry)?;
    print_modes(&report);
    if let Some(target) = args.near {
        print_near(&analyzer, &report, target);
    }

    Ok(())
}
