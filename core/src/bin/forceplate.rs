use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::warn;

use forceplate_core::cli::{format_history_summary, print_metrics_report};
use forceplate_core::config::load_cfg;
use forceplate_core::{
    analyze_upload, load_history, load_profile, save_history, ExtractorCfg, SessionType,
    UploadInputs,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Force-plate jump metrics from a CSV export", long_about = None)]
struct Args {
    /// CSV export with a header row (time/force columns)
    input: PathBuf,

    /// Athlete profile JSON (id, body_weight_kg)
    #[arg(short, long)]
    athlete: Option<PathBuf>,

    /// Extractor config JSON (baseline_force_n, onset_factor, ...)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Jump | Isometric | Landing
    #[arg(long, default_value = "jump")]
    session_type: SessionType,

    /// Print the record as JSON instead of the text report
    #[arg(long)]
    json: bool,

    /// Append the record to this history file
    #[arg(long)]
    history: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let cfg = match &args.config {
        Some(p) => load_cfg(p)?,
        None => ExtractorCfg::default(),
    };
    let athlete = args.athlete.as_ref().map(load_profile).transpose()?;
    let csv_text = std::fs::read_to_string(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;

    let report = analyze_upload(UploadInputs {
        csv_text: &csv_text,
        athlete: athlete.as_ref(),
        session_type: args.session_type,
        captured_at: None,
        cfg: &cfg,
    })?;
    for w in &report.warnings {
        warn!("{w:?}");
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report.metrics)?);
    } else {
        print_metrics_report(&report.metrics);
    }

    if let Some(path) = &args.history {
        let mut history = load_history(path, &report.metrics.athlete_id)?;
        history.push(report.metrics);
        save_history(&history, path)?;
        if !args.json {
            print!("{}", format_history_summary(&history));
        }
    }
    Ok(())
}
