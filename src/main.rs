use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use eframe::egui;
use serde::Serialize;

use launch_dash::app::LaunchDashApp;
use launch_dash::config::load_config;
use launch_dash::data::loader::load_file;
use launch_dash::data::model::{LaunchRecord, PayloadRange, SiteFilter};
use launch_dash::data::query::{AggregatedCount, QueryEngine};
use launch_dash::state::AppState;

/// SpaceX launch records dashboard
#[derive(Parser, Debug)]
#[command(version, about = "SpaceX launch records dashboard")]
struct Args {
    /// Launch dataset (.csv, .json or .parquet); overrides the config file
    data: Option<PathBuf>,

    /// Configuration file (default: <config dir>/launch-dash/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Initial launch site, or ALL
    #[arg(long, default_value = "ALL")]
    site: String,

    /// Initial lower payload bound in kg (default: dataset minimum)
    #[arg(long)]
    low: Option<f64>,

    /// Initial upper payload bound in kg (default: dataset maximum)
    #[arg(long)]
    high: Option<f64>,

    /// Print the query results for the selection as JSON instead of opening a window
    #[arg(long)]
    dump: bool,
}

#[derive(Serialize)]
struct Dump<'a> {
    site: &'a SiteFilter,
    range: PayloadRange,
    summary: Vec<AggregatedCount>,
    rows: Vec<&'a LaunchRecord>,
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();

    let loaded = load_config(args.config.as_deref());
    if let Some(warning) = &loaded.warning {
        log::warn!("{warning}; using defaults");
    }
    let config = loaded.config;

    let data_path = args.data.clone().unwrap_or_else(|| config.data.path.clone());
    let dataset = load_file(&data_path)
        .with_context(|| format!("loading launch data from {}", data_path.display()))?;
    let engine = QueryEngine::new(dataset);

    let site = engine.catalog().resolve(&args.site)?;
    let bounds = engine.bounds();
    let range = PayloadRange::new(
        args.low.unwrap_or(bounds.min),
        args.high.unwrap_or(bounds.max),
    );

    if args.dump {
        let dump = Dump {
            site: &site,
            range,
            summary: engine.success_summary(&site),
            rows: engine.filtered_rows(&site, range),
        };
        println!("{}", serde_json::to_string_pretty(&dump)?);
        return Ok(());
    }

    let state = AppState::new(engine, site, range, config.slider);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window.width, config.window.height])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "SpaceX Launch Records Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(LaunchDashApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}
