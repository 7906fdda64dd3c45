//! Scan Replay
//!
//! Replays a RON scan script through a `TimeGraph` and prints the chart.
//! - One entry of `ticks` per scan snapshot
//! - Optional `engine` and `grace` sections override the defaults
//! - `RUST_LOG=debug` shows the per-tick reconciliation

use airtrace_chart::TimeGraph;
use airtrace_core::{Detail, EngineConfig};
use airtrace_grace::GraceConfig;
use clap::Parser;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Scan script loaded from RON
#[derive(Debug, Deserialize)]
struct ReplayScript {
    #[serde(default)]
    engine: EngineConfig,
    #[serde(default)]
    grace: GraceConfig,
    ticks: Vec<Vec<Detail>>,
}

#[derive(Debug, Parser)]
#[command(name = "scan_replay", about = "Replay scan snapshots through an airtrace chart")]
struct Args {
    /// Path to the RON scan script
    script: Option<PathBuf>,

    /// Play the script this many times back to back
    #[arg(long, default_value_t = 1)]
    repeat: u32,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let script = load_script(args.script.as_deref())?;
    let mut graph = TimeGraph::new(script.engine, script.grace)?;
    for _ in 0..args.repeat {
        for scan in &script.ticks {
            let removed = graph.update(scan.iter().cloned())?;
            for key in removed {
                info!(tick = graph.x_value(), series = %key, "series dropped");
            }
        }
    }

    print_chart(&graph);
    Ok(())
}

fn load_script(path: Option<&Path>) -> Result<ReplayScript, Box<dyn std::error::Error>> {
    if let Some(path) = path {
        let content = fs::read_to_string(path)?;
        return Ok(ron::from_str(&content)?);
    }

    // Try multiple paths for the bundled script
    let paths = [
        "demos/scan_replay/data/walk.ron",
        "data/walk.ron",
        "../data/walk.ron",
    ];

    for path in &paths {
        if Path::new(path).exists() {
            let content = fs::read_to_string(path)?;
            return Ok(ron::from_str(&content)?);
        }
    }

    Err("Could not find walk.ron file".into())
}

fn print_chart(graph: &TimeGraph) {
    let (from, to) = graph.visible_window();
    println!(
        "x = {}, scans = {}, window = {}..{}, labels = {}",
        graph.x_value(),
        graph.scan_count(),
        from,
        to,
        if graph.chart().horizontal_labels_visible() {
            "shown"
        } else {
            "hidden"
        }
    );

    for series in graph.chart().iter() {
        let last = series
            .last_point()
            .map(|p| p.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<32} {} {:>3} points, last {}",
            series.title(),
            series.color(),
            series.len(),
            last
        );
    }
}
