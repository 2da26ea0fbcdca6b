//! Node Twin - Batch Entry Point
//!
//! `generate` writes one CSV artifact; `inspect` / `nodes` read one back and
//! print what a dashboard would render, as JSON.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use node_twin::api::{self, Metric};
use node_twin::constants::{APP_NAME, APP_VERSION};
use node_twin::logic::config::SynthConfig;
use node_twin::logic::dataset::{self, Dataset};
use node_twin::logic::model::AssessmentCache;
use node_twin::logic::synth;
use node_twin::TwinResult;

#[derive(Parser)]
#[command(name = "node-twin")]
#[command(about = "Node Twin - synthetic node telemetry & failure risk", long_about = None)]
#[command(version = APP_VERSION)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a synthetic telemetry dataset (one CSV file per run)
    Generate {
        /// JSON config file; flags below override it
        #[arg(long)]
        config: Option<PathBuf>,
        /// Start from the small preset (2 nodes, 1 day, hourly)
        #[arg(long, conflicts_with = "config")]
        smoke: bool,
        #[arg(long)]
        nodes: Option<u32>,
        #[arg(long)]
        days: Option<u32>,
        /// Sampling interval in minutes
        #[arg(long)]
        interval: Option<u32>,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },

    /// Latest telemetry + failure risk of one node
    Inspect {
        /// CSV artifact
        file: PathBuf,
        /// Node id; defaults to the first node
        node: Option<String>,
        /// Include CPU / temperature / latency trends
        #[arg(long)]
        trend: bool,
    },

    /// Dataset summary and node list
    Nodes {
        /// CSV artifact
        file: PathBuf,
        /// Score every node and list its risk tier
        #[arg(long)]
        risk: bool,
    },
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    log::debug!("Starting {} v{}", APP_NAME, APP_VERSION);

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands) -> TwinResult<()> {
    match command {
        Commands::Generate { config, smoke, nodes, days, interval, seed, output_dir } => {
            let mut cfg = match config {
                Some(path) => SynthConfig::load(&path)?,
                None if smoke => SynthConfig::smoke(),
                None => SynthConfig::default(),
            };
            if let Some(n) = nodes {
                cfg.num_nodes = n;
            }
            if let Some(d) = days {
                cfg.days = d;
            }
            if let Some(i) = interval {
                cfg.interval_minutes = i;
            }
            if let Some(s) = seed {
                cfg = cfg.with_seed(s);
            }
            if let Some(dir) = output_dir {
                cfg = cfg.with_output_dir(dir);
            }

            let (_, path) = synth::run(&cfg)?;
            println!("{}", path.display());
        }

        Commands::Inspect { file, node, trend } => {
            let data = dataset::load_dataset(&file)?;
            let node = match node {
                Some(n) => n,
                None => api::default_node(&data)?,
            };

            let snapshot = api::get_node_snapshot(&data, &node)?;
            let mut out = serde_json::to_value(&snapshot)?;
            if trend {
                let mut trends = serde_json::Map::new();
                for metric in Metric::TREND_CHARTS {
                    let points = api::get_metric_trend(&data, &node, metric)?;
                    trends.insert(metric.column().to_string(), serde_json::to_value(points)?);
                }
                out["trends"] = serde_json::Value::Object(trends);
            }
            println!("{}", serde_json::to_string_pretty(&out)?);
        }

        Commands::Nodes { file, risk } => {
            let data = dataset::load_dataset(&file)?;
            let nodes = if risk {
                risk_overview(&data)
            } else {
                serde_json::to_value(api::list_nodes(&data))?
            };
            let out = serde_json::json!({
                "summary": api::get_dataset_summary(&data),
                "nodes": nodes,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
    }

    Ok(())
}

/// One entry per node: tier + probability, or the scoring error
fn risk_overview(data: &Dataset) -> serde_json::Value {
    let cache = AssessmentCache::default();
    let rows: Vec<serde_json::Value> = api::list_nodes(data)
        .into_iter()
        .map(|node| match api::get_risk_assessment_cached(data, &node, &cache) {
            Ok(a) => serde_json::json!({
                "node_id": node,
                "tier": a.tier,
                "probability": a.probability,
            }),
            Err(e) => serde_json::json!({ "node_id": node, "error": e.to_string() }),
        })
        .collect();

    let stats = cache.stats();
    log::debug!(
        "Assessment cache: {} entries, {} hits, {} misses",
        stats.entries,
        stats.hits,
        stats.misses
    );
    serde_json::Value::Array(rows)
}
