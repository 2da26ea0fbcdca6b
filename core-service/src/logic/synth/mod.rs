//! Synth Module - Telemetry Synthesizer
//!
//! Generates one series per node over a fixed timestamp grid and labels each
//! observation with the failure rule. Randomness and the generation instant
//! are both passed in, so a seeded run is fully reproducible.
//!
//! ## Usage
//! ```ignore
//! let config = SynthConfig::smoke();
//! let mut rng = StdRng::seed_from_u64(1);
//! let dataset = synth::generate(&config, Utc::now(), &mut rng)?;
//! ```

pub mod distributions;


use std::path::PathBuf;

use chrono::{DateTime, Duration, SubsecRound, Utc};
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::logic::config::SynthConfig;
use crate::logic::dataset::{self, Dataset};
use crate::logic::error::{TwinError, TwinResult};
use crate::logic::telemetry::{NodeId, TelemetryRecord, TelemetrySeries};
pub use distributions::{DistributionParams, MeasurementModel};

// ============================================================================
// GENERATION
// ============================================================================

/// Analytic label-positive probability of the default model (~0.43)
pub fn expected_failure_rate() -> f64 {
    DistributionParams::default().failure_probability()
}

/// RNG for a production run: seeded when the config asks for it
pub fn rng_for(config: &SynthConfig) -> StdRng {
    match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// `periods` instants, oldest first, the last one at `end` (whole seconds).
///
/// Fails with `InvalidConfig` when the oldest instant is not representable.
pub fn timestamp_grid(
    end: DateTime<Utc>,
    periods: usize,
    interval_minutes: u32,
) -> TwinResult<Vec<DateTime<Utc>>> {
    let end = end.trunc_subsecs(0);
    let out_of_range = || {
        TwinError::InvalidConfig(format!(
            "{} samples of {} minutes before {} fall outside the supported date range",
            periods,
            interval_minutes,
            end.to_rfc3339()
        ))
    };
    let step = Duration::try_minutes(interval_minutes as i64).ok_or_else(out_of_range)?;

    (0..periods)
        .map(|i| {
            i32::try_from(periods - 1 - i)
                .ok()
                .and_then(|k| step.checked_mul(k))
                .and_then(|offset| end.checked_sub_signed(offset))
                .ok_or_else(out_of_range)
        })
        .collect()
}

/// Generate the full node x timestamp dataset with the default model
pub fn generate<R: Rng + ?Sized>(
    config: &SynthConfig,
    end: DateTime<Utc>,
    rng: &mut R,
) -> TwinResult<Dataset> {
    generate_with(config, &DistributionParams::default(), end, rng)
}

/// Generate with explicit distribution parameters
pub fn generate_with<R: Rng + ?Sized>(
    config: &SynthConfig,
    params: &DistributionParams,
    end: DateTime<Utc>,
    rng: &mut R,
) -> TwinResult<Dataset> {
    config.validate()?;
    let model = MeasurementModel::new(params)?;
    let grid = timestamp_grid(end, config.periods(), config.interval_minutes)?;

    log::info!(
        "Generating telemetry: {} nodes x {} samples ({} min interval), {} rows",
        config.num_nodes,
        grid.len(),
        config.interval_minutes,
        config.total_rows()
    );

    let mut all_series = Vec::with_capacity(config.num_nodes as usize);
    for index in 0..config.num_nodes {
        let node_id = NodeId::from_index(index);
        let records = grid
            .iter()
            .map(|ts| TelemetryRecord::new(node_id.clone(), *ts, model.sample(rng)))
            .collect();
        all_series.push(TelemetrySeries::new(records)?);
    }

    let dataset = Dataset::from_series(all_series)?;
    let stats = dataset.label_counts();
    log::info!(
        "Generated {} rows, failure rate {:.4} (expected {:.4})",
        stats.total(),
        stats.failure_rate(),
        params.failure_probability()
    );

    Ok(dataset)
}

/// One-shot batch job: generate and write one CSV artifact
pub fn run(config: &SynthConfig) -> TwinResult<(Dataset, PathBuf)> {
    config.validate()?;
    let mut rng = rng_for(config);
    let dataset = generate(config, Utc::now(), &mut rng)?;

    let dir = config
        .output_dir
        .clone()
        .unwrap_or_else(dataset::get_dataset_dir);
    let path = dataset::writer::write_new_artifact(&dir, &dataset)?;

    log::info!("Telemetry written to {}", path.display());
    Ok((dataset, path))
}
