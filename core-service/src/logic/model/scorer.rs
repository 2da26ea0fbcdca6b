//! Risk Scorer
//!
//! `(series) -> RiskAssessment`, retrained from scratch on every call.
//! Nothing is kept between calls; see `cache.rs` for the opt-in cache.

use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::forest::{ForestConfig, RandomForest};
use super::threshold::RiskTier;
use crate::logic::error::{TwinError, TwinResult};
use crate::logic::features::{FeatureMatrix, FeatureVector};
use crate::logic::telemetry::TelemetrySeries;

/// Failure risk of a node's latest record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskAssessment {
    pub node_id: String,
    /// Timestamp of the scored (latest) record
    pub timestamp: DateTime<Utc>,
    /// P(failure) in [0, 1]
    pub probability: f64,
    pub tier: RiskTier,
    /// Engineered features of the scored record
    pub features: FeatureVector,
    pub training_rows: usize,
    pub n_trees: usize,
    pub layout_hash: u32,
    /// SHA-256 of the series the model was fitted on
    pub series_digest: String,
}

/// Score with the default ensemble (100 trees, seed 42)
pub fn assess(series: &TelemetrySeries) -> TwinResult<RiskAssessment> {
    assess_with(series, &ForestConfig::default())
}

pub fn assess_with(series: &TelemetrySeries, config: &ForestConfig) -> TwinResult<RiskAssessment> {
    let started = Instant::now();

    let counts = series.label_counts();
    if counts.total() == 0 {
        return Err(TwinError::EmptySeries);
    }
    if !counts.is_mixed() {
        return Err(TwinError::SingleClass {
            node_id: series.node_id().to_string(),
            label: if counts.failing > 0 { 1 } else { 0 },
        });
    }

    let matrix = FeatureMatrix::from_series(series).ok_or(TwinError::EmptySeries)?;
    let forest = RandomForest::fit(&matrix, config)?;
    let probability = forest.predict_vector(matrix.latest())?;
    let tier = RiskTier::from_probability(probability);

    log::debug!(
        "{}: p={:.3} ({}) from {} rows, {} trees / {} nodes in {:?}",
        series.node_id(),
        probability,
        tier,
        forest.training_rows(),
        forest.n_trees(),
        forest.node_count(),
        started.elapsed()
    );

    Ok(RiskAssessment {
        node_id: series.node_id().to_string(),
        timestamp: series.latest().timestamp(),
        probability,
        tier,
        features: matrix.latest().clone(),
        training_rows: forest.training_rows(),
        n_trees: forest.n_trees(),
        layout_hash: matrix.layout_hash,
        series_digest: series.digest(),
    })
}
