//! Feature Matrix - training input for the classifier

use ndarray::Array2;

use super::layout::{layout_hash, FEATURE_COUNT, FEATURE_VERSION};
use super::vector::FeatureVector;
use crate::logic::telemetry::TelemetrySeries;

/// Row-per-record feature matrix plus labels
#[derive(Debug, Clone)]
pub struct FeatureMatrix {
    pub version: u8,
    pub layout_hash: u32,
    rows: Array2<f64>,
    labels: Vec<u8>,
    latest: FeatureVector,
}

impl FeatureMatrix {
    /// Engineer features for the whole series.
    ///
    /// Returns `None` only for an empty series, which `TelemetrySeries` never is.
    pub fn from_series(series: &TelemetrySeries) -> Option<Self> {
        let vectors = super::engineer(series);
        let latest = vectors.last()?.clone();

        let mut rows = Array2::<f64>::zeros((vectors.len(), FEATURE_COUNT));
        for (mut row, vector) in rows.outer_iter_mut().zip(&vectors) {
            for (cell, value) in row.iter_mut().zip(vector.values.iter()) {
                *cell = *value;
            }
        }

        Some(Self {
            version: FEATURE_VERSION,
            layout_hash: layout_hash(),
            rows,
            labels: series.iter().map(|r| r.failure_label()).collect(),
            latest,
        })
    }

    pub fn n_rows(&self) -> usize {
        self.rows.nrows()
    }

    pub fn rows(&self) -> &Array2<f64> {
        &self.rows
    }

    pub fn labels(&self) -> &[u8] {
        &self.labels
    }

    /// Features of the chronologically last record
    pub fn latest(&self) -> &FeatureVector {
        &self.latest
    }
}
