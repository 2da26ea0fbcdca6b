//! Random Forest - bagged ensemble of CART trees
//!
//! Each tree sees a bootstrap sample and `sqrt(n_features)` candidate
//! features per split. One master seed drives every tree, so identical
//! input gives identical probabilities.

use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use super::tree::{DecisionTree, TreeParams};
use super::ProbabilisticClassifier;
use crate::constants::{DEFAULT_ENSEMBLE_SEED, DEFAULT_ENSEMBLE_SIZE};
use crate::logic::error::{TwinError, TwinResult};
use crate::logic::features::layout::validate_layout;
use crate::logic::features::{FeatureMatrix, FeatureVector};

// ============================================================================
// CONFIG
// ============================================================================

/// Ensemble configuration
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct ForestConfig {
    /// Number of trees
    pub n_trees: usize,
    /// Master seed
    pub seed: u64,
    /// Candidate features per split; `None` = floor(sqrt(n_features))
    pub max_features: Option<usize>,
    pub min_samples_split: usize,
    pub max_depth: Option<usize>,
    /// Draw a bootstrap sample per tree
    pub bootstrap: bool,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            n_trees: DEFAULT_ENSEMBLE_SIZE,
            seed: DEFAULT_ENSEMBLE_SEED,
            max_features: None,
            min_samples_split: 2,
            max_depth: None,
            bootstrap: true,
        }
    }
}

impl ForestConfig {
    pub fn validate(&self) -> TwinResult<()> {
        if self.n_trees == 0 {
            return Err(TwinError::InvalidConfig("n_trees must be positive".into()));
        }
        if self.max_features == Some(0) {
            return Err(TwinError::InvalidConfig("max_features must be positive".into()));
        }
        Ok(())
    }

    fn tree_params(&self, n_features: usize) -> TreeParams {
        let sqrt = ((n_features as f64).sqrt().floor() as usize).max(1);
        TreeParams {
            max_features: self.max_features.unwrap_or(sqrt).min(n_features.max(1)),
            min_samples_split: self.min_samples_split,
            max_depth: self.max_depth,
        }
    }

    /// Stable key for caching fitted results
    pub fn cache_key(&self) -> String {
        format!(
            "{}:{}:{:?}:{}:{:?}:{}",
            self.n_trees, self.seed, self.max_features, self.min_samples_split, self.max_depth, self.bootstrap
        )
    }
}

// ============================================================================
// FOREST
// ============================================================================

#[derive(Debug, Clone)]
pub struct RandomForest {
    trees: Vec<DecisionTree>,
    version: u8,
    layout_hash: u32,
    training_rows: usize,
}

impl RandomForest {
    pub fn fit(matrix: &FeatureMatrix, config: &ForestConfig) -> TwinResult<Self> {
        config.validate()?;
        let n = matrix.n_rows();
        if n == 0 {
            return Err(TwinError::EmptySeries);
        }

        let params = config.tree_params(matrix.rows().ncols());
        let mut master = StdRng::seed_from_u64(config.seed);

        let trees = (0..config.n_trees)
            .map(|_| {
                let mut rng = StdRng::seed_from_u64(master.gen());
                let samples: Vec<usize> = if config.bootstrap {
                    (0..n).map(|_| rng.gen_range(0..n)).collect()
                } else {
                    (0..n).collect()
                };
                DecisionTree::fit(matrix.rows(), matrix.labels(), samples, &params, &mut rng)
            })
            .collect();

        Ok(Self {
            trees,
            version: matrix.version,
            layout_hash: matrix.layout_hash,
            training_rows: n,
        })
    }

    /// Probability of the failure class for one engineered vector
    pub fn predict_vector(&self, vector: &FeatureVector) -> TwinResult<f64> {
        vector.validate()?;
        validate_layout(self.version, self.layout_hash)?;
        Ok(self.predict_proba(vector.as_slice()))
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    pub fn training_rows(&self) -> usize {
        self.training_rows
    }

    /// Nodes across all trees
    pub fn node_count(&self) -> usize {
        self.trees.iter().map(|t| t.node_count()).sum()
    }
}

impl ProbabilisticClassifier for RandomForest {
    /// Mean of the per-tree leaf fractions
    fn predict_proba(&self, features: &[f64]) -> f64 {
        if self.trees.is_empty() {
            return 0.0;
        }
        let sum: f64 = self.trees.iter().map(|t| t.predict_proba(features)).sum();
        (sum / self.trees.len() as f64).clamp(0.0, 1.0)
    }
}
