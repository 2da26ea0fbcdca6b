//! Model Module - Failure Risk Scoring
//!
//! Per-node classifier, refitted for every request.
//!
//! - `tree.rs` / `forest.rs` - CART trees + bagged ensemble
//! - `threshold.rs` - probability → RiskTier
//! - `scorer.rs` - series → RiskAssessment
//! - `cache.rs` - opt-in memoization keyed by series digest

pub mod cache;
pub mod forest;
pub mod scorer;
pub mod threshold;
pub mod tree;


// Re-export common types
pub use cache::{AssessmentCache, CacheStats};
pub use forest::{ForestConfig, RandomForest};
pub use scorer::{assess, assess_with, RiskAssessment};
pub use threshold::{RiskTier, HIGH_RISK_THRESHOLD, MEDIUM_RISK_THRESHOLD};
pub use tree::{DecisionTree, TreeParams};

/// Anything that maps a feature row to P(failure)
pub trait ProbabilisticClassifier {
    fn predict_proba(&self, features: &[f64]) -> f64;
}
