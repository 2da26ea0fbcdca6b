//! Risk Tier Thresholds
//!
//! Maps a failure probability onto Low / Medium / High.
//! Boundaries are inclusive on the lower tier: 0.4 is Low, 0.7 is Medium.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Probability above this is at least Medium
pub const MEDIUM_RISK_THRESHOLD: f64 = 0.4;
/// Probability above this is High
pub const HIGH_RISK_THRESHOLD: f64 = 0.7;

/// Discretized failure risk
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

impl RiskTier {
    /// Total over all inputs; NaN lands in Low
    pub fn from_probability(probability: f64) -> Self {
        if probability > HIGH_RISK_THRESHOLD {
            RiskTier::High
        } else if probability > MEDIUM_RISK_THRESHOLD {
            RiskTier::Medium
        } else {
            RiskTier::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskTier::Low => "Low",
            RiskTier::Medium => "Medium",
            RiskTier::High => "High",
        }
    }

    /// Badge color a renderer would use
    pub fn color(&self) -> &'static str {
        match self {
            RiskTier::Low => "green",
            RiskTier::Medium => "yellow",
            RiskTier::High => "red",
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
