//! Synthesizer Configuration
//!
//! Configuration for one generation run.
//! Can be loaded from a JSON config file or built at runtime.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_HISTORY_DAYS, DEFAULT_INTERVAL_MINUTES, DEFAULT_NUM_NODES, MAX_HISTORY_DAYS,
    MINUTES_PER_DAY,
};
use super::error::{TwinError, TwinResult};

// ============================================================================
// SYNTH CONFIG
// ============================================================================

/// Generation parameters (can be loaded from config file)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthConfig {
    /// Number of simulated nodes
    pub num_nodes: u32,
    /// History length in days
    pub days: u32,
    /// Sampling interval in minutes
    pub interval_minutes: u32,
    /// Fixed RNG seed; `None` draws a fresh seed from the OS
    pub seed: Option<u64>,
    /// Where the CSV artifact goes; `None` uses the local data dir
    pub output_dir: Option<PathBuf>,
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            num_nodes: DEFAULT_NUM_NODES,
            days: DEFAULT_HISTORY_DAYS,
            interval_minutes: DEFAULT_INTERVAL_MINUTES,
            seed: None,
            output_dir: None,
        }
    }
}

impl SynthConfig {
    pub fn new(num_nodes: u32, days: u32, interval_minutes: u32) -> Self {
        Self {
            num_nodes,
            days,
            interval_minutes,
            ..Default::default()
        }
    }

    /// Small hourly dataset, handy for smoke runs
    pub fn smoke() -> Self {
        Self::new(2, 1, 60)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    /// Load from a JSON file; missing keys fall back to defaults
    pub fn load(path: &Path) -> TwinResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: SynthConfig = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Number of records each node series will hold
    pub fn periods(&self) -> usize {
        if self.interval_minutes == 0 {
            return 0;
        }
        (self.days as u64 * MINUTES_PER_DAY as u64 / self.interval_minutes as u64) as usize
    }

    /// Total rows in the generated dataset
    pub fn total_rows(&self) -> usize {
        self.periods() * self.num_nodes as usize
    }

    /// Reject configurations that would produce no data
    pub fn validate(&self) -> TwinResult<()> {
        if self.num_nodes == 0 {
            return Err(TwinError::InvalidConfig("num_nodes must be positive".into()));
        }
        if self.days == 0 {
            return Err(TwinError::InvalidConfig("days must be positive".into()));
        }
        if self.days > MAX_HISTORY_DAYS {
            return Err(TwinError::InvalidConfig(format!(
                "days must be at most {}, got {}",
                MAX_HISTORY_DAYS, self.days
            )));
        }
        if self.interval_minutes == 0 {
            return Err(TwinError::InvalidConfig("interval_minutes must be positive".into()));
        }
        if self.periods() == 0 {
            return Err(TwinError::InvalidConfig(format!(
                "interval of {} minutes is longer than the {}-day window",
                self.interval_minutes, self.days
            )));
        }
        if MINUTES_PER_DAY % self.interval_minutes != 0 {
            log::warn!(
                "interval_minutes={} does not divide a day; calendar features will drift",
                self.interval_minutes
            );
        }
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================
