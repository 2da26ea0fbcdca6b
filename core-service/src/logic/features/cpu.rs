//! CPU Feature Extraction
//!
//! Trailing rolling average of `cpu_usage`.

use std::collections::VecDeque;

use super::layout::IDX_ROLLING_AVG_CPU;
use super::vector::{FeatureExtractor, FeatureVector};

/// Mean of the last `window` CPU samples (fewer at the start of a series)
#[derive(Debug, Clone)]
pub struct RollingCpuAverage {
    window: usize,
    samples: VecDeque<f64>,
}

impl RollingCpuAverage {
    pub fn new(window: usize) -> Self {
        let window = window.max(1);
        Self {
            window,
            samples: VecDeque::with_capacity(window),
        }
    }

    /// Push a sample, return the average including it
    pub fn add_sample(&mut self, usage: f64) -> f64 {
        if self.samples.len() == self.window {
            self.samples.pop_front();
        }
        self.samples.push_back(usage);
        self.average()
    }

    /// Mean of the samples currently in the window
    pub fn average(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        self.samples.iter().sum::<f64>() / self.samples.len() as f64
    }
}

impl FeatureExtractor for RollingCpuAverage {
    fn extract(&self, vector: &mut FeatureVector) {
        vector.values[IDX_ROLLING_AVG_CPU] = self.average();
    }
}
