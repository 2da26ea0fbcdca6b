//! Features Module - Feature Engineering
//!
//! Turns a telemetry series into one feature vector per record.
//! Training rows and the scored row go through the same code path.

pub mod calendar;
pub mod cpu;
pub mod layout;
pub mod matrix;
pub mod raw;
pub mod vector;

#[cfg(test)]
mod tests;

// Re-export common types
pub use calendar::CalendarFeatures;
pub use cpu::RollingCpuAverage;
pub use layout::{LayoutMismatchError, FEATURE_COUNT, FEATURE_LAYOUT, FEATURE_VERSION};
pub use matrix::FeatureMatrix;
pub use vector::{FeatureExtractor, FeatureVector};

use crate::constants::ROLLING_CPU_WINDOW;
use crate::logic::telemetry::TelemetrySeries;

/// Feature vectors for every record, oldest first
pub fn engineer(series: &TelemetrySeries) -> Vec<FeatureVector> {
    engineer_with_window(series, ROLLING_CPU_WINDOW)
}

pub fn engineer_with_window(series: &TelemetrySeries, window: usize) -> Vec<FeatureVector> {
    let mut rolling = RollingCpuAverage::new(window);

    series
        .iter()
        .map(|record| {
            let m = record.measurements();
            rolling.add_sample(m.cpu_usage);

            let mut vector = FeatureVector::new();
            m.extract(&mut vector);
            rolling.extract(&mut vector);
            CalendarFeatures::from_timestamp(record.timestamp()).extract(&mut vector);
            vector
        })
        .collect()
}
