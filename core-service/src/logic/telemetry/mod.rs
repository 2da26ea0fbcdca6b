//! Telemetry Module
//!
//! Data model shared by the synthesizer, the CSV store and the risk scorer.
//!
//! ## Structure
//! - `record.rs` - NodeId, Measurements, TelemetryRecord + failure rule
//! - `series.rs` - TelemetrySeries (one node, sorted, validated)

pub mod record;
pub mod series;

#[cfg(test)]
mod tests;

// Re-export main types
pub use record::{
    Breach,
    Measurements,
    NodeId,
    TelemetryRecord,
    CPU_FAILURE_THRESHOLD,
    ERROR_RATE_FAILURE_THRESHOLD,
    PACKET_LOSS_FAILURE_THRESHOLD,
    TEMPERATURE_FAILURE_THRESHOLD,
};
pub use series::{LabelCounts, TelemetrySeries};
