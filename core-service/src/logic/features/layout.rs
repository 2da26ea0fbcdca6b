//! Feature Layout - Centralized Feature Definition
//!
//! **This file controls the feature schema used for training AND scoring**
//!
//! ## Rules:
//! 1. Add feature → increment FEATURE_VERSION
//! 2. Change order → increment FEATURE_VERSION
//! 3. Remove feature → increment FEATURE_VERSION

use crc32fast::Hasher;
use thiserror::Error;

// ============================================================================
// FEATURE VERSION
// ============================================================================

/// Current feature layout version
pub const FEATURE_VERSION: u8 = 1;

// ============================================================================
// FEATURE LAYOUT (Authoritative source)
// ============================================================================

/// Feature names in exact order they appear in the vector
pub const FEATURE_LAYOUT: &[&str] = &[
    // === Raw measurements (0-5) ===
    "cpu_usage",             // 0
    "latency",               // 1
    "throughput",            // 2
    "packet_loss",           // 3
    "temperature",           // 4
    "error_rate",            // 5

    // === Temporal (6) ===
    "rolling_avg_cpu",       // 6: trailing mean of cpu_usage

    // === Calendar (7-8) ===
    "hour",                  // 7: 0-23, UTC
    "dayofweek",             // 8: Monday = 0 .. Sunday = 6
];

/// Total number of features
/// IMPORTANT: Must match FEATURE_LAYOUT.len()!
pub const FEATURE_COUNT: usize = 9;

pub const IDX_CPU_USAGE: usize = 0;
pub const IDX_LATENCY: usize = 1;
pub const IDX_THROUGHPUT: usize = 2;
pub const IDX_PACKET_LOSS: usize = 3;
pub const IDX_TEMPERATURE: usize = 4;
pub const IDX_ERROR_RATE: usize = 5;
pub const IDX_ROLLING_AVG_CPU: usize = 6;
pub const IDX_HOUR: usize = 7;
pub const IDX_DAYOFWEEK: usize = 8;

// ============================================================================
// LAYOUT HASH
// ============================================================================

/// Compute CRC32 hash of the feature layout
pub fn compute_layout_hash() -> u32 {
    let mut hasher = Hasher::new();
    hasher.update(&[FEATURE_VERSION]);

    for name in FEATURE_LAYOUT {
        hasher.update(name.as_bytes());
        hasher.update(&[0]); // Separator
    }

    hasher.finalize()
}

pub fn layout_hash() -> u32 {
    compute_layout_hash()
}

// ============================================================================
// LAYOUT VALIDATION
// ============================================================================

/// Error when a model and a vector disagree on the layout
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Feature layout mismatch: expected v{expected_version} (hash: {expected_hash:08x}), got v{actual_version} (hash: {actual_hash:08x})")]
pub struct LayoutMismatchError {
    pub expected_version: u8,
    pub expected_hash: u32,
    pub actual_version: u8,
    pub actual_hash: u32,
}

/// Validate that incoming data matches current layout
pub fn validate_layout(incoming_version: u8, incoming_hash: u32) -> Result<(), LayoutMismatchError> {
    let current_hash = layout_hash();

    if incoming_version != FEATURE_VERSION || incoming_hash != current_hash {
        return Err(LayoutMismatchError {
            expected_version: FEATURE_VERSION,
            expected_hash: current_hash,
            actual_version: incoming_version,
            actual_hash: incoming_hash,
        });
    }

    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_count() {
        assert_eq!(FEATURE_COUNT, 9);
        assert_eq!(FEATURE_LAYOUT.len(), FEATURE_COUNT);
    }

    #[test]
    fn test_index_constants_match_layout() {
        assert_eq!(FEATURE_LAYOUT[IDX_CPU_USAGE], "cpu_usage");
        assert_eq!(FEATURE_LAYOUT[IDX_LATENCY], "latency");
        assert_eq!(FEATURE_LAYOUT[IDX_THROUGHPUT], "throughput");
        assert_eq!(FEATURE_LAYOUT[IDX_PACKET_LOSS], "packet_loss");
        assert_eq!(FEATURE_LAYOUT[IDX_TEMPERATURE], "temperature");
        assert_eq!(FEATURE_LAYOUT[IDX_ERROR_RATE], "error_rate");
        assert_eq!(FEATURE_LAYOUT[IDX_ROLLING_AVG_CPU], "rolling_avg_cpu");
        assert_eq!(FEATURE_LAYOUT[IDX_HOUR], "hour");
        assert_eq!(FEATURE_LAYOUT[IDX_DAYOFWEEK], "dayofweek");
    }

    #[test]
    fn test_layout_hash_stable() {
        assert_eq!(compute_layout_hash(), compute_layout_hash());
        assert_ne!(layout_hash(), 0);
    }

    #[test]
    fn test_validate_layout() {
        assert!(validate_layout(FEATURE_VERSION, layout_hash()).is_ok());
        assert!(validate_layout(FEATURE_VERSION + 1, layout_hash()).is_err());
        assert!(validate_layout(FEATURE_VERSION, layout_hash().wrapping_add(1)).is_err());
    }
}
