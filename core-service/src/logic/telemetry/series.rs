//! Telemetry Series - the ordered history of one node
//!
//! Built once (sorted + validated), read-only afterwards.

use chrono::Duration;
use serde::Serialize;
use sha2::{Digest, Sha256};

use super::record::{NodeId, TelemetryRecord};
use crate::logic::error::{TwinError, TwinResult};

/// Records of a single node, strictly increasing in time
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TelemetrySeries {
    node_id: NodeId,
    records: Vec<TelemetryRecord>,
}

/// Label counts of a series
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LabelCounts {
    pub healthy: usize,
    pub failing: usize,
}

impl LabelCounts {
    pub fn total(&self) -> usize {
        self.healthy + self.failing
    }

    /// Both classes present
    pub fn is_mixed(&self) -> bool {
        self.healthy > 0 && self.failing > 0
    }

    pub fn failure_rate(&self) -> f64 {
        if self.total() == 0 {
            0.0
        } else {
            self.failing as f64 / self.total() as f64
        }
    }
}

impl TelemetrySeries {
    /// Sort by timestamp and validate.
    ///
    /// Fails on empty input, records of more than one node and repeated timestamps.
    pub fn new(mut records: Vec<TelemetryRecord>) -> TwinResult<Self> {
        let node_id = match records.first() {
            Some(r) => r.node_id().clone(),
            None => return Err(TwinError::EmptySeries),
        };

        if let Some(other) = records.iter().find(|r| r.node_id() != &node_id) {
            return Err(TwinError::MixedNodes {
                expected: node_id.to_string(),
                found: other.node_id().to_string(),
            });
        }

        records.sort_by_key(|r| r.timestamp());

        if let Some(pair) = records.windows(2).find(|w| w[0].timestamp() == w[1].timestamp()) {
            return Err(TwinError::DuplicateTimestamp {
                node_id: node_id.to_string(),
                timestamp: pair[0].timestamp().to_rfc3339(),
            });
        }

        Ok(Self { node_id, records })
    }

    pub fn node_id(&self) -> &NodeId {
        &self.node_id
    }

    pub fn records(&self) -> &[TelemetryRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TelemetryRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// False for any constructed series
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Chronologically last record
    pub fn latest(&self) -> &TelemetryRecord {
        // non-empty by construction
        &self.records[self.records.len() - 1]
    }

    pub fn first(&self) -> &TelemetryRecord {
        &self.records[0]
    }

    /// Sampling interval when every gap is identical
    pub fn uniform_interval(&self) -> Option<Duration> {
        let mut gaps = self.records.windows(2).map(|w| w[1].timestamp() - w[0].timestamp());
        let first = gaps.next()?;
        gaps.all(|g| g == first).then_some(first)
    }

    pub fn label_counts(&self) -> LabelCounts {
        let failing = self.records.iter().filter(|r| r.is_failure()).count();
        LabelCounts {
            healthy: self.records.len() - failing,
            failing,
        }
    }

    /// SHA-256 over every record, hex encoded
    pub fn digest(&self) -> String {
        let mut hasher = Sha256::new();
        let mut buf = Vec::with_capacity(96);
        for record in &self.records {
            buf.clear();
            record.digest_bytes(&mut buf);
            hasher.update(&buf);
        }
        hex::encode(hasher.finalize())
    }
}

impl<'a> IntoIterator for &'a TelemetrySeries {
    type Item = &'a TelemetryRecord;
    type IntoIter = std::slice::Iter<'a, TelemetryRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
