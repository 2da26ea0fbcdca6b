//! Telemetry Record - one observation of one node
//!
//! The failure label is computed once, from the measurements, when the record
//! is built. There is no way to set it independently.

use std::fmt;

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::constants::{NODE_ID_BASE, NODE_ID_PREFIX};
use crate::logic::error::{TwinError, TwinResult};

// ============================================================================
// FAILURE RULE
// ============================================================================

/// `cpu_usage` above this is a failure
pub const CPU_FAILURE_THRESHOLD: f64 = 70.0;
/// `packet_loss` above this is a failure
pub const PACKET_LOSS_FAILURE_THRESHOLD: f64 = 3.0;
/// `temperature` above this is a failure
pub const TEMPERATURE_FAILURE_THRESHOLD: f64 = 80.0;
/// `error_rate` above this is a failure
pub const ERROR_RATE_FAILURE_THRESHOLD: f64 = 1.5;

/// Which threshold a measurement set breached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Breach {
    CpuUsage,
    PacketLoss,
    Temperature,
    ErrorRate,
}

// ============================================================================
// NODE ID
// ============================================================================

static NODE_ID_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^NODE-(\d+)$").expect("static node id pattern")
});

/// Node identifier of the form `NODE-<integer>`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NodeId(String);

// NODE-999 sorts before NODE-1000
impl Ord for NodeId {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.number()
            .cmp(&other.number())
            .then_with(|| self.0.cmp(&other.0))
    }
}

impl PartialOrd for NodeId {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl NodeId {
    /// Id of the `index`-th generated node (`NODE-1000`, `NODE-1001`, ...)
    pub fn from_index(index: u32) -> Self {
        NodeId(format!("{}{}", NODE_ID_PREFIX, NODE_ID_BASE + index))
    }

    pub fn parse(raw: &str) -> TwinResult<Self> {
        let raw = raw.trim();
        if NODE_ID_RE.is_match(raw) {
            Ok(NodeId(raw.to_string()))
        } else {
            Err(TwinError::InvalidNodeId(raw.to_string()))
        }
    }

    /// Numeric suffix
    pub fn number(&self) -> u64 {
        self.0[NODE_ID_PREFIX.len()..].parse().unwrap_or(0)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for NodeId {
    type Error = TwinError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        NodeId::parse(&value)
    }
}

impl From<NodeId> for String {
    fn from(id: NodeId) -> Self {
        id.0
    }
}

// ============================================================================
// MEASUREMENTS
// ============================================================================

/// The six continuous measurements of one observation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measurements {
    pub cpu_usage: f64,
    pub latency: f64,
    pub throughput: f64,
    pub packet_loss: f64,
    pub temperature: f64,
    pub error_rate: f64,
}

impl Measurements {
    /// Ground-truth labeling rule: OR of four strict threshold breaches
    pub fn is_failure(&self) -> bool {
        self.cpu_usage > CPU_FAILURE_THRESHOLD
            || self.packet_loss > PACKET_LOSS_FAILURE_THRESHOLD
            || self.temperature > TEMPERATURE_FAILURE_THRESHOLD
            || self.error_rate > ERROR_RATE_FAILURE_THRESHOLD
    }

    /// Label as stored in the CSV artifact
    pub fn failure_label(&self) -> u8 {
        self.is_failure() as u8
    }

    /// Thresholds this observation breached, in rule order
    pub fn breaches(&self) -> Vec<Breach> {
        let mut out = Vec::new();
        if self.cpu_usage > CPU_FAILURE_THRESHOLD {
            out.push(Breach::CpuUsage);
        }
        if self.packet_loss > PACKET_LOSS_FAILURE_THRESHOLD {
            out.push(Breach::PacketLoss);
        }
        if self.temperature > TEMPERATURE_FAILURE_THRESHOLD {
            out.push(Breach::Temperature);
        }
        if self.error_rate > ERROR_RATE_FAILURE_THRESHOLD {
            out.push(Breach::ErrorRate);
        }
        out
    }
}

// ============================================================================
// TELEMETRY RECORD
// ============================================================================

/// One timestamped observation for one node
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TelemetryRecord {
    node_id: NodeId,
    timestamp: DateTime<Utc>,
    #[serde(flatten)]
    measurements: Measurements,
    failure_label: u8,
}

impl TelemetryRecord {
    pub fn new(node_id: NodeId, timestamp: DateTime<Utc>, measurements: Measurements) -> Self {
        let failure_label = measurements.failure_label();
        Self {
            node_id,
            timestamp,
            measurements,
            failure_label,
        }
    }

    pub fn node_id(&self) -> &NodeId {
        &self.node_id
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn measurements(&self) -> &Measurements {
        &self.measurements
    }

    pub fn failure_label(&self) -> u8 {
        self.failure_label
    }

    pub fn is_failure(&self) -> bool {
        self.failure_label == 1
    }

    /// Stable byte encoding used for the series digest
    pub(crate) fn digest_bytes(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(self.node_id.as_str().as_bytes());
        out.push(0);
        out.extend_from_slice(&self.timestamp.timestamp_micros().to_le_bytes());
        let m = &self.measurements;
        for v in [m.cpu_usage, m.latency, m.throughput, m.packet_loss, m.temperature, m.error_rate] {
            out.extend_from_slice(&v.to_le_bytes());
        }
        out.push(self.failure_label);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn calm() -> Measurements {
        Measurements {
            cpu_usage: 30.0,
            latency: 20.0,
            throughput: 100.0,
            packet_loss: 1.0,
            temperature: 60.0,
            error_rate: 0.5,
        }
    }

    #[test]
    fn test_node_id_parse() {
        assert_eq!(NodeId::parse("NODE-1042").unwrap().number(), 1042);
        assert!(NodeId::parse("node-1").is_err());
        assert!(NodeId::parse("NODE-").is_err());
        assert!(NodeId::parse("NODE-12a").is_err());
        assert_eq!(NodeId::from_index(0).as_str(), "NODE-1000");
        assert_eq!(NodeId::from_index(99).as_str(), "NODE-1099");
    }

    #[test]
    fn test_node_id_numeric_order() {
        let small = NodeId::parse("NODE-999").unwrap();
        let large = NodeId::parse("NODE-1000").unwrap();
        assert!(small < large);
    }

    #[test]
    fn test_node_id_serde() {
        let id: NodeId = serde_json::from_str("\"NODE-7\"").unwrap();
        assert_eq!(id.as_str(), "NODE-7");
        assert!(serde_json::from_str::<NodeId>("\"HOST-7\"").is_err());
    }

    #[test]
    fn test_calm_is_not_failure() {
        assert!(!calm().is_failure());
        assert!(calm().breaches().is_empty());
    }

    #[test]
    fn test_each_threshold_triggers() {
        let cases = [
            Measurements { cpu_usage: 70.01, ..calm() },
            Measurements { packet_loss: 3.01, ..calm() },
            Measurements { temperature: 80.01, ..calm() },
            Measurements { error_rate: 1.51, ..calm() },
        ];
        for m in cases {
            assert!(m.is_failure(), "{:?}", m);
            assert_eq!(m.breaches().len(), 1);
        }
    }

    #[test]
    fn test_thresholds_are_strict() {
        let m = Measurements {
            cpu_usage: 70.0,
            packet_loss: 3.0,
            temperature: 80.0,
            error_rate: 1.5,
            ..calm()
        };
        assert!(!m.is_failure());
    }

    #[test]
    fn test_cpu_75_always_fails() {
        let m = Measurements { cpu_usage: 75.0, packet_loss: 0.0, error_rate: 0.0, ..calm() };
        let record = TelemetryRecord::new(NodeId::from_index(0), Utc::now(), m);
        assert_eq!(record.failure_label(), 1);
        assert_eq!(m.breaches(), vec![Breach::CpuUsage]);
    }

    #[test]
    fn test_negative_values_are_kept() {
        let m = Measurements { cpu_usage: -4.2, packet_loss: 0.1, ..calm() };
        let record = TelemetryRecord::new(NodeId::from_index(1), Utc::now(), m);
        assert_eq!(record.measurements().cpu_usage, -4.2);
        assert!(!record.is_failure());
    }
}
