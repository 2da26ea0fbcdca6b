//! Dataset Module - Flat tabular telemetry store
//!
//! A dataset is one series per node. It is persisted as a single CSV file
//! per generation run (header + one row per record).
//!
//! ## Structure
//! - `writer.rs` - CSV artifact writer
//! - `reader.rs` - CSV loader (validates header, ids and labels)

pub mod reader;
pub mod writer;


use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Serialize;

use crate::logic::error::{TwinError, TwinResult};
use crate::logic::telemetry::{LabelCounts, NodeId, TelemetryRecord, TelemetrySeries};

pub use reader::load_dataset;
pub use writer::{write_dataset, write_new_artifact};

/// Exact CSV header, column order is part of the format
pub const CSV_HEADER: &str =
    "node_id,timestamp,cpu_usage,latency,throughput,packet_loss,temperature,error_rate,failure_label";

/// Get the base directory for generated artifacts
pub fn get_dataset_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("node-twin")
        .join("data")
}

/// Telemetry series keyed by node id
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Dataset {
    series: BTreeMap<NodeId, TelemetrySeries>,
}

impl Dataset {
    /// Build from per-node series; two series of the same node are merged
    pub fn from_series(all: Vec<TelemetrySeries>) -> TwinResult<Self> {
        let mut series: BTreeMap<NodeId, TelemetrySeries> = BTreeMap::new();
        for s in all {
            let merged = match series.remove(s.node_id()) {
                Some(existing) => {
                    let mut records = existing.records().to_vec();
                    records.extend_from_slice(s.records());
                    TelemetrySeries::new(records)?
                }
                None => s,
            };
            series.insert(merged.node_id().clone(), merged);
        }
        Ok(Self { series })
    }

    /// Group loose records by node
    pub fn from_records(records: Vec<TelemetryRecord>) -> TwinResult<Self> {
        let mut grouped: BTreeMap<NodeId, Vec<TelemetryRecord>> = BTreeMap::new();
        for record in records {
            grouped.entry(record.node_id().clone()).or_default().push(record);
        }

        let series = grouped
            .into_values()
            .map(TelemetrySeries::new)
            .collect::<TwinResult<Vec<_>>>()?;
        Self::from_series(series)
    }

    /// Distinct node ids, numeric order
    pub fn node_ids(&self) -> Vec<&NodeId> {
        self.series.keys().collect()
    }

    /// Full series of one node
    pub fn series(&self, node_id: &str) -> TwinResult<&TelemetrySeries> {
        let id = NodeId::parse(node_id)?;
        self.series
            .get(&id)
            .ok_or_else(|| TwinError::UnknownNode(id.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &TelemetrySeries> {
        self.series.values()
    }

    /// Every record, node by node, oldest first
    pub fn records(&self) -> impl Iterator<Item = &TelemetryRecord> {
        self.series.values().flat_map(|s| s.iter())
    }

    pub fn node_count(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    pub fn total_rows(&self) -> usize {
        self.series.values().map(|s| s.len()).sum()
    }

    pub fn label_counts(&self) -> LabelCounts {
        self.series.values().fold(LabelCounts::default(), |acc, s| {
            let c = s.label_counts();
            LabelCounts {
                healthy: acc.healthy + c.healthy,
                failing: acc.failing + c.failing,
            }
        })
    }
}
