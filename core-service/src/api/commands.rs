//! Viewer Commands - API for the presentation layer
//!
//! Everything a dashboard needs: node list, series, latest snapshot,
//! trend lines and the risk assessment. Rendering stays outside.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::logic::dataset::Dataset;
use crate::logic::error::{TwinError, TwinResult};
use crate::logic::model::{self, AssessmentCache, ForestConfig, RiskAssessment};
use crate::logic::synth;
use crate::logic::telemetry::{Breach, Measurements, TelemetrySeries};

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// One measurement column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    CpuUsage,
    Latency,
    Throughput,
    PacketLoss,
    Temperature,
    ErrorRate,
}

impl Metric {
    pub const ALL: [Metric; 6] = [
        Metric::CpuUsage,
        Metric::Latency,
        Metric::Throughput,
        Metric::PacketLoss,
        Metric::Temperature,
        Metric::ErrorRate,
    ];

    /// Metrics shown in the latest-telemetry row
    pub const HEADLINE: [Metric; 5] = [
        Metric::CpuUsage,
        Metric::Latency,
        Metric::PacketLoss,
        Metric::Temperature,
        Metric::ErrorRate,
    ];

    /// Metrics charted over time
    pub const TREND_CHARTS: [Metric; 3] = [Metric::CpuUsage, Metric::Temperature, Metric::Latency];

    /// CSV column name
    pub fn column(&self) -> &'static str {
        match self {
            Metric::CpuUsage => "cpu_usage",
            Metric::Latency => "latency",
            Metric::Throughput => "throughput",
            Metric::PacketLoss => "packet_loss",
            Metric::Temperature => "temperature",
            Metric::ErrorRate => "error_rate",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Metric::CpuUsage => "CPU Usage (%)",
            Metric::Latency => "Latency (ms)",
            Metric::Throughput => "Throughput",
            Metric::PacketLoss => "Packet Loss (%)",
            Metric::Temperature => "Temperature (°C)",
            Metric::ErrorRate => "Error Rate",
        }
    }

    /// Display precision
    pub fn decimals(&self) -> usize {
        match self {
            Metric::ErrorRate => 3,
            _ => 2,
        }
    }

    pub fn value(&self, m: &Measurements) -> f64 {
        match self {
            Metric::CpuUsage => m.cpu_usage,
            Metric::Latency => m.latency,
            Metric::Throughput => m.throughput,
            Metric::PacketLoss => m.packet_loss,
            Metric::Temperature => m.temperature,
            Metric::ErrorRate => m.error_rate,
        }
    }
}

/// A formatted reading for the headline row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricReading {
    pub metric: Metric,
    pub label: String,
    pub value: f64,
    pub display: String,
}

/// Latest telemetry of a node plus its risk
#[derive(Debug, Clone, Serialize)]
pub struct NodeSnapshot {
    pub node_id: String,
    pub timestamp: DateTime<Utc>,
    pub readings: Vec<MetricReading>,
    pub measurements: Measurements,
    pub failure_label: u8,
    pub breaches: Vec<Breach>,
    pub record_count: usize,
    /// `None` when scoring failed, see `risk_error`
    pub assessment: Option<RiskAssessment>,
    pub risk_error: Option<String>,
    /// Badge color of the risk tier
    pub badge_color: Option<&'static str>,
}

/// One point of a trend chart
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
}

/// Dataset overview
#[derive(Debug, Clone, Serialize)]
pub struct DatasetSummary {
    pub node_count: usize,
    pub total_rows: usize,
    pub failing_rows: usize,
    pub failure_rate: f64,
    pub expected_failure_rate: f64,
    /// Sampling interval shared by every series, if there is one
    pub interval_minutes: Option<i64>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

// ============================================================================
// COMMANDS
// ============================================================================

/// Distinct node ids present in the dataset
pub fn list_nodes(dataset: &Dataset) -> Vec<String> {
    dataset.node_ids().iter().map(|id| id.to_string()).collect()
}

/// First node in numeric order, what a node selector shows initially
pub fn default_node(dataset: &Dataset) -> TwinResult<String> {
    if dataset.is_empty() {
        return Err(TwinError::EmptyDataset);
    }
    Ok(list_nodes(dataset).swap_remove(0))
}

/// Full series of one node
pub fn get_node_series<'a>(dataset: &'a Dataset, node_id: &str) -> TwinResult<&'a TelemetrySeries> {
    dataset.series(node_id)
}

/// Retrain and score the node's latest record
pub fn get_risk_assessment(dataset: &Dataset, node_id: &str) -> TwinResult<RiskAssessment> {
    model::assess(dataset.series(node_id)?)
}

/// Same as `get_risk_assessment`, memoized in the caller's cache
pub fn get_risk_assessment_cached(
    dataset: &Dataset,
    node_id: &str,
    cache: &AssessmentCache,
) -> TwinResult<RiskAssessment> {
    cache.get_or_assess(dataset.series(node_id)?, &ForestConfig::default())
}

/// Latest readings + risk. Scoring errors are reported in the snapshot.
pub fn get_node_snapshot(dataset: &Dataset, node_id: &str) -> TwinResult<NodeSnapshot> {
    let series = dataset.series(node_id)?;
    let latest = series.latest();
    let m = latest.measurements();

    let readings = Metric::HEADLINE
        .iter()
        .map(|metric| {
            let value = metric.value(m);
            MetricReading {
                metric: *metric,
                label: metric.label().to_string(),
                value,
                display: format!("{:.*}", metric.decimals(), value),
            }
        })
        .collect();

    let (assessment, risk_error) = match model::assess(series) {
        Ok(a) => (Some(a), None),
        Err(e) => {
            log::warn!("Risk scoring failed for {}: {}", node_id, e);
            (None, Some(e.to_string()))
        }
    };

    let badge_color = assessment.as_ref().map(|a| a.tier.color());

    Ok(NodeSnapshot {
        node_id: series.node_id().to_string(),
        timestamp: latest.timestamp(),
        readings,
        measurements: *m,
        failure_label: latest.failure_label(),
        breaches: m.breaches(),
        record_count: series.len(),
        assessment,
        risk_error,
        badge_color,
    })
}

/// Time series of one metric, oldest first
pub fn get_metric_trend(dataset: &Dataset, node_id: &str, metric: Metric) -> TwinResult<Vec<TrendPoint>> {
    let series = dataset.series(node_id)?;
    Ok(series
        .iter()
        .map(|r| TrendPoint {
            timestamp: r.timestamp(),
            value: metric.value(r.measurements()),
        })
        .collect())
}

pub fn get_dataset_summary(dataset: &Dataset) -> DatasetSummary {
    let counts = dataset.label_counts();
    let mut intervals = dataset.iter().map(|s| s.uniform_interval());
    let interval_minutes = match intervals.next().flatten() {
        Some(first) if intervals.all(|i| i == Some(first)) => Some(first.num_minutes()),
        _ => None,
    };

    DatasetSummary {
        node_count: dataset.node_count(),
        total_rows: dataset.total_rows(),
        failing_rows: counts.failing,
        failure_rate: counts.failure_rate(),
        expected_failure_rate: synth::expected_failure_rate(),
        interval_minutes,
        start: dataset.iter().map(|s| s.first().timestamp()).min(),
        end: dataset.iter().map(|s| s.latest().timestamp()).max(),
    }
}
