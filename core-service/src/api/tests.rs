//! End-to-end: synthesize → CSV → load → viewer commands

use chrono::{Duration, TimeZone, Utc};
use rand::{rngs::StdRng, SeedableRng};
use tempfile::tempdir;

use super::commands::*;
use crate::logic::config::SynthConfig;
use crate::logic::dataset::{self, Dataset};
use crate::logic::error::TwinError;
use crate::logic::model::{AssessmentCache, RiskTier};
use crate::logic::synth;
use crate::logic::telemetry::{Measurements, NodeId, TelemetryRecord, TelemetrySeries};

fn smoke_dataset() -> Dataset {
    let end = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
    let mut rng = StdRng::seed_from_u64(21);
    synth::generate(&SynthConfig::smoke(), end, &mut rng).unwrap()
}

#[test]
fn test_end_to_end_two_nodes_one_day() {
    let dir = tempdir().unwrap();
    let generated = smoke_dataset();
    let path = dataset::write_new_artifact(dir.path(), &generated).unwrap();
    let loaded = dataset::load_dataset(&path).unwrap();

    assert_eq!(loaded.total_rows(), 48);
    assert_eq!(list_nodes(&loaded), vec!["NODE-1000", "NODE-1001"]);
    for node in list_nodes(&loaded) {
        let series = get_node_series(&loaded, &node).unwrap();
        assert_eq!(series.len(), 24);
        assert_eq!(series.uniform_interval(), Some(Duration::minutes(60)));
    }

    // cpu 75 is a failure no matter what else happens
    let record = TelemetryRecord::new(
        NodeId::parse("NODE-1000").unwrap(),
        Utc::now(),
        Measurements {
            cpu_usage: 75.0,
            latency: 1.0,
            throughput: 1.0,
            packet_loss: 0.0,
            temperature: 0.0,
            error_rate: 0.0,
        },
    );
    assert_eq!(record.failure_label(), 1);
}

#[test]
fn test_unknown_node_is_an_error() {
    let dataset = smoke_dataset();
    assert!(matches!(get_node_series(&dataset, "NODE-4242"), Err(TwinError::UnknownNode(_))));
    assert!(matches!(get_risk_assessment(&dataset, "NODE-4242"), Err(TwinError::UnknownNode(_))));
    assert!(get_node_snapshot(&dataset, "NODE-4242").is_err());
    assert!(get_metric_trend(&dataset, "NODE-4242", Metric::CpuUsage).is_err());
}

#[test]
fn test_snapshot_shows_latest_record() {
    let dataset = smoke_dataset();
    let series = dataset.series("NODE-1001").unwrap();
    let snapshot = get_node_snapshot(&dataset, "NODE-1001").unwrap();

    assert_eq!(snapshot.timestamp, series.latest().timestamp());
    assert_eq!(snapshot.record_count, 24);
    assert_eq!(snapshot.readings.len(), 5);
    assert_eq!(snapshot.readings[0].label, "CPU Usage (%)");
    assert_eq!(
        snapshot.readings[0].display,
        format!("{:.2}", series.latest().measurements().cpu_usage)
    );
    assert_eq!(snapshot.failure_label, series.latest().failure_label());
    assert_eq!(snapshot.breaches.is_empty(), snapshot.failure_label == 0);

    // 24 rows at ~43% failure rate always hold both classes for this seed
    let assessment = snapshot.assessment.expect("both label classes present");
    assert!(snapshot.risk_error.is_none());
    assert_eq!(assessment, get_risk_assessment(&dataset, "NODE-1001").unwrap());
    assert_eq!(assessment.tier, RiskTier::from_probability(assessment.probability));
    assert_eq!(snapshot.badge_color, Some(assessment.tier.color()));
}

#[test]
fn test_snapshot_reports_scoring_failure() {
    let start = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
    let records = (0..5)
        .map(|i| {
            TelemetryRecord::new(
                NodeId::from_index(0),
                start + Duration::minutes(10 * i),
                Measurements {
                    cpu_usage: 30.0,
                    latency: 20.0,
                    throughput: 100.0,
                    packet_loss: 1.0,
                    temperature: 60.0,
                    error_rate: 0.2,
                },
            )
        })
        .collect();
    let dataset = Dataset::from_series(vec![TelemetrySeries::new(records).unwrap()]).unwrap();

    let snapshot = get_node_snapshot(&dataset, "NODE-1000").unwrap();
    assert!(snapshot.assessment.is_none());
    assert!(snapshot.risk_error.unwrap().contains("failure_label=0"));
    assert!(snapshot.badge_color.is_none());
    assert!(matches!(
        get_risk_assessment(&dataset, "NODE-1000"),
        Err(TwinError::SingleClass { .. })
    ));
}

#[test]
fn test_metric_trend() {
    let dataset = smoke_dataset();
    let series = dataset.series("NODE-1000").unwrap();

    for metric in Metric::TREND_CHARTS {
        let trend = get_metric_trend(&dataset, "NODE-1000", metric).unwrap();
        assert_eq!(trend.len(), 24);
        assert!(trend.windows(2).all(|w| w[0].timestamp < w[1].timestamp));
        assert_eq!(trend[23].value, metric.value(series.latest().measurements()));
    }
}

#[test]
fn test_metric_columns() {
    let columns: Vec<&str> = Metric::ALL.iter().map(|m| m.column()).collect();
    assert_eq!(
        columns.join(","),
        "cpu_usage,latency,throughput,packet_loss,temperature,error_rate"
    );
    assert_eq!(Metric::ErrorRate.decimals(), 3);
}

#[test]
fn test_default_node() {
    assert_eq!(default_node(&smoke_dataset()).unwrap(), "NODE-1000");

    let header_only = std::io::Cursor::new(format!("{}\n", dataset::CSV_HEADER));
    let empty = dataset::reader::read_dataset(header_only).unwrap();
    assert!(matches!(default_node(&empty), Err(TwinError::EmptyDataset)));
}

#[test]
fn test_cached_assessment_matches() {
    let dataset = smoke_dataset();
    let cache = AssessmentCache::default();

    let cached = get_risk_assessment_cached(&dataset, "NODE-1000", &cache).unwrap();
    let again = get_risk_assessment_cached(&dataset, "NODE-1000", &cache).unwrap();
    assert_eq!(cached, again);
    assert_eq!(cached, get_risk_assessment(&dataset, "NODE-1000").unwrap());
    assert_eq!(cache.stats().hits, 1);
}

#[test]
fn test_dataset_summary() {
    let dataset = smoke_dataset();
    let summary = get_dataset_summary(&dataset);

    assert_eq!(summary.node_count, 2);
    assert_eq!(summary.total_rows, 48);
    assert_eq!(summary.failing_rows, dataset.label_counts().failing);
    assert_eq!(summary.interval_minutes, Some(60));
    assert_eq!(summary.end, Some(Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()));
    assert_eq!(summary.start, Some(Utc.with_ymd_and_hms(2024, 4, 30, 13, 0, 0).unwrap()));
}
