use chrono::{Duration, TimeZone, Utc};

use super::*;
use crate::logic::error::TwinError;

fn record(node: u32, minute: i64, cpu: f64) -> TelemetryRecord {
    let ts = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap() + Duration::minutes(minute);
    TelemetryRecord::new(
        NodeId::from_index(node),
        ts,
        Measurements {
            cpu_usage: cpu,
            latency: 20.0,
            throughput: 100.0,
            packet_loss: 1.0,
            temperature: 60.0,
            error_rate: 0.2,
        },
    )
}

#[test]
fn test_series_sorts_records() {
    let series = TelemetrySeries::new(vec![
        record(0, 20, 3.0),
        record(0, 0, 1.0),
        record(0, 10, 2.0),
    ])
    .unwrap();

    let cpus: Vec<f64> = series.iter().map(|r| r.measurements().cpu_usage).collect();
    assert_eq!(cpus, vec![1.0, 2.0, 3.0]);
    assert_eq!(series.latest().measurements().cpu_usage, 3.0);
    assert_eq!(series.uniform_interval(), Some(Duration::minutes(10)));
}

#[test]
fn test_series_rejects_empty() {
    assert!(matches!(TelemetrySeries::new(vec![]), Err(TwinError::EmptySeries)));
}

#[test]
fn test_series_rejects_mixed_nodes() {
    let err = TelemetrySeries::new(vec![record(0, 0, 1.0), record(1, 10, 1.0)]).unwrap_err();
    assert!(matches!(err, TwinError::MixedNodes { .. }));
}

#[test]
fn test_series_rejects_duplicate_timestamps() {
    let err = TelemetrySeries::new(vec![record(0, 0, 1.0), record(0, 0, 2.0)]).unwrap_err();
    assert!(matches!(err, TwinError::DuplicateTimestamp { .. }));
}

#[test]
fn test_label_counts() {
    let series = TelemetrySeries::new(vec![
        record(0, 0, 10.0),
        record(0, 10, 90.0),
        record(0, 20, 10.0),
        record(0, 30, 71.0),
    ])
    .unwrap();

    let counts = series.label_counts();
    assert_eq!(counts.healthy, 2);
    assert_eq!(counts.failing, 2);
    assert!(counts.is_mixed());
    assert_eq!(counts.failure_rate(), 0.5);
}

#[test]
fn test_digest_ignores_input_order() {
    let a = TelemetrySeries::new(vec![record(0, 0, 1.0), record(0, 10, 2.0)]).unwrap();
    let b = TelemetrySeries::new(vec![record(0, 10, 2.0), record(0, 0, 1.0)]).unwrap();
    let c = TelemetrySeries::new(vec![record(0, 0, 1.0), record(0, 10, 2.5)]).unwrap();

    assert_eq!(a.digest(), b.digest());
    assert_ne!(a.digest(), c.digest());
    assert_eq!(a.digest().len(), 64);
}

#[test]
fn test_irregular_interval() {
    let series = TelemetrySeries::new(vec![
        record(0, 0, 1.0),
        record(0, 10, 1.0),
        record(0, 25, 1.0),
    ])
    .unwrap();
    assert_eq!(series.uniform_interval(), None);
}
