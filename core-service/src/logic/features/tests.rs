//! Integration Tests for Feature Engineering
//!
//! Extractors combined over a real series.

#[cfg(test)]
mod integration_tests {
    use chrono::{Duration, TimeZone, Utc};

    use crate::logic::features::{
        engineer, engineer_with_window,
        layout::{IDX_CPU_USAGE, IDX_DAYOFWEEK, IDX_HOUR, IDX_PACKET_LOSS, IDX_ROLLING_AVG_CPU},
        FeatureMatrix, FEATURE_COUNT,
    };
    use crate::logic::telemetry::{Measurements, NodeId, TelemetryRecord, TelemetrySeries};

    fn series_with_cpu(cpus: &[f64]) -> TelemetrySeries {
        // Sunday 22:00 UTC, hourly
        let start = Utc.with_ymd_and_hms(2024, 5, 5, 22, 0, 0).unwrap();
        let records = cpus
            .iter()
            .enumerate()
            .map(|(i, cpu)| {
                TelemetryRecord::new(
                    NodeId::from_index(0),
                    start + Duration::hours(i as i64),
                    Measurements {
                        cpu_usage: *cpu,
                        latency: 20.0,
                        throughput: 100.0,
                        packet_loss: i as f64,
                        temperature: 60.0,
                        error_rate: 0.1,
                    },
                )
            })
            .collect();
        TelemetrySeries::new(records).unwrap()
    }

    #[test]
    fn test_rolling_average_trails_six_records() {
        let cpus = [10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0, 80.0];
        let vectors = engineer(&series_with_cpu(&cpus));

        assert_eq!(vectors[0].values[IDX_ROLLING_AVG_CPU], 10.0);
        assert_eq!(vectors[1].values[IDX_ROLLING_AVG_CPU], 15.0);
        assert_eq!(vectors[5].values[IDX_ROLLING_AVG_CPU], 35.0);
        // (30 + 40 + 50 + 60 + 70 + 80) / 6
        assert_eq!(vectors[7].values[IDX_ROLLING_AVG_CPU], 55.0);
    }

    #[test]
    fn test_raw_and_calendar_features() {
        let vectors = engineer(&series_with_cpu(&[12.5, 13.5, 14.5]));

        assert_eq!(vectors[2].values[IDX_CPU_USAGE], 14.5);
        assert_eq!(vectors[2].values[IDX_PACKET_LOSS], 2.0);

        // 22:00 and 23:00 Sunday, then 00:00 Monday
        assert_eq!((vectors[0].values[IDX_HOUR], vectors[0].values[IDX_DAYOFWEEK]), (22.0, 6.0));
        assert_eq!((vectors[1].values[IDX_HOUR], vectors[1].values[IDX_DAYOFWEEK]), (23.0, 6.0));
        assert_eq!((vectors[2].values[IDX_HOUR], vectors[2].values[IDX_DAYOFWEEK]), (0.0, 0.0));
    }

    #[test]
    fn test_custom_window() {
        let vectors = engineer_with_window(&series_with_cpu(&[10.0, 20.0, 30.0]), 2);
        assert_eq!(vectors[2].values[IDX_ROLLING_AVG_CPU], 25.0);
    }

    #[test]
    fn test_matrix_shape_and_labels() {
        // packet_loss = index, so rows 4.. breach the 3.0 threshold
        let series = series_with_cpu(&[30.0; 6]);
        let matrix = FeatureMatrix::from_series(&series).unwrap();

        assert_eq!(matrix.n_rows(), 6);
        assert_eq!(matrix.rows().ncols(), FEATURE_COUNT);
        assert_eq!(matrix.labels(), &[0, 0, 0, 0, 1, 1]);
        assert_eq!(matrix.rows()[[5, IDX_PACKET_LOSS]], 5.0);
        assert_eq!(matrix.latest(), &engineer(&series)[5]);
    }

    #[test]
    fn test_features_ignore_input_order() {
        let series = series_with_cpu(&[5.0, 15.0, 25.0, 35.0]);
        let mut shuffled = series.records().to_vec();
        shuffled.reverse();
        let rebuilt = TelemetrySeries::new(shuffled).unwrap();

        assert_eq!(engineer(&series), engineer(&rebuilt));
    }
}
