//! Calendar Feature Extraction
//!
//! Hour of day and day of week, both in UTC.

use chrono::{DateTime, Datelike, Timelike, Utc};

use super::layout::{IDX_DAYOFWEEK, IDX_HOUR};
use super::vector::{FeatureExtractor, FeatureVector};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarFeatures {
    /// 0-23
    pub hour: u32,
    /// Monday = 0 .. Sunday = 6
    pub dayofweek: u32,
}

impl CalendarFeatures {
    pub fn from_timestamp(ts: DateTime<Utc>) -> Self {
        Self {
            hour: ts.hour(),
            dayofweek: ts.weekday().num_days_from_monday(),
        }
    }
}

impl FeatureExtractor for CalendarFeatures {
    fn extract(&self, vector: &mut FeatureVector) {
        vector.values[IDX_HOUR] = self.hour as f64;
        vector.values[IDX_DAYOFWEEK] = self.dayofweek as f64;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_monday_is_zero() {
        // 2024-04-29 was a Monday
        let ts = Utc.with_ymd_and_hms(2024, 4, 29, 23, 59, 0).unwrap();
        let cal = CalendarFeatures::from_timestamp(ts);
        assert_eq!(cal.hour, 23);
        assert_eq!(cal.dayofweek, 0);
    }

    #[test]
    fn test_sunday_is_six() {
        let ts = Utc.with_ymd_and_hms(2024, 5, 5, 0, 10, 0).unwrap();
        let cal = CalendarFeatures::from_timestamp(ts);
        assert_eq!(cal.hour, 0);
        assert_eq!(cal.dayofweek, 6);
    }
}
