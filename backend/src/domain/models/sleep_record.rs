//! backend/src/domain/models/sleep_record.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::SleepQuality;

/// One sleep session. `end_time` is `None` while the session runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SleepRecord {
    pub id: i64,
    pub child_id: i64,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub quality: Option<SleepQuality>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewSleepRecord {
    pub child_id: i64,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub quality: Option<SleepQuality>,
}

impl SleepRecord {
    pub fn is_completed(&self) -> bool {
        self.end_time.is_some()
    }

    /// Length of a finished session in whole minutes
    pub fn duration_minutes(&self) -> Option<i64> {
        self.end_time
            .map(|end| (end - self.start_time).num_minutes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_duration_minutes() {
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 13, 0, 0).unwrap();
        let mut record = SleepRecord {
            id: 1,
            child_id: 1,
            start_time: start,
            end_time: None,
            is_active: true,
            quality: None,
        };
        assert!(!record.is_completed());
        assert_eq!(record.duration_minutes(), None);

        record.end_time = Some(Utc.with_ymd_and_hms(2024, 3, 1, 14, 35, 0).unwrap());
        assert!(record.is_completed());
        assert_eq!(record.duration_minutes(), Some(95));
    }
}
