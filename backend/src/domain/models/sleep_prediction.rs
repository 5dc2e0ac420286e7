//! backend/src/domain/models/sleep_prediction.rs

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// A stored next-sleep prediction. Never updated; newer rows supersede it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SleepPrediction {
    pub id: i64,
    pub child_id: i64,
    pub predicted_time: DateTime<Utc>,
    pub predicted_duration_minutes: i64,
    pub confidence: f64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewSleepPrediction {
    pub child_id: i64,
    pub predicted_time: DateTime<Utc>,
    pub predicted_duration_minutes: i64,
    pub confidence: f64,
    pub created_at: DateTime<Utc>,
}

impl SleepPrediction {
    /// True while the prediction is younger than `max_age`
    pub fn is_fresh(&self, now: DateTime<Utc>, max_age: Duration) -> bool {
        now - self.created_at < max_age
    }
}
