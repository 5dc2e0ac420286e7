pub mod child;
pub mod sleep_prediction;
pub mod sleep_record;
pub mod user;

use chrono::{DateTime, SecondsFormat, Utc};

/// Timestamp form used on the wire and in prompts: UTC, milliseconds, `Z`.
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}
