//! Conversions between the `shared` wire DTOs and domain types.
//!
//! Dates and timestamps travel as strings; parsing them is the mappers' job
//! and a malformed value is reported as a validation error.

pub mod child_mapper;
pub mod prediction_mapper;
pub mod sleep_record_mapper;

use chrono::{DateTime, NaiveDate, Utc};

pub(crate) use crate::domain::models::format_timestamp;
use crate::domain::{DomainError, DomainResult};

pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

pub(crate) fn parse_date(field: &str, value: &str) -> DomainResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| {
        DomainError::validation(format!("Invalid {}: expected YYYY-MM-DD, got '{}'", field, value))
    })
}

pub(crate) fn parse_timestamp(field: &str, value: &str) -> DomainResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value.trim())
        .map(|t| t.with_timezone(&Utc))
        .map_err(|_| {
            DomainError::validation(format!(
                "Invalid {}: expected an RFC 3339 timestamp, got '{}'",
                field, value
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_timestamp_normalizes_to_utc() {
        let parsed = parse_timestamp("startTime", "2024-03-01T14:30:00+02:00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap());
        assert_eq!(format_timestamp(&parsed), "2024-03-01T12:30:00.000Z");
    }

    #[test]
    fn test_parse_errors_are_validation_errors() {
        assert!(matches!(parse_timestamp("startTime", "yesterday"), Err(DomainError::Validation(_))));
        assert!(matches!(parse_date("birthDate", "01/15/2024"), Err(DomainError::Validation(_))));
        assert!(matches!(parse_date("birthDate", "2024-02-30"), Err(DomainError::Validation(_))));
    }
}
