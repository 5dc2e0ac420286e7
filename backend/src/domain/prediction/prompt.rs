//! Prompt construction for the language-model prediction path.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use shared::SleepQuality;

use super::age_band::age_band_for;
use crate::domain::models::format_timestamp;
use crate::domain::models::sleep_record::SleepRecord;

/// A finished sleep session as shown to the model
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub start_time: String,
    pub end_time: String,
    pub duration_minutes: i64,
    pub quality: Option<SleepQuality>,
}

/// Completed sessions only, oldest first. Running sessions are left out.
pub fn completed_history(records: &[SleepRecord]) -> Vec<HistoryEntry> {
    let mut completed: Vec<&SleepRecord> = records.iter().filter(|r| r.is_completed()).collect();
    completed.sort_by_key(|r| (r.start_time, r.id));

    completed
        .into_iter()
        .filter_map(|record| {
            Some(HistoryEntry {
                start_time: format_timestamp(&record.start_time),
                end_time: format_timestamp(record.end_time.as_ref()?),
                duration_minutes: record.duration_minutes()?,
                quality: record.quality,
            })
        })
        .collect()
}

pub fn build_system_prompt(age_months: u32) -> String {
    let band = age_band_for(age_months);

    format!(
        "You are a pediatric sleep assistant that predicts when a child will next fall asleep.\n\
         The child is {age_months} months old, which is in the {label} age band.\n\
         Sleep guidance for this age: {guidance}\n\n\
         Use the child's recent sleep history and the current time to predict the start of \
         the next sleep and how long it will last.\n\
         Respond with a single JSON object with exactly these fields:\n\
         - \"nextSleepTime\": RFC 3339 timestamp of the predicted sleep start, in the future\n\
         - \"predictedDuration\": expected sleep length in whole minutes\n\
         - \"confidence\": number between 0 and 1",
        age_months = age_months,
        label = band.label,
        guidance = band.guidance,
    )
}

pub fn build_user_prompt(
    age_months: u32,
    records: &[SleepRecord],
    now: DateTime<Utc>,
) -> Result<String> {
    let history = completed_history(records);
    let history_json =
        serde_json::to_string_pretty(&history).context("Failed to serialize sleep history")?;

    Ok(format!(
        "Current time: {}\nChild age: {} months\nCompleted sleep sessions ({}):\n{}",
        format_timestamp(&now),
        age_months,
        history.len(),
        history_json,
    ))
}
