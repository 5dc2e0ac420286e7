use anyhow::Result;
use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{info, warn};

use super::completion::CompletionClient;
use super::fallback::fallback_prediction;
use super::prompt::{build_system_prompt, build_user_prompt};
use super::{PredictionOutcome, PredictionSource};
use crate::domain::models::sleep_record::SleepRecord;

/// Used when the model answers but leaves a field out
pub const DEFAULT_LEAD_HOURS: i64 = 2;
pub const DEFAULT_DURATION_MINUTES: i64 = 90;
pub const DEFAULT_CONFIDENCE: f64 = 0.5;

/// Predicts a child's next sleep, preferring the language model and falling
/// back to the time-of-day rule table when the call fails.
#[derive(Clone)]
pub struct SleepPredictor {
    completion_client: Arc<dyn CompletionClient>,
}

impl SleepPredictor {
    pub fn new(completion_client: Arc<dyn CompletionClient>) -> Self {
        Self { completion_client }
    }

    /// Always produces a usable prediction. A single failed completion call
    /// switches straight to the rule table; nothing is retried.
    pub async fn predict<Tz>(
        &self,
        age_months: u32,
        history: &[SleepRecord],
        now: DateTime<Tz>,
    ) -> PredictionOutcome
    where
        Tz: TimeZone + Send + Sync,
        Tz::Offset: Send + Sync,
    {
        let now_utc = now.with_timezone(&Utc);

        match self.request_prediction(age_months, history, now_utc).await {
            Ok(outcome) => {
                info!(
                    "Language model predicted sleep at {} for {} minutes (confidence {:.2})",
                    outcome.next_sleep_time, outcome.predicted_duration_minutes, outcome.confidence
                );
                outcome
            }
            Err(e) => {
                warn!("Completion call failed, using rule-based prediction: {:#}", e);
                fallback_prediction(&now)
            }
        }
    }

    async fn request_prediction(
        &self,
        age_months: u32,
        history: &[SleepRecord],
        now: DateTime<Utc>,
    ) -> Result<PredictionOutcome> {
        let system_prompt = build_system_prompt(age_months);
        let user_prompt = build_user_prompt(age_months, history, now)?;

        let fields = self
            .completion_client
            .complete_json(&system_prompt, &user_prompt)
            .await?;

        Ok(interpret_response(&fields, now))
    }
}

/// Read the model's answer field by field, substituting defaults for
/// anything missing or unusable.
pub fn interpret_response(fields: &Map<String, Value>, now: DateTime<Utc>) -> PredictionOutcome {
    let next_sleep_time = fields
        .get("nextSleepTime")
        .and_then(Value::as_str)
        .and_then(|s| DateTime::parse_from_rfc3339(s.trim()).ok())
        .map(|t| t.with_timezone(&Utc))
        .unwrap_or_else(|| now + Duration::hours(DEFAULT_LEAD_HOURS));

    let predicted_duration_minutes = fields
        .get("predictedDuration")
        .and_then(|v| v.as_i64().or_else(|| v.as_f64().map(|f| f.round() as i64)))
        .filter(|minutes| *minutes > 0)
        .unwrap_or(DEFAULT_DURATION_MINUTES);

    let confidence = fields
        .get("confidence")
        .and_then(Value::as_f64)
        .filter(|c| c.is_finite())
        .map(|c| c.clamp(0.0, 1.0))
        .unwrap_or(DEFAULT_CONFIDENCE);

    PredictionOutcome {
        next_sleep_time,
        predicted_duration_minutes,
        confidence,
        source: PredictionSource::LanguageModel,
    }
}
