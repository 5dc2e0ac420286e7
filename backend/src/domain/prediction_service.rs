//! Next-sleep predictions with a short-lived cache.
//!
//! A stored prediction younger than the cache window is returned as-is.
//! Otherwise the predictor runs against the child's completed sleep history
//! and the result is stored, superseding earlier predictions.

use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use std::sync::Arc;
use tracing::info;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::child::Child;
use crate::domain::models::sleep_prediction::{NewSleepPrediction, SleepPrediction};
use crate::domain::prediction::SleepPredictor;
use crate::storage::{ChildStorage, Connection, SleepPredictionStorage, SleepRecordStorage};

#[derive(Clone)]
pub struct PredictionService<C: Connection> {
    child_repository: C::ChildRepository,
    sleep_record_repository: C::SleepRecordRepository,
    prediction_repository: C::SleepPredictionRepository,
    predictor: SleepPredictor,
    cache_window: Duration,
}

impl<C: Connection> PredictionService<C> {
    pub fn new(connection: Arc<C>, predictor: SleepPredictor, cache_window: Duration) -> Self {
        Self {
            child_repository: connection.create_child_repository(),
            sleep_record_repository: connection.create_sleep_record_repository(),
            prediction_repository: connection.create_sleep_prediction_repository(),
            predictor,
            cache_window,
        }
    }

    /// Current prediction for a child, computed on demand
    pub async fn get_sleep_prediction(&self, child_id: i64) -> DomainResult<SleepPrediction> {
        self.get_sleep_prediction_at(child_id, Local::now()).await
    }

    /// Same as [`get_sleep_prediction`](Self::get_sleep_prediction) with an
    /// explicit clock. The time zone of `now` decides the local hour the rule
    /// table sees and the day used for the child's age.
    pub async fn get_sleep_prediction_at<Tz>(
        &self,
        child_id: i64,
        now: DateTime<Tz>,
    ) -> DomainResult<SleepPrediction>
    where
        Tz: TimeZone + Send + Sync,
        Tz::Offset: Send + Sync,
    {
        let child = self.find_child(child_id).await?;
        let now_utc = now.with_timezone(&Utc);

        if let Some(latest) = self.prediction_repository.get_latest_prediction(child_id).await? {
            if latest.is_fresh(now_utc, self.cache_window) {
                info!(
                    "Returning cached prediction {} for child {} (created at {})",
                    latest.id, child_id, latest.created_at
                );
                return Ok(latest);
            }
        }

        let age_months = child.age_in_months(now.date_naive());
        let records = self.sleep_record_repository.list_sleep_records(child_id).await?;
        let completed = records.iter().filter(|r| r.is_completed()).count();

        info!(
            "Predicting next sleep for child {} ({} months, {} completed sessions)",
            child_id,
            age_months,
            completed
        );

        let outcome = self.predictor.predict(age_months, &records, now).await;

        let prediction = self
            .prediction_repository
            .store_prediction(NewSleepPrediction {
                child_id,
                predicted_time: outcome.next_sleep_time,
                predicted_duration_minutes: outcome.predicted_duration_minutes,
                confidence: outcome.confidence,
                created_at: now_utc,
            })
            .await?;

        info!(
            "Stored prediction {} for child {} via {:?}",
            prediction.id, child_id, outcome.source
        );
        Ok(prediction)
    }

    async fn find_child(&self, child_id: i64) -> DomainResult<Child> {
        self.child_repository
            .get_child(child_id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Child not found: {}", child_id)))
    }
}
