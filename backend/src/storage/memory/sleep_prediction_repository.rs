use anyhow::Result;
use async_trait::async_trait;
use tracing::info;

use super::connection::MemoryConnection;
use crate::domain::models::sleep_prediction::{NewSleepPrediction, SleepPrediction};
use crate::storage::traits::SleepPredictionStorage;

/// In-memory sleep prediction repository
#[derive(Clone)]
pub struct MemorySleepPredictionRepository {
    connection: MemoryConnection,
}

impl MemorySleepPredictionRepository {
    pub fn new(connection: MemoryConnection) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl SleepPredictionStorage for MemorySleepPredictionRepository {
    async fn store_prediction(&self, prediction: NewSleepPrediction) -> Result<SleepPrediction> {
        let stored = self.connection.with_tables(|tables| {
            let prediction = SleepPrediction {
                id: tables.prediction_ids.next_id(),
                child_id: prediction.child_id,
                predicted_time: prediction.predicted_time,
                predicted_duration_minutes: prediction.predicted_duration_minutes,
                confidence: prediction.confidence,
                created_at: prediction.created_at,
            };
            tables.predictions.insert(prediction.id, prediction.clone());
            prediction
        })?;

        info!("Stored prediction {} for child {}", stored.id, stored.child_id);
        Ok(stored)
    }

    async fn get_latest_prediction(&self, child_id: i64) -> Result<Option<SleepPrediction>> {
        self.connection.with_tables(|tables| {
            tables
                .predictions
                .values()
                .filter(|prediction| prediction.child_id == child_id)
                .max_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)))
                .cloned()
        })
    }
}
