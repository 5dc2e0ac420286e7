//! backend/src/io/rest/mappers/prediction_mapper.rs

use shared::SleepPrediction as SharedSleepPrediction;

use super::format_timestamp;
use crate::domain::models::sleep_prediction::SleepPrediction as DomainSleepPrediction;

pub struct PredictionMapper;

impl PredictionMapper {
    pub fn to_dto(domain: DomainSleepPrediction) -> SharedSleepPrediction {
        SharedSleepPrediction {
            id: domain.id,
            child_id: domain.child_id,
            predicted_time: format_timestamp(&domain.predicted_time),
            predicted_duration: domain.predicted_duration_minutes,
            confidence: domain.confidence,
            created_at: format_timestamp(&domain.created_at),
        }
    }
}
