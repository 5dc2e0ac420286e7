//! # REST API for Sleep Predictions

use axum::{
    extract::State,
    response::Json,
    routing::get,
    Router,
};
use shared::SleepPrediction;
use tracing::info;

use crate::io::rest::error::{ApiError, ApiPath};
use crate::io::rest::mappers::prediction_mapper::PredictionMapper;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/children/:id/sleep-prediction", get(get_sleep_prediction))
}

/// Next predicted sleep for a child. May call out to the completion service,
/// but never fails because of it.
pub async fn get_sleep_prediction(
    State(state): State<AppState>,
    ApiPath(child_id): ApiPath<i64>,
) -> Result<Json<SleepPrediction>, ApiError> {
    info!("GET /api/children/{}/sleep-prediction", child_id);

    let prediction = state.prediction_service.get_sleep_prediction(child_id).await?;
    Ok(Json(PredictionMapper::to_dto(prediction)))
}
