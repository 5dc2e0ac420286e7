//! # REST API for Sleep Records
//!
//! Starting a session is a POST without `endTime`; ending and rating it are
//! PATCHes against the record id.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, patch, post},
    Router,
};
use shared::{CreateSleepRecordRequest, UpdateSleepRecordRequest};
use tracing::info;

use crate::io::rest::error::{ApiError, ApiJson, ApiPath};
use crate::io::rest::mappers::sleep_record_mapper::SleepRecordMapper;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/children/:id/sleep-records", get(list_sleep_records))
        .route("/children/:id/active-sleep", get(get_active_sleep))
        .route("/sleep-records", post(create_sleep_record))
        .route("/sleep-records/:id", patch(update_sleep_record))
}

/// All sleep records for a child, most recent first
pub async fn list_sleep_records(
    State(state): State<AppState>,
    ApiPath(child_id): ApiPath<i64>,
) -> Result<Response, ApiError> {
    info!("GET /api/children/{}/sleep-records", child_id);

    let records = state.sleep_record_service.list_sleep_records(child_id).await?;
    Ok((StatusCode::OK, Json(SleepRecordMapper::to_dto_list(records))).into_response())
}

/// The running session, or `null` when the child is awake
pub async fn get_active_sleep(
    State(state): State<AppState>,
    ApiPath(child_id): ApiPath<i64>,
) -> Result<Response, ApiError> {
    info!("GET /api/children/{}/active-sleep", child_id);

    let record = state.sleep_record_service.get_active_sleep_record(child_id).await?;
    Ok((StatusCode::OK, Json(record.map(SleepRecordMapper::to_dto))).into_response())
}

pub async fn create_sleep_record(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateSleepRecordRequest>,
) -> Result<Response, ApiError> {
    info!("POST /api/sleep-records - request: {:?}", request);

    let command = SleepRecordMapper::to_create_command(request)?;
    let record = state.sleep_record_service.create_sleep_record(command).await?;

    Ok((StatusCode::CREATED, Json(SleepRecordMapper::to_dto(record))).into_response())
}

pub async fn update_sleep_record(
    State(state): State<AppState>,
    ApiPath(record_id): ApiPath<i64>,
    ApiJson(request): ApiJson<UpdateSleepRecordRequest>,
) -> Result<Response, ApiError> {
    info!("PATCH /api/sleep-records/{} - request: {:?}", record_id, request);

    let command = SleepRecordMapper::to_update_command(request)?;
    let record = state.sleep_record_service.update_sleep_record(record_id, command).await?;

    Ok((StatusCode::OK, Json(SleepRecordMapper::to_dto(record))).into_response())
}
