//! # REST API for Child Management
//!
//! Endpoints for creating, retrieving, updating, and deleting children.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use shared::{CreateChildRequest, UpdateChildRequest};
use tracing::info;

use crate::io::rest::error::{ApiError, ApiJson, ApiPath};
use crate::io::rest::mappers::child_mapper::ChildMapper;
use crate::AppState;

/// Child routes, nested under `/api`
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/children", get(list_children).post(create_child))
        .route(
            "/children/:id",
            get(get_child).put(update_child).delete(delete_child),
        )
}

/// Create a new child
pub async fn create_child(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateChildRequest>,
) -> Result<Response, ApiError> {
    info!("POST /api/children - request: {:?}", request);

    let command = ChildMapper::to_create_command(request)?;
    let child = state.child_service.create_child(command).await?;

    Ok((StatusCode::CREATED, Json(ChildMapper::to_dto(child))).into_response())
}

/// Get a child by ID
pub async fn get_child(
    State(state): State<AppState>,
    ApiPath(child_id): ApiPath<i64>,
) -> Result<Response, ApiError> {
    info!("GET /api/children/{}", child_id);

    let child = state.child_service.get_child(child_id).await?;
    Ok((StatusCode::OK, Json(ChildMapper::to_dto(child))).into_response())
}

/// List all children
pub async fn list_children(State(state): State<AppState>) -> Result<Response, ApiError> {
    info!("GET /api/children");

    let children = state.child_service.list_children().await?;
    Ok((StatusCode::OK, Json(ChildMapper::to_dto_list(children))).into_response())
}

/// Update a child
pub async fn update_child(
    State(state): State<AppState>,
    ApiPath(child_id): ApiPath<i64>,
    ApiJson(request): ApiJson<UpdateChildRequest>,
) -> Result<Response, ApiError> {
    info!("PUT /api/children/{} - request: {:?}", child_id, request);

    let command = ChildMapper::to_update_command(request)?;
    let child = state.child_service.update_child(child_id, command).await?;

    Ok((StatusCode::OK, Json(ChildMapper::to_dto(child))).into_response())
}

/// Delete a child
pub async fn delete_child(
    State(state): State<AppState>,
    ApiPath(child_id): ApiPath<i64>,
) -> Result<Response, ApiError> {
    info!("DELETE /api/children/{}", child_id);

    state.child_service.delete_child(child_id).await?;
    Ok(StatusCode::NO_CONTENT.into_response())
}
