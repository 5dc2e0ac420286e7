use axum::{extract::State, response::Json, routing::post, Router};
use shared::{LogEntry, LogResponse};
use tracing::{debug, error, info, warn};

use crate::io::rest::error::{ApiError, ApiJson};
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/logs", post(log_message))
}

/// Forward a client log line into the server's log output
pub async fn log_message(
    State(_state): State<AppState>,
    ApiJson(entry): ApiJson<LogEntry>,
) -> Result<Json<LogResponse>, ApiError> {
    let component = entry.component.as_deref().unwrap_or("client");
    let message = format!("[{}] {}", component, entry.message);

    match entry.level.to_lowercase().as_str() {
        "debug" => debug!("{}", message),
        "info" => info!("{}", message),
        "warn" => warn!("{}", message),
        "error" => error!("{}", message),
        _ => info!("{}", message), // unknown levels are logged as info
    }

    Ok(Json(LogResponse { success: true }))
}
