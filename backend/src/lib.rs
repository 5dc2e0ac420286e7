//! # Sleep Tracker Backend
//!
//! Everything behind the HTTP API of the sleep tracker:
//! - **Domain**: children, sleep sessions and next-sleep predictions
//! - **Storage**: the persistence traits and the in-memory store
//! - **IO**: the REST API that exposes the domain to clients
//!
//! ## Architecture
//!
//! ```text
//! Client (sleep-tracker-client)
//!     ↓
//! IO Layer (REST API, handlers)
//!     ↓
//! Domain Layer (services, prediction policy)
//!     ↓
//! Storage Layer (in-memory tables)
//! ```

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use anyhow::{Context, Result};
use axum::{
    http::{header, HeaderValue, Method},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::{AppConfig, ServerConfig};
use crate::domain::prediction::{CompletionClient, OpenAiCompletionClient, SleepPredictor};
use crate::domain::{ChildService, PredictionService, SleepRecordService};
use crate::storage::MemoryConnection;

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub child_service: ChildService<MemoryConnection>,
    pub sleep_record_service: SleepRecordService<MemoryConnection>,
    pub prediction_service: PredictionService<MemoryConnection>,
}

/// Initialize the backend with all required services
pub fn initialize_backend(config: &AppConfig) -> Result<AppState> {
    if config.prediction.api_key().is_none() {
        info!("No completion API key configured; predictions will use the rule table");
    }
    let completion_client = OpenAiCompletionClient::new(&config.prediction)?;

    initialize_backend_with_client(config, Arc::new(completion_client))
}

/// Same as [`initialize_backend`] with a caller-supplied completion client
pub fn initialize_backend_with_client(
    config: &AppConfig,
    completion_client: Arc<dyn CompletionClient>,
) -> Result<AppState> {
    let cache_window = config.prediction.cache_window()?;

    info!("Setting up in-memory store");
    let connection = Arc::new(MemoryConnection::new());

    info!("Setting up domain model");
    let child_service = ChildService::new(connection.clone());
    let sleep_record_service = SleepRecordService::new(connection.clone());
    let prediction_service = PredictionService::new(
        connection,
        SleepPredictor::new(completion_client),
        cache_window,
    );

    Ok(AppState {
        child_service,
        sleep_record_service,
        prediction_service,
    })
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState, config: &ServerConfig) -> Result<Router> {
    let origin = HeaderValue::from_str(&config.cors_origin)
        .with_context(|| format!("Invalid CORS origin: {}", config.cors_origin))?;

    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([header::CONTENT_TYPE]);

    let api_routes = Router::new()
        .merge(io::child_apis::router())
        .merge(io::sleep_record_apis::router())
        .merge(io::prediction_apis::router())
        .merge(io::logging_apis::router());

    let mut router = Router::new().nest("/api", api_routes);

    if let Some(static_dir) = &config.static_dir {
        info!("Serving client files from {}", static_dir.display());
        router = router.fallback_service(ServeDir::new(static_dir));
    }

    Ok(router
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state))
}
