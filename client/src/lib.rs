//! # Sleep Tracker Client
//!
//! Typed access to the sleep tracker REST API, covering the flows of the
//! tracking screens: adding a child, starting and ending a sleep session,
//! rating it, and viewing the next-sleep prediction.
//!
//! Every method is a single request. Nothing is cached or retried; callers
//! refetch after a mutation.

use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared::{
    Child, CreateChildRequest, CreateSleepRecordRequest, ErrorResponse, LogEntry, LogResponse,
    SleepPrediction, SleepQuality, SleepRecord, UpdateChildRequest, UpdateSleepRecordRequest,
};
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The request never produced a usable response
    #[error("Network error: {0}")]
    Http(#[from] reqwest::Error),
    /// The server answered with a non-success status
    #[error("Server returned {status}: {message}")]
    Api { status: StatusCode, message: String },
}

impl ClientError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Http(e) => e.status(),
            ClientError::Api { status, .. } => Some(*status),
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }
}

pub type ClientResult<T> = Result<T, ClientError>;

/// API client for communicating with the backend server
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http_client: reqwest::Client,
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ApiClient {
    /// Create a new API client with the default base URL
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Create a new API client with a custom base URL
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http_client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // Children

    pub async fn list_children(&self) -> ClientResult<Vec<Child>> {
        self.send(Method::GET, "/api/children", None::<&()>).await
    }

    pub async fn get_child(&self, child_id: i64) -> ClientResult<Child> {
        self.send(Method::GET, &format!("/api/children/{}", child_id), None::<&()>)
            .await
    }

    /// The "add child" form
    pub async fn add_child(&self, request: &CreateChildRequest) -> ClientResult<Child> {
        self.send(Method::POST, "/api/children", Some(request)).await
    }

    pub async fn update_child(&self, child_id: i64, request: &UpdateChildRequest) -> ClientResult<Child> {
        self.send(Method::PUT, &format!("/api/children/{}", child_id), Some(request))
            .await
    }

    pub async fn delete_child(&self, child_id: i64) -> ClientResult<()> {
        let response = self
            .request(Method::DELETE, &format!("/api/children/{}", child_id), None::<&()>)
            .await?;
        Self::check(response).await.map(|_| ())
    }

    // Sleep records

    pub async fn list_sleep_records(&self, child_id: i64) -> ClientResult<Vec<SleepRecord>> {
        self.send(
            Method::GET,
            &format!("/api/children/{}/sleep-records", child_id),
            None::<&()>,
        )
        .await
    }

    /// The running session, `None` while the child is awake
    pub async fn get_active_sleep(&self, child_id: i64) -> ClientResult<Option<SleepRecord>> {
        self.send(
            Method::GET,
            &format!("/api/children/{}/active-sleep", child_id),
            None::<&()>,
        )
        .await
    }

    pub async fn create_sleep_record(&self, request: &CreateSleepRecordRequest) -> ClientResult<SleepRecord> {
        self.send(Method::POST, "/api/sleep-records", Some(request)).await
    }

    pub async fn update_sleep_record(
        &self,
        record_id: i64,
        request: &UpdateSleepRecordRequest,
    ) -> ClientResult<SleepRecord> {
        self.send(
            Method::PATCH,
            &format!("/api/sleep-records/{}", record_id),
            Some(request),
        )
        .await
    }

    /// Start tracking a sleep session at `start_time`
    pub async fn start_sleep(&self, child_id: i64, start_time: DateTime<Utc>) -> ClientResult<SleepRecord> {
        self.create_sleep_record(&CreateSleepRecordRequest {
            child_id,
            start_time: format_timestamp(&start_time),
            end_time: None,
            is_active: Some(true),
            quality: None,
        })
        .await
    }

    /// End a running session at `end_time`
    pub async fn end_sleep(&self, record_id: i64, end_time: DateTime<Utc>) -> ClientResult<SleepRecord> {
        self.update_sleep_record(
            record_id,
            &UpdateSleepRecordRequest {
                end_time: Some(format_timestamp(&end_time)),
                is_active: Some(false),
                quality: None,
            },
        )
        .await
    }

    pub async fn rate_sleep(&self, record_id: i64, quality: SleepQuality) -> ClientResult<SleepRecord> {
        self.update_sleep_record(
            record_id,
            &UpdateSleepRecordRequest {
                quality: Some(quality),
                ..Default::default()
            },
        )
        .await
    }

    // Predictions

    pub async fn get_sleep_prediction(&self, child_id: i64) -> ClientResult<SleepPrediction> {
        self.send(
            Method::GET,
            &format!("/api/children/{}/sleep-prediction", child_id),
            None::<&()>,
        )
        .await
    }

    /// Forward a log line to the server's log output
    pub async fn log(&self, level: &str, message: &str, component: Option<&str>) -> ClientResult<bool> {
        let entry = LogEntry {
            level: level.to_string(),
            message: message.to_string(),
            component: component.map(str::to_string),
        };
        let response: LogResponse = self.send(Method::POST, "/api/logs", Some(&entry)).await?;
        Ok(response.success)
    }

    async fn send<B, T>(&self, method: Method, path: &str, body: Option<&B>) -> ClientResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.request(method, path, body).await?;
        let response = Self::check(response).await?;
        Ok(response.json::<T>().await?)
    }

    async fn request<B>(&self, method: Method, path: &str, body: Option<&B>) -> ClientResult<reqwest::Response>
    where
        B: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!("{} {}", method, url);

        let mut builder = self.http_client.request(method, url);
        if let Some(body) = body {
            builder = builder.json(body);
        }
        Ok(builder.send().await?)
    }

    /// Turn a non-success status into [`ClientError::Api`], using the
    /// server's `{"message"}` body when it has one.
    async fn check(response: reqwest::Response) -> ClientResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorResponse>(&text)
            .map(|e| e.message)
            .unwrap_or(text);

        Err(ClientError::Api { status, message })
    }
}

/// Matches the server's timestamp form: UTC, milliseconds, `Z`.
fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_dropped() {
        let client = ApiClient::with_base_url("http://127.0.0.1:3000/");
        assert_eq!(client.base_url(), "http://127.0.0.1:3000");
        assert_eq!(ApiClient::new().base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_format_timestamp_matches_server_form() {
        let timestamp = DateTime::parse_from_rfc3339("2024-03-01T14:30:00+02:00")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(format_timestamp(&timestamp), "2024-03-01T12:30:00.000Z");
    }

    #[test]
    fn test_api_error_status() {
        let error = ClientError::Api {
            status: StatusCode::NOT_FOUND,
            message: "Child not found: 3".to_string(),
        };
        assert!(error.is_not_found());
        assert_eq!(error.to_string(), "Server returned 404 Not Found: Child not found: 3");
    }
}
