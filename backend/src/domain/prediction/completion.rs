//! Structured-completion client used by the language-model prediction path.

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::time::Duration;
use tracing::debug;

use crate::config::PredictionConfig;

/// A service that answers a prompt with a JSON object.
///
/// Any `Err` is treated by the predictor as a failed call.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete_json(&self, system_prompt: &str, user_prompt: &str)
        -> Result<Map<String, Value>>;
}

/// Client for OpenAI-compatible `chat/completions` endpoints in JSON mode.
#[derive(Debug, Clone)]
pub struct OpenAiCompletionClient {
    api_key: Option<String>,
    base_url: String,
    model: String,
    http_client: reqwest::Client,
}

impl OpenAiCompletionClient {
    pub fn new(config: &PredictionConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to build HTTP client for completion service")?;

        Ok(Self {
            api_key: config.api_key().map(str::to_string),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            http_client,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    response_format: ResponseFormat,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[async_trait]
impl CompletionClient for OpenAiCompletionClient {
    async fn complete_json(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<Map<String, Value>> {
        let Some(api_key) = &self.api_key else {
            bail!("No API key configured for the completion service");
        };

        let request = ChatCompletionRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: user_prompt,
                },
            ],
            response_format: ResponseFormat {
                kind: "json_object",
            },
        };

        debug!("Requesting completion from {} with model {}", self.endpoint(), self.model);

        let response = self
            .http_client
            .post(self.endpoint())
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .context("Failed to send completion request")?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            bail!("Completion service error ({}): {}", status, error_text);
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .context("Failed to parse completion response")?;

        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .context("Completion response contained no message content")?;

        parse_json_object(&content)
    }
}

/// Parse model output that must be a single JSON object
pub fn parse_json_object(content: &str) -> Result<Map<String, Value>> {
    match serde_json::from_str::<Value>(content.trim()).context("Completion content is not JSON")? {
        Value::Object(fields) => Ok(fields),
        other => bail!("Completion content is not a JSON object: {}", other),
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Answers every call with the same canned object, or fails when `None`.
    pub(crate) struct StaticCompletionClient {
        response: Option<Map<String, Value>>,
        calls: AtomicUsize,
        last_user_prompt: Mutex<Option<String>>,
    }

    impl StaticCompletionClient {
        pub(crate) fn returning(response: Value) -> Self {
            let fields = match response {
                Value::Object(fields) => fields,
                other => panic!("canned response must be an object, got {}", other),
            };
            Self {
                response: Some(fields),
                calls: AtomicUsize::new(0),
                last_user_prompt: Mutex::new(None),
            }
        }

        pub(crate) fn failing() -> Self {
            Self {
                response: None,
                calls: AtomicUsize::new(0),
                last_user_prompt: Mutex::new(None),
            }
        }

        pub(crate) fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        pub(crate) fn last_user_prompt(&self) -> Option<String> {
            self.last_user_prompt.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CompletionClient for StaticCompletionClient {
        async fn complete_json(&self, _system: &str, user: &str) -> Result<Map<String, Value>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_user_prompt.lock().unwrap() = Some(user.to_string());
            match &self.response {
                Some(fields) => Ok(fields.clone()),
                None => bail!("connection refused"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::prediction::{PredictionSource, SleepPredictor};
    use axum::{
        http::{header, HeaderMap, StatusCode},
        response::IntoResponse,
        routing::post,
        Json, Router,
    };
    use chrono::{TimeZone, Utc};
    use serde_json::json;
    use std::sync::Arc;

    /// Serve `app` on an ephemeral port and return a config pointing at it
    async fn serve(app: Router) -> PredictionConfig {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        PredictionConfig {
            api_key: Some("sk-test".to_string()),
            base_url: format!("http://{}/v1", addr),
            model: "test-model".to_string(),
            timeout_secs: 1,
            ..PredictionConfig::default()
        }
    }

    fn completion_server(status: StatusCode, body: Value) -> Router {
        Router::new().route(
            "/v1/chat/completions",
            post(move || {
                let body = body.clone();
                async move { (status, Json(body)) }
            }),
        )
    }

    async fn client_for(status: StatusCode, body: Value) -> OpenAiCompletionClient {
        OpenAiCompletionClient::new(&serve(completion_server(status, body)).await).unwrap()
    }

    fn config(api_key: Option<&str>) -> PredictionConfig {
        PredictionConfig {
            api_key: api_key.map(str::to_string),
            base_url: "http://127.0.0.1:9/v1/".to_string(),
            ..PredictionConfig::default()
        }
    }

    #[test]
    fn test_parse_json_object() {
        let fields = parse_json_object(r#" {"predictedDuration": 75} "#).unwrap();
        assert_eq!(fields["predictedDuration"], 75);

        assert!(parse_json_object("[1, 2, 3]").is_err());
        assert!(parse_json_object("next sleep at 2pm").is_err());
        assert!(parse_json_object("").is_err());
    }

    #[test]
    fn test_endpoint_strips_trailing_slash() {
        let client = OpenAiCompletionClient::new(&config(Some("key"))).unwrap();
        assert_eq!(client.endpoint(), "http://127.0.0.1:9/v1/chat/completions");
    }

    #[tokio::test]
    async fn test_missing_api_key_fails_without_network() {
        let client = OpenAiCompletionClient::new(&config(None)).unwrap();
        let result = client.complete_json("system", "user").await;
        assert!(result.unwrap_err().to_string().contains("No API key"));

        let blank = OpenAiCompletionClient::new(&config(Some("  "))).unwrap();
        assert!(blank.complete_json("system", "user").await.is_err());
    }

    #[tokio::test]
    async fn test_sends_json_mode_request_with_bearer_key() {
        let app = Router::new().route(
            "/v1/chat/completions",
            post(|headers: HeaderMap, Json(request): Json<Value>| async move {
                let authorized = headers
                    .get(header::AUTHORIZATION)
                    .and_then(|v| v.to_str().ok())
                    == Some("Bearer sk-test");
                let well_formed = request["response_format"]["type"] == "json_object"
                    && request["model"] == "test-model"
                    && request["messages"][0]["role"] == "system"
                    && request["messages"][1]["content"] == "user prompt";

                if !(authorized && well_formed) {
                    return (StatusCode::BAD_REQUEST, "unexpected request").into_response();
                }
                Json(json!({
                    "choices": [{"message": {"content": "{\"predictedDuration\": 42}"}}]
                }))
                .into_response()
            }),
        );
        let client = OpenAiCompletionClient::new(&serve(app).await).unwrap();

        let fields = client.complete_json("system prompt", "user prompt").await.unwrap();

        assert_eq!(fields.len(), 1);
        assert_eq!(fields["predictedDuration"], 42);
    }

    #[tokio::test]
    async fn test_error_status_is_an_error() {
        let client = client_for(StatusCode::INTERNAL_SERVER_ERROR, json!({"error": "boom"})).await;

        let error = client.complete_json("system", "user").await.unwrap_err();
        assert!(error.to_string().contains("500"));
    }

    #[tokio::test]
    async fn test_unusable_completion_bodies_are_errors() {
        let bodies = [
            json!({"choices": []}),
            json!({"choices": [{"message": {"content": null}}]}),
            json!({"choices": [{"message": {"content": "sleep at 2pm"}}]}),
            json!({"unexpected": true}),
        ];

        for body in bodies {
            let client = client_for(StatusCode::OK, body.clone()).await;
            assert!(
                client.complete_json("system", "user").await.is_err(),
                "expected an error for {}",
                body
            );
        }
    }

    #[tokio::test]
    async fn test_slow_service_times_out() {
        let app = Router::new().route(
            "/v1/chat/completions",
            post(|| async {
                tokio::time::sleep(std::time::Duration::from_secs(3)).await;
                Json(json!({"choices": [{"message": {"content": "{}"}}]}))
            }),
        );
        let client = OpenAiCompletionClient::new(&serve(app).await).unwrap();

        assert!(client.complete_json("system", "user").await.is_err());
    }

    #[tokio::test]
    async fn test_failed_service_falls_back_to_rule_table() {
        let client = client_for(StatusCode::INTERNAL_SERVER_ERROR, json!({"error": "boom"})).await;
        let predictor = SleepPredictor::new(Arc::new(client));
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap();

        let outcome = predictor.predict(8, &[], now).await;

        assert_eq!(outcome.source, PredictionSource::RuleTable);
        assert_eq!(outcome.confidence, 0.7);
        assert_eq!(outcome.next_sleep_time, Utc.with_ymd_and_hms(2024, 3, 1, 13, 0, 0).unwrap());
        assert_eq!(outcome.predicted_duration_minutes, 90);
    }
}
