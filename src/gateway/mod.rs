//! Outbound LLM backends behind one `complete` capability.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::StatusCode;
use thiserror::Error;

use crate::config::{Backend, LlmConfig};

pub mod demo;
pub mod gemini;
pub mod openai;

pub use demo::DemoGateway;
pub use gemini::GeminiClient;
pub use openai::OpenAiClient;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("network error: {0}")]
    Network(String),
    #[error("request timed out")]
    Timeout,
    #[error("authentication failed (status {0})")]
    Unauthorized(StatusCode),
    #[error("rate limited by provider")]
    RateLimited,
    #[error("provider returned status={status} body={}", preview(.body, 200))]
    Api { status: StatusCode, body: String },
    #[error("could not decode provider response: {0}")]
    Decode(String),
    #[error("provider response contained no text")]
    EmptyResponse,
}

impl GatewayError {
    pub fn from_status(status: StatusCode, body: String) -> Self {
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => GatewayError::Unauthorized(status),
            StatusCode::TOO_MANY_REQUESTS => GatewayError::RateLimited,
            _ => GatewayError::Api { status, body },
        }
    }
}

/// The request URL is stripped so provider credentials never reach error text.
impl From<reqwest::Error> for GatewayError {
    fn from(e: reqwest::Error) -> Self {
        let e = e.without_url();
        if e.is_timeout() {
            GatewayError::Timeout
        } else if e.is_decode() {
            GatewayError::Decode(e.to_string())
        } else {
            GatewayError::Network(e.to_string())
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompletionOptions {
    /// Overrides the backend's configured model.
    pub model: Option<String>,
    pub temperature: f32,
    /// Ask the backend to constrain output to a JSON object.
    pub json_output: bool,
}

impl Default for CompletionOptions {
    fn default() -> Self {
        Self { model: None, temperature: 0.7, json_output: true }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub system: Option<String>,
    pub prompt: String,
    pub options: CompletionOptions,
}

#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Short backend name for logs.
    fn name(&self) -> &'static str;

    async fn complete(&self, request: &CompletionRequest) -> Result<String, GatewayError>;
}

/// Picks the backend named in the config. Without an API key the demo
/// gateway is returned so the service still runs locally.
pub fn from_config(config: &LlmConfig) -> Result<Arc<dyn LlmGateway>, GatewayError> {
    let Some(api_key) = config.api_key.clone() else {
        tracing::warn!(backend = ?config.backend, "No LLM API key configured, using demo responses");
        return Ok(Arc::new(DemoGateway));
    };
    let gateway: Arc<dyn LlmGateway> = match config.backend {
        Backend::Gemini => Arc::new(GeminiClient::new(api_key, config.base_url.clone(), config.model.clone(), config.timeout)?),
        Backend::OpenAi => Arc::new(OpenAiClient::new(api_key, config.base_url.clone(), config.model.clone(), config.timeout)?),
    };
    tracing::info!(backend = gateway.name(), model = %config.model, "LLM gateway ready");
    Ok(gateway)
}

/// First `max` characters of `s`, for log previews.
pub(crate) fn preview(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => format!("{}...[{} chars]", &s[..idx], s.chars().count()),
        None => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn status_classification() {
        assert!(matches!(GatewayError::from_status(StatusCode::UNAUTHORIZED, String::new()), GatewayError::Unauthorized(_)));
        assert!(matches!(GatewayError::from_status(StatusCode::FORBIDDEN, String::new()), GatewayError::Unauthorized(_)));
        assert!(matches!(GatewayError::from_status(StatusCode::TOO_MANY_REQUESTS, String::new()), GatewayError::RateLimited));
        match GatewayError::from_status(StatusCode::BAD_GATEWAY, "upstream".into()) {
            GatewayError::Api { status, body } => {
                assert_eq!(status, StatusCode::BAD_GATEWAY);
                assert_eq!(body, "upstream");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn api_error_display_truncates_body() {
        let err = GatewayError::from_status(StatusCode::INTERNAL_SERVER_ERROR, "x".repeat(5000));
        let message = err.to_string();
        assert!(message.starts_with("provider returned status=500 Internal Server Error body=xxx"));
        assert!(message.ends_with("...[5000 chars]"));
        assert!(message.len() < 300);
    }

    #[test]
    fn preview_truncates_on_char_boundary() {
        assert_eq!(preview("short", 10), "short");
        assert_eq!(preview("ãããããã", 2), "ãã...[6 chars]");
    }

    #[test]
    fn missing_key_selects_demo_gateway() {
        let config = LlmConfig {
            backend: Backend::OpenAi,
            api_key: None,
            base_url: "http://localhost".into(),
            model: "gpt-4o".into(),
            timeout: Duration::from_secs(5),
        };
        assert_eq!(from_config(&config).unwrap().name(), "demo");
    }

    #[test]
    fn configured_key_selects_named_backend() {
        let mut config = LlmConfig {
            backend: Backend::Gemini,
            api_key: Some("k".into()),
            base_url: "http://localhost".into(),
            model: "gemini-1.5-flash".into(),
            timeout: Duration::from_secs(5),
        };
        assert_eq!(from_config(&config).unwrap().name(), "gemini");
        config.backend = Backend::OpenAi;
        assert_eq!(from_config(&config).unwrap().name(), "openai");
    }
}
