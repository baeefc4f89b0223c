use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info, warn};

use super::{preview, CompletionRequest, GatewayError, LlmGateway};

/// OpenAI-compatible `chat/completions` backend with JSON output mode.
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl OpenAiClient {
    pub fn new(api_key: String, base_url: String, model: String, timeout: Duration) -> Result<Self, GatewayError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, api_key, base_url, model })
    }

    fn request_body(&self, request: &CompletionRequest) -> serde_json::Value {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = &request.system {
            messages.push(json!({"role": "system", "content": system}));
        }
        messages.push(json!({"role": "user", "content": request.prompt}));

        let mut body = json!({
            "model": request.options.model.as_deref().unwrap_or(&self.model),
            "messages": messages,
            "temperature": request.options.temperature,
        });
        if request.options.json_output {
            body["response_format"] = json!({"type": "json_object"});
        }
        body
    }
}

#[async_trait]
impl LlmGateway for OpenAiClient {
    fn name(&self) -> &'static str {
        "openai"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<String, GatewayError> {
        let url = format!("{}/chat/completions", self.base_url);
        info!("🔗 Making request to: {}", url);

        let response = self.client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&self.request_body(request))
            .send()
            .await?;

        let status = response.status();
        let response_text = response.text().await?;
        info!("📥 Response status: {} ({} bytes)", status, response_text.len());

        if !status.is_success() {
            error!("❌ Chat completion error response: {}", preview(&response_text, 500));
            return Err(GatewayError::from_status(status, response_text));
        }

        let parsed: ChatResponse = serde_json::from_str(&response_text)
            .map_err(|e| GatewayError::Decode(format!("{}: {}", e, preview(&response_text, 200))))?;

        let choice = parsed.choices.into_iter().next().ok_or(GatewayError::EmptyResponse)?;
        match choice.message.content {
            Some(content) => Ok(content),
            None => {
                warn!("⚠️ Chat completion returned null content, treating as empty object");
                Ok("{}".to_string())
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Debug, Deserialize)]
struct Message {
    #[serde(default)]
    content: Option<String>,
}
