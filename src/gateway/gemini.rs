use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};

use super::{preview, CompletionRequest, GatewayError, LlmGateway};

/// Google generative-language `generateContent` backend.
pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl GeminiClient {
    pub fn new(api_key: String, base_url: String, model: String, timeout: Duration) -> Result<Self, GatewayError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, api_key, base_url, model })
    }

    fn request_body(request: &CompletionRequest) -> serde_json::Value {
        let mut generation_config = json!({
            "temperature": request.options.temperature,
            "topK": 40,
            "topP": 0.95,
            "candidateCount": 1
        });
        if request.options.json_output {
            generation_config["responseMimeType"] = json!("application/json");
        }

        let mut body = json!({
            "contents": [{
                "role": "user",
                "parts": [{"text": request.prompt}]
            }],
            "generationConfig": generation_config
        });
        if let Some(system) = &request.system {
            body["systemInstruction"] = json!({ "parts": [{"text": system}] });
        }
        body
    }
}

#[async_trait]
impl LlmGateway for GeminiClient {
    fn name(&self) -> &'static str {
        "gemini"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<String, GatewayError> {
        let model = request.options.model.as_deref().unwrap_or(&self.model);
        let url = format!("{}/models/{}:generateContent", self.base_url, model);

        info!("🔗 Making request to: {}", url);

        let response = self.client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&Self::request_body(request))
            .send()
            .await?;

        let status = response.status();
        let response_text = response.text().await?;
        info!("📥 Response status: {} ({} bytes)", status, response_text.len());

        if !status.is_success() {
            error!("❌ Gemini API error response: {}", preview(&response_text, 500));
            return Err(GatewayError::from_status(status, response_text));
        }

        let parsed: GeminiResponse = serde_json::from_str(&response_text)
            .map_err(|e| GatewayError::Decode(format!("{}: {}", e, preview(&response_text, 200))))?;

        extract_text(&parsed).ok_or(GatewayError::EmptyResponse)
    }
}

// --- Response Parsing Helpers ---

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate { #[serde(default)] content: Content }

#[derive(Debug, Deserialize, Default)]
struct Content { #[serde(default)] parts: Vec<Part> }

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Part {
    Text { text: String },
    Other(#[allow(dead_code)] serde_json::Value),
}

/// Text parts of the first candidate that has any, joined and trimmed.
fn extract_text(resp: &GeminiResponse) -> Option<String> {
    for c in &resp.candidates {
        let text: String = c.content.parts.iter()
            .filter_map(|p| match p {
                Part::Text { text } => Some(text.as_str()),
                Part::Other(_) => None,
            })
            .collect();
        let text = text.trim();
        if !text.is_empty() {
            return Some(text.to_string());
        }
    }
    info!("⚠️ No text parts found in Gemini response");
    None
}
