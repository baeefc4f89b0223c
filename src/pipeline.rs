use thiserror::Error;
use tracing::info;

use crate::gateway::{CompletionOptions, CompletionRequest, GatewayError, LlmGateway};
use crate::models::{Generated, GenerationRequest};
use crate::normalize::{normalize, NormalizeError};
use crate::prompts::{build_prompt, system_prompt};

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    #[error(transparent)]
    Normalize(#[from] NormalizeError),
}

/// Knobs shared by every generation call.
#[derive(Debug, Clone, Default)]
pub struct PromptSettings {
    pub country_aware: bool,
    /// Per-call model override; `None` uses the backend default.
    pub model: Option<String>,
}

pub fn completion_request(request: &GenerationRequest, settings: &PromptSettings) -> CompletionRequest {
    CompletionRequest {
        system: Some(system_prompt(request.kind, request.language).to_string()),
        prompt: build_prompt(request, settings.country_aware),
        options: CompletionOptions {
            model: settings.model.clone(),
            temperature: request.kind.temperature(),
            json_output: true,
        },
    }
}

/// Prompt, complete, normalize. Nothing is stored here.
pub async fn generate(
    gateway: &dyn LlmGateway,
    request: &GenerationRequest,
    settings: &PromptSettings,
) -> Result<Generated, GenerationError> {
    let completion = completion_request(request, settings);
    info!(
        "🎯 {:?} via {} for niche '{}' ({}, {})",
        request.kind,
        gateway.name(),
        request.niche,
        request.country,
        request.language.as_str()
    );

    let raw = gateway.complete(&completion).await?;
    info!("📥 Model returned {} chars", raw.len());

    let generated = normalize(request.kind, &raw)?;
    Ok(generated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Language, OperationKind};
    use async_trait::async_trait;
    use parking_lot::Mutex;

    struct Canned {
        reply: Result<String, ()>,
        seen: Mutex<Vec<CompletionRequest>>,
    }

    #[async_trait]
    impl LlmGateway for Canned {
        fn name(&self) -> &'static str {
            "canned"
        }

        async fn complete(&self, request: &CompletionRequest) -> Result<String, GatewayError> {
            self.seen.lock().push(request.clone());
            self.reply.clone().map_err(|_| GatewayError::Timeout)
        }
    }

    fn request(kind: OperationKind) -> GenerationRequest {
        GenerationRequest {
            kind,
            niche: "gardening".into(),
            idea: Some("Seed planner".into()),
            country: "Brazil".into(),
            language: Language::Pt,
        }
    }

    #[tokio::test]
    async fn builds_request_and_normalizes_reply() {
        let gateway = Canned { reply: Ok("ok {\"marketPotential\": 99}".into()), seen: Mutex::new(vec![]) };
        let settings = PromptSettings { country_aware: true, model: Some("m1".into()) };

        let generated = generate(&gateway, &request(OperationKind::ValidateIdea), &settings).await.unwrap();
        let Generated::Validation(v) = generated else { panic!("expected validation") };
        assert_eq!(v.market_potential, 10);

        let seen = gateway.seen.lock();
        assert_eq!(seen.len(), 1);
        assert!(seen[0].prompt.contains("gardening"));
        assert!(seen[0].system.as_deref().unwrap().starts_with("Você"));
        assert_eq!(seen[0].options.model.as_deref(), Some("m1"));
        assert_eq!(seen[0].options.temperature, 0.7);
        assert!(seen[0].options.json_output);
    }

    #[tokio::test]
    async fn gateway_failure_is_surfaced() {
        let gateway = Canned { reply: Err(()), seen: Mutex::new(vec![]) };
        let err = generate(&gateway, &request(OperationKind::GenerateIdeas), &PromptSettings::default()).await.unwrap_err();
        assert!(matches!(err, GenerationError::Gateway(GatewayError::Timeout)));
    }

    #[tokio::test]
    async fn unparseable_reply_is_normalize_error() {
        let gateway = Canned { reply: Ok("no json here".into()), seen: Mutex::new(vec![]) };
        let err = generate(&gateway, &request(OperationKind::GeneratePromotionKit), &PromptSettings::default()).await.unwrap_err();
        assert!(matches!(err, GenerationError::Normalize(NormalizeError::MalformedResponse)));
    }
}
