use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

use crate::culture::{CountryOption, DEFAULT_COUNTRY, SUPPORTED_COUNTRIES};
use crate::error::{ApiError, ApiResult};
use crate::gateway::LlmGateway;
use crate::models::{
    ContentType, GenerateIdeasBody, Generated, GeneratedContentRecord, GenerationRequest, HistoryQuery, IdeaBody,
    Language, NewContent, OperationKind,
};
use crate::pipeline::{generate, PromptSettings};
use crate::store::ContentStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ContentStore>,
    pub gateway: Arc<dyn LlmGateway>,
    pub settings: Arc<PromptSettings>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResponse {
    pub success: bool,
    #[serde(flatten)]
    pub result: Generated,
    pub content_id: i64,
    pub session_id: String,
}

#[derive(Debug, Serialize)]
pub struct ContentListResponse {
    pub success: bool,
    pub contents: Vec<GeneratedContentRecord>,
}

#[derive(Debug, Serialize)]
pub struct CountriesResponse {
    pub success: bool,
    pub countries: &'static [CountryOption],
}

pub async fn generate_ideas(
    State(state): State<AppState>,
    body: Result<Json<GenerateIdeasBody>, JsonRejection>,
) -> ApiResult<Json<GenerationResponse>> {
    let Json(body) = body.map_err(rejected)?;
    let niche = required(body.niche, "Niche is required")?;
    let language = language(body.language)?;
    let country = country(body.country)?;
    let request = GenerationRequest { kind: OperationKind::GenerateIdeas, niche, idea: None, country, language };
    run(&state, request, body.session_id).await
}

pub async fn validate_idea(
    State(state): State<AppState>,
    body: Result<Json<IdeaBody>, JsonRejection>,
) -> ApiResult<Json<GenerationResponse>> {
    let Json(body) = body.map_err(rejected)?;
    run_for_idea(&state, OperationKind::ValidateIdea, body).await
}

pub async fn generate_promotion_kit(
    State(state): State<AppState>,
    body: Result<Json<IdeaBody>, JsonRejection>,
) -> ApiResult<Json<GenerationResponse>> {
    let Json(body) = body.map_err(rejected)?;
    run_for_idea(&state, OperationKind::GeneratePromotionKit, body).await
}

pub async fn get_content(
    Path(session_id): Path<String>,
    Query(query): Query<HistoryQuery>,
    State(state): State<AppState>,
) -> ApiResult<Json<ContentListResponse>> {
    let contents = match query.content_type.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
        Some(raw) => {
            let content_type = raw.parse::<ContentType>().map_err(|_| {
                ApiError::Validation("Type must be one of: idea, validation, promotion".into())
            })?;
            state.store.list_by_session_and_type(&session_id, content_type).await
        }
        None => state.store.list_by_session(&session_id).await,
    }
    .map_err(ApiError::Fetch)?;

    tracing::info!("📚 Session {} has {} stored items", session_id, contents.len());
    Ok(Json(ContentListResponse { success: true, contents }))
}

pub async fn list_countries() -> Json<CountriesResponse> {
    Json(CountriesResponse { success: true, countries: SUPPORTED_COUNTRIES })
}

pub async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok", "version": env!("CARGO_PKG_VERSION") }))
}

async fn run_for_idea(state: &AppState, kind: OperationKind, body: IdeaBody) -> ApiResult<Json<GenerationResponse>> {
    let idea = required(body.idea, "Idea is required")?;
    let niche = required(body.niche, "Niche is required")?;
    let language = language(body.language)?;
    let country = country(body.country)?;
    let request = GenerationRequest { kind, niche, idea: Some(idea), country, language };
    run(state, request, body.session_id).await
}

/// Pipeline then store. Nothing is persisted unless generation succeeded.
async fn run(
    state: &AppState,
    request: GenerationRequest,
    session_id: Option<String>,
) -> ApiResult<Json<GenerationResponse>> {
    let session_id = session_id
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    tracing::info!("🚀 {} for niche '{}' (session {})", request.kind.action(), request.niche, session_id);

    let generated = generate(state.gateway.as_ref(), &request, &state.settings)
        .await
        .map_err(|source| ApiError::Generation { action: request.kind.action(), source })?;

    let record = state.store.create(NewContent {
        session_id: session_id.clone(),
        content_type: request.kind.content_type(),
        niche: request.niche.clone(),
        country: request.country.clone(),
        language: request.language,
        content: record_payload(&request, &generated),
    }).await?;

    tracing::info!("✅ Stored {} #{} for session {}", record.content_type, record.id, session_id);
    Ok(Json(GenerationResponse { success: true, result: generated, content_id: record.id, session_id }))
}

fn record_payload(request: &GenerationRequest, generated: &Generated) -> serde_json::Value {
    match generated {
        Generated::Ideas(ideas) => json!({ "ideas": ideas }),
        Generated::Validation(validation) => json!({ "idea": request.idea, "validation": validation }),
        Generated::PromotionKit(kit) => json!({ "idea": request.idea, "promotionKit": kit }),
    }
}

fn rejected(rejection: JsonRejection) -> ApiError {
    ApiError::Validation(rejection.body_text())
}

fn required(value: Option<String>, message: &str) -> ApiResult<String> {
    match value.map(|v| v.trim().to_string()) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ApiError::Validation(message.to_string())),
    }
}

fn language(value: Option<String>) -> ApiResult<Language> {
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(Language::default()),
        Some(v) => v.parse().map_err(|_| ApiError::Validation("Language must be one of: en, pt".into())),
    }
}

/// Absent means the default market; an explicitly blank country is rejected.
fn country(value: Option<String>) -> ApiResult<String> {
    match value {
        None => Ok(DEFAULT_COUNTRY.to_string()),
        Some(v) => required(Some(v), "Country is required"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{IdeaValidation, ProductIdea};
    use pretty_assertions::assert_eq;

    #[test]
    fn field_validation() {
        assert_eq!(required(Some("  fitness ".into()), "x").unwrap(), "fitness");
        assert!(required(Some("   ".into()), "x").is_err());
        assert!(required(None, "x").is_err());

        assert_eq!(language(None).unwrap(), Language::En);
        assert_eq!(language(Some("pt".into())).unwrap(), Language::Pt);
        assert_eq!(language(Some("es".into())).unwrap_err().to_string(), "Language must be one of: en, pt");

        assert_eq!(country(None).unwrap(), DEFAULT_COUNTRY);
        assert_eq!(country(Some("Brazil".into())).unwrap(), "Brazil");
        assert_eq!(country(Some("".into())).unwrap_err().to_string(), "Country is required");
    }

    #[test]
    fn response_flattens_result_key() {
        let response = GenerationResponse {
            success: true,
            result: Generated::Ideas(vec![ProductIdea { title: "X".into(), ..Default::default() }]),
            content_id: 4,
            session_id: "s".into(),
        };
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["success"], true);
        assert_eq!(value["ideas"][0]["title"], "X");
        assert_eq!(value["contentId"], 4);
        assert_eq!(value["sessionId"], "s");
    }

    #[test]
    fn payload_keeps_idea_text_for_idea_operations() {
        let request = GenerationRequest {
            kind: OperationKind::ValidateIdea,
            niche: "n".into(),
            idea: Some("Budget app".into()),
            country: "Germany".into(),
            language: Language::En,
        };
        let validation = IdeaValidation {
            market_potential: 5,
            competition_level: 5,
            feasibility_score: 5,
            strengths: vec![],
            challenges: vec![],
            recommendation: String::new(),
        };
        let payload = record_payload(&request, &Generated::Validation(validation));
        assert_eq!(payload["idea"], "Budget app");
        assert_eq!(payload["validation"]["marketPotential"], 5);
    }
}
