//! Turns raw model text into the fixed shapes the API returns and stores.
//!
//! Model output is not guaranteed to be pure JSON, so extraction is
//! best-effort: the whole text is tried first, then the span from the first
//! `{` to the last `}`. A literal unbalanced brace inside a string value can
//! defeat the span heuristic.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::models::{
    AffiliateResources, EmailCampaign, Generated, IdeaValidation, OperationKind, ProductIdea, PromotionKit,
};

pub const SCORE_MIN: i64 = 1;
pub const SCORE_MAX: i64 = 10;
pub const SCORE_DEFAULT: i64 = 5;

pub const DEFAULT_COMMISSION_RATE: &str = "30%";
pub const DEFAULT_COOKIE_DURATION: &str = "60 days";
pub const DEFAULT_AVERAGE_ORDER_VALUE: &str = "$87";

#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("no JSON object found in model response")]
    MalformedResponse,
    #[error("invalid JSON in model response: {0}")]
    InvalidJson(String),
}

pub fn normalize(kind: OperationKind, raw: &str) -> Result<Generated, NormalizeError> {
    let object = extract_json_object(raw)?;
    Ok(match kind {
        OperationKind::GenerateIdeas => Generated::Ideas(ideas_from(&object)),
        OperationKind::ValidateIdea => Generated::Validation(validation_from(&object)),
        OperationKind::GeneratePromotionKit => Generated::PromotionKit(promotion_kit_from(&object)),
    })
}

pub fn extract_json_object(raw: &str) -> Result<Map<String, Value>, NormalizeError> {
    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(raw.trim()) {
        return Ok(map);
    }

    let span = match (raw.find('{'), raw.rfind('}')) {
        (Some(start), Some(end)) if end > start => &raw[start..=end],
        _ => return Err(NormalizeError::MalformedResponse),
    };

    match serde_json::from_str::<Value>(span) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(NormalizeError::InvalidJson(format!("expected an object, got {}", type_name(&other)))),
        Err(e) => Err(NormalizeError::InvalidJson(e.to_string())),
    }
}

/// `max(1, min(10, value or 5))`. Non-numeric and missing values count as 5.
pub fn clamp_score(value: Option<&Value>) -> u8 {
    let raw = value.and_then(score_value).unwrap_or(SCORE_DEFAULT);
    raw.clamp(SCORE_MIN, SCORE_MAX) as u8
}

fn score_value(value: &Value) -> Option<i64> {
    let number = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    number.is_finite().then(|| number.round() as i64)
}

pub fn ideas_from(object: &Map<String, Value>) -> Vec<ProductIdea> {
    let Some(Value::Array(items)) = object.get("ideas") else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(Value::as_object)
        .map(|idea| ProductIdea {
            title: string_field(idea, "title"),
            description: string_field(idea, "description"),
            target_audience: string_field(idea, "targetAudience"),
            price_range: string_field(idea, "priceRange"),
            category: string_field(idea, "category"),
            tags: string_list(idea, "tags"),
        })
        .collect()
}

pub fn validation_from(object: &Map<String, Value>) -> IdeaValidation {
    IdeaValidation {
        market_potential: clamp_score(object.get("marketPotential")),
        competition_level: clamp_score(object.get("competitionLevel")),
        feasibility_score: clamp_score(object.get("feasibilityScore")),
        strengths: string_list(object, "strengths"),
        challenges: string_list(object, "challenges"),
        recommendation: string_field(object, "recommendation"),
    }
}

pub fn promotion_kit_from(object: &Map<String, Value>) -> PromotionKit {
    let empty = Map::new();
    let email = object.get("emailCampaign").and_then(Value::as_object).unwrap_or(&empty);
    let affiliate = object.get("affiliateResources").and_then(Value::as_object).unwrap_or(&empty);
    PromotionKit {
        email_campaign: EmailCampaign {
            subject: string_field(email, "subject"),
            content: string_field(email, "content"),
        },
        social_media_posts: string_list(object, "socialMediaPosts"),
        affiliate_resources: AffiliateResources {
            commission_rate: string_or(affiliate, "commissionRate", DEFAULT_COMMISSION_RATE),
            cookie_duration: string_or(affiliate, "cookieDuration", DEFAULT_COOKIE_DURATION),
            average_order_value: string_or(affiliate, "averageOrderValue", DEFAULT_AVERAGE_ORDER_VALUE),
            sales_copy: string_field(affiliate, "salesCopy"),
        },
    }
}

fn string_field(object: &Map<String, Value>, key: &str) -> String {
    string_or(object, key, "")
}

/// Reads a string field, substituting `default` when absent or empty.
/// Numbers and booleans are kept in their JSON text form.
fn string_or(object: &Map<String, Value>, key: &str, default: &str) -> String {
    let value = match object.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(v @ (Value::Number(_) | Value::Bool(_))) => v.to_string(),
        _ => String::new(),
    };
    if value.is_empty() { default.to_string() } else { value }
}

fn string_list(object: &Map<String, Value>, key: &str) -> Vec<String> {
    match object.get(key) {
        Some(Value::Array(items)) => items.iter().filter_map(|v| v.as_str().map(str::to_string)).collect(),
        _ => Vec::new(),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
