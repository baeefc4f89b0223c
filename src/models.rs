use serde::{Serialize, Deserialize};
use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    GenerateIdeas,
    ValidateIdea,
    GeneratePromotionKit,
}

impl OperationKind {
    /// Phrase used in client-facing failure messages ("Failed to ...").
    pub fn action(self) -> &'static str {
        match self {
            OperationKind::GenerateIdeas => "generate product ideas",
            OperationKind::ValidateIdea => "validate idea",
            OperationKind::GeneratePromotionKit => "generate promotion kit",
        }
    }

    pub fn content_type(self) -> ContentType {
        match self {
            OperationKind::GenerateIdeas => ContentType::Idea,
            OperationKind::ValidateIdea => ContentType::Validation,
            OperationKind::GeneratePromotionKit => ContentType::Promotion,
        }
    }

    pub fn temperature(self) -> f32 {
        match self {
            OperationKind::ValidateIdea => 0.7,
            OperationKind::GenerateIdeas | OperationKind::GeneratePromotionKit => 0.8,
        }
    }

    pub fn requires_idea(self) -> bool {
        !matches!(self, OperationKind::GenerateIdeas)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Pt,
}

impl Language {
    pub fn as_str(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Pt => "pt",
        }
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "en" => Ok(Language::En),
            "pt" => Ok(Language::Pt),
            other => Err(format!("unknown language '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Idea,
    Validation,
    Promotion,
}

impl ContentType {
    pub fn as_str(self) -> &'static str {
        match self {
            ContentType::Idea => "idea",
            ContentType::Validation => "validation",
            ContentType::Promotion => "promotion",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "idea" => Ok(ContentType::Idea),
            "validation" => Ok(ContentType::Validation),
            "promotion" => Ok(ContentType::Promotion),
            other => Err(format!("unknown content type '{other}'")),
        }
    }
}

/// A validated request for one generation flow. Built per HTTP call, never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub kind: OperationKind,
    pub niche: String,
    pub idea: Option<String>,
    pub country: String,
    pub language: Language,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProductIdea {
    pub title: String,
    pub description: String,
    pub target_audience: String,
    pub price_range: String,
    pub category: String,
    pub tags: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IdeaValidation {
    pub market_potential: u8,
    pub competition_level: u8,
    pub feasibility_score: u8,
    pub strengths: Vec<String>,
    pub challenges: Vec<String>,
    pub recommendation: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct EmailCampaign {
    pub subject: String,
    pub content: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AffiliateResources {
    pub commission_rate: String,
    pub cookie_duration: String,
    pub average_order_value: String,
    pub sales_copy: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PromotionKit {
    pub email_campaign: EmailCampaign,
    pub social_media_posts: Vec<String>,
    pub affiliate_resources: AffiliateResources,
}

/// Normalized model output for one operation. Serializes as a single
/// `ideas` / `validation` / `promotionKit` key.
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub enum Generated {
    Ideas(Vec<ProductIdea>),
    Validation(IdeaValidation),
    PromotionKit(PromotionKit),
}

/// Fields the caller supplies when appending a record to a store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewContent {
    pub session_id: String,
    pub content_type: ContentType,
    pub niche: String,
    pub country: String,
    pub language: Language,
    pub content: serde_json::Value,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedContentRecord {
    pub id: i64,
    pub session_id: String,
    #[serde(rename = "type")]
    pub content_type: ContentType,
    pub niche: String,
    pub country: String,
    pub language: Language,
    pub content: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

// --- HTTP request bodies ---
//
// Every field is optional on the wire so that missing values surface as
// validation messages instead of serde rejections.

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct GenerateIdeasBody {
    #[serde(default)]
    pub niche: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub session_id: Option<String>,
}

/// Shared by the validate-idea and promotion-kit endpoints.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct IdeaBody {
    #[serde(default)]
    pub idea: Option<String>,
    #[serde(default)]
    pub niche: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub session_id: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct HistoryQuery {
    #[serde(default, rename = "type")]
    pub content_type: Option<String>,
}
