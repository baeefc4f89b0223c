use async_trait::async_trait;
use serde_json::json;
use tracing::info;

use super::{CompletionRequest, GatewayError, LlmGateway};
use crate::prompts::{PROMOTION_SCHEMA, VALIDATION_SCHEMA};

/// Offline stand-in used when no API key is configured. Picks a canned
/// document by the schema the prompt asks for.
pub struct DemoGateway;

#[async_trait]
impl LlmGateway for DemoGateway {
    fn name(&self) -> &'static str {
        "demo"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<String, GatewayError> {
        info!("Using demo mode - returning canned response");
        let body = if request.prompt.contains(VALIDATION_SCHEMA) {
            json!({
                "marketPotential": 7,
                "competitionLevel": 6,
                "feasibilityScore": 8,
                "strengths": ["Low production cost", "Evergreen demand", "Easy to bundle"],
                "challenges": ["Crowded marketplace", "Needs an audience first", "Price sensitivity"],
                "recommendation": "Demo mode: validate with a small pre-sale before building the full product."
            })
        } else if request.prompt.contains(PROMOTION_SCHEMA) {
            json!({
                "emailCampaign": {
                    "subject": "Demo: your new favourite digital product",
                    "content": "Demo mode email body. Configure an API key for real content."
                },
                "socialMediaPosts": [
                    "Demo post 1: launching soon!",
                    "Demo post 2: behind the scenes.",
                    "Demo post 3: early-bird discount."
                ],
                "affiliateResources": {
                    "commissionRate": "30%",
                    "cookieDuration": "60 days",
                    "averageOrderValue": "$87",
                    "salesCopy": "Demo sales copy."
                }
            })
        } else {
            json!({
                "ideas": [{
                    "title": "Demo Starter Kit",
                    "description": "Demo mode idea. Configure an API key to generate real ideas.",
                    "targetAudience": "Beginners",
                    "priceRange": "$19-$49",
                    "category": "Digital Guide",
                    "tags": ["demo"]
                }]
            })
        };
        Ok(body.to_string())
    }
}
