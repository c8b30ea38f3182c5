//! Plant recommendation webhook.
//!
//! The recommendation workflow runs on an external automation host. It is
//! triggered with a `POST` whose inputs travel as query parameters and
//! answers with the raw model output, which [`suggestions`] flattens into
//! plant/reason pairs.

use std::time::Duration;

use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::api::{endpoint, ensure_success, parse_base_url};
use crate::error::{ApiError, ApiResult};

/// Path of the recommendation webhook below the automation host.
const WEBHOOK_PATH: [&str; 2] = ["webhook", "plant-recommendation"];

/// Onboarding answers sent to the workflow.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecommendationRequest {
    pub location: String,
    pub skill_level: String,
    pub home_frequency: String,
    pub preference: String,
}

impl RecommendationRequest {
    /// All four answers are required.
    pub fn validate(&self) -> ApiResult<()> {
        let fields = [
            &self.location,
            &self.skill_level,
            &self.home_frequency,
            &self.preference,
        ];
        if fields.iter().any(|f| f.trim().is_empty()) {
            return Err(ApiError::InvalidInput("Please complete all fields".into()));
        }
        Ok(())
    }

    fn query(&self) -> [(&'static str, &str); 4] {
        [
            ("location", self.location.trim()),
            ("skill_level", self.skill_level.trim()),
            ("home_frequency", self.home_frequency.trim()),
            ("preference", self.preference.trim()),
        ]
    }
}

/// One element of the webhook's top-level array.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PlantRecommendation {
    #[serde(default)]
    pub output: Vec<RecommendationOutput>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RecommendationOutput {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub r#type: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub content: Vec<RecommendationContent>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RecommendationContent {
    #[serde(default)]
    pub r#type: String,
    pub text: RecommendationText,
    #[serde(default)]
    pub annotations: Vec<serde_json::Value>,
}

/// Parallel lists: `reason[i]` explains `recommendation[i]`.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct RecommendationText {
    pub recommendation: Vec<String>,
    pub reason: Vec<String>,
}

/// A recommended plant with its justification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlantSuggestion {
    pub plant: String,
    pub reason: Option<String>,
}

/// Flatten webhook output into plant suggestions, in response order.
pub fn suggestions(recommendations: &[PlantRecommendation]) -> Vec<PlantSuggestion> {
    recommendations
        .iter()
        .flat_map(|r| &r.output)
        .flat_map(|o| &o.content)
        .flat_map(|c| {
            c.text
                .recommendation
                .iter()
                .enumerate()
                .map(move |(i, plant)| PlantSuggestion {
                    plant: plant.clone(),
                    reason: c.text.reason.get(i).cloned(),
                })
        })
        .collect()
}

/// HTTP client for the recommendation webhook.
#[derive(Debug, Clone)]
pub struct RecommendationClient {
    client: reqwest::Client,
    base_url: Url,
}

impl RecommendationClient {
    pub fn new(base_url: &str, timeout: Duration) -> ApiResult<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Self::with_client(client, base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: &str) -> ApiResult<Self> {
        Ok(Self {
            client,
            base_url: parse_base_url(base_url)?,
        })
    }

    /// Run the recommendation workflow.
    ///
    /// Fails with [`ApiError::NoRecommendations`] when the workflow answers
    /// with an empty list.
    pub async fn recommend(
        &self,
        request: &RecommendationRequest,
    ) -> ApiResult<Vec<PlantRecommendation>> {
        request.validate()?;

        let url = endpoint(&self.base_url, &WEBHOOK_PATH)?;
        tracing::info!(location = %request.location, "Requesting plant recommendation");

        let response = self
            .client
            .post(url)
            .query(request.query().as_slice())
            .send()
            .await?;
        let response = ensure_success(response).await?;
        let recommendations: Vec<PlantRecommendation> = response.json().await?;

        if recommendations.is_empty() {
            return Err(ApiError::NoRecommendations);
        }

        tracing::debug!(count = recommendations.len(), "Recommendation received");
        Ok(recommendations)
    }
}
