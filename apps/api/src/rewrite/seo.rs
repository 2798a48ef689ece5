//! SEO keyword enrichment: appends entity keywords to each rewritten section.
//!
//! Annotation is best-effort: any failure yields no keywords rather than an error.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::warn;

use crate::errors::AppError;
use crate::rewrite::pipeline::RewrittenSections;

const ANALYZE_ENTITIES_URL: &str = "https://language.googleapis.com/v1/documents:analyzeEntities";

#[async_trait]
pub trait KeywordAnnotator: Send + Sync {
    /// Named entities found in `text`. Never fails; an unusable response is empty.
    async fn keywords(&self, text: &str) -> Vec<String>;
}

#[derive(Debug, Deserialize)]
struct AnalyzeEntitiesResponse {
    #[serde(default)]
    entities: Vec<Entity>,
}

#[derive(Debug, Deserialize)]
struct Entity {
    name: String,
}

/// Google Cloud Natural Language entity annotator.
#[derive(Clone)]
pub struct GoogleEntityAnnotator {
    client: Client,
    api_key: String,
    endpoint: String,
}

impl GoogleEntityAnnotator {
    pub fn new(api_key: Option<String>, timeout: Duration) -> Result<Self, AppError> {
        Self::with_endpoint(api_key, timeout, ANALYZE_ENTITIES_URL)
    }

    /// Annotator posting to an `analyzeEntities`-compatible `endpoint`.
    pub fn with_endpoint(
        api_key: Option<String>,
        timeout: Duration,
        endpoint: impl Into<String>,
    ) -> Result<Self, AppError> {
        let api_key = api_key.ok_or_else(|| {
            AppError::Configuration("GOOGLE_NLP_API_KEY is required for SEO keywords".to_string())
        })?;
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            api_key,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl KeywordAnnotator for GoogleEntityAnnotator {
    async fn keywords(&self, text: &str) -> Vec<String> {
        let body = json!({
            "document": {"type": "PLAIN_TEXT", "content": text},
            "encodingType": "UTF8"
        });

        let response = match self
            .client
            .post(&self.endpoint)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
        {
            Ok(r) if r.status().is_success() => r,
            Ok(r) => {
                warn!("Entity annotation returned {}", r.status());
                return Vec::new();
            }
            Err(e) => {
                warn!("Entity annotation failed: {e}");
                return Vec::new();
            }
        };

        match response.json::<AnalyzeEntitiesResponse>().await {
            Ok(parsed) => parsed.entities.into_iter().map(|e| e.name).collect(),
            Err(e) => {
                warn!("Entity annotation response unreadable: {e}");
                Vec::new()
            }
        }
    }
}

/// Appends an "Optimized Keywords" trailer to every section.
pub async fn integrate_seo_keywords(
    sections: &mut RewrittenSections,
    annotator: &dyn KeywordAnnotator,
) {
    for content in sections.values_mut() {
        let keywords = annotator.keywords(content).await.join(" ");
        content.push_str("\n\nOptimized Keywords: ");
        content.push_str(&keywords);
    }
}
