//! HTTP client for the local analysis server.

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use tabwatch_protocols::{CollaboratorError, ScreenshotAnalyzer, StockResearcher};

/// Research client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResearchConfig {
    /// Base URL of the analysis server.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for ResearchConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Body shape shared by both endpoints: `{"analysis": "..."}`.
#[derive(Debug, Deserialize)]
struct AnalysisResponse {
    analysis: Option<String>,
}

/// HTTP implementation of both collaborator seams.
pub struct RemoteCollaborators {
    client: reqwest::Client,
    base_url: String,
}

impl RemoteCollaborators {
    pub fn new(config: &ResearchConfig) -> Result<Self, CollaboratorError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| CollaboratorError::Network(e.to_string()))?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn post_for_analysis(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> Result<String, CollaboratorError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| CollaboratorError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(CollaboratorError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: AnalysisResponse = response
            .json()
            .await
            .map_err(|e| CollaboratorError::InvalidResponse(e.to_string()))?;
        parsed
            .analysis
            .ok_or_else(|| CollaboratorError::InvalidResponse("missing analysis field".to_string()))
    }
}

#[async_trait]
impl ScreenshotAnalyzer for RemoteCollaborators {
    async fn analyze_screenshot(&self, data_uri: &str) -> Result<String, CollaboratorError> {
        if data_uri.is_empty() {
            return Err(CollaboratorError::InvalidInput(
                "empty screenshot".to_string(),
            ));
        }
        self.post_for_analysis("/analyze-screenshot", json!({ "screenshot": data_uri }))
            .await
    }
}

#[async_trait]
impl StockResearcher for RemoteCollaborators {
    async fn research_url(&self, url: &str) -> Result<String, CollaboratorError> {
        if url.is_empty() {
            return Err(CollaboratorError::InvalidInput("empty URL".to_string()));
        }
        self.post_for_analysis("/stock-research", json!({ "url": url }))
            .await
    }
}
