//! Collaborator traits for the remote analysis services.
//!
//! The coordinator only knows these seams; the HTTP implementations live in
//! `tabwatch-research`, and tests substitute in-process fakes.

use async_trait::async_trait;

use crate::error::CollaboratorError;

/// Analyzes a screenshot (as an image data URI) into free-form text.
#[async_trait]
pub trait ScreenshotAnalyzer: Send + Sync {
    async fn analyze_screenshot(&self, data_uri: &str) -> Result<String, CollaboratorError>;
}

/// Researches the company/stock behind a URL into free-form text.
#[async_trait]
pub trait StockResearcher: Send + Sync {
    async fn research_url(&self, url: &str) -> Result<String, CollaboratorError>;
}
