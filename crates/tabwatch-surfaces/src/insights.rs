//! Insights surface: per-URL stock research.
//!
//! Research runs through three gates, in order: URL validity, the
//! last-analyzed dedup gate, then the persisted cache. Only a miss on all
//! three reaches the remote researcher; a remote failure falls back to the
//! offline mock response, which is cached like any other answer.

#[cfg(test)]
#[path = "insights_tests.rs"]
mod tests;

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use tabwatch_coordinator::CoordinatorHandle;
use tabwatch_protocols::{AnalysisStatus, StockResearcher, SurfaceMessage, SurfaceReply};
use tabwatch_research::{format_report, mock_research, ResearchCache};

/// What the insights page currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsightsView {
    pub current_url: String,
    pub status: AnalysisStatus,
    pub message: String,
    pub results: Option<String>,
}

/// The insights surface task.
pub struct InsightsSurface {
    view: InsightsView,
    last_analyzed_url: String,
    cache: ResearchCache,
    researcher: Arc<dyn StockResearcher>,
}

impl InsightsSurface {
    pub fn new(researcher: Arc<dyn StockResearcher>, cache: ResearchCache) -> Self {
        Self {
            view: InsightsView {
                current_url: "No URL available".to_string(),
                status: AnalysisStatus::Waiting,
                message: "Waiting for a valid URL to analyze".to_string(),
                results: None,
            },
            last_analyzed_url: String::new(),
            cache,
            researcher,
        }
    }

    pub fn view(&self) -> &InsightsView {
        &self.view
    }

    pub fn cache(&self) -> &ResearchCache {
        &self.cache
    }

    /// Research the current URL immediately, then serve pushed requests.
    pub async fn run(mut self, handle: CoordinatorHandle, mut rx: mpsc::Receiver<SurfaceMessage>) {
        info!("Insights surface started");
        match handle.latest_content().await {
            Ok(latest) if !latest.url.is_empty() => {
                self.view.current_url = latest.url.clone();
                self.perform_research(&latest.url).await;
            }
            _ => debug!("No URL available yet"),
        }
        while let Some(message) = rx.recv().await {
            self.handle_message(message).await;
        }
        debug!("Insights surface stopped");
    }

    pub async fn handle_message(&mut self, message: SurfaceMessage) -> Option<SurfaceReply> {
        match message {
            SurfaceMessage::AnalyzeUrl { url } => {
                self.perform_research(&url).await;
                Some(SurfaceReply::Received { received: true })
            }
            SurfaceMessage::UpdateContent { data } => {
                if !data.url.is_empty() {
                    self.view.current_url = data.url.clone();
                    self.perform_research(&data.url).await;
                }
                Some(SurfaceReply::Received { received: true })
            }
            other => {
                debug!("Insights surface ignoring {:?}", other);
                None
            }
        }
    }

    async fn perform_research(&mut self, url: &str) {
        if url.is_empty() || url == "unknown" || url == "Waiting for URL..." {
            debug!("Invalid URL, not performing research: {}", url);
            self.set_status(AnalysisStatus::Error, "No valid URL to analyze");
            return;
        }

        // Dedup gate: the URL we analyzed most recently is never re-run,
        // not even against the cache.
        if url == self.last_analyzed_url {
            debug!("Already analyzed this URL, not re-analyzing: {}", url);
            return;
        }
        self.last_analyzed_url = url.to_string();

        self.view.current_url = url.to_string();
        self.set_status(
            AnalysisStatus::InProgress,
            "Analyzing page and researching...",
        );

        if let Some(cached) = self.cache.get(url) {
            debug!("Using cached results for: {}", url);
            self.view.results = Some(format_report(cached, url));
            self.set_status(AnalysisStatus::Complete, "Analysis complete (from cache)");
            return;
        }

        match self.researcher.research_url(url).await {
            Ok(answer) => {
                self.cache.insert(url, answer.as_str()).await;
                self.view.results = Some(format_report(&answer, url));
                self.set_status(AnalysisStatus::Complete, "Analysis complete");
            }
            Err(err) => {
                warn!("Research request failed, using mock response: {}", err);
                let mock = mock_research(url);
                // Mock answers are cached like real ones and shadow any
                // later server availability for this URL.
                self.cache.insert(url, mock.as_str()).await;
                self.view.results = Some(format_report(&mock, url));
                self.set_status(AnalysisStatus::Complete, "Analysis complete (mock data)");
            }
        }
    }

    fn set_status(&mut self, status: AnalysisStatus, message: &str) {
        info!(?status, %message, "Research status updated");
        self.view.status = status;
        self.view.message = message.to_string();
    }
}
