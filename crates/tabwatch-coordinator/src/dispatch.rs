//! Merge-and-fan-out dispatcher.

#[cfg(test)]
#[path = "dispatch_tests.rs"]
mod tests;

use std::sync::Arc;

use tracing::{debug, warn};

use tabwatch_protocols::{
    AnalysisStatus, ContentUpdate, LatestContent, MergeOutcome, ScreenshotAnalyzer, SurfaceMessage,
    TabId,
};

use crate::lifecycle::ListeningWindow;
use crate::registry::SurfaceRegistry;

/// Owns the latest-content record and fans merged updates out to the
/// surfaces.
///
/// All mutation goes through [`Dispatcher::merge_and_broadcast`], which is
/// only ever called from the coordinator task, so merges are serialized by
/// construction. Screenshot analysis runs on spawned tasks and reports back
/// through the registry; results land in whatever order the analyses finish
/// and the last one wins.
pub struct Dispatcher {
    latest: LatestContent,
    registry: Arc<SurfaceRegistry>,
    analyzer: Arc<dyn ScreenshotAnalyzer>,
}

impl Dispatcher {
    pub fn new(registry: Arc<SurfaceRegistry>, analyzer: Arc<dyn ScreenshotAnalyzer>) -> Self {
        Self {
            latest: LatestContent::default(),
            registry,
            analyzer,
        }
    }

    /// The current latest-content record.
    pub fn latest(&self) -> &LatestContent {
        &self.latest
    }

    /// Merge a partial update into the record and notify the surfaces.
    ///
    /// The monitor surface gets the full record on every merge. A changed
    /// screenshot starts an analysis task and flips the analysis surface to
    /// in-progress. A changed URL tells the insights surface to research
    /// the new URL. Delivery failures are logged and never retried.
    pub fn merge_and_broadcast(
        &mut self,
        update: ContentUpdate,
        window: Option<&ListeningWindow>,
    ) -> MergeOutcome {
        let outcome = self.latest.apply(update);

        let Some(window) = window else {
            debug!("No listening window; update merged without fan-out");
            return outcome;
        };

        self.push(
            window.monitor_tab,
            SurfaceMessage::UpdateContent {
                data: self.latest.clone(),
            },
        );

        if outcome.screenshot_changed {
            if let Some(screenshot) = self.latest.screenshot.clone() {
                self.start_analysis(window.analysis_tab, screenshot);
            }
        }

        if outcome.url_changed && !self.latest.url.is_empty() {
            self.push(
                window.insights_tab,
                SurfaceMessage::AnalyzeUrl {
                    url: self.latest.url.clone(),
                },
            );
        }

        outcome
    }

    /// Ask the insights surface to research the current URL, regardless of
    /// whether it changed.
    pub fn trigger_insights(&self, window: &ListeningWindow) {
        if self.latest.url.is_empty() {
            debug!("No URL observed yet; insights request dropped");
            return;
        }
        self.push(
            window.insights_tab,
            SurfaceMessage::AnalyzeUrl {
                url: self.latest.url.clone(),
            },
        );
    }

    /// Kick off screenshot analysis on its own task.
    ///
    /// The coordinator loop never waits on the remote call; the task pushes
    /// the outcome straight to the analysis surface when it lands.
    fn start_analysis(&self, analysis_tab: TabId, screenshot: String) {
        self.push(
            analysis_tab,
            SurfaceMessage::UpdateAnalysisStatus {
                status: AnalysisStatus::InProgress,
                message: "Analyzing screenshot...".to_string(),
            },
        );

        let analyzer = Arc::clone(&self.analyzer);
        let registry = Arc::clone(&self.registry);
        tokio::spawn(async move {
            let message = match analyzer.analyze_screenshot(&screenshot).await {
                Ok(result) => SurfaceMessage::UpdateAnalysisResult { result },
                Err(err) => SurfaceMessage::UpdateAnalysisStatus {
                    status: AnalysisStatus::Error,
                    message: format!("Analysis failed: {err}"),
                },
            };
            if let Err(err) = registry.send(analysis_tab, message) {
                warn!("Dropping analysis outcome: {}", err);
            }
        });
    }

    fn push(&self, tab: TabId, message: SurfaceMessage) {
        if let Err(err) = self.registry.send(tab, message) {
            warn!("Surface delivery to {} failed: {}", tab, err);
        }
    }
}
