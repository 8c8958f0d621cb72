//! Analysis surface: screenshot-analysis status and result.

#[cfg(test)]
#[path = "analysis_tests.rs"]
mod tests;

use tokio::sync::mpsc;
use tracing::{debug, info};

use tabwatch_protocols::{AnalysisStatus, SurfaceMessage, SurfaceReply};

/// What the analysis page currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisView {
    pub status: AnalysisStatus,
    pub message: String,
    pub result: Option<String>,
}

/// The analysis surface task.
pub struct AnalysisSurface {
    view: AnalysisView,
}

impl Default for AnalysisSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisSurface {
    pub fn new() -> Self {
        Self {
            view: AnalysisView {
                status: AnalysisStatus::Waiting,
                message: "Waiting for screenshot...".to_string(),
                result: None,
            },
        }
    }

    pub fn view(&self) -> &AnalysisView {
        &self.view
    }

    pub async fn run(mut self, mut rx: mpsc::Receiver<SurfaceMessage>) {
        info!("Analysis surface started");
        while let Some(message) = rx.recv().await {
            self.handle_message(message);
        }
        debug!("Analysis surface stopped");
    }

    pub fn handle_message(&mut self, message: SurfaceMessage) -> Option<SurfaceReply> {
        match message {
            SurfaceMessage::UpdateAnalysisStatus { status, message } => {
                self.set_status(status, message);
                Some(SurfaceReply::Received { received: true })
            }
            SurfaceMessage::UpdateAnalysisResult { result } => {
                // A result implies completion even if no status update
                // preceded it.
                self.set_status(AnalysisStatus::Complete, "Analysis complete".to_string());
                self.view.result = Some(result);
                Some(SurfaceReply::Received { received: true })
            }
            other => {
                debug!("Analysis surface ignoring {:?}", other);
                None
            }
        }
    }

    fn set_status(&mut self, status: AnalysisStatus, message: String) {
        info!(?status, %message, "Analysis status updated");
        self.view.status = status;
        self.view.message = message;
    }
}
