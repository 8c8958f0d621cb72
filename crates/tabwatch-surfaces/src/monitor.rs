//! Monitor surface: renders the latest-content record.

#[cfg(test)]
#[path = "monitor_tests.rs"]
mod tests;

use chrono::{DateTime, Utc};
use tokio::sync::mpsc;
use tracing::{debug, info};

use tabwatch_coordinator::CoordinatorHandle;
use tabwatch_protocols::{LatestContent, SurfaceMessage, SurfaceReply};

/// What the monitor page currently shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MonitorView {
    pub url: String,
    pub title: String,
    pub preview: String,
    pub full_text: String,
    pub screenshot: Option<String>,
    pub screenshot_time: Option<DateTime<Utc>>,
}

/// The monitor surface task.
pub struct MonitorSurface {
    view: MonitorView,
}

impl Default for MonitorSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl MonitorSurface {
    pub fn new() -> Self {
        Self {
            view: MonitorView {
                url: "Unknown URL".to_string(),
                title: "No title available".to_string(),
                preview: "No text available".to_string(),
                full_text: "Full text not available.".to_string(),
                screenshot: None,
                screenshot_time: None,
            },
        }
    }

    pub fn view(&self) -> &MonitorView {
        &self.view
    }

    /// Pull the current record once, then render every pushed update.
    pub async fn run(mut self, handle: CoordinatorHandle, mut rx: mpsc::Receiver<SurfaceMessage>) {
        info!("Monitor surface started");
        if let Ok(latest) = handle.latest_content().await {
            self.apply(latest);
        }
        while let Some(message) = rx.recv().await {
            self.handle_message(message);
        }
        debug!("Monitor surface stopped");
    }

    pub fn handle_message(&mut self, message: SurfaceMessage) -> Option<SurfaceReply> {
        match message {
            SurfaceMessage::UpdateContent { data } => {
                self.apply(data);
                Some(SurfaceReply::Received { received: true })
            }
            other => {
                debug!("Monitor surface ignoring {:?}", other);
                None
            }
        }
    }

    fn apply(&mut self, latest: LatestContent) {
        if !latest.url.is_empty() {
            self.view.url = latest.url;
        }
        if !latest.title.is_empty() {
            self.view.title = latest.title;
        }
        if !latest.text.is_empty() {
            self.view.preview = latest.text;
        }
        if !latest.full_text.is_empty() {
            self.view.full_text = latest.full_text;
        }
        if let Some(screenshot) = latest.screenshot {
            self.view.screenshot = Some(screenshot);
            self.view.screenshot_time = Some(latest.timestamp);
        }
        info!(
            url = %self.view.url,
            title = %self.view.title,
            "Monitor content updated"
        );
    }
}
