//! Command-channel handle into the coordinator task.

use tokio::sync::{mpsc, oneshot};

use tabwatch_protocols::{ContentSnapshot, CoordinatorReply, CoordinatorRequest, LatestContent};

use crate::error::CoordinatorError;

/// Commands consumed by the coordinator loop.
#[derive(Debug)]
pub enum Command {
    /// A protocol request with a reply slot.
    Request {
        request: CoordinatorRequest,
        reply: oneshot::Sender<CoordinatorReply>,
    },
    /// Make sure the listening window exists, creating it if needed.
    OpenWindow,
    /// Stop the coordinator loop.
    Shutdown,
}

/// Cloneable entry point to a running coordinator.
///
/// Every method sends a [`Command`] and, where a reply is expected, awaits
/// it on a oneshot. A closed channel in either direction means the
/// coordinator task is gone and surfaces as [`CoordinatorError::NotRunning`].
#[derive(Clone)]
pub struct CoordinatorHandle {
    commands: mpsc::Sender<Command>,
}

impl CoordinatorHandle {
    pub(crate) fn new(commands: mpsc::Sender<Command>) -> Self {
        Self { commands }
    }

    async fn request(&self, request: CoordinatorRequest) -> Result<CoordinatorReply, CoordinatorError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.commands
            .send(Command::Request {
                request,
                reply: reply_tx,
            })
            .await
            .map_err(|_| CoordinatorError::NotRunning)?;
        reply_rx.await.map_err(|_| CoordinatorError::NotRunning)
    }

    /// Current latest-content record.
    pub async fn latest_content(&self) -> Result<LatestContent, CoordinatorError> {
        match self.request(CoordinatorRequest::GetLatestContent).await? {
            CoordinatorReply::Content(latest) => Ok(latest),
            _ => Err(CoordinatorError::NotRunning),
        }
    }

    /// Immediate extraction and capture, bypassing the timers. Returns
    /// whether the refresh produced an update.
    pub async fn force_refresh(&self) -> Result<bool, CoordinatorError> {
        match self.request(CoordinatorRequest::ForceRefresh).await? {
            CoordinatorReply::Success { success } => Ok(success),
            _ => Err(CoordinatorError::NotRunning),
        }
    }

    /// Research the current URL and focus the insights surface.
    pub async fn generate_insights(&self) -> Result<bool, CoordinatorError> {
        match self.request(CoordinatorRequest::GenerateInsights).await? {
            CoordinatorReply::Success { success } => Ok(success),
            _ => Err(CoordinatorError::NotRunning),
        }
    }

    /// Flip the activity flag; returns the new state.
    pub async fn toggle_extension(&self) -> Result<bool, CoordinatorError> {
        match self.request(CoordinatorRequest::ToggleExtension).await? {
            CoordinatorReply::Active { active } => Ok(active),
            _ => Err(CoordinatorError::NotRunning),
        }
    }

    /// Current activity flag.
    pub async fn extension_status(&self) -> Result<bool, CoordinatorError> {
        match self.request(CoordinatorRequest::GetExtensionStatus).await? {
            CoordinatorReply::Active { active } => Ok(active),
            _ => Err(CoordinatorError::NotRunning),
        }
    }

    /// Push page-reported content (content-script style).
    pub async fn page_content(&self, data: ContentSnapshot) -> Result<(), CoordinatorError> {
        self.request(CoordinatorRequest::PageContent { data })
            .await
            .map(|_| ())
    }

    /// Make sure the listening window exists.
    pub async fn open_window(&self) -> Result<(), CoordinatorError> {
        self.commands
            .send(Command::OpenWindow)
            .await
            .map_err(|_| CoordinatorError::NotRunning)
    }

    /// Ask the coordinator loop to stop.
    pub async fn shutdown(&self) -> Result<(), CoordinatorError> {
        self.commands
            .send(Command::Shutdown)
            .await
            .map_err(|_| CoordinatorError::NotRunning)
    }
}
