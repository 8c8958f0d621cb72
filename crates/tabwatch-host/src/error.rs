//! Host errors.

use tabwatch_protocols::{TabId, WindowId};
use thiserror::Error;

/// Browser host error types.
///
/// Probe-style callers treat `WindowNotFound`/`TabNotFound` as "absent,
/// never fatal": tracked state is reset and work continues.
#[derive(Debug, Error)]
pub enum HostError {
    /// The window no longer exists.
    #[error("Window not found: {0}")]
    WindowNotFound(WindowId),

    /// The tab no longer exists.
    #[error("Tab not found: {0}")]
    TabNotFound(TabId),

    /// Content extraction was denied or the page has no readable content.
    #[error("Cannot access page content: {0}")]
    PageInaccessible(String),

    /// Screenshot capture failed.
    #[error("Screenshot capture failed: {0}")]
    CaptureFailed(String),
}
