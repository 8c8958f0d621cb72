//! The browser host seam.

use async_trait::async_trait;
use tokio::sync::broadcast;

use tabwatch_protocols::{ContentSnapshot, TabId, WindowId};

use crate::error::HostError;

/// A tab as seen by the coordinator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabInfo {
    pub id: TabId,
    pub window: WindowId,
    pub url: String,
    pub title: String,
}

/// Events the host pushes to subscribers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TabEvent {
    /// A tab became the active tab.
    Activated { tab: TabId },
    /// A tab finished loading a URL.
    NavigationComplete { tab: TabId, url: String },
    /// A window was closed.
    WindowRemoved { window: WindowId },
}

/// Operations the coordinator needs from the browser environment.
///
/// Implementations must treat lookups of closed windows/tabs as
/// `WindowNotFound`/`TabNotFound`, never as panics: the coordinator probes
/// liberally and tolerates tabs vanishing mid-flight.
#[async_trait]
pub trait BrowserHost: Send + Sync {
    /// Create a new empty window.
    async fn create_window(&self) -> Result<WindowId, HostError>;

    /// Create a tab in a window, loading the given URL. The new tab becomes
    /// the active tab.
    async fn create_tab(&self, window: WindowId, url: &str) -> Result<TabId, HostError>;

    /// Probe whether a window still exists.
    async fn window_exists(&self, window: WindowId) -> bool;

    /// Tabs of a window, in creation order.
    async fn window_tabs(&self, window: WindowId) -> Result<Vec<TabId>, HostError>;

    /// The currently active tab, if any.
    async fn active_tab(&self) -> Result<Option<TabInfo>, HostError>;

    /// Look up a tab.
    async fn tab_info(&self, tab: TabId) -> Result<TabInfo, HostError>;

    /// Bring a tab into focus.
    async fn focus_tab(&self, tab: TabId) -> Result<(), HostError>;

    /// Close a window and all its tabs.
    async fn close_window(&self, window: WindowId) -> Result<(), HostError>;

    /// Run content extraction in a tab's context and return the snapshot.
    async fn extract_content(&self, tab: TabId) -> Result<ContentSnapshot, HostError>;

    /// Capture the tab as an image data URI.
    async fn capture_screenshot(&self, tab: TabId) -> Result<String, HostError>;

    /// Subscribe to tab lifecycle events.
    fn subscribe(&self) -> broadcast::Receiver<TabEvent>;
}
