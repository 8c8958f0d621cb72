//! Surface spawning seam.
//!
//! The coordinator creates the listening window's tabs but knows nothing
//! about how surfaces render; it only needs a message channel per tab.
//! The binary implements [`SurfaceSpawner`] with the real surface tasks;
//! tests implement it with recording channels.

use async_trait::async_trait;
use tokio::sync::mpsc;

use tabwatch_protocols::{SurfaceMessage, TabId};

/// The three fixed surfaces of the listening window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurfaceKind {
    Monitor,
    Analysis,
    Insights,
}

impl SurfaceKind {
    /// The extension-page URL the surface tab is created with.
    pub fn page_url(&self) -> &'static str {
        match self {
            SurfaceKind::Monitor => "tabwatch://monitor",
            SurfaceKind::Analysis => "tabwatch://analysis",
            SurfaceKind::Insights => "tabwatch://insights",
        }
    }
}

/// Creates the message endpoint for a surface tab.
#[async_trait]
pub trait SurfaceSpawner: Send + Sync {
    /// Start the surface for `tab` and return the channel the coordinator
    /// should push [`SurfaceMessage`]s into.
    async fn spawn_surface(&self, kind: SurfaceKind, tab: TabId) -> mpsc::Sender<SurfaceMessage>;
}
