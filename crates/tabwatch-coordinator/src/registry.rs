//! Surface registry: tab id to message channel, for fan-out.

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;

use dashmap::DashMap;
use tokio::sync::mpsc;
use tracing::debug;

use tabwatch_protocols::{SurfaceMessage, TabId};

use crate::error::CoordinatorError;

/// Maps surface tab ids to their message channels.
///
/// Thread-safe; the dispatcher and spawned analysis tasks share one
/// registry behind an `Arc`.
#[derive(Default)]
pub struct SurfaceRegistry {
    senders: DashMap<TabId, mpsc::Sender<SurfaceMessage>>,
}

impl SurfaceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the channel for a surface tab.
    pub fn register(&self, tab: TabId, sender: mpsc::Sender<SurfaceMessage>) {
        debug!("Surface registered for {}", tab);
        self.senders.insert(tab, sender);
    }

    /// Remove a surface channel. Removing an unknown tab is a no-op.
    pub fn unregister(&self, tab: TabId) {
        self.senders.remove(&tab);
    }

    pub fn contains(&self, tab: TabId) -> bool {
        self.senders.contains_key(&tab)
    }

    pub fn len(&self) -> usize {
        self.senders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.senders.is_empty()
    }

    /// Push a message to a surface without blocking the coordinator loop.
    ///
    /// Delivery failure (unknown tab, closed or saturated channel) is an
    /// error for the caller to log; it is never retried.
    pub fn send(&self, tab: TabId, message: SurfaceMessage) -> Result<(), CoordinatorError> {
        let sender = self
            .senders
            .get(&tab)
            .ok_or(CoordinatorError::SurfaceNotRegistered(tab))?;
        sender
            .try_send(message)
            .map_err(|_| CoordinatorError::SurfaceUnavailable(tab))
    }
}
