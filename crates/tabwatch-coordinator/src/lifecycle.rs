//! Listening-window lifecycle tracking.

#[cfg(test)]
#[path = "lifecycle_tests.rs"]
mod tests;

use serde_json::json;
use tracing::{debug, info, warn};

use tabwatch_host::BrowserHost;
use tabwatch_protocols::{TabId, WindowId};
use tabwatch_storage::{StateStore, keys};

use crate::error::CoordinatorError;
use crate::registry::SurfaceRegistry;
use crate::spawner::{SurfaceKind, SurfaceSpawner};

/// Handle to the listening window and its three fixed tabs.
///
/// Either no handle exists at all, or every identifier refers to a
/// currently-open window/tab; the all-or-nothing invariant is enforced by
/// keeping the whole struct inside an `Option`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListeningWindow {
    pub window: WindowId,
    pub monitor_tab: TabId,
    pub analysis_tab: TabId,
    pub insights_tab: TabId,
}

impl ListeningWindow {
    /// Whether a tab is one of the extension's own surfaces.
    pub fn owns(&self, tab: TabId) -> bool {
        tab == self.monitor_tab || tab == self.analysis_tab || tab == self.insights_tab
    }

    pub fn tab_for(&self, kind: SurfaceKind) -> TabId {
        match kind {
            SurfaceKind::Monitor => self.monitor_tab,
            SurfaceKind::Analysis => self.analysis_tab,
            SurfaceKind::Insights => self.insights_tab,
        }
    }
}

/// Tracks the listening window across probes, restarts, and closures.
#[derive(Default)]
pub struct WindowTracker {
    handle: Option<ListeningWindow>,
}

impl WindowTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle(&self) -> Option<&ListeningWindow> {
        self.handle.as_ref()
    }

    /// Make sure a listening window with all three surface tabs exists,
    /// creating one if needed, and return its handle.
    ///
    /// Tab creation is sequential and ordered (monitor, then analysis, then
    /// insights); each id is recorded as it is created. The window id and
    /// the active flag are persisted as the final step.
    pub async fn ensure_listening_window(
        &mut self,
        host: &dyn BrowserHost,
        store: &dyn StateStore,
        spawner: &dyn SurfaceSpawner,
        registry: &SurfaceRegistry,
    ) -> Result<ListeningWindow, CoordinatorError> {
        // A live handle that still probes as open wins outright.
        if let Some(handle) = self.handle {
            if host.window_exists(handle.window).await {
                return Ok(handle);
            }
            debug!("Tracked listening window {} is gone", handle.window);
            self.clear(store, registry).await?;
        }

        // Try to re-adopt a window persisted by a previous run.
        if let Some(handle) = self.restore(host, store, spawner, registry).await? {
            info!("Re-adopted listening window {}", handle.window);
            self.handle = Some(handle);
            return Ok(handle);
        }

        let window = host.create_window().await?;
        info!("Created listening window {}", window);

        let mut tabs = [TabId(0); 3];
        let kinds = [
            SurfaceKind::Monitor,
            SurfaceKind::Analysis,
            SurfaceKind::Insights,
        ];
        for (slot, kind) in tabs.iter_mut().zip(kinds) {
            let tab = host.create_tab(window, kind.page_url()).await?;
            let sender = spawner.spawn_surface(kind, tab).await;
            registry.register(tab, sender);
            debug!("Created {:?} surface tab {}", kind, tab);
            *slot = tab;
        }

        let handle = ListeningWindow {
            window,
            monitor_tab: tabs[0],
            analysis_tab: tabs[1],
            insights_tab: tabs[2],
        };
        self.handle = Some(handle);

        store
            .set(keys::LISTENING_WINDOW_ID, json!(window.0))
            .await?;
        store.set(keys::EXTENSION_ACTIVE, json!(true)).await?;

        Ok(handle)
    }

    /// Probe for a persisted window and adopt its first three tabs in
    /// creation order. Any probe failure means "absent".
    async fn restore(
        &self,
        host: &dyn BrowserHost,
        store: &dyn StateStore,
        spawner: &dyn SurfaceSpawner,
        registry: &SurfaceRegistry,
    ) -> Result<Option<ListeningWindow>, CoordinatorError> {
        let Some(stored) = store.get(keys::LISTENING_WINDOW_ID).await? else {
            return Ok(None);
        };
        let Some(id) = stored.as_u64() else {
            warn!("Persisted window id is not a number: {}", stored);
            return Ok(None);
        };
        let window = WindowId(id);

        if !host.window_exists(window).await {
            debug!("Persisted listening window {} no longer exists", window);
            store.remove(keys::LISTENING_WINDOW_ID).await?;
            return Ok(None);
        }

        let tabs = match host.window_tabs(window).await {
            Ok(tabs) if tabs.len() >= 3 => tabs,
            Ok(_) => {
                // Missing surface tabs: treat the window as absent so a
                // complete one gets created.
                debug!("Persisted window {} has too few tabs", window);
                store.remove(keys::LISTENING_WINDOW_ID).await?;
                return Ok(None);
            }
            Err(_) => {
                store.remove(keys::LISTENING_WINDOW_ID).await?;
                return Ok(None);
            }
        };

        let kinds = [
            SurfaceKind::Monitor,
            SurfaceKind::Analysis,
            SurfaceKind::Insights,
        ];
        for (tab, kind) in tabs.iter().zip(kinds) {
            let sender = spawner.spawn_surface(kind, *tab).await;
            registry.register(*tab, sender);
        }

        Ok(Some(ListeningWindow {
            window,
            monitor_tab: tabs[0],
            analysis_tab: tabs[1],
            insights_tab: tabs[2],
        }))
    }

    /// React to a window-closed notification.
    ///
    /// Clears all identifiers and removes the persisted window id when the
    /// closed window is the tracked one; otherwise a no-op. Idempotent.
    pub async fn handle_window_removed(
        &mut self,
        window: WindowId,
        store: &dyn StateStore,
        registry: &SurfaceRegistry,
    ) -> Result<(), CoordinatorError> {
        match self.handle {
            Some(handle) if handle.window == window => {
                info!("Listening window {} was closed", window);
                self.clear(store, registry).await
            }
            _ => Ok(()),
        }
    }

    async fn clear(
        &mut self,
        store: &dyn StateStore,
        registry: &SurfaceRegistry,
    ) -> Result<(), CoordinatorError> {
        if let Some(handle) = self.handle.take() {
            registry.unregister(handle.monitor_tab);
            registry.unregister(handle.analysis_tab);
            registry.unregister(handle.insights_tab);
        }
        store.remove(keys::LISTENING_WINDOW_ID).await?;
        Ok(())
    }
}
