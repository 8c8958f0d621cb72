//! The coordinator task: event loop, timers, and command handling.

#[cfg(test)]
#[path = "monitor_tests.rs"]
mod tests;

use std::sync::Arc;

use serde_json::json;
use tokio::sync::{broadcast, mpsc};
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use tabwatch_host::{is_web_url, BrowserHost, TabEvent, TabInfo};
use tabwatch_protocols::{
    ContentSnapshot, ContentUpdate, CoordinatorReply, CoordinatorRequest, ScreenshotAnalyzer,
};
use tabwatch_storage::{keys, StateStore};

use crate::config::CoordinatorConfig;
use crate::dispatch::Dispatcher;
use crate::error::CoordinatorError;
use crate::handle::{Command, CoordinatorHandle};
use crate::lifecycle::WindowTracker;
use crate::registry::SurfaceRegistry;
use crate::spawner::SurfaceSpawner;

/// The single task that owns all coordinator state.
///
/// Everything mutable (the latest-content record, the listening-window
/// handle, the activity flag) lives inside the loop; the rest of the
/// process talks to it through a [`CoordinatorHandle`] or by emitting host
/// events.
pub struct Coordinator {
    host: Arc<dyn BrowserHost>,
    store: Arc<dyn StateStore>,
    spawner: Arc<dyn SurfaceSpawner>,
    registry: Arc<SurfaceRegistry>,
    dispatcher: Dispatcher,
    tracker: WindowTracker,
    active: bool,
    config: CoordinatorConfig,
    commands: mpsc::Receiver<Command>,
}

impl Coordinator {
    /// Build a coordinator and the handle used to reach it.
    pub fn new(
        host: Arc<dyn BrowserHost>,
        store: Arc<dyn StateStore>,
        analyzer: Arc<dyn ScreenshotAnalyzer>,
        spawner: Arc<dyn SurfaceSpawner>,
        config: CoordinatorConfig,
    ) -> (Self, CoordinatorHandle) {
        let (command_tx, commands) = mpsc::channel(config.command_buffer);
        let registry = Arc::new(SurfaceRegistry::new());
        let dispatcher = Dispatcher::new(Arc::clone(&registry), analyzer);
        let coordinator = Self {
            host,
            store,
            spawner,
            registry,
            dispatcher,
            tracker: WindowTracker::new(),
            active: true,
            config,
            commands,
        };
        (coordinator, CoordinatorHandle::new(command_tx))
    }

    /// Run until shutdown or until the command channel closes.
    pub async fn run(mut self) -> Result<(), CoordinatorError> {
        self.active = match self.store.get(keys::EXTENSION_ACTIVE).await? {
            Some(value) => value.as_bool().unwrap_or(true),
            None => true,
        };
        info!(active = self.active, "Coordinator starting");

        if let Err(err) = self.ensure_window().await {
            warn!("Could not open listening window at startup: {}", err);
        }

        let mut events = self.host.subscribe();

        let mut content_tick = interval(self.config.content_poll_interval());
        content_tick.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut screenshot_tick = interval(self.config.screenshot_interval());
        screenshot_tick.set_missed_tick_behavior(MissedTickBehavior::Skip);
        // The first tick of an interval fires immediately; consume it so
        // the timers only fire after a full period.
        content_tick.tick().await;
        screenshot_tick.tick().await;

        loop {
            tokio::select! {
                event = events.recv() => match event {
                    Ok(event) => self.handle_event(event).await,
                    Err(broadcast::error::RecvError::Lagged(missed)) => {
                        warn!("Dropped {} host events", missed);
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        info!("Host event stream closed; stopping");
                        break;
                    }
                },
                _ = content_tick.tick() => {
                    if self.active {
                        self.probe_active_tab().await;
                    }
                }
                _ = screenshot_tick.tick() => {
                    if self.active {
                        self.capture_active_tab().await;
                    }
                }
                command = self.commands.recv() => match command {
                    Some(Command::Request { request, reply }) => {
                        let response = self.handle_request(request).await;
                        let _ = reply.send(response);
                    }
                    Some(Command::OpenWindow) => {
                        if let Err(err) = self.ensure_window().await {
                            warn!("Could not open listening window: {}", err);
                        }
                    }
                    Some(Command::Shutdown) | None => break,
                },
            }
        }

        info!("Coordinator stopped");
        Ok(())
    }

    async fn handle_event(&mut self, event: TabEvent) {
        match event {
            TabEvent::WindowRemoved { window } => {
                // Lifecycle bookkeeping is never gated on the activity flag.
                if let Err(err) = self
                    .tracker
                    .handle_window_removed(window, self.store.as_ref(), &self.registry)
                    .await
                {
                    warn!("Window-removed cleanup failed: {}", err);
                }
            }
            TabEvent::Activated { tab } if self.active => {
                if self.is_surface_tab(tab) {
                    return;
                }
                match self.host.tab_info(tab).await {
                    Ok(info) => {
                        self.probe_tab(&info).await;
                    }
                    Err(err) => debug!("Activated tab {} vanished: {}", tab, err),
                }
            }
            TabEvent::NavigationComplete { tab, .. } if self.active => {
                if self.is_surface_tab(tab) {
                    return;
                }
                // Only the active tab drives the latest-content record.
                match self.host.active_tab().await {
                    Ok(Some(info)) if info.id == tab => {
                        self.probe_tab(&info).await;
                    }
                    Ok(_) => {}
                    Err(err) => debug!("Active-tab lookup failed: {}", err),
                }
            }
            _ => {}
        }
    }

    async fn handle_request(&mut self, request: CoordinatorRequest) -> CoordinatorReply {
        match request {
            CoordinatorRequest::GetLatestContent => {
                CoordinatorReply::Content(self.dispatcher.latest().clone())
            }
            CoordinatorRequest::PageContent { data } => {
                self.dispatcher
                    .merge_and_broadcast(data.into_update(), self.tracker.handle());
                CoordinatorReply::Success { success: true }
            }
            CoordinatorRequest::ForceRefresh => {
                // Explicit user action: runs even while the flag is off.
                let refreshed = self.probe_active_tab().await;
                self.capture_active_tab().await;
                CoordinatorReply::Success { success: refreshed }
            }
            CoordinatorRequest::GenerateInsights => {
                let window = match self.ensure_window().await {
                    Ok(window) => window,
                    Err(err) => {
                        warn!("Could not open listening window: {}", err);
                        return CoordinatorReply::Success { success: false };
                    }
                };
                self.dispatcher.trigger_insights(&window);
                if let Err(err) = self.host.focus_tab(window.insights_tab).await {
                    warn!("Could not focus insights tab: {}", err);
                }
                CoordinatorReply::Success { success: true }
            }
            CoordinatorRequest::ToggleExtension => {
                self.active = !self.active;
                info!(active = self.active, "Activity flag toggled");
                if let Err(err) = self
                    .store
                    .set(keys::EXTENSION_ACTIVE, json!(self.active))
                    .await
                {
                    warn!("Could not persist activity flag: {}", err);
                }
                CoordinatorReply::Active {
                    active: self.active,
                }
            }
            CoordinatorRequest::GetExtensionStatus => CoordinatorReply::Active {
                active: self.active,
            },
        }
    }

    async fn ensure_window(&mut self) -> Result<crate::lifecycle::ListeningWindow, CoordinatorError> {
        self.tracker
            .ensure_listening_window(
                self.host.as_ref(),
                self.store.as_ref(),
                self.spawner.as_ref(),
                &self.registry,
            )
            .await
    }

    fn is_surface_tab(&self, tab: tabwatch_protocols::TabId) -> bool {
        self.tracker.handle().is_some_and(|w| w.owns(tab))
    }

    /// Extract content from the current active tab and merge it. Returns
    /// whether a merge happened.
    async fn probe_active_tab(&mut self) -> bool {
        let info = match self.host.active_tab().await {
            Ok(Some(info)) => info,
            Ok(None) => return false,
            Err(err) => {
                debug!("Active-tab lookup failed: {}", err);
                return false;
            }
        };
        if self.is_surface_tab(info.id) {
            return false;
        }
        self.probe_tab(&info).await
    }

    async fn probe_tab(&mut self, info: &TabInfo) -> bool {
        let snapshot = if is_web_url(&info.url) {
            match self.host.extract_content(info.id).await {
                Ok(snapshot) => snapshot,
                Err(err) => {
                    // Pages vanish and scripts fail mid-probe; the record
                    // keeps its previous value.
                    debug!("Extraction in {} failed: {}", info.id, err);
                    return false;
                }
            }
        } else {
            ContentSnapshot::restricted(info.url.clone())
        };

        self.dispatcher
            .merge_and_broadcast(snapshot.into_update(), self.tracker.handle());
        true
    }

    /// Capture a screenshot of the active tab and merge it.
    async fn capture_active_tab(&mut self) {
        let info = match self.host.active_tab().await {
            Ok(Some(info)) => info,
            Ok(None) => return,
            Err(err) => {
                debug!("Active-tab lookup failed: {}", err);
                return;
            }
        };
        if self.is_surface_tab(info.id) || !is_web_url(&info.url) {
            return;
        }
        match self.host.capture_screenshot(info.id).await {
            Ok(data_uri) => {
                self.dispatcher
                    .merge_and_broadcast(ContentUpdate::screenshot(data_uri), self.tracker.handle());
            }
            Err(err) => debug!("Screenshot capture in {} failed: {}", info.id, err),
        }
    }
}
