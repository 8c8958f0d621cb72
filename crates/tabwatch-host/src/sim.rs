//! In-memory browser host simulator.

#[cfg(test)]
#[path = "sim_tests.rs"]
mod tests;

use std::collections::HashMap;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use tokio::sync::{RwLock, broadcast};
use tracing::debug;

use tabwatch_protocols::{ContentSnapshot, TabId, WindowId};

use crate::error::HostError;
use crate::extract::{self, PageDocument};
use crate::host::{BrowserHost, TabEvent, TabInfo};

struct TabState {
    window: WindowId,
    url: String,
}

#[derive(Default)]
struct SimState {
    next_window: u64,
    next_tab: u64,
    /// Tab ids per window, in creation order.
    windows: HashMap<WindowId, Vec<TabId>>,
    tabs: HashMap<TabId, TabState>,
    active_tab: Option<TabId>,
    /// Installed site content, keyed by URL.
    pages: HashMap<String, PageDocument>,
}

/// An in-memory [`BrowserHost`] with registered page documents.
///
/// Screenshots are deterministic data URIs derived from the tab's URL and
/// page content, so an unchanged page yields an unchanged screenshot.
pub struct SimulatedHost {
    state: RwLock<SimState>,
    events: broadcast::Sender<TabEvent>,
}

impl Default for SimulatedHost {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatedHost {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(128);
        Self {
            state: RwLock::new(SimState::default()),
            events,
        }
    }

    /// Register page content for a URL. Tabs navigated to this URL expose
    /// the document to extraction and capture.
    pub async fn install_page(&self, url: impl Into<String>, page: PageDocument) {
        self.state.write().await.pages.insert(url.into(), page);
    }

    /// Navigate a tab, emitting a navigation-complete event.
    pub async fn navigate(&self, tab: TabId, url: &str) -> Result<(), HostError> {
        {
            let mut state = self.state.write().await;
            let tab_state = state.tabs.get_mut(&tab).ok_or(HostError::TabNotFound(tab))?;
            tab_state.url = url.to_string();
        }
        debug!("sim: {} navigated to {}", tab, url);
        let _ = self.events.send(TabEvent::NavigationComplete {
            tab,
            url: url.to_string(),
        });
        Ok(())
    }

    /// Make a tab the active tab, emitting an activation event.
    pub async fn activate(&self, tab: TabId) -> Result<(), HostError> {
        {
            let mut state = self.state.write().await;
            if !state.tabs.contains_key(&tab) {
                return Err(HostError::TabNotFound(tab));
            }
            state.active_tab = Some(tab);
        }
        debug!("sim: {} activated", tab);
        let _ = self.events.send(TabEvent::Activated { tab });
        Ok(())
    }

    fn data_uri(url: &str, page: Option<&PageDocument>) -> String {
        let body = page.map(|p| p.body_text.as_str()).unwrap_or_default();
        let payload = format!("PNG|{}|{}", url, body);
        format!("data:image/png;base64,{}", BASE64.encode(payload))
    }
}

#[async_trait]
impl BrowserHost for SimulatedHost {
    async fn create_window(&self) -> Result<WindowId, HostError> {
        let mut state = self.state.write().await;
        state.next_window += 1;
        let id = WindowId(state.next_window);
        state.windows.insert(id, Vec::new());
        debug!("sim: created {}", id);
        Ok(id)
    }

    async fn create_tab(&self, window: WindowId, url: &str) -> Result<TabId, HostError> {
        let id = {
            let mut state = self.state.write().await;
            if !state.windows.contains_key(&window) {
                return Err(HostError::WindowNotFound(window));
            }
            state.next_tab += 1;
            let id = TabId(state.next_tab);
            state.tabs.insert(
                id,
                TabState {
                    window,
                    url: url.to_string(),
                },
            );
            state
                .windows
                .get_mut(&window)
                .ok_or(HostError::WindowNotFound(window))?
                .push(id);
            state.active_tab = Some(id);
            id
        };
        debug!("sim: created {} in {} at {}", id, window, url);
        let _ = self.events.send(TabEvent::Activated { tab: id });
        Ok(id)
    }

    async fn window_exists(&self, window: WindowId) -> bool {
        self.state.read().await.windows.contains_key(&window)
    }

    async fn window_tabs(&self, window: WindowId) -> Result<Vec<TabId>, HostError> {
        self.state
            .read()
            .await
            .windows
            .get(&window)
            .cloned()
            .ok_or(HostError::WindowNotFound(window))
    }

    async fn active_tab(&self) -> Result<Option<TabInfo>, HostError> {
        let state = self.state.read().await;
        let Some(id) = state.active_tab else {
            return Ok(None);
        };
        let tab = state.tabs.get(&id).ok_or(HostError::TabNotFound(id))?;
        Ok(Some(TabInfo {
            id,
            window: tab.window,
            url: tab.url.clone(),
            title: state
                .pages
                .get(&tab.url)
                .map(|p| p.title.clone())
                .unwrap_or_default(),
        }))
    }

    async fn tab_info(&self, tab: TabId) -> Result<TabInfo, HostError> {
        let state = self.state.read().await;
        let tab_state = state.tabs.get(&tab).ok_or(HostError::TabNotFound(tab))?;
        Ok(TabInfo {
            id: tab,
            window: tab_state.window,
            url: tab_state.url.clone(),
            title: state
                .pages
                .get(&tab_state.url)
                .map(|p| p.title.clone())
                .unwrap_or_default(),
        })
    }

    async fn focus_tab(&self, tab: TabId) -> Result<(), HostError> {
        self.activate(tab).await
    }

    async fn close_window(&self, window: WindowId) -> Result<(), HostError> {
        {
            let mut state = self.state.write().await;
            let tabs = state
                .windows
                .remove(&window)
                .ok_or(HostError::WindowNotFound(window))?;
            for tab in tabs {
                state.tabs.remove(&tab);
                if state.active_tab == Some(tab) {
                    state.active_tab = None;
                }
            }
        }
        debug!("sim: closed {}", window);
        let _ = self.events.send(TabEvent::WindowRemoved { window });
        Ok(())
    }

    async fn extract_content(&self, tab: TabId) -> Result<ContentSnapshot, HostError> {
        let state = self.state.read().await;
        let tab_state = state.tabs.get(&tab).ok_or(HostError::TabNotFound(tab))?;
        let page = state
            .pages
            .get(&tab_state.url)
            .ok_or_else(|| HostError::PageInaccessible(tab_state.url.clone()))?;
        Ok(extract::snapshot(&tab_state.url, page))
    }

    async fn capture_screenshot(&self, tab: TabId) -> Result<String, HostError> {
        let state = self.state.read().await;
        let tab_state = state.tabs.get(&tab).ok_or(HostError::TabNotFound(tab))?;
        Ok(Self::data_uri(
            &tab_state.url,
            state.pages.get(&tab_state.url),
        ))
    }

    fn subscribe(&self) -> broadcast::Receiver<TabEvent> {
        self.events.subscribe()
    }
}
