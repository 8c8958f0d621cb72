//! Per-URL research cache, persisted through the state store.

#[cfg(test)]
#[path = "cache_tests.rs"]
mod tests;

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use tabwatch_storage::{keys, StateStore};

/// URL-to-analysis cache with write-through persistence.
///
/// The in-memory map is authoritative for the process lifetime; every
/// insert also rewrites the persisted copy so results survive restarts.
/// Whatever text the caller hands in gets cached, including offline mock
/// responses, and entries never expire.
pub struct ResearchCache {
    entries: HashMap<String, String>,
    store: Arc<dyn StateStore>,
}

impl ResearchCache {
    /// Load the persisted cache, tolerating an absent or malformed copy.
    pub async fn load(store: Arc<dyn StateStore>) -> Self {
        let entries = match store.get(keys::ANALYZED_URLS_CACHE).await {
            Ok(Some(value)) => match serde_json::from_value::<HashMap<String, String>>(value) {
                Ok(entries) => {
                    debug!("Loaded URL cache with {} entries", entries.len());
                    entries
                }
                Err(err) => {
                    warn!("Persisted URL cache is malformed, starting empty: {}", err);
                    HashMap::new()
                }
            },
            Ok(None) => HashMap::new(),
            Err(err) => {
                warn!("Could not read persisted URL cache: {}", err);
                HashMap::new()
            }
        };
        Self { entries, store }
    }

    pub fn get(&self, url: &str) -> Option<&str> {
        self.entries.get(url).map(String::as_str)
    }

    pub fn contains(&self, url: &str) -> bool {
        self.entries.contains_key(url)
    }

    /// Cache an analysis and persist the whole map. Persistence failures
    /// are logged; the in-memory entry stays either way.
    pub async fn insert(&mut self, url: impl Into<String>, analysis: impl Into<String>) {
        self.entries.insert(url.into(), analysis.into());
        match serde_json::to_value(&self.entries) {
            Ok(value) => {
                if let Err(err) = self.store.set(keys::ANALYZED_URLS_CACHE, value).await {
                    warn!("Could not persist URL cache: {}", err);
                }
            }
            Err(err) => warn!("Could not serialize URL cache: {}", err),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Raw persisted shape, for diagnostics.
    pub fn to_value(&self) -> Value {
        serde_json::to_value(&self.entries).unwrap_or(Value::Null)
    }
}
