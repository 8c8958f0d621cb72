//! Coordinator configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Coordinator configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoordinatorConfig {
    /// Content poll interval in milliseconds.
    #[serde(default = "default_content_poll_interval_ms")]
    pub content_poll_interval_ms: u64,

    /// Screenshot capture interval in milliseconds.
    #[serde(default = "default_screenshot_interval_ms")]
    pub screenshot_interval_ms: u64,

    /// Command channel capacity.
    #[serde(default = "default_command_buffer")]
    pub command_buffer: usize,

    /// Per-surface message channel capacity.
    #[serde(default = "default_surface_buffer")]
    pub surface_buffer: usize,
}

fn default_content_poll_interval_ms() -> u64 {
    3_000
}

fn default_screenshot_interval_ms() -> u64 {
    10_000
}

fn default_command_buffer() -> usize {
    64
}

fn default_surface_buffer() -> usize {
    32
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            content_poll_interval_ms: default_content_poll_interval_ms(),
            screenshot_interval_ms: default_screenshot_interval_ms(),
            command_buffer: default_command_buffer(),
            surface_buffer: default_surface_buffer(),
        }
    }
}

impl CoordinatorConfig {
    pub fn content_poll_interval(&self) -> Duration {
        Duration::from_millis(self.content_poll_interval_ms.max(1))
    }

    pub fn screenshot_interval(&self) -> Duration {
        Duration::from_millis(self.screenshot_interval_ms.max(1))
    }
}
