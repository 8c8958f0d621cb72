//! # tabwatch Host
//!
//! Abstraction over the browser environment the coordinator runs against:
//! windows, tabs, activation/navigation events, script-style content
//! extraction, and screenshot capture.
//!
//! The [`BrowserHost`] trait is the seam; [`SimulatedHost`] is an in-memory
//! implementation with registered page documents, used by the binary's demo
//! mode and by tests.

pub mod error;
pub mod extract;
pub mod host;
pub mod sim;

pub use error::HostError;
pub use extract::{is_web_url, snapshot, PageDocument};
pub use host::{BrowserHost, TabEvent, TabInfo};
pub use sim::SimulatedHost;
