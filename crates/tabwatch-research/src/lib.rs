//! # tabwatch Research
//!
//! Everything behind the insights surface's "research this URL" path:
//!
//! - [`RemoteCollaborators`]: the HTTP client for the local analysis
//!   server (`/analyze-screenshot` and `/stock-research`)
//! - [`ResearchCache`]: per-URL result cache persisted to the state store
//! - [`mock_research`]: domain-keyed offline responses used when the
//!   server is unreachable
//! - [`report`]: structured parsing of research text into a report

pub mod cache;
pub mod client;
pub mod fallback;
pub mod report;

pub use cache::ResearchCache;
pub use client::{RemoteCollaborators, ResearchConfig};
pub use fallback::mock_research;
pub use report::{format_report, parse_report, ResearchReport};
