//! # tabwatch Surfaces
//!
//! The three pages of the listening window, rendered as long-running
//! tasks. Each surface owns its display state, consumes the coordinator's
//! [`SurfaceMessage`](tabwatch_protocols::SurfaceMessage) stream, and logs
//! its rendering through `tracing`:
//!
//! - [`MonitorSurface`]: the full latest-content record and screenshot
//! - [`AnalysisSurface`]: screenshot-analysis status and result
//! - [`InsightsSurface`]: per-URL stock research with cache, dedup gate,
//!   and offline mock fallback

pub mod analysis;
pub mod insights;
pub mod monitor;

pub use analysis::AnalysisSurface;
pub use insights::InsightsSurface;
pub use monitor::MonitorSurface;
