//! # tabwatch Protocols
//!
//! Shared definitions for the tabwatch coordinator and its surfaces:
//!
//! - Window/tab identifiers
//! - Content snapshot and latest-content record (with partial merge)
//! - The inter-surface message vocabulary
//! - Collaborator traits for the remote analysis/research services
//!
//! This crate is dependency-light by design: every other tabwatch crate
//! depends on it, and it depends on none of them.

pub mod collaborator;
pub mod error;
pub mod message;
pub mod snapshot;
pub mod types;

pub use collaborator::{ScreenshotAnalyzer, StockResearcher};
pub use error::CollaboratorError;
pub use message::{
    AnalysisStatus, CoordinatorReply, CoordinatorRequest, SurfaceMessage, SurfaceReply,
};
pub use snapshot::{ContentSnapshot, ContentUpdate, LatestContent, MergeOutcome};
pub use types::{TabId, WindowId};
