//! The inter-surface message vocabulary.
//!
//! The coordinator and its surfaces exchange a small fixed set of actions.
//! Every message is tagged with an `action` field in camelCase so the wire
//! shape matches the original extension protocol.

#[cfg(test)]
#[path = "message_tests.rs"]
mod tests;

use serde::{Deserialize, Serialize};

use crate::snapshot::{ContentSnapshot, LatestContent};

/// Requests sent to the coordinator (from surfaces, content scripts, or
/// user entry points).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum CoordinatorRequest {
    /// A page pushed its own content (content-script style).
    PageContent { data: ContentSnapshot },
    /// Pull the current latest-content record.
    GetLatestContent,
    /// Immediate extraction + capture, bypassing the timers.
    ForceRefresh,
    /// Trigger research for the current URL and focus the insights surface.
    GenerateInsights,
    /// Flip the activity flag.
    ToggleExtension,
    /// Query the activity flag.
    GetExtensionStatus,
}

/// Replies to [`CoordinatorRequest`]s.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CoordinatorReply {
    Content(LatestContent),
    Success { success: bool },
    Active { active: bool },
}

/// Screenshot-analysis status as displayed by the analysis surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnalysisStatus {
    Waiting,
    InProgress,
    Complete,
    Error,
}

/// Messages pushed from the coordinator to a surface tab.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum SurfaceMessage {
    /// Full latest-content record for the monitor surface.
    UpdateContent { data: LatestContent },
    /// Ask the insights surface to research a URL.
    AnalyzeUrl { url: String },
    /// Screenshot-analysis status transition for the analysis surface.
    UpdateAnalysisStatus {
        status: AnalysisStatus,
        message: String,
    },
    /// Final screenshot-analysis text for the analysis surface.
    UpdateAnalysisResult { result: String },
    /// Ask a page for its current content.
    GetContent,
}

/// Replies to [`SurfaceMessage`]s.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SurfaceReply {
    Received { received: bool },
    Content(ContentSnapshot),
}
