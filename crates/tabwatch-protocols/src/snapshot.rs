//! Page content snapshots and the shared latest-content record.

#[cfg(test)]
#[path = "snapshot_tests.rs"]
mod tests;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum length of the short text preview, in characters.
pub const PREVIEW_LIMIT: usize = 30;

/// Maximum length of the captured full text, in characters.
pub const FULL_TEXT_LIMIT: usize = 1000;

/// Text shown for pages whose content cannot be accessed (non-web schemes,
/// restricted pages).
pub const RESTRICTED_PAGE_TEXT: &str = "Cannot access content on this page type";

/// Initial text before any content has been observed.
pub const WAITING_TEXT: &str = "Waiting for content...";

/// A snapshot of one page's content, produced fresh on every extraction.
///
/// Immutable once produced and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentSnapshot {
    pub url: String,
    pub title: String,
    /// Short preview, at most [`PREVIEW_LIMIT`] characters plus an ellipsis.
    pub text: String,
    /// Body text capped at [`FULL_TEXT_LIMIT`] characters.
    pub full_text: String,
    #[serde(default)]
    pub meta_description: String,
    #[serde(default)]
    pub main_heading: String,
}

impl ContentSnapshot {
    /// Placeholder snapshot for a page whose content cannot be extracted.
    pub fn restricted(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: String::new(),
            text: RESTRICTED_PAGE_TEXT.to_string(),
            full_text: RESTRICTED_PAGE_TEXT.to_string(),
            meta_description: String::new(),
            main_heading: String::new(),
        }
    }

    /// Convert into a partial update carrying every textual field.
    pub fn into_update(self) -> ContentUpdate {
        ContentUpdate {
            url: Some(self.url),
            title: Some(self.title),
            text: Some(self.text),
            full_text: Some(self.full_text),
            meta_description: Some(self.meta_description),
            main_heading: Some(self.main_heading),
            screenshot: None,
        }
    }
}

/// A partial update to the latest-content record.
///
/// Only fields that are `Some` are applied; absent fields never blank an
/// existing value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_heading: Option<String>,
    /// Screenshot as an image data URI.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screenshot: Option<String>,
}

impl ContentUpdate {
    /// An update carrying only a screenshot.
    pub fn screenshot(data_uri: impl Into<String>) -> Self {
        Self {
            screenshot: Some(data_uri.into()),
            ..Default::default()
        }
    }
}

/// What a merge changed, as seen by the fan-out dispatcher.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeOutcome {
    /// The record's URL is different from before the merge.
    pub url_changed: bool,
    /// The merge introduced a screenshot value different from before.
    pub screenshot_changed: bool,
}

/// The single current "latest content" record.
///
/// Owned exclusively by the coordinator; mutated only through
/// [`LatestContent::apply`]. Lives for the process lifetime and is never
/// persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LatestContent {
    pub url: String,
    pub title: String,
    pub text: String,
    pub full_text: String,
    pub meta_description: String,
    pub main_heading: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screenshot: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl Default for LatestContent {
    fn default() -> Self {
        Self {
            url: String::new(),
            title: String::new(),
            text: WAITING_TEXT.to_string(),
            full_text: String::new(),
            meta_description: String::new(),
            main_heading: String::new(),
            screenshot: None,
            timestamp: Utc::now(),
        }
    }
}

impl LatestContent {
    /// Merge a partial update field by field.
    ///
    /// Supplied fields overwrite, absent fields are left untouched, and the
    /// timestamp is always reset to now regardless of which fields changed.
    pub fn apply(&mut self, update: ContentUpdate) -> MergeOutcome {
        let mut outcome = MergeOutcome::default();

        if let Some(url) = update.url {
            outcome.url_changed = url != self.url;
            self.url = url;
        }
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(text) = update.text {
            self.text = text;
        }
        if let Some(full_text) = update.full_text {
            self.full_text = full_text;
        }
        if let Some(meta_description) = update.meta_description {
            self.meta_description = meta_description;
        }
        if let Some(main_heading) = update.main_heading {
            self.main_heading = main_heading;
        }
        if let Some(screenshot) = update.screenshot {
            outcome.screenshot_changed = self.screenshot.as_deref() != Some(screenshot.as_str());
            self.screenshot = Some(screenshot);
        }

        self.timestamp = Utc::now();
        outcome
    }
}
