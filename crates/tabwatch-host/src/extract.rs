//! Content extraction: a pure function from a page document to a snapshot.

#[cfg(test)]
#[path = "extract_tests.rs"]
mod tests;

use tabwatch_protocols::snapshot::{ContentSnapshot, FULL_TEXT_LIMIT, PREVIEW_LIMIT};
use url::Url;

/// The raw material a page exposes to extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageDocument {
    pub title: String,
    pub body_text: String,
    pub meta_description: String,
    pub main_heading: String,
}

impl PageDocument {
    pub fn new(title: impl Into<String>, body_text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body_text: body_text.into(),
            ..Default::default()
        }
    }

    pub fn with_meta_description(mut self, description: impl Into<String>) -> Self {
        self.meta_description = description.into();
        self
    }

    pub fn with_main_heading(mut self, heading: impl Into<String>) -> Self {
        self.main_heading = heading.into();
        self
    }
}

/// Whether a URL points at a regular web page (http/https scheme).
///
/// Internal pages (`about:`, `chrome:`, extension pages) are not
/// extractable and get a placeholder snapshot instead.
pub fn is_web_url(url: &str) -> bool {
    match Url::parse(url) {
        Ok(parsed) => matches!(parsed.scheme(), "http" | "https"),
        Err(_) => false,
    }
}

/// Produce a fresh snapshot of a page. Pure and synchronous.
///
/// The preview is capped at [`PREVIEW_LIMIT`] characters with a trailing
/// ellipsis when truncated; the full text at [`FULL_TEXT_LIMIT`]
/// characters. Truncation counts characters, never splitting a code point.
pub fn snapshot(url: &str, page: &PageDocument) -> ContentSnapshot {
    ContentSnapshot {
        url: url.to_string(),
        title: page.title.clone(),
        text: preview(&page.body_text),
        full_text: truncate_chars(&page.body_text, FULL_TEXT_LIMIT),
        meta_description: page.meta_description.clone(),
        main_heading: page.main_heading.clone(),
    }
}

fn preview(text: &str) -> String {
    let mut out = truncate_chars(text, PREVIEW_LIMIT);
    if out.len() < text.len() {
        out.push_str("...");
    }
    out
}

fn truncate_chars(text: &str, limit: usize) -> String {
    text.chars().take(limit).collect()
}
