use chrono::Utc;

use tabwatch_protocols::snapshot::WAITING_TEXT;
use tabwatch_protocols::{LatestContent, SurfaceMessage, SurfaceReply};

use super::MonitorSurface;

fn record(url: &str, title: &str) -> LatestContent {
    LatestContent {
        url: url.to_string(),
        title: title.to_string(),
        text: "Preview text".to_string(),
        full_text: "Full body text".to_string(),
        meta_description: String::new(),
        main_heading: String::new(),
        screenshot: None,
        timestamp: Utc::now(),
    }
}

#[test]
fn starts_with_placeholders() {
    let surface = MonitorSurface::new();
    assert_eq!(surface.view().url, "Unknown URL");
    assert_eq!(surface.view().title, "No title available");
    assert_eq!(surface.view().preview, "No text available");
    assert_eq!(surface.view().full_text, "Full text not available.");
    assert!(surface.view().screenshot.is_none());
}

#[test]
fn update_content_replaces_view() {
    let mut surface = MonitorSurface::new();
    let reply = surface.handle_message(SurfaceMessage::UpdateContent {
        data: record("https://example.com/", "Example"),
    });

    assert_eq!(reply, Some(SurfaceReply::Received { received: true }));
    assert_eq!(surface.view().url, "https://example.com/");
    assert_eq!(surface.view().title, "Example");
    assert_eq!(surface.view().preview, "Preview text");
}

#[test]
fn empty_fields_keep_placeholders() {
    let mut surface = MonitorSurface::new();
    let mut data = record("https://example.com/", "");
    data.text = WAITING_TEXT.to_string();
    data.full_text = String::new();
    surface.handle_message(SurfaceMessage::UpdateContent { data });

    assert_eq!(surface.view().url, "https://example.com/");
    assert_eq!(surface.view().title, "No title available");
    assert_eq!(surface.view().preview, WAITING_TEXT);
    assert_eq!(surface.view().full_text, "Full text not available.");
}

#[test]
fn screenshot_sets_capture_time() {
    let mut surface = MonitorSurface::new();
    let mut data = record("https://example.com/", "Example");
    data.screenshot = Some("data:image/png;base64,AAA".to_string());
    let stamp = data.timestamp;
    surface.handle_message(SurfaceMessage::UpdateContent { data });

    assert_eq!(
        surface.view().screenshot.as_deref(),
        Some("data:image/png;base64,AAA")
    );
    assert_eq!(surface.view().screenshot_time, Some(stamp));
}

#[test]
fn unrelated_messages_are_ignored() {
    let mut surface = MonitorSurface::new();
    let reply = surface.handle_message(SurfaceMessage::AnalyzeUrl {
        url: "https://example.com/".to_string(),
    });
    assert!(reply.is_none());
    assert_eq!(surface.view().url, "Unknown URL");
}
