use super::*;

#[test]
fn test_short_text_kept_whole() {
    let page = PageDocument::new("Home", "short body");
    let snap = snapshot("https://example.com", &page);
    assert_eq!(snap.text, "short body");
    assert_eq!(snap.full_text, "short body");
    assert_eq!(snap.title, "Home");
    assert_eq!(snap.url, "https://example.com");
}

#[test]
fn test_preview_truncated_with_ellipsis() {
    let body = "a".repeat(100);
    let page = PageDocument::new("Long", body.clone());
    let snap = snapshot("https://example.com", &page);
    assert_eq!(snap.text, format!("{}...", "a".repeat(30)));
    assert_eq!(snap.full_text, body);
}

#[test]
fn test_preview_exactly_at_limit_has_no_ellipsis() {
    let body = "b".repeat(30);
    let page = PageDocument::new("Edge", body.clone());
    let snap = snapshot("https://example.com", &page);
    assert_eq!(snap.text, body);
}

#[test]
fn test_full_text_capped_at_limit() {
    let body = "c".repeat(5000);
    let page = PageDocument::new("Big", body);
    let snap = snapshot("https://example.com", &page);
    assert_eq!(snap.full_text.chars().count(), 1000);
}

#[test]
fn test_truncation_respects_multibyte_characters() {
    let body = "é".repeat(50);
    let page = PageDocument::new("Accents", body);
    let snap = snapshot("https://example.com", &page);
    assert_eq!(snap.text.chars().count(), 33); // 30 chars + "..."
    assert!(snap.text.ends_with("..."));
}

#[test]
fn test_meta_and_heading_carried_through() {
    let page = PageDocument::new("T", "body")
        .with_meta_description("desc")
        .with_main_heading("H1");
    let snap = snapshot("https://example.com", &page);
    assert_eq!(snap.meta_description, "desc");
    assert_eq!(snap.main_heading, "H1");
}

#[test]
fn test_is_web_url() {
    assert!(is_web_url("http://example.com"));
    assert!(is_web_url("https://example.com/page?q=1"));
    assert!(!is_web_url("chrome://settings"));
    assert!(!is_web_url("about:blank"));
    assert!(!is_web_url("tabwatch://monitor"));
    assert!(!is_web_url("not a url"));
    assert!(!is_web_url(""));
}
