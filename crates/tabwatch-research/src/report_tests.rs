use super::{format_report, parse_report};
use crate::mock_research;

#[test]
fn parses_full_stock_analysis() {
    let analysis = mock_research("https://www.nvidia.com/");
    let report = parse_report(&analysis, "https://www.nvidia.com/").unwrap();

    assert_eq!(report.company_name, "NVIDIA Corporation");
    assert_eq!(report.ticker, "NVDA");
    assert_eq!(report.exchange, "NASDAQ");
    assert!(report.revenue);
    assert!(report.net_income);
    assert!(report.market_cap);

    let forms: Vec<&str> = report.filings.iter().map(|f| f.form.as_str()).collect();
    assert_eq!(forms, vec!["10-K", "10-Q", "8-K", "Forms 3-4-5", "Schedule 13D"]);
    assert_eq!(report.filings[0].filed, "Filed on February 22");
}

#[test]
fn non_stock_text_is_not_a_report() {
    assert!(parse_report("Just a blog post about cooking.", "https://x.example/").is_none());
    // The generic mock analysis carries no stock markers either.
    let generic = mock_research("https://docs.rs/");
    assert!(parse_report(&generic, "https://docs.rs/").is_none());
}

#[test]
fn missing_fields_fall_back_to_placeholders() {
    let report = parse_report("Listed on NASDAQ recently.", "https://x.example/").unwrap();
    assert_eq!(report.company_name, "Company");
    assert_eq!(report.ticker, "N/A");
    assert_eq!(report.exchange, "N/A");
    assert!(report.filings.is_empty());
}

#[test]
fn format_renders_sections_and_links() {
    let analysis = mock_research("https://www.apple.com/");
    let formatted = format_report(&analysis, "https://www.apple.com/");

    assert!(formatted.starts_with("Apple Inc. (AAPL: NASDAQ)"));
    assert!(formatted.contains("Company Overview"));
    assert!(formatted.contains("SEC Filings"));
    assert!(formatted.contains("Financial Highlights"));
    assert!(formatted.contains("https://finance.yahoo.com/quote/AAPL"));
    assert!(formatted.contains("https://www.sec.gov/edgar/search/#/entityName=Apple Inc."));
    assert!(formatted.contains("https://www.apple.com/investors"));
}

#[test]
fn format_passes_plain_text_through() {
    let text = "No listed company found for this site.";
    assert_eq!(format_report(text, "https://x.example/"), text);
}
