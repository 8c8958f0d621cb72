//! Structured rendering of research results.
//!
//! Research answers come back as loosely formatted prose. When the text
//! looks like a stock analysis, it is parsed into a [`ResearchReport`] and
//! rendered as a sectioned report with filing and quote links; anything
//! else is passed through verbatim. Parsing and rendering are pure
//! functions with no coordinator state.

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

static COMPANY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"is related to ([^,]+),").unwrap());
static TICKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Stock Ticker Symbol[^\w]+([A-Z]+)").unwrap());
static EXCHANGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Exchange[^\w]+(NASDAQ|NYSE|AMEX|OTC)").unwrap());
static TEN_K_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"10-K[^:]*:([^,\n]+)").unwrap());
static TEN_Q_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"10-Q[^:]*:([^,\n]+)").unwrap());

/// One SEC filing row of a report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filing {
    pub form: String,
    pub filed: String,
    pub description: String,
}

/// A stock-analysis result broken into its displayable parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResearchReport {
    pub company_name: String,
    pub ticker: String,
    pub exchange: String,
    pub url: String,
    pub filings: Vec<Filing>,
    pub revenue: bool,
    pub net_income: bool,
    pub market_cap: bool,
}

impl ResearchReport {
    pub fn quote_url(&self) -> String {
        format!("https://finance.yahoo.com/quote/{}", self.ticker)
    }

    pub fn edgar_url(&self) -> String {
        format!(
            "https://www.sec.gov/edgar/search/#/entityName={}",
            self.company_name
        )
    }

    /// `<scheme>://<host>/investors`, derived from the analyzed URL.
    pub fn investor_relations_url(&self) -> Option<String> {
        let parsed = Url::parse(&self.url).ok()?;
        let host = parsed.host_str()?;
        Some(format!("{}://{}/investors", parsed.scheme(), host))
    }
}

/// Parse a research answer into a report.
///
/// Returns `None` when the text does not look like a stock analysis
/// (no ticker-symbol or exchange markers), in which case the raw text is
/// the report.
pub fn parse_report(analysis: &str, url: &str) -> Option<ResearchReport> {
    let looks_like_stock = analysis.contains("Stock Ticker Symbol")
        || analysis.contains("NASDAQ")
        || analysis.contains("NYSE");
    if !looks_like_stock {
        return None;
    }

    let company_name = COMPANY_RE
        .captures(analysis)
        .map(|c| c[1].trim().to_string())
        .unwrap_or_else(|| "Company".to_string());
    let ticker = TICKER_RE
        .captures(analysis)
        .map(|c| c[1].to_string())
        .unwrap_or_else(|| "N/A".to_string());
    let exchange = EXCHANGE_RE
        .captures(analysis)
        .map(|c| c[1].to_string())
        .unwrap_or_else(|| "N/A".to_string());

    let mut filings = Vec::new();
    if analysis.contains("10-K") {
        let filed = TEN_K_RE
            .captures(analysis)
            .map(|c| c[1].trim().to_string())
            .unwrap_or_else(|| "Recent".to_string());
        filings.push(Filing {
            form: "10-K".to_string(),
            filed,
            description: "Annual Report".to_string(),
        });
    }
    if analysis.contains("10-Q") {
        let filed = TEN_Q_RE
            .captures(analysis)
            .map(|c| c[1].trim().to_string())
            .unwrap_or_else(|| "Recent".to_string());
        filings.push(Filing {
            form: "10-Q".to_string(),
            filed,
            description: "Quarterly Report".to_string(),
        });
    }
    if analysis.contains("8-K") {
        filings.push(Filing {
            form: "8-K".to_string(),
            filed: "Various".to_string(),
            description: "Current Reports".to_string(),
        });
    }
    if analysis.contains("Forms 3-4-5") || analysis.contains("Insider Transactions") {
        filings.push(Filing {
            form: "Forms 3-4-5".to_string(),
            filed: "Various".to_string(),
            description: "Insider Transactions".to_string(),
        });
    }
    if analysis.contains("Schedule 13D") || analysis.contains("Beneficial Ownership") {
        filings.push(Filing {
            form: "Schedule 13D".to_string(),
            filed: "Various".to_string(),
            description: "Beneficial Ownership".to_string(),
        });
    }

    Some(ResearchReport {
        company_name,
        ticker,
        exchange,
        url: url.to_string(),
        filings,
        revenue: analysis.contains("Revenue"),
        net_income: analysis.contains("Income"),
        market_cap: analysis.contains("Market Cap"),
    })
}

/// Render a research answer for display.
pub fn format_report(analysis: &str, url: &str) -> String {
    let Some(report) = parse_report(analysis, url) else {
        return analysis.to_string();
    };

    let mut out = String::new();
    out.push_str(&format!(
        "{} ({}: {})\n",
        report.company_name, report.ticker, report.exchange
    ));

    out.push_str("\nCompany Overview\n");
    out.push_str(&format!("  Website:  {}\n", report.url));
    out.push_str(&format!("  Ticker:   {}\n", report.ticker));
    out.push_str(&format!("  Exchange: {}\n", report.exchange));

    if !report.filings.is_empty() {
        out.push_str("\nSEC Filings\n");
        for filing in &report.filings {
            out.push_str(&format!(
                "  {:<12} {:<20} {}\n",
                filing.form, filing.filed, filing.description
            ));
        }
        out.push_str(&format!("  Search filings: {}\n", report.edgar_url()));
    }

    if report.revenue || report.net_income || report.market_cap {
        out.push_str("\nFinancial Highlights\n");
        if report.revenue {
            out.push_str(&format!("  Revenue:    see {}\n", report.quote_url()));
        }
        if report.net_income {
            out.push_str(&format!("  Net Income: see {}\n", report.quote_url()));
        }
        if report.market_cap {
            out.push_str(&format!("  Market Cap: see {}\n", report.quote_url()));
        }
    }

    out.push_str("\nExternal Resources\n");
    out.push_str(&format!("  SEC EDGAR:     {}\n", report.edgar_url()));
    out.push_str(&format!("  Yahoo Finance: {}\n", report.quote_url()));
    if let Some(ir) = report.investor_relations_url() {
        out.push_str(&format!("  Investor Relations: {}\n", ir));
    }

    out
}
