//! Offline mock research responses.

#[cfg(test)]
#[path = "fallback_tests.rs"]
mod tests;

use url::Url;

/// Produce a domain-keyed mock research response for when the analysis
/// server is unreachable.
///
/// The known domains get a full company write-up; everything else gets the
/// generic "could not determine" analysis. Matching is on the hostname, so
/// `https://www.nvidia.com/drivers` and `https://nvidia.com/` both hit the
/// NVIDIA entry.
pub fn mock_research(url: &str) -> String {
    let host = Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
        .unwrap_or_default();

    if host.contains("nvidia") {
        format!(
            "## Company Analysis\n\nThe website {url} is related to NVIDIA Corporation, \
             which is publicly traded.\n\nStock Ticker Symbol: NVDA\nExchange: NASDAQ\n\n\
             ### Recent SEC Filings\n- 10-K: Filed on February 22, 2023\n- 10-Q: Filed on \
             November 22, 2022\n- 8-K: Various filings throughout the year\n- Forms 3-4-5: \
             Insider transactions\n- Schedule 13D: Ownership changes\n\n### Financial \
             Information\n- Revenue: Significant growth in gaming and datacenter segments\n\
             - Net Income: Substantial increases\n- Market Capitalization: One of the \
             largest tech companies"
        )
    } else if host.contains("apple") {
        format!(
            "## Company Analysis\n\nThe website {url} is related to Apple Inc., which is \
             publicly traded.\n\nStock Ticker Symbol: AAPL\nExchange: NASDAQ\n\n### Recent \
             SEC Filings\n- 10-K: Filed on October 28, 2022\n- 10-Q: Filed on February 3, \
             2023\n- 8-K: Various filings throughout the year\n- Forms 3-4-5: Insider \
             transactions\n- Schedule 13D: Ownership changes\n\n### Financial Information\n\
             - Revenue: Strong iPhone and Services revenue\n- Net Income: Consistent \
             profitability\n- Market Capitalization: Among the world's most valuable \
             companies"
        )
    } else if host.contains("microsoft") {
        format!(
            "## Company Analysis\n\nThe website {url} is related to Microsoft Corporation, \
             which is publicly traded.\n\nStock Ticker Symbol: MSFT\nExchange: NASDAQ\n\n\
             ### Recent SEC Filings\n- 10-K: Filed on July 28, 2022\n- 10-Q: Filed on \
             January 24, 2023\n- 8-K: Various filings throughout the year\n- Forms 3-4-5: \
             Insider transactions\n- Schedule 13D: Ownership changes\n\n### Financial \
             Information\n- Revenue: Strong cloud growth via Azure\n- Net Income: \
             Significant and growing\n- Market Capitalization: Among the world's most \
             valuable companies"
        )
    } else {
        format!(
            "## Website Analysis\n\nAfter analyzing the URL {url}, I could not determine \
             if it's associated with a publicly traded company.\n\n### Technical Overview\n\
             - This appears to be a general website\n- No stock ticker symbol identified\n\
             - The content seems to be technical/informational in nature\n\n### Resources\n\
             For stock information, please check financial databases like Yahoo Finance or \
             the SEC EDGAR database."
        )
    }
}
