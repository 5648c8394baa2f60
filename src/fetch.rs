//! Remote fetch adapter for the two CSV export endpoints.
//!
//! Each call is a single cache-busted GET; there is no retry policy. Callers
//! decide when to re-fetch (explicit refresh actions or view entry) and may
//! degrade a failure to an empty row set via [`CsvFetcher::fetch_rows_or_empty`].

use thiserror::Error;

use crate::csv::parse_csv;

/// Failure taxonomy of a CSV fetch.
///
/// `AccessDenied` is kept distinct from the generic transport failures: the
/// sheet answering with its HTML sign-in page means link sharing was turned
/// off, which the operator can fix, unlike a flaky network.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("CSV endpoint returned HTTP {status}")]
    Http { status: u16 },
    #[error(
        "the spreadsheet is not publicly readable; turn on link sharing \
         (\"Anyone with the link can view\") for the sheet and refresh"
    )]
    AccessDenied,
    #[error("network failure while fetching CSV")]
    Network(#[from] reqwest::Error),
}

/// Fetches and parses the sheet CSV exports.
pub struct CsvFetcher {
    client: reqwest::Client,
}

impl CsvFetcher {
    pub fn new() -> Self {
        Self { client: reqwest::Client::new() }
    }

    /// GET `url` with a cache-busting timestamp parameter and `no-store`
    /// semantics, and parse the body into rows.
    pub async fn fetch_rows(&self, url: &str) -> Result<Vec<Vec<String>>, FetchError> {
        let busted = cache_busted(url);
        tracing::debug!("Fetching CSV from {}", busted);

        let response = self
            .client
            .get(&busted)
            .header(reqwest::header::CACHE_CONTROL, "no-store")
            .send()
            .await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        decode_csv_body(status, &body)
    }

    /// Fetch, degrading any failure to an empty row set. The failure is
    /// logged, not lost; the selects and the dashboard stay usable with zero
    /// rows loaded.
    pub async fn fetch_rows_or_empty(&self, url: &str) -> Vec<Vec<String>> {
        match self.fetch_rows(url).await {
            Ok(rows) => rows,
            Err(e) => {
                tracing::warn!("CSV fetch degraded to empty row set: {}", e);
                Vec::new()
            }
        }
    }
}

impl Default for CsvFetcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Append the cache-busting timestamp parameter, defeating intermediary and
/// browser-style caching in front of the export endpoint.
fn cache_busted(url: &str) -> String {
    let ts = chrono::Utc::now().timestamp_millis();
    if url.contains('?') {
        format!("{url}&t={ts}")
    } else {
        format!("{url}?t={ts}")
    }
}

/// Classify a response and parse its body. Pure, so the failure taxonomy is
/// testable without a network.
pub fn decode_csv_body(status: u16, body: &str) -> Result<Vec<Vec<String>>, FetchError> {
    if !(200..300).contains(&status) {
        return Err(FetchError::Http { status });
    }
    if looks_like_html(body) {
        return Err(FetchError::AccessDenied);
    }
    Ok(parse_csv(body))
}

/// Sniff for the sheet's HTML sign-in page standing in for CSV text.
fn looks_like_html(body: &str) -> bool {
    let head = body.trim_start();
    let head = head.get(..512).unwrap_or(head).to_lowercase();
    head.starts_with("<!doctype")
        || head.starts_with("<html")
        || body.contains("accounts.google.com")
        || body.contains("ServiceLogin")
}
