//! Retrieves the raw calendar page for a year.

use tracing::debug;

use super::ScrapeError;

/// Raw markup of a calendar page together with the year it was requested for.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    pub year: i32,
    pub markup: String,
}

/// Fetches year pages below a fixed base URL.
///
/// Every call performs a fresh request; nothing is cached or retried.
#[derive(Debug, Clone)]
pub struct Fetcher {
    http_client: reqwest::Client,
    base_url: String,
}

impl Fetcher {
    pub fn new(http_client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http_client,
            base_url: base_url.into(),
        }
    }

    /// URL of the page for `year`: the base URL with `/<year>/` appended.
    pub fn url_for(&self, year: i32) -> String {
        format!("{}/{}/", self.base_url.trim_end_matches('/'), year)
    }

    /// Download the calendar page for `year`.
    pub async fn fetch(&self, year: i32) -> Result<SourceDocument, ScrapeError> {
        let url = self.url_for(year);
        debug!("Fetching calendar page {}", url);

        let response = self.http_client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::HttpStatus {
                code: status.as_u16(),
            });
        }

        let markup = response.text().await?;
        debug!("Fetched {} bytes from {}", markup.len(), url);

        Ok(SourceDocument { year, markup })
    }
}
