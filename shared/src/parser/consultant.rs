//! Production calendar published by consultant.ru.

use tracing::info;

use super::{Extractor, ExtractorConfig, Fetcher, ScrapeError};
use crate::models::CalendarDayRecord;

/// Section of consultant.ru holding the yearly production calendars.
pub const DEFAULT_BASE_URL: &str = "https://www.consultant.ru/law/ref/calendar/proizvodstvennye";

/// Fetches and parses consultant.ru calendar pages.
#[derive(Debug, Clone)]
pub struct ConsultantPlusSource {
    fetcher: Fetcher,
    extractor: Extractor,
}

impl ConsultantPlusSource {
    pub fn new(fetcher: Fetcher, extractor: Extractor) -> Self {
        Self { fetcher, extractor }
    }

    /// Source with the stock page layout, served from `base_url`.
    pub fn with_base_url(
        http_client: reqwest::Client,
        base_url: impl Into<String>,
    ) -> Result<Self, ScrapeError> {
        let extractor = Extractor::new(&ExtractorConfig::default())?;
        Ok(Self::new(Fetcher::new(http_client, base_url), extractor))
    }

    /// All classified days of `year`, or the first error hit on the way.
    pub async fn get_calendar(&self, year: i32) -> Result<Vec<CalendarDayRecord>, ScrapeError> {
        info!("Requesting consultant.ru calendar for {}", year);
        let document = self.fetcher.fetch(year).await?;
        self.extractor.extract(&document.markup, document.year)
    }
}
