//! Pulls a year from an external source into the store.

use sqlx::PgPool;
use tracing::{error, info};

use super::repository::{self, NewCalendarDay};
use super::validators::{validate_calendar_request, CalendarSource};
use crate::models::{CalendarDayRecord, SyncSummary};
use crate::parser::ConsultantPlusSource;
use crate::{Config, Result};

/// Scrape `year` from `source` without touching the store.
pub async fn fetch_records(
    source: CalendarSource,
    http_client: &reqwest::Client,
    config: &Config,
    year: i32,
) -> Result<Vec<CalendarDayRecord>> {
    let records = match source {
        CalendarSource::ConsultantPlus => {
            ConsultantPlusSource::with_base_url(http_client.clone(), &config.calendar_source_url)?
                .get_calendar(year)
                .await?
        }
    };
    Ok(records)
}

/// Count working and non-working days in a scrape.
pub fn summarize(source: CalendarSource, year: i32, records: &[CalendarDayRecord]) -> SyncSummary {
    let working = records.iter().filter(|r| r.day_type.is_working()).count();

    SyncSummary {
        source: source.name().to_string(),
        year,
        days_total: records.len(),
        working,
        non_working: records.len() - working,
    }
}

/// Validate the request, scrape the year and upsert every day.
///
/// Nothing is written unless the whole year was scraped and every day maps
/// to a real date.
pub async fn sync_calendar(
    pool: &PgPool,
    http_client: &reqwest::Client,
    config: &Config,
    source: &str,
    year: i32,
) -> Result<SyncSummary> {
    let source = validate_calendar_request(source, year)?;
    info!("Syncing {} calendar for {}", source, year);

    let records = fetch_records(source, http_client, config, year)
        .await
        .inspect_err(|e| error!("Failed to scrape {} calendar for {}: {}", source, year, e))?;

    let rows = records
        .iter()
        .map(NewCalendarDay::try_from)
        .collect::<Result<Vec<_>>>()?;

    repository::upsert_days(pool, &rows).await?;

    let summary = summarize(source, year, &records);
    info!(
        "Synced {} calendar for {}: {} days, {} working, {} non-working",
        summary.source, summary.year, summary.days_total, summary.working, summary.non_working
    );
    Ok(summary)
}
