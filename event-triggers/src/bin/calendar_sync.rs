//! Calendar Sync Lambda - Pulls the production calendar into the store.
//!
//! This Lambda runs on a schedule (EventBridge) and scrapes one year from an
//! external calendar source, upserting every day into the database.

use chrono::{Datelike, Utc};
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use serde::Deserialize;
use shared::calendar::repository;
use shared::{Config, SyncSummary};
use sqlx::PgPool;
use std::sync::Arc;
use tracing::{error, info, warn};

/// EventBridge scheduled event
#[derive(Debug, Default, Deserialize)]
struct ScheduledEvent {
    /// Source to scrape, defaults to consultant.ru
    source: Option<String>,
    /// Year to scrape, defaults to the current year
    year: Option<i32>,
}

impl ScheduledEvent {
    fn source(&self) -> &str {
        self.source.as_deref().unwrap_or("consultant")
    }

    fn year(&self, current_year: i32) -> i32 {
        self.year.unwrap_or(current_year)
    }
}

/// Application state
struct AppState {
    db_pool: PgPool,
    http_client: reqwest::Client,
    config: Config,
}

impl AppState {
    async fn new(config: Config) -> Result<Self, Error> {
        let db_pool = shared::db::create_pool(&config).await?;
        shared::db::run_migrations(&db_pool).await?;

        Ok(Self {
            db_pool,
            http_client: reqwest::Client::new(),
            config,
        })
    }
}

async fn handler(
    state: Arc<AppState>,
    event: LambdaEvent<ScheduledEvent>,
) -> Result<SyncSummary, Error> {
    let source = event.payload.source();
    let year = event.payload.year(Utc::now().year());

    info!("Starting calendar sync for {} {}", source, year);

    match shared::sync_calendar(&state.db_pool, &state.http_client, &state.config, source, year).await {
        Ok(summary) => {
            info!(
                "Calendar sync complete: {} days, {} working, {} non-working",
                summary.days_total, summary.working, summary.non_working
            );
            match repository::count_year(&state.db_pool, year).await {
                Ok(stored) => info!("Store now holds {} days for {}", stored, year),
                Err(e) => warn!("Failed to count stored days for {}: {}", year, e),
            }
            Ok(summary)
        }
        Err(e) => {
            error!("Calendar sync for {} {} failed: {}", source, year, e);
            Err(e.into())
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    let config = Config::from_env()?;
    shared::init_tracing(&config);

    let state = Arc::new(AppState::new(config).await?);

    run(service_fn(move |event| {
        let state = Arc::clone(&state);
        async move { handler(state, event).await }
    }))
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_defaults() {
        let event: ScheduledEvent = serde_json::from_str("{}").unwrap();
        assert_eq!(event.source(), "consultant");
        assert_eq!(event.year(2026), 2026);
    }

    #[test]
    fn test_event_overrides() {
        let event: ScheduledEvent =
            serde_json::from_str(r#"{"source":"consultant","year":2024,"detail-type":"Scheduled Event"}"#)
                .unwrap();
        assert_eq!(event.year(2026), 2024);
    }
}
