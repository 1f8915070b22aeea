//! Database connection management.

use sqlx::migrate::Migrator;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;
use tracing::info;

use crate::{Config, Error, Result};

/// Schema migrations embedded from `shared/migrations`.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Create a database connection pool.
pub async fn create_pool(config: &Config) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .acquire_timeout(Duration::from_secs(3))
        .connect(&config.database_url)
        .await
        .map_err(Error::Database)?;

    Ok(pool)
}

/// Apply pending schema migrations.
///
/// Both the pages and the sync Lambda call this on cold start; already
/// applied migrations are skipped.
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    info!("Applying database migrations");
    MIGRATOR.run(pool).await?;
    info!("Database migrations applied");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migrations_create_calendar_table() {
        let migrations: Vec<_> = MIGRATOR.iter().collect();
        assert!(!migrations.is_empty());
        assert!(migrations
            .iter()
            .any(|m| m.sql.contains("CREATE TABLE IF NOT EXISTS calendar_day")));
    }
}
