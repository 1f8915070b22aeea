//! Queries against the `calendar_day` table.

use chrono::NaiveDate;
use sqlx::PgPool;
use tracing::debug;

use crate::models::{CalendarDay, CalendarDayRecord};
use crate::{Error, Result};

/// A day ready to be written to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewCalendarDay {
    pub date: NaiveDate,
    pub is_working: bool,
}

impl TryFrom<&CalendarDayRecord> for NewCalendarDay {
    type Error = Error;

    fn try_from(record: &CalendarDayRecord) -> Result<Self> {
        let date = record.date().ok_or_else(|| {
            Error::Validation(format!(
                "Scraped day {}-{:02}-{:02} is not a valid date",
                record.year, record.month, record.day
            ))
        })?;

        Ok(Self {
            date,
            is_working: record.day_type.is_working(),
        })
    }
}

/// First and one-past-last date of `year`.
fn year_bounds(year: i32) -> Result<(NaiveDate, NaiveDate)> {
    let invalid = || Error::Validation(format!("Year {} is out of range", year));
    let start = NaiveDate::from_ymd_opt(year, 1, 1).ok_or_else(invalid)?;
    let end = NaiveDate::from_ymd_opt(year + 1, 1, 1).ok_or_else(invalid)?;
    Ok((start, end))
}

/// Insert or update days in one transaction. Holiday names already stored are kept.
pub async fn upsert_days(pool: &PgPool, days: &[NewCalendarDay]) -> Result<u64> {
    let mut tx = pool.begin().await?;
    let mut affected = 0u64;

    for day in days {
        let result = sqlx::query(
            r#"
            INSERT INTO calendar_day (date, is_working)
            VALUES ($1, $2)
            ON CONFLICT (date)
            DO UPDATE SET
                is_working = EXCLUDED.is_working,
                updated_at = NOW()
            "#,
        )
        .bind(day.date)
        .bind(day.is_working)
        .execute(&mut *tx)
        .await?;

        affected += result.rows_affected();
    }

    tx.commit().await?;
    debug!("Upserted {} calendar days", affected);
    Ok(affected)
}

/// All stored days of `year`, ordered by date.
pub async fn list_year(pool: &PgPool, year: i32) -> Result<Vec<CalendarDay>> {
    let (start, end) = year_bounds(year)?;

    let days = sqlx::query_as::<_, CalendarDay>(
        r#"
        SELECT id, date, is_working, holiday_name, created_at, updated_at
        FROM calendar_day
        WHERE date >= $1 AND date < $2
        ORDER BY date
        "#,
    )
    .bind(start)
    .bind(end)
    .fetch_all(pool)
    .await?;

    Ok(days)
}

/// Number of stored days in `year`.
pub async fn count_year(pool: &PgPool, year: i32) -> Result<i64> {
    let (start, end) = year_bounds(year)?;

    let count = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM calendar_day WHERE date >= $1 AND date < $2",
    )
    .bind(start)
    .bind(end)
    .fetch_one(pool)
    .await?;

    Ok(count)
}

/// A single stored day.
pub async fn get_day(pool: &PgPool, date: NaiveDate) -> Result<CalendarDay> {
    sqlx::query_as::<_, CalendarDay>(
        r#"
        SELECT id, date, is_working, holiday_name, created_at, updated_at
        FROM calendar_day
        WHERE date = $1
        "#,
    )
    .bind(date)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| Error::NotFound(format!("Calendar day {}", date)))
}
