//! Shared data models.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of day as published by a production calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayType {
    Working,
    Weekend,
    PreHoliday,
}

impl DayType {
    /// Pre-holiday days are shortened but still worked.
    pub fn is_working(self) -> bool {
        match self {
            DayType::Working | DayType::PreHoliday => true,
            DayType::Weekend => false,
        }
    }
}

/// One classified day as scraped from a calendar source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CalendarDayRecord {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub day_type: DayType,
}

impl CalendarDayRecord {
    /// The Gregorian date, if the scraped triple names one.
    pub fn date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }
}

/// Stored calendar day.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct CalendarDay {
    pub id: Uuid,
    pub date: NaiveDate,
    pub is_working: bool,
    pub holiday_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Result of pulling one year from a source into the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncSummary {
    pub source: String,
    pub year: i32,
    pub days_total: usize,
    pub working: usize,
    pub non_working: usize,
}
