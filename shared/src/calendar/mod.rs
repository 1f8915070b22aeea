//! Stored work calendar: validation, persistence and syncing from sources.

pub mod repository;
pub mod service;
pub mod validators;

pub use service::{fetch_records, summarize, sync_calendar};
pub use validators::{validate_calendar_request, validate_year, CalendarSource, MAX_YEAR, MIN_YEAR};
