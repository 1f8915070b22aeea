//! Shared library for the work calendar Lambda functions.
//!
//! This crate provides the calendar scraper, storage, configuration and page
//! rendering used by the web service and the scheduled sync.

pub mod calendar;
pub mod config;
pub mod db;
pub mod error;
pub mod http;
pub mod models;
pub mod pages;
pub mod parser;
pub mod telemetry;

pub use calendar::{sync_calendar, validate_calendar_request, CalendarSource};
pub use config::{Config, Environment};
pub use error::{Error, Result};
pub use models::{CalendarDay, CalendarDayRecord, DayType, SyncSummary};
pub use parser::{ConsultantPlusSource, ScrapeError};
pub use telemetry::init_tracing;
