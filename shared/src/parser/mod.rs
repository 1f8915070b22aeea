//! Scrapers for external production calendars.
//!
//! A scrape is two steps: [`Fetcher`] downloads the page for a year and
//! [`Extractor`] turns it into [`CalendarDayRecord`](crate::models::CalendarDayRecord)s.
//! [`ConsultantPlusSource`] wires both together for consultant.ru.

pub mod consultant;
pub mod error;
pub mod extractor;
pub mod fetcher;

pub use consultant::{ConsultantPlusSource, DEFAULT_BASE_URL};
pub use error::ScrapeError;
pub use extractor::{classify_cell, parse_day_number, resolve_month, CellKind, Extractor, ExtractorConfig};
pub use fetcher::{Fetcher, SourceDocument};
