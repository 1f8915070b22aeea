//! Validation of calendar requests coming from pages and scheduled events.

use std::fmt;
use std::str::FromStr;

use crate::{Error, Result};

/// Earliest year a calendar may be requested for.
pub const MIN_YEAR: i32 = 2013;
/// Latest year a calendar may be requested for.
pub const MAX_YEAR: i32 = 2030;

/// Known external calendar sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarSource {
    ConsultantPlus,
}

impl CalendarSource {
    pub const ALL: [CalendarSource; 1] = [CalendarSource::ConsultantPlus];

    /// Short name used in forms and event payloads.
    pub fn name(self) -> &'static str {
        match self {
            CalendarSource::ConsultantPlus => "consultant",
        }
    }

    /// Human readable label for pages.
    pub fn label(self) -> &'static str {
        match self {
            CalendarSource::ConsultantPlus => "КонсультантПлюс",
        }
    }
}

impl FromStr for CalendarSource {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim();
        CalendarSource::ALL
            .into_iter()
            .find(|source| source.name() == name)
            .ok_or_else(|| Error::Validation(format!("Unknown calendar source '{}'", name)))
    }
}

impl fmt::Display for CalendarSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Check that `year` is inside the supported range.
pub fn validate_year(year: i32) -> Result<()> {
    if year < MIN_YEAR {
        return Err(Error::Validation(format!(
            "Year {} is before the earliest supported year ({})",
            year, MIN_YEAR
        )));
    }
    if year > MAX_YEAR {
        return Err(Error::Validation(format!(
            "Year {} is after the latest supported year ({})",
            year, MAX_YEAR
        )));
    }
    Ok(())
}

/// Check a source/year pair and resolve the source.
pub fn validate_calendar_request(source: &str, year: i32) -> Result<CalendarSource> {
    let source = source.parse()?;
    validate_year(year)?;
    Ok(source)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_request() {
        assert_eq!(
            validate_calendar_request("consultant", 2025).unwrap(),
            CalendarSource::ConsultantPlus
        );
        assert!(validate_calendar_request(" consultant ", MIN_YEAR).is_ok());
        assert!(validate_calendar_request("consultant", MAX_YEAR).is_ok());
    }

    #[test]
    fn test_unknown_source() {
        let err = validate_calendar_request("official_gov", 2025).unwrap_err();
        assert!(matches!(err, Error::Validation(ref msg) if msg.contains("official_gov")));
    }

    #[test]
    fn test_year_out_of_range() {
        assert!(matches!(
            validate_calendar_request("consultant", MIN_YEAR - 1),
            Err(Error::Validation(_))
        ));
        assert!(matches!(
            validate_calendar_request("consultant", MAX_YEAR + 1),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn test_source_names_round_trip() {
        for source in CalendarSource::ALL {
            assert_eq!(source.name().parse::<CalendarSource>().unwrap(), source);
        }
    }
}
