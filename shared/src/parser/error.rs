//! Errors raised while fetching or parsing an external calendar.

use thiserror::Error;

/// Failures of the calendar scraping pipeline.
///
/// None of these are retried; each one ends the current scrape with no
/// partial result.
#[derive(Error, Debug)]
pub enum ScrapeError {
    /// Connection failure, TLS failure or body read failure
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Source answered with a non-2xx status
    #[error("Source responded with HTTP status {code}")]
    HttpStatus { code: u16 },

    /// Expected container element is missing from the document
    #[error("Document structure error: {0}")]
    DocumentStructure(String),

    /// Month header text is not in the month vocabulary
    #[error("Unrecognized month name: '{text}'")]
    UnrecognizedMonth { text: String },

    /// Active day cell carries no digits
    #[error("Cannot parse day number from cell text '{cell_text}'")]
    DayNumberParse { cell_text: String },

    /// Active day cell has a class combination we do not know how to read
    #[error("Unclassified day cell with classes [{}]", .classes.join(", "))]
    UnclassifiedDay { classes: Vec<String> },

    /// Extractor was configured with a CSS selector that does not parse
    #[error("Invalid selector '{selector}': {reason}")]
    InvalidSelector { selector: String, reason: String },
}
