//! Error types for the work calendar service.

use thiserror::Error;

use crate::parser::ScrapeError;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in work calendar Lambda functions.
#[derive(Error, Debug)]
pub enum Error {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Migration error
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Calendar source failed to deliver or parse its data
    #[error("Calendar source error: {0}")]
    Scrape(#[from] ScrapeError),

    /// Not found error
    #[error("Not found: {0}")]
    NotFound(String),
}

impl Error {
    /// Get HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            Error::Validation(_) => 400,
            Error::NotFound(_) => 404,
            Error::Scrape(_) => 502,
            _ => 500,
        }
    }
}
