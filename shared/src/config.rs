//! Configuration management for Lambda functions.

use std::env;
use std::fmt;
use std::str::FromStr;

use crate::parser::DEFAULT_BASE_URL;
use crate::{Error, Result};

/// Deployment environment, selects default log verbosity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Testing,
    Production,
}

impl Environment {
    /// Default tracing filter when `RUST_LOG` is not set.
    pub fn default_log_level(self) -> &'static str {
        match self {
            Environment::Development | Environment::Testing => "debug",
            Environment::Production => "error",
        }
    }
}

impl FromStr for Environment {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "testing" | "test" => Ok(Environment::Testing),
            "production" | "prod" => Ok(Environment::Production),
            other => Err(Error::Config(format!("Unknown ENVIRONMENT '{}'", other))),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Environment::Development => "development",
            Environment::Testing => "testing",
            Environment::Production => "production",
        };
        f.write_str(name)
    }
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Deployment environment
    pub environment: Environment,
    /// Postgres connection string
    pub database_url: String,
    /// Maximum pooled database connections
    pub database_max_connections: u32,
    /// Base URL of the consultant.ru calendar section
    pub calendar_source_url: String,
    /// Explicit tracing filter, overrides the environment default
    pub log_filter: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = match lookup("ENVIRONMENT") {
            Some(value) => value.parse()?,
            None => Environment::Development,
        };

        let database_url = lookup("DATABASE_URL")
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| Error::Config("DATABASE_URL not set".to_string()))?;

        let database_max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
            Some(value) => value.trim().parse().map_err(|_| {
                Error::Config(format!("Invalid DATABASE_MAX_CONNECTIONS '{}'", value))
            })?,
            None => 5,
        };

        Ok(Self {
            environment,
            database_url,
            database_max_connections,
            calendar_source_url: lookup("CALENDAR_SOURCE_URL")
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            log_filter: lookup("RUST_LOG"),
        })
    }

    /// Tracing filter directive to install at start-up.
    pub fn log_filter(&self) -> &str {
        self.log_filter
            .as_deref()
            .unwrap_or_else(|| self.environment.default_log_level())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[("DATABASE_URL", "postgres://localhost/cal")])).unwrap();
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.database_max_connections, 5);
        assert_eq!(config.calendar_source_url, DEFAULT_BASE_URL);
        assert_eq!(config.log_filter(), "debug");
    }

    #[test]
    fn test_production_logs_errors_only() {
        let config = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://localhost/cal"),
            ("ENVIRONMENT", "Production"),
        ]))
        .unwrap();
        assert_eq!(config.log_filter(), "error");
    }

    #[test]
    fn test_rust_log_overrides_default() {
        let config = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://localhost/cal"),
            ("ENVIRONMENT", "production"),
            ("RUST_LOG", "shared=info"),
        ]))
        .unwrap();
        assert_eq!(config.log_filter(), "shared=info");
    }

    #[test]
    fn test_missing_database_url() {
        let err = Config::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_invalid_values() {
        assert!(Config::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://localhost/cal"),
            ("ENVIRONMENT", "staging"),
        ]))
        .is_err());
        assert!(Config::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://localhost/cal"),
            ("DATABASE_MAX_CONNECTIONS", "many"),
        ]))
        .is_err());
    }
}
