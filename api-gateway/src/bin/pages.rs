//! Calendar Pages Lambda - Serves the HTML interface of the work calendar.
//!
//! Endpoints:
//! - GET / - Landing page with the request form
//! - GET /calendar?year={year} - Stored days of a year
//! - GET /calendar/day?date={YYYY-MM-DD} - A single stored day
//! - POST /calendar - Scrape a year from a source and store it

use chrono::{Datelike, NaiveDate, Utc};
use lambda_http::{run, service_fn, Body, Error, Request, RequestExt, Response};
use shared::calendar::{repository, validate_year};
use shared::http::{html_response, parse_form};
use shared::{pages, Config};
use sqlx::PgPool;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Application state
struct AppState {
    db_pool: PgPool,
    http_client: reqwest::Client,
    config: Config,
}

impl AppState {
    async fn new(config: Config) -> Result<Self, Error> {
        let db_pool = shared::db::create_pool(&config).await?;
        shared::db::run_migrations(&db_pool).await?;

        Ok(Self {
            db_pool,
            http_client: reqwest::Client::new(),
            config,
        })
    }
}

fn parse_year_value(value: &str) -> Result<i32, String> {
    let value = value.trim();
    value.parse().map_err(|_| format!("Invalid year '{}'", value))
}

/// Parse an optional year query value, falling back to `default` when absent.
fn parse_year(raw: Option<&str>, default: i32) -> Result<i32, String> {
    match raw.filter(|s| !s.trim().is_empty()) {
        Some(value) => parse_year_value(value),
        None => Ok(default),
    }
}

/// A form field that must be present and non-blank.
fn required_field<'a>(form: &'a HashMap<String, String>, name: &str) -> Result<&'a str, String> {
    form.get(name)
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
        .ok_or_else(|| format!("Missing form field '{}'", name))
}

fn current_year() -> i32 {
    Utc::now().year()
}

fn error_response(error: &shared::Error) -> Result<Response<Body>, Error> {
    let status = error.status_code();
    html_response(status, pages::error_page(status, &error.to_string()))
}

async fn handler(state: Arc<AppState>, event: Request) -> Result<Response<Body>, Error> {
    let method = event.method().as_str();
    let raw_path = event.uri().path();
    // Strip /api stage prefix if present (API Gateway REST API includes stage in path)
    let path = raw_path.strip_prefix("/api").unwrap_or(raw_path);
    let path = match path.trim_end_matches('/') {
        "" => "/",
        trimmed => trimmed,
    };

    info!("Pages request: {} {}", method, path);

    match (method, path) {
        ("GET", "/") => html_response(200, pages::index_page(current_year())),

        ("GET", "/calendar") => {
            let params = event.query_string_parameters();
            let year = match parse_year(params.first("year"), current_year()) {
                Ok(year) => year,
                Err(message) => return html_response(400, pages::error_page(400, &message)),
            };
            if let Err(e) = validate_year(year) {
                return error_response(&e);
            }

            match repository::list_year(&state.db_pool, year).await {
                Ok(days) => html_response(200, pages::calendar_page(year, &days)),
                Err(e) => {
                    error!("Failed to load calendar for {}: {}", year, e);
                    error_response(&e)
                }
            }
        }

        ("GET", "/calendar/day") => {
            let params = event.query_string_parameters();
            let raw_date = params.first("date").unwrap_or("");
            let date = match NaiveDate::parse_from_str(raw_date.trim(), "%Y-%m-%d") {
                Ok(date) => date,
                Err(_) => {
                    let message = format!("Invalid date '{}', expected YYYY-MM-DD", raw_date);
                    return html_response(400, pages::error_page(400, &message));
                }
            };

            match repository::get_day(&state.db_pool, date).await {
                Ok(day) => html_response(200, pages::day_page(&day)),
                Err(e) => error_response(&e),
            }
        }

        ("POST", "/calendar") => {
            let form = match parse_form(event.body()) {
                Ok(form) => form,
                Err(e) => return error_response(&e),
            };
            let fields = required_field(&form, "source").and_then(|source| {
                let year = required_field(&form, "year").and_then(parse_year_value)?;
                Ok((source, year))
            });
            let (source, year) = match fields {
                Ok(fields) => fields,
                Err(message) => return html_response(400, pages::error_page(400, &message)),
            };

            match shared::sync_calendar(&state.db_pool, &state.http_client, &state.config, source, year).await {
                Ok(summary) => html_response(200, pages::sync_result_page(&summary)),
                Err(e) => {
                    warn!("Calendar request for {} {} failed: {}", source, year, e);
                    error_response(&e)
                }
            }
        }

        _ => html_response(404, pages::error_page(404, &format!("Page {} not found", path))),
    }
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    let config = Config::from_env()?;
    shared::init_tracing(&config);

    info!("Starting calendar pages in {} environment", config.environment);
    let state = Arc::new(AppState::new(config).await?);

    run(service_fn(move |event| {
        let state = Arc::clone(&state);
        async move { handler(state, event).await }
    }))
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use lambda_http::http;
    use sqlx::postgres::PgPoolOptions;

    fn test_state() -> Arc<AppState> {
        let config = Config::from_lookup(|key| match key {
            "DATABASE_URL" => Some("postgres://localhost/work_calendar".to_string()),
            _ => None,
        })
        .unwrap();
        let db_pool = PgPoolOptions::new()
            .connect_lazy(&config.database_url)
            .unwrap();

        Arc::new(AppState {
            db_pool,
            http_client: reqwest::Client::new(),
            config,
        })
    }

    fn request(method: &str, uri: &str, body: Body) -> Request {
        http::Request::builder()
            .method(method)
            .uri(uri)
            .body(body)
            .unwrap()
    }

    fn with_query(request: Request, pairs: &[(&str, &str)]) -> Request {
        let params: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        request.with_query_string_parameters(params)
    }

    fn form_post(body: impl Into<Body>) -> Request {
        request("POST", "/api/calendar", body.into())
    }

    fn body_text(response: &Response<Body>) -> &str {
        match response.body() {
            Body::Text(text) => text,
            other => panic!("expected a text body, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_year() {
        assert_eq!(parse_year(Some("2025"), 2000), Ok(2025));
        assert_eq!(parse_year(Some(" 2024 "), 2000), Ok(2024));
        assert_eq!(parse_year(None, 2000), Ok(2000));
        assert_eq!(parse_year(Some(""), 2000), Ok(2000));
        assert!(parse_year(Some("next"), 2000).is_err());
    }

    #[test]
    fn test_required_field() {
        let form = HashMap::from([
            ("source".to_string(), " consultant ".to_string()),
            ("year".to_string(), "  ".to_string()),
        ]);
        assert_eq!(required_field(&form, "source"), Ok("consultant"));
        assert!(required_field(&form, "year").is_err());
        assert!(required_field(&form, "missing").is_err());
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let response = handler(test_state(), request("GET", "/api/nowhere", Body::Empty))
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 404);
        assert!(body_text(&response).contains("/nowhere"));

        let response = handler(test_state(), request("DELETE", "/calendar", Body::Empty))
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 404);
    }

    #[tokio::test]
    async fn test_malformed_date_is_400() {
        for date in ["2025-02-30", "09.05.2025", ""] {
            let event = with_query(request("GET", "/calendar/day", Body::Empty), &[("date", date)]);
            let response = handler(test_state(), event).await.unwrap();
            assert_eq!(response.status().as_u16(), 400, "date {date:?}");
        }

        let response = handler(test_state(), request("GET", "/calendar/day", Body::Empty))
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 400);
    }

    #[tokio::test]
    async fn test_calendar_year_out_of_range_is_400() {
        for year in ["1999", "2031", "next"] {
            let event = with_query(request("GET", "/calendar", Body::Empty), &[("year", year)]);
            let response = handler(test_state(), event).await.unwrap();
            assert_eq!(response.status().as_u16(), 400, "year {year:?}");
        }
    }

    #[tokio::test]
    async fn test_post_without_fields_is_400() {
        for body in ["", "source=consultant", "year=2025", "source=&year=2025", "source=consultant&year="] {
            let response = handler(test_state(), form_post(body)).await.unwrap();
            assert_eq!(response.status().as_u16(), 400, "body {body:?}");
            assert!(body_text(&response).contains("Missing form field"));
        }
    }

    #[tokio::test]
    async fn test_post_non_utf8_body_is_400() {
        let response = handler(test_state(), form_post(vec![0xff, 0xfe]))
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 400);
    }

    #[tokio::test]
    async fn test_post_invalid_request_is_400() {
        for body in [
            "source=official_gov&year=2025",
            "source=consultant&year=2012",
            "source=consultant&year=2031",
            "source=consultant&year=soon",
        ] {
            let response = handler(test_state(), form_post(body)).await.unwrap();
            assert_eq!(response.status().as_u16(), 400, "body {body:?}");
        }
    }
}
