//! HTTP helpers for Lambda functions.

use std::collections::HashMap;

use lambda_http::{Body, Response};

use crate::{Error, Result};

/// Create an HTML response with the given status code.
pub fn html_response(
    status: u16,
    html: impl Into<String>,
) -> std::result::Result<Response<Body>, lambda_http::Error> {
    let response = Response::builder()
        .status(status)
        .header("content-type", "text/html; charset=utf-8")
        .body(Body::from(html.into()))
        .map_err(Box::new)?;

    Ok(response)
}

/// Decode an `application/x-www-form-urlencoded` body.
///
/// Later duplicates of a key overwrite earlier ones; pairs that fail to
/// decode are dropped. A body that is not UTF-8 is a validation error.
pub fn parse_form(body: &Body) -> Result<HashMap<String, String>> {
    let raw = std::str::from_utf8(body.as_ref())
        .map_err(|_| Error::Validation("Form body is not valid UTF-8".to_string()))?;

    let form = raw
        .split('&')
        .filter(|pair| !pair.is_empty())
        .filter_map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let key = urlencoding::decode(&key.replace('+', " ")).ok()?.into_owned();
            let value = urlencoding::decode(&value.replace('+', " ")).ok()?.into_owned();
            Some((key, value))
        })
        .collect();

    Ok(form)
}
