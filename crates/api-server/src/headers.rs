//! Typed extraction of the mandatory audit headers
//!
//! Every task endpoint requires `X-Request-Id` (UUID format),
//! `X-Request-Date`, and `X-User-Id`. Extraction runs once per request at
//! the handler boundary and yields either a validated value object or a
//! field-specific validation failure.

use axum::http::HeaderMap;
use uuid::Uuid;

/// Validated audit headers accompanying every call. The user id arrives
/// pre-validated upstream; it is opaque here.
#[derive(Debug, Clone)]
pub struct AuthorizationHeaders {
    pub request_id: String,
    pub request_date: String,
    pub user_id: String,
}

impl AuthorizationHeaders {
    pub fn from_headers(headers: &HeaderMap) -> Result<Self, String> {
        let request_id = required(headers, "X-Request-Id")?;
        if Uuid::parse_str(&request_id).is_err() {
            return Err("Header X-Request-Id must be UUID format".to_string());
        }
        let request_date = required(headers, "X-Request-Date")?;
        let user_id = required(headers, "X-User-Id")?;

        Ok(Self {
            request_id,
            request_date,
            user_id,
        })
    }
}

fn required(headers: &HeaderMap, name: &str) -> Result<String, String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(ToString::to_string)
        .ok_or_else(|| format!("Header {name} is mandatory"))
}
