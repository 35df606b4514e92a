//! API error mapping
//!
//! Every pipeline failure becomes a JSON body of the form
//! `{ "error": { "code", "message", "details" }, "timestamp" }`.

use fpl_fetcher::{FetchError, FetcherError};
use player_scout::{InvalidQueryError, ScoutError};
use serde::Serialize;
use std::convert::Infallible;
use thiserror::Error;
use tracing::warn;
use warp::http::StatusCode;

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
    pub timestamp: String,
}

/// Error detail
#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    pub details: Option<serde_json::Value>,
}

/// A request failure with its HTTP status; usable as a warp rejection
#[derive(Error, Debug)]
#[error("{code}: {message}")]
pub struct ApiError {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
    pub details: Option<serde_json::Value>,
}

impl warp::reject::Reject for ApiError {}

impl ApiError {
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self { status, code, message: message.into(), details: None }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            error: ErrorDetail {
                code: self.code.to_string(),
                message: self.message.clone(),
                details: self.details.clone(),
            },
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn into_reply(self) -> warp::reply::WithStatus<warp::reply::Json> {
        warp::reply::with_status(warp::reply::json(&self.to_response()), self.status)
    }
}

impl From<InvalidQueryError> for ApiError {
    fn from(err: InvalidQueryError) -> Self {
        let parameter = err.parameter().map(str::to_string);
        ApiError::new(StatusCode::BAD_REQUEST, "INVALID_QUERY", err.to_string())
            .with_details(serde_json::json!({ "parameter": parameter }))
    }
}

impl From<ScoutError> for ApiError {
    fn from(err: ScoutError) -> Self {
        let message = err.to_string();
        match err {
            ScoutError::InvalidQuery(e) => e.into(),
            ScoutError::Fetch(FetcherError::Fetch(FetchError::Http { status, .. })) => {
                ApiError::new(StatusCode::BAD_GATEWAY, "UPSTREAM_HTTP_ERROR", message)
                    .with_details(serde_json::json!({ "upstream_status": status }))
            }
            ScoutError::Fetch(FetcherError::Fetch(FetchError::Network { .. })) => {
                ApiError::new(StatusCode::BAD_GATEWAY, "UPSTREAM_UNAVAILABLE", message)
            }
            ScoutError::Fetch(FetcherError::Fetch(FetchError::Timeout { .. })) => {
                ApiError::new(StatusCode::GATEWAY_TIMEOUT, "UPSTREAM_TIMEOUT", message)
            }
            ScoutError::Fetch(FetcherError::Parse(_)) => {
                ApiError::new(StatusCode::BAD_GATEWAY, "UPSTREAM_PARSE_ERROR", message)
            }
            ScoutError::Lookup(_) => {
                ApiError::new(StatusCode::BAD_GATEWAY, "UPSTREAM_INCONSISTENT", message)
            }
        }
    }
}

/// Turn rejections into JSON error bodies
pub async fn handle_rejection(err: warp::Rejection) -> Result<impl warp::Reply, Infallible> {
    let api_error = if let Some(api_error) = err.find::<ApiError>() {
        ApiError {
            status: api_error.status,
            code: api_error.code,
            message: api_error.message.clone(),
            details: api_error.details.clone(),
        }
    } else if err.is_not_found() {
        ApiError::new(StatusCode::NOT_FOUND, "NOT_FOUND", "No such endpoint")
    } else if let Some(e) = err.find::<warp::reject::InvalidQuery>() {
        ApiError::new(StatusCode::BAD_REQUEST, "INVALID_QUERY", e.to_string())
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        ApiError::new(StatusCode::METHOD_NOT_ALLOWED, "METHOD_NOT_ALLOWED", "Method not allowed")
    } else {
        warn!("Unhandled rejection: {:?}", err);
        ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", "Unhandled error")
    };

    Ok(api_error.into_reply())
}
