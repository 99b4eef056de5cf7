//! Mapping of handler failures onto HTTP responses.

use axum::{
    Json,
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use weather_core::WeatherError;

use crate::dto::{ErrorEnvelope, FAILURE_MESSAGE};

pub const INVALID_QUERY_MESSAGE: &str = "Invalid query parameters";

/// Handler error. Every variant renders as an [`ErrorEnvelope`].
#[derive(Debug)]
pub enum ProxyError {
    /// The source call failed or could not be made.
    Source(WeatherError),
    /// Query string missing a required parameter or not parseable.
    BadRequest(String),
}

impl From<WeatherError> for ProxyError {
    fn from(err: WeatherError) -> Self {
        ProxyError::Source(err)
    }
}

impl From<QueryRejection> for ProxyError {
    fn from(rejection: QueryRejection) -> Self {
        ProxyError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ProxyError::BadRequest(detail) => {
                tracing::debug!(%detail, "rejected query string");
                (StatusCode::BAD_REQUEST, ErrorEnvelope::new(INVALID_QUERY_MESSAGE).with_error(detail))
            }
            ProxyError::Source(WeatherError::MissingCredential) => {
                tracing::error!("provider API key is not configured");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorEnvelope::new(WeatherError::MissingCredential.to_string()),
                )
            }
            ProxyError::Source(WeatherError::Upstream { status, body }) => {
                tracing::warn!(status, "provider returned an error");
                (
                    StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
                    ErrorEnvelope::new(FAILURE_MESSAGE).with_error(body),
                )
            }
            ProxyError::Source(err @ (WeatherError::Network(_) | WeatherError::Malformed(_))) => {
                tracing::warn!(error = %err, "provider request failed");
                (StatusCode::BAD_GATEWAY, ErrorEnvelope::new(FAILURE_MESSAGE).with_error(err.to_string()))
            }
        };

        (status, Json(body)).into_response()
    }
}
