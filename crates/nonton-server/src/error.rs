use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use nonton_api::UpstreamError;
use nonton_core::{EnvelopeCodec, EnvelopeError};
use serde_json::json;
use thiserror::Error;

/// Failure of a boundary request.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Query parameter '{0}' is required")]
    MissingParam(&'static str),

    #[error("Query parameter '{name}' is invalid: {value}")]
    InvalidParam { name: &'static str, value: String },

    #[error("{0} not found")]
    NotFound(String),

    #[error("Failed to fetch data")]
    Upstream(#[source] UpstreamError),

    #[error("Failed to encode response")]
    Envelope(#[from] EnvelopeError),
}

impl From<UpstreamError> for ApiError {
    fn from(e: UpstreamError) -> Self {
        match e {
            UpstreamError::NotFound(what) => Self::NotFound(what),
            other => Self::Upstream(other),
        }
    }
}

impl ApiError {
    /// Upstream failures keep the upstream's own error status; transport
    /// and parse failures are a bad gateway.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingParam(_) | Self::InvalidParam { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Upstream(e) => e
                .status()
                .and_then(|s| StatusCode::from_u16(s).ok())
                .filter(|s| s.is_client_error() || s.is_server_error())
                .unwrap_or(StatusCode::BAD_GATEWAY),
            Self::Envelope(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn log(&self) {
        match self {
            Self::Upstream(e) => tracing::warn!(error = %e, "upstream request failed"),
            Self::Envelope(e) => tracing::error!(error = %e, "envelope encoding failed"),
            other => tracing::debug!(error = %other, "rejected request"),
        }
    }

    /// Same status, but the `{ error }` body is itself enveloped.
    pub fn sealed(self, codec: &EnvelopeCodec) -> Response {
        self.log();
        let status = self.status();
        match codec.encode(&json!({ "error": self.to_string() })) {
            Ok(envelope) => (status, Json(envelope)).into_response(),
            Err(e) => Self::Envelope(e).into_response(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.log();
        let body = Json(json!({ "error": self.to_string() }));
        (self.status(), body).into_response()
    }
}
