//! HTTP API handlers, one module per platform.

use axum::Json;
use serde_json::{json, Value};

use crate::error::ApiError;

pub mod anime;
pub mod dramabox;
pub mod flickreels;
pub mod freereels;
pub mod komik;
pub mod melolo;
pub mod netshort;
pub mod reelshort;

/// GET /health
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "nonton",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// A required, non-blank query parameter.
pub(crate) fn required(name: &'static str, value: Option<String>) -> Result<String, ApiError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or(ApiError::MissingParam(name))
}

/// A positive page or episode number, `default` when absent.
pub(crate) fn number(name: &'static str, value: Option<String>, default: u32) -> Result<u32, ApiError> {
    match value.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(default),
        Some(raw) => raw
            .parse::<u32>()
            .ok()
            .filter(|n| *n > 0)
            .ok_or_else(|| ApiError::InvalidParam {
                name,
                value: raw.to_string(),
            }),
    }
}
