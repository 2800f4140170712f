//! Client for the aggregation boundary itself.
//!
//! Fetches a boundary path, unwraps the response envelope and keeps a
//! per-path copy in a caller-owned [`QueryCache`].

use std::time::{Duration, Instant};

use nonton_core::cache::QueryCache;
use nonton_core::{EnvelopeCodec, EnvelopeError};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("envelope error: {0}")]
    Envelope(#[from] EnvelopeError),

    #[error("unexpected payload: {0}")]
    Json(#[from] serde_json::Error),
}

/// How long a fetched resource stays fresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StaleTime {
    List,
    Search,
    Images,
}

impl StaleTime {
    pub fn duration(self) -> Duration {
        match self {
            Self::List => Duration::from_secs(5 * 60),
            Self::Search => Duration::from_secs(2 * 60),
            Self::Images => Duration::from_secs(10 * 60),
        }
    }
}

pub struct ConsumerClient {
    base_url: String,
    http: Client,
    codec: EnvelopeCodec,
}

impl ConsumerClient {
    pub fn new(base_url: &str, codec: EnvelopeCodec) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: Client::new(),
            codec,
        }
    }

    /// GET `path`, serving a cached copy while it is younger than `ttl`.
    pub async fn fetch<T: DeserializeOwned>(
        &self,
        cache: &mut QueryCache,
        path: &str,
        ttl: Duration,
    ) -> Result<T, FetchError> {
        let now = Instant::now();
        if let Some(hit) = cache.get_fresh(path, now, ttl) {
            tracing::debug!(path, "query cache hit");
            return Ok(serde_json::from_value(hit.clone())?);
        }

        let value = self.fetch_value(path).await?;
        cache.insert(path, value.clone(), now);
        Ok(serde_json::from_value(value)?)
    }

    /// GET `path` without caching and return the unwrapped payload.
    pub async fn fetch_value(&self, path: &str) -> Result<Value, FetchError> {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        let resp = self.http.get(&url).send().await?;
        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let message = resp.text().await.unwrap_or_default();
            return Err(FetchError::Status { status, message });
        }
        let body: Value = resp.json().await?;
        Ok(unwrap_body(&self.codec, body)?)
    }
}

/// Decode `{ "data": "<envelope>" }`; pass any other JSON through.
pub fn unwrap_body(codec: &EnvelopeCodec, body: Value) -> Result<Value, EnvelopeError> {
    match body.get("data").and_then(Value::as_str) {
        Some(data) => codec.decode_str(data),
        None => Ok(body),
    }
}
