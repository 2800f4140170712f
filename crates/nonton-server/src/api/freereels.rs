use std::time::Instant;

use axum::extract::{Query, State};
use axum::response::Response;
use nonton_api::freereels::FreeReelsClient;
use nonton_api::Upstream;
use nonton_core::models::retain_renderable;
use serde::Deserialize;

use super::required;
use crate::error::ApiError;
use crate::respond::{checked_list, sealed};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    query: Option<String>,
}

/// GET /api/freereels/home
///
/// Served from the shared slot while fresh. Failures are served empty and
/// never cached.
pub async fn home<U: Upstream>(State(state): State<AppState<U>>) -> Result<Response, ApiError> {
    let now = Instant::now();
    if let Some(items) = state.freereels_home.get_fresh(now) {
        tracing::debug!(count = items.len(), "freereels home from cache");
        return sealed(&state.codec, &items);
    }

    let items = match FreeReelsClient::new(state.upstream.as_ref()).home().await {
        Ok(mut items) => {
            retain_renderable(&mut items);
            state.freereels_home.store(items.clone(), now);
            items
        }
        Err(e) => {
            tracing::warn!(error = %e, "freereels home unavailable, serving empty list");
            Vec::new()
        }
    };
    sealed(&state.codec, &items)
}

/// GET /api/freereels/search?query=
pub async fn search<U: Upstream>(
    State(state): State<AppState<U>>,
    Query(params): Query<SearchParams>,
) -> Result<Response, ApiError> {
    let query = required("query", params.query)?;
    let result = FreeReelsClient::new(state.upstream.as_ref()).search(&query).await;
    checked_list(&state.codec, result)
}
