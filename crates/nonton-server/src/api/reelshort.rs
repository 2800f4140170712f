use axum::extract::{Query, State};
use axum::response::Response;
use nonton_api::reelshort::ReelShortClient;
use nonton_api::Upstream;
use serde::Deserialize;

use super::{number, required};
use crate::error::ApiError;
use crate::respond::{available_shelves, checked_list, sealed, StreamSet};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    query: Option<String>,
    page: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchParams {
    book_id: Option<String>,
    episode_number: Option<String>,
}

/// GET /api/reelshort/homepage
pub async fn homepage<U: Upstream>(State(state): State<AppState<U>>) -> Result<Response, ApiError> {
    let result = ReelShortClient::new(state.upstream.as_ref()).homepage().await;
    available_shelves(&state.codec, "reelshort/homepage", result)
}

/// GET /api/reelshort/search?query=&page=
pub async fn search<U: Upstream>(
    State(state): State<AppState<U>>,
    Query(params): Query<SearchParams>,
) -> Result<Response, ApiError> {
    let query = required("query", params.query)?;
    let page = number("page", params.page, 1)?;
    let result = ReelShortClient::new(state.upstream.as_ref())
        .search(&query, page)
        .await;
    checked_list(&state.codec, result)
}

/// GET /api/reelshort/watch?bookId=&episodeNumber=
///
/// Upstream failures here are enveloped like the payload.
pub async fn watch<U: Upstream>(
    State(state): State<AppState<U>>,
    Query(params): Query<WatchParams>,
) -> Result<Response, ApiError> {
    let book_id = required("bookId", params.book_id)?;
    let episode = number("episodeNumber", Some(required("episodeNumber", params.episode_number)?), 1)?;

    match ReelShortClient::new(state.upstream.as_ref())
        .watch(&book_id, episode)
        .await
    {
        Ok(streams) => sealed(&state.codec, &StreamSet::new(streams)),
        Err(e) => Ok(ApiError::from(e).sealed(&state.codec)),
    }
}
