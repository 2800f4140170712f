use axum::extract::{Path, Query, State};
use axum::response::Response;
use nonton_api::anime::AnimeClient;
use nonton_api::Upstream;
use serde::Deserialize;

use super::required;
use crate::error::ApiError;
use crate::respond::{available_list, checked_list, sealed, StreamSet};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    q: Option<String>,
}

pub async fn latest<U: Upstream>(State(state): State<AppState<U>>) -> Result<Response, ApiError> {
    let result = AnimeClient::new(state.upstream.as_ref()).latest().await;
    available_list(&state.codec, "anime/latest", result)
}

pub async fn recommended<U: Upstream>(State(state): State<AppState<U>>) -> Result<Response, ApiError> {
    let result = AnimeClient::new(state.upstream.as_ref()).recommended().await;
    available_list(&state.codec, "anime/recommended", result.map(|s| s.items))
}

pub async fn movies<U: Upstream>(State(state): State<AppState<U>>) -> Result<Response, ApiError> {
    let result = AnimeClient::new(state.upstream.as_ref()).movies().await;
    available_list(&state.codec, "anime/movie", result)
}

pub async fn search<U: Upstream>(
    State(state): State<AppState<U>>,
    Query(params): Query<SearchParams>,
) -> Result<Response, ApiError> {
    let query = required("q", params.q)?;
    let result = AnimeClient::new(state.upstream.as_ref()).search(&query).await;
    checked_list(&state.codec, result)
}

pub async fn detail<U: Upstream>(
    State(state): State<AppState<U>>,
    Path(anime_id): Path<String>,
) -> Result<Response, ApiError> {
    let detail = AnimeClient::new(state.upstream.as_ref()).detail(&anime_id).await?;
    sealed(&state.codec, &detail)
}

pub async fn video<U: Upstream>(
    State(state): State<AppState<U>>,
    Path(episode_id): Path<String>,
) -> Result<Response, ApiError> {
    let streams = AnimeClient::new(state.upstream.as_ref()).video(&episode_id).await?;
    sealed(&state.codec, &StreamSet::new(streams))
}
