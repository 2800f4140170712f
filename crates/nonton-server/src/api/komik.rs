use axum::extract::{Path, Query, State};
use axum::response::Response;
use nonton_api::komik::KomikClient;
use nonton_api::Upstream;
use serde::Deserialize;

use super::required;
use crate::error::ApiError;
use crate::respond::{available_list, checked_list, sealed};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    q: Option<String>,
}

/// GET /api/komik/recommended
pub async fn recommended<U: Upstream>(State(state): State<AppState<U>>) -> Result<Response, ApiError> {
    let result = KomikClient::new(state.upstream.as_ref()).recommended().await;
    if let Ok(served) = &result {
        tracing::debug!(stage = ?served.stage, count = served.items.len(), "komik recommended");
    }
    available_list(&state.codec, "komik/recommended", result.map(|s| s.items))
}

/// GET /api/komik/popular
pub async fn popular<U: Upstream>(State(state): State<AppState<U>>) -> Result<Response, ApiError> {
    let result = KomikClient::new(state.upstream.as_ref()).popular().await;
    available_list(&state.codec, "komik/popular", result.map(|s| s.items))
}

/// GET /api/komik/latest
pub async fn latest<U: Upstream>(State(state): State<AppState<U>>) -> Result<Response, ApiError> {
    let result = KomikClient::new(state.upstream.as_ref()).latest().await;
    available_list(&state.codec, "komik/latest", result)
}

/// GET /api/komik/search?q=
pub async fn search<U: Upstream>(
    State(state): State<AppState<U>>,
    Query(params): Query<SearchParams>,
) -> Result<Response, ApiError> {
    let query = required("q", params.q)?;
    let result = KomikClient::new(state.upstream.as_ref()).search(&query).await;
    checked_list(&state.codec, result)
}

/// GET /api/komik/detail/:manga_id
pub async fn detail<U: Upstream>(
    State(state): State<AppState<U>>,
    Path(manga_id): Path<String>,
) -> Result<Response, ApiError> {
    let detail = KomikClient::new(state.upstream.as_ref()).detail(&manga_id).await?;
    sealed(&state.codec, &detail)
}

/// GET /api/komik/getimage/:chapter_id
pub async fn images<U: Upstream>(
    State(state): State<AppState<U>>,
    Path(chapter_id): Path<String>,
) -> Result<Response, ApiError> {
    let pages = KomikClient::new(state.upstream.as_ref()).images(&chapter_id).await?;
    sealed(&state.codec, &pages)
}
