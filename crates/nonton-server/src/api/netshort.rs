use axum::extract::{Query, State};
use axum::response::Response;
use nonton_api::netshort::NetShortClient;
use nonton_api::Upstream;
use serde::Deserialize;

use super::{number, required};
use crate::error::ApiError;
use crate::respond::{available_list, available_shelves, sealed};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct PageParams {
    page: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailParams {
    short_play_id: Option<String>,
}

/// GET /api/netshort/foryou?page=
pub async fn for_you<U: Upstream>(
    State(state): State<AppState<U>>,
    Query(params): Query<PageParams>,
) -> Result<Response, ApiError> {
    let page = number("page", params.page, 1)?;
    let result = NetShortClient::new(state.upstream.as_ref()).for_you(page).await;
    available_list(&state.codec, "netshort/foryou", result)
}

/// GET /api/netshort/theaters
pub async fn theaters<U: Upstream>(State(state): State<AppState<U>>) -> Result<Response, ApiError> {
    let result = NetShortClient::new(state.upstream.as_ref()).theaters().await;
    available_shelves(&state.codec, "netshort/theaters", result)
}

/// GET /api/netshort/detail?shortPlayId=
pub async fn detail<U: Upstream>(
    State(state): State<AppState<U>>,
    Query(params): Query<DetailParams>,
) -> Result<Response, ApiError> {
    let id = required("shortPlayId", params.short_play_id)?;
    let detail = NetShortClient::new(state.upstream.as_ref()).detail(&id).await?;
    sealed(&state.codec, &detail)
}
