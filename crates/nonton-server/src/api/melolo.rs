use axum::extract::{Query, State};
use axum::response::Response;
use nonton_api::melolo::MeloloClient;
use nonton_api::Upstream;
use serde::Deserialize;

use super::required;
use crate::error::ApiError;
use crate::respond::{available_list, sealed, StreamSet};
use crate::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamParams {
    video_id: Option<String>,
}

/// GET /api/melolo/latest
pub async fn latest<U: Upstream>(State(state): State<AppState<U>>) -> Result<Response, ApiError> {
    let result = MeloloClient::new(state.upstream.as_ref()).latest().await;
    available_list(&state.codec, "melolo/latest", result)
}

/// GET /api/melolo/stream?videoId=
///
/// Upstream failures here are enveloped like the payload.
pub async fn stream<U: Upstream>(
    State(state): State<AppState<U>>,
    Query(params): Query<StreamParams>,
) -> Result<Response, ApiError> {
    let video_id = required("videoId", params.video_id)?;
    match MeloloClient::new(state.upstream.as_ref()).stream(&video_id).await {
        Ok(streams) => sealed(&state.codec, &StreamSet::new(streams)),
        Err(e) => Ok(ApiError::from(e).sealed(&state.codec)),
    }
}
