use axum::extract::State;
use axum::response::Response;
use nonton_api::flickreels::FlickReelsClient;
use nonton_api::Upstream;

use crate::error::ApiError;
use crate::respond::available_list;
use crate::AppState;

/// GET /api/flickreels/latest
pub async fn latest<U: Upstream>(State(state): State<AppState<U>>) -> Result<Response, ApiError> {
    let result = FlickReelsClient::new(state.upstream.as_ref()).latest().await;
    available_list(&state.codec, "flickreels/latest", result)
}
