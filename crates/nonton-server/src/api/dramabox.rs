use axum::extract::{Path, State};
use axum::response::Response;
use nonton_api::dramabox::DramaBoxClient;
use nonton_api::Upstream;

use crate::error::ApiError;
use crate::respond::{available_list, sealed};
use crate::AppState;

/// GET /api/dramabox/latest
pub async fn latest<U: Upstream>(State(state): State<AppState<U>>) -> Result<Response, ApiError> {
    let result = DramaBoxClient::new(state.upstream.as_ref()).latest().await;
    available_list(&state.codec, "dramabox/latest", result)
}

/// GET /api/dramabox/allepisode/:book_id
pub async fn episodes<U: Upstream>(
    State(state): State<AppState<U>>,
    Path(book_id): Path<String>,
) -> Result<Response, ApiError> {
    let episodes = DramaBoxClient::new(state.upstream.as_ref())
        .episodes(&book_id)
        .await?;
    if episodes.is_empty() {
        return Err(ApiError::NotFound(format!("dramabox {book_id}")));
    }
    sealed(&state.codec, &episodes)
}
