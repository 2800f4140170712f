//! Response policies shared by every handler.

use axum::response::{IntoResponse, Response};
use axum::Json;
use nonton_api::UpstreamError;
use nonton_core::models::{available_resolutions, retain_renderable, select_stream, ListItem, Shelf, StreamOption};
use nonton_core::EnvelopeCodec;
use serde::Serialize;

use crate::error::ApiError;

/// Resolution picked when the caller has no preference.
pub const PREFERRED_RESOLUTION: &str = "720p";

/// 200 with the payload inside an envelope.
pub fn sealed<T: Serialize + ?Sized>(codec: &EnvelopeCodec, payload: &T) -> Result<Response, ApiError> {
    Ok(Json(codec.encode(payload)?).into_response())
}

/// Availability: a failed list is logged and served empty.
pub fn available_list(
    codec: &EnvelopeCodec,
    label: &str,
    result: Result<Vec<ListItem>, UpstreamError>,
) -> Result<Response, ApiError> {
    let mut items = result.unwrap_or_else(|e| {
        tracing::warn!(label, error = %e, "upstream unavailable, serving empty list");
        Vec::new()
    });
    retain_renderable(&mut items);
    sealed(codec, &items)
}

/// Availability for grouped lists. Shelves left empty are dropped.
pub fn available_shelves(
    codec: &EnvelopeCodec,
    label: &str,
    result: Result<Vec<Shelf>, UpstreamError>,
) -> Result<Response, ApiError> {
    let shelves = result.unwrap_or_else(|e| {
        tracing::warn!(label, error = %e, "upstream unavailable, serving no shelves");
        Vec::new()
    });
    let shelves: Vec<Shelf> = shelves
        .into_iter()
        .filter_map(|mut shelf| {
            retain_renderable(&mut shelf.items);
            (!shelf.items.is_empty()).then_some(shelf)
        })
        .collect();
    sealed(codec, &shelves)
}

/// Correctness: a failed list is an error; a successful one is filtered.
pub fn checked_list(
    codec: &EnvelopeCodec,
    result: Result<Vec<ListItem>, UpstreamError>,
) -> Result<Response, ApiError> {
    let mut items = result?;
    retain_renderable(&mut items);
    sealed(codec, &items)
}

/// Stream variants plus the default pick and the resolution menu.
#[derive(Debug, Serialize)]
pub struct StreamSet {
    pub selected: Option<StreamOption>,
    pub resolutions: Vec<String>,
    pub streams: Vec<StreamOption>,
}

impl StreamSet {
    pub fn new(streams: Vec<StreamOption>) -> Self {
        Self {
            selected: select_stream(&streams, PREFERRED_RESOLUTION).cloned(),
            resolutions: available_resolutions(&streams),
            streams,
        }
    }
}
