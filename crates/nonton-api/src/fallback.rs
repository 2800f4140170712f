//! Primary-then-fallback retrieval for browse lists.

use std::future::Future;

use crate::error::UpstreamError;

/// Which endpoint produced a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Primary,
    Fallback,
}

/// A list together with the stage that served it.
#[derive(Debug, Clone, PartialEq)]
pub struct Served<T> {
    pub items: Vec<T>,
    pub stage: Stage,
}

impl<T> Served<T> {
    pub fn primary(items: Vec<T>) -> Self {
        Self {
            items,
            stage: Stage::Primary,
        }
    }
}

/// Await `primary`; if it errors or yields no items, call `fallback` once.
///
/// The fallback result is final: its error is returned as-is and an empty
/// fallback list is returned as an empty list.
pub async fn with_fallback<T, P, F, Fut>(
    label: &str,
    primary: P,
    fallback: F,
) -> Result<Served<T>, UpstreamError>
where
    P: Future<Output = Result<Vec<T>, UpstreamError>>,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<Vec<T>, UpstreamError>>,
{
    match primary.await {
        Ok(items) if !items.is_empty() => return Ok(Served::primary(items)),
        Ok(_) => tracing::info!(label, "primary list is empty, trying fallback"),
        Err(e) => tracing::warn!(label, error = %e, "primary list failed, trying fallback"),
    }

    let items = fallback().await?;
    tracing::debug!(label, count = items.len(), "served from fallback");
    Ok(Served {
        items,
        stage: Stage::Fallback,
    })
}
