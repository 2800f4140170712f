use nonton_core::models::{DetailItem, ListItem, StreamOption};

use super::types::{detail_from_value, AnimeItem, AnimeVideoResponse};
use crate::error::UpstreamError;
use crate::fallback::{with_fallback, Served};
use crate::headers::HeaderProfile;
use crate::lenient::Listing;
use crate::platform::Platform;
use crate::upstream::{decode, Upstream, UpstreamRequest};

pub struct AnimeClient<'a, U> {
    upstream: &'a U,
}

impl<'a, U: Upstream> AnimeClient<'a, U> {
    pub fn new(upstream: &'a U) -> Self {
        Self { upstream }
    }

    async fn list(&self, request: UpstreamRequest) -> Result<Vec<ListItem>, UpstreamError> {
        let raw = self.upstream.get(request).await?;
        let listing: Listing<AnimeItem> = decode(raw)?;
        Ok(listing
            .into_vec()
            .into_iter()
            .filter_map(AnimeItem::into_list_item)
            .collect())
    }

    pub async fn latest(&self) -> Result<Vec<ListItem>, UpstreamError> {
        self.list(UpstreamRequest::new(Platform::Anime, "latest")).await
    }

    /// Recommended titles, falling back to latest.
    pub async fn recommended(&self) -> Result<Served<ListItem>, UpstreamError> {
        with_fallback(
            "anime/recommended",
            self.list(UpstreamRequest::new(Platform::Anime, "recommended")),
            || self.latest(),
        )
        .await
    }

    pub async fn movies(&self) -> Result<Vec<ListItem>, UpstreamError> {
        self.list(UpstreamRequest::new(Platform::Anime, "movie")).await
    }

    pub async fn search(&self, query: &str) -> Result<Vec<ListItem>, UpstreamError> {
        self.list(UpstreamRequest::new(Platform::Anime, "search").query("query", query))
            .await
    }

    pub async fn detail(&self, anime_id: &str) -> Result<DetailItem, UpstreamError> {
        let raw = self
            .upstream
            .get(
                UpstreamRequest::new(Platform::Anime, "detail")
                    .query("urlId", anime_id)
                    .profile(HeaderProfile::Bare),
            )
            .await?;
        detail_from_value(raw)?
            .and_then(|item| item.into_detail(anime_id))
            .ok_or_else(|| UpstreamError::NotFound(format!("anime {anime_id}")))
    }

    pub async fn video(&self, episode_id: &str) -> Result<Vec<StreamOption>, UpstreamError> {
        let raw = self
            .upstream
            .get(
                UpstreamRequest::new(Platform::Anime, "getvideo")
                    .query("chapterUrlId", episode_id)
                    .profile(HeaderProfile::Bare),
            )
            .await?;
        let resp: AnimeVideoResponse = decode(raw)?;
        Ok(resp.into_streams())
    }
}
