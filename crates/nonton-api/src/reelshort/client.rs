use nonton_core::models::{ListItem, Shelf, StreamOption};

use super::types::{Homepage, ReelShortEpisode, ReelShortSearchHit};
use crate::error::UpstreamError;
use crate::headers::HeaderProfile;
use crate::lenient::Listing;
use crate::platform::Platform;
use crate::upstream::{decode, Upstream, UpstreamRequest};

pub struct ReelShortClient<'a, U> {
    upstream: &'a U,
}

impl<'a, U: Upstream> ReelShortClient<'a, U> {
    pub fn new(upstream: &'a U) -> Self {
        Self { upstream }
    }

    pub async fn homepage(&self) -> Result<Vec<Shelf>, UpstreamError> {
        let raw = self
            .upstream
            .get(UpstreamRequest::new(Platform::ReelShort, "homepage"))
            .await?;
        let home: Homepage = decode(raw)?;
        Ok(home.into_shelves())
    }

    pub async fn search(&self, query: &str, page: u32) -> Result<Vec<ListItem>, UpstreamError> {
        let raw = self
            .upstream
            .get(
                UpstreamRequest::new(Platform::ReelShort, "search")
                    .query("query", query)
                    .query("page", page.to_string())
                    .profile(HeaderProfile::Browser),
            )
            .await?;
        let hits: Listing<ReelShortSearchHit> = decode(raw)?;
        Ok(hits
            .into_vec()
            .into_iter()
            .filter_map(ReelShortSearchHit::into_list_item)
            .collect())
    }

    /// Playable variants of one episode, H264 first.
    pub async fn watch(
        &self,
        book_id: &str,
        episode_number: u32,
    ) -> Result<Vec<StreamOption>, UpstreamError> {
        let raw = self
            .upstream
            .get(
                UpstreamRequest::new(Platform::ReelShort, "episode")
                    .query("bookId", book_id)
                    .query("episodeNumber", episode_number.to_string())
                    .profile(HeaderProfile::Browser),
            )
            .await?;
        let episode: ReelShortEpisode = decode(raw)?;
        Ok(episode.into_streams())
    }
}
