use nonton_core::models::{ChapterImages, DetailItem, ListItem};

use super::types::{KomikChapter, KomikImageData, KomikManga, KomikResponse};
use crate::error::UpstreamError;
use crate::fallback::{with_fallback, Served};
use crate::headers::HeaderProfile;
use crate::lenient::Listing;
use crate::platform::Platform;
use crate::upstream::{decode, Upstream, UpstreamRequest};

/// Comics catalog. Every call is scoped to `type=project`.
pub struct KomikClient<'a, U> {
    upstream: &'a U,
}

impl<'a, U: Upstream> KomikClient<'a, U> {
    pub fn new(upstream: &'a U) -> Self {
        Self { upstream }
    }

    fn request(path: &'static str) -> UpstreamRequest {
        UpstreamRequest::new(Platform::Komik, path)
    }

    async fn list(
        &self,
        request: UpstreamRequest,
    ) -> Result<Vec<ListItem>, UpstreamError> {
        let raw = self.upstream.get(request.query("type", "project")).await?;
        let listing: Listing<KomikManga> = decode(raw)?;
        Ok(listing
            .into_vec()
            .into_iter()
            .filter_map(KomikManga::into_list_item)
            .collect())
    }

    /// Recommended titles, falling back to popular.
    pub async fn recommended(&self) -> Result<Served<ListItem>, UpstreamError> {
        with_fallback(
            "komik/recommended",
            self.list(Self::request("recommended").profile(HeaderProfile::Browser)),
            || self.list(Self::request("popular").profile(HeaderProfile::Referred)),
        )
        .await
    }

    /// Popular titles, falling back to latest.
    pub async fn popular(&self) -> Result<Served<ListItem>, UpstreamError> {
        with_fallback(
            "komik/popular",
            self.list(Self::request("popular").profile(HeaderProfile::Browser)),
            || self.list(Self::request("latest")),
        )
        .await
    }

    pub async fn latest(&self) -> Result<Vec<ListItem>, UpstreamError> {
        self.list(Self::request("latest")).await
    }

    pub async fn search(&self, query: &str) -> Result<Vec<ListItem>, UpstreamError> {
        self.list(Self::request("search").query("q", query)).await
    }

    /// Metadata first, then the chapter list. Only the first call is fatal.
    pub async fn detail(&self, manga_id: &str) -> Result<DetailItem, UpstreamError> {
        let raw = self
            .upstream
            .get(
                Self::request("detail")
                    .query("manga_id", manga_id)
                    .query("type", "project"),
            )
            .await?;
        let resp: KomikResponse<KomikManga> = decode(raw)?;
        let manga = resp
            .data
            .ok_or_else(|| UpstreamError::NotFound(format!("komik {manga_id}")))?;

        let chapters = match self.chapters(manga_id).await {
            Ok(chapters) => chapters,
            Err(e) => {
                tracing::warn!(manga_id, error = %e, "chapter list unavailable, serving metadata only");
                Vec::new()
            }
        };

        manga
            .into_detail(chapters)
            .ok_or_else(|| UpstreamError::NotFound(format!("komik {manga_id}")))
    }

    async fn chapters(&self, manga_id: &str) -> Result<Vec<KomikChapter>, UpstreamError> {
        let raw = self
            .upstream
            .get(
                Self::request("chapterlist")
                    .query("manga_id", manga_id)
                    .query("type", "project"),
            )
            .await?;
        let listing: Listing<KomikChapter> = decode(raw)?;
        Ok(listing.into_vec())
    }

    pub async fn images(&self, chapter_id: &str) -> Result<ChapterImages, UpstreamError> {
        let raw = self
            .upstream
            .get(
                Self::request("getimage")
                    .query("chapter_id", chapter_id)
                    .query("type", "project"),
            )
            .await?;
        let resp: KomikResponse<KomikImageData> = decode(raw)?;
        Ok(resp
            .data
            .unwrap_or_default()
            .into_chapter_images(chapter_id))
    }
}
