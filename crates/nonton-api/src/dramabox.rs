use nonton_core::models::{EpisodeRef, ListItem};
use serde::Deserialize;

use crate::error::UpstreamError;
use crate::lenient::{self, pick, Listing};
use crate::platform::Platform;
use crate::upstream::{decode, Upstream, UpstreamRequest};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DramaBoxBook {
    #[serde(default, deserialize_with = "lenient::string")]
    pub book_id: Option<String>,
    pub book_name: Option<String>,
    pub cover_wap: Option<String>,
    pub cover: Option<String>,
    pub introduction: Option<String>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub chapter_count: u32,
    #[serde(default, deserialize_with = "lenient::items")]
    pub tags: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DramaBoxChapter {
    #[serde(default, deserialize_with = "lenient::string")]
    pub chapter_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub chapter_index: u32,
    pub chapter_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::items")]
    pub cdn_list: Vec<DramaBoxCdn>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DramaBoxCdn {
    #[serde(default, deserialize_with = "lenient::count")]
    pub is_default: u32,
    #[serde(default, deserialize_with = "lenient::items")]
    pub video_path_list: Vec<DramaBoxVideoPath>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DramaBoxVideoPath {
    pub video_path: Option<String>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub is_default: u32,
}

impl DramaBoxBook {
    pub fn into_list_item(self) -> Option<ListItem> {
        let mut item = ListItem::new(
            self.book_id,
            self.book_name,
            pick([self.cover_wap, self.cover]),
        )?;
        item.synopsis = self.introduction;
        item.episode_count = (self.chapter_count > 0).then_some(self.chapter_count);
        item.tags = self.tags;
        Some(item)
    }
}

impl DramaBoxChapter {
    /// Video path on the default CDN, preferring its default variant.
    pub fn default_video(&self) -> Option<String> {
        let cdn = self
            .cdn_list
            .iter()
            .find(|c| c.is_default == 1)
            .or_else(|| self.cdn_list.first())?;
        let path = cdn
            .video_path_list
            .iter()
            .find(|p| p.is_default == 1)
            .or_else(|| cdn.video_path_list.first())?;
        pick([path.video_path.clone()])
    }
}

/// Episodes in `chapterIndex` order; chapters without a playable path are dropped.
pub fn into_episodes(chapters: Vec<DramaBoxChapter>) -> Vec<EpisodeRef> {
    let mut chapters: Vec<_> = chapters
        .into_iter()
        .filter_map(|c| {
            let locator = c.default_video()?;
            let id = pick([c.chapter_id])?;
            Some((c.chapter_index, id, locator))
        })
        .collect();
    chapters.sort_by_key(|(index, _, _)| *index);
    chapters
        .into_iter()
        .enumerate()
        .map(|(i, (_, id, locator))| EpisodeRef {
            id,
            sequence: i as u32 + 1,
            locator,
            date: None,
        })
        .collect()
}

pub struct DramaBoxClient<'a, U> {
    upstream: &'a U,
}

impl<'a, U: Upstream> DramaBoxClient<'a, U> {
    pub fn new(upstream: &'a U) -> Self {
        Self { upstream }
    }

    pub async fn latest(&self) -> Result<Vec<ListItem>, UpstreamError> {
        let raw = self
            .upstream
            .get(UpstreamRequest::new(Platform::DramaBox, "latest"))
            .await?;
        let listing: Listing<DramaBoxBook> = decode(raw)?;
        Ok(listing
            .into_vec()
            .into_iter()
            .filter_map(DramaBoxBook::into_list_item)
            .collect())
    }

    pub async fn episodes(&self, book_id: &str) -> Result<Vec<EpisodeRef>, UpstreamError> {
        let raw = self
            .upstream
            .get(UpstreamRequest::new(Platform::DramaBox, "allepisode").query("bookId", book_id))
            .await?;
        let listing: Listing<DramaBoxChapter> = decode(raw)?;
        Ok(into_episodes(listing.into_vec()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedUpstream;
    use serde_json::json;

    #[tokio::test]
    async fn test_latest_cover_fallback() {
        let upstream = ScriptedUpstream::new().json(
            "dramabox/latest",
            json!([
                { "bookId": "41000", "bookName": "Mistaken Bride", "coverWap": "https://img/wap.jpg", "cover": "https://img/c.jpg" },
                { "bookId": 41001, "bookName": "Plain Cover", "cover": "https://img/c2.jpg" },
                { "bookName": "Orphan" }
            ]),
        );
        let items = DramaBoxClient::new(&upstream).latest().await.unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].cover, "https://img/wap.jpg");
        assert_eq!(items[1].id, "41001");
        assert_eq!(items[1].cover, "https://img/c2.jpg");
    }

    #[tokio::test]
    async fn test_episodes_use_default_cdn() {
        let upstream = ScriptedUpstream::new().json(
            "dramabox/allepisode?bookId=b7",
            json!([
                {
                    "chapterId": "c2", "chapterIndex": 1, "chapterName": "EP 2",
                    "cdnList": [
                        { "isDefault": 0, "videoPathList": [{ "videoPath": "https://slow/2.mp4" }] },
                        { "isDefault": 1, "videoPathList": [
                            { "videoPath": "https://fast/2-540.mp4", "isDefault": 0 },
                            { "videoPath": "https://fast/2-720.mp4", "isDefault": 1 }
                        ] }
                    ]
                },
                {
                    "chapterId": "c1", "chapterIndex": 0,
                    "cdnList": [{ "videoPathList": [{ "videoPath": "https://only/1.mp4" }] }]
                },
                { "chapterId": "c3", "chapterIndex": 2, "cdnList": [] }
            ]),
        );
        let episodes = DramaBoxClient::new(&upstream).episodes("b7").await.unwrap();
        let locators: Vec<_> = episodes.iter().map(|e| e.locator.as_str()).collect();
        assert_eq!(locators, ["https://only/1.mp4", "https://fast/2-720.mp4"]);
        assert_eq!(episodes[1].id, "c2");
        assert_eq!(episodes[1].sequence, 2);
    }
}
