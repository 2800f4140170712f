use nonton_core::models::{ListItem, Shelf, StreamOption};
use serde::Deserialize;

use crate::lenient::{self, pick};

const POPULAR_TAB: &str = "POPULER";
const SECTION_NAMES: [&str; 4] = ["Populer", "Terbaru", "Trending", "Untuk Kamu"];

#[derive(Debug, Default, Deserialize)]
pub struct Homepage {
    pub data: Option<HomepageData>,
}

#[derive(Debug, Default, Deserialize)]
pub struct HomepageData {
    #[serde(default, deserialize_with = "lenient::items")]
    pub tab_list: Vec<HomepageTab>,
    #[serde(default, deserialize_with = "lenient::items")]
    pub lists: Vec<HomepageList>,
}

#[derive(Debug, Deserialize)]
pub struct HomepageTab {
    #[serde(default, deserialize_with = "lenient::string")]
    pub tab_id: Option<String>,
    pub tab_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct HomepageList {
    #[serde(default, deserialize_with = "lenient::string")]
    pub tab_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::items")]
    pub books: Vec<ReelShortBook>,
}

/// Book as it appears on the homepage.
#[derive(Debug, Deserialize)]
pub struct ReelShortBook {
    #[serde(default, deserialize_with = "lenient::string")]
    pub book_id: Option<String>,
    pub book_title: Option<String>,
    pub book_pic: Option<String>,
    pub special_desc: Option<String>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub chapter_count: u32,
    #[serde(default, deserialize_with = "lenient::items")]
    pub theme: Vec<String>,
}

/// Book as it appears in search results.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReelShortSearchHit {
    #[serde(default, deserialize_with = "lenient::string")]
    pub book_id: Option<String>,
    pub title: Option<String>,
    pub cover: Option<String>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub chapter_count: u32,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReelShortEpisode {
    #[serde(default, deserialize_with = "lenient::items")]
    pub video_list: Vec<ReelShortVideo>,
}

#[derive(Debug, Deserialize)]
pub struct ReelShortVideo {
    pub url: Option<String>,
    pub encode: Option<String>,
    #[serde(default, alias = "dpi", deserialize_with = "lenient::string")]
    pub quality: Option<String>,
}

impl ReelShortBook {
    pub fn into_list_item(self) -> Option<ListItem> {
        let mut item = ListItem::new(self.book_id, self.book_title, self.book_pic)?;
        item.synopsis = self.special_desc;
        item.episode_count = (self.chapter_count > 0).then_some(self.chapter_count);
        item.tags = self.theme;
        Some(item)
    }
}

impl ReelShortSearchHit {
    pub fn into_list_item(self) -> Option<ListItem> {
        let mut item = ListItem::new(self.book_id, self.title, self.cover)?;
        item.synopsis = self.description;
        item.episode_count = (self.chapter_count > 0).then_some(self.chapter_count);
        Some(item)
    }
}

impl Homepage {
    /// Shelves of the popular tab (or the first tab), in upstream order.
    pub fn into_shelves(self) -> Vec<Shelf> {
        let Some(data) = self.data else {
            return Vec::new();
        };
        let tab_id = data
            .tab_list
            .iter()
            .find(|t| t.tab_name.as_deref() == Some(POPULAR_TAB))
            .or_else(|| data.tab_list.first())
            .and_then(|t| t.tab_id.clone());
        let Some(tab_id) = tab_id else {
            return Vec::new();
        };

        data.lists
            .into_iter()
            .filter(|l| l.tab_id.as_deref() == Some(tab_id.as_str()))
            .enumerate()
            .filter_map(|(i, list)| {
                let items: Vec<_> = list
                    .books
                    .into_iter()
                    .filter_map(ReelShortBook::into_list_item)
                    .collect();
                if items.is_empty() {
                    return None;
                }
                let title = SECTION_NAMES
                    .get(i)
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| format!("Section {}", i + 1));
                Some(Shelf { title, items })
            })
            .collect()
    }
}

impl ReelShortEpisode {
    /// H264 variants first, otherwise upstream order.
    pub fn into_streams(self) -> Vec<StreamOption> {
        let mut streams: Vec<_> = self
            .video_list
            .into_iter()
            .filter_map(|v| {
                Some(StreamOption {
                    url: pick([v.url])?,
                    resolution: v.quality.unwrap_or_default(),
                    provider: v.encode.unwrap_or_default(),
                })
            })
            .collect();
        streams.sort_by_key(|s| !s.provider.eq_ignore_ascii_case("H264"));
        streams
    }
}
