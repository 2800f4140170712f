use nonton_core::models::{ChapterImages, DetailItem, EpisodeRef, ListItem};
use serde::Deserialize;

use crate::lenient::{self, pick};

/// `{ retcode, message, data }` wrapper used by every comics endpoint.
#[derive(Debug, Deserialize)]
pub struct KomikResponse<T> {
    #[serde(default = "Option::default")]
    pub data: Option<T>,
}

impl<T> Default for KomikResponse<T> {
    fn default() -> Self {
        Self { data: None }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct KomikManga {
    #[serde(default, deserialize_with = "lenient::string")]
    pub manga_id: Option<String>,
    pub title: Option<String>,
    pub alternative_title: Option<String>,
    pub description: Option<String>,
    pub cover_portrait_url: Option<String>,
    pub cover_image_url: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub latest_chapter_number: Option<String>,
    pub latest_chapter_time: Option<String>,
    pub updated_at: Option<String>,
    pub created_at: Option<String>,
    #[serde(rename = "type", default, deserialize_with = "lenient::string")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub status: Option<String>,
    pub taxonomy: Option<KomikTaxonomy>,
}

#[derive(Debug, Default, Deserialize)]
pub struct KomikTaxonomy {
    #[serde(rename = "Genre", default, deserialize_with = "lenient::items")]
    pub genre: Vec<KomikTerm>,
}

#[derive(Debug, Deserialize)]
pub struct KomikTerm {
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct KomikChapter {
    #[serde(default, deserialize_with = "lenient::string")]
    pub chapter_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub chapter_number: f64,
    pub created_at: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct KomikImageData {
    pub chapter: Option<KomikImageChapter>,
}

#[derive(Debug, Default, Deserialize)]
pub struct KomikImageChapter {
    #[serde(default, deserialize_with = "lenient::items")]
    pub data: Vec<String>,
}

impl KomikManga {
    pub fn into_list_item(self) -> Option<ListItem> {
        let mut item = ListItem::new(
            self.manga_id,
            pick([self.title, self.alternative_title]),
            pick([self.cover_portrait_url, self.cover_image_url]),
        )?;
        item.last_episode = self
            .latest_chapter_number
            .filter(|n| !n.is_empty() && n != "0")
            .map(|n| format!("Ch. {n}"));
        item.last_updated = pick([self.latest_chapter_time, self.updated_at, self.created_at]);
        item.kind = self.kind;
        item.status = self.status;
        item.synopsis = self.description;
        Some(item)
    }

    /// Merge metadata with its chapter list. Chapters come out in reading order.
    pub fn into_detail(mut self, chapters: Vec<KomikChapter>) -> Option<DetailItem> {
        let genres = self
            .taxonomy
            .take()
            .map(|t| t.genre.into_iter().filter_map(|g| g.name).collect())
            .unwrap_or_default();

        let mut chapters: Vec<_> = chapters
            .into_iter()
            .filter_map(|c| {
                let id = c.chapter_id.filter(|id| !id.trim().is_empty())?;
                Some((c.chapter_number, id, c.created_at))
            })
            .collect();
        chapters.sort_by(|a, b| a.0.total_cmp(&b.0));

        let episodes = chapters
            .into_iter()
            .enumerate()
            .map(|(i, (_, id, date))| EpisodeRef {
                locator: id.clone(),
                id,
                sequence: i as u32 + 1,
                date,
            })
            .collect();

        Some(DetailItem {
            item: self.into_list_item()?,
            genres,
            episodes,
        })
    }
}

impl KomikImageData {
    pub fn into_chapter_images(self, chapter_id: &str) -> ChapterImages {
        let urls = self.chapter.map(|c| c.data).unwrap_or_default();
        ChapterImages::from_urls(chapter_id, urls)
    }
}
