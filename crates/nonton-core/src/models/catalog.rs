use serde::{Deserialize, Serialize};

/// A card in any browse grid or search result.
///
/// `id` is scoped to the platform that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListItem {
    pub id: String,
    pub title: String,
    pub cover: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_episode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub episode_count: Option<u32>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub synopsis: Option<String>,
}

impl ListItem {
    /// Build an item from its mandatory fields, or `None` if id or title is blank.
    pub fn new(id: Option<String>, title: Option<String>, cover: Option<String>) -> Option<Self> {
        let id = id.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())?;
        let title = title.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())?;
        Some(Self {
            id,
            title,
            cover: cover.unwrap_or_default(),
            last_updated: None,
            last_episode: None,
            kind: None,
            status: None,
            episode_count: None,
            tags: Vec::new(),
            synopsis: None,
        })
    }
}

/// A named group of cards (theater rows, homepage sections).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shelf {
    pub title: String,
    pub items: Vec<ListItem>,
}

/// One playable episode or readable chapter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpisodeRef {
    pub id: String,
    pub sequence: u32,
    /// Playback URL or upstream id needed to resolve streams/pages.
    pub locator: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

/// Full detail page payload. `episodes` is always oldest-first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailItem {
    #[serde(flatten)]
    pub item: ListItem,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub episodes: Vec<EpisodeRef>,
}

/// Whether a card can be rendered: non-empty id and an absolute http(s) cover.
pub fn is_renderable(item: &ListItem) -> bool {
    if item.id.is_empty() {
        return false;
    }
    match url::Url::parse(&item.cover) {
        Ok(u) => matches!(u.scheme(), "http" | "https") && u.host().is_some(),
        Err(_) => false,
    }
}

/// Drop cards that would render blank. Returns how many were dropped.
pub fn retain_renderable(items: &mut Vec<ListItem>) -> usize {
    let before = items.len();
    items.retain(is_renderable);
    let dropped = before - items.len();
    if dropped > 0 {
        tracing::debug!(dropped, "dropped unrenderable items");
    }
    dropped
}
