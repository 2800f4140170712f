use nonton_core::models::{DetailItem, EpisodeRef, ListItem, StreamOption};
use serde::Deserialize;
use serde_json::Value;

use crate::error::UpstreamError;
use crate::lenient::{self, pick};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimeItem {
    #[serde(default, deserialize_with = "lenient::string")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub anime_id: Option<String>,
    pub judul: Option<String>,
    pub cover: Option<String>,
    pub lastch: Option<String>,
    pub lastup: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub status: Option<String>,
    pub sinopsis: Option<String>,
    #[serde(default, deserialize_with = "lenient::items")]
    pub genre: Vec<String>,
    #[serde(default, deserialize_with = "lenient::items")]
    pub chapter: Vec<AnimeChapter>,
}

#[derive(Debug, Deserialize)]
pub struct AnimeChapter {
    #[serde(default, deserialize_with = "lenient::string")]
    pub id: Option<String>,
    pub ch: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub url: Option<String>,
    pub date: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AnimeVideoResponse {
    #[serde(default, deserialize_with = "lenient::items")]
    pub data: Vec<AnimeVideoData>,
}

#[derive(Debug, Deserialize)]
pub struct AnimeVideoData {
    #[serde(default, deserialize_with = "lenient::items")]
    pub stream: Vec<AnimeStream>,
}

#[derive(Debug, Deserialize)]
pub struct AnimeStream {
    pub reso: Option<String>,
    pub link: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub provide: Option<String>,
}

impl AnimeItem {
    pub fn into_list_item(self) -> Option<ListItem> {
        let mut item = ListItem::new(pick([self.url, self.id, self.anime_id]), self.judul, self.cover)?;
        item.last_episode = self.lastch;
        item.last_updated = self.lastup;
        item.kind = self.kind;
        item.status = self.status;
        item.synopsis = self.sinopsis;
        Some(item)
    }

    /// Upstream lists episodes newest-first; the detail is oldest-first.
    ///
    /// The detail keeps the slug identity list cards use: `url`, else the
    /// requested slug. Numeric `id`/`animeId` only apply when both are blank.
    pub fn into_detail(mut self, requested_id: &str) -> Option<DetailItem> {
        let genres = std::mem::take(&mut self.genre);
        let chapters = std::mem::take(&mut self.chapter);
        self.url = pick([self.url.take(), Some(requested_id.to_string())]);

        let episodes = chapters
            .into_iter()
            .rev()
            .filter_map(|c| {
                let locator = pick([c.url, c.id.clone()])?;
                Some((pick([c.id, Some(locator.clone())])?, locator, c.date))
            })
            .enumerate()
            .map(|(i, (id, locator, date))| EpisodeRef {
                id,
                sequence: i as u32 + 1,
                locator,
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

/// The detail payload arrives as `{data: [item]}`, `[item]` or `item`.
pub fn detail_from_value(value: Value) -> Result<Option<AnimeItem>, UpstreamError> {
    let first = match value {
        Value::Array(items) => items.into_iter().next(),
        Value::Object(mut map) => match map.remove("data") {
            Some(Value::Array(items)) => items.into_iter().next(),
            Some(obj @ Value::Object(_)) => Some(obj),
            _ => Some(Value::Object(map)),
        },
        _ => None,
    };
    first
        .filter(|v| !v.is_null())
        .map(serde_json::from_value)
        .transpose()
        .map_err(|e| UpstreamError::Parse(e.to_string()))
}

impl AnimeVideoResponse {
    pub fn into_streams(self) -> Vec<StreamOption> {
        self.data
            .into_iter()
            .next()
            .map(|d| d.stream)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|s| {
                Some(StreamOption {
                    url: pick([s.link])?,
                    resolution: s.reso.unwrap_or_default(),
                    provider: s.provide.unwrap_or_default(),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lenient::Listing;
    use serde_json::json;

    #[test]
    fn test_deserialize_latest() {
        let json = r#"[
            { "id": 101, "url": "one-piece", "judul": "One Piece", "cover": "https://img.example.com/op.jpg", "lastch": "Episode 1100" },
            { "animeId": "frieren", "judul": "Frieren", "cover": "https://img.example.com/f.jpg" },
            { "id": 7, "cover": "https://img.example.com/none.jpg" },
            { "judul": "Nameless" }
        ]"#;
        let listing: Listing<AnimeItem> = serde_json::from_str(json).unwrap();
        let items: Vec<_> = listing
            .into_vec()
            .into_iter()
            .filter_map(AnimeItem::into_list_item)
            .collect();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, "one-piece");
        assert_eq!(items[0].last_episode.as_deref(), Some("Episode 1100"));
        assert_eq!(items[1].id, "frieren");
    }

    #[test]
    fn test_detail_reverses_chapters() {
        let value = json!({
            "data": [{
                "id": 55,
                "judul": "Frieren",
                "cover": "https://img.example.com/f.jpg",
                "genre": ["Adventure", "Fantasy"],
                "sinopsis": "After the journey.",
                "chapter": [
                    { "id": 3, "ch": "3", "url": "frieren-ep-3", "date": "2024-01-19" },
                    { "id": 2, "ch": "2", "url": "frieren-ep-2" },
                    { "id": 1, "ch": "1", "url": "frieren-ep-1" }
                ]
            }]
        });
        let detail = detail_from_value(value)
            .unwrap()
            .unwrap()
            .into_detail("frieren")
            .unwrap();
        assert_eq!(detail.item.id, "frieren");
        assert_eq!(detail.genres, ["Adventure", "Fantasy"]);
        let locators: Vec<_> = detail.episodes.iter().map(|e| e.locator.as_str()).collect();
        assert_eq!(locators, ["frieren-ep-1", "frieren-ep-2", "frieren-ep-3"]);
        assert_eq!(detail.episodes[0].sequence, 1);
        assert_eq!(detail.episodes[2].date.as_deref(), Some("2024-01-19"));
    }

    #[test]
    fn test_detail_payload_shapes() {
        let bare = json!([{ "judul": "A", "cover": "https://x/a.jpg" }]);
        let item = detail_from_value(bare).unwrap().unwrap();
        assert_eq!(item.into_detail("a-slug").unwrap().item.id, "a-slug");

        let keyed = json!({ "id": 7, "url": "c-slug", "judul": "C", "cover": "https://x/c.jpg" });
        let item = detail_from_value(keyed).unwrap().unwrap();
        assert_eq!(item.into_detail("requested").unwrap().item.id, "c-slug");

        let object = json!({ "judul": "B", "url": "b" });
        assert_eq!(detail_from_value(object).unwrap().unwrap().judul.as_deref(), Some("B"));

        assert!(detail_from_value(json!({ "data": [] })).unwrap().is_none());
        assert!(detail_from_value(Value::Null).unwrap().is_none());
    }

    #[test]
    fn test_video_streams() {
        let resp: AnimeVideoResponse = serde_json::from_value(json!({
            "data": [{
                "episode_id": 9,
                "reso": ["480p", "720p"],
                "stream": [
                    { "reso": "480p", "link": "https://v.example.com/480.mp4", "provide": 1 },
                    { "reso": "720p", "link": "https://v.example.com/720.mp4", "provide": 2 },
                    { "reso": "1080p", "link": null }
                ]
            }]
        }))
        .unwrap();
        let streams = resp.into_streams();
        assert_eq!(streams.len(), 2);
        assert_eq!(streams[1].resolution, "720p");
        assert_eq!(streams[1].provider, "2");
    }
}
