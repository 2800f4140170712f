use nonton_core::models::{DetailItem, EpisodeRef, ListItem, Shelf};
use serde::Deserialize;

use crate::lenient::{self, pick};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForYouPage {
    #[serde(default, deserialize_with = "lenient::items")]
    pub content_infos: Vec<NetShortDrama>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub max_offset: u32,
    #[serde(default)]
    pub completed: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TheaterGroup {
    #[serde(default, deserialize_with = "lenient::string")]
    pub group_id: Option<String>,
    pub content_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::items")]
    pub content_infos: Vec<NetShortDrama>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetShortDrama {
    #[serde(default, deserialize_with = "lenient::string")]
    pub short_play_id: Option<String>,
    pub short_play_name: Option<String>,
    pub short_play_cover: Option<String>,
    pub group_short_play_cover: Option<String>,
    #[serde(default, deserialize_with = "lenient::items")]
    pub label_array: Vec<String>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub total_episode: u32,
    pub shot_introduce: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetShortDetail {
    #[serde(default, deserialize_with = "lenient::string")]
    pub short_play_id: Option<String>,
    pub short_play_name: Option<String>,
    pub short_play_cover: Option<String>,
    pub shot_introduce: Option<String>,
    #[serde(default, deserialize_with = "lenient::items")]
    pub short_play_labels: Vec<String>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub total_episode: u32,
    #[serde(default, deserialize_with = "lenient::count")]
    pub is_finish: u32,
    #[serde(default, deserialize_with = "lenient::items")]
    pub short_play_episode_infos: Vec<NetShortEpisode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetShortEpisode {
    #[serde(default, deserialize_with = "lenient::string")]
    pub episode_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub episode_no: u32,
    pub play_voucher: Option<String>,
}

impl NetShortDrama {
    pub fn into_list_item(self) -> Option<ListItem> {
        let mut item = ListItem::new(
            self.short_play_id,
            self.short_play_name,
            pick([self.short_play_cover, self.group_short_play_cover]),
        )?;
        item.tags = self.label_array;
        item.episode_count = (self.total_episode > 0).then_some(self.total_episode);
        item.synopsis = self.shot_introduce;
        Some(item)
    }
}

impl ForYouPage {
    pub fn into_items(self) -> Vec<ListItem> {
        self.content_infos
            .into_iter()
            .filter_map(NetShortDrama::into_list_item)
            .collect()
    }
}

impl TheaterGroup {
    /// `None` when the group has no title or no usable dramas.
    pub fn into_shelf(self) -> Option<Shelf> {
        let title = pick([self.content_name])?;
        let items: Vec<_> = self
            .content_infos
            .into_iter()
            .filter_map(NetShortDrama::into_list_item)
            .collect();
        (!items.is_empty()).then_some(Shelf { title, items })
    }
}

impl NetShortDetail {
    pub fn into_detail(self, requested_id: &str) -> Option<DetailItem> {
        let mut item = ListItem::new(
            pick([self.short_play_id, Some(requested_id.to_string())]),
            self.short_play_name,
            self.short_play_cover,
        )?;
        item.synopsis = self.shot_introduce;
        item.tags = self.short_play_labels.clone();
        item.episode_count = (self.total_episode > 0).then_some(self.total_episode);
        item.status = Some(if self.is_finish == 1 { "completed" } else { "ongoing" }.into());

        let mut episodes: Vec<_> = self
            .short_play_episode_infos
            .into_iter()
            .filter_map(|ep| {
                let locator = pick([ep.play_voucher])?;
                Some(EpisodeRef {
                    id: pick([ep.episode_id]).unwrap_or_else(|| ep.episode_no.to_string()),
                    sequence: ep.episode_no,
                    locator,
                    date: None,
                })
            })
            .collect();
        episodes.sort_by_key(|e| e.sequence);

        Some(DetailItem {
            item,
            genres: self.short_play_labels,
            episodes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lenient::Listing;

    #[test]
    fn test_deserialize_foryou() {
        let page: ForYouPage = serde_json::from_str(
            r#"{
                "contentInfos": [
                    {
                        "shortPlayId": 1880001,
                        "shortPlayName": "The CEO's Return",
                        "shortPlayCover": "https://img.example.com/ceo.jpg",
                        "labelArray": ["Romance", "Revenge"],
                        "heatScoreShow": "1.2M"
                    },
                    { "shortPlayName": "Missing Id", "shortPlayCover": "https://img.example.com/m.jpg" }
                ],
                "maxOffset": "3",
                "completed": false
            }"#,
        )
        .unwrap();
        assert_eq!(page.max_offset, 3);
        let items = page.into_items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, "1880001");
        assert_eq!(items[0].tags, ["Romance", "Revenge"]);
    }

    #[test]
    fn test_theaters_group_into_shelves() {
        let groups: Listing<TheaterGroup> = serde_json::from_str(
            r#"[
                {
                    "groupId": 1,
                    "contentName": "Trending",
                    "contentInfos": [
                        { "shortPlayId": "a", "shortPlayName": "A", "groupShortPlayCover": "https://img.example.com/a.jpg", "totalEpisode": 60 }
                    ]
                },
                { "groupId": 2, "contentName": "Empty", "contentInfos": [] }
            ]"#,
        )
        .unwrap();
        let shelves: Vec<_> = groups
            .into_vec()
            .into_iter()
            .filter_map(TheaterGroup::into_shelf)
            .collect();
        assert_eq!(shelves.len(), 1);
        assert_eq!(shelves[0].title, "Trending");
        assert_eq!(shelves[0].items[0].cover, "https://img.example.com/a.jpg");
        assert_eq!(shelves[0].items[0].episode_count, Some(60));
    }

    #[test]
    fn test_detail_orders_episodes() {
        let detail: NetShortDetail = serde_json::from_str(
            r#"{
                "shortPlayId": "p9",
                "shortPlayName": "Hidden Heiress",
                "shortPlayCover": "https://img.example.com/p9.jpg",
                "shotIntroduce": "She was hidden.",
                "shortPlayLabels": ["Drama"],
                "totalEpisode": 3,
                "isFinish": 1,
                "shortPlayEpisodeInfos": [
                    { "episodeId": "e3", "episodeNo": 3, "playVoucher": "https://v.example.com/3.m3u8" },
                    { "episodeId": "e1", "episodeNo": "1", "playVoucher": "https://v.example.com/1.m3u8" },
                    { "episodeId": "e2", "episodeNo": 2, "playVoucher": "https://v.example.com/2.m3u8" },
                    { "episodeId": "e4", "episodeNo": 4, "isLock": true }
                ]
            }"#,
        )
        .unwrap();
        let detail = detail.into_detail("p9").unwrap();
        let seq: Vec<_> = detail.episodes.iter().map(|e| e.sequence).collect();
        assert_eq!(seq, [1, 2, 3]);
        assert_eq!(detail.episodes[0].locator, "https://v.example.com/1.m3u8");
        assert_eq!(detail.item.status.as_deref(), Some("completed"));
        assert_eq!(detail.genres, ["Drama"]);
    }
}
