//! FreeReels: homepage and search.

use nonton_core::models::ListItem;
use serde::Deserialize;

use crate::error::UpstreamError;
use crate::headers::HeaderProfile;
use crate::lenient::{self, pick, Listing};
use crate::platform::Platform;
use crate::upstream::{decode, Upstream, UpstreamRequest};

#[derive(Debug, Deserialize)]
pub struct FreeReelsItem {
    #[serde(default, deserialize_with = "lenient::string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub key: Option<String>,
    pub title: Option<String>,
    pub name: Option<String>,
    pub cover: Option<String>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub episode_count: u32,
    pub desc: Option<String>,
}

impl FreeReelsItem {
    pub fn into_list_item(self) -> Option<ListItem> {
        let mut item = ListItem::new(
            pick([self.id, self.key]),
            pick([self.title, self.name]),
            self.cover,
        )?;
        item.episode_count = (self.episode_count > 0).then_some(self.episode_count);
        item.synopsis = self.desc;
        Some(item)
    }
}

fn into_items(raw: serde_json::Value) -> Result<Vec<ListItem>, UpstreamError> {
    let listing: Listing<FreeReelsItem> = decode(raw)?;
    Ok(listing
        .into_vec()
        .into_iter()
        .filter_map(FreeReelsItem::into_list_item)
        .collect())
}

pub struct FreeReelsClient<'a, U> {
    upstream: &'a U,
}

impl<'a, U: Upstream> FreeReelsClient<'a, U> {
    pub fn new(upstream: &'a U) -> Self {
        Self { upstream }
    }

    pub async fn home(&self) -> Result<Vec<ListItem>, UpstreamError> {
        let raw = self
            .upstream
            .get(UpstreamRequest::new(Platform::FreeReels, "homepage").profile(HeaderProfile::BrowserJson))
            .await?;
        into_items(raw)
    }

    pub async fn search(&self, query: &str) -> Result<Vec<ListItem>, UpstreamError> {
        let raw = self
            .upstream
            .get(
                UpstreamRequest::new(Platform::FreeReels, "search")
                    .query("query", query)
                    .profile(HeaderProfile::UserAgentJson),
            )
            .await?;
        into_items(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedUpstream;
    use serde_json::json;

    #[test]
    fn test_key_and_name_fallbacks() {
        let items = into_items(json!([
            { "key": "k1", "title": "Fated", "cover": "https://img/k1.jpg", "episode_count": "45" },
            { "id": 9, "name": "Named", "cover": "https://img/9.jpg" },
            { "title": "Keyless", "cover": "https://img/none.jpg" }
        ]))
        .unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, "k1");
        assert_eq!(items[0].episode_count, Some(45));
        assert_eq!(items[1].id, "9");
        assert_eq!(items[1].title, "Named");
    }

    #[tokio::test]
    async fn test_home_uses_browser_json_headers() {
        let upstream = ScriptedUpstream::new().json("freereels/homepage", json!({ "data": [] }));
        let items = FreeReelsClient::new(&upstream).home().await.unwrap();
        assert!(items.is_empty());
        assert_eq!(
            upstream.profile_of("freereels/homepage"),
            Some(HeaderProfile::BrowserJson)
        );
    }
}
