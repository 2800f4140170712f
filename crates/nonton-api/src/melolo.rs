use nonton_core::models::{ListItem, StreamOption};
use serde::Deserialize;

use crate::error::UpstreamError;
use crate::headers::HeaderProfile;
use crate::lenient::{self, pick, Listing};
use crate::platform::Platform;
use crate::upstream::{decode, Upstream, UpstreamRequest};

#[derive(Debug, Deserialize)]
pub struct MeloloBook {
    #[serde(default, deserialize_with = "lenient::string")]
    pub book_id: Option<String>,
    pub book_name: Option<String>,
    pub thumb_url: Option<String>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub serial_count: u32,
    #[serde(rename = "abstract")]
    pub abstract_: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct MeloloStream {
    pub data: Option<MeloloStreamUrls>,
}

#[derive(Debug, Default, Deserialize)]
pub struct MeloloStreamUrls {
    pub main_url: Option<String>,
    pub backup_url: Option<String>,
}

impl MeloloBook {
    pub fn into_list_item(self) -> Option<ListItem> {
        let mut item = ListItem::new(self.book_id, self.book_name, self.thumb_url)?;
        item.episode_count = (self.serial_count > 0).then_some(self.serial_count);
        item.synopsis = self.abstract_;
        Some(item)
    }
}

impl MeloloStream {
    /// Main URL first, then the backup.
    pub fn into_streams(self) -> Vec<StreamOption> {
        let urls = self.data.unwrap_or_default();
        [("main", urls.main_url), ("backup", urls.backup_url)]
            .into_iter()
            .filter_map(|(provider, url)| {
                Some(StreamOption {
                    url: pick([url])?,
                    resolution: String::new(),
                    provider: provider.to_string(),
                })
            })
            .collect()
    }
}

pub struct MeloloClient<'a, U> {
    upstream: &'a U,
}

impl<'a, U: Upstream> MeloloClient<'a, U> {
    pub fn new(upstream: &'a U) -> Self {
        Self { upstream }
    }

    pub async fn latest(&self) -> Result<Vec<ListItem>, UpstreamError> {
        let raw = self
            .upstream
            .get(UpstreamRequest::new(Platform::Melolo, "latest"))
            .await?;
        let listing: Listing<MeloloBook> = decode(raw)?;
        Ok(listing
            .into_vec()
            .into_iter()
            .filter_map(MeloloBook::into_list_item)
            .collect())
    }

    pub async fn stream(&self, video_id: &str) -> Result<Vec<StreamOption>, UpstreamError> {
        let raw = self
            .upstream
            .get(
                UpstreamRequest::new(Platform::Melolo, "stream")
                    .query("videoId", video_id)
                    .profile(HeaderProfile::Browser),
            )
            .await?;
        let stream: MeloloStream = decode(raw)?;
        Ok(stream.into_streams())
    }
}
