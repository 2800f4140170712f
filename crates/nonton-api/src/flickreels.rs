use nonton_core::models::ListItem;
use serde::Deserialize;

use crate::error::UpstreamError;
use crate::headers::HeaderProfile;
use crate::lenient::{self, Listing};
use crate::platform::Platform;
use crate::upstream::{decode, Upstream, UpstreamRequest};

#[derive(Debug, Deserialize)]
pub struct Playlet {
    #[serde(default, deserialize_with = "lenient::string")]
    pub playlet_id: Option<String>,
    pub title: Option<String>,
    pub cover: Option<String>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub upload_num: u32,
    pub introduce: Option<String>,
}

impl Playlet {
    pub fn into_list_item(self) -> Option<ListItem> {
        let mut item = ListItem::new(self.playlet_id, self.title, self.cover)?;
        item.episode_count = (self.upload_num > 0).then_some(self.upload_num);
        item.synopsis = self.introduce;
        Some(item)
    }
}

pub struct FlickReelsClient<'a, U> {
    upstream: &'a U,
}

impl<'a, U: Upstream> FlickReelsClient<'a, U> {
    pub fn new(upstream: &'a U) -> Self {
        Self { upstream }
    }

    pub async fn latest(&self) -> Result<Vec<ListItem>, UpstreamError> {
        let raw = self
            .upstream
            .get(UpstreamRequest::new(Platform::FlickReels, "latest").profile(HeaderProfile::UserAgentJson))
            .await?;
        let listing: Listing<Playlet> = decode(raw)?;
        Ok(listing
            .into_vec()
            .into_iter()
            .filter_map(Playlet::into_list_item)
            .collect())
    }
}
