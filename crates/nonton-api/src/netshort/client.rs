use nonton_core::models::{DetailItem, ListItem, Shelf};

use super::types::{ForYouPage, NetShortDetail, TheaterGroup};
use crate::error::UpstreamError;
use crate::headers::HeaderProfile;
use crate::lenient::Listing;
use crate::platform::Platform;
use crate::upstream::{decode, Upstream, UpstreamRequest};

pub struct NetShortClient<'a, U> {
    upstream: &'a U,
}

impl<'a, U: Upstream> NetShortClient<'a, U> {
    pub fn new(upstream: &'a U) -> Self {
        Self { upstream }
    }

    pub async fn for_you(&self, page: u32) -> Result<Vec<ListItem>, UpstreamError> {
        let raw = self
            .upstream
            .get(
                UpstreamRequest::new(Platform::NetShort, "foryou")
                    .query("page", page.to_string())
                    .profile(HeaderProfile::Browser),
            )
            .await?;
        let page: ForYouPage = decode(raw)?;
        Ok(page.into_items())
    }

    pub async fn theaters(&self) -> Result<Vec<Shelf>, UpstreamError> {
        let raw = self
            .upstream
            .get(UpstreamRequest::new(Platform::NetShort, "theaters").profile(HeaderProfile::Browser))
            .await?;
        let groups: Listing<TheaterGroup> = decode(raw)?;
        Ok(groups
            .into_vec()
            .into_iter()
            .filter_map(TheaterGroup::into_shelf)
            .collect())
    }

    pub async fn detail(&self, short_play_id: &str) -> Result<DetailItem, UpstreamError> {
        let raw = self
            .upstream
            .get(
                UpstreamRequest::new(Platform::NetShort, "allepisode")
                    .query("shortPlayId", short_play_id)
                    .profile(HeaderProfile::Browser),
            )
            .await?;
        let detail: NetShortDetail = decode(raw)?;
        detail
            .into_detail(short_play_id)
            .ok_or_else(|| UpstreamError::NotFound(format!("netshort {short_play_id}")))
    }
}
