use std::future::Future;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::error::UpstreamError;
use crate::headers::HeaderProfile;
use crate::platform::Platform;

/// One GET against the aggregation upstream.
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamRequest {
    pub platform: Platform,
    pub path: &'static str,
    pub query: Vec<(&'static str, String)>,
    pub profile: HeaderProfile,
}

impl UpstreamRequest {
    pub fn new(platform: Platform, path: &'static str) -> Self {
        Self {
            platform,
            path,
            query: Vec::new(),
            profile: HeaderProfile::default(),
        }
    }

    pub fn query(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.query.push((key, value.into()));
        self
    }

    pub fn profile(mut self, profile: HeaderProfile) -> Self {
        self.profile = profile;
        self
    }

    /// `segment/path?k=v&k=v`, unencoded. Used in logs.
    pub fn describe(&self) -> String {
        let mut out = format!("{}/{}", self.platform.segment(), self.path);
        for (i, (k, v)) in self.query.iter().enumerate() {
            out.push(if i == 0 { '?' } else { '&' });
            out.push_str(k);
            out.push('=');
            out.push_str(v);
        }
        out
    }
}

/// Source of raw upstream JSON.
///
/// No retries, no backoff, no timeout: a failed call is reported once and
/// the caller's policy decides what to do with it.
pub trait Upstream: Send + Sync {
    fn get(
        &self,
        request: UpstreamRequest,
    ) -> impl Future<Output = Result<Value, UpstreamError>> + Send;
}

/// reqwest-backed upstream client.
#[derive(Debug, Clone)]
pub struct HttpUpstream {
    base_url: String,
    http: Client,
}

impl HttpUpstream {
    pub fn new(base_url: &str) -> Result<Self, UpstreamError> {
        Self::with_client(base_url, Client::new())
    }

    pub fn with_client(base_url: &str, http: Client) -> Result<Self, UpstreamError> {
        let base_url = base_url.trim_end_matches('/').to_string();
        Url::parse(&base_url).map_err(|e| UpstreamError::Parse(format!("base url: {e}")))?;
        Ok(Self { base_url, http })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url_for(&self, request: &UpstreamRequest) -> Result<Url, UpstreamError> {
        let raw = format!(
            "{}/{}/{}",
            self.base_url,
            request.platform.segment(),
            request.path
        );
        let mut url = Url::parse(&raw).map_err(|e| UpstreamError::Parse(e.to_string()))?;
        if !request.query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(request.query.iter().map(|(k, v)| (*k, v.as_str())));
        }
        Ok(url)
    }

    async fn check_response(
        resp: reqwest::Response,
        request: &UpstreamRequest,
    ) -> Result<reqwest::Response, UpstreamError> {
        if resp.status().is_success() {
            Ok(resp)
        } else {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            tracing::warn!(
                status,
                platform = %request.platform,
                upstream = %request.describe(),
                "upstream returned an error status"
            );
            Err(UpstreamError::Api {
                status,
                message: body,
            })
        }
    }
}

impl Upstream for HttpUpstream {
    async fn get(&self, request: UpstreamRequest) -> Result<Value, UpstreamError> {
        let url = self.url_for(&request)?;
        tracing::debug!(platform = %request.platform, %url, "upstream request");

        let mut builder = self.http.get(url);
        for (name, value) in request.profile.headers() {
            builder = builder.header(name, value);
        }

        let resp = builder.send().await?;
        let resp = Self::check_response(resp, &request).await?;
        let text = resp.text().await?;
        parse_body(&text)
    }
}

/// Parse a response body. An empty body is JSON `null`.
pub fn parse_body(text: &str) -> Result<Value, UpstreamError> {
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(text).map_err(|e| UpstreamError::Parse(e.to_string()))
}

/// Decode a raw payload into a typed shape. `null` decodes to the default.
pub fn decode<T: DeserializeOwned + Default>(value: Value) -> Result<T, UpstreamError> {
    if value.is_null() {
        return Ok(T::default());
    }
    serde_json::from_value(value).map_err(|e| UpstreamError::Parse(e.to_string()))
}
