use std::collections::HashMap;
use std::sync::Mutex;

use serde_json::Value;

use crate::error::UpstreamError;
use crate::headers::HeaderProfile;
use crate::upstream::{Upstream, UpstreamRequest};

/// Canned reply for one upstream request.
#[derive(Debug, Clone)]
pub enum Reply {
    Json(Value),
    Status(u16),
}

/// Upstream that answers from a script keyed by `UpstreamRequest::describe`.
/// Unscripted requests get a 404.
#[derive(Debug, Default)]
pub struct ScriptedUpstream {
    replies: HashMap<String, Reply>,
    calls: Mutex<Vec<(String, HeaderProfile)>>,
}

impl ScriptedUpstream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn json(mut self, key: &str, body: Value) -> Self {
        self.replies.insert(key.to_string(), Reply::Json(body));
        self
    }

    pub fn status(mut self, key: &str, status: u16) -> Self {
        self.replies.insert(key.to_string(), Reply::Status(status));
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .map(|(k, _)| k.clone())
            .collect()
    }

    pub fn profile_of(&self, key: &str) -> Option<HeaderProfile> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, p)| *p)
    }
}

impl Upstream for ScriptedUpstream {
    async fn get(&self, request: UpstreamRequest) -> Result<Value, UpstreamError> {
        let key = request.describe();
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push((key.clone(), request.profile));
        match self.replies.get(&key) {
            Some(Reply::Json(v)) => Ok(v.clone()),
            Some(Reply::Status(status)) => Err(UpstreamError::Api {
                status: *status,
                message: "scripted failure".into(),
            }),
            None => Err(UpstreamError::Api {
                status: 404,
                message: format!("unscripted: {key}"),
            }),
        }
    }
}
