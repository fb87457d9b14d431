//! # Client Configuration
//!
//! | Field | Default | Effect |
//! |-------|---------|--------|
//! | `max_concurrency` | `3` | Concurrent member fetches in one enumeration or bulk resolution |
//! | `strip_etag_quotes` | `false` | Send `If-Match` without the surrounding quotes |
//! | `disable_etag_match` | `false` | Never send `If-Match` |
//! | `service_root` | `/redfish/v1/` | URI loaded by [`Client::service_root`](crate::Client::service_root) |
//!
//! Some services only match bare ETags, others reject conditional requests
//! outright; the two ETag switches exist for those.

use crate::error::{RedfishError, Result};
use crate::transport::Headers;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub max_concurrency: usize,
    pub strip_etag_quotes: bool,
    pub disable_etag_match: bool,
    pub service_root: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            max_concurrency: 3,
            strip_etag_quotes: false,
            disable_etag_match: false,
            service_root: "/redfish/v1/".to_string(),
        }
    }
}

impl ClientConfig {
    /// Parses a JSON config document. Missing keys take their defaults.
    pub fn from_json(document: &str) -> Result<Self> {
        serde_json::from_str(document)
            .map_err(|e| RedfishError::decode("<config>", &e, document.as_bytes()))
    }

    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency;
        self
    }

    pub fn with_strip_etag_quotes(mut self, strip: bool) -> Self {
        self.strip_etag_quotes = strip;
        self
    }

    pub fn with_disable_etag_match(mut self, disable: bool) -> Self {
        self.disable_etag_match = disable;
        self
    }

    pub fn with_service_root(mut self, uri: impl Into<String>) -> Self {
        self.service_root = uri.into();
        self
    }

    pub(crate) fn concurrency(&self) -> usize {
        self.max_concurrency.max(1)
    }

    /// Precondition headers for a write against a resource carrying `etag`.
    pub(crate) fn preconditions(&self, etag: &str) -> Headers {
        let mut headers = Headers::new();
        if etag.is_empty() || self.disable_etag_match {
            return headers;
        }
        let value = if self.strip_etag_quotes {
            etag.trim_matches('"')
        } else {
            etag
        };
        headers.insert("If-Match", value);
        headers
    }
}
