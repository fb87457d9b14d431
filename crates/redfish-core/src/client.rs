//! # Client
//!
//! [`Client`] is the handle every resource holds once attached. It wraps the
//! injected [`Transport`], the [`ClientConfig`] and a cancellation token, and
//! is cheap to clone: all resources loaded through one client share the same
//! transport.
//!
//! | Operation | Method |
//! |-----------|--------|
//! | `Load(URI) → Resource` | [`Client::get`] |
//! | Single link | [`Client::get_optional`] |
//! | Link array | [`Client::get_many`] |
//! | `Enumerate(URI) → Sequence<Resource>` | [`Client::enumerate`] |
//! | Delete | [`Client::delete`] |
//!
//! Every request races the client's [`CancellationToken`]. Scope a token to
//! one batch with [`Client::with_cancellation`].

use crate::collection::{self, Batch};
use crate::config::ClientConfig;
use crate::entity::{decode, Resource};
use crate::error::{BoxError, RedfishError, Result};
use crate::link::Link;
use crate::transport::{Headers, Method, Response, Transport};
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

#[derive(Clone)]
pub struct Client {
    transport: Arc<dyn Transport>,
    config: Arc<ClientConfig>,
    cancel: CancellationToken,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("config", &self.config)
            .field("cancelled", &self.cancel.is_cancelled())
            .finish_non_exhaustive()
    }
}

impl Client {
    pub fn new(transport: impl Transport) -> Self {
        Self::with_config(transport, ClientConfig::default())
    }

    pub fn with_config(transport: impl Transport, config: ClientConfig) -> Self {
        Self::from_shared(Arc::new(transport), config)
    }

    /// Shares a transport that is already behind an `Arc`.
    pub fn from_shared(transport: Arc<dyn Transport>, config: ClientConfig) -> Self {
        Self {
            transport,
            config: Arc::new(config),
            cancel: CancellationToken::new(),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancel
    }

    /// A client sharing this transport whose requests observe `cancel`.
    pub fn with_cancellation(&self, cancel: CancellationToken) -> Self {
        Self {
            transport: self.transport.clone(),
            config: self.config.clone(),
            cancel,
        }
    }

    /// Loads the configured service root.
    pub async fn service_root<R: Resource>(&self) -> Result<R> {
        let uri = self.config.service_root.clone();
        self.get::<R>(&uri).await
    }

    /// GETs `uri` and decodes it as `R`, attached to this client.
    #[tracing::instrument(skip(self), fields(kind = R::KIND))]
    pub async fn get<R: Resource>(&self, uri: &str) -> Result<R> {
        let response = self.fetch(uri).await?;
        let mut resource = decode::<R>(&response.body, uri, Some(&response.headers))?;
        resource.attach(self.clone());
        Ok(resource)
    }

    /// Resolves a single link; the absent link yields `None` without traffic.
    pub async fn get_optional<R: Resource>(&self, link: &Link) -> Result<Option<R>> {
        match link.uri() {
            Some(uri) => self.get::<R>(uri).await.map(Some),
            None => Ok(None),
        }
    }

    /// Loads every URI with bounded fan-out. Individual failures are reported, not raised.
    #[tracing::instrument(skip(self, uris), fields(kind = R::KIND))]
    pub async fn get_many<R: Resource>(&self, uris: impl IntoIterator<Item = String> + Send) -> Batch<R> {
        let uris: Vec<String> = uris.into_iter().collect();
        collection::load_all(self, uris).await
    }

    /// Enumerates the collection at `uri` across all pages.
    pub async fn enumerate<R: Resource>(&self, uri: &str) -> Result<Batch<R>> {
        collection::enumerate(self, uri).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, uri: &str) -> Result<()> {
        self.run(Method::Delete, uri, self.transport.delete(uri, Headers::new(), &self.cancel))
            .await
            .map(|_| ())
    }

    /// Raw GET with status mapping.
    pub async fn fetch(&self, uri: &str) -> Result<Response> {
        self.run(Method::Get, uri, self.transport.get(uri, &self.cancel))
            .await
    }

    pub(crate) async fn submit(&self, uri: &str, body: Option<Vec<u8>>, etag: &str) -> Result<Response> {
        let headers = self.config.preconditions(etag);
        self.run(Method::Post, uri, self.transport.post(uri, body, headers, &self.cancel))
            .await
    }

    pub(crate) async fn modify(&self, uri: &str, body: Vec<u8>, etag: &str) -> Result<Response> {
        let headers = self.config.preconditions(etag);
        self.run(Method::Patch, uri, self.transport.patch(uri, body, headers, &self.cancel))
            .await
    }

    async fn run<F>(&self, method: Method, uri: &str, call: F) -> Result<Response>
    where
        F: Future<Output = std::result::Result<Response, BoxError>> + Send,
    {
        if self.cancel.is_cancelled() {
            return Err(RedfishError::Cancelled {
                uri: uri.to_string(),
            });
        }
        debug!(%method, uri, "Sending request");
        let response = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => {
                return Err(RedfishError::Cancelled { uri: uri.to_string() });
            }
            result = call => result.map_err(|e| RedfishError::connection(uri, e))?,
        };
        debug!(%method, uri, status = response.status, "Response");
        if response.is_success() {
            Ok(response)
        } else {
            Err(RedfishError::from_response(uri, &response))
        }
    }
}
