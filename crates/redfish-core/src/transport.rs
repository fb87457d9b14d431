//! # Transport Interface
//!
//! The library never opens sockets itself. It consumes an injected HTTP client
//! through the [`Transport`] trait, which is responsible for authentication,
//! TLS, sessions, retries, redirects and timeouts.
//!
//! Implementors only need [`Transport::send`]. Non-2xx statuses are ordinary
//! [`Response`] values; only connection-level failures are `Err`. The
//! conveniences (`get`, `post`, `patch`, `delete`) are what the client calls.
//!
//! Every [`Request`] carries a [`CancellationToken`]. Honoring it is optional:
//! the [`Client`](crate::Client) also stops awaiting a request once the token
//! fires.

use crate::error::BoxError;
use async_trait::async_trait;
use std::fmt;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered header list with case-insensitive lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers(Vec<(String, String)>);

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `name`, replacing any existing value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        self.0.retain(|(n, _)| !n.eq_ignore_ascii_case(&name));
        self.0.push((name, value.into()));
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct Request {
    pub method: Method,
    pub uri: String,
    pub headers: Headers,
    pub body: Option<Vec<u8>>,
    pub cancel: CancellationToken,
}

impl Request {
    pub fn new(method: Method, uri: impl Into<String>) -> Self {
        Self {
            method,
            uri: uri.into(),
            headers: Headers::new(),
            body: None,
            cancel: CancellationToken::new(),
        }
    }

    pub fn with_body(mut self, body: Option<Vec<u8>>) -> Self {
        if body.is_some() {
            self.headers.insert("Content-Type", "application/json");
        }
        self.body = body;
        self
    }

    pub fn with_headers(mut self, headers: Headers) -> Self {
        for (name, value) in headers.iter() {
            self.headers.insert(name, value);
        }
        self
    }

    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub headers: Headers,
    pub body: Vec<u8>,
}

impl Response {
    pub fn new(status: u16) -> Self {
        Self {
            status,
            ..Self::default()
        }
    }

    /// A response whose body is the serialized `value`.
    pub fn json(status: u16, value: &serde_json::Value) -> Self {
        Self::new(status)
            .with_header("Content-Type", "application/json")
            .with_body(value.to_string().into_bytes())
    }

    pub fn with_body(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// An HTTP client capable of reaching a Redfish service.
///
/// # Example
///
/// ```rust
/// use async_trait::async_trait;
/// use redfish_core::{BoxError, Request, Response, Transport};
///
/// struct Offline;
///
/// #[async_trait]
/// impl Transport for Offline {
///     async fn send(&self, request: Request) -> Result<Response, BoxError> {
///         Err(format!("offline: {} {}", request.method, request.uri).into())
///     }
/// }
/// ```
#[async_trait]
pub trait Transport: Send + Sync + 'static {
    /// Issues one request. Must be safe to call concurrently.
    async fn send(&self, request: Request) -> Result<Response, BoxError>;

    async fn get(&self, uri: &str, cancel: &CancellationToken) -> Result<Response, BoxError> {
        self.send(Request::new(Method::Get, uri).with_cancellation(cancel.clone()))
            .await
    }

    async fn post(
        &self,
        uri: &str,
        body: Option<Vec<u8>>,
        headers: Headers,
        cancel: &CancellationToken,
    ) -> Result<Response, BoxError> {
        let request = Request::new(Method::Post, uri)
            .with_body(body)
            .with_headers(headers)
            .with_cancellation(cancel.clone());
        self.send(request).await
    }

    /// `headers` carries the preconditions (`If-Match`).
    async fn patch(
        &self,
        uri: &str,
        body: Vec<u8>,
        headers: Headers,
        cancel: &CancellationToken,
    ) -> Result<Response, BoxError> {
        let request = Request::new(Method::Patch, uri)
            .with_body(Some(body))
            .with_headers(headers)
            .with_cancellation(cancel.clone());
        self.send(request).await
    }

    async fn delete(
        &self,
        uri: &str,
        headers: Headers,
        cancel: &CancellationToken,
    ) -> Result<Response, BoxError> {
        let request = Request::new(Method::Delete, uri)
            .with_headers(headers)
            .with_cancellation(cancel.clone());
        self.send(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headers_are_case_insensitive() {
        let mut headers = Headers::new();
        headers.insert("ETag", "\"1\"");
        headers.insert("etag", "\"2\"");

        assert_eq!(headers.get("ETAG"), Some("\"2\""));
        assert_eq!(headers.iter().count(), 1);
    }

    #[test]
    fn test_body_sets_content_type() {
        let request = Request::new(Method::Post, "/a").with_body(Some(b"{}".to_vec()));
        assert_eq!(request.headers.get("content-type"), Some("application/json"));

        let empty = Request::new(Method::Post, "/a").with_body(None);
        assert!(empty.headers.is_empty());
    }
}
