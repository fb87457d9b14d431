//! # Mock Transport & Testing Guide
//!
//! [`MockTransport`] implements [`Transport`] entirely in memory. Tests queue
//! expectations per `(method, URI)`, run the code under test against a
//! [`Client`](crate::Client) built on the mock, then assert on the recorded
//! traffic.
//!
//! | Feature | MockTransport | Real service |
//! |---------|---------------|--------------|
//! | **Speed** | Instant | Network-bound |
//! | **Determinism** | Fully scripted | Subject to service state |
//! | **Traffic assertions** | `calls()`, `call_count()` | Packet capture |
//! | **Error injection** | `return_status(412)`, `fail_with(..)` | Hard |
//!
//! ## Example
//!
//! ```rust
//! use redfish_core::mock::MockTransport;
//! use redfish_core::{Client, Method};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() {
//!     let mock = MockTransport::new();
//!     mock.expect_get("/redfish/v1/")
//!         .return_json(json!({"@odata.id": "/redfish/v1/", "Id": "RootService"}));
//!
//!     let client = Client::new(mock.clone());
//!     let response = client.fetch("/redfish/v1/").await.unwrap();
//!     assert_eq!(response.status, 200);
//!
//!     assert_eq!(mock.calls()[0].method, Method::Get);
//!     mock.verify(); // panics if an expectation was not consumed
//! }
//! ```
//!
//! Expectations for the same `(method, URI)` are consumed in the order they
//! were queued; expectations for different URIs may be consumed in any order,
//! which keeps concurrent fan-out testable. A request with no matching
//! expectation is recorded and answered with a transport error.

use crate::error::BoxError;
use crate::transport::{Headers, Method, Request, Response, Transport};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

enum Reply {
    Respond(Response),
    Fail(String),
}

struct Expectation {
    method: Method,
    uri: String,
    delay: Option<Duration>,
    reply: Reply,
}

/// A request as the mock received it.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub method: Method,
    pub uri: String,
    pub headers: Headers,
    pub body: Option<Vec<u8>>,
}

impl RecordedCall {
    /// The body parsed as JSON, if there was one.
    pub fn json(&self) -> Option<Value> {
        self.body
            .as_deref()
            .and_then(|b| serde_json::from_slice(b).ok())
    }
}

#[derive(Default)]
struct State {
    expectations: Vec<Expectation>,
    calls: Vec<RecordedCall>,
}

#[derive(Clone, Default)]
pub struct MockTransport {
    state: Arc<Mutex<State>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn expect(&self, method: Method, uri: impl Into<String>) -> ExpectationBuilder {
        ExpectationBuilder {
            state: self.state.clone(),
            method,
            uri: uri.into(),
            delay: None,
        }
    }

    pub fn expect_get(&self, uri: impl Into<String>) -> ExpectationBuilder {
        self.expect(Method::Get, uri)
    }

    pub fn expect_post(&self, uri: impl Into<String>) -> ExpectationBuilder {
        self.expect(Method::Post, uri)
    }

    pub fn expect_patch(&self, uri: impl Into<String>) -> ExpectationBuilder {
        self.expect(Method::Patch, uri)
    }

    pub fn expect_delete(&self, uri: impl Into<String>) -> ExpectationBuilder {
        self.expect(Method::Delete, uri)
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.lock().calls.clone()
    }

    pub fn call_count(&self) -> usize {
        self.lock().calls.len()
    }

    pub fn calls_with(&self, method: Method) -> Vec<RecordedCall> {
        self.lock()
            .calls
            .iter()
            .filter(|c| c.method == method)
            .cloned()
            .collect()
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let state = self.lock();
        if !state.expectations.is_empty() {
            let remaining: Vec<String> = state
                .expectations
                .iter()
                .map(|e| format!("{} {}", e.method, e.uri))
                .collect();
            panic!(
                "Not all expectations were met. {} remaining: {:?}",
                remaining.len(),
                remaining
            );
        }
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: Request) -> Result<Response, BoxError> {
        let (delay, reply) = {
            let mut state = self.lock();
            state.calls.push(RecordedCall {
                method: request.method,
                uri: request.uri.clone(),
                headers: request.headers.clone(),
                body: request.body.clone(),
            });
            let position = state
                .expectations
                .iter()
                .position(|e| e.method == request.method && e.uri == request.uri);
            match position {
                Some(index) => {
                    let expectation = state.expectations.remove(index);
                    (expectation.delay, expectation.reply)
                }
                None => {
                    return Err(format!("unexpected request {} {}", request.method, request.uri).into())
                }
            }
        };

        if let Some(delay) = delay {
            tokio::select! {
                _ = tokio::time::sleep(delay) => {}
                _ = request.cancel.cancelled() => return Err("request cancelled".into()),
            }
        }
        match reply {
            Reply::Respond(response) => Ok(response),
            Reply::Fail(message) => Err(message.into()),
        }
    }
}

/// Builder for one expectation. Terminal methods queue it.
pub struct ExpectationBuilder {
    state: Arc<Mutex<State>>,
    method: Method,
    uri: String,
    delay: Option<Duration>,
}

impl ExpectationBuilder {
    /// Holds the response back for `delay`, or until the request is cancelled.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn return_response(self, response: Response) {
        self.push(Reply::Respond(response));
    }

    /// 200 with `value` as the body.
    pub fn return_json(self, value: Value) {
        self.return_response(Response::json(200, &value));
    }

    pub fn return_status(self, status: u16) {
        self.return_response(Response::new(status));
    }

    pub fn return_status_json(self, status: u16, value: Value) {
        self.return_response(Response::json(status, &value));
    }

    /// Connection-level failure.
    pub fn fail_with(self, message: impl Into<String>) {
        self.push(Reply::Fail(message.into()));
    }

    fn push(self, reply: Reply) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.expectations.push(Expectation {
            method: self.method,
            uri: self.uri,
            delay: self.delay,
            reply,
        });
    }
}
