//! # Redfish Core
//!
//! The resource-independent machinery of a Redfish client. Individual resource
//! kinds (chassis, outlets, cooling loops, ...) are thin declarations on top of
//! five mechanisms that live here:
//!
//! 1. **Envelope & identity** ([`Entity`], [`Resource`]): the common fields of
//!    every resource and the decode contract.
//! 2. **Link resolver** ([`Link`], [`LinkArray`]): typed, lazy, uncached
//!    accessors over `@odata.id` references.
//! 3. **Collection engine** ([`Client::enumerate`]): pagination, bounded
//!    concurrent member fetches, partial failures.
//! 4. **Differential updater** ([`Resource::update`]): allow-list diff against
//!    the retained original, one minimal PATCH.
//! 5. **Action dispatcher** ([`Entity::invoke`]): validated POSTs to
//!    server-advertised action targets.
//!
//! Batches report per-URI failures through a [`FailureReport`] instead of
//! failing as a whole.
//!
//! ## 🏗️ Architecture
//!
//! ```text
//!   resource kinds (redfish-client)
//!        │  Resource + writable_fields! + supported_actions!
//!        ▼
//!   ┌──────────┬──────────┬────────────┬──────────┬──────────┐
//!   │ entity   │ link     │ collection │ update   │ action   │
//!   └──────────┴──────────┴────────────┴──────────┴──────────┘
//!        │                 Client (config, cancellation)
//!        ▼
//!   Transport (injected: auth, TLS, sessions, retries, timeouts)
//! ```
//!
//! The library owns no background threads. Member fetches of one enumeration
//! run on tasks of the caller's runtime and are joined before it returns.
//!
//! ## 🚀 Quick Start
//!
//! ```rust
//! use redfish_core::mock::MockTransport;
//! use redfish_core::{writable_fields, Client, Entity, Resource, UpdateOutcome, WritableField};
//! use serde::{Deserialize, Serialize};
//! use serde_json::json;
//!
//! #[derive(Debug, Default, Serialize, Deserialize)]
//! #[serde(rename_all = "PascalCase")]
//! struct Fan {
//!     #[serde(skip)]
//!     entity: Entity,
//!     location_indicator_active: Option<bool>,
//! }
//!
//! impl Resource for Fan {
//!     const KIND: &'static str = "Fan";
//!     fn entity(&self) -> &Entity { &self.entity }
//!     fn entity_mut(&mut self) -> &mut Entity { &mut self.entity }
//!     fn writable_fields() -> &'static [WritableField<Self>] {
//!         writable_fields!(Fan { "LocationIndicatorActive" => value(location_indicator_active) })
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let uri = "/redfish/v1/Chassis/1/ThermalSubsystem/Fans/1";
//!     let mock = MockTransport::new();
//!     mock.expect_get(uri).return_json(json!({
//!         "@odata.id": uri, "Id": "1", "LocationIndicatorActive": false
//!     }));
//!     mock.expect_patch(uri).return_status(204);
//!
//!     let client = Client::new(mock.clone());
//!     let mut fan: Fan = client.get(uri).await.unwrap();
//!     fan.location_indicator_active = Some(true);
//!
//!     let outcome = fan.update().await.unwrap();
//!     assert_eq!(outcome, UpdateOutcome::Patched { fields: vec!["LocationIndicatorActive".into()] });
//!     assert_eq!(mock.calls()[1].json(), Some(json!({"LocationIndicatorActive": true})));
//!     mock.verify();
//! }
//! ```
//!
//! ## 👩‍💻 Notes
//!
//! - **Errors**: one [`RedfishError`] enum; every variant carries the in-flight URI.
//! - **Logging**: `tracing` throughout; see [`logging`].
//! - **Configuration**: [`ClientConfig`], including the ETag workarounds.
//! - **Testing**: [`mock::MockTransport`] scripts the service in memory.

pub mod action;
pub mod client;
pub mod collection;
pub mod config;
pub mod entity;
pub mod error;
pub mod failure;
pub mod link;
pub mod logging;
pub mod mock;
pub mod transport;
pub mod update;

pub use action::{ActionOutcome, ActionTarget, Actions, TaskMonitor, TaskStatus};
pub use client::Client;
pub use collection::Batch;
pub use config::ClientConfig;
pub use entity::{nullable, Entity, Oem, Resource};
pub use error::{BoxError, ErrorKind, ExtendedInfo, RedfishError, Result};
pub use failure::FailureReport;
pub use link::{Link, LinkArray};
pub use transport::{Headers, Method, Request, Response, Transport};
pub use update::{Record, UpdateOutcome, WritableField};

pub use tokio_util::sync::CancellationToken;

#[doc(hidden)]
pub use paste;
