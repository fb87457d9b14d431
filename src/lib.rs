#![doc(html_logo_url = "https://www.rust-lang.org/logos/rust-logo-128x128.png")]
#![doc(html_favicon_url = "https://www.rust-lang.org/favicon.ico")]
//! # Redfish Client
//!
//! > **Typed access to Redfish services, one resource kind at a time.**
//!
//! This crate declares representative Redfish resource kinds (chassis,
//! managers, PDUs, outlets, cooling loops, memory, logs, ...) on top of
//! [`redfish_core`], which does the actual work.
//!
//! ## 🏗️ Design Philosophy
//!
//! A resource kind is *data plus a declaration*:
//! - **Data**: a struct whose fields map one-to-one onto the wire's
//!   PascalCase properties.
//! - **Declaration**: which fields the service accepts in a PATCH
//!   ([`writable_fields!`](redfish_core::writable_fields)), which actions it
//!   may advertise ([`supported_actions!`](redfish_core::supported_actions)),
//!   and where its links point.
//!
//! Everything generic (decode, link resolution, pagination, diffing,
//! action validation) is written once in the core and shared by every kind.
//!
//! ## 🚀 Core Concepts
//!
//! ### Loading and navigating
//! Start at [`ServiceRoot`](model::ServiceRoot) and follow typed accessors.
//! Accessors never cache; each call goes to the service.
//!
//! ### Changing things
//! Mutate the public fields, then call
//! [`Resource::update`](redfish_core::Resource::update). Only allow-listed
//! fields that actually changed are sent. Read-only fields are ignored.
//!
//! ### Acting
//! Typed methods like [`Outlet::power_control`](model::Outlet::power_control)
//! POST to the target the service advertised, after checking any
//! published allowable values.
//!
//! ### Partial results
//! Collections and link arrays come back as a [`Batch`](redfish_core::Batch):
//! the members that loaded plus a [`FailureReport`](redfish_core::FailureReport)
//! for the ones that did not.
//!
//! ## 🗺️ Module Tour
//!
//! - [`model`]: the resource kinds.
//! - [`common`]: sub-records shared by several kinds (`Status`, sensor and
//!   control excerpts).
//! - [`actions`]: action parameter bodies.
//!
//! ## 🚀 Quick Start
//!
//! ```rust
//! use redfish_client::actions::ActionPowerState;
//! use redfish_client::model::Outlet;
//! use redfish_client::mock::MockTransport;
//! use redfish_client::Client;
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() {
//!     let uri = "/redfish/v1/PowerEquipment/RackPDUs/1/Outlets/A1";
//!     let mock = MockTransport::new();
//!     mock.expect_get(uri).return_json(json!({
//!         "@odata.id": uri,
//!         "Id": "A1",
//!         "PowerState": "On",
//!         "Actions": {"#Outlet.PowerControl": {"target": format!("{uri}/Outlet.PowerControl")}}
//!     }));
//!     mock.expect_post(format!("{uri}/Outlet.PowerControl")).return_status(204);
//!
//!     let client = Client::new(mock.clone());
//!     let outlet: Outlet = client.get(uri).await.unwrap();
//!     outlet.power_control(ActionPowerState::Off).await.unwrap();
//!
//!     assert_eq!(mock.calls()[1].body.as_deref(), Some(&br#"{"PowerState":"Off"}"#[..]));
//! }
//! ```
//!
//! ### Running Tests
//!
//! ```bash
//! RUST_LOG=debug cargo test
//! ```

pub mod actions;
pub mod common;
pub mod model;

pub use redfish_core::{
    logging, mock, ActionOutcome, Batch, Client, ClientConfig, Entity, ErrorKind, FailureReport,
    Link, LinkArray, RedfishError, Resource, Result, TaskMonitor, TaskStatus, Transport,
    UpdateOutcome,
};
