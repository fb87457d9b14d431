//! # Envelope & Identity
//!
//! Every Redfish resource shares a common envelope: `Id`, `Name`, `@odata.id`,
//! `@odata.etag`, `@odata.type`, `Oem` and `Actions`. This module defines that
//! envelope ([`Entity`]) and the [`Resource`] trait every resource kind
//! implements.
//!
//! ## Defining a resource kind
//!
//! A kind is a plain serde struct holding its own fields plus a skipped
//! [`Entity`]. Decoding parses the envelope and the kind separately from the
//! same bytes, so the kind never sees the envelope keys.
//!
//! ```rust
//! use redfish_core::{writable_fields, Entity, Resource, WritableField};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Default, Serialize, Deserialize)]
//! #[serde(rename_all = "PascalCase")]
//! struct Fan {
//!     #[serde(skip)]
//!     entity: Entity,
//!     location_indicator_active: Option<bool>,
//!     speed_percent: Option<f64>,
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
//! let fan = Fan::load(br#"{"@odata.id": "/redfish/v1/Chassis/1/ThermalSubsystem/Fans/1",
//!                          "Id": "1", "SpeedPercent": 40}"#).unwrap();
//! assert_eq!(fan.entity().self_uri(), "/redfish/v1/Chassis/1/ThermalSubsystem/Fans/1");
//! assert!(fan.entity().raw_original().is_some());
//! ```
//!
//! ## Lifecycle
//!
//! | Step | How |
//! |------|-----|
//! | Created | [`Resource::load`], [`Client::get`], collection enumeration |
//! | Mutated | The caller writes public fields in memory |
//! | Committed | [`Resource::update`] diffs against the retained original and PATCHes |
//! | Destroyed | Dropped; nothing happens on the service |
//!
//! The self URI is set once at load time from `@odata.id`, falling back to the
//! response `Content-Location`, then to the requested URI. The original bytes
//! are retained only for kinds that declare writable fields.

use crate::action::Actions;
use crate::client::Client;
use crate::error::{ExtendedInfo, RedfishError, Result};
use crate::transport::Headers;
use crate::update::{self, UpdateOutcome, WritableField};
use async_trait::async_trait;
use serde::de::{DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;
use std::fmt;
use std::sync::Arc;

/// Opaque OEM payload, kept as the exact bytes the service sent.
#[derive(Debug, Clone, Default)]
pub struct Oem(Option<Box<RawValue>>);

impl Oem {
    pub fn as_str(&self) -> Option<&str> {
        self.0.as_deref().map(RawValue::get)
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        self.as_str().map(str::as_bytes)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }

    /// Interprets the blob on demand. The core itself never does.
    pub fn parse<T: DeserializeOwned>(&self) -> Option<serde_json::Result<T>> {
        self.as_str().map(serde_json::from_str)
    }
}

impl PartialEq for Oem {
    fn eq(&self, other: &Self) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

/// Common envelope of a loaded resource.
#[derive(Clone, Default)]
pub struct Entity {
    odata_id: String,
    id: String,
    name: String,
    etag: String,
    odata_type: String,
    odata_context: String,
    description: String,
    oem: Oem,
    extended_info: Vec<ExtendedInfo>,
    actions: Actions,
    raw: Option<Arc<[u8]>>,
    client: Option<Client>,
}

impl Entity {
    pub fn self_uri(&self) -> &str {
        &self.odata_id
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn etag(&self) -> &str {
        &self.etag
    }

    pub fn odata_type(&self) -> &str {
        &self.odata_type
    }

    pub fn odata_context(&self) -> &str {
        &self.odata_context
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn oem(&self) -> &Oem {
        &self.oem
    }

    pub fn extended_info(&self) -> &[ExtendedInfo] {
        &self.extended_info
    }

    pub fn actions(&self) -> &Actions {
        &self.actions
    }

    /// Exact bytes the current baseline was loaded from.
    pub fn raw_original(&self) -> Option<&[u8]> {
        self.raw.as_deref()
    }

    pub fn is_attached(&self) -> bool {
        self.client.is_some()
    }

    /// Binds the resource to a client so lazy accessors, actions and updates work.
    pub fn attach(&mut self, client: Client) {
        self.client = Some(client);
    }

    pub fn client(&self) -> Result<&Client> {
        self.client.as_ref().ok_or_else(|| RedfishError::Detached {
            uri: self.odata_id.clone(),
        })
    }

    pub(crate) fn set_etag(&mut self, etag: String) {
        self.etag = etag;
    }

    pub(crate) fn set_raw(&mut self, raw: Vec<u8>) {
        self.raw = Some(Arc::from(raw));
    }
}

impl PartialEq for Entity {
    fn eq(&self, other: &Self) -> bool {
        self.odata_id == other.odata_id
            && self.id == other.id
            && self.name == other.name
            && self.etag == other.etag
            && self.odata_type == other.odata_type
            && self.odata_context == other.odata_context
            && self.description == other.description
            && self.oem == other.oem
            && self.extended_info == other.extended_info
            && self.actions == other.actions
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entity")
            .field("odata_id", &self.odata_id)
            .field("id", &self.id)
            .field("name", &self.name)
            .field("etag", &self.etag)
            .field("odata_type", &self.odata_type)
            .field("actions", &self.actions)
            .field("raw_len", &self.raw.as_ref().map(|r| r.len()))
            .field("attached", &self.client.is_some())
            .finish()
    }
}

#[derive(Deserialize)]
struct Envelope {
    #[serde(rename = "@odata.id", default, deserialize_with = "nullable")]
    odata_id: String,
    #[serde(rename = "@odata.etag", default, deserialize_with = "nullable")]
    etag: String,
    #[serde(rename = "@odata.type", default, deserialize_with = "nullable")]
    odata_type: String,
    #[serde(rename = "@odata.context", default, deserialize_with = "nullable")]
    odata_context: String,
    #[serde(rename = "Id", default, deserialize_with = "nullable")]
    id: String,
    #[serde(rename = "Name", default, deserialize_with = "nullable")]
    name: String,
    #[serde(rename = "Description", default, deserialize_with = "nullable")]
    description: String,
    #[serde(rename = "Oem", default)]
    oem: Option<Box<RawValue>>,
    #[serde(rename = "Actions", default)]
    actions: Actions,
    #[serde(rename = "@Message.ExtendedInfo", default, deserialize_with = "nullable")]
    extended_info: Vec<ExtendedInfo>,
}

#[derive(Serialize)]
struct EnvelopeRef<'a> {
    #[serde(rename = "@odata.id", skip_serializing_if = "is_blank")]
    odata_id: &'a str,
    #[serde(rename = "@odata.etag", skip_serializing_if = "is_blank")]
    etag: &'a str,
    #[serde(rename = "@odata.type", skip_serializing_if = "is_blank")]
    odata_type: &'a str,
    #[serde(rename = "@odata.context", skip_serializing_if = "is_blank")]
    odata_context: &'a str,
    #[serde(rename = "Id", skip_serializing_if = "is_blank")]
    id: &'a str,
    #[serde(rename = "Name", skip_serializing_if = "is_blank")]
    name: &'a str,
    #[serde(rename = "Description", skip_serializing_if = "is_blank")]
    description: &'a str,
    #[serde(rename = "Oem", skip_serializing_if = "Option::is_none")]
    oem: Option<&'a RawValue>,
    #[serde(rename = "Actions", skip_serializing_if = "Actions::is_empty")]
    actions: &'a Actions,
    #[serde(rename = "@Message.ExtendedInfo", skip_serializing_if = "is_none_listed")]
    extended_info: &'a [ExtendedInfo],
}

#[derive(Serialize)]
struct Rendered<'a, R> {
    #[serde(flatten)]
    envelope: EnvelopeRef<'a>,
    #[serde(flatten)]
    body: &'a R,
}

fn is_blank(value: &&str) -> bool {
    value.is_empty()
}

fn is_none_listed(value: &&[ExtendedInfo]) -> bool {
    value.is_empty()
}

/// Deserializes `null` as the type's default. Redfish services send `null`
/// for unset strings and arrays far more often than they omit the key.
pub fn nullable<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Parses `bytes` into a resource of kind `R`.
///
/// `uri` is the request URI (used for error reporting and as the last
/// self-URI fallback); `headers` supplies `Content-Location` and `ETag`.
pub(crate) fn decode<R: Resource>(bytes: &[u8], uri: &str, headers: Option<&Headers>) -> Result<R> {
    let envelope: Envelope =
        serde_json::from_slice(bytes).map_err(|e| RedfishError::decode(uri, &e, bytes))?;
    let mut resource: R =
        serde_json::from_slice(bytes).map_err(|e| RedfishError::decode(uri, &e, bytes))?;

    let odata_id = if envelope.odata_id.is_empty() {
        headers
            .and_then(|h| h.get("Content-Location"))
            .unwrap_or(uri)
            .to_string()
    } else {
        envelope.odata_id
    };
    let etag = if envelope.etag.is_empty() {
        headers
            .and_then(|h| h.get("ETag"))
            .unwrap_or_default()
            .to_string()
    } else {
        envelope.etag
    };
    let raw = if R::writable_fields().is_empty() {
        None
    } else {
        Some(Arc::from(bytes))
    };

    *resource.entity_mut() = Entity {
        odata_id,
        id: envelope.id,
        name: envelope.name,
        etag,
        odata_type: envelope.odata_type,
        odata_context: envelope.odata_context,
        description: envelope.description,
        oem: Oem(envelope.oem),
        extended_info: envelope.extended_info,
        actions: envelope.actions,
        raw,
        client: None,
    };
    Ok(resource)
}

/// A Redfish resource kind.
///
/// Implementors provide access to their [`Entity`] and, when mutable, their
/// writable-field allow-list. Everything else is provided.
#[async_trait]
pub trait Resource: DeserializeOwned + Serialize + Send + Sync + Sized + 'static {
    /// Schema name, e.g. `"Outlet"`. Used in logs.
    const KIND: &'static str;

    fn entity(&self) -> &Entity;

    fn entity_mut(&mut self) -> &mut Entity;

    /// Fields the service accepts in a PATCH, in the order they are diffed.
    /// Kinds without any are read-only.
    fn writable_fields() -> &'static [WritableField<Self>] {
        &[]
    }

    /// Parses a detached resource from its JSON representation.
    fn load(bytes: &[u8]) -> Result<Self> {
        decode(bytes, "", None)
    }

    fn attach(&mut self, client: Client) {
        self.entity_mut().attach(client);
    }

    /// Re-serializes the resource, envelope and OEM bytes included.
    fn to_vec(&self) -> Result<Vec<u8>> {
        let entity = self.entity();
        let rendered = Rendered {
            envelope: EnvelopeRef {
                odata_id: &entity.odata_id,
                etag: &entity.etag,
                odata_type: &entity.odata_type,
                odata_context: &entity.odata_context,
                id: &entity.id,
                name: &entity.name,
                description: &entity.description,
                oem: entity.oem.0.as_deref(),
                actions: &entity.actions,
                extended_info: &entity.extended_info,
            },
            body: self,
        };
        serde_json::to_vec(&rendered).map_err(|e| RedfishError::Decode {
            uri: entity.odata_id.clone(),
            offset: 0,
            line: 0,
            column: 0,
            message: e.to_string(),
        })
    }

    /// Commits in-memory changes to allow-listed fields with a single PATCH.
    async fn update(&mut self) -> Result<UpdateOutcome> {
        update::commit(self).await
    }

    /// Re-fetches the resource from its self URI, replacing it in place.
    async fn refresh(&mut self) -> Result<()> {
        let uri = self.entity().self_uri().to_string();
        if uri.is_empty() {
            return Err(RedfishError::MissingSelfUri);
        }
        let client = self.entity().client()?.clone();
        *self = client.get::<Self>(&uri).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writable_fields;

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "PascalCase")]
    struct Sensor {
        #[serde(skip)]
        entity: Entity,
        user_label: Option<String>,
        reading: Option<f64>,
    }

    impl Resource for Sensor {
        const KIND: &'static str = "Sensor";
        fn entity(&self) -> &Entity {
            &self.entity
        }
        fn entity_mut(&mut self) -> &mut Entity {
            &mut self.entity
        }
        fn writable_fields() -> &'static [WritableField<Self>] {
            writable_fields!(Sensor { "UserLabel" => value(user_label) })
        }
    }

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    struct ReadOnly {
        #[serde(skip)]
        entity: Entity,
    }

    impl Resource for ReadOnly {
        const KIND: &'static str = "ReadOnly";
        fn entity(&self) -> &Entity {
            &self.entity
        }
        fn entity_mut(&mut self) -> &mut Entity {
            &mut self.entity
        }
    }

    const PAYLOAD: &str = r##"{
        "@odata.id": "/redfish/v1/Sensors/1",
        "@odata.etag": "W/\"42\"",
        "@odata.type": "#Sensor.v1_0_0.Sensor",
        "Id": "1",
        "Name": "Sensor One",
        "Description": null,
        "UserLabel": "rack-a",
        "Reading": 12.5,
        "Unknown": {"Ignored": true},
        "Oem": {"Contoso": {"b": 2,  "a": 1}}
    }"##;

    #[test]
    fn test_load_extracts_envelope() {
        let sensor = Sensor::load(PAYLOAD.as_bytes()).unwrap();
        let entity = sensor.entity();

        assert_eq!(entity.self_uri(), "/redfish/v1/Sensors/1");
        assert_eq!(entity.id(), "1");
        assert_eq!(entity.name(), "Sensor One");
        assert_eq!(entity.etag(), "W/\"42\"");
        assert_eq!(entity.odata_type(), "#Sensor.v1_0_0.Sensor");
        assert_eq!(entity.description(), "");
        assert_eq!(sensor.user_label.as_deref(), Some("rack-a"));
        assert_eq!(entity.raw_original(), Some(PAYLOAD.as_bytes()));
        assert!(!entity.is_attached());
    }

    #[test]
    fn test_oem_is_kept_verbatim() {
        let sensor = Sensor::load(PAYLOAD.as_bytes()).unwrap();
        assert_eq!(
            sensor.entity().oem().as_str(),
            Some(r#"{"Contoso": {"b": 2,  "a": 1}}"#)
        );

        let reloaded = Sensor::load(&sensor.to_vec().unwrap()).unwrap();
        assert_eq!(reloaded.entity().oem(), sensor.entity().oem());
    }

    #[test]
    fn test_round_trip_is_equal() {
        let sensor = Sensor::load(PAYLOAD.as_bytes()).unwrap();
        let reloaded = Sensor::load(&sensor.to_vec().unwrap()).unwrap();
        assert_eq!(reloaded, sensor);
    }

    #[test]
    fn test_read_only_kinds_do_not_retain_bytes() {
        let resource = ReadOnly::load(PAYLOAD.as_bytes()).unwrap();
        assert!(resource.entity().raw_original().is_none());
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let sensor = Sensor::load(b"{}").unwrap();
        assert_eq!(sensor.entity().self_uri(), "");
        assert_eq!(sensor.user_label, None);
    }

    #[test]
    fn test_malformed_payload_is_decode_error() {
        let err = Sensor::load(b"{\"Id\": }").unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::Decode);
    }

    #[test]
    fn test_self_uri_and_etag_fall_back_to_headers() {
        let headers = Headers::new()
            .with("Content-Location", "/redfish/v1/Sensors/7")
            .with("ETag", "\"9\"");
        let sensor: Sensor = decode(b"{\"Id\": \"7\"}", "/redfish/v1/Sensors/7?x", Some(&headers)).unwrap();
        assert_eq!(sensor.entity().self_uri(), "/redfish/v1/Sensors/7");
        assert_eq!(sensor.entity().etag(), "\"9\"");

        let sensor: Sensor = decode(b"{}", "/redfish/v1/Sensors/8", None).unwrap();
        assert_eq!(sensor.entity().self_uri(), "/redfish/v1/Sensors/8");
    }

    #[test]
    fn test_detached_client_error() {
        let sensor = Sensor::load(PAYLOAD.as_bytes()).unwrap();
        let err = sensor.entity().client().unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::Detached);
    }
}
