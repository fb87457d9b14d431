//! # Link Resolver
//!
//! Redfish payloads reference other resources in three shapes:
//!
//! | Shape | Wire form | Type |
//! |-------|-----------|------|
//! | Single link | `{"@odata.id": "/redfish/v1/Chassis/1"}` | [`Link`] |
//! | Link array | `[{"@odata.id": ...}, ...]` plus `<Name>@odata.count` | [`LinkArray`] |
//! | Pagination cursor | `Members@odata.nextLink` | handled by the collection engine |
//!
//! A link is a URI string and nothing more; it does not own its target. The
//! empty string is the well-defined "absent" link. Decoding is tolerant: `null`,
//! a malformed object or a missing key all produce the absent link. `href` is
//! accepted as an alias of `@odata.id`.
//!
//! Accessors never cache: every call re-fetches, and an absent link returns
//! `None` (or an empty batch) without touching the transport.

use crate::collection::Batch;
use crate::entity::{Entity, Resource};
use crate::error::Result;
use serde::de::Deserializer;
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Link(String);

impl Link {
    pub fn new(uri: impl Into<String>) -> Self {
        Self(uri.into())
    }

    /// `None` for the absent link.
    pub fn uri(&self) -> Option<&str> {
        if self.0.is_empty() {
            None
        } else {
            Some(&self.0)
        }
    }

    pub fn is_absent(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn from_value(value: &Value) -> Self {
        match value {
            Value::Object(map) => map
                .get("@odata.id")
                .or_else(|| map.get("href"))
                .and_then(Value::as_str)
                .map(Link::new)
                .unwrap_or_default(),
            Value::String(uri) => Link::new(uri.as_str()),
            _ => Link::default(),
        }
    }
}

impl From<&str> for Link {
    fn from(uri: &str) -> Self {
        Link::new(uri)
    }
}

impl Serialize for Link {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry("@odata.id", &self.0)?;
        map.end()
    }
}

impl<'de> Deserialize<'de> for Link {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(value.as_ref().map(Link::from_value).unwrap_or_default())
    }
}

/// Ordered sequence of links. The sibling `@odata.count` is advisory and not kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LinkArray(Vec<Link>);

impl LinkArray {
    pub fn new(links: impl IntoIterator<Item = Link>) -> Self {
        Self(links.into_iter().collect())
    }

    /// Present URIs in order; absent entries are skipped.
    pub fn uris(&self) -> Vec<String> {
        self.0
            .iter()
            .filter_map(|l| l.uri().map(str::to_string))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.iter().all(Link::is_absent)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Link> {
        self.0.iter()
    }
}

impl<'de> Deserialize<'de> for LinkArray {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Option::<Value>::deserialize(deserializer)?;
        let links = match value {
            Some(Value::Array(items)) => items.iter().map(Link::from_value).collect(),
            _ => Vec::new(),
        };
        Ok(Self(links))
    }
}

impl Entity {
    /// Resolves a single link. Absent links yield `Ok(None)` with no traffic.
    pub async fn follow<R: Resource>(&self, link: &Link) -> Result<Option<R>> {
        let Some(uri) = link.uri() else {
            return Ok(None);
        };
        self.client()?.get::<R>(uri).await.map(Some)
    }

    /// Resolves every link of an array with bounded fan-out.
    pub async fn follow_all<R: Resource>(&self, links: &LinkArray) -> Result<Batch<R>> {
        if links.is_empty() {
            return Ok(Batch::default());
        }
        Ok(self.client()?.get_many::<R>(links.uris()).await)
    }

    /// Enumerates the collection behind `link`.
    pub async fn enumerate<R: Resource>(&self, link: &Link) -> Result<Batch<R>> {
        let Some(uri) = link.uri() else {
            return Ok(Batch::default());
        };
        self.client()?.enumerate::<R>(uri).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Deserialize)]
    struct Holder {
        #[serde(rename = "Chassis", default)]
        chassis: Link,
        #[serde(rename = "Outlets", default)]
        outlets: LinkArray,
    }

    #[test]
    fn test_link_shapes() {
        let holder: Holder = serde_json::from_value(json!({
            "Chassis": {"href": "/redfish/v1/Chassis/1"},
            "Outlets": [
                {"@odata.id": "/redfish/v1/PowerEquipment/RackPDUs/1/Outlets/A1"},
                {},
                {"@odata.id": "/redfish/v1/PowerEquipment/RackPDUs/1/Outlets/A2"}
            ]
        }))
        .unwrap();

        assert_eq!(holder.chassis.uri(), Some("/redfish/v1/Chassis/1"));
        assert_eq!(holder.outlets.len(), 3);
        assert_eq!(
            holder.outlets.uris(),
            vec![
                "/redfish/v1/PowerEquipment/RackPDUs/1/Outlets/A1",
                "/redfish/v1/PowerEquipment/RackPDUs/1/Outlets/A2"
            ]
        );
    }

    #[test]
    fn test_malformed_links_are_absent() {
        for raw in [json!(null), json!(42), json!({"@odata.id": 7}), json!({})] {
            let holder: Holder = serde_json::from_value(json!({ "Chassis": raw })).unwrap();
            assert!(holder.chassis.is_absent());
            assert_eq!(holder.chassis.uri(), None);
        }

        let holder: Holder = serde_json::from_value(json!({ "Outlets": null })).unwrap();
        assert!(holder.outlets.is_empty());
    }

    #[test]
    fn test_link_serializes_as_odata_id() {
        let link = Link::new("/redfish/v1/Managers/BMC");
        assert_eq!(
            serde_json::to_value(&link).unwrap(),
            json!({"@odata.id": "/redfish/v1/Managers/BMC"})
        );
    }
}
