//! # Differential Updater
//!
//! [`Resource::update`](crate::Resource::update) commits exactly the changes the
//! caller made to allow-listed fields and nothing else.
//!
//! ## How a commit works
//!
//! 1. Re-parse the retained original bytes with the same deserializer as the
//!    live resource.
//! 2. Walk the kind's allow-list, reading each field from both copies as JSON.
//! 3. Compare semantically: numbers by value, strings bytewise, arrays by
//!    length then element, sub-records recursively over their own allow-list.
//! 4. Nothing differs: return [`UpdateOutcome::Unchanged`] without any traffic.
//! 5. Otherwise PATCH the self URI with only the differing fields, sending
//!    `If-Match` when the resource carries an ETag.
//! 6. On success the retained original becomes the response body, or, for an
//!    empty response, the patch merged onto the prior original.
//!
//! Fields outside the allow-list are never read, so changing them has no
//! effect. `Oem` is never compared or sent.
//!
//! ## Declaring the allow-list
//!
//! ```rust,ignore
//! fn writable_fields() -> &'static [WritableField<Self>] {
//!     writable_fields!(EnvironmentMetrics {
//!         "PowerLimitWatts" => optional_record(power_limit_watts),
//!     })
//! }
//! ```
//!
//! `value(field)` sends the field as-is; `record(field)` and
//! `optional_record(field)` descend into a [`Record`] and only consider its
//! own allow-listed fields.

use crate::entity::Resource;
use crate::error::{RedfishError, Result};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, info};

/// One entry of a kind's allow-list: the wire name and a reader for it.
pub struct WritableField<R> {
    name: &'static str,
    read: fn(&R) -> Value,
}

impl<R> WritableField<R> {
    pub const fn new(name: &'static str, read: fn(&R) -> Value) -> Self {
        Self { name, read }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn read(&self, resource: &R) -> Value {
        (self.read)(resource)
    }
}

impl<R> std::fmt::Debug for WritableField<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("WritableField").field(&self.name).finish()
    }
}

/// A nested object with its own allow-list, such as a control excerpt.
pub trait Record: Sized + 'static {
    fn writable_fields() -> &'static [WritableField<Self>];
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    Unchanged,
    Patched { fields: Vec<String> },
}

/// Serializes a field for comparison. Plain data never fails to serialize.
pub fn to_wire<T: Serialize + ?Sized>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or(Value::Null)
}

/// Projects a sub-record onto its allow-listed fields.
pub fn project<S: Record>(record: &S) -> Value {
    Value::Object(
        S::writable_fields()
            .iter()
            .map(|f| (f.name().to_string(), f.read(record)))
            .collect(),
    )
}

pub fn project_optional<S: Record>(record: &Option<S>) -> Value {
    record.as_ref().map(project).unwrap_or(Value::Null)
}

/// Builds a `&'static [WritableField<T>]` allow-list.
///
/// Each entry is `"WireName" => mode(field)` where `mode` is `value`,
/// `record` or `optional_record`.
#[macro_export]
macro_rules! writable_fields {
    (@read value, $kind:ty, $field:ident) => {
        |r: &$kind| $crate::update::to_wire(&r.$field)
    };
    (@read record, $kind:ty, $field:ident) => {
        |r: &$kind| $crate::update::project(&r.$field)
    };
    (@read optional_record, $kind:ty, $field:ident) => {
        |r: &$kind| $crate::update::project_optional(&r.$field)
    };
    ($kind:ty { $($name:literal => $mode:ident($field:ident)),* $(,)? }) => {{
        const FIELDS: &[$crate::WritableField<$kind>] = &[
            $( $crate::WritableField::new($name, $crate::writable_fields!(@read $mode, $kind, $field)) ),*
        ];
        FIELDS
    }};
}

/// Semantic equality used by the diff.
pub fn same(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) if x.is_f64() || y.is_f64() => {
            match (x.as_f64(), y.as_f64()) {
                (Some(x), Some(y)) => x == y,
                _ => x == y,
            }
        }
        (Value::Number(x), Value::Number(y)) => match (x.as_i64(), y.as_i64()) {
            (Some(x), Some(y)) => x == y,
            _ => x.as_u64().is_some() && x.as_u64() == y.as_u64(),
        },
        (Value::Array(x), Value::Array(y)) => {
            x.len() == y.len() && x.iter().zip(y).all(|(x, y)| same(x, y))
        }
        (Value::Object(x), Value::Object(y)) => {
            x.len() == y.len()
                && x.iter()
                    .all(|(k, v)| y.get(k).map(|w| same(v, w)).unwrap_or(false))
        }
        _ => a == b,
    }
}

/// The part of `live` that differs from `original`, or `None`.
fn changed(original: &Value, live: &Value) -> Option<Value> {
    match (original, live) {
        (Value::Object(before), Value::Object(after)) => {
            let delta: Map<String, Value> = after
                .iter()
                .filter_map(|(key, value)| {
                    let prior = before.get(key).unwrap_or(&Value::Null);
                    changed(prior, value).map(|d| (key.clone(), d))
                })
                .collect();
            (!delta.is_empty()).then_some(Value::Object(delta))
        }
        _ if same(original, live) => None,
        _ => Some(live.clone()),
    }
}

/// Patch document of allow-listed fields that differ between `original` and `live`.
pub fn diff<R>(fields: &[WritableField<R>], original: &R, live: &R) -> Map<String, Value> {
    fields
        .iter()
        .filter_map(|field| {
            let delta = changed(&field.read(original), &field.read(live))?;
            debug!(field = field.name(), "Field changed");
            Some((field.name().to_string(), delta))
        })
        .collect()
}

fn merge(target: &mut Value, patch: &Value) {
    match (target, patch) {
        (Value::Object(target), Value::Object(patch)) => {
            for (key, value) in patch {
                merge(target.entry(key.clone()).or_insert(Value::Null), value);
            }
        }
        (target, patch) => *target = patch.clone(),
    }
}

#[tracing::instrument(skip(resource), fields(kind = R::KIND, uri = %resource.entity().self_uri()))]
pub(crate) async fn commit<R: Resource>(resource: &mut R) -> Result<UpdateOutcome> {
    let fields = R::writable_fields();
    let uri = resource.entity().self_uri().to_string();
    if fields.is_empty() {
        return Err(RedfishError::UpdateUnsupported {
            uri,
            reason: "resource kind has no writable fields",
        });
    }
    let Some(raw) = resource.entity().raw_original().map(<[u8]>::to_vec) else {
        return Err(RedfishError::UpdateUnsupported {
            uri,
            reason: "original representation was not retained",
        });
    };
    if uri.is_empty() {
        return Err(RedfishError::MissingSelfUri);
    }

    let original: R =
        serde_json::from_slice(&raw).map_err(|e| RedfishError::decode(&uri, &e, &raw))?;
    let patch = diff(fields, &original, resource);
    if patch.is_empty() {
        debug!("No writable field changed");
        return Ok(UpdateOutcome::Unchanged);
    }

    let sent: Vec<String> = patch.keys().cloned().collect();
    let patch = Value::Object(patch);
    let client = resource.entity().client()?.clone();
    let response = client
        .modify(&uri, patch.to_string().into_bytes(), resource.entity().etag())
        .await?;

    // A body carrying `@odata.id` is the new representation; anything else
    // (empty, or an ExtendedInfo message) leaves the patch merged onto the old one.
    let (baseline, etag) = match serde_json::from_slice::<Value>(&response.body) {
        Ok(body) if body.get("@odata.id").is_some() => {
            let etag = body
                .get("@odata.etag")
                .and_then(Value::as_str)
                .filter(|tag| !tag.is_empty())
                .or_else(|| response.header("ETag"))
                .unwrap_or_default()
                .to_string();
            (response.body.clone(), etag)
        }
        _ => {
            let mut prior: Value =
                serde_json::from_slice(&raw).map_err(|e| RedfishError::decode(&uri, &e, &raw))?;
            merge(&mut prior, &patch);
            let etag = response.header("ETag").unwrap_or_default().to_string();
            (prior.to_string().into_bytes(), etag)
        }
    };

    let entity = resource.entity_mut();
    entity.set_raw(baseline);
    entity.set_etag(etag);

    info!(fields = ?sent, "Updated");
    Ok(UpdateOutcome::Patched { fields: sent })
}
