use crate::common::Health;
use redfish_core::{
    nullable, writable_fields, Batch, Entity, Link, LinkArray, Resource, Result, WritableField,
};
use serde::{Deserialize, Serialize};

/// One record of a [`LogService`](super::LogService).
///
/// `Resolved` is the only writable field. `OriginOfCondition` may point at
/// any kind of resource, so it is exposed as a plain [`Link`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LogEntry {
    #[serde(skip)]
    entity: Entity,

    pub created: Option<String>,
    pub entry_code: Option<String>,
    pub entry_type: Option<String>,
    pub event_id: Option<String>,
    pub event_timestamp: Option<String>,
    pub event_type: Option<String>,
    pub message: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub message_args: Vec<String>,
    pub message_id: Option<String>,
    pub modified: Option<String>,
    pub resolution: Option<String>,
    pub resolved: Option<bool>,
    pub sensor_number: Option<i64>,
    pub sensor_type: Option<String>,
    pub severity: Option<Health>,

    #[serde(default, deserialize_with = "nullable")]
    links: LogEntryLinks,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
struct LogEntryLinks {
    origin_of_condition: Link,
    related_log_entries: LinkArray,
}

impl Resource for LogEntry {
    const KIND: &'static str = "LogEntry";

    fn entity(&self) -> &Entity {
        &self.entity
    }

    fn entity_mut(&mut self) -> &mut Entity {
        &mut self.entity
    }

    fn writable_fields() -> &'static [WritableField<Self>] {
        writable_fields!(LogEntry {
            "Resolved" => value(resolved),
        })
    }
}

impl LogEntry {
    pub fn origin_of_condition(&self) -> &Link {
        &self.links.origin_of_condition
    }

    pub async fn related_log_entries(&self) -> Result<Batch<LogEntry>> {
        self.entity.follow_all(&self.links.related_log_entries).await
    }
}
