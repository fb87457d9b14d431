//! # LogService
//!
//! A log of a manager, chassis or system. Entries are a paginated
//! collection, typically the largest one a service exposes, so
//! [`LogService::entries`] goes through the collection engine.

use super::LogEntry;
use crate::common::Status;
use redfish_core::{
    supported_actions, writable_fields, ActionOutcome, Batch, Entity, Link, Resource, Result,
    WritableField,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AutoClearResolvedEntries {
    ClearEventGroup,
    RetainCauseResolutionEntries,
    UpdateCauseEntry,
    None,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LogService {
    #[serde(skip)]
    entity: Entity,

    pub auto_clear_resolved_entries: Option<AutoClearResolvedEntries>,
    #[serde(rename = "AutoDSTEnabled")]
    pub auto_dst_enabled: Option<bool>,
    pub date_time: Option<String>,
    pub date_time_local_offset: Option<String>,
    pub log_entry_type: Option<String>,
    pub max_number_of_records: Option<u64>,
    pub over_write_policy: Option<String>,
    pub overflow: Option<bool>,
    pub persistency: Option<bool>,
    pub service_enabled: Option<bool>,
    pub status: Option<Status>,

    #[serde(default)]
    entries: Link,
}

impl Resource for LogService {
    const KIND: &'static str = "LogService";

    fn entity(&self) -> &Entity {
        &self.entity
    }

    fn entity_mut(&mut self) -> &mut Entity {
        &mut self.entity
    }

    fn writable_fields() -> &'static [WritableField<Self>] {
        writable_fields!(LogService {
            "AutoClearResolvedEntries" => value(auto_clear_resolved_entries),
            "AutoDSTEnabled" => value(auto_dst_enabled),
            "DateTime" => value(date_time),
            "DateTimeLocalOffset" => value(date_time_local_offset),
            "ServiceEnabled" => value(service_enabled),
        })
    }
}

supported_actions!(LogService {
    clear_log => "#LogService.ClearLog",
});

impl LogService {
    /// Clears the log. The POST carries no body.
    pub async fn clear_log(&self) -> Result<ActionOutcome> {
        self.entity.invoke_empty("#LogService.ClearLog").await
    }

    /// Enumerates every entry across all pages.
    pub async fn entries(&self) -> Result<Batch<LogEntry>> {
        self.entity.enumerate(&self.entries).await
    }
}
