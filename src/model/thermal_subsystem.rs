//! `ThermalSubsystem`: the cooling components of one chassis.

use super::Fan;
use crate::common::Status;
use redfish_core::{writable_fields, Batch, Entity, Link, Resource, Result, WritableField};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ThermalSubsystem {
    #[serde(skip)]
    entity: Entity,

    pub fans_full_speed_override_enable: Option<bool>,
    pub status: Option<Status>,

    #[serde(default)]
    fans: Link,
}

impl Resource for ThermalSubsystem {
    const KIND: &'static str = "ThermalSubsystem";

    fn entity(&self) -> &Entity {
        &self.entity
    }

    fn entity_mut(&mut self) -> &mut Entity {
        &mut self.entity
    }

    fn writable_fields() -> &'static [WritableField<Self>] {
        writable_fields!(ThermalSubsystem {
            "FansFullSpeedOverrideEnable" => value(fans_full_speed_override_enable),
        })
    }
}

impl ThermalSubsystem {
    /// Enumerates the `Fans` collection.
    pub async fn fans(&self) -> Result<Batch<Fan>> {
        self.entity.enumerate(&self.fans).await
    }
}
