//! `ThermalEquipment`: the service-wide index of facility cooling equipment.

use super::CoolingLoop;
use crate::common::Status;
use redfish_core::{Batch, Entity, Link, Resource, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ThermalEquipment {
    #[serde(skip)]
    entity: Entity,

    pub status: Option<Status>,

    #[serde(default)]
    cooling_loops: Link,
}

impl Resource for ThermalEquipment {
    const KIND: &'static str = "ThermalEquipment";

    fn entity(&self) -> &Entity {
        &self.entity
    }

    fn entity_mut(&mut self) -> &mut Entity {
        &mut self.entity
    }
}

impl ThermalEquipment {
    pub async fn cooling_loops(&self) -> Result<Batch<CoolingLoop>> {
        self.entity.enumerate(&self.cooling_loops).await
    }
}
