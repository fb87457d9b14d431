use super::{Chassis, Outlet};
use crate::actions::{Reset, ResetType};
use crate::common::Status;
use redfish_core::{
    nullable, supported_actions, writable_fields, ActionOutcome, Batch, Entity, Link, LinkArray,
    Resource, Result, WritableField,
};
use serde::{Deserialize, Serialize};

/// A power supply unit, in a server chassis or a power shelf.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PowerSupply {
    #[serde(skip)]
    entity: Entity,

    #[serde(rename = "ElectricalSourceManagerURIs", default, deserialize_with = "nullable")]
    pub electrical_source_manager_uris: Vec<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub electrical_source_names: Vec<String>,
    pub firmware_version: Option<String>,
    pub hot_pluggable: Option<bool>,
    pub line_input_status: Option<String>,
    pub location_indicator_active: Option<bool>,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub part_number: Option<String>,
    pub phase_wiring_type: Option<String>,
    pub plug_type: Option<String>,
    pub power_capacity_watts: Option<f64>,
    pub power_supply_type: Option<String>,
    pub replaceable: Option<bool>,
    pub serial_number: Option<String>,
    pub spare_part_number: Option<String>,
    pub version: Option<String>,
    pub status: Option<Status>,

    #[serde(default, deserialize_with = "nullable")]
    links: PowerSupplyLinks,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
struct PowerSupplyLinks {
    outlet: Link,
    power_outlets: LinkArray,
    powering_chassis: LinkArray,
}

impl Resource for PowerSupply {
    const KIND: &'static str = "PowerSupply";

    fn entity(&self) -> &Entity {
        &self.entity
    }

    fn entity_mut(&mut self) -> &mut Entity {
        &mut self.entity
    }

    fn writable_fields() -> &'static [WritableField<Self>] {
        writable_fields!(PowerSupply {
            "ElectricalSourceManagerURIs" => value(electrical_source_manager_uris),
            "ElectricalSourceNames" => value(electrical_source_names),
            "LocationIndicatorActive" => value(location_indicator_active),
        })
    }
}

supported_actions!(PowerSupply {
    reset => "#PowerSupply.Reset",
});

impl PowerSupply {
    pub async fn reset(&self, reset_type: ResetType) -> Result<ActionOutcome> {
        self.entity
            .invoke("#PowerSupply.Reset", &Reset { reset_type })
            .await
    }

    /// The outlet this supply is plugged into.
    pub async fn outlet(&self) -> Result<Option<Outlet>> {
        self.entity.follow(&self.links.outlet).await
    }

    pub async fn power_outlets(&self) -> Result<Batch<Outlet>> {
        self.entity.follow_all(&self.links.power_outlets).await
    }

    pub async fn powering_chassis(&self) -> Result<Batch<Chassis>> {
        self.entity.follow_all(&self.links.powering_chassis).await
    }
}
