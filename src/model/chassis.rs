//! # Chassis
//!
//! A physical container: a rack, an enclosure, a blade, a PDU housing. Most
//! other kinds are reachable from a chassis either through a sub-resource
//! link (`ThermalSubsystem`, `EnvironmentMetrics`, `LogServices`, `Memory`)
//! or through `Links` (`Facility`, `ManagedBy`, `PowerOutlets`, ...).

use super::{
    CoolingLoop, EnvironmentMetrics, Facility, Fan, LogService, Manager, Memory, Outlet,
    PowerDistribution, PowerSupply, ThermalSubsystem,
};
use crate::actions::{Reset, ResetType};
use crate::common::{IndicatorLed, PowerState, Status};
use redfish_core::{
    nullable, supported_actions, writable_fields, ActionOutcome, Batch, Entity, Link, LinkArray,
    Resource, Result, WritableField,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Chassis {
    #[serde(skip)]
    entity: Entity,

    pub asset_tag: Option<String>,
    pub chassis_type: Option<String>,
    pub depth_mm: Option<f64>,
    #[serde(rename = "ElectricalSourceManagerURIs", default, deserialize_with = "nullable")]
    pub electrical_source_manager_uris: Vec<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub electrical_source_names: Vec<String>,
    pub environmental_class: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub heating_cooling_equipment_names: Vec<String>,
    #[serde(rename = "HeatingCoolingManagerURIs", default, deserialize_with = "nullable")]
    pub heating_cooling_manager_uris: Vec<String>,
    pub height_mm: Option<f64>,
    pub hot_pluggable: Option<bool>,
    #[serde(rename = "IndicatorLED")]
    pub indicator_led: Option<IndicatorLed>,
    pub location_indicator_active: Option<bool>,
    pub manufacturer: Option<String>,
    pub max_power_watts: Option<f64>,
    pub model: Option<String>,
    pub part_number: Option<String>,
    pub power_state: Option<PowerState>,
    pub rack_mount_capacity_units: Option<f64>,
    pub rack_mount_depth_mm: Option<f64>,
    pub rack_mount_width: Option<String>,
    pub rack_units: Option<String>,
    pub ready_to_remove: Option<bool>,
    #[serde(rename = "SKU")]
    pub sku: Option<String>,
    pub serial_number: Option<String>,
    #[serde(rename = "UUID")]
    pub uuid: Option<String>,
    pub weight_kg: Option<f64>,
    pub width_mm: Option<f64>,
    pub status: Option<Status>,

    #[serde(default)]
    environment_metrics: Link,
    #[serde(default)]
    log_services: Link,
    #[serde(default)]
    memory: Link,
    #[serde(default)]
    thermal_subsystem: Link,
    #[serde(default, deserialize_with = "nullable")]
    links: ChassisLinks,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
struct ChassisLinks {
    connected_cooling_loops: LinkArray,
    contained_by: Link,
    contains: LinkArray,
    facility: Link,
    fans: LinkArray,
    managed_by: LinkArray,
    managers_in_chassis: LinkArray,
    power_distribution: Link,
    power_outlets: LinkArray,
    power_supplies: LinkArray,
}

impl Resource for Chassis {
    const KIND: &'static str = "Chassis";

    fn entity(&self) -> &Entity {
        &self.entity
    }

    fn entity_mut(&mut self) -> &mut Entity {
        &mut self.entity
    }

    fn writable_fields() -> &'static [WritableField<Self>] {
        writable_fields!(Chassis {
            "AssetTag" => value(asset_tag),
            "ElectricalSourceManagerURIs" => value(electrical_source_manager_uris),
            "ElectricalSourceNames" => value(electrical_source_names),
            "EnvironmentalClass" => value(environmental_class),
            "HeatingCoolingEquipmentNames" => value(heating_cooling_equipment_names),
            "HeatingCoolingManagerURIs" => value(heating_cooling_manager_uris),
            "IndicatorLED" => value(indicator_led),
            "LocationIndicatorActive" => value(location_indicator_active),
            "RackMountCapacityUnits" => value(rack_mount_capacity_units),
            "RackMountDepthMm" => value(rack_mount_depth_mm),
            "RackMountWidth" => value(rack_mount_width),
            "RackUnits" => value(rack_units),
            "ReadyToRemove" => value(ready_to_remove),
        })
    }
}

supported_actions!(Chassis {
    reset => "#Chassis.Reset",
});

impl Chassis {
    pub async fn reset(&self, reset_type: ResetType) -> Result<ActionOutcome> {
        self.entity
            .invoke("#Chassis.Reset", &Reset { reset_type })
            .await
    }

    pub async fn environment_metrics(&self) -> Result<Option<EnvironmentMetrics>> {
        self.entity.follow(&self.environment_metrics).await
    }

    pub async fn log_services(&self) -> Result<Batch<LogService>> {
        self.entity.enumerate(&self.log_services).await
    }

    pub async fn memory(&self) -> Result<Batch<Memory>> {
        self.entity.enumerate(&self.memory).await
    }

    pub async fn thermal_subsystem(&self) -> Result<Option<ThermalSubsystem>> {
        self.entity.follow(&self.thermal_subsystem).await
    }

    pub async fn connected_cooling_loops(&self) -> Result<Batch<CoolingLoop>> {
        self.entity.follow_all(&self.links.connected_cooling_loops).await
    }

    /// The enclosing chassis, e.g. the rack holding this server.
    pub async fn contained_by(&self) -> Result<Option<Chassis>> {
        self.entity.follow(&self.links.contained_by).await
    }

    pub async fn contains(&self) -> Result<Batch<Chassis>> {
        self.entity.follow_all(&self.links.contains).await
    }

    pub async fn facility(&self) -> Result<Option<Facility>> {
        self.entity.follow(&self.links.facility).await
    }

    pub async fn fans(&self) -> Result<Batch<Fan>> {
        self.entity.follow_all(&self.links.fans).await
    }

    pub async fn managed_by(&self) -> Result<Batch<Manager>> {
        self.entity.follow_all(&self.links.managed_by).await
    }

    pub async fn managers_in_chassis(&self) -> Result<Batch<Manager>> {
        self.entity.follow_all(&self.links.managers_in_chassis).await
    }

    /// The PDU or power shelf housed in this chassis.
    pub async fn power_distribution(&self) -> Result<Option<PowerDistribution>> {
        self.entity.follow(&self.links.power_distribution).await
    }

    /// Outlets supplying power to this chassis.
    pub async fn power_outlets(&self) -> Result<Batch<Outlet>> {
        self.entity.follow_all(&self.links.power_outlets).await
    }

    pub async fn power_supplies(&self) -> Result<Batch<PowerSupply>> {
        self.entity.follow_all(&self.links.power_supplies).await
    }
}
