//! # CoolingLoop
//!
//! A liquid cooling loop in a facility. The loop's relations live under
//! `Links`:
//!
//! | Accessor | Wire |
//! |----------|------|
//! | [`CoolingLoop::chassis`] | `Links.Chassis` |
//! | [`CoolingLoop::facility`] | `Links.Facility` |
//! | [`CoolingLoop::managed_by`] | `Links.ManagedBy` |
//!
//! Each accessor reads only its own link.

use super::{Chassis, Facility, Manager};
use crate::common::{Health, SensorExcerpt, Status};
use redfish_core::{
    nullable, writable_fields, Batch, Entity, Link, LinkArray, Resource, Result, WritableField,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoolingLoopType {
    /// Facility water system.
    #[serde(rename = "FWS")]
    Fws,
    /// Technology cooling system.
    #[serde(rename = "TCS")]
    Tcs,
    #[serde(rename = "RowTCS")]
    RowTcs,
    #[serde(other)]
    Unknown,
}

/// The coolant in the loop.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Coolant {
    pub coolant_type: Option<String>,
    pub additive_name: Option<String>,
    pub additive_percent: Option<f64>,
    pub density_kg_per_cubic_meter: Option<f64>,
    pub specific_heatk_joules_per_kg_k: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CoolingLoop {
    #[serde(skip)]
    entity: Entity,

    #[serde(default, deserialize_with = "nullable")]
    pub consuming_equipment_names: Vec<String>,
    pub coolant: Option<Coolant>,
    pub coolant_level_percent: Option<SensorExcerpt>,
    pub coolant_level_status: Option<Health>,
    pub coolant_quality: Option<Health>,
    pub cooling_loop_type: Option<CoolingLoopType>,
    #[serde(rename = "CoolingManagerURI")]
    pub cooling_manager_uri: Option<String>,
    pub location_indicator_active: Option<bool>,
    pub rated_flow_liters_per_minute: Option<f64>,
    #[serde(rename = "RatedPressurekPa")]
    pub rated_pressure_kpa: Option<f64>,
    #[serde(default, deserialize_with = "nullable")]
    pub supply_equipment_names: Vec<String>,
    pub user_label: Option<String>,
    pub status: Option<Status>,

    #[serde(default, deserialize_with = "nullable")]
    links: CoolingLoopLinks,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
struct CoolingLoopLinks {
    chassis: Link,
    facility: Link,
    managed_by: LinkArray,
}

impl Resource for CoolingLoop {
    const KIND: &'static str = "CoolingLoop";

    fn entity(&self) -> &Entity {
        &self.entity
    }

    fn entity_mut(&mut self) -> &mut Entity {
        &mut self.entity
    }

    fn writable_fields() -> &'static [WritableField<Self>] {
        writable_fields!(CoolingLoop {
            "ConsumingEquipmentNames" => value(consuming_equipment_names),
            "CoolingLoopType" => value(cooling_loop_type),
            "CoolingManagerURI" => value(cooling_manager_uri),
            "LocationIndicatorActive" => value(location_indicator_active),
            "SupplyEquipmentNames" => value(supply_equipment_names),
            "UserLabel" => value(user_label),
        })
    }
}

impl CoolingLoop {
    pub async fn chassis(&self) -> Result<Option<Chassis>> {
        self.entity.follow(&self.links.chassis).await
    }

    /// The facility containing this loop.
    pub async fn facility(&self) -> Result<Option<Facility>> {
        self.entity.follow(&self.links.facility).await
    }

    pub async fn managed_by(&self) -> Result<Batch<Manager>> {
        self.entity.follow_all(&self.links.managed_by).await
    }
}
