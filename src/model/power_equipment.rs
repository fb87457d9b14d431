//! `PowerEquipment`: the service-wide index of power distribution equipment.
//!
//! Each equipment class is a collection of [`PowerDistribution`] resources.

use super::{Manager, PowerDistribution};
use crate::common::Status;
use redfish_core::{nullable, Batch, Entity, Link, LinkArray, Resource, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PowerEquipment {
    #[serde(skip)]
    entity: Entity,

    pub status: Option<Status>,

    #[serde(rename = "FloorPDUs", default)]
    floor_pdus: Link,
    #[serde(default)]
    power_shelves: Link,
    #[serde(rename = "RackPDUs", default)]
    rack_pdus: Link,
    #[serde(default)]
    switchgear: Link,
    #[serde(default)]
    transfer_switches: Link,
    #[serde(default, deserialize_with = "nullable")]
    links: PowerEquipmentLinks,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
struct PowerEquipmentLinks {
    managed_by: LinkArray,
}

impl Resource for PowerEquipment {
    const KIND: &'static str = "PowerEquipment";

    fn entity(&self) -> &Entity {
        &self.entity
    }

    fn entity_mut(&mut self) -> &mut Entity {
        &mut self.entity
    }
}

impl PowerEquipment {
    pub async fn floor_pdus(&self) -> Result<Batch<PowerDistribution>> {
        self.entity.enumerate(&self.floor_pdus).await
    }

    pub async fn power_shelves(&self) -> Result<Batch<PowerDistribution>> {
        self.entity.enumerate(&self.power_shelves).await
    }

    pub async fn rack_pdus(&self) -> Result<Batch<PowerDistribution>> {
        self.entity.enumerate(&self.rack_pdus).await
    }

    pub async fn switchgear(&self) -> Result<Batch<PowerDistribution>> {
        self.entity.enumerate(&self.switchgear).await
    }

    pub async fn transfer_switches(&self) -> Result<Batch<PowerDistribution>> {
        self.entity.enumerate(&self.transfer_switches).await
    }

    pub async fn managed_by(&self) -> Result<Batch<Manager>> {
        self.entity.follow_all(&self.links.managed_by).await
    }
}
