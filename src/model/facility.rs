//! `Facility`: a building, room, floor or site. Read-only.

use super::{Chassis, CoolingLoop, EnvironmentMetrics, Manager, PowerDistribution};
use crate::common::Status;
use redfish_core::{nullable, Batch, Entity, Link, LinkArray, Resource, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Facility {
    #[serde(skip)]
    entity: Entity,

    pub facility_type: Option<String>,
    pub status: Option<Status>,

    #[serde(default)]
    ambient_metrics: Link,
    #[serde(default)]
    environment_metrics: Link,
    #[serde(default, deserialize_with = "nullable")]
    links: FacilityLinks,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
struct FacilityLinks {
    contained_by_facility: Link,
    contains_chassis: LinkArray,
    contains_facilities: LinkArray,
    cooling_loops: LinkArray,
    #[serde(rename = "FloorPDUs")]
    floor_pdus: LinkArray,
    managed_by: LinkArray,
    power_shelves: LinkArray,
    #[serde(rename = "RackPDUs")]
    rack_pdus: LinkArray,
    switchgear: LinkArray,
    transfer_switches: LinkArray,
}

impl Resource for Facility {
    const KIND: &'static str = "Facility";

    fn entity(&self) -> &Entity {
        &self.entity
    }

    fn entity_mut(&mut self) -> &mut Entity {
        &mut self.entity
    }
}

impl Facility {
    /// Outdoor or intake conditions, as opposed to [`Facility::environment_metrics`].
    pub async fn ambient_metrics(&self) -> Result<Option<EnvironmentMetrics>> {
        self.entity.follow(&self.ambient_metrics).await
    }

    pub async fn environment_metrics(&self) -> Result<Option<EnvironmentMetrics>> {
        self.entity.follow(&self.environment_metrics).await
    }

    pub async fn contained_by_facility(&self) -> Result<Option<Facility>> {
        self.entity.follow(&self.links.contained_by_facility).await
    }

    pub async fn contains_chassis(&self) -> Result<Batch<Chassis>> {
        self.entity.follow_all(&self.links.contains_chassis).await
    }

    pub async fn contains_facilities(&self) -> Result<Batch<Facility>> {
        self.entity.follow_all(&self.links.contains_facilities).await
    }

    pub async fn cooling_loops(&self) -> Result<Batch<CoolingLoop>> {
        self.entity.follow_all(&self.links.cooling_loops).await
    }

    pub async fn floor_pdus(&self) -> Result<Batch<PowerDistribution>> {
        self.entity.follow_all(&self.links.floor_pdus).await
    }

    pub async fn managed_by(&self) -> Result<Batch<Manager>> {
        self.entity.follow_all(&self.links.managed_by).await
    }

    pub async fn power_shelves(&self) -> Result<Batch<PowerDistribution>> {
        self.entity.follow_all(&self.links.power_shelves).await
    }

    pub async fn rack_pdus(&self) -> Result<Batch<PowerDistribution>> {
        self.entity.follow_all(&self.links.rack_pdus).await
    }

    pub async fn switchgear(&self) -> Result<Batch<PowerDistribution>> {
        self.entity.follow_all(&self.links.switchgear).await
    }

    pub async fn transfer_switches(&self) -> Result<Batch<PowerDistribution>> {
        self.entity.follow_all(&self.links.transfer_switches).await
    }
}
