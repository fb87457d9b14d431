//! # ServiceRoot
//!
//! The entry point at `/redfish/v1/`. Every other resource is reachable
//! from here:
//!
//! ```text
//! ServiceRoot
//!   ├── Chassis ──────────► Chassis ─► ThermalSubsystem ─► Fans
//!   ├── Managers ─────────► Manager ─► LogServices ─► Entries
//!   ├── Facilities ───────► Facility
//!   ├── PowerEquipment ───► RackPDUs ─► PowerDistribution ─► Outlets, Branches
//!   └── ThermalEquipment ─► CoolingLoops
//! ```

use super::{Chassis, Facility, Manager, PowerEquipment, ThermalEquipment};
use redfish_core::{Batch, Client, Entity, Link, Resource, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ServiceRoot {
    #[serde(skip)]
    entity: Entity,

    pub product: Option<String>,
    pub redfish_version: Option<String>,
    pub service_identification: Option<String>,
    #[serde(rename = "UUID")]
    pub uuid: Option<String>,
    pub vendor: Option<String>,

    #[serde(default)]
    chassis: Link,
    #[serde(default)]
    facilities: Link,
    #[serde(default)]
    managers: Link,
    #[serde(default)]
    power_equipment: Link,
    #[serde(default)]
    thermal_equipment: Link,
}

impl Resource for ServiceRoot {
    const KIND: &'static str = "ServiceRoot";

    fn entity(&self) -> &Entity {
        &self.entity
    }

    fn entity_mut(&mut self) -> &mut Entity {
        &mut self.entity
    }
}

impl ServiceRoot {
    /// Loads the service root configured on `client`.
    pub async fn connect(client: &Client) -> Result<Self> {
        let root = client.service_root::<Self>().await?;
        info!(
            version = root.redfish_version.as_deref().unwrap_or("unknown"),
            product = root.product.as_deref().unwrap_or(""),
            "Connected"
        );
        Ok(root)
    }

    pub async fn chassis(&self) -> Result<Batch<Chassis>> {
        self.entity.enumerate(&self.chassis).await
    }

    pub async fn facilities(&self) -> Result<Batch<Facility>> {
        self.entity.enumerate(&self.facilities).await
    }

    pub async fn managers(&self) -> Result<Batch<Manager>> {
        self.entity.enumerate(&self.managers).await
    }

    pub async fn power_equipment(&self) -> Result<Option<PowerEquipment>> {
        self.entity.follow(&self.power_equipment).await
    }

    pub async fn thermal_equipment(&self) -> Result<Option<ThermalEquipment>> {
        self.entity.follow(&self.thermal_equipment).await
    }
}
