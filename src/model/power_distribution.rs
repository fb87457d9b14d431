//! # PowerDistribution
//!
//! A rack PDU, floor PDU, power shelf, switchgear or transfer switch.
//!
//! Circuits hang off four collections by role (`Mains`, `Feeders`,
//! `Branches`, `Subfeeds`); outlets and power supplies each have their own.
//! Transfer switches additionally carry a writable `TransferConfiguration`.

use super::{Chassis, Circuit, Facility, Manager, Outlet, PowerSupply};
use crate::common::Status;
use redfish_core::{
    nullable, supported_actions, writable_fields, ActionOutcome, Batch, Entity, Link, LinkArray,
    Record, Resource, Result, WritableField,
};
use serde::{Deserialize, Serialize};

/// How a transfer switch picks and changes its mains source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TransferConfiguration {
    pub active_mains_id: Option<String>,
    pub auto_transfer_enabled: Option<bool>,
    pub closed_transition_allowed: Option<bool>,
    pub closed_transition_timeout_seconds: Option<i64>,
    pub preferred_mains_id: Option<String>,
    pub retransfer_delay_seconds: Option<i64>,
    pub retransfer_enabled: Option<bool>,
    pub transfer_delay_seconds: Option<i64>,
    pub transfer_inhibit: Option<bool>,
}

impl Record for TransferConfiguration {
    fn writable_fields() -> &'static [WritableField<Self>] {
        writable_fields!(TransferConfiguration {
            "ActiveMainsId" => value(active_mains_id),
            "AutoTransferEnabled" => value(auto_transfer_enabled),
            "ClosedTransitionAllowed" => value(closed_transition_allowed),
            "ClosedTransitionTimeoutSeconds" => value(closed_transition_timeout_seconds),
            "PreferredMainsId" => value(preferred_mains_id),
            "RetransferDelaySeconds" => value(retransfer_delay_seconds),
            "RetransferEnabled" => value(retransfer_enabled),
            "TransferDelaySeconds" => value(transfer_delay_seconds),
            "TransferInhibit" => value(transfer_inhibit),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PowerDistribution {
    #[serde(skip)]
    entity: Entity,

    pub asset_tag: Option<String>,
    pub equipment_type: Option<String>,
    pub firmware_version: Option<String>,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub part_number: Option<String>,
    #[serde(rename = "PowerCapacityVA")]
    pub power_capacity_va: Option<u64>,
    pub production_date: Option<String>,
    pub serial_number: Option<String>,
    pub transfer_configuration: Option<TransferConfiguration>,
    pub user_label: Option<String>,
    #[serde(rename = "UUID")]
    pub uuid: Option<String>,
    pub version: Option<String>,
    pub status: Option<Status>,

    #[serde(default)]
    branches: Link,
    #[serde(default)]
    feeders: Link,
    #[serde(default)]
    mains: Link,
    #[serde(default)]
    outlets: Link,
    #[serde(default)]
    power_supplies: Link,
    #[serde(default)]
    subfeeds: Link,
    #[serde(default, deserialize_with = "nullable")]
    links: PowerDistributionLinks,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
struct PowerDistributionLinks {
    chassis: LinkArray,
    facility: Link,
    managed_by: LinkArray,
}

impl Resource for PowerDistribution {
    const KIND: &'static str = "PowerDistribution";

    fn entity(&self) -> &Entity {
        &self.entity
    }

    fn entity_mut(&mut self) -> &mut Entity {
        &mut self.entity
    }

    fn writable_fields() -> &'static [WritableField<Self>] {
        writable_fields!(PowerDistribution {
            "AssetTag" => value(asset_tag),
            "TransferConfiguration" => optional_record(transfer_configuration),
            "UserLabel" => value(user_label),
        })
    }
}

supported_actions!(PowerDistribution {
    transfer_control => "#PowerDistribution.TransferControl",
});

impl PowerDistribution {
    /// Transfers a transfer switch to its alternate mains source.
    pub async fn transfer_control(&self) -> Result<ActionOutcome> {
        self.entity
            .invoke_empty("#PowerDistribution.TransferControl")
            .await
    }

    pub async fn branches(&self) -> Result<Batch<Circuit>> {
        self.entity.enumerate(&self.branches).await
    }

    pub async fn feeders(&self) -> Result<Batch<Circuit>> {
        self.entity.enumerate(&self.feeders).await
    }

    pub async fn mains(&self) -> Result<Batch<Circuit>> {
        self.entity.enumerate(&self.mains).await
    }

    pub async fn subfeeds(&self) -> Result<Batch<Circuit>> {
        self.entity.enumerate(&self.subfeeds).await
    }

    /// Enumerates the `Outlets` collection.
    pub async fn outlets(&self) -> Result<Batch<Outlet>> {
        self.entity.enumerate(&self.outlets).await
    }

    pub async fn power_supplies(&self) -> Result<Batch<PowerSupply>> {
        self.entity.enumerate(&self.power_supplies).await
    }

    pub async fn chassis(&self) -> Result<Batch<Chassis>> {
        self.entity.follow_all(&self.links.chassis).await
    }

    pub async fn facility(&self) -> Result<Option<Facility>> {
        self.entity.follow(&self.links.facility).await
    }

    pub async fn managed_by(&self) -> Result<Batch<Manager>> {
        self.entity.follow_all(&self.links.managed_by).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use redfish_core::mock::MockTransport;
    use redfish_core::Client;
    use serde_json::json;

    const URI: &str = "/redfish/v1/PowerEquipment/TransferSwitches/1";

    #[tokio::test]
    async fn test_transfer_configuration_patches_nested_delta() {
        let mock = MockTransport::new();
        mock.expect_get(URI).return_json(json!({
            "@odata.id": URI,
            "@odata.etag": "\"1\"",
            "Id": "1",
            "EquipmentType": "AutomaticTransferSwitch",
            "TransferConfiguration": {
                "ActiveMainsId": "A",
                "AutoTransferEnabled": true,
                "TransferDelaySeconds": 15
            },
            "Actions": {
                "#PowerDistribution.TransferControl": {
                    "target": "/redfish/v1/PowerEquipment/TransferSwitches/1/Actions/PowerDistribution.TransferControl"
                }
            }
        }));
        mock.expect_patch(URI).return_status(204);
        mock.expect_post(
            "/redfish/v1/PowerEquipment/TransferSwitches/1/Actions/PowerDistribution.TransferControl",
        )
        .return_status(204);
        let client = Client::new(mock.clone());

        let mut switch: PowerDistribution = client.get(URI).await.unwrap();
        if let Some(config) = switch.transfer_configuration.as_mut() {
            config.transfer_delay_seconds = Some(30);
        }
        switch.update().await.unwrap();
        switch.transfer_control().await.unwrap();

        let calls = mock.calls();
        assert_eq!(
            calls[1].json(),
            Some(json!({"TransferConfiguration": {"TransferDelaySeconds": 30}}))
        );
        assert_eq!(calls[1].headers.get("If-Match"), Some("\"1\""));
        assert_eq!(calls[2].body, None);
        mock.verify();
    }
}
