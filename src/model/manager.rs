//! # Manager
//!
//! A management controller (BMC, enclosure manager, rack manager).
//!
//! The clock fields (`DateTime`, `DateTimeLocalOffset`, `TimeZoneName`,
//! `AutoDSTEnabled`) are writable, as are a handful of identification
//! strings. Resetting the controller goes through [`Manager::reset`].

use super::{Chassis, LogService};
use crate::actions::{Reset, ResetToDefaults, ResetToDefaultsType, ResetType};
use crate::common::{PowerState, Status};
use redfish_core::{
    nullable, supported_actions, writable_fields, ActionOutcome, Batch, Entity, Link, LinkArray,
    Resource, Result, WritableField,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Manager {
    #[serde(skip)]
    entity: Entity,

    #[serde(rename = "AutoDSTEnabled")]
    pub auto_dst_enabled: Option<bool>,
    pub date_time: Option<String>,
    pub date_time_local_offset: Option<String>,
    pub date_time_source: Option<String>,
    pub firmware_version: Option<String>,
    pub last_reset_time: Option<String>,
    pub location_indicator_active: Option<bool>,
    pub manager_type: Option<String>,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub part_number: Option<String>,
    pub power_state: Option<PowerState>,
    pub ready_to_remove: Option<bool>,
    pub serial_number: Option<String>,
    pub service_identification: Option<String>,
    pub service_use_notification: Option<String>,
    pub time_zone_name: Option<String>,
    #[serde(rename = "UUID")]
    pub uuid: Option<String>,
    pub status: Option<Status>,

    #[serde(default)]
    log_services: Link,
    #[serde(default, deserialize_with = "nullable")]
    links: ManagerLinks,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
struct ManagerLinks {
    managed_by: LinkArray,
    manager_for_chassis: LinkArray,
    manager_for_managers: LinkArray,
    manager_in_chassis: Link,
}

impl Resource for Manager {
    const KIND: &'static str = "Manager";

    fn entity(&self) -> &Entity {
        &self.entity
    }

    fn entity_mut(&mut self) -> &mut Entity {
        &mut self.entity
    }

    fn writable_fields() -> &'static [WritableField<Self>] {
        writable_fields!(Manager {
            "AutoDSTEnabled" => value(auto_dst_enabled),
            "DateTime" => value(date_time),
            "DateTimeLocalOffset" => value(date_time_local_offset),
            "DateTimeSource" => value(date_time_source),
            "LocationIndicatorActive" => value(location_indicator_active),
            "ReadyToRemove" => value(ready_to_remove),
            "ServiceIdentification" => value(service_identification),
            "ServiceUseNotification" => value(service_use_notification),
            "TimeZoneName" => value(time_zone_name),
        })
    }
}

supported_actions!(Manager {
    reset => "#Manager.Reset",
    reset_to_defaults => "#Manager.ResetToDefaults",
});

impl Manager {
    pub async fn reset(&self, reset_type: ResetType) -> Result<ActionOutcome> {
        self.entity
            .invoke("#Manager.Reset", &Reset { reset_type })
            .await
    }

    pub async fn reset_to_defaults(
        &self,
        reset_to_defaults_type: ResetToDefaultsType,
    ) -> Result<ActionOutcome> {
        self.entity
            .invoke(
                "#Manager.ResetToDefaults",
                &ResetToDefaults {
                    reset_to_defaults_type,
                },
            )
            .await
    }

    pub async fn log_services(&self) -> Result<Batch<LogService>> {
        self.entity.enumerate(&self.log_services).await
    }

    pub async fn managed_by(&self) -> Result<Batch<Manager>> {
        self.entity.follow_all(&self.links.managed_by).await
    }

    pub async fn manager_for_chassis(&self) -> Result<Batch<Chassis>> {
        self.entity.follow_all(&self.links.manager_for_chassis).await
    }

    pub async fn manager_for_managers(&self) -> Result<Batch<Manager>> {
        self.entity.follow_all(&self.links.manager_for_managers).await
    }

    /// The chassis the manager is physically installed in.
    pub async fn manager_in_chassis(&self) -> Result<Option<Chassis>> {
        self.entity.follow(&self.links.manager_in_chassis).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use redfish_core::mock::MockTransport;
    use redfish_core::{Client, ErrorKind};
    use serde_json::json;

    const URI: &str = "/redfish/v1/Managers/BMC";

    #[tokio::test]
    async fn test_reset_respects_allowable_values() {
        let mock = MockTransport::new();
        mock.expect_get(URI).return_json(json!({
            "@odata.id": URI,
            "Id": "BMC",
            "Actions": {
                "#Manager.Reset": {
                    "target": "/redfish/v1/Managers/BMC/Actions/Manager.Reset",
                    "ResetType@Redfish.AllowableValues": ["GracefulRestart", "ForceRestart"]
                }
            }
        }));
        mock.expect_post("/redfish/v1/Managers/BMC/Actions/Manager.Reset")
            .return_status(204);
        let client = Client::new(mock.clone());
        let manager: Manager = client.get(URI).await.unwrap();

        let err = manager.reset(ResetType::ForceOff).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ActionParameterInvalid);

        manager.reset(ResetType::GracefulRestart).await.unwrap();
        assert_eq!(
            mock.calls()[1].json(),
            Some(json!({"ResetType": "GracefulRestart"}))
        );
        assert!(!manager.supports_reset_to_defaults());
        mock.verify();
    }

    #[tokio::test]
    async fn test_clock_fields_are_writable() {
        let mock = MockTransport::new();
        mock.expect_get(URI).return_json(json!({
            "@odata.id": URI,
            "Id": "BMC",
            "TimeZoneName": "UTC",
            "AutoDSTEnabled": false,
            "FirmwareVersion": "1.0.0"
        }));
        mock.expect_patch(URI).return_status(204);
        let client = Client::new(mock.clone());

        let mut manager: Manager = client.get(URI).await.unwrap();
        manager.time_zone_name = Some("Europe/Berlin".into());
        manager.auto_dst_enabled = Some(true);
        manager.firmware_version = Some("9.9.9".into());
        manager.update().await.unwrap();

        assert_eq!(
            mock.calls()[1].json(),
            Some(json!({"AutoDSTEnabled": true, "TimeZoneName": "Europe/Berlin"}))
        );
    }
}
