//! # Memory
//!
//! A memory device (DIMM, persistent memory module, cache).
//!
//! Security actions (passphrases, unlock, erase) all take the same
//! [`Passphrase`] body. Media scans and poison injection address physical
//! ranges given as hex strings, exactly as the service expects them.

use super::{Chassis, EnvironmentMetrics, LogService};
use crate::actions::{InjectPersistentPoison, Passphrase, Reset, ResetType, ScanMedia};
use crate::common::{ControlRangeExcerpt, Status};
use redfish_core::{
    nullable, supported_actions, writable_fields, ActionOutcome, Entity, Link, Resource, Result,
    WritableField,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SecurityState {
    Enabled,
    Disabled,
    Unlocked,
    Locked,
    Frozen,
    Passphraselimit,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Memory {
    #[serde(skip)]
    entity: Entity,

    #[serde(rename = "AllowedSpeedsMHz", default, deserialize_with = "nullable")]
    pub allowed_speeds_mhz: Vec<u32>,
    pub base_module_type: Option<String>,
    pub bus_width_bits: Option<u32>,
    #[serde(rename = "CapacityMiB")]
    pub capacity_mib: Option<u64>,
    pub configuration_locked: Option<bool>,
    pub data_width_bits: Option<u32>,
    pub device_locator: Option<String>,
    pub enabled: Option<bool>,
    pub error_correction: Option<String>,
    pub firmware_revision: Option<String>,
    pub location_indicator_active: Option<bool>,
    pub manufacturer: Option<String>,
    pub memory_device_type: Option<String>,
    pub memory_type: Option<String>,
    pub model: Option<String>,
    #[serde(rename = "NonVolatileSizeLimitMiB")]
    pub non_volatile_size_limit_mib: Option<u64>,
    #[serde(rename = "NonVolatileSizeMiB")]
    pub non_volatile_size_mib: Option<u64>,
    pub operating_speed_mhz: Option<u32>,
    #[serde(rename = "OperatingSpeedRangeMHz")]
    pub operating_speed_range_mhz: Option<ControlRangeExcerpt>,
    pub part_number: Option<String>,
    pub poison_list_max_media_error_records: Option<u64>,
    pub rank_count: Option<u32>,
    pub security_state: Option<SecurityState>,
    pub serial_number: Option<String>,
    #[serde(rename = "VolatileSizeLimitMiB")]
    pub volatile_size_limit_mib: Option<u64>,
    #[serde(rename = "VolatileSizeMiB")]
    pub volatile_size_mib: Option<u64>,
    pub status: Option<Status>,

    #[serde(default)]
    environment_metrics: Link,
    #[serde(default)]
    log: Link,
    #[serde(default, deserialize_with = "nullable")]
    links: MemoryLinks,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
struct MemoryLinks {
    chassis: Link,
}

impl Resource for Memory {
    const KIND: &'static str = "Memory";

    fn entity(&self) -> &Entity {
        &self.entity
    }

    fn entity_mut(&mut self) -> &mut Entity {
        &mut self.entity
    }

    fn writable_fields() -> &'static [WritableField<Self>] {
        writable_fields!(Memory {
            "Enabled" => value(enabled),
            "LocationIndicatorActive" => value(location_indicator_active),
            "NonVolatileSizeLimitMiB" => value(non_volatile_size_limit_mib),
            "OperatingSpeedRangeMHz" => optional_record(operating_speed_range_mhz),
            "PoisonListMaxMediaErrorRecords" => value(poison_list_max_media_error_records),
            "SecurityState" => value(security_state),
            "VolatileSizeLimitMiB" => value(volatile_size_limit_mib),
        })
    }
}

supported_actions!(Memory {
    disable_master_passphrase => "#Memory.DisableMasterPassphrase",
    disable_passphrase => "#Memory.DisablePassphrase",
    freeze_security_state => "#Memory.FreezeSecurityState",
    inject_persistent_poison => "#Memory.InjectPersistentPoison",
    overwrite_unit => "#Memory.OverwriteUnit",
    reset => "#Memory.Reset",
    reset_to_defaults => "#Memory.ResetToDefaults",
    scan_media => "#Memory.ScanMedia",
    secure_erase_unit => "#Memory.SecureEraseUnit",
    set_master_passphrase => "#Memory.SetMasterPassphrase",
    set_passphrase => "#Memory.SetPassphrase",
    unlock_unit => "#Memory.UnlockUnit",
});

impl Memory {
    pub async fn disable_master_passphrase(&self, body: &Passphrase) -> Result<ActionOutcome> {
        self.entity
            .invoke("#Memory.DisableMasterPassphrase", body)
            .await
    }

    pub async fn disable_passphrase(&self, body: &Passphrase) -> Result<ActionOutcome> {
        self.entity.invoke("#Memory.DisablePassphrase", body).await
    }

    /// Freezes the security state until the next power cycle.
    pub async fn freeze_security_state(&self) -> Result<ActionOutcome> {
        self.entity
            .invoke_empty("#Memory.FreezeSecurityState")
            .await
    }

    pub async fn inject_persistent_poison(
        &self,
        physical_address: impl Into<String>,
    ) -> Result<ActionOutcome> {
        let body = InjectPersistentPoison {
            physical_address: physical_address.into(),
        };
        self.entity
            .invoke("#Memory.InjectPersistentPoison", &body)
            .await
    }

    pub async fn overwrite_unit(&self, body: &Passphrase) -> Result<ActionOutcome> {
        self.entity.invoke("#Memory.OverwriteUnit", body).await
    }

    pub async fn reset(&self, reset_type: ResetType) -> Result<ActionOutcome> {
        self.entity
            .invoke("#Memory.Reset", &Reset { reset_type })
            .await
    }

    pub async fn reset_to_defaults(&self) -> Result<ActionOutcome> {
        self.entity.invoke_empty("#Memory.ResetToDefaults").await
    }

    /// Scans `length` bytes from `physical_address` for media errors.
    pub async fn scan_media(&self, body: &ScanMedia) -> Result<ActionOutcome> {
        self.entity.invoke("#Memory.ScanMedia", body).await
    }

    pub async fn secure_erase_unit(&self, body: &Passphrase) -> Result<ActionOutcome> {
        self.entity.invoke("#Memory.SecureEraseUnit", body).await
    }

    pub async fn set_master_passphrase(&self, body: &Passphrase) -> Result<ActionOutcome> {
        self.entity.invoke("#Memory.SetMasterPassphrase", body).await
    }

    pub async fn set_passphrase(&self, body: &Passphrase) -> Result<ActionOutcome> {
        self.entity.invoke("#Memory.SetPassphrase", body).await
    }

    pub async fn unlock_unit(&self, body: &Passphrase) -> Result<ActionOutcome> {
        self.entity.invoke("#Memory.UnlockUnit", body).await
    }

    pub async fn chassis(&self) -> Result<Option<Chassis>> {
        self.entity.follow(&self.links.chassis).await
    }

    pub async fn environment_metrics(&self) -> Result<Option<EnvironmentMetrics>> {
        self.entity.follow(&self.environment_metrics).await
    }

    /// The device's own log service.
    pub async fn log(&self) -> Result<Option<LogService>> {
        self.entity.follow(&self.log).await
    }
}
