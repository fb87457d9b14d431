//! # Outlet
//!
//! One electrical receptacle of a rack PDU, floor PDU or power shelf.
//!
//! | Wire field | Access |
//! |------------|--------|
//! | `UserLabel`, `PowerRestorePolicy`, `Power*DelaySeconds`, ... | writable |
//! | `PowerState`, readings, `Status` | read-only |
//!
//! `PowerControl` is the only way to change the power state; writing
//! `PowerState` locally and calling `update()` sends nothing.

use super::{Chassis, Circuit, PowerSupply};
use crate::actions::{ActionPowerState, PowerControl};
use crate::common::{
    IndicatorLed, PowerRestorePolicy, PowerState, SensorEnergyExcerpt, SensorExcerpt, Status,
};
use redfish_core::{
    nullable, supported_actions, writable_fields, ActionOutcome, Batch, Entity, Link, LinkArray,
    Resource, Result, WritableField,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Outlet {
    #[serde(skip)]
    entity: Entity,

    pub configuration_locked: Option<bool>,
    #[serde(default, deserialize_with = "nullable")]
    pub electrical_consumer_names: Vec<String>,
    #[serde(rename = "IndicatorLED")]
    pub indicator_led: Option<IndicatorLed>,
    pub location_indicator_active: Option<bool>,
    pub outlet_type: Option<String>,
    pub nominal_voltage: Option<String>,
    pub phase_wiring_type: Option<String>,
    pub power_control_locked: Option<bool>,
    pub power_cycle_delay_seconds: Option<f64>,
    pub power_off_delay_seconds: Option<f64>,
    pub power_on_delay_seconds: Option<f64>,
    pub power_restore_delay_seconds: Option<f64>,
    pub power_restore_policy: Option<PowerRestorePolicy>,
    pub power_enabled: Option<bool>,
    pub power_state: Option<PowerState>,
    pub power_state_in_transition: Option<bool>,
    pub rated_current_amps: Option<f64>,
    pub user_label: Option<String>,
    pub status: Option<Status>,

    pub current_amps: Option<SensorExcerpt>,
    #[serde(rename = "EnergykWh")]
    pub energy_kwh: Option<SensorEnergyExcerpt>,
    pub frequency_hz: Option<SensorExcerpt>,
    pub power_load_percent: Option<SensorExcerpt>,
    pub power_watts: Option<SensorExcerpt>,
    pub voltage: Option<SensorExcerpt>,

    #[serde(default, deserialize_with = "nullable")]
    links: OutletLinks,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
struct OutletLinks {
    branch_circuit: Link,
    chassis: LinkArray,
    distribution_circuits: LinkArray,
    power_supplies: LinkArray,
}

impl Resource for Outlet {
    const KIND: &'static str = "Outlet";

    fn entity(&self) -> &Entity {
        &self.entity
    }

    fn entity_mut(&mut self) -> &mut Entity {
        &mut self.entity
    }

    fn writable_fields() -> &'static [WritableField<Self>] {
        writable_fields!(Outlet {
            "ConfigurationLocked" => value(configuration_locked),
            "ElectricalConsumerNames" => value(electrical_consumer_names),
            "IndicatorLED" => value(indicator_led),
            "LocationIndicatorActive" => value(location_indicator_active),
            "PowerControlLocked" => value(power_control_locked),
            "PowerCycleDelaySeconds" => value(power_cycle_delay_seconds),
            "PowerOffDelaySeconds" => value(power_off_delay_seconds),
            "PowerOnDelaySeconds" => value(power_on_delay_seconds),
            "PowerRestoreDelaySeconds" => value(power_restore_delay_seconds),
            "PowerRestorePolicy" => value(power_restore_policy),
            "UserLabel" => value(user_label),
        })
    }
}

supported_actions!(Outlet {
    power_control => "#Outlet.PowerControl",
    reset_metrics => "#Outlet.ResetMetrics",
});

impl Outlet {
    /// Turns the outlet on, off or cycles it.
    pub async fn power_control(&self, power_state: ActionPowerState) -> Result<ActionOutcome> {
        self.entity
            .invoke("#Outlet.PowerControl", &PowerControl { power_state })
            .await
    }

    /// Resets the outlet's accumulated metrics, e.g. energy.
    pub async fn reset_metrics(&self) -> Result<ActionOutcome> {
        self.entity.invoke_empty("#Outlet.ResetMetrics").await
    }

    /// The branch circuit feeding this outlet.
    pub async fn branch_circuit(&self) -> Result<Option<Circuit>> {
        self.entity.follow(&self.links.branch_circuit).await
    }

    /// Chassis receiving power from this outlet.
    pub async fn chassis(&self) -> Result<Batch<Chassis>> {
        self.entity.follow_all(&self.links.chassis).await
    }

    pub async fn distribution_circuits(&self) -> Result<Batch<Circuit>> {
        self.entity.follow_all(&self.links.distribution_circuits).await
    }

    /// Power supplies plugged into this outlet.
    pub async fn power_supplies(&self) -> Result<Batch<PowerSupply>> {
        self.entity.follow_all(&self.links.power_supplies).await
    }
}
