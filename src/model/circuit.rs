//! `Circuit`: a branch, feeder, mains or subfeed of a power distribution unit.

use super::Outlet;
use crate::actions::{ActionPowerState, BreakerControl, PowerControl};
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
pub struct Circuit {
    #[serde(skip)]
    entity: Entity,

    pub breaker_state: Option<String>,
    pub circuit_type: Option<String>,
    pub configuration_locked: Option<bool>,
    pub critical_circuit: Option<bool>,
    #[serde(default, deserialize_with = "nullable")]
    pub electrical_consumer_names: Vec<String>,
    #[serde(rename = "ElectricalSourceManagerURI")]
    pub electrical_source_manager_uri: Option<String>,
    pub electrical_source_name: Option<String>,
    #[serde(rename = "IndicatorLED")]
    pub indicator_led: Option<IndicatorLed>,
    pub location_indicator_active: Option<bool>,
    pub nominal_frequency_hz: Option<f64>,
    pub nominal_voltage: Option<String>,
    pub phase_wiring_type: Option<String>,
    pub plug_type: Option<String>,
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
    pub voltage_type: Option<String>,
    pub status: Option<Status>,

    pub current_amps: Option<SensorExcerpt>,
    #[serde(rename = "EnergykWh")]
    pub energy_kwh: Option<SensorEnergyExcerpt>,
    pub frequency_hz: Option<SensorExcerpt>,
    pub power_load_percent: Option<SensorExcerpt>,
    pub power_watts: Option<SensorExcerpt>,
    pub unbalanced_current_percent: Option<SensorExcerpt>,
    pub unbalanced_voltage_percent: Option<SensorExcerpt>,
    pub voltage: Option<SensorExcerpt>,

    #[serde(default, deserialize_with = "nullable")]
    links: CircuitLinks,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
struct CircuitLinks {
    branch_circuit: Link,
    distribution_circuits: LinkArray,
    outlets: LinkArray,
    power_outlet: Link,
    source_circuit: Link,
}

impl Resource for Circuit {
    const KIND: &'static str = "Circuit";

    fn entity(&self) -> &Entity {
        &self.entity
    }

    fn entity_mut(&mut self) -> &mut Entity {
        &mut self.entity
    }

    fn writable_fields() -> &'static [WritableField<Self>] {
        writable_fields!(Circuit {
            "ConfigurationLocked" => value(configuration_locked),
            "CriticalCircuit" => value(critical_circuit),
            "ElectricalConsumerNames" => value(electrical_consumer_names),
            "ElectricalSourceManagerURI" => value(electrical_source_manager_uri),
            "ElectricalSourceName" => value(electrical_source_name),
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

supported_actions!(Circuit {
    breaker_control => "#Circuit.BreakerControl",
    power_control => "#Circuit.PowerControl",
    reset_metrics => "#Circuit.ResetMetrics",
});

impl Circuit {
    /// Opens or closes the circuit breaker.
    pub async fn breaker_control(&self, power_state: ActionPowerState) -> Result<ActionOutcome> {
        self.entity
            .invoke("#Circuit.BreakerControl", &BreakerControl { power_state })
            .await
    }

    pub async fn power_control(&self, power_state: ActionPowerState) -> Result<ActionOutcome> {
        self.entity
            .invoke("#Circuit.PowerControl", &PowerControl { power_state })
            .await
    }

    pub async fn reset_metrics(&self) -> Result<ActionOutcome> {
        self.entity.invoke_empty("#Circuit.ResetMetrics").await
    }

    /// The branch circuit this circuit belongs to, for sub-branches.
    pub async fn branch_circuit(&self) -> Result<Option<Circuit>> {
        self.entity.follow(&self.links.branch_circuit).await
    }

    /// The upstream circuit feeding this one.
    pub async fn source_circuit(&self) -> Result<Option<Circuit>> {
        self.entity.follow(&self.links.source_circuit).await
    }

    pub async fn distribution_circuits(&self) -> Result<Batch<Circuit>> {
        self.entity.follow_all(&self.links.distribution_circuits).await
    }

    pub async fn outlets(&self) -> Result<Batch<Outlet>> {
        self.entity.follow_all(&self.links.outlets).await
    }

    /// The upstream outlet when this circuit is plugged into one.
    pub async fn power_outlet(&self) -> Result<Option<Outlet>> {
        self.entity.follow(&self.links.power_outlet).await
    }
}
