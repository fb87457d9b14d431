//! `EnvironmentMetrics`: temperature, humidity and power readings of a device
//! or facility, plus its power limit.
//!
//! Only the power limit's `SetPoint` and `ControlMode` are writable; the
//! readings inside the same object are never sent.

use crate::common::{ControlSingleExcerpt, SensorEnergyExcerpt, SensorExcerpt, SensorFanExcerpt};
use redfish_core::{
    nullable, supported_actions, writable_fields, ActionOutcome, Entity, Resource, Result,
    WritableField,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EnvironmentMetrics {
    #[serde(skip)]
    entity: Entity,

    pub absolute_humidity: Option<SensorExcerpt>,
    pub ambient_temperature_celsius: Option<SensorExcerpt>,
    pub current_amps: Option<SensorExcerpt>,
    pub dew_point_celsius: Option<SensorExcerpt>,
    pub energy_joules: Option<SensorExcerpt>,
    #[serde(rename = "EnergykWh")]
    pub energy_kwh: Option<SensorEnergyExcerpt>,
    #[serde(default, deserialize_with = "nullable")]
    pub fan_speeds_percent: Vec<SensorFanExcerpt>,
    pub humidity_percent: Option<SensorExcerpt>,
    pub power_limit_watts: Option<ControlSingleExcerpt>,
    pub power_load_percent: Option<SensorExcerpt>,
    pub power_watts: Option<SensorExcerpt>,
    pub temperature_celsius: Option<SensorExcerpt>,
    pub voltage: Option<SensorExcerpt>,
}

impl Resource for EnvironmentMetrics {
    const KIND: &'static str = "EnvironmentMetrics";

    fn entity(&self) -> &Entity {
        &self.entity
    }

    fn entity_mut(&mut self) -> &mut Entity {
        &mut self.entity
    }

    fn writable_fields() -> &'static [WritableField<Self>] {
        writable_fields!(EnvironmentMetrics {
            "PowerLimitWatts" => optional_record(power_limit_watts),
        })
    }
}

supported_actions!(EnvironmentMetrics {
    reset_metrics => "#EnvironmentMetrics.ResetMetrics",
    reset_to_defaults => "#EnvironmentMetrics.ResetToDefaults",
});

impl EnvironmentMetrics {
    /// Resets summary metrics such as energy totals.
    pub async fn reset_metrics(&self) -> Result<ActionOutcome> {
        self.entity
            .invoke_empty("#EnvironmentMetrics.ResetMetrics")
            .await
    }

    /// Resets writable properties, the power limit included, to factory values.
    pub async fn reset_to_defaults(&self) -> Result<ActionOutcome> {
        self.entity
            .invoke_empty("#EnvironmentMetrics.ResetToDefaults")
            .await
    }
}
