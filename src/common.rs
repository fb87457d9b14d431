//! Shared sub-records and enumerations used by several resource kinds.

use redfish_core::{writable_fields, Record, WritableField};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Health {
    #[serde(rename = "OK")]
    Ok,
    Warning,
    Critical,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum State {
    Enabled,
    Disabled,
    StandbyOffline,
    StandbySpare,
    InTest,
    Starting,
    Absent,
    UnavailableOffline,
    Deferring,
    Quiesced,
    Updating,
    Qualified,
    Degraded,
    #[serde(other)]
    Unknown,
}

/// The `Status` object carried by most resources. Read-only everywhere.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Status {
    pub state: Option<State>,
    pub health: Option<Health>,
    pub health_rollup: Option<Health>,
}

impl Status {
    pub fn is_healthy(&self) -> bool {
        matches!(self.health, Some(Health::Ok))
    }
}

/// Reported power state of a resource (as opposed to a requested one).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerState {
    On,
    Off,
    PoweringOn,
    PoweringOff,
    Paused,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IndicatorLed {
    Lit,
    Blinking,
    Off,
    #[serde(other)]
    Unknown,
}

/// Reading excerpt of a `Sensor` resource, with a link back to it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SensorExcerpt {
    #[serde(rename = "DataSourceUri")]
    pub data_source_uri: Option<String>,
    pub reading: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SensorEnergyExcerpt {
    #[serde(rename = "DataSourceUri")]
    pub data_source_uri: Option<String>,
    pub reading: Option<f64>,
    pub lifetime_reading: Option<f64>,
}

/// Fan speed excerpt; `SpeedRPM` is only present on some fans.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SensorFanExcerpt {
    #[serde(rename = "DataSourceUri")]
    pub data_source_uri: Option<String>,
    pub reading: Option<f64>,
    #[serde(rename = "SpeedRPM")]
    pub speed_rpm: Option<f64>,
}

/// What an outlet or circuit does when input power returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerRestorePolicy {
    AlwaysOn,
    AlwaysOff,
    LastState,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControlMode {
    Automatic,
    Override,
    Manual,
    Disabled,
    #[serde(other)]
    Unknown,
}

/// Excerpt of a single-value `Control`, e.g. a power limit.
///
/// Only `SetPoint` and `ControlMode` may be patched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ControlSingleExcerpt {
    #[serde(rename = "DataSourceUri")]
    pub data_source_uri: Option<String>,
    pub reading: Option<f64>,
    pub set_point: Option<f64>,
    pub control_mode: Option<ControlMode>,
    pub allowable_max: Option<f64>,
    pub allowable_min: Option<f64>,
}

impl Record for ControlSingleExcerpt {
    fn writable_fields() -> &'static [WritableField<Self>] {
        writable_fields!(ControlSingleExcerpt {
            "SetPoint" => value(set_point),
            "ControlMode" => value(control_mode),
        })
    }
}

/// Excerpt of a range `Control`, e.g. an operating speed window.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ControlRangeExcerpt {
    #[serde(rename = "DataSourceUri")]
    pub data_source_uri: Option<String>,
    pub reading: Option<f64>,
    pub setting_max: Option<f64>,
    pub setting_min: Option<f64>,
    pub control_mode: Option<ControlMode>,
    pub allowable_max: Option<f64>,
    pub allowable_min: Option<f64>,
}

impl Record for ControlRangeExcerpt {
    fn writable_fields() -> &'static [WritableField<Self>] {
        writable_fields!(ControlRangeExcerpt {
            "SettingMax" => value(setting_max),
            "SettingMin" => value(setting_min),
            "ControlMode" => value(control_mode),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unknown_enum_values_do_not_fail() {
        let status: Status = serde_json::from_value(json!({
            "State": "SomethingNew",
            "Health": "OK"
        }))
        .unwrap();
        assert_eq!(status.state, Some(State::Unknown));
        assert!(status.is_healthy());
    }

    #[test]
    fn test_control_projection_ignores_readings() {
        let control = ControlSingleExcerpt {
            reading: Some(512.0),
            set_point: Some(600.0),
            control_mode: Some(ControlMode::Automatic),
            ..ControlSingleExcerpt::default()
        };
        assert_eq!(
            redfish_core::update::project(&control),
            json!({"SetPoint": 600.0, "ControlMode": "Automatic"})
        );
    }
}
