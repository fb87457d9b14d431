//! # Action Dispatcher
//!
//! Server-defined operations live under a resource's `Actions` object:
//!
//! ```json
//! "Actions": {
//!     "#Outlet.PowerControl": {
//!         "target": "/redfish/v1/PowerEquipment/RackPDUs/1/Outlets/A1/Outlet.PowerControl",
//!         "PowerState@Redfish.AllowableValues": ["On", "Off"],
//!         "@Redfish.ActionInfo": "/redfish/v1/PowerEquipment/RackPDUs/1/Outlets/A1/PowerControlActionInfo"
//!     }
//! }
//! ```
//!
//! Each entry is captured at load time as an [`ActionTarget`]. Resource kinds
//! expose one typed method per action that funnels into [`Entity::invoke`] or
//! [`Entity::invoke_empty`]:
//!
//! 1. Missing or empty target: `ActionUnsupported`, no traffic.
//! 2. Parameters outside the published allowable values: `ActionParameterInvalid`, no traffic.
//! 3. Otherwise one POST to the target. Any 2xx is success; `202 Accepted`
//!    yields a [`TaskMonitor`] for long-running operations.

use crate::client::Client;
use crate::entity::Entity;
use crate::error::{RedfishError, Result};
use serde::de::{DeserializeOwned, Deserializer};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{debug, info};

const ALLOWABLE_SUFFIX: &str = "@Redfish.AllowableValues";
/// Key for a bare `AllowableValues` list, applied to every string parameter.
const ANY_PARAMETER: &str = "*";

/// One entry under `Actions`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionTarget {
    target: String,
    action_info: String,
    allowable_values: BTreeMap<String, Vec<String>>,
}

impl ActionTarget {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            ..Self::default()
        }
    }

    pub fn with_allowable_values(
        mut self,
        parameter: impl Into<String>,
        values: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.allowable_values
            .insert(parameter.into(), values.into_iter().map(Into::into).collect());
        self
    }

    pub fn target(&self) -> Option<&str> {
        Some(self.target.as_str()).filter(|t| !t.is_empty())
    }

    pub fn action_info(&self) -> Option<&str> {
        Some(self.action_info.as_str()).filter(|t| !t.is_empty())
    }

    pub fn allowable_values(&self, parameter: &str) -> Option<&[String]> {
        self.allowable_values
            .get(parameter)
            .or_else(|| self.allowable_values.get(ANY_PARAMETER))
            .map(Vec::as_slice)
    }

    fn from_value(value: &Value) -> Self {
        let mut action = Self::default();
        let Value::Object(map) = value else {
            return action;
        };
        for (key, value) in map {
            match key.as_str() {
                "target" => action.target = value.as_str().unwrap_or_default().to_string(),
                "@Redfish.ActionInfo" => {
                    action.action_info = value.as_str().unwrap_or_default().to_string()
                }
                "AllowableValues" => {
                    action
                        .allowable_values
                        .insert(ANY_PARAMETER.to_string(), strings(value));
                }
                other => {
                    if let Some(parameter) = other.strip_suffix(ALLOWABLE_SUFFIX) {
                        action
                            .allowable_values
                            .insert(parameter.to_string(), strings(value));
                    }
                }
            }
        }
        action
    }

    fn validate(&self, uri: &str, action: &str, parameters: &Value) -> Result<()> {
        let Value::Object(fields) = parameters else {
            return Ok(());
        };
        for (parameter, value) in fields {
            let (allowed, rendered) = match (self.allowable_values.get(parameter), value) {
                (Some(allowed), Value::String(s)) => (allowed, s.clone()),
                (Some(allowed), Value::Bool(_) | Value::Number(_)) => (allowed, value.to_string()),
                (None, Value::String(s)) => match self.allowable_values.get(ANY_PARAMETER) {
                    Some(allowed) => (allowed, s.clone()),
                    None => continue,
                },
                _ => continue,
            };
            if !allowed.iter().any(|a| a == &rendered) {
                return Err(RedfishError::ActionParameterInvalid {
                    uri: uri.to_string(),
                    action: action.to_string(),
                    parameter: parameter.clone(),
                    value: rendered,
                    allowed: allowed.to_vec(),
                });
            }
        }
        Ok(())
    }
}

fn strings(value: &Value) -> Vec<String> {
    value
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

impl Serialize for ActionTarget {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("target", &self.target)?;
        if !self.action_info.is_empty() {
            map.serialize_entry("@Redfish.ActionInfo", &self.action_info)?;
        }
        for (parameter, values) in &self.allowable_values {
            if parameter == ANY_PARAMETER {
                map.serialize_entry("AllowableValues", values)?;
            } else {
                map.serialize_entry(&format!("{parameter}{ALLOWABLE_SUFFIX}"), values)?;
            }
        }
        map.end()
    }
}

/// Actions advertised by a resource, keyed by their `#Schema.Action` name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Actions(BTreeMap<String, ActionTarget>);

impl Actions {
    pub fn get(&self, name: &str) -> Option<&ActionTarget> {
        self.0.get(name)
    }

    /// Advertised with a non-empty target.
    pub fn supports(&self, name: &str) -> bool {
        self.get(name).and_then(ActionTarget::target).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn insert(&mut self, name: impl Into<String>, target: ActionTarget) {
        self.0.insert(name.into(), target);
    }
}

impl Serialize for Actions {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, target) in &self.0 {
            map.serialize_entry(name, target)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Actions {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let entries = Option::<BTreeMap<String, Value>>::deserialize(deserializer)?;
        let actions = entries
            .unwrap_or_default()
            .into_iter()
            .filter(|(name, _)| name.starts_with('#'))
            .map(|(name, value)| {
                let target = ActionTarget::from_value(&value);
                (name, target)
            })
            .collect();
        Ok(Self(actions))
    }
}

/// Handle on a long-running operation accepted by the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskMonitor {
    pub uri: String,
    pub retry_after: Option<Duration>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskStatus {
    Running { retry_after: Option<Duration> },
    Completed { status: u16, body: Vec<u8> },
}

impl TaskMonitor {
    /// Polls the monitor once. `202` means still running; any other 2xx is
    /// the final result.
    pub async fn poll(&self, client: &Client) -> Result<TaskStatus> {
        let response = client.fetch(&self.uri).await?;
        if response.status == 202 {
            return Ok(TaskStatus::Running {
                retry_after: retry_after(response.header("Retry-After")),
            });
        }
        Ok(TaskStatus::Completed {
            status: response.status,
            body: response.body,
        })
    }
}

fn retry_after(header: Option<&str>) -> Option<Duration> {
    header
        .and_then(|v| v.trim().parse::<u64>().ok())
        .map(Duration::from_secs)
}

/// Result of a successful action POST.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    Completed { status: u16, body: Vec<u8> },
    Accepted(TaskMonitor),
}

impl ActionOutcome {
    /// Decodes the response body for actions that declare an output.
    pub fn output<T: DeserializeOwned>(&self) -> Result<Option<T>> {
        match self {
            Self::Completed { body, .. } if !body.is_empty() => serde_json::from_slice(body)
                .map(Some)
                .map_err(|e| RedfishError::decode("<action output>", &e, body)),
            _ => Ok(None),
        }
    }

    pub fn task(&self) -> Option<&TaskMonitor> {
        match self {
            Self::Accepted(task) => Some(task),
            Self::Completed { .. } => None,
        }
    }
}

impl Entity {
    /// Invokes `action` with a JSON body built from `parameters`.
    pub async fn invoke<P>(&self, action: &str, parameters: &P) -> Result<ActionOutcome>
    where
        P: Serialize + Sync + ?Sized,
    {
        let body = serde_json::to_value(parameters).map_err(|e| RedfishError::Decode {
            uri: self.self_uri().to_string(),
            offset: 0,
            line: 0,
            column: 0,
            message: e.to_string(),
        })?;
        self.dispatch(action, Some(body)).await
    }

    /// Invokes a parameter-less action. No body is sent.
    pub async fn invoke_empty(&self, action: &str) -> Result<ActionOutcome> {
        self.dispatch(action, None).await
    }

    #[tracing::instrument(skip(self, body), fields(uri = %self.self_uri()))]
    async fn dispatch(&self, action: &str, body: Option<Value>) -> Result<ActionOutcome> {
        let declared = self.actions().get(action);
        let Some(target) = declared.and_then(ActionTarget::target) else {
            debug!(action, "Action not advertised");
            return Err(RedfishError::ActionUnsupported {
                uri: self.self_uri().to_string(),
                action: action.to_string(),
            });
        };
        if self.self_uri().is_empty() {
            return Err(RedfishError::MissingSelfUri);
        }
        if let (Some(declared), Some(body)) = (declared, body.as_ref()) {
            declared.validate(target, action, body)?;
        }
        let client = self.client()?;
        let bytes = body.map(|b| b.to_string().into_bytes());
        let response = client.submit(target, bytes, self.etag()).await?;

        info!(action, %target, status = response.status, "Action invoked");
        if response.status == 202 {
            let uri = response
                .header("Location")
                .unwrap_or(target)
                .to_string();
            return Ok(ActionOutcome::Accepted(TaskMonitor {
                uri,
                retry_after: retry_after(response.header("Retry-After")),
            }));
        }
        Ok(ActionOutcome::Completed {
            status: response.status,
            body: response.body,
        })
    }
}

/// Generates `supports_<action>()` predicates for a resource kind.
///
/// ```rust,ignore
/// supported_actions!(Outlet {
///     power_control => "#Outlet.PowerControl",
///     reset_metrics => "#Outlet.ResetMetrics",
/// });
/// assert!(outlet.supports_power_control());
/// ```
#[macro_export]
macro_rules! supported_actions {
    ($kind:ty { $($method:ident => $name:literal),* $(,)? }) => {
        $crate::paste::paste! {
            impl $kind {
                $(
                    #[doc = concat!("Whether the service advertises `", $name, "` with a target.")]
                    pub fn [<supports_ $method>](&self) -> bool {
                        $crate::Resource::entity(self).actions().supports($name)
                    }
                )*
            }
        }
    };
}
