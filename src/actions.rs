//! Parameter bodies for typed actions.
//!
//! Each struct serializes to the exact JSON body the service expects, e.g.
//! [`PowerControl`] becomes `{"PowerState":"Off"}`.

use serde::{Deserialize, Serialize};

/// Requested power state for `PowerControl` actions on outlets and circuits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionPowerState {
    On,
    Off,
    PowerCycle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PowerControl {
    pub power_state: ActionPowerState,
}

/// Breaker position for `Circuit.BreakerControl`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BreakerControl {
    pub power_state: ActionPowerState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResetType {
    On,
    ForceOff,
    GracefulShutdown,
    GracefulRestart,
    ForceRestart,
    Nmi,
    ForceOn,
    PushPowerButton,
    PowerCycle,
    Suspend,
    Pause,
    Resume,
    FullPowerCycle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Reset {
    pub reset_type: ResetType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResetToDefaultsType {
    ResetAll,
    PreserveNetworkAndUsers,
    PreserveNetwork,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResetToDefaults {
    pub reset_to_defaults_type: ResetToDefaultsType,
}

/// Body of the memory passphrase actions (`SetPassphrase`, `UnlockUnit`,
/// `SecureEraseUnit`, the master passphrase pair, ...).
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Passphrase {
    pub passphrase: String,
    pub region_id: String,
}

impl Passphrase {
    pub fn new(passphrase: impl Into<String>, region_id: impl Into<String>) -> Self {
        Self {
            passphrase: passphrase.into(),
            region_id: region_id.into(),
        }
    }
}

impl std::fmt::Debug for Passphrase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Passphrase")
            .field("passphrase", &"<redacted>")
            .field("region_id", &self.region_id)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ScanMedia {
    pub length: i64,
    pub no_event_log: bool,
    pub physical_address: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct InjectPersistentPoison {
    pub physical_address: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_wire_names() {
        let body = PowerControl {
            power_state: ActionPowerState::Off,
        };
        assert_eq!(serde_json::to_string(&body).unwrap(), r#"{"PowerState":"Off"}"#);

        let scan = ScanMedia {
            length: 4096,
            no_event_log: true,
            physical_address: "0x1000".into(),
        };
        assert_eq!(
            serde_json::to_value(&scan).unwrap(),
            json!({"Length": 4096, "NoEventLog": true, "PhysicalAddress": "0x1000"})
        );

        assert_eq!(
            serde_json::to_value(Passphrase::new("secret", "1")).unwrap(),
            json!({"Passphrase": "secret", "RegionId": "1"})
        );
    }

    #[test]
    fn test_passphrase_is_not_logged() {
        let rendered = format!("{:?}", Passphrase::new("hunter2", "0"));
        assert!(!rendered.contains("hunter2"));
    }
}
