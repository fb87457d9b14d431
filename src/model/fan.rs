use super::Chassis;
use crate::common::{SensorExcerpt, SensorFanExcerpt, Status};
use redfish_core::{
    nullable, writable_fields, Batch, Entity, LinkArray, Resource, Result, WritableField,
};
use serde::{Deserialize, Serialize};

/// A cooling fan. Only the locator LED can be changed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Fan {
    #[serde(skip)]
    entity: Entity,

    pub fan_diameter_mm: Option<u32>,
    pub hot_pluggable: Option<bool>,
    pub location_indicator_active: Option<bool>,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub part_number: Option<String>,
    pub physical_context: Option<String>,
    pub power_watts: Option<SensorExcerpt>,
    #[serde(rename = "RatedSpeedRPM")]
    pub rated_speed_rpm: Option<u32>,
    pub replaceable: Option<bool>,
    pub serial_number: Option<String>,
    pub spare_part_number: Option<String>,
    pub speed_percent: Option<SensorFanExcerpt>,
    pub status: Option<Status>,

    #[serde(default, deserialize_with = "nullable")]
    links: FanLinks,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
struct FanLinks {
    cooling_chassis: LinkArray,
}

impl Resource for Fan {
    const KIND: &'static str = "Fan";

    fn entity(&self) -> &Entity {
        &self.entity
    }

    fn entity_mut(&mut self) -> &mut Entity {
        &mut self.entity
    }

    fn writable_fields() -> &'static [WritableField<Self>] {
        writable_fields!(Fan {
            "LocationIndicatorActive" => value(location_indicator_active),
        })
    }
}

impl Fan {
    /// Chassis cooled by this fan.
    pub async fn cooling_chassis(&self) -> Result<Batch<Chassis>> {
        self.entity.follow_all(&self.links.cooling_chassis).await
    }
}
