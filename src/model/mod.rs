//! Resource kinds.
//!
//! Each kind is a plain struct with public, PascalCase-mapped properties, a
//! private companion record for its `Links`, typed accessors that resolve
//! those links on demand, and typed action methods. The shared machinery
//! (decode, diff, dispatch, enumeration) comes from [`redfish_core`].

mod chassis;
mod circuit;
mod cooling_loop;
mod environment_metrics;
mod facility;
mod fan;
mod log_entry;
mod log_service;
mod manager;
mod memory;
mod outlet;
mod power_distribution;
mod power_equipment;
mod power_supply;
mod service_root;
mod thermal_equipment;
mod thermal_subsystem;

pub use chassis::Chassis;
pub use circuit::Circuit;
pub use cooling_loop::{Coolant, CoolingLoop, CoolingLoopType};
pub use environment_metrics::EnvironmentMetrics;
pub use facility::Facility;
pub use fan::Fan;
pub use log_entry::LogEntry;
pub use log_service::{AutoClearResolvedEntries, LogService};
pub use manager::Manager;
pub use memory::{Memory, SecurityState};
pub use outlet::Outlet;
pub use power_distribution::{PowerDistribution, TransferConfiguration};
pub use power_equipment::PowerEquipment;
pub use power_supply::PowerSupply;
pub use service_root::ServiceRoot;
pub use thermal_equipment::ThermalEquipment;
pub use thermal_subsystem::ThermalSubsystem;
