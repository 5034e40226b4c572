use serde::{Deserialize, Serialize};

pub type ModuleId = i32;
pub type DeviceId = i32;

/// One device contribution decoded from a module stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceRecord {
    pub device_id: DeviceId,
    pub datums: Vec<String>,
}

/// A module stream decoded back into its parts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleRecord {
    pub module_id: ModuleId,
    pub devices: Vec<DeviceRecord>,
}
