pub mod codec;
pub mod device;
pub mod discriminators;
pub mod engine;
pub mod hub;
pub mod initializer;
pub mod module;

pub use crate::domain::model::{DeviceId, DeviceRecord, ModuleId, ModuleRecord};
pub use crate::domain::ports::{
    ConfigSource, DeviceBuilder, FaultIndicator, Sensor, SensorError, Transmitter,
};
pub use crate::utils::error::Result;
