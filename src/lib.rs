pub mod adapters;
pub mod config;
pub mod core;
pub mod devices;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::{FileTransmitter, LogFaultIndicator, StdoutTransmitter};
pub use config::{FileConfigSource, NodeConfig};
pub use crate::core::{
    device::Device, engine::TelemetryEngine, hub::Hub, initializer::NodeInitializer,
    module::Module,
};
pub use devices::DeviceRegistry;
pub use utils::error::{NodeError, Result};
