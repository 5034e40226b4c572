use crate::config::{DeviceDescriptor, NodeConfig};
use crate::core::device::Device;
use crate::utils::error::{NodeError, Result};
use async_trait::async_trait;
use thiserror::Error;

/// Failure of a single physical read or hardware setup.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SensorError {
    #[error("sensor not initialized")]
    NotInitialized,

    #[error("hardware initialization failed: {0}")]
    InitFailed(String),

    #[error("read failed: {0}")]
    ReadFailed(String),

    #[error("invalid settings: {0}")]
    InvalidSettings(String),

    #[error("reading '{reading}' contains a stream discriminator")]
    MalformedReading { reading: String },

    #[error("sensor driver panicked: {0}")]
    Panicked(String),
}

/// Capability set every concrete sensor variant implements.
///
/// `read_sensor` returns zero or more datums joined by the datum
/// discriminator, e.g. `"20.500000,101.300000,55.000000"`.
pub trait Sensor: Send {
    /// Configures the transducer. Called once at build time, and again on
    /// reconfiguration. `settings` is `Value::Null` when the descriptor has none.
    fn initialize(&mut self, settings: &serde_json::Value) -> std::result::Result<(), SensorError>;

    fn read_sensor(&mut self) -> std::result::Result<String, SensorError>;
}

/// Supplies the node configuration document.
pub trait ConfigSource {
    fn load_config(&self) -> Result<NodeConfig>;
}

/// Maps a device type tag to a concrete device; `None` for an unknown tag.
pub trait DeviceBuilder {
    fn build(&self, descriptor: &DeviceDescriptor) -> Option<Device>;
}

/// Consumes finished module streams.
#[async_trait]
pub trait Transmitter: Send + Sync {
    async fn transmit(&self, stream: &str, is_hub: bool) -> Result<()>;
}

#[async_trait]
impl<T: Transmitter + ?Sized> Transmitter for Box<T> {
    async fn transmit(&self, stream: &str, is_hub: bool) -> Result<()> {
        (**self).transmit(stream, is_hub).await
    }
}

/// Escalation path for unrecoverable setup failures.
pub trait FaultIndicator {
    fn signal(&self, error: &NodeError);
}
