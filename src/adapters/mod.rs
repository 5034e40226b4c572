// Adapters layer: concrete implementations of the domain ports for a host build.

pub mod fault;
pub mod transmit;

pub use fault::LogFaultIndicator;
pub use transmit::{FileTransmitter, StdoutTransmitter};
