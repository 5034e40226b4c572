use crate::domain::model::DeviceId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NodeError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration field '{field}' is missing")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unknown device type '{device_type}' for device {device_id}")]
    UnknownDeviceType {
        device_id: DeviceId,
        device_type: String,
    },

    #[error("Malformed data stream: {message}")]
    StreamFormatError { message: String },

    #[error("Transmission failed: {message}")]
    TransmissionError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl NodeError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            NodeError::StreamFormatError { .. } => ErrorSeverity::Low,
            NodeError::TransmissionError { .. } => ErrorSeverity::Medium,
            NodeError::ConfigError { .. }
            | NodeError::MissingConfigError { .. }
            | NodeError::InvalidConfigValueError { .. }
            | NodeError::UnknownDeviceType { .. }
            | NodeError::SerializationError(_) => ErrorSeverity::High,
            NodeError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            NodeError::IoError(_) => "Check that the storage medium is mounted and readable",
            NodeError::SerializationError(_) => "Check the configuration document syntax",
            NodeError::ConfigError { .. } | NodeError::MissingConfigError { .. } => {
                "Fix the configuration document and restart the node"
            }
            NodeError::InvalidConfigValueError { .. } => {
                "Correct the offending field in the configuration document"
            }
            NodeError::UnknownDeviceType { .. } => {
                "Use a registered device type or register a builder for it"
            }
            NodeError::StreamFormatError { .. } => {
                "Make sure the stream uses the ',' ':' ';' discriminator grammar"
            }
            NodeError::TransmissionError { .. } => "Check the transmission medium; the next cycle will retry",
        }
    }
}

pub type Result<T> = std::result::Result<T, NodeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_errors_are_high_severity() {
        let err = NodeError::UnknownDeviceType {
            device_id: 3,
            device_type: "BME280".to_string(),
        };
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert_eq!(
            err.to_string(),
            "Unknown device type 'BME280' for device 3"
        );
    }

    #[test]
    fn test_io_errors_are_critical() {
        let err = NodeError::from(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "no card",
        ));
        assert_eq!(err.severity(), ErrorSeverity::Critical);
    }
}
