#[cfg(feature = "cli")]
pub mod cli;

use crate::domain::model::{DeviceId, ModuleId};
use crate::domain::ports::ConfigSource;
use crate::utils::error::{NodeError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default location of the configuration document on the node's storage.
pub const DEFAULT_CONFIG_FILE: &str = "CubeSatConfig.json";

pub const DEFAULT_REFRESH_INTERVAL_MS: u64 = 1000;

/// The node configuration document.
///
/// ```json
/// { "id": 7, "isHub": false, "devices": [{ "id": 1, "deviceType": "MS8607" }] }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeConfig {
    pub id: ModuleId,
    #[serde(default)]
    pub is_hub: bool,
    #[serde(default)]
    pub devices: Vec<DeviceDescriptor>,
    pub telemetry: Option<TelemetryConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceDescriptor {
    pub id: DeviceId,
    pub device_type: String,
    /// Variant-specific settings handed to the device's `initialize`.
    #[serde(default)]
    pub settings: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TelemetryConfig {
    pub refresh_interval_ms: Option<u64>,
    pub output_path: Option<String>,
}

impl NodeConfig {
    /// Loads the document, choosing TOML for `.toml` files and JSON otherwise.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml_str(&content),
            _ => Self::from_json_str(&content),
        }
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let processed = Self::substitute_env_vars(content)?;
        Ok(serde_json::from_str(&processed)?)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = Self::substitute_env_vars(content)?;
        toml::from_str(&processed).map_err(|e| NodeError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are left as is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| NodeError::ConfigError {
            message: format!("environment substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn refresh_interval_ms(&self) -> u64 {
        self.telemetry
            .as_ref()
            .and_then(|t| t.refresh_interval_ms)
            .unwrap_or(DEFAULT_REFRESH_INTERVAL_MS)
    }

    pub fn output_path(&self) -> Option<&str> {
        self.telemetry.as_ref().and_then(|t| t.output_path.as_deref())
    }
}

impl Validate for NodeConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_range("id", self.id, 0, ModuleId::MAX)?;

        for (index, device) in self.devices.iter().enumerate() {
            let field = format!("devices[{}]", index);
            validation::validate_range(&format!("{}.id", field), device.id, 0, DeviceId::MAX)?;
            validation::validate_non_empty_string(&format!("{}.deviceType", field), &device.device_type)?;
            validation::validate_no_discriminators(&format!("{}.deviceType", field), &device.device_type)?;
        }
        validation::validate_unique("devices.id", self.devices.iter().map(|d| d.id))?;

        if let Some(telemetry) = &self.telemetry {
            if let Some(interval) = telemetry.refresh_interval_ms {
                validation::validate_positive_number("telemetry.refreshIntervalMs", interval, 1)?;
            }
            if let Some(path) = &telemetry.output_path {
                validation::validate_path("telemetry.outputPath", path)?;
            }
        }

        Ok(())
    }
}

/// Reads the configuration document from a file on local storage.
#[derive(Debug, Clone)]
pub struct FileConfigSource {
    path: PathBuf,
}

impl FileConfigSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigSource for FileConfigSource {
    fn load_config(&self) -> Result<NodeConfig> {
        tracing::debug!("Loading configuration from {}", self.path.display());
        NodeConfig::from_file(&self.path)
    }
}
