//! MS8607 temperature / pressure / humidity sensor.
//!
//! The register-level bus handling lives behind [`Ms8607Driver`]; this
//! variant only applies the resolution settings and encodes the three
//! values as one datum list.

use crate::core::codec::encode_datums;
use crate::domain::ports::{Sensor, SensorError};
use serde::{Deserialize, Serialize};

pub const DEVICE_TYPE: &str = "MS8607";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HumidityResolution {
    #[serde(rename = "OSR_12b")]
    Osr12b,
    #[serde(rename = "OSR_11b")]
    Osr11b,
    #[serde(rename = "OSR_10b")]
    Osr10b,
    #[default]
    #[serde(rename = "OSR_8b")]
    Osr8b,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PressureResolution {
    #[serde(rename = "OSR_256")]
    Osr256,
    #[serde(rename = "OSR_512")]
    Osr512,
    #[serde(rename = "OSR_1024")]
    Osr1024,
    #[serde(rename = "OSR_2048")]
    Osr2048,
    #[default]
    #[serde(rename = "OSR_4096")]
    Osr4096,
    #[serde(rename = "OSR_8192")]
    Osr8192,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Ms8607Config {
    pub humidity_resolution: HumidityResolution,
    pub pressure_resolution: PressureResolution,
}

impl Ms8607Config {
    pub fn from_settings(settings: &serde_json::Value) -> Result<Self, SensorError> {
        if settings.is_null() {
            return Ok(Self::default());
        }
        Self::deserialize(settings).map_err(|e| SensorError::InvalidSettings(e.to_string()))
    }
}

/// One combined measurement: degrees C, hPa, %RH.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ms8607Event {
    pub temperature: f64,
    pub pressure: f64,
    pub relative_humidity: f64,
}

/// Bus-level access to the physical chip.
pub trait Ms8607Driver: Send {
    /// Probes and resets the chip; `false` when it does not answer.
    fn begin(&mut self) -> bool;
    fn set_humidity_resolution(&mut self, resolution: HumidityResolution);
    fn set_pressure_resolution(&mut self, resolution: PressureResolution);
    fn get_event(&mut self) -> Result<Ms8607Event, SensorError>;
}

pub struct Ms8607<D: Ms8607Driver> {
    driver: D,
    config: Ms8607Config,
    initialized: bool,
}

impl<D: Ms8607Driver> Ms8607<D> {
    pub fn new(driver: D) -> Self {
        Self {
            driver,
            config: Ms8607Config::default(),
            initialized: false,
        }
    }

    pub fn config(&self) -> Ms8607Config {
        self.config
    }
}

impl<D: Ms8607Driver> Sensor for Ms8607<D> {
    fn initialize(&mut self, settings: &serde_json::Value) -> Result<(), SensorError> {
        let config = Ms8607Config::from_settings(settings)?;

        self.initialized = self.driver.begin();
        if !self.initialized {
            return Err(SensorError::InitFailed("MS8607 did not respond".to_string()));
        }
        self.driver.set_humidity_resolution(config.humidity_resolution);
        self.driver.set_pressure_resolution(config.pressure_resolution);
        self.config = config;
        Ok(())
    }

    fn read_sensor(&mut self) -> Result<String, SensorError> {
        if !self.initialized {
            return Err(SensorError::NotInitialized);
        }
        let event = self.driver.get_event()?;
        let values = [event.temperature, event.pressure, event.relative_humidity];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(SensorError::ReadFailed("non-finite value from MS8607".to_string()));
        }
        Ok(encode_datums(values.iter().map(|v| format!("{:.6}", v))))
    }
}

/// Host-side stand-in for the chip; always answers with the same event.
#[derive(Debug, Clone)]
pub struct SimulatedMs8607 {
    pub event: Ms8607Event,
    pub humidity_resolution: Option<HumidityResolution>,
    pub pressure_resolution: Option<PressureResolution>,
}

impl Default for SimulatedMs8607 {
    fn default() -> Self {
        Self {
            event: Ms8607Event {
                temperature: 21.5,
                pressure: 1013.25,
                relative_humidity: 40.0,
            },
            humidity_resolution: None,
            pressure_resolution: None,
        }
    }
}

impl Ms8607Driver for SimulatedMs8607 {
    fn begin(&mut self) -> bool {
        true
    }

    fn set_humidity_resolution(&mut self, resolution: HumidityResolution) {
        self.humidity_resolution = Some(resolution);
    }

    fn set_pressure_resolution(&mut self, resolution: PressureResolution) {
        self.pressure_resolution = Some(resolution);
    }

    fn get_event(&mut self) -> Result<Ms8607Event, SensorError> {
        Ok(self.event)
    }
}
