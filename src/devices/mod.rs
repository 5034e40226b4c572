//! Concrete sensor variants and the registry that builds them from
//! configuration tags.

pub mod ms8607;

use crate::config::DeviceDescriptor;
use crate::core::device::Device;
use crate::domain::model::DeviceId;
use crate::domain::ports::{DeviceBuilder, Sensor};
use std::collections::HashMap;

type SensorFactory = Box<dyn Fn(DeviceId) -> Box<dyn Sensor> + Send + Sync>;

/// Lookup table from device type tag to sensor factory.
pub struct DeviceRegistry {
    factories: HashMap<String, SensorFactory>,
}

impl DeviceRegistry {
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Registry with every built-in variant.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(ms8607::DEVICE_TYPE, |_| {
            Box::new(ms8607::Ms8607::new(ms8607::SimulatedMs8607::default()))
        });
        registry
    }

    /// Adds or replaces the factory for `device_type`.
    pub fn register<F>(&mut self, device_type: impl Into<String>, factory: F) -> &mut Self
    where
        F: Fn(DeviceId) -> Box<dyn Sensor> + Send + Sync + 'static,
    {
        self.factories.insert(device_type.into(), Box::new(factory));
        self
    }

    pub fn supports(&self, device_type: &str) -> bool {
        self.factories.contains_key(device_type)
    }

    pub fn device_types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        types.sort_unstable();
        types
    }
}

impl Default for DeviceRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl DeviceBuilder for DeviceRegistry {
    fn build(&self, descriptor: &DeviceDescriptor) -> Option<Device> {
        let factory = self.factories.get(&descriptor.device_type)?;
        Some(Device::new(
            descriptor.id,
            descriptor.device_type.clone(),
            factory(descriptor.id),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(id: DeviceId, device_type: &str) -> DeviceDescriptor {
        DeviceDescriptor {
            id,
            device_type: device_type.to_string(),
            settings: serde_json::Value::Null,
        }
    }

    #[test]
    fn test_builds_registered_type() {
        let registry = DeviceRegistry::with_defaults();
        let device = registry.build(&descriptor(3, "MS8607")).unwrap();
        assert_eq!(device.device_id(), 3);
        assert_eq!(device.device_type(), "MS8607");
        assert!(device.status());
    }

    #[test]
    fn test_unknown_type_is_none() {
        let registry = DeviceRegistry::with_defaults();
        assert!(registry.build(&descriptor(1, "BME280")).is_none());
        assert!(!registry.supports("BME280"));
        assert_eq!(registry.device_types(), vec!["MS8607"]);
    }
}
