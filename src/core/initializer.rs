use crate::config::NodeConfig;
use crate::core::device::Device;
use crate::core::hub::Hub;
use crate::core::module::Module;
use crate::domain::ports::{ConfigSource, DeviceBuilder, FaultIndicator};
use crate::utils::error::{NodeError, Result};
use crate::utils::validation::Validate;

/// Builds the node's module from its configuration document.
///
/// Any failure here is fatal for the node: the fault indicator is signalled
/// before the error is returned.
pub struct NodeInitializer<C: ConfigSource, B: DeviceBuilder, F: FaultIndicator> {
    config: C,
    builder: B,
    fault: F,
}

impl<C: ConfigSource, B: DeviceBuilder, F: FaultIndicator> NodeInitializer<C, B, F> {
    pub fn new(config: C, builder: B, fault: F) -> Self {
        Self {
            config,
            builder,
            fault,
        }
    }

    pub fn initialize(&self) -> Result<Module> {
        self.initialize_with_config().map(|(_, module)| module)
    }

    /// Like [`initialize`](Self::initialize), also handing back the loaded document.
    pub fn initialize_with_config(&self) -> Result<(NodeConfig, Module)> {
        self.load_config()
            .and_then(|config| {
                let module = self.build_module(&config)?;
                Ok((config, module))
            })
            .inspect_err(|e| self.fault.signal(e))
    }

    pub fn load_config(&self) -> Result<NodeConfig> {
        let config = self.config.load_config()?;
        config.validate()?;
        Ok(config)
    }

    /// Builds every configured device, in document order.
    ///
    /// A device whose hardware does not come up starts offline; an unknown
    /// device type fails the whole build.
    pub fn build_module(&self, config: &NodeConfig) -> Result<Module> {
        let devices = config
            .devices
            .iter()
            .map(|descriptor| {
                let mut device: Device = self.builder.build(descriptor).ok_or_else(|| {
                    NodeError::UnknownDeviceType {
                        device_id: descriptor.id,
                        device_type: descriptor.device_type.clone(),
                    }
                })?;
                device.initialize(&descriptor.settings);
                Ok(device)
            })
            .collect::<Result<Vec<_>>>()?;

        let module = if config.is_hub {
            Hub::new(config.id, devices).into_module()
        } else {
            Module::new(false, config.id, devices)
        };

        tracing::info!(
            module_id = module.module_id(),
            is_hub = module.check_is_hub(),
            devices = module.devices().len(),
            online = module.online_devices(),
            "module initialized"
        );
        Ok(module)
    }
}
