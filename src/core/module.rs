use crate::core::device::Device;
use crate::core::discriminators::Discriminators;
use crate::domain::model::{DeviceId, ModuleId};

/// A node's aggregation unit.
///
/// Exclusively owns its devices in insertion order; that order is the order
/// of contributions in every stream it produces.
#[derive(Debug)]
pub struct Module {
    module_id: ModuleId,
    is_hub: bool,
    devices: Vec<Device>,
    data_stream: String,
}

impl Module {
    pub fn new(is_hub: bool, module_id: ModuleId, devices: Vec<Device>) -> Self {
        Self {
            module_id,
            is_hub,
            devices,
            data_stream: String::new(),
        }
    }

    /// Recomputes the module stream from scratch and returns it.
    ///
    /// Offline devices are skipped without leaving a placeholder. A device
    /// whose read fails is taken offline and contributes nothing; the cycle
    /// always completes.
    pub fn refresh_data_stream(&mut self) -> &str {
        let mut stream = self.module_id.to_string();
        stream.push(Discriminators::DEVICE);

        let mut contributed = 0usize;
        for device in self.devices.iter_mut().filter(|d| d.status()) {
            let device_id = device.device_id();
            match device.refresh_data_stream() {
                Ok(fragment) => {
                    stream.push_str(&device_id.to_string());
                    stream.push(Discriminators::DEVICE);
                    stream.push_str(fragment);
                    contributed += 1;
                }
                Err(e) => {
                    tracing::warn!(
                        module_id = self.module_id,
                        device_id,
                        device_type = %device.device_type(),
                        error = %e,
                        "device dropped from stream and marked offline"
                    );
                }
            }
        }

        stream.push(Discriminators::MODULE);
        tracing::debug!(
            module_id = self.module_id,
            contributed,
            total = self.devices.len(),
            "module stream refreshed"
        );

        self.data_stream = stream;
        &self.data_stream
    }

    pub fn data_stream(&self) -> &str {
        &self.data_stream
    }

    pub fn module_id(&self) -> ModuleId {
        self.module_id
    }

    pub fn check_is_hub(&self) -> bool {
        self.is_hub
    }

    pub fn devices(&self) -> &[Device] {
        &self.devices
    }

    /// Explicit access for re-enabling or reconfiguring one device.
    pub fn device_mut(&mut self, device_id: DeviceId) -> Option<&mut Device> {
        self.devices.iter_mut().find(|d| d.device_id() == device_id)
    }

    pub fn online_devices(&self) -> usize {
        self.devices.iter().filter(|d| d.status()).count()
    }
}
