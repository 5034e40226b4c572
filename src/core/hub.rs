use crate::core::device::Device;
use crate::core::module::Module;
use crate::domain::model::ModuleId;
use std::ops::{Deref, DerefMut};

/// A module carrying the hub role.
///
/// Aggregation is identical to [`Module`]; the flag only tells the
/// transmission side that this node also relays streams from its peers.
#[derive(Debug)]
pub struct Hub(Module);

impl Hub {
    pub fn new(module_id: ModuleId, devices: Vec<Device>) -> Self {
        Self(Module::new(true, module_id, devices))
    }

    pub fn into_module(self) -> Module {
        self.0
    }
}

impl Deref for Hub {
    type Target = Module;

    fn deref(&self) -> &Module {
        &self.0
    }
}

impl DerefMut for Hub {
    fn deref_mut(&mut self) -> &mut Module {
        &mut self.0
    }
}

impl From<Hub> for Module {
    fn from(hub: Hub) -> Self {
        hub.into_module()
    }
}
