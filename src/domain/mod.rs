// Domain layer: identifiers, decoded records and the ports (collaborator traits) the core depends on.

pub mod model;
pub mod ports;
