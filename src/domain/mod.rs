// Domain layer: profile-independent models and the collaborator port.

pub mod model;
pub mod ports;
