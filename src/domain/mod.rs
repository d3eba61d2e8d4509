// Domain layer: row model and the persistence port.

pub mod model;
pub mod ports;
