// Domain layer: option/rate models and the ports to the three remote services.

pub mod model;
pub mod ports;
