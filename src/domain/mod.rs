// Domain layer: form number models and ports. No I/O here.

pub mod model;
pub mod ports;
