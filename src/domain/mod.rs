// Domain layer: business records, map payloads and the ports the renderer depends on.

pub mod model;
pub mod ports;
