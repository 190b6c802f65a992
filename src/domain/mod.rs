// Domain layer: order and inventory models plus the ports the pipeline talks through.

pub mod inventory;
pub mod model;
pub mod ports;
