// Domain layer: map models, place records and the ports the controller drives.

pub mod model;
pub mod place;
pub mod ports;
