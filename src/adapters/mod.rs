// Adapters layer: concrete implementations of the domain ports.

pub mod places_http;
pub mod surface;
