pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{places_http::GooglePlacesClient, surface::RecordingSurface};
pub use config::MapConfig;
pub use core::controller::{MapController, SearchOutcome, SearchTicket};
pub use core::settings::MapSettings;
pub use domain::place::PlaceCategory;
pub use utils::error::{MapError, Result};
