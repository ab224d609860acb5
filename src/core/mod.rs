pub mod controller;
pub mod info_window;
pub mod markers;
pub mod settings;

pub use crate::domain::model::{LatLng, Marker, MarkerId, Viewport};
pub use crate::domain::place::{PlaceCategory, SearchRequest};
pub use crate::domain::ports::{MapSurface, PlacesProvider};
pub use crate::utils::error::Result;
