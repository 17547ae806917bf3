//! Weather service for Ventwise
//!
//! Current outdoor conditions and today's hourly series via the Open-Meteo
//! API, plus city search and reverse geocoding via Nominatim.

pub mod geocode;
pub mod location;
pub mod provider;
pub mod retry;
pub mod types;

pub use geocode::Geocoder;
pub use location::{resolve_location, LocationQuery};
pub use provider::WeatherProvider;
pub use types::*;
