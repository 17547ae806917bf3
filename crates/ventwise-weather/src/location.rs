//! Which place to fetch weather for.

use crate::geocode::Geocoder;
use crate::types::{Location, LocationError, WeatherError};
use ventwise_core::LocationConfig;

#[derive(Debug, Clone, PartialEq)]
pub enum LocationQuery {
    /// Explicit coordinates; a place name is looked up for display.
    Coordinates { latitude: f64, longitude: f64 },
    /// City name, resolved to the best search match.
    City(String),
    /// The location saved in the configuration.
    Configured,
}

pub async fn resolve_location(
    query: &LocationQuery,
    configured: &LocationConfig,
    geocoder: &Geocoder,
) -> Result<Location, WeatherError> {
    match query {
        LocationQuery::Coordinates {
            latitude,
            longitude,
        } => {
            let mut location = Location::new(*latitude, *longitude)?;
            location.city_name = geocoder.reverse(&location).await;
            Ok(location)
        }
        LocationQuery::City(name) => {
            let best = geocoder
                .search(name)
                .await
                .into_iter()
                .next()
                .ok_or_else(|| LocationError::NotFound(name.clone()))?;
            tracing::info!("Resolved '{}' to {}", name, best.name);
            Ok(Location::from(best))
        }
        LocationQuery::Configured => Ok(Location::from(configured)),
    }
}
