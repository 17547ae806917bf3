//! City search and reverse geocoding via Nominatim (OpenStreetMap).
//! Free, no API key; requires an identifying User-Agent.

use crate::retry::{send_with_backoff, Backoff};
use crate::types::{CityMatch, Location, WeatherError};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::instrument;
use ventwise_core::GeocodingConfig;

const REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Deserialize)]
struct ReverseResponse {
    address: Option<NominatimAddress>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    lat: String,
    lon: String,
    display_name: Option<String>,
    address: Option<NominatimAddress>,
}

#[derive(Debug, Clone, Deserialize)]
struct NominatimAddress {
    city: Option<String>,
    town: Option<String>,
    village: Option<String>,
    municipality: Option<String>,
    state_district: Option<String>,
    state: Option<String>,
    county: Option<String>,
    country: Option<String>,
}

impl NominatimAddress {
    /// "Place, State" (or "Place, Country"), e.g. "Seattle, Washington".
    fn place_name(self) -> Option<String> {
        let state = self.state.clone();
        let country = self.country.clone();

        // Prefer city > town > village > municipality for the primary place name
        let place = self
            .city
            .or(self.town)
            .or(self.village)
            .or(self.municipality)
            .or(self.state_district)
            .or(self.county)
            .or(self.state)
            .or(self.country)?;

        let suffix = state
            .filter(|s| !s.is_empty() && *s != place)
            .or_else(|| country.filter(|c| !c.is_empty() && *c != place));

        Some(match suffix {
            Some(s) => format!("{}, {}", place, s),
            None => place,
        })
    }
}

#[derive(Debug, Clone)]
pub struct Geocoder {
    client: Client,
    search_url: String,
    reverse_url: String,
    result_limit: u32,
    backoff: Backoff,
}

impl Geocoder {
    pub fn new(config: &GeocodingConfig) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            client,
            search_url: config.search_url.clone(),
            reverse_url: config.reverse_url.clone(),
            result_limit: config.result_limit,
            backoff: Backoff::with_retries(1),
        })
    }

    /// Search cities matching `query`, best match first.
    ///
    /// A blank query returns nothing without hitting the network. Service
    /// failures are logged and also come back as an empty list.
    #[instrument(skip(self), level = "info")]
    pub async fn search(&self, query: &str) -> Vec<CityMatch> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }

        match self.fetch_matches(query).await {
            Ok(matches) => {
                tracing::debug!("City search '{}' returned {} matches", query, matches.len());
                matches
            }
            Err(e) => {
                tracing::warn!("City search '{}' failed: {}", query, e);
                Vec::new()
            }
        }
    }

    async fn fetch_matches(&self, query: &str) -> Result<Vec<CityMatch>, WeatherError> {
        let params = [
            ("q", query.to_string()),
            ("format", "json".to_string()),
            ("addressdetails", "1".to_string()),
            ("featuretype", "city".to_string()),
            ("limit", self.result_limit.to_string()),
        ];

        let response = send_with_backoff(&self.backoff, || {
            self.client.get(&self.search_url).query(&params).send()
        })
        .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(WeatherError::Api {
                status: status.as_u16(),
                message: response.text().await.unwrap_or_default(),
            });
        }

        let results: Vec<SearchResult> = response
            .json()
            .await
            .map_err(|e| WeatherError::Parse(e.to_string()))?;

        Ok(results.into_iter().filter_map(to_city_match).collect())
    }

    /// Reverse geocode coordinates to a human-readable place name (e.g. "Seattle, Washington").
    /// Returns `None` on failure or timeout; the caller can fall back to coordinates.
    #[instrument(
        skip(self),
        fields(lat = location.latitude, lon = location.longitude),
        level = "info"
    )]
    pub async fn reverse(&self, location: &Location) -> Option<String> {
        if location.city_name.is_some() {
            return location.city_name.clone();
        }

        let params = [
            ("lat", location.latitude.to_string()),
            ("lon", location.longitude.to_string()),
            ("format", "json".to_string()),
            ("addressdetails", "1".to_string()),
            ("zoom", "10".to_string()),
        ];

        let response = match self.client.get(&self.reverse_url).query(&params).send().await {
            Ok(r) => r,
            Err(e) => {
                tracing::debug!("Reverse geocode request failed: {}", e);
                return None;
            }
        };

        if !response.status().is_success() {
            tracing::debug!("Reverse geocode returned status {}", response.status());
            return None;
        }

        let body: ReverseResponse = match response.json().await {
            Ok(b) => b,
            Err(e) => {
                tracing::debug!("Reverse geocode parse error: {}", e);
                return None;
            }
        };

        let result = body.address?.place_name()?;
        tracing::info!("Reverse geocoded to: {}", result);
        Some(result)
    }
}

fn to_city_match(result: SearchResult) -> Option<CityMatch> {
    let latitude: f64 = result.lat.parse().ok()?;
    let longitude: f64 = result.lon.parse().ok()?;
    let name = result
        .address
        .and_then(NominatimAddress::place_name)
        .or(result.display_name)?;

    Some(CityMatch {
        name,
        latitude,
        longitude,
    })
}
