//! Open-Meteo forecast client.

use chrono::{NaiveDateTime, Timelike, Utc};
use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::instrument;
use ventwise_core::{UnitSystem, WeatherConfig};

use crate::retry::{send_with_backoff, Backoff};
use crate::types::{HourlyReading, Location, OutdoorWeather, Sky, WeatherError, WeatherReport};

const FORECAST_PATH: &str = "/v1/forecast";
const HOURLY_FIELDS: &str = "relativehumidity_2m,temperature_2m,precipitation_probability";
const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current_weather: CurrentWeatherBlock,
    hourly: HourlyBlock,
}

#[derive(Debug, Deserialize)]
struct CurrentWeatherBlock {
    time: String,
    temperature: f64,
    windspeed: f64,
    winddirection: f64,
    weathercode: i32,
}

#[derive(Debug, Deserialize)]
struct HourlyBlock {
    time: Vec<String>,
    relativehumidity_2m: Vec<Option<f64>>,
    temperature_2m: Vec<Option<f64>>,
    #[serde(default)]
    precipitation_probability: Vec<Option<f64>>,
}

#[derive(Debug, Clone)]
pub struct WeatherProvider {
    client: Arc<Client>,
    base_url: String,
    unit: UnitSystem,
    backoff: Backoff,
}

impl WeatherProvider {
    pub fn new(config: &WeatherConfig, unit: UnitSystem) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client: Arc::new(client),
            base_url: config.api_url.trim_end_matches('/').to_string(),
            unit,
            backoff: Backoff::with_retries(config.max_retries),
        })
    }

    pub fn unit(&self) -> UnitSystem {
        self.unit
    }

    /// Fetch current conditions and today's hourly series for `location`.
    #[instrument(
        skip(self),
        fields(lat = location.latitude, lon = location.longitude),
        level = "info"
    )]
    pub async fn fetch(&self, location: &Location) -> Result<WeatherReport, WeatherError> {
        let url = format!("{}{}", self.base_url, FORECAST_PATH);
        let mut query: Vec<(&str, String)> = vec![
            ("latitude", location.latitude.to_string()),
            ("longitude", location.longitude.to_string()),
            ("hourly", HOURLY_FIELDS.to_string()),
            ("current_weather", "true".to_string()),
            ("timezone", "auto".to_string()),
        ];
        if self.unit == UnitSystem::Imperial {
            query.push(("temperature_unit", "fahrenheit".to_string()));
            query.push(("windspeed_unit", "mph".to_string()));
        }

        tracing::debug!("Requesting forecast from {}", url);
        let response = send_with_backoff(&self.backoff, || {
            self.client.get(&url).query(&query).send()
        })
        .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(WeatherError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: ForecastResponse = response
            .json()
            .await
            .map_err(|e| WeatherError::Parse(e.to_string()))?;

        let report = build_report(body, location.clone(), self.unit)?;
        tracing::info!(
            "Outdoor conditions at {}: {}{} / {}% RH",
            report.location.label(),
            report.current.temperature,
            self.unit.temperature_symbol(),
            report.current.humidity
        );
        Ok(report)
    }
}

fn parse_time(raw: &str) -> Result<NaiveDateTime, WeatherError> {
    NaiveDateTime::parse_from_str(raw, TIME_FORMAT)
        .map_err(|e| WeatherError::Parse(format!("bad timestamp '{}': {}", raw, e)))
}

fn build_report(
    body: ForecastResponse,
    location: Location,
    unit: UnitSystem,
) -> Result<WeatherReport, WeatherError> {
    let current = body.current_weather;
    let hourly = body.hourly;
    let observed_at = parse_time(&current.time)?;

    let times = hourly
        .time
        .iter()
        .map(|t| parse_time(t))
        .collect::<Result<Vec<_>, _>>()?;

    let closest = closest_index(&times, observed_at)
        .ok_or_else(|| WeatherError::Parse("forecast has no hourly entries".to_string()))?;

    let humidity = hourly
        .relativehumidity_2m
        .get(closest)
        .copied()
        .flatten()
        .ok_or_else(|| WeatherError::Parse("outdoor humidity missing from forecast".to_string()))?;

    let precipitation_chance = hourly
        .precipitation_probability
        .get(closest)
        .copied()
        .flatten();

    let today = observed_at.date();
    let hourly_today = times
        .iter()
        .enumerate()
        .filter(|(_, t)| t.date() == today)
        .filter_map(|(i, t)| {
            let humidity = hourly.relativehumidity_2m.get(i).copied().flatten()?;
            let temperature = hourly.temperature_2m.get(i).copied().flatten()?;
            Some(HourlyReading {
                hour: t.hour(),
                temperature,
                humidity,
            })
        })
        .collect();

    Ok(WeatherReport {
        current: OutdoorWeather {
            temperature: current.temperature,
            humidity,
            wind_speed: current.windspeed,
            wind_direction_degrees: current.winddirection,
            precipitation_chance,
            weather_code: current.weathercode,
            sky: Sky::from_wmo_code(current.weathercode),
            observed_at,
        },
        hourly_today,
        location,
        unit,
        fetched_at: Utc::now(),
    })
}

/// Index of the timestamp nearest to `target`; the earliest wins ties.
fn closest_index(times: &[NaiveDateTime], target: NaiveDateTime) -> Option<usize> {
    times
        .iter()
        .enumerate()
        .min_by_key(|(i, t)| ((**t - target).num_seconds().abs(), *i))
        .map(|(i, _)| i)
}
