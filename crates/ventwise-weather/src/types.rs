use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use ventwise_core::{LocationConfig, UnitSystem};

/// Broad sky category for a WMO code, coarser than [`wmo_code_description`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sky {
    Clear,
    Cloudy,
    Fog,
    Rain,
    Snow,
    Thunderstorm,
    Unknown,
}

impl Sky {
    pub fn from_wmo_code(code: i32) -> Self {
        match code {
            0 | 1 => Self::Clear,
            2 | 3 => Self::Cloudy,
            45..=48 => Self::Fog,
            51..=67 | 80..=82 => Self::Rain,
            71..=77 | 85 | 86 => Self::Snow,
            95..=99 => Self::Thunderstorm,
            _ => Self::Unknown,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Clear => "clear",
            Self::Cloudy => "cloudy",
            Self::Fog => "fog",
            Self::Rain => "rain",
            Self::Snow => "snow",
            Self::Thunderstorm => "storm",
            Self::Unknown => "unknown",
        }
    }
}

/// Exact WMO code description, "Unknown" for codes Open-Meteo doesn't emit.
pub fn wmo_code_description(code: i32) -> &'static str {
    match code {
        0 => "Clear sky",
        1 => "Mainly clear",
        2 => "Partly cloudy",
        3 => "Overcast",
        45 => "Fog",
        48 => "Depositing rime fog",
        51 => "Light drizzle",
        53 => "Moderate drizzle",
        55 => "Dense drizzle",
        56 => "Light freezing drizzle",
        57 => "Dense freezing drizzle",
        61 => "Slight rain",
        63 => "Moderate rain",
        65 => "Heavy rain",
        66 => "Light freezing rain",
        67 => "Heavy freezing rain",
        71 => "Slight snow fall",
        73 => "Moderate snow fall",
        75 => "Heavy snow fall",
        77 => "Snow grains",
        80 => "Slight rain showers",
        81 => "Moderate rain showers",
        82 => "Violent rain showers",
        85 => "Slight snow showers",
        86 => "Heavy snow showers",
        95 => "Thunderstorm",
        96 => "Thunderstorm with slight hail",
        99 => "Thunderstorm with heavy hail",
        _ => "Unknown",
    }
}

/// One-line summary for a WMO code that embeds a humidity label
/// ("Low", "Very High", ...).
pub fn weather_sentence(code: i32, humidity_label: &str) -> String {
    let h = humidity_label.to_lowercase();
    match code {
        0 => format!(
            "It's a clear and sunny day with {h} humidity. Perfect for outdoor activities!"
        ),
        1 => format!("Mostly clear skies today with {h} humidity. Enjoy the sunshine!"),
        2 => format!("Partly cloudy skies with {h} humidity. A great day for a walk."),
        3 => format!("Overcast conditions with {h} humidity. Might feel a bit chilly."),
        45 => format!("Foggy morning with {h} humidity. Drive safely!"),
        48 => format!("Depositing rime fog is present with {h} humidity. Visibility is reduced."),
        51 => format!("Light drizzle falling with {h} humidity. You might need an umbrella."),
        53 => format!("Moderate drizzle making it a bit damp outside. Humidity is {h}."),
        55 => format!("Dense drizzle causing reduced visibility. Humidity levels are {h}."),
        56 => format!("Light freezing drizzle occurring with {h} humidity. Be cautious!"),
        57 => format!("Dense freezing drizzle making roads slippery. Humidity stands at {h}."),
        61 => format!(
            "Slight rain is falling with {h} humidity. A good day for indoor activities."
        ),
        63 => format!(
            "Moderate rain expected today. Don't forget your raincoat! Humidity is {h}."
        ),
        65 => format!("Heavy rain pouring down with {h} humidity. Stay dry and safe!"),
        66 => format!("Light freezing rain making surfaces icy. Humidity is around {h}."),
        67 => format!("Heavy freezing rain causing hazardous conditions. Humidity stands at {h}."),
        71 => format!(
            "Slight snow beginning to fall. Enjoy the winter scenery! Humidity is at {h}."
        ),
        73 => format!("Moderate snow accumulating on the ground with {h} humidity."),
        75 => format!(
            "Heavy snow falling. Stay warm and indoors if possible! Humidity levels are {h}."
        ),
        77 => format!("Snow grains present with {h} humidity. It's lightly snowing."),
        80 => format!("Slight rain showers passing by. Humidity is {h}."),
        81 => format!("Moderate rain showers on the way. Humidity levels are {h}."),
        82 => format!("Violent rain showers causing disruptions. Humidity stands at {h}."),
        85 => format!("Slight snow showers dusting the area. Humidity is around {h}."),
        86 => format!("Heavy snow showers making travel difficult. Humidity levels are {h}."),
        95 => format!("Thunderstorms brewing with {h} humidity. Stay indoors and safe!"),
        96 => format!("Thunderstorms with slight hail occurring. Humidity stands at {h}."),
        99 => format!("Thunderstorms with heavy hail happening. Take cover! Humidity is {h}."),
        _ => format!("Weather conditions are currently unknown with {h} humidity. Stay prepared!"),
    }
}

/// 8-point compass direction for a bearing in degrees (any sign or magnitude).
pub fn wind_direction(degrees: f64) -> &'static str {
    const DIRECTIONS: [&str; 8] = ["N", "NE", "E", "SE", "S", "SW", "W", "NW"];
    let normalized = degrees.rem_euclid(360.0);
    let index = (normalized / 45.0).round() as usize % DIRECTIONS.len();
    DIRECTIONS[index]
}

/// Plain-language precipitation probability.
pub fn precipitation_description(probability: f64) -> &'static str {
    if probability >= 90.0 {
        "Very likely to rain"
    } else if probability >= 70.0 {
        "High chance of rain"
    } else if probability >= 40.0 {
        "Some rain"
    } else if probability >= 10.0 {
        "Low chance of rain"
    } else {
        "No rain today"
    }
}

/// Where the forecast is for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    pub city_name: Option<String>,
}

impl Location {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, LocationError> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(LocationError::InvalidCoordinates {
                latitude,
                longitude,
            });
        }
        Ok(Self {
            latitude,
            longitude,
            city_name: None,
        })
    }

    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city_name = Some(city.into());
        self
    }

    /// Name for display: the city when known, coordinates otherwise.
    pub fn label(&self) -> String {
        match &self.city_name {
            Some(city) => city.clone(),
            None => format!("{:.4}, {:.4}", self.latitude, self.longitude),
        }
    }
}

impl From<&LocationConfig> for Location {
    fn from(config: &LocationConfig) -> Self {
        Self {
            latitude: config.latitude,
            longitude: config.longitude,
            city_name: config.city.clone(),
        }
    }
}

/// A city search result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityMatch {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl From<CityMatch> for Location {
    fn from(city: CityMatch) -> Self {
        Self {
            latitude: city.latitude,
            longitude: city.longitude,
            city_name: Some(city.name),
        }
    }
}

/// Current outdoor conditions, in the unit system the provider was created with
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutdoorWeather {
    pub temperature: f64,
    /// Relative humidity (%) from the hourly entry closest to `observed_at`
    pub humidity: f64,
    pub wind_speed: f64,
    pub wind_direction_degrees: f64,
    pub precipitation_chance: Option<f64>,
    pub weather_code: i32,
    pub sky: Sky,
    /// Local time at the location
    pub observed_at: NaiveDateTime,
}

impl OutdoorWeather {
    pub fn wind_direction(&self) -> &'static str {
        wind_direction(self.wind_direction_degrees)
    }

    pub fn condition_description(&self) -> &'static str {
        wmo_code_description(self.weather_code)
    }

    pub fn sentence(&self, humidity_label: &str) -> String {
        weather_sentence(self.weather_code, humidity_label)
    }
}

/// Hourly entry for today's series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyReading {
    /// Hour of day, local time (0-23)
    pub hour: u32,
    pub temperature: f64,
    pub humidity: f64,
}

/// One forecast fetch: current conditions plus today's hourly series
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherReport {
    pub current: OutdoorWeather,
    pub hourly_today: Vec<HourlyReading>,
    pub location: Location,
    pub unit: UnitSystem,
    pub fetched_at: DateTime<Utc>,
}

impl WeatherReport {
    /// Earliest hour with the lowest relative humidity today.
    pub fn lowest_humidity_hour(&self) -> Option<&HourlyReading> {
        self.hourly_today.iter().fold(None, |lowest, entry| match lowest {
            Some(current) if current.humidity <= entry.humidity => Some(current),
            _ => Some(entry),
        })
    }
}

/// Location resolution errors
#[derive(Debug, thiserror::Error)]
pub enum LocationError {
    #[error("No city found matching '{0}'")]
    NotFound(String),
    #[error("Invalid coordinates: {latitude}, {longitude}")]
    InvalidCoordinates { latitude: f64, longitude: f64 },
}

/// Forecast and geocoding client errors
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("API returned {status}: {message}")]
    Api { status: u16, message: String },
    #[error("Location error: {0}")]
    Location(#[from] LocationError),
    #[error("Parse error: {0}")]
    Parse(String),
}
