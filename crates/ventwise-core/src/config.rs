use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

/// Upper bound on `weather.max_retries`.
const MAX_RETRIES: u32 = 10;

/// One problem found by [`Config::validate`], keyed by its TOML path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.field)
    }
}

/// Errors stop every command; warnings are only reported.
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigIssue>,
    pub warnings: Vec<ConfigIssue>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn error(&mut self, field: &str, message: impl Into<String>) {
        self.errors.push(issue(field, message));
    }

    pub fn warning(&mut self, field: &str, message: impl Into<String>) {
        self.warnings.push(issue(field, message));
    }

    /// All errors on one line, for logs and the error returned to `main`.
    pub fn error_summary(&self) -> String {
        let parts: Vec<String> = self.errors.iter().map(ToString::to_string).collect();
        parts.join("; ")
    }
}

fn issue(field: &str, message: impl Into<String>) -> ConfigIssue {
    ConfigIssue {
        field: field.to_string(),
        message: message.into(),
    }
}

/// Unit system used for temperatures (and wind speed) on both sides of a comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    #[default]
    Metric,
    Imperial,
}

impl UnitSystem {
    /// Convert a temperature in this unit system to degrees Celsius.
    pub fn to_celsius(self, temperature: f64) -> f64 {
        match self {
            UnitSystem::Metric => temperature,
            UnitSystem::Imperial => (temperature - 32.0) * 5.0 / 9.0,
        }
    }

    pub fn temperature_symbol(self) -> &'static str {
        match self {
            UnitSystem::Metric => "°C",
            UnitSystem::Imperial => "°F",
        }
    }

    pub fn speed_symbol(self) -> &'static str {
        match self {
            UnitSystem::Metric => "km/h",
            UnitSystem::Imperial => "mph",
        }
    }
}

impl std::str::FromStr for UnitSystem {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "metric" | "c" | "celsius" => Ok(UnitSystem::Metric),
            "imperial" | "f" | "fahrenheit" => Ok(UnitSystem::Imperial),
            other => Err(format!("unknown unit system '{}' (expected metric or imperial)", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding the loaded `config.toml`; never read from the file.
    #[serde(skip)]
    pub config_dir: PathBuf,

    /// Unit system for displayed and entered temperatures
    #[serde(default)]
    pub units: UnitSystem,

    /// Forecast API settings
    #[serde(default)]
    pub weather: WeatherConfig,

    /// City search and reverse geocoding settings
    #[serde(default)]
    pub geocoding: GeocodingConfig,

    /// Location used when none is given on the command line
    #[serde(default)]
    pub location: LocationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Base URL of the Open-Meteo API
    pub api_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Retries for transient failures (timeouts, 5xx, 429)
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

fn default_max_retries() -> u32 {
    2
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.open-meteo.com".to_string(),
            timeout_secs: 10,
            max_retries: default_max_retries(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodingConfig {
    /// Nominatim forward search endpoint
    pub search_url: String,

    /// Nominatim reverse lookup endpoint
    pub reverse_url: String,

    /// Nominatim requires an identifying User-Agent
    pub user_agent: String,

    /// Maximum number of city matches returned by a search
    pub result_limit: u32,
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            search_url: "https://nominatim.openstreetmap.org/search".to_string(),
            reverse_url: "https://nominatim.openstreetmap.org/reverse".to_string(),
            user_agent: concat!("Ventwise/", env!("CARGO_PKG_VERSION")).to_string(),
            result_limit: 5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationConfig {
    pub latitude: f64,
    pub longitude: f64,
    pub city: Option<String>,
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            latitude: 40.7128,
            longitude: -74.0060,
            city: Some("New York".to_string()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("ventwise");

        Self {
            config_dir,
            units: UnitSystem::default(),
            weather: WeatherConfig::default(),
            geocoding: GeocodingConfig::default(),
            location: LocationConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from the default path, creating it if it doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        Self::load_from(&config_path)
    }

    /// Load configuration from an explicit path, writing defaults there if missing.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            let mut config = Self::default();
            if let Some(parent) = config_path.parent() {
                config.config_dir = parent.to_path_buf();
            }
            config.save_to(config_path)?;
            tracing::info!("Wrote default configuration to {}", config_path.display());
            return Ok(config);
        }

        let contents =
            std::fs::read_to_string(config_path).context("Failed to read config file")?;

        let mut config: Config =
            toml::from_str(&contents).context("Failed to parse config file")?;
        if let Some(parent) = config_path.parent() {
            config.config_dir = parent.to_path_buf();
        }

        Ok(config)
    }

    /// Load from `path`, or from the default location when `None`.
    pub fn load_or_default_path(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load_from(p),
            None => Self::load(),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        for (field, raw) in [
            ("weather.api_url", &self.weather.api_url),
            ("geocoding.search_url", &self.geocoding.search_url),
            ("geocoding.reverse_url", &self.geocoding.reverse_url),
        ] {
            check_http_url(&mut result, field, raw);
        }

        if self.weather.timeout_secs == 0 {
            result.error("weather.timeout_secs", "Timeout must be greater than 0");
        } else if self.weather.timeout_secs > 120 {
            result.warning("weather.timeout_secs", "Timeout is unusually long (>120s)");
        }

        if self.weather.max_retries > MAX_RETRIES {
            result.error(
                "weather.max_retries",
                format!("Retries must be at most {}", MAX_RETRIES),
            );
        } else if self.weather.max_retries > 5 {
            result.warning("weather.max_retries", "More than 5 retries configured");
        }

        if self.geocoding.result_limit == 0 || self.geocoding.result_limit > 50 {
            result.error("geocoding.result_limit", "Result limit must be between 1 and 50");
        }

        if self.geocoding.user_agent.trim().is_empty() {
            result.error("geocoding.user_agent", "Nominatim requires a User-Agent");
        }

        if !(-90.0..=90.0).contains(&self.location.latitude) {
            result.error("location.latitude", "Latitude must be between -90 and 90");
        }
        if !(-180.0..=180.0).contains(&self.location.longitude) {
            result.error("location.longitude", "Longitude must be between -180 and 180");
        }

        result
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let contents = self.to_toml()?;

        std::fs::write(config_path, contents).context("Failed to write config file")?;

        Ok(())
    }

    /// Render as pretty-printed TOML, the on-disk format
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }

    /// Path of the local key/value store holding persisted indoor conditions
    pub fn storage_path(&self) -> PathBuf {
        self.config_dir.join("storage.json")
    }

    /// Get the path to the configuration file
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get config directory")?
            .join("ventwise");

        Ok(config_dir.join("config.toml"))
    }
}

fn check_http_url(result: &mut ValidationResult, field: &str, raw: &str) {
    let url = match Url::parse(raw) {
        Ok(url) => url,
        Err(e) => {
            result.error(field, format!("Invalid URL: {}", e));
            return;
        }
    };

    if !matches!(url.scheme(), "http" | "https") {
        result.error(
            field,
            format!("URL must use http or https scheme, got: {}", url.scheme()),
        );
    }
    if url.host().is_none() {
        result.error(field, "URL must have a host");
    }
}
