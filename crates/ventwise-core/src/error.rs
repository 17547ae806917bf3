//! Application-wide errors.
//!
//! Crate-local errors (humidity evaluation, weather client, indoor store)
//! are folded into [`AppError`] by the binary. `Display` keeps the full
//! context for logs; `user_message()` is the single line a user sees.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Forecast error: {0}")]
    Weather(#[from] WeatherError),

    #[error("Input error: {0}")]
    Input(#[from] InputError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl AppError {
    pub fn user_message(&self) -> &'static str {
        match self {
            AppError::Network(e) => e.user_message(),
            AppError::Config(e) => e.user_message(),
            AppError::Weather(e) => e.user_message(),
            AppError::Input(e) => e.user_message(),
            AppError::Storage(e) => e.user_message(),
        }
    }

    /// Optional second line printed under `user_message()`.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            AppError::Input(InputError::Invalid { .. }) => {
                Some("Please ensure all input values are correct.")
            }
            AppError::Input(InputError::MissingIndoor) => {
                Some("Pass --indoor-temp and --indoor-humidity, or run `ventwise indoor set`.")
            }
            _ => None,
        }
    }
}

/// Transport-level failures talking to the forecast or geocoding service.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("Could not connect: {0}")]
    Unreachable(String),

    #[error("Request timed out")]
    Timeout,

    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Unreadable response body: {0}")]
    BadBody(String),
}

impl NetworkError {
    pub fn user_message(&self) -> &'static str {
        match self {
            NetworkError::Unreachable(_) => {
                "Could not reach the weather service. Check your internet connection."
            }
            NetworkError::Timeout => "The weather service took too long to answer. Try again.",
            NetworkError::Status { status, .. } if *status == 429 => {
                "Too many requests to the weather service. Wait a moment and try again."
            }
            NetworkError::Status { status, .. } if *status >= 500 => {
                "The weather service is having trouble. Try again later."
            }
            NetworkError::Status { .. } => "The weather service rejected the request.",
            NetworkError::BadBody(_) => "The weather service sent a response we could not read.",
        }
    }
}

impl From<reqwest::Error> for NetworkError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            NetworkError::Timeout
        } else if error.is_decode() {
            NetworkError::BadBody(error.to_string())
        } else if let Some(status) = error.status() {
            NetworkError::Status {
                status: status.as_u16(),
                message: error.to_string(),
            }
        } else {
            NetworkError::Unreachable(error.to_string())
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read, parsed or written.
    #[error("{0}")]
    Load(String),

    /// The file parsed but failed validation.
    #[error("{0}")]
    Invalid(String),
}

impl ConfigError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ConfigError::Load(_) => "Could not load the configuration file.",
            ConfigError::Invalid(_) => {
                "The configuration has errors. Fix them and run `ventwise config validate`."
            }
        }
    }
}

/// The forecast or geocoding service answered, but not with what we need.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("No place matches '{0}'")]
    LocationNotFound(String),

    #[error("Forecast data incomplete: {0}")]
    IncompleteData(String),
}

impl WeatherError {
    pub fn user_message(&self) -> &'static str {
        match self {
            WeatherError::LocationNotFound(_) => "Location not found. Check and try again.",
            WeatherError::IncompleteData(_) => {
                "Outdoor conditions are unavailable right now. Try again later."
            }
        }
    }
}

/// Indoor/outdoor reading errors.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("Invalid value for {field}: {detail}")]
    Invalid { field: String, detail: String },

    #[error("No indoor conditions recorded")]
    MissingIndoor,
}

impl InputError {
    pub fn user_message(&self) -> &'static str {
        match self {
            InputError::Invalid { .. } => "Invalid indoor or outdoor data.",
            InputError::MissingIndoor => {
                "Please input your indoor conditions to receive a recommendation."
            }
        }
    }
}

/// Local key/value storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to read stored data: {0}")]
    ReadFailed(String),

    #[error("Failed to write stored data: {0}")]
    WriteFailed(String),
}

impl StorageError {
    pub fn user_message(&self) -> &'static str {
        match self {
            StorageError::ReadFailed(_) => "Unable to read saved indoor conditions.",
            StorageError::WriteFailed(_) => "Failed to save indoor conditions. Please try again.",
        }
    }
}
