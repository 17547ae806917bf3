//! Maps crate-local errors into the application-wide [`AppError`].

use ventwise_core::{
    AppError, ConfigError, InputError, NetworkError, StorageError,
    WeatherError as ForecastError,
};
use ventwise_humidity::{EvaluationError, StoreError};
use ventwise_weather::{LocationError, WeatherError};

pub trait IntoAppError {
    fn into_app_error(self) -> AppError;
}

impl IntoAppError for EvaluationError {
    fn into_app_error(self) -> AppError {
        AppError::Input(InputError::Invalid {
            field: self.field().to_string(),
            detail: self.to_string(),
        })
    }
}

impl IntoAppError for StoreError {
    fn into_app_error(self) -> AppError {
        let storage = match &self {
            StoreError::Read { .. } => StorageError::ReadFailed(self.to_string()),
            StoreError::Write { .. } | StoreError::Serialization(_) => {
                StorageError::WriteFailed(self.to_string())
            }
        };
        AppError::Storage(storage)
    }
}

impl IntoAppError for WeatherError {
    fn into_app_error(self) -> AppError {
        match self {
            WeatherError::Network(e) => AppError::Network(e.into()),
            WeatherError::Api { status, message } => {
                AppError::Network(NetworkError::Status { status, message })
            }
            WeatherError::Parse(s) => AppError::Weather(ForecastError::IncompleteData(s)),
            WeatherError::Location(LocationError::NotFound(name)) => {
                AppError::Weather(ForecastError::LocationNotFound(name))
            }
            WeatherError::Location(e @ LocationError::InvalidCoordinates { .. }) => {
                AppError::Input(InputError::Invalid {
                    field: "coordinates".to_string(),
                    detail: e.to_string(),
                })
            }
        }
    }
}

/// Config loading is the only remaining `anyhow` path.
impl IntoAppError for anyhow::Error {
    fn into_app_error(self) -> AppError {
        AppError::Config(ConfigError::Load(format!("{:#}", self)))
    }
}

/// Process exit code for a failed command.
pub fn exit_code(error: &AppError) -> u8 {
    match error {
        AppError::Input(_) => 2,
        AppError::Config(_) => 3,
        AppError::Network(_) | AppError::Weather(_) => 4,
        AppError::Storage(_) => 1,
    }
}
