use serde::{Deserialize, Serialize};
use ventwise_core::UnitSystem;

use crate::error::EvaluationError;

/// Hard limits accepted by [`Reading`]. Beyond these the Magnus and Kelvin
/// terms are no longer meaningful for ambient air.
pub const MIN_TEMPERATURE_C: f64 = -90.0;
pub const MAX_TEMPERATURE_C: f64 = 70.0;

/// Range expected for ambient air; values outside it are accepted but logged.
pub const PLAUSIBLE_TEMPERATURE_C: std::ops::RangeInclusive<f64> = -50.0..=60.0;

/// Which side of the window a reading belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Indoor,
    Outdoor,
}

impl Side {
    fn temperature_field(self) -> &'static str {
        match self {
            Side::Indoor => "indoor temperature",
            Side::Outdoor => "outdoor temperature",
        }
    }

    fn humidity_field(self) -> &'static str {
        match self {
            Side::Indoor => "indoor humidity",
            Side::Outdoor => "outdoor humidity",
        }
    }
}

/// A validated temperature/relative humidity pair in °C and %.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    temperature_celsius: f64,
    relative_humidity_percent: f64,
}

impl Reading {
    /// Build a reading from values already in °C.
    pub fn new(
        side: Side,
        temperature_celsius: f64,
        relative_humidity_percent: f64,
    ) -> Result<Self, EvaluationError> {
        let temperature_celsius = finite(side.temperature_field(), temperature_celsius)?;
        let relative_humidity_percent = finite(side.humidity_field(), relative_humidity_percent)?;

        in_range(
            side.temperature_field(),
            temperature_celsius,
            MIN_TEMPERATURE_C,
            MAX_TEMPERATURE_C,
        )?;
        in_range(side.humidity_field(), relative_humidity_percent, 0.0, 100.0)?;

        if !PLAUSIBLE_TEMPERATURE_C.contains(&temperature_celsius) {
            tracing::warn!(
                "{} of {:.1}°C is outside the usual ambient range",
                side.temperature_field(),
                temperature_celsius
            );
        }

        Ok(Self {
            temperature_celsius,
            relative_humidity_percent,
        })
    }

    /// Build a reading from a temperature in `unit`, converting to °C.
    pub fn in_unit(
        side: Side,
        temperature: f64,
        relative_humidity_percent: f64,
        unit: UnitSystem,
    ) -> Result<Self, EvaluationError> {
        let temperature = finite(side.temperature_field(), temperature)?;
        Self::new(side, unit.to_celsius(temperature), relative_humidity_percent)
    }

    pub fn temperature_celsius(&self) -> f64 {
        self.temperature_celsius
    }

    pub fn relative_humidity_percent(&self) -> f64 {
        self.relative_humidity_percent
    }
}

/// Indoor conditions as entered by the user and persisted.
///
/// Values stay as typed strings until evaluation so that a half-filled form
/// round-trips unchanged through storage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndoorConditions {
    #[serde(default)]
    pub temperature: String,
    #[serde(default)]
    pub humidity: String,
}

impl IndoorConditions {
    pub fn new(temperature: impl Into<String>, humidity: impl Into<String>) -> Self {
        Self {
            temperature: temperature.into(),
            humidity: humidity.into(),
        }
    }

    /// Both fields have been filled in (not necessarily with valid numbers).
    pub fn is_complete(&self) -> bool {
        !self.temperature.trim().is_empty() && !self.humidity.trim().is_empty()
    }

    /// Parse into a reading, interpreting the temperature in `unit`.
    pub fn parse(&self, unit: UnitSystem) -> Result<Reading, EvaluationError> {
        let side = Side::Indoor;
        let temperature = parse_number(side.temperature_field(), &self.temperature)?;
        let humidity = parse_number(side.humidity_field(), &self.humidity)?;
        Reading::in_unit(side, temperature, humidity, unit)
    }
}

/// Outdoor conditions as reported by the forecast API, in the working unit system.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutdoorReading {
    pub temperature: f64,
    pub humidity: f64,
}

impl OutdoorReading {
    pub fn new(temperature: f64, humidity: f64) -> Self {
        Self {
            temperature,
            humidity,
        }
    }

    pub fn parse(&self, unit: UnitSystem) -> Result<Reading, EvaluationError> {
        Reading::in_unit(Side::Outdoor, self.temperature, self.humidity, unit)
    }
}

fn parse_number(field: &'static str, raw: &str) -> Result<f64, EvaluationError> {
    let invalid = || EvaluationError::InvalidNumber {
        field,
        value: raw.to_string(),
    };
    let value: f64 = raw.trim().parse().map_err(|_| invalid())?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(invalid())
    }
}

fn finite(field: &'static str, value: f64) -> Result<f64, EvaluationError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(EvaluationError::InvalidNumber {
            field,
            value: value.to_string(),
        })
    }
}

fn in_range(field: &'static str, value: f64, min: f64, max: f64) -> Result<(), EvaluationError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(EvaluationError::OutOfRange {
            field,
            value,
            min,
            max,
        })
    }
}
