//! Indoor vs. outdoor humidity comparison for Ventwise
//!
//! Converts temperature and relative humidity into absolute humidity and
//! turns the indoor/outdoor difference into window advice.

pub mod advisor;
pub mod error;
pub mod levels;
pub mod psychrometrics;
pub mod reading;
pub mod recommendation;
pub mod store;

pub use advisor::{evaluate, Evaluation};
pub use error::{EvaluationError, StoreError};
pub use levels::HumidityLevel;
pub use psychrometrics::{absolute_humidity, vapor_pressure};
pub use reading::{IndoorConditions, OutdoorReading, Reading, Side};
pub use recommendation::{recommend, Advice, Recommendation, WindowAction};
pub use store::IndoorStore;
