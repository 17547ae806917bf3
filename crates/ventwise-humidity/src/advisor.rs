//! Indoor vs. outdoor comparison: parse, convert, compute, advise.

use serde::Serialize;
use ventwise_core::UnitSystem;

use crate::error::EvaluationError;
use crate::psychrometrics::{absolute_humidity, vapor_pressure};
use crate::reading::{IndoorConditions, OutdoorReading, Reading};
use crate::recommendation::{recommend, Recommendation};

/// Outcome of a successful comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    pub recommendation: Recommendation,
    pub indoor_ah: f64,
    pub outdoor_ah: f64,
    pub indoor_temperature_c: f64,
    pub indoor_humidity: f64,
    pub outdoor_temperature_c: f64,
    pub outdoor_humidity: f64,
    pub explanation: String,
}

impl Evaluation {
    pub fn message(&self) -> &'static str {
        self.recommendation.message()
    }

    pub fn difference(&self) -> f64 {
        self.recommendation.difference
    }
}

/// Compare user-entered indoor conditions with outdoor weather.
///
/// Both temperatures are interpreted in `unit`. Any unparsable, non-finite or
/// out-of-range input yields an [`EvaluationError`]; nothing here panics.
pub fn evaluate(
    indoor: &IndoorConditions,
    outdoor: &OutdoorReading,
    unit: UnitSystem,
) -> Result<Evaluation, EvaluationError> {
    let indoor = indoor.parse(unit)?;
    let outdoor = outdoor.parse(unit)?;
    Ok(compare(&indoor, &outdoor))
}

/// Compare two validated readings.
pub fn compare(indoor: &Reading, outdoor: &Reading) -> Evaluation {
    let indoor_ah = reading_ah(indoor);
    let outdoor_ah = reading_ah(outdoor);
    let recommendation = recommend(indoor_ah, outdoor_ah);

    tracing::debug!(
        indoor_ah,
        outdoor_ah,
        difference = recommendation.difference,
        advice = ?recommendation.advice,
        "Compared absolute humidity"
    );

    Evaluation {
        recommendation,
        indoor_ah,
        outdoor_ah,
        indoor_temperature_c: indoor.temperature_celsius(),
        indoor_humidity: indoor.relative_humidity_percent(),
        outdoor_temperature_c: outdoor.temperature_celsius(),
        outdoor_humidity: outdoor.relative_humidity_percent(),
        explanation: explain(indoor, outdoor, indoor_ah, outdoor_ah),
    }
}

// Indoor and outdoor must go through the same path.
fn reading_ah(reading: &Reading) -> f64 {
    let t = reading.temperature_celsius();
    absolute_humidity(t, vapor_pressure(t, reading.relative_humidity_percent()))
}

fn explain(indoor: &Reading, outdoor: &Reading, indoor_ah: f64, outdoor_ah: f64) -> String {
    let direction = if indoor_ah > outdoor_ah {
        "Since the indoor absolute humidity is higher, opening the windows could help reduce indoor humidity levels."
    } else if indoor_ah < outdoor_ah {
        "Since the outdoor absolute humidity is higher, it's better to keep the windows closed to prevent increasing indoor humidity."
    } else {
        "Indoor and outdoor air hold the same amount of water vapor, so opening the windows won't change indoor humidity."
    };

    format!(
        "Your indoor absolute humidity is {indoor_ah:.2} g/m³, while the outdoor absolute humidity is {outdoor_ah:.2} g/m³.\n\
         \n\
         {direction}\n\
         \n\
         How this was calculated:\n\
         - Indoor temperature: {:.1}°C\n\
         - Indoor relative humidity: {}%\n\
         - Outdoor temperature: {:.1}°C\n\
         - Outdoor relative humidity: {}%\n\
         \n\
         Absolute humidity measures the actual amount of water vapor in the air:\n\
         \n\
         AH = 2.16679 * E / (T + 273.15)\n\
         \n\
         where E is the vapor pressure in Pa (Magnus formula, from temperature and relative humidity)\n\
         and T is the temperature in °C.",
        indoor.temperature_celsius(),
        indoor.relative_humidity_percent(),
        outdoor.temperature_celsius(),
        outdoor.relative_humidity_percent(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recommendation::{Advice, WindowAction};

    #[test]
    fn test_humid_outdoor_air_keeps_windows_closed() {
        let eval = evaluate(
            &IndoorConditions::new("24", "64"),
            &OutdoorReading::new(22.0, 85.0),
            UnitSystem::Metric,
        )
        .unwrap();

        assert_eq!(eval.indoor_ah, 13.92);
        assert_eq!(eval.outdoor_ah, 16.49);
        assert!(eval.difference() < 0.0);
        assert_eq!(eval.recommendation.advice, Advice::KeepClosedFirmly);
        assert_eq!(eval.recommendation.advice.action(), WindowAction::KeepClosed);
        assert!(eval.message().contains("closed"));
    }

    #[test]
    fn test_dry_outdoor_air_opens_windows() {
        let eval = evaluate(
            &IndoorConditions::new("22", "60"),
            &OutdoorReading::new(5.0, 70.0),
            UnitSystem::Metric,
        )
        .unwrap();
        assert_eq!(eval.recommendation.advice, Advice::OpenWide);
        assert!(eval.explanation.contains("indoor absolute humidity is higher"));
    }

    #[test]
    fn test_empty_indoor_temperature_is_failure() {
        let err = evaluate(
            &IndoorConditions::new("", "64"),
            &OutdoorReading::new(22.0, 85.0),
            UnitSystem::Metric,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            EvaluationError::InvalidNumber { field: "indoor temperature", .. }
        ));
        assert_eq!(err.user_message(), "Invalid indoor or outdoor data.");
    }

    #[test]
    fn test_non_numeric_humidity_is_failure() {
        let result = evaluate(
            &IndoorConditions::new("21", "humid"),
            &OutdoorReading::new(22.0, 85.0),
            UnitSystem::Metric,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_outdoor_nan_humidity_is_failure() {
        let result = evaluate(
            &IndoorConditions::new("21", "50"),
            &OutdoorReading::new(22.0, f64::NAN),
            UnitSystem::Metric,
        );
        assert!(matches!(
            result,
            Err(EvaluationError::InvalidNumber { field: "outdoor humidity", .. })
        ));
    }

    #[test]
    fn test_imperial_matches_metric() {
        let metric = evaluate(
            &IndoorConditions::new("20", "50"),
            &OutdoorReading::new(10.0, 80.0),
            UnitSystem::Metric,
        )
        .unwrap();
        let imperial = evaluate(
            &IndoorConditions::new("68", "50"),
            &OutdoorReading::new(50.0, 80.0),
            UnitSystem::Imperial,
        )
        .unwrap();

        assert_eq!(metric.indoor_ah, imperial.indoor_ah);
        assert_eq!(metric.outdoor_ah, imperial.outdoor_ah);
        assert_eq!(metric.recommendation, imperial.recommendation);
    }

    #[test]
    fn test_same_formula_on_both_sides() {
        let eval = evaluate(
            &IndoorConditions::new("18.5", "55"),
            &OutdoorReading::new(18.5, 55.0),
            UnitSystem::Metric,
        )
        .unwrap();
        assert_eq!(eval.indoor_ah, eval.outdoor_ah);
        assert_eq!(eval.recommendation.advice, Advice::Balanced);
        assert!(eval.explanation.contains("same amount of water vapor"));
    }

    #[test]
    fn test_explanation_embeds_inputs_and_results() {
        let eval = evaluate(
            &IndoorConditions::new("75", "40"),
            &OutdoorReading::new(59.0, 90.0),
            UnitSystem::Imperial,
        )
        .unwrap();

        assert!(eval.explanation.contains("Indoor temperature: 23.9°C"));
        assert!(eval.explanation.contains("Indoor relative humidity: 40%"));
        assert!(eval.explanation.contains("Outdoor temperature: 15.0°C"));
        assert!(eval.explanation.contains("Outdoor relative humidity: 90%"));
        assert!(eval
            .explanation
            .contains(&format!("{:.2} g/m³", eval.indoor_ah)));
        assert!(eval
            .explanation
            .contains(&format!("{:.2} g/m³", eval.outdoor_ah)));
    }

    #[test]
    fn test_evaluate_is_idempotent() {
        let indoor = IndoorConditions::new("21.3", "47");
        let outdoor = OutdoorReading::new(12.1, 66.0);
        let first = evaluate(&indoor, &outdoor, UnitSystem::Metric).unwrap();
        let second = evaluate(&indoor, &outdoor, UnitSystem::Metric).unwrap();
        assert_eq!(first, second);
    }
}
