//! Vapor pressure and absolute humidity.

/// Magnus coefficients (Bolton 1980 variant), temperatures in °C, pressure in hPa.
const MAGNUS_BASE_HPA: f64 = 6.112;
const MAGNUS_A: f64 = 17.67;
const MAGNUS_B_CELSIUS: f64 = 243.5;

/// Reciprocal specific gas constant of water vapor, g·K/J.
/// Applied to vapor pressure in Pa, so hPa values are scaled by 100 first.
const WATER_VAPOR_CONSTANT: f64 = 2.16679;
const PA_PER_HPA: f64 = 100.0;
const ZERO_CELSIUS_IN_KELVIN: f64 = 273.15;

/// Actual vapor pressure in hPa for a temperature (°C) and relative humidity (%).
///
/// Saturation vapor pressure comes from the Magnus approximation and is scaled
/// by `rh_percent / 100`. Callers keep `temp_c` well above -243.5 °C, where the
/// approximation has its pole.
pub fn vapor_pressure(temp_c: f64, rh_percent: f64) -> f64 {
    let saturation = MAGNUS_BASE_HPA * ((MAGNUS_A * temp_c) / (temp_c + MAGNUS_B_CELSIUS)).exp();
    saturation * (rh_percent / 100.0)
}

/// Absolute humidity in g/m³, rounded to two decimals.
///
/// `AH = 2.16679 * E[Pa] / T[K]`, the ideal gas law for water vapor.
pub fn absolute_humidity(temp_c: f64, vapor_pressure_hpa: f64) -> f64 {
    let temp_k = temp_c + ZERO_CELSIUS_IN_KELVIN;
    let ah = WATER_VAPOR_CONSTANT * (vapor_pressure_hpa * PA_PER_HPA) / temp_k;
    round2(ah)
}

/// Absolute humidity straight from a temperature/RH pair.
pub fn absolute_humidity_for(temp_c: f64, rh_percent: f64) -> f64 {
    absolute_humidity(temp_c, vapor_pressure(temp_c, rh_percent))
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(actual: f64, expected: f64, tolerance: f64) {
        assert!(
            (actual - expected).abs() <= tolerance,
            "expected {} ± {}, got {}",
            expected,
            tolerance,
            actual
        );
    }

    #[test]
    fn test_vapor_pressure_reference_points() {
        approx(vapor_pressure(24.0, 64.0), 19.09, 0.05);
        approx(vapor_pressure(22.0, 85.0), 22.46, 0.05);
    }

    #[test]
    fn test_vapor_pressure_at_freezing_is_magnus_base() {
        approx(vapor_pressure(0.0, 100.0), 6.112, 1e-9);
    }

    #[test]
    fn test_vapor_pressure_dry_air_is_zero() {
        assert_eq!(vapor_pressure(30.0, 0.0), 0.0);
    }

    #[test]
    fn test_vapor_pressure_monotonic_in_rh() {
        for temp in [-20.0, 0.0, 12.5, 24.0, 40.0] {
            let mut previous = vapor_pressure(temp, 0.0);
            for step in 1..=200 {
                let rh = f64::from(step) * 0.5;
                let current = vapor_pressure(temp, rh);
                assert!(current >= previous, "not monotonic at T={} RH={}", temp, rh);
                previous = current;
            }
        }
    }

    #[test]
    fn test_absolute_humidity_reference_points() {
        assert_eq!(absolute_humidity(24.0, vapor_pressure(24.0, 64.0)), 13.92);
        assert_eq!(absolute_humidity(22.0, vapor_pressure(22.0, 85.0)), 16.49);
        assert_eq!(absolute_humidity(20.0, vapor_pressure(20.0, 50.0)), 8.64);
    }

    #[test]
    fn test_absolute_humidity_rounds_to_two_decimals() {
        let ah = absolute_humidity(-5.0, vapor_pressure(-5.0, 70.0));
        assert_eq!(ah, 2.39);
        assert_eq!(round2(ah), ah);
    }

    #[test]
    fn test_absolute_humidity_for_matches_two_step_path() {
        for (t, rh) in [(24.0, 64.0), (22.0, 85.0), (-10.0, 80.0), (35.0, 20.0)] {
            assert_eq!(
                absolute_humidity_for(t, rh),
                absolute_humidity(t, vapor_pressure(t, rh))
            );
        }
    }
}
