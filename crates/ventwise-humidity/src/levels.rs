use serde::Serialize;

/// Relative humidity category shown next to outdoor conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HumidityLevel {
    Low,
    Moderate,
    High,
    VeryHigh,
}

impl HumidityLevel {
    /// `< 30` low, `[30, 60)` moderate, `[60, 80)` high, otherwise very high.
    pub fn from_percent(rh_percent: f64) -> Self {
        if rh_percent < 30.0 {
            Self::Low
        } else if rh_percent < 60.0 {
            Self::Moderate
        } else if rh_percent < 80.0 {
            Self::High
        } else {
            Self::VeryHigh
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Moderate => "Moderate",
            Self::High => "High",
            Self::VeryHigh => "Very High",
        }
    }
}

impl std::fmt::Display for HumidityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_boundaries() {
        assert_eq!(HumidityLevel::from_percent(0.0), HumidityLevel::Low);
        assert_eq!(HumidityLevel::from_percent(29.9), HumidityLevel::Low);
        assert_eq!(HumidityLevel::from_percent(30.0), HumidityLevel::Moderate);
        assert_eq!(HumidityLevel::from_percent(59.9), HumidityLevel::Moderate);
        assert_eq!(HumidityLevel::from_percent(60.0), HumidityLevel::High);
        assert_eq!(HumidityLevel::from_percent(80.0), HumidityLevel::VeryHigh);
        assert_eq!(HumidityLevel::from_percent(100.0), HumidityLevel::VeryHigh);
    }

    #[test]
    fn test_label() {
        assert_eq!(HumidityLevel::VeryHigh.to_string(), "Very High");
    }
}
