//! Window advice from the indoor/outdoor absolute humidity difference.

use serde::Serialize;

use crate::psychrometrics::round2;

/// The six advice buckets, ordered from "open wide" to "keep shut".
///
/// | difference (g/m³) | advice |
/// |---|---|
/// | `> 0.5` | [`Advice::OpenWide`] |
/// | `(0.3, 0.5]` | [`Advice::ConsiderOpening`] |
/// | `(0.1, 0.3]` | [`Advice::OpenSlightly`] |
/// | `[-0.1, 0.1]` | [`Advice::Balanced`] |
/// | `[-0.5, -0.1)` | [`Advice::KeepClosed`] |
/// | `< -0.5` | [`Advice::KeepClosedFirmly`] |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Advice {
    OpenWide,
    ConsiderOpening,
    OpenSlightly,
    Balanced,
    KeepClosed,
    KeepClosedFirmly,
}

/// Coarse action, used to pick icons and exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowAction {
    Open,
    NoAction,
    KeepClosed,
}

impl Advice {
    /// Classify a difference (indoor minus outdoor, g/m³).
    pub fn from_difference(difference: f64) -> Self {
        if difference > 0.5 {
            Self::OpenWide
        } else if difference > 0.3 {
            Self::ConsiderOpening
        } else if difference > 0.1 {
            Self::OpenSlightly
        } else if difference >= -0.1 {
            Self::Balanced
        } else if difference >= -0.5 {
            Self::KeepClosed
        } else {
            Self::KeepClosedFirmly
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::OpenWide => {
                "Open your windows to lower the humidity and make your space more comfortable."
            }
            Self::ConsiderOpening => "Consider opening your windows to reduce indoor humidity.",
            Self::OpenSlightly => "Open your windows to slightly decrease indoor humidity.",
            Self::Balanced => {
                "No action needed right now as indoor and outdoor humidity levels are balanced."
            }
            Self::KeepClosed => "Keep your windows closed to avoid raising your indoor humidity.",
            Self::KeepClosedFirmly => {
                "Keep your windows closed to prevent indoor humidity from rising significantly."
            }
        }
    }

    pub fn action(&self) -> WindowAction {
        match self {
            Self::OpenWide | Self::ConsiderOpening | Self::OpenSlightly => WindowAction::Open,
            Self::Balanced => WindowAction::NoAction,
            Self::KeepClosed | Self::KeepClosedFirmly => WindowAction::KeepClosed,
        }
    }
}

impl std::fmt::Display for Advice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// Advice together with the difference that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Recommendation {
    pub advice: Advice,
    /// `indoor_ah - outdoor_ah` in g/m³, two decimals.
    pub difference: f64,
}

impl Recommendation {
    pub fn message(&self) -> &'static str {
        self.advice.message()
    }
}

/// Compare two absolute humidities (g/m³).
///
/// The difference is rounded to two decimals, matching the precision of the
/// inputs, so `16.79 - 16.49` lands on exactly `0.3`.
pub fn recommend(indoor_ah: f64, outdoor_ah: f64) -> Recommendation {
    let difference = round2(indoor_ah - outdoor_ah);
    Recommendation {
        advice: Advice::from_difference(difference),
        difference,
    }
}
