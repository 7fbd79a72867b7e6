//! Travel modes understood by the Google Maps services.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How the route is travelled.
///
/// Only [`TravelMode::Driving`] carries live traffic durations; other modes
/// report a neutral stress of 1.0 for every route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelMode {
    /// By car.
    #[default]
    Driving,
    /// On foot.
    Walking,
    /// By bicycle.
    Bicycling,
    /// By public transport.
    Transit,
}

/// Error returned when parsing an unknown travel mode.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown travel mode {0:?}; expected driving, walking, bicycling or transit")]
pub struct ParseTravelModeError(pub String);

impl TravelMode {
    /// Parameter value used by the Google APIs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Driving => "driving",
            Self::Walking => "walking",
            Self::Bicycling => "bicycling",
            Self::Transit => "transit",
        }
    }
}

impl fmt::Display for TravelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TravelMode {
    type Err = ParseTravelModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "driving" => Ok(Self::Driving),
            "walking" => Ok(Self::Walking),
            "bicycling" | "cycling" => Ok(Self::Bicycling),
            "transit" => Ok(Self::Transit),
            _ => Err(ParseTravelModeError(s.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("driving", TravelMode::Driving)]
    #[case(" Walking ", TravelMode::Walking)]
    #[case("BICYCLING", TravelMode::Bicycling)]
    #[case("cycling", TravelMode::Bicycling)]
    #[case("transit", TravelMode::Transit)]
    fn parses_known_modes(#[case] input: &str, #[case] expected: TravelMode) {
        assert_eq!(input.parse::<TravelMode>(), Ok(expected));
    }

    #[rstest]
    fn rejects_unknown_mode() {
        let err = "hovercraft".parse::<TravelMode>().expect_err("unknown mode");
        assert_eq!(err, ParseTravelModeError("hovercraft".to_owned()));
    }

    #[rstest]
    fn serialises_lowercase() {
        let json = serde_json::to_string(&TravelMode::Bicycling).expect("serialise");
        assert_eq!(json, "\"bicycling\"");
        assert_eq!(TravelMode::default().to_string(), "driving");
    }
}
