use serde::{Deserialize, Serialize};

use crate::error::FetchError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub localtime: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Current {
    pub temperature: f64,
    #[serde(default)]
    pub weather_descriptions: Vec<String>,
    #[serde(default)]
    pub weather_icons: Vec<String>,
    pub wind_speed: f64,
    pub humidity: f64,
}

impl Current {
    pub fn description(&self) -> Option<&str> {
        self.weather_descriptions.first().map(String::as_str)
    }

    pub fn icon(&self) -> Option<&str> {
        self.weather_icons.first().map(String::as_str)
    }
}

/// A validated lookup result. Only ever built from a response carrying both
/// `location` and `current`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherResult {
    pub location: Location,
    pub current: Current,
}

/// Error object some backends embed in an otherwise successful response.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub info: Option<String>,
}

/// Response as it comes off the wire, before the required fields are checked.
///
/// `location` and `current` stay untyped here so that a present but
/// malformed object counts as incomplete rather than as undecodable JSON.
#[derive(Debug, Clone, Deserialize)]
pub struct RawResponse {
    #[serde(default)]
    pub location: Option<serde_json::Value>,
    #[serde(default)]
    pub current: Option<serde_json::Value>,
    #[serde(default)]
    pub error: Option<ApiErrorBody>,
}

impl TryFrom<RawResponse> for WeatherResult {
    type Error = FetchError;

    fn try_from(raw: RawResponse) -> Result<Self, Self::Error> {
        let location = raw.location.and_then(|v| serde_json::from_value::<Location>(v).ok());
        let current = raw.current.and_then(|v| serde_json::from_value::<Current>(v).ok());

        match (location, current) {
            (Some(location), Some(current)) => Ok(WeatherResult { location, current }),
            (location, current) => Err(FetchError::Incomplete {
                missing_location: location.is_none(),
                missing_current: current.is_none(),
            }),
        }
    }
}
