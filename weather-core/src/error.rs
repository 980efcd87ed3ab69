use thiserror::Error;

use crate::provider::Endpoint;

/// Everything that can go wrong between pressing submit and holding a
/// [`WeatherResult`](crate::WeatherResult).
///
/// These messages are for logs. What the user sees comes from
/// [`FetchError::user_message`].
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("No URL configured for endpoint '{0}'")]
    MissingEndpoint(Endpoint),

    #[error("Failed to send weather request: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Weather request failed with status {status}: {body}")]
    Status { status: reqwest::StatusCode, body: String },

    #[error("Failed to parse weather JSON: {0}")]
    Decode(#[from] serde_json::Error),

    #[error(
        "Weather response is incomplete (location missing: {missing_location}, current missing: {missing_current})"
    )]
    Incomplete { missing_location: bool, missing_current: bool },
}

impl FetchError {
    pub fn user_message(&self) -> &'static str {
        match self {
            FetchError::Incomplete { .. } => "No weather data found.",
            _ => "Failed to fetch weather data.",
        }
    }
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() <= MAX {
        return body.to_string();
    }

    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn incomplete_has_its_own_user_message() {
        let err = FetchError::Incomplete { missing_location: false, missing_current: true };
        assert_eq!(err.user_message(), "No weather data found.");
    }

    #[test]
    fn other_failures_share_the_generic_message() {
        let err = FetchError::MissingEndpoint(Endpoint::Live);
        assert_eq!(err.user_message(), "Failed to fetch weather data.");
        assert!(err.to_string().contains("live"));
    }

    #[test]
    fn truncate_keeps_short_bodies() {
        assert_eq!(truncate_body("oops"), "oops");
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        let body = "é".repeat(150);
        let cut = truncate_body(&body);
        assert!(cut.ends_with("..."));
        assert!(cut.len() <= 203);
    }
}
