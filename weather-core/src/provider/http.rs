use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, instrument, warn};

use crate::{
    error::{FetchError, truncate_body},
    model::{RawResponse, WeatherResult},
};

use super::WeatherProvider;

/// Provider that sends `GET <base_url>?query=<city>` and expects the
/// `location` + `current` JSON shape back.
#[derive(Debug, Clone)]
pub struct HttpWeatherProvider {
    base_url: String,
    http: Client,
}

impl HttpWeatherProvider {
    pub fn new(base_url: String) -> Self {
        Self::with_client(base_url, Client::new())
    }

    pub fn with_client(base_url: String, http: Client) -> Self {
        Self { base_url, http }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl WeatherProvider for HttpWeatherProvider {
    #[instrument(skip(self), fields(url = %self.base_url))]
    async fn get_weather(&self, city: &str) -> Result<WeatherResult, FetchError> {
        debug!("Sending weather request");

        let res = self.http.get(&self.base_url).query(&[("query", city)]).send().await?;

        let status = res.status();
        let body = res.text().await?;
        debug!(%status, bytes = body.len(), "Received weather response");

        if !status.is_success() {
            return Err(FetchError::Status { status, body: truncate_body(&body) });
        }

        let raw: RawResponse = serde_json::from_str(&body)?;

        if let Some(api_error) = &raw.error {
            warn!(
                code = ?api_error.code,
                kind = ?api_error.kind,
                info = ?api_error.info,
                "Backend reported an error"
            );
        }

        WeatherResult::try_from(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_base_url() {
        let provider = HttpWeatherProvider::new("http://localhost:8080/current".to_string());
        assert_eq!(provider.base_url(), "http://localhost:8080/current");
    }

    #[tokio::test]
    async fn unreachable_backend_is_a_transport_error() {
        // Port 9 (discard) is closed on any sane test machine.
        let provider = HttpWeatherProvider::new("http://127.0.0.1:9/current".to_string());
        let err = provider.get_weather("Paris").await.unwrap_err();
        assert!(matches!(err, FetchError::Transport(_)));
    }
}
