use crate::{Config, WeatherResult, error::FetchError, provider::http::HttpWeatherProvider};
use async_trait::async_trait;
use reqwest::Client;
use std::{collections::HashMap, convert::TryFrom, fmt::Debug, str::FromStr, sync::Arc};

pub mod http;

/// The two backends the widget can be pointed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Endpoint {
    #[default]
    Test,
    Live,
}

impl Endpoint {
    pub fn as_str(&self) -> &'static str {
        match self {
            Endpoint::Test => "test",
            Endpoint::Live => "live",
        }
    }

    pub const fn all() -> &'static [Endpoint] {
        &[Endpoint::Test, Endpoint::Live]
    }

    /// The other endpoint.
    pub fn toggled(self) -> Self {
        match self {
            Endpoint::Test => Endpoint::Live,
            Endpoint::Live => Endpoint::Test,
        }
    }

    /// Environment variable holding this endpoint's URL, read both at build
    /// time and at run time.
    pub fn env_var(&self) -> &'static str {
        match self {
            Endpoint::Test => "WEATHER_BACKEND_TEST",
            Endpoint::Live => "WEATHER_BACKEND_LIVE",
        }
    }

    /// URL baked into the binary when the variable was set during the build.
    pub fn baked_url(&self) -> Option<&'static str> {
        match self {
            Endpoint::Test => option_env!("WEATHER_BACKEND_TEST"),
            Endpoint::Live => option_env!("WEATHER_BACKEND_LIVE"),
        }
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Endpoint {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "test" => Ok(Endpoint::Test),
            "live" => Ok(Endpoint::Live),
            _ => Err(anyhow::anyhow!("Unknown endpoint '{value}'. Supported endpoints: test, live.")),
        }
    }
}

impl FromStr for Endpoint {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Endpoint::try_from(s)
    }
}

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Look up current conditions for `city`. One call, one request.
    async fn get_weather(&self, city: &str) -> Result<WeatherResult, FetchError>;
}

/// Providers keyed by the endpoint they talk to.
pub type Providers = HashMap<Endpoint, Arc<dyn WeatherProvider>>;

/// Construct the provider for one endpoint, if it has a URL.
pub fn provider_from_config(
    endpoint: Endpoint,
    config: &Config,
    http: &Client,
) -> Option<Arc<dyn WeatherProvider>> {
    let url = config.endpoint_url(endpoint)?;
    let provider: Arc<dyn WeatherProvider> =
        Arc::new(HttpWeatherProvider::with_client(url.to_owned(), http.clone()));
    Some(provider)
}

/// Construct providers for every endpoint that has a URL. They share one
/// connection pool.
///
/// Endpoints without one are left out; submitting against them fails with
/// [`FetchError::MissingEndpoint`] instead of failing here.
pub fn providers_from_config(config: &Config) -> Providers {
    let http = Client::new();
    Endpoint::all()
        .iter()
        .filter_map(|&endpoint| {
            provider_from_config(endpoint, config, &http).map(|provider| (endpoint, provider))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn endpoint_as_str_roundtrip() {
        for endpoint in Endpoint::all() {
            let parsed = Endpoint::try_from(endpoint.as_str()).expect("roundtrip should succeed");
            assert_eq!(*endpoint, parsed);
        }
    }

    #[test]
    fn endpoint_parse_is_case_insensitive() {
        assert_eq!("LIVE".parse::<Endpoint>().unwrap(), Endpoint::Live);
    }

    #[test]
    fn unknown_endpoint_error() {
        let err = Endpoint::try_from("staging").unwrap_err();
        assert!(err.to_string().contains("Unknown endpoint"));
    }

    #[test]
    fn toggled_flips_between_the_two() {
        assert_eq!(Endpoint::Test.toggled(), Endpoint::Live);
        assert_eq!(Endpoint::Live.toggled().toggled(), Endpoint::Live);
    }

    #[test]
    fn providers_skip_endpoints_without_url() {
        let mut cfg = Config::default();
        cfg.upsert_endpoint_url(Endpoint::Live, "http://localhost:9/weather".to_string());

        let providers = providers_from_config(&cfg);
        assert!(providers.contains_key(&Endpoint::Live));
        if Endpoint::Test.baked_url().is_none() {
            assert!(!providers.contains_key(&Endpoint::Test));
        }
    }
}
