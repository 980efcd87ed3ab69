//! State of the lookup widget: the city field, the endpoint toggle, the
//! last result and the notifications waiting to be shown.
//!
//! A submit is split in three so the network call does not hold the widget:
//! [`Widget::begin_submit`] validates and hands out a [`Submission`],
//! [`Submission::run`] does the request, [`Widget::apply`] commits the
//! outcome. Outcomes are applied in whatever order they arrive; the last one
//! wins.

use std::{collections::VecDeque, sync::Arc};

use tracing::{debug, error};

use crate::{
    error::FetchError,
    model::WeatherResult,
    provider::{Endpoint, Providers, WeatherProvider},
};

pub const EMPTY_CITY_WARNING: &str = "Please enter a city name.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Pending,
    ShowingResult,
    ShowingError,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Warning,
    Error,
}

/// A transient notification (toast).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn warning(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Warning, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Error, message: message.into() }
    }
}

/// A request that has been validated and detached from the widget.
#[derive(Debug)]
pub struct Submission {
    city: String,
    endpoint: Endpoint,
    provider: Option<Arc<dyn WeatherProvider>>,
}

impl Submission {
    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn endpoint(&self) -> Endpoint {
        self.endpoint
    }

    pub async fn run(self) -> Outcome {
        let result = match &self.provider {
            Some(provider) => provider.get_weather(&self.city).await,
            None => Err(FetchError::MissingEndpoint(self.endpoint)),
        };

        Outcome { city: self.city, endpoint: self.endpoint, result }
    }
}

/// What came back for one submission.
#[derive(Debug)]
pub struct Outcome {
    pub city: String,
    pub endpoint: Endpoint,
    pub result: Result<WeatherResult, FetchError>,
}

#[derive(Debug)]
pub struct Widget {
    providers: Providers,
    endpoint: Endpoint,
    city: String,
    phase: Phase,
    result: Option<WeatherResult>,
    error: Option<String>,
    notices: VecDeque<Notice>,
}

impl Widget {
    pub fn new(providers: Providers, endpoint: Endpoint) -> Self {
        Self {
            providers,
            endpoint,
            city: String::new(),
            phase: Phase::Idle,
            result: None,
            error: None,
            notices: VecDeque::new(),
        }
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn set_city(&mut self, city: impl Into<String>) {
        self.city = city.into();
    }

    pub fn endpoint(&self) -> Endpoint {
        self.endpoint
    }

    /// Switch the target of later submissions. The shown result stays.
    pub fn toggle_endpoint(&mut self) -> Endpoint {
        self.endpoint = self.endpoint.toggled();
        debug!(endpoint = %self.endpoint, "Endpoint toggled");
        self.endpoint
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn result(&self) -> Option<&WeatherResult> {
        self.result.as_ref()
    }

    /// The inline error line, if the last submission failed.
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn drain_notices(&mut self) -> Vec<Notice> {
        self.notices.drain(..).collect()
    }

    /// Validate the city field and detach a request for it.
    ///
    /// Returns `None` for blank input; a warning is queued and nothing else
    /// changes. Otherwise the city goes out exactly as typed.
    pub fn begin_submit(&mut self) -> Option<Submission> {
        if self.city.trim().is_empty() {
            self.notices.push_back(Notice::warning(EMPTY_CITY_WARNING));
            return None;
        }

        self.phase = Phase::Pending;

        Some(Submission {
            city: self.city.clone(),
            endpoint: self.endpoint,
            provider: self.providers.get(&self.endpoint).cloned(),
        })
    }

    pub fn apply(&mut self, outcome: Outcome) {
        match outcome.result {
            Ok(result) => {
                debug!(city = %outcome.city, endpoint = %outcome.endpoint, "Weather result stored");
                self.result = Some(result);
                self.error = None;
                self.phase = Phase::ShowingResult;
            }
            Err(err) => {
                error!(
                    city = %outcome.city,
                    endpoint = %outcome.endpoint,
                    error = %err,
                    "Weather lookup failed"
                );
                let message = err.user_message();
                self.result = None;
                self.error = Some(message.to_string());
                self.notices.push_back(Notice::error(message));
                self.phase = Phase::ShowingError;
            }
        }
    }

    /// Validate, fetch and commit in one go. Returns whether a request was made.
    pub async fn submit(&mut self) -> bool {
        let Some(submission) = self.begin_submit() else {
            return false;
        };

        let outcome = submission.run().await;
        self.apply(outcome);
        true
    }
}
