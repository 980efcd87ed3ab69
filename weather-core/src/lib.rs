//! Core library for the `weather` lookup widget.
//!
//! This crate defines:
//! - Endpoint configuration (config file, environment, build-time defaults)
//! - The HTTP backend behind the `WeatherProvider` trait
//! - The validated `WeatherResult` model
//! - The widget state machine and its text rendering
//!
//! It is used by `weather-cli`, but can also be reused by other front ends.

pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod render;
pub mod widget;

pub use config::{Config, EndpointConfig};
pub use error::FetchError;
pub use model::{Current, Location, WeatherResult};
pub use provider::{Endpoint, Providers, WeatherProvider};
pub use widget::{Notice, NoticeLevel, Outcome, Phase, Submission, Widget};
