//! Shared library for the schedule proxy Lambda functions.
//!
//! This crate provides configuration, error handling, secret resolution and the
//! upstream Sportradar client used by the Lambda binaries.

pub mod config;
pub mod error;
pub mod http;
pub mod models;
pub mod schedule;
pub mod secrets;

pub use config::{ApiKeySource, Config, UpstreamStatusPolicy};
pub use error::{Error, Result};
pub use models::Season;
pub use schedule::{ScheduleClient, UpstreamResponse};
pub use secrets::{get_secret, resolve_api_key};
