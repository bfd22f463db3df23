#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::new_without_default,
    clippy::return_self_not_must_use
)]

pub mod config;
pub mod core;
pub mod error;
pub mod runner;

pub use crate::core::composer::{
    Composer, ConfidenceLevel, Payload, Response, Scenario, compose, compose_value,
    compose_with_seed,
};
pub use config::Config;
pub use error::{ComposeError, ConfigError, PayloadError, RunnerError};
