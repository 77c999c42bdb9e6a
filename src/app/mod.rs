//! Application glue module
//!
//! Configuration loading and defaults.

mod config;

pub use config::{Config, ConfigError};
