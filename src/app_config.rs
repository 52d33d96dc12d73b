use serde::{Deserialize, Serialize};
use std::default::Default;

/// Application configuration module
/// This module holds the persistent defaults for a shift run. Values set
/// here are overridden by their command-line counterparts when given.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Write shifted output to a derived sibling file instead of
    /// overwriting the input
    #[serde(default)]
    pub create_new_file: bool,

    /// Clamp timestamps that would go negative to zero
    #[serde(default)]
    pub prevent_underflow: bool,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Log verbosity, lowest to highest
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            create_new_file: false,
            prevent_underflow: false,
            log_level: LogLevel::default(),
        }
    }
}
