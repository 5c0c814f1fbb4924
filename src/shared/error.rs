//! Settings Error Types
//!
//! Errors raised while locating, reading and mapping the settings file, and
//! while installing the logging subscriber those settings describe.

use std::path::PathBuf;

use config::ConfigError;
use ini::{Error as IniError, ParseError};

/// Settings loading error type
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Cannot determine the settings file location")]
    Locate,

    #[error("Fail to read file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: IniError,
    },

    #[error("Fail to parse settings: {0}")]
    Parse(#[source] ParseError),

    #[error("Fail to get section '{0}'")]
    MissingSection(&'static str),

    #[error("Fail to map section '{section}': {source}")]
    Mapping {
        section: &'static str,
        #[source]
        source: ConfigError,
    },
}

impl SettingsError {
    /// Name of the section this error is about, if any.
    pub fn section(&self) -> Option<&'static str> {
        match self {
            SettingsError::MissingSection(section) | SettingsError::Mapping { section, .. } => {
                Some(section)
            }
            _ => None,
        }
    }
}

/// Logging subscriber installation error type
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    #[error("Invalid log level '{0}'")]
    Level(String),

    #[error("Unknown log formatter '{0}' (expected 'text' or 'json')")]
    Formatter(String),

    #[error("Logging subscriber already installed: {0}")]
    Install(#[from] tracing_subscriber::util::TryInitError),
}
