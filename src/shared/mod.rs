//! Shared utilities

pub mod error;

pub use error::{SettingsError, TelemetryError};
