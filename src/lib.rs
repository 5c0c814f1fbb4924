//! # App Settings Library
//!
//! This crate loads the blog server's settings from a single INI file into
//! typed structures:
//! - Application settings (templates, paging, JWT)
//! - HTTP server settings (bind address, timeouts)
//! - MySQL settings (credentials, table prefix, connection lifetime)
//! - Logging settings (level, formatter, caller reporting)
//!
//! The settings are built once at startup and handed to consumers by
//! reference; nothing is stored in global state.
//!
//! ## Module Structure
//!
//! ```text
//! app_settings/
//! +-- config/     Settings file access and typed settings
//! +-- shared/     Error types
//! +-- telemetry   Logging subscriber setup from the [log] section
//! ```

// Configuration module
pub mod config;

// Shared utilities
pub mod shared;

// Telemetry and observability
pub mod telemetry;

pub use config::Settings;
pub use shared::{SettingsError, TelemetryError};
