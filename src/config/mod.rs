//! # Configuration Module
//!
//! This module loads the application settings from a single INI file,
//! `app.ini`, shipped next to the loader source. The file holds a top-level
//! `RUN_MODE` key and four mandatory sections:
//! - `[app]` (templates, paging, JWT)
//! - `[server]` (HTTP bind address and timeouts)
//! - `[database-mysql]` (MySQL credentials and connection lifetime)
//! - `[log]` (level, formatter, caller reporting)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use app_settings::config::Settings;
//!
//! let settings = Settings::initialize()?;
//! println!("Server will listen on {}", settings.server.bind_address());
//! ```

mod settings;
mod source;

pub use settings::*;
pub use source::{ConfigFile, Section};
