//! Application settings and configuration structures.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use jsonwebtoken::Algorithm;
use serde::Deserialize;
use tracing::debug;

use super::source::ConfigFile;
use crate::shared::SettingsError;

/// Name of the settings file, looked up next to this source file.
pub const CONFIG_FILE_NAME: &str = "app.ini";

/// Run mode used when `RUN_MODE` is absent.
pub const DEFAULT_RUN_MODE: &str = "debug";

/// JWT expiry in minutes when `JWT_EXPIRE_TIME` is absent.
pub const DEFAULT_JWT_EXPIRE_MINUTES: u64 = 10;

/// HTTP read/write timeout in seconds when not configured.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Maximum connection lifetime in seconds when `MaxLifetime` is absent.
pub const DEFAULT_MAX_LIFETIME_SECS: u64 = 60;

/// Root configuration structure containing all application settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Operational profile (e.g. "debug", "release")
    pub run_mode: String,

    /// Application settings (templates, paging, JWT)
    pub app: ApplicationSettings,

    /// HTTP server settings
    pub server: ServerSettings,

    /// MySQL settings
    pub database: DatabaseSettings,

    /// Logging settings
    pub log: LoggingSettings,
}

/// Application-level settings, section `[app]`.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ApplicationSettings {
    /// Template set used for rendering
    #[serde(rename = "template")]
    pub template: String,

    /// Items per page in paginated listings
    #[serde(rename = "pagesize")]
    pub page_size: u32,

    /// Secret key for signing tokens
    #[serde(rename = "jwtsecret")]
    pub jwt_secret: String,

    /// Token lifetime, from `JWT_EXPIRE_TIME` minutes
    #[serde(skip)]
    pub jwt_expires_at: Duration,

    /// JWT signing algorithm name (e.g. "HS256")
    #[serde(rename = "signingmethod")]
    pub signing_method: String,
}

/// HTTP server settings, section `[server]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Host address to bind to (e.g., "0.0.0.0")
    #[serde(rename = "httpaddress")]
    pub http_address: String,

    /// Port number to listen on
    #[serde(rename = "httpport")]
    pub http_port: u16,

    /// From `ReadTimeout` seconds
    #[serde(skip)]
    pub read_timeout: Duration,

    /// From `WriteTimeout` seconds
    #[serde(skip)]
    pub write_timeout: Duration,
}

/// MySQL settings, section `[database-mysql]`.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    /// Log every SQL statement
    #[serde(rename = "logmode")]
    pub log_mode: bool,

    #[serde(rename = "mysqluser")]
    pub user: String,

    #[serde(rename = "mysqlpassword")]
    pub password: String,

    /// Host, optionally with port (e.g., "127.0.0.1:3306")
    #[serde(rename = "mysqlhost")]
    pub host: String,

    /// Database name
    #[serde(rename = "mysqlname")]
    pub name: String,

    /// Prefix prepended to every table name
    #[serde(rename = "mysqlprefix")]
    pub prefix: String,

    /// Maximum connection lifetime, from `MaxLifetime` seconds
    #[serde(skip)]
    pub max_lifetime: Duration,
}

/// Logging settings, section `[log]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Minimum level (trace, debug, info, warn, error)
    #[serde(rename = "level")]
    pub level: String,

    /// Output format ("text" or "json")
    #[serde(rename = "formatter")]
    pub formatter: String,

    /// Include source file and line in each event
    #[serde(rename = "reportcaller")]
    pub report_caller: bool,
}

/// Path of the settings file shipped next to the loader's source.
///
/// # Errors
///
/// Returns `SettingsError::Locate` if the source location has no parent
/// directory.
pub fn default_config_path() -> Result<PathBuf, SettingsError> {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join(file!())
        .parent()
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .ok_or(SettingsError::Locate)
}

/// Read the top-level `RUN_MODE` key. Never fails.
pub fn load_run_mode(file: &ConfigFile) -> String {
    file.top_level("RUN_MODE")
        .unwrap_or_else(|| DEFAULT_RUN_MODE.to_string())
}

impl Settings {
    /// Load settings from the `app.ini` shipped next to the loader.
    ///
    /// The loading order is:
    /// 1. `RUN_MODE` (top level)
    /// 2. `[app]`
    /// 3. `[server]`
    /// 4. `[database-mysql]`
    /// 5. `[log]`
    ///
    /// # Errors
    ///
    /// Returns `SettingsError` if the file cannot be located or read, if a
    /// section is missing, or if a value cannot be mapped onto its field.
    pub fn initialize() -> Result<Self, SettingsError> {
        Self::from_path(&default_config_path()?)
    }

    /// Load settings from an explicit file.
    pub fn from_path(path: &Path) -> Result<Self, SettingsError> {
        Self::from_file(&ConfigFile::open(path)?)
    }

    /// Build settings from an already parsed file.
    pub fn from_file(file: &ConfigFile) -> Result<Self, SettingsError> {
        let settings = Self {
            run_mode: load_run_mode(file),
            app: ApplicationSettings::load(file)?,
            server: ServerSettings::load(file)?,
            database: DatabaseSettings::load(file)?,
            log: LoggingSettings::load(file)?,
        };

        debug!(run_mode = %settings.run_mode, "Settings loaded");
        Ok(settings)
    }

    /// Whether the run mode is `debug`, ignoring case.
    pub fn is_debug(&self) -> bool {
        self.run_mode.eq_ignore_ascii_case(DEFAULT_RUN_MODE)
    }
}

impl FromStr for Settings {
    type Err = SettingsError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Self::from_file(&ConfigFile::parse(text)?)
    }
}

impl ApplicationSettings {
    pub const SECTION: &'static str = "app";

    /// Load the `[app]` section.
    pub fn load(file: &ConfigFile) -> Result<Self, SettingsError> {
        let section = file.section(Self::SECTION)?;
        let mut settings: Self = section.map_to()?;

        settings.jwt_expires_at = section.minutes_or("JWT_EXPIRE_TIME", DEFAULT_JWT_EXPIRE_MINUTES);

        debug!(
            section = Self::SECTION,
            template = %settings.template,
            page_size = settings.page_size,
            jwt_expires_at = ?settings.jwt_expires_at,
            "Section loaded"
        );
        Ok(settings)
    }

    /// Parse the configured signing method into a JWT algorithm.
    pub fn jwt_algorithm(&self) -> Result<Algorithm, jsonwebtoken::errors::Error> {
        Algorithm::from_str(&self.signing_method)
    }
}

impl fmt::Debug for ApplicationSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApplicationSettings")
            .field("template", &self.template)
            .field("page_size", &self.page_size)
            .field("jwt_secret", &"[REDACTED]")
            .field("jwt_expires_at", &self.jwt_expires_at)
            .field("signing_method", &self.signing_method)
            .finish()
    }
}

impl ServerSettings {
    pub const SECTION: &'static str = "server";

    /// Load the `[server]` section.
    pub fn load(file: &ConfigFile) -> Result<Self, SettingsError> {
        let section = file.section(Self::SECTION)?;
        let mut settings: Self = section.map_to()?;

        settings.read_timeout = section.seconds_or("ReadTimeout", DEFAULT_TIMEOUT_SECS);
        settings.write_timeout = section.seconds_or("WriteTimeout", DEFAULT_TIMEOUT_SECS);

        debug!(
            section = Self::SECTION,
            address = %settings.bind_address(),
            read_timeout = ?settings.read_timeout,
            write_timeout = ?settings.write_timeout,
            "Section loaded"
        );
        Ok(settings)
    }

    /// Get the full server address as a string.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.http_address, self.http_port)
    }
}

impl DatabaseSettings {
    pub const SECTION: &'static str = "database-mysql";

    /// Load the `[database-mysql]` section.
    pub fn load(file: &ConfigFile) -> Result<Self, SettingsError> {
        let section = file.section(Self::SECTION)?;
        let mut settings: Self = section.map_to()?;

        settings.max_lifetime = section.seconds_or("MaxLifetime", DEFAULT_MAX_LIFETIME_SECS);

        debug!(
            section = Self::SECTION,
            host = %settings.host,
            database = %settings.name,
            max_lifetime = ?settings.max_lifetime,
            "Section loaded"
        );
        Ok(settings)
    }

    /// Get the connection URL, with user and password percent-encoded.
    pub fn connection_url(&self) -> String {
        format!(
            "mysql://{}:{}@{}/{}",
            urlencoding::encode(&self.user),
            urlencoding::encode(&self.password),
            self.host,
            self.name
        )
    }

    /// Prefixed table name.
    pub fn table_name(&self, name: &str) -> String {
        format!("{}{}", self.prefix, name)
    }
}

impl fmt::Debug for DatabaseSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseSettings")
            .field("log_mode", &self.log_mode)
            .field("user", &self.user)
            .field("password", &"[REDACTED]")
            .field("host", &self.host)
            .field("name", &self.name)
            .field("prefix", &self.prefix)
            .field("max_lifetime", &self.max_lifetime)
            .finish()
    }
}

impl LoggingSettings {
    pub const SECTION: &'static str = "log";

    /// Load the `[log]` section.
    pub fn load(file: &ConfigFile) -> Result<Self, SettingsError> {
        let settings: Self = file.section(Self::SECTION)?.map_to()?;

        debug!(
            section = Self::SECTION,
            level = %settings.level,
            formatter = %settings.formatter,
            "Section loaded"
        );
        Ok(settings)
    }
}
