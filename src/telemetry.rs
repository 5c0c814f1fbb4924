//! Telemetry and Observability
//!
//! Structured logging setup driven by the `[log]` settings section.

use tracing_subscriber::{
    filter::LevelFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

use crate::config::LoggingSettings;
use crate::shared::TelemetryError;

/// Event output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl LogFormat {
    /// Parse a formatter name; empty means text.
    pub fn parse(formatter: &str) -> Result<Self, TelemetryError> {
        match formatter.trim().to_ascii_lowercase().as_str() {
            "" | "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(TelemetryError::Formatter(formatter.to_string())),
        }
    }
}

/// Map a configured level onto a filter directive.
///
/// Accepts `warning`, `fatal` and `panic` as aliases; empty means `info`.
pub fn level_directive(level: &str) -> String {
    match level.trim().to_ascii_lowercase().as_str() {
        "" => "info".to_string(),
        "warning" => "warn".to_string(),
        "fatal" | "panic" => "error".to_string(),
        other => other.to_string(),
    }
}

/// Build the event filter. `RUST_LOG` wins over the configured level.
pub fn env_filter(settings: &LoggingSettings) -> Result<EnvFilter, TelemetryError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }

    let level: LevelFilter = level_directive(&settings.level)
        .parse()
        .map_err(|_| TelemetryError::Level(settings.level.clone()))?;

    Ok(EnvFilter::default().add_directive(level.into()))
}

/// Initialize tracing subscriber
pub fn init_tracing(settings: &LoggingSettings) -> Result<(), TelemetryError> {
    let format = LogFormat::parse(&settings.formatter)?;
    let env_filter = env_filter(settings)?;
    let report_caller = settings.report_caller;

    let registry = tracing_subscriber::registry().with(env_filter);

    match format {
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_file(report_caller)
                    .with_line_number(report_caller),
            )
            .try_init()?,
        LogFormat::Text => registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_file(report_caller)
                    .with_line_number(report_caller),
            )
            .try_init()?,
    }

    tracing::info!(level = %settings.level, ?format, "Tracing initialized");
    Ok(())
}
