//! # App Settings
//!
//! Host entry point. Loads `app.ini`, installs logging as the `[log]`
//! section describes, and reports what was loaded. Any settings error is
//! printed and the process exits with a non-zero status.

use anyhow::Result;
use tracing::info;

use app_settings::config::Settings;

fn main() -> Result<()> {
    // Load configuration before logging; the [log] section configures it
    let settings = Settings::initialize()?;

    app_settings::telemetry::init_tracing(&settings.log)?;

    info!(
        run_mode = %settings.run_mode,
        template = %settings.app.template,
        page_size = settings.app.page_size,
        jwt_expires_at = ?settings.app.jwt_expires_at,
        "Configuration loaded"
    );
    info!(
        address = %settings.server.bind_address(),
        read_timeout = ?settings.server.read_timeout,
        write_timeout = ?settings.server.write_timeout,
        "Server settings"
    );
    info!(
        host = %settings.database.host,
        database = %settings.database.name,
        max_lifetime = ?settings.database.max_lifetime,
        "Database settings"
    );

    Ok(())
}
