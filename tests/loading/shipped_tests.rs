//! Shipped app.ini Tests

use std::process::Command;
use std::time::Duration;

use app_settings::config::{default_config_path, Settings};

/// Test the shipped file loads through the default location
#[test]
fn test_initialize_loads_shipped_file() {
    let settings = Settings::initialize().unwrap();

    assert_eq!(settings.run_mode, "debug");
    assert_eq!(settings.app.jwt_expires_at, Duration::from_secs(10 * 60));
    assert_eq!(settings.server.bind_address(), "0.0.0.0:8000");
    assert_eq!(settings.database.table_name("tag"), "blog_tag");
    assert_eq!(settings.log.formatter, "text");
    assert!(settings.app.jwt_algorithm().is_ok());
}

/// Test the default path points into the crate sources
#[test]
fn test_default_path_is_next_to_loader() {
    let path = default_config_path().unwrap();
    assert_eq!(path.file_name().unwrap(), "app.ini");
    assert!(path.parent().unwrap().ends_with("src/config"));
}

/// Test the host binary exits cleanly with the shipped file
#[test]
fn test_binary_exits_successfully() {
    let output = Command::new(env!("CARGO_BIN_EXE_app-settings"))
        .env_remove("RUST_LOG")
        .output()
        .expect("run binary");

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
}
