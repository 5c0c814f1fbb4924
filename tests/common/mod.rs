//! Common Test Utilities
//!
//! Settings file fixtures written to temporary directories.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

/// A complete settings file with every key set.
pub const COMPLETE_INI: &str = r#"
RUN_MODE = production

[app]
Template = default
PageSize = 10
JwtSecret = 23347040412
JWT_EXPIRE_TIME = 3
SigningMethod = HS256

[server]
HttpAddress = 0.0.0.0
HttpPort = 8000
ReadTimeout = 30
WriteTimeout = 45

[database-mysql]
LogMode = true
MysqlUser = root
MysqlPassword = secret
MysqlHost = 127.0.0.1:3306
MysqlName = blog
MysqlPrefix = blog_
MaxLifetime = 120

[log]
Level = debug
Formatter = json
ReportCaller = true
"#;

/// Settings file written into its own temporary directory.
pub struct TestFile {
    pub path: PathBuf,
    _dir: TempDir,
}

impl TestFile {
    /// Write `contents` to `app.ini` in a fresh temporary directory
    pub fn new(contents: &str) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("app.ini");
        fs::write(&path, contents).expect("write settings file");
        Self { path, _dir: dir }
    }

    /// The complete fixture with the `[name]` section and its keys removed
    pub fn without_section(name: &str) -> Self {
        Self::new(&remove_section(COMPLETE_INI, name))
    }
}

/// Drop a section header and every line up to the next header.
pub fn remove_section(ini: &str, name: &str) -> String {
    let header = format!("[{}]", name);
    let mut skipping = false;
    let mut out = String::new();

    for line in ini.lines() {
        let trimmed = line.trim();
        if trimmed.starts_with('[') {
            skipping = trimmed == header;
        }
        if !skipping {
            out.push_str(line);
            out.push('\n');
        }
    }
    out
}
