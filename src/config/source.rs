//! Raw access to the parsed INI file.
//!
//! `rust-ini` does the parsing with escapes off and inline comments on, so
//! values reach the settings exactly as written. Section names and keys are
//! folded to lowercase in file order, the last occurrence winning, and values
//! are held as `config::Value` so serde can coerce them onto typed fields.

use std::path::Path;
use std::time::Duration;

use config::{Map, Value, ValueKind};
use ini::{Ini, ParseOption};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::shared::SettingsError;

/// A parsed settings file.
///
/// Owns the raw representation; the typed settings are built from it and
/// it can be dropped afterwards.
#[derive(Debug, Clone, Default)]
pub struct ConfigFile {
    top_level: Map<String, Value>,
    sections: Map<String, Map<String, Value>>,
}

impl ConfigFile {
    /// Read and parse the INI file at `path`.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::Read` if the file is missing, unreadable or
    /// malformed.
    pub fn open(path: &Path) -> Result<Self, SettingsError> {
        debug!(path = %path.display(), "Reading settings file");

        let ini = Ini::load_from_file_opt(path, parse_option()).map_err(|source| {
            SettingsError::Read {
                path: path.to_path_buf(),
                source,
            }
        })?;

        Ok(Self::from_ini(&ini))
    }

    /// Parse INI text held in memory.
    pub fn parse(text: &str) -> Result<Self, SettingsError> {
        let ini = Ini::load_from_str_opt(text, parse_option()).map_err(SettingsError::Parse)?;
        Ok(Self::from_ini(&ini))
    }

    fn from_ini(ini: &Ini) -> Self {
        let mut file = Self::default();

        // Same-named sections merge; a later key replaces an earlier one
        for (section, properties) in ini.iter() {
            let keys = match section {
                Some(name) => file
                    .sections
                    .entry(name.trim().to_ascii_lowercase())
                    .or_default(),
                None => &mut file.top_level,
            };

            for (key, value) in properties.iter() {
                keys.insert(
                    key.trim().to_ascii_lowercase(),
                    Value::new(None, ValueKind::String(value.to_string())),
                );
            }
        }

        file
    }

    /// Look up a mandatory section by name.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::MissingSection` when no section of that name
    /// exists.
    pub fn section(&self, name: &'static str) -> Result<Section, SettingsError> {
        let keys = self
            .sections
            .get(&name.to_ascii_lowercase())
            .cloned()
            .ok_or(SettingsError::MissingSection(name))?;

        Ok(Section { name, keys })
    }

    /// Value of a key outside any section. Empty values count as absent.
    pub fn top_level(&self, key: &str) -> Option<String> {
        self.top_level
            .get(&key.to_ascii_lowercase())
            .and_then(non_blank)
    }
}

fn parse_option() -> ParseOption {
    ParseOption {
        enabled_escape: false,
        ..ParseOption::default()
    }
}

/// One named section of the settings file.
#[derive(Debug, Clone)]
pub struct Section {
    name: &'static str,
    keys: Map<String, Value>,
}

impl Section {
    /// Section name as requested by the loader.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Trimmed value of `key`; `None` if absent or empty.
    pub fn get(&self, key: &str) -> Option<String> {
        self.keys.get(&key.to_ascii_lowercase()).and_then(non_blank)
    }

    /// Map the section's keys onto `T` by name.
    ///
    /// `T` must name its fields in lowercase; keys that match no field are
    /// ignored and keys with empty values are skipped so the field keeps its
    /// default.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::Mapping` when a value cannot be coerced to the
    /// field's type.
    pub fn map_to<T: DeserializeOwned>(&self) -> Result<T, SettingsError> {
        let present: Map<String, Value> = self
            .keys
            .iter()
            .filter(|(_, value)| non_blank(value).is_some())
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        Value::new(None, ValueKind::Table(present))
            .try_deserialize()
            .map_err(|source| SettingsError::Mapping {
                section: self.name,
                source,
            })
    }

    /// Non-negative integer at `key`, or `default` when the key is absent,
    /// empty or not a non-negative integer.
    pub fn uint_or(&self, key: &str, default: u64) -> u64 {
        match self.get(key) {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                debug!(section = self.name, key, raw = %raw, default, "Unparsable integer, using default");
                default
            }),
            None => default,
        }
    }

    /// Duration from a whole number of seconds at `key`.
    pub fn seconds_or(&self, key: &str, default_secs: u64) -> Duration {
        Duration::from_secs(self.uint_or(key, default_secs))
    }

    /// Duration from a whole number of minutes at `key`.
    pub fn minutes_or(&self, key: &str, default_minutes: u64) -> Duration {
        Duration::from_secs(self.uint_or(key, default_minutes).saturating_mul(60))
    }
}

fn non_blank(value: &Value) -> Option<String> {
    value
        .clone()
        .into_string()
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
