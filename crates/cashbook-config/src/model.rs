use serde::{Deserialize, Serialize};
use std::{path::{Path, PathBuf}, time::Duration};

use crate::SettingsError;

pub const WORKBOOK_FILE_NAME: &str = "workbook.json";

/// User-editable settings for the cashbook tools.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Settings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Workbook location. Defaults to `workbook.json` in the application home.
    pub workbook_path: Option<PathBuf>,
    #[serde(default = "Settings::default_lock_timeout_ms")]
    pub lock_timeout_ms: u64,
    #[serde(default = "Settings::default_lock_retry_ms")]
    pub lock_retry_ms: u64,
    #[serde(default = "Settings::default_recent_limit")]
    pub recent_limit: usize,
    #[serde(default = "Settings::default_log_filter")]
    pub log_filter: String,
    #[serde(default = "Settings::default_ui_color_enabled")]
    pub ui_color_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            workbook_path: None,
            lock_timeout_ms: Self::default_lock_timeout_ms(),
            lock_retry_ms: Self::default_lock_retry_ms(),
            recent_limit: Self::default_recent_limit(),
            log_filter: Self::default_log_filter(),
            ui_color_enabled: Self::default_ui_color_enabled(),
        }
    }
}

impl Settings {
    pub const KEYS: [&'static str; 6] = [
        "workbook_path",
        "lock_timeout_ms",
        "lock_retry_ms",
        "recent_limit",
        "log_filter",
        "ui_color_enabled",
    ];

    pub fn default_lock_timeout_ms() -> u64 {
        5_000
    }

    pub fn default_lock_retry_ms() -> u64 {
        50
    }

    pub fn default_recent_limit() -> usize {
        5
    }

    pub fn default_log_filter() -> String {
        "cashbook=info".into()
    }

    pub fn default_ui_color_enabled() -> bool {
        true
    }

    pub fn resolve_workbook_path(&self, home: &Path) -> PathBuf {
        match &self.workbook_path {
            Some(path) if path.is_absolute() => path.clone(),
            Some(path) => home.join(path),
            None => home.join(WORKBOOK_FILE_NAME),
        }
    }

    pub fn lock_timeout(&self) -> Duration {
        Duration::from_millis(self.lock_timeout_ms)
    }

    pub fn lock_retry(&self) -> Duration {
        Duration::from_millis(self.lock_retry_ms.max(1))
    }

    /// Current value of `key` as text, or `None` for an unknown key.
    pub fn get(&self, key: &str) -> Option<String> {
        let value = match key {
            "workbook_path" => self
                .workbook_path
                .as_ref()
                .map(|path| path.display().to_string())
                .unwrap_or_default(),
            "lock_timeout_ms" => self.lock_timeout_ms.to_string(),
            "lock_retry_ms" => self.lock_retry_ms.to_string(),
            "recent_limit" => self.recent_limit.to_string(),
            "log_filter" => self.log_filter.clone(),
            "ui_color_enabled" => self.ui_color_enabled.to_string(),
            _ => return None,
        };
        Some(value)
    }

    /// Parses `value` into the field named `key`. An empty `workbook_path`
    /// restores the default location.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), SettingsError> {
        let value = value.trim();
        match key {
            "workbook_path" => {
                self.workbook_path = (!value.is_empty()).then(|| PathBuf::from(value));
            }
            "lock_timeout_ms" => self.lock_timeout_ms = parse_value(key, value)?,
            "lock_retry_ms" => self.lock_retry_ms = parse_value(key, value)?,
            "recent_limit" => self.recent_limit = parse_value(key, value)?,
            "log_filter" => {
                if value.is_empty() {
                    return Err(invalid(key, "filter must not be empty"));
                }
                self.log_filter = value.to_string();
            }
            "ui_color_enabled" => self.ui_color_enabled = parse_value(key, value)?,
            _ => {
                return Err(invalid(
                    key,
                    format!("unknown key (expected one of {})", Self::KEYS.join(", ")),
                ))
            }
        }
        Ok(())
    }
}

fn parse_value<T>(key: &str, value: &str) -> Result<T, SettingsError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.parse().map_err(|err: T::Err| invalid(key, err.to_string()))
}

fn invalid(key: &str, reason: impl Into<String>) -> SettingsError {
    SettingsError::Invalid {
        key: key.to_string(),
        reason: reason.into(),
    }
}
