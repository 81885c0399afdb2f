//! Persistent relay settings (JSON file in the app data directory).

use std::fs;
use std::path::{Path, PathBuf};

use brique_core::{NotificationConfig, NotificationKind};
use serde::{Deserialize, Serialize};

/// Longest auto-dismiss accepted from the settings file (one hour).
const MAX_DURATION_MS: u64 = 3_600_000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(default)]
pub struct RelaySettings {
    pub success_duration_ms: u64,
    pub error_duration_ms: u64,
    pub info_duration_ms: u64,
    pub warning_duration_ms: u64,
    pub push_duration_ms: u64,
    pub push_kind: String,
    /// How long to keep running after the input ends so pending
    /// auto-dismiss timers can fire.
    pub linger_ms: u64,
}

impl Default for RelaySettings {
    fn default() -> Self {
        let defaults = NotificationConfig::default();
        Self {
            success_duration_ms: defaults.success_duration_ms,
            error_duration_ms: defaults.error_duration_ms,
            info_duration_ms: defaults.info_duration_ms,
            warning_duration_ms: defaults.warning_duration_ms,
            push_duration_ms: defaults.push_duration_ms,
            push_kind: defaults.push_kind.as_str().into(),
            linger_ms: 0,
        }
    }
}

impl RelaySettings {
    pub fn normalize(&mut self) {
        self.success_duration_ms = self.success_duration_ms.min(MAX_DURATION_MS);
        self.error_duration_ms = self.error_duration_ms.min(MAX_DURATION_MS);
        self.info_duration_ms = self.info_duration_ms.min(MAX_DURATION_MS);
        self.warning_duration_ms = self.warning_duration_ms.min(MAX_DURATION_MS);
        self.push_duration_ms = self.push_duration_ms.min(MAX_DURATION_MS);
        self.push_kind = normalize_kind(&self.push_kind).as_str().into();
        self.linger_ms = self.linger_ms.min(MAX_DURATION_MS);
    }

    pub fn notification_config(&self) -> NotificationConfig {
        NotificationConfig {
            success_duration_ms: self.success_duration_ms,
            error_duration_ms: self.error_duration_ms,
            info_duration_ms: self.info_duration_ms,
            warning_duration_ms: self.warning_duration_ms,
            push_duration_ms: self.push_duration_ms,
            push_kind: normalize_kind(&self.push_kind),
        }
    }
}

pub fn normalize_kind(raw: &str) -> NotificationKind {
    match raw.trim().to_ascii_lowercase().as_str() {
        "success" | "ok" => NotificationKind::Success,
        "error" | "err" => NotificationKind::Error,
        "warning" | "warn" => NotificationKind::Warning,
        _ => NotificationKind::Info,
    }
}

pub fn default_settings_path() -> PathBuf {
    if let Some(path) = std::env::var_os("BRIQUE_RELAY_SETTINGS") {
        return PathBuf::from(path);
    }
    #[cfg(target_os = "windows")]
    {
        std::env::var_os("APPDATA")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."))
            .join("Brique")
            .join("relay.json")
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var_os("XDG_DATA_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|| {
                std::env::var_os("HOME")
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from("/tmp"))
                    .join(".local")
                    .join("share")
            })
            .join("brique")
            .join("relay.json")
    }
}

/// Missing or unreadable files yield defaults.
pub fn load_settings(path: &Path) -> RelaySettings {
    let mut settings = fs::read_to_string(path)
        .ok()
        .and_then(|raw| serde_json::from_str::<RelaySettings>(&raw).ok())
        .unwrap_or_default();
    settings.normalize();
    settings
}

pub fn save_settings(path: &Path, settings: &RelaySettings) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(settings).map_err(std::io::Error::other)?;
    fs::write(path, json)
}
