use crate::ipc::events::NotificationKind;

/// Configuration for `NotificationCenter`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationConfig {
    /// Default auto-dismiss for `success(..)` (ms). Default: 5000.
    pub success_duration_ms: u64,
    /// Default auto-dismiss for `error(..)` (ms). Default: 8000.
    pub error_duration_ms: u64,
    /// Default auto-dismiss for `info(..)` (ms). Default: 5000.
    pub info_duration_ms: u64,
    /// Default auto-dismiss for `warning(..)` (ms). Default: 6000.
    pub warning_duration_ms: u64,
    /// Duration applied to pushed notifications that carry none. Default: 5000.
    pub push_duration_ms: u64,
    /// Category applied to pushed notifications that carry none. Default: info.
    pub push_kind: NotificationKind,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            success_duration_ms: 5_000,
            error_duration_ms: 8_000,
            info_duration_ms: 5_000,
            warning_duration_ms: 6_000,
            push_duration_ms: 5_000,
            push_kind: NotificationKind::Info,
        }
    }
}

impl NotificationConfig {
    /// Default auto-dismiss for the convenience constructor of `kind`.
    pub fn default_duration(&self, kind: NotificationKind) -> u64 {
        match kind {
            NotificationKind::Success => self.success_duration_ms,
            NotificationKind::Error => self.error_duration_ms,
            NotificationKind::Info => self.info_duration_ms,
            NotificationKind::Warning => self.warning_duration_ms,
        }
    }
}
