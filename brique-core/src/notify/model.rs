//! Records held by the notification center and the snapshot it publishes.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ipc::events::{NotificationKind, ProgressPayload};

/// A transient message shown to the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    /// Unique among the notifications currently held.
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Creation time, serialized as milliseconds since the Unix epoch.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
    /// Auto-dismiss delay in milliseconds. `None` or `Some(0)` means the
    /// notification stays until removed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u64>,
}

impl Notification {
    /// Whether a deferred removal was scheduled for this notification.
    pub fn auto_dismisses(&self) -> bool {
        matches!(self.duration, Some(ms) if ms > 0)
    }
}

/// Progress of one long-running backend operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressEvent {
    pub id: String,
    pub operation: String,
    pub current: u64,
    pub total: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
}

impl ProgressEvent {
    /// Completion ratio in `[0, 1]`; `0` while the total is unknown.
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        (self.current as f64 / self.total as f64).clamp(0.0, 1.0)
    }
}

impl From<ProgressPayload> for ProgressEvent {
    fn from(p: ProgressPayload) -> Self {
        Self {
            id: p.id,
            operation: p.operation,
            current: p.current,
            total: p.total,
            filename: p.filename,
        }
    }
}

/// Immutable view of the center's state.
///
/// Both collections are shared, never mutated in place: every change to the
/// center produces a new snapshot with freshly built collections.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CenterSnapshot {
    /// Insertion order, oldest first.
    pub notifications: Arc<Vec<Notification>>,
    /// Keyed by operation id.
    pub progress: Arc<BTreeMap<String, ProgressEvent>>,
}

impl CenterSnapshot {
    pub fn notification(&self, id: &str) -> Option<&Notification> {
        self.notifications.iter().find(|n| n.id == id)
    }

    pub fn progress(&self, id: &str) -> Option<&ProgressEvent> {
        self.progress.get(id)
    }

    pub fn is_empty(&self) -> bool {
        self.notifications.is_empty() && self.progress.is_empty()
    }
}
