//! Push channels and their payloads.
//!
//! ## Channel names
//!
//! | Payload | Channel |
//! |---------|---------|
//! | `NotificationPayload` | `"notification"` |
//! | `ProgressPayload` | `"progress"` |
//! | `ProgressCompletePayload` | `"progress:complete"` |
//!
//! Pushes are fire-and-forget: there is no acknowledgment and no reply channel.

use serde::de::IntoDeserializer;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{BriqueError, Result};

pub const CHANNEL_NOTIFICATION: &str = "notification";
pub const CHANNEL_PROGRESS: &str = "progress";
pub const CHANNEL_PROGRESS_COMPLETE: &str = "progress:complete";

/// Every channel the notification center listens on.
pub const CHANNELS: [&str; 3] = [
    CHANNEL_NOTIFICATION,
    CHANNEL_PROGRESS,
    CHANNEL_PROGRESS_COMPLETE,
];

// ---------------------------------------------------------------------------
// Notifications
// ---------------------------------------------------------------------------

/// Visual category of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
    Info,
    Warning,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Info => "info",
            Self::Warning => "warning",
        }
    }
}

/// Pushed on channel `"notification"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationPayload {
    /// Absent or `""` means the configured push default (`info`).
    #[serde(
        rename = "type",
        default,
        deserialize_with = "blank_kind_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub kind: Option<NotificationKind>,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Auto-dismiss delay in milliseconds. Absent means the configured push
    /// default; `0` means manual dismissal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u64>,
}

/// The Go backend sends an unset category as `"type": ""`.
fn blank_kind_as_none<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<NotificationKind>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) if !raw.is_empty() => {
            NotificationKind::deserialize(raw.as_str().into_deserializer()).map(Some)
        }
        _ => Ok(None),
    }
}

// ---------------------------------------------------------------------------
// Progress
// ---------------------------------------------------------------------------

/// Pushed on channel `"progress"`. Re-sending the same `id` replaces the
/// previous record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressPayload {
    pub id: String,
    #[serde(default)]
    pub operation: String,
    #[serde(default)]
    pub current: u64,
    #[serde(default)]
    pub total: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
}

/// Pushed on channel `"progress:complete"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressCompletePayload {
    pub id: String,
}

// ---------------------------------------------------------------------------
// Decoded push
// ---------------------------------------------------------------------------

/// A raw push decoded against its channel's shape.
#[derive(Debug, Clone, PartialEq)]
pub enum PushEvent {
    Notification(NotificationPayload),
    Progress(ProgressPayload),
    ProgressComplete(ProgressCompletePayload),
}

impl PushEvent {
    /// Decode `payload` as the shape expected on `channel`.
    ///
    /// # Errors
    /// - `BriqueError::UnknownChannel` for a channel outside [`CHANNELS`].
    /// - `BriqueError::Payload` when the payload does not match the shape.
    pub fn decode(channel: &str, payload: serde_json::Value) -> Result<Self> {
        let malformed = |source| BriqueError::Payload {
            channel: channel.to_string(),
            source,
        };
        match channel {
            CHANNEL_NOTIFICATION => serde_json::from_value(payload)
                .map(Self::Notification)
                .map_err(malformed),
            CHANNEL_PROGRESS => serde_json::from_value(payload)
                .map(Self::Progress)
                .map_err(malformed),
            CHANNEL_PROGRESS_COMPLETE => serde_json::from_value(payload)
                .map(Self::ProgressComplete)
                .map_err(malformed),
            other => Err(BriqueError::UnknownChannel(other.to_string())),
        }
    }

    /// Channel this event travels on.
    pub fn channel(&self) -> &'static str {
        match self {
            Self::Notification(_) => CHANNEL_NOTIFICATION,
            Self::Progress(_) => CHANNEL_PROGRESS,
            Self::ProgressComplete(_) => CHANNEL_PROGRESS_COMPLETE,
        }
    }

    /// Payload as a JSON value, ready for a `PushSink`.
    pub fn to_payload(&self) -> serde_json::Value {
        let encoded = match self {
            Self::Notification(p) => serde_json::to_value(p),
            Self::Progress(p) => serde_json::to_value(p),
            Self::ProgressComplete(p) => serde_json::to_value(p),
        };
        // Plain structs with string keys cannot fail to serialize.
        encoded.unwrap_or(serde_json::Value::Null)
    }
}
