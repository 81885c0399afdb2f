//! Push-subscription bridge abstraction.
//!
//! The host shell delivers backend-originated events to the UI side through
//! named channels. `PushBridge` is the receiving half (subscribe/unsubscribe),
//! `PushSink` the emitting half. Both decouple the notification center from
//! any specific host (in-process, Tauri, ...).

pub mod emitter;
pub mod local;

#[cfg(feature = "tauri")]
pub mod tauri;

use std::sync::Arc;

use serde_json::Value;

use crate::error::Result;

/// Callback invoked with the raw JSON payload of every push on a channel.
pub type PushHandler = Arc<dyn Fn(Value) + Send + Sync + 'static>;

/// Receiving half of the host bridge.
pub trait PushBridge: Send + Sync {
    /// Register `handler` for every future push on `channel`.
    ///
    /// # Errors
    /// Returns `BriqueError::Bridge` if the host refuses the subscription.
    fn subscribe(&self, channel: &str, handler: PushHandler) -> Result<()>;

    /// Drop every handler registered on `channel`. No-op if there are none.
    fn unsubscribe(&self, channel: &str);
}

/// Emitting half of the host bridge. Fire-and-forget: no acknowledgment.
pub trait PushSink: Send + Sync {
    /// # Errors
    /// Returns `BriqueError::Bridge` if the host could not accept the event.
    fn emit(&self, channel: &str, payload: Value) -> Result<()>;
}

impl<T: PushSink + ?Sized> PushSink for Arc<T> {
    fn emit(&self, channel: &str, payload: Value) -> Result<()> {
        (**self).emit(channel, payload)
    }
}
