//! `TauriBridge`: push bridge over a Tauri v2 `AppHandle`.
//!
//! Tauri delivers event payloads as JSON strings; they are parsed here so the
//! notification center only ever sees `serde_json::Value`s.

use std::collections::HashMap;

use ::tauri::{AppHandle, Emitter, EventId, Listener, Runtime};
use parking_lot::Mutex;
use serde_json::Value;
use tracing::warn;

use super::{PushBridge, PushHandler, PushSink};
use crate::error::{BriqueError, Result};

pub struct TauriBridge<R: Runtime> {
    app: AppHandle<R>,
    /// Listener ids per channel, so `unsubscribe` can drop exactly ours.
    listeners: Mutex<HashMap<String, Vec<EventId>>>,
}

impl<R: Runtime> TauriBridge<R> {
    pub fn new(app: AppHandle<R>) -> Self {
        Self {
            app,
            listeners: Mutex::new(HashMap::new()),
        }
    }
}

impl<R: Runtime> PushBridge for TauriBridge<R> {
    fn subscribe(&self, channel: &str, handler: PushHandler) -> Result<()> {
        let channel_name = channel.to_string();
        let id = self.app.listen(channel, move |event: ::tauri::Event| {
            match serde_json::from_str::<Value>(event.payload()) {
                Ok(payload) => handler(payload),
                Err(e) => warn!(channel = %channel_name, "push payload is not JSON: {e}"),
            }
        });
        self.listeners
            .lock()
            .entry(channel.to_string())
            .or_default()
            .push(id);
        Ok(())
    }

    fn unsubscribe(&self, channel: &str) {
        let ids = self.listeners.lock().remove(channel).unwrap_or_default();
        for id in ids {
            self.app.unlisten(id);
        }
    }
}

impl<R: Runtime> PushSink for TauriBridge<R> {
    fn emit(&self, channel: &str, payload: Value) -> Result<()> {
        self.app
            .emit(channel, payload)
            .map_err(|e| BriqueError::Bridge(format!("emit {channel}: {e}")))
    }
}
