//! `LocalBridge`: in-process push bridge.
//!
//! Handlers are kept per channel and invoked synchronously, in subscription
//! order, on the emitting thread. Used by the relay host and by tests; a
//! web-view shell would provide its own `PushBridge` instead.

use std::collections::HashMap;

use parking_lot::RwLock;
use serde_json::Value;
use tracing::trace;

use super::{PushBridge, PushHandler, PushSink};
use crate::error::Result;

#[derive(Default)]
pub struct LocalBridge {
    handlers: RwLock<HashMap<String, Vec<PushHandler>>>,
}

impl LocalBridge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver `payload` to every handler on `channel`. Returns the number of
    /// handlers reached; zero when nobody listens.
    pub fn deliver(&self, channel: &str, payload: Value) -> usize {
        // Clone the handler list so handlers may (un)subscribe re-entrantly.
        let handlers: Vec<PushHandler> = self
            .handlers
            .read()
            .get(channel)
            .cloned()
            .unwrap_or_default();
        trace!(channel, handlers = handlers.len(), "delivering push");
        for handler in &handlers {
            handler(payload.clone());
        }
        handlers.len()
    }

    /// Whether at least one handler is registered on `channel`.
    pub fn has_subscribers(&self, channel: &str) -> bool {
        self.handlers
            .read()
            .get(channel)
            .is_some_and(|h| !h.is_empty())
    }
}

impl PushBridge for LocalBridge {
    fn subscribe(&self, channel: &str, handler: PushHandler) -> Result<()> {
        self.handlers
            .write()
            .entry(channel.to_string())
            .or_default()
            .push(handler);
        Ok(())
    }

    fn unsubscribe(&self, channel: &str) {
        self.handlers.write().remove(channel);
    }
}

impl PushSink for LocalBridge {
    fn emit(&self, channel: &str, payload: Value) -> Result<()> {
        self.deliver(channel, payload);
        Ok(())
    }
}

impl std::fmt::Debug for LocalBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let channels: Vec<String> = self.handlers.read().keys().cloned().collect();
        f.debug_struct("LocalBridge")
            .field("channels", &channels)
            .finish()
    }
}
