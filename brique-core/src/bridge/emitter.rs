//! Backend side of the push channels.
//!
//! `PushEmitter` turns typed payloads into pushes on a `PushSink`.
//! `ProgressTracker` pairs every progress update with exactly one completion
//! signal: `finish()` sends it, and dropping an unfinished tracker sends it
//! too, so an operation that bails out early never leaves a stale progress
//! record behind in the UI.

use tracing::warn;

use super::PushSink;
use crate::error::Result;
use crate::ipc::events::{
    NotificationKind, NotificationPayload, ProgressCompletePayload, ProgressPayload, PushEvent,
};
use crate::notify::NotificationConfig;

pub struct PushEmitter<S: PushSink> {
    sink: S,
    config: NotificationConfig,
}

impl<S: PushSink> PushEmitter<S> {
    pub fn new(sink: S) -> Self {
        Self::with_config(sink, NotificationConfig::default())
    }

    /// Use `config`'s per-category durations for `success(..)` and friends.
    pub fn with_config(sink: S, config: NotificationConfig) -> Self {
        Self { sink, config }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn emit(&self, event: &PushEvent) -> Result<()> {
        self.sink.emit(event.channel(), event.to_payload())
    }

    pub fn emit_notification(&self, payload: NotificationPayload) -> Result<()> {
        self.emit(&PushEvent::Notification(payload))
    }

    pub fn emit_progress(&self, payload: ProgressPayload) -> Result<()> {
        self.emit(&PushEvent::Progress(payload))
    }

    pub fn emit_progress_complete(&self, id: &str) -> Result<()> {
        self.emit(&PushEvent::ProgressComplete(ProgressCompletePayload {
            id: id.to_string(),
        }))
    }

    pub fn success(&self, title: &str, message: &str) -> Result<()> {
        self.notify(NotificationKind::Success, title, message)
    }

    pub fn error(&self, title: &str, message: &str) -> Result<()> {
        self.notify(NotificationKind::Error, title, message)
    }

    pub fn info(&self, title: &str, message: &str) -> Result<()> {
        self.notify(NotificationKind::Info, title, message)
    }

    pub fn warning(&self, title: &str, message: &str) -> Result<()> {
        self.notify(NotificationKind::Warning, title, message)
    }

    /// Announce a new operation (current = 0) and return its tracker.
    pub fn track(&self, id: &str, operation: &str, total: u64) -> Result<ProgressTracker<'_, S>> {
        let tracker = ProgressTracker {
            emitter: self,
            id: id.to_string(),
            operation: operation.to_string(),
            total,
            finished: false,
        };
        tracker.send(0, None)?;
        Ok(tracker)
    }

    fn notify(&self, kind: NotificationKind, title: &str, message: &str) -> Result<()> {
        self.emit_notification(NotificationPayload {
            kind: Some(kind),
            title: title.to_string(),
            message: (!message.is_empty()).then(|| message.to_string()),
            duration: Some(self.config.default_duration(kind)),
        })
    }
}

/// Guard for one in-flight operation.
pub struct ProgressTracker<'a, S: PushSink> {
    emitter: &'a PushEmitter<S>,
    id: String,
    operation: String,
    total: u64,
    finished: bool,
}

impl<S: PushSink> ProgressTracker<'_, S> {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn advance(&self, current: u64, filename: Option<&str>) -> Result<()> {
        self.send(current, filename)
    }

    /// Switch to a new stage label and report `current` under it.
    pub fn relabel(&mut self, operation: &str, current: u64) -> Result<()> {
        self.operation = operation.to_string();
        self.send(current, None)
    }

    /// Send the completion signal now.
    pub fn finish(mut self) -> Result<()> {
        self.finished = true;
        self.emitter.emit_progress_complete(&self.id)
    }

    fn send(&self, current: u64, filename: Option<&str>) -> Result<()> {
        self.emitter.emit_progress(ProgressPayload {
            id: self.id.clone(),
            operation: self.operation.clone(),
            current,
            total: self.total,
            filename: filename.map(str::to_string),
        })
    }
}

impl<S: PushSink> Drop for ProgressTracker<'_, S> {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        if let Err(e) = self.emitter.emit_progress_complete(&self.id) {
            warn!(id = %self.id, "failed to emit progress completion: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::{PushBridge, PushHandler};
    use crate::LocalBridge;
    use parking_lot::Mutex;
    use serde_json::Value;
    use std::sync::Arc;

    fn recording_bridge() -> (Arc<LocalBridge>, Arc<Mutex<Vec<(String, Value)>>>) {
        let bridge = Arc::new(LocalBridge::new());
        let log = Arc::new(Mutex::new(Vec::new()));
        for channel in crate::ipc::events::CHANNELS {
            let log = Arc::clone(&log);
            let handler: PushHandler =
                Arc::new(move |v: Value| log.lock().push((channel.to_string(), v)));
            bridge.subscribe(channel, handler).unwrap();
        }
        (bridge, log)
    }

    #[test]
    fn convenience_notifications_carry_default_durations() {
        let (bridge, log) = recording_bridge();
        let emitter = PushEmitter::new(Arc::clone(&bridge));
        emitter.error("Erreur d'ajout", "Impossible d'ajouter le fichier").unwrap();
        emitter.warning("Backup partiel", "").unwrap();

        let log = log.lock();
        assert_eq!(log[0].0, "notification");
        assert_eq!(log[0].1["type"], "error");
        assert_eq!(log[0].1["duration"], 8000);
        assert_eq!(log[1].1["duration"], 6000);
        assert!(log[1].1.get("message").is_none());
    }

    #[test]
    fn tracker_emits_start_updates_and_single_completion() {
        let (bridge, log) = recording_bridge();
        let emitter = PushEmitter::new(Arc::clone(&bridge));
        let mut tracker = emitter.track("backup", "Création du backup", 100).unwrap();
        tracker.relabel("Copie de la base de données", 30).unwrap();
        tracker.advance(60, Some("brique.db")).unwrap();
        tracker.finish().unwrap();

        let log = log.lock();
        let channels: Vec<&str> = log.iter().map(|(c, _)| c.as_str()).collect();
        assert_eq!(
            channels,
            vec!["progress", "progress", "progress", "progress:complete"]
        );
        assert_eq!(log[0].1["current"], 0);
        assert_eq!(log[1].1["operation"], "Copie de la base de données");
        assert_eq!(log[2].1["filename"], "brique.db");
        assert_eq!(log[3].1["id"], "backup");
    }

    #[test]
    fn dropped_tracker_still_completes() {
        let (bridge, log) = recording_bridge();
        let emitter = PushEmitter::new(Arc::clone(&bridge));

        fn failing_step<S: PushSink>(emitter: &PushEmitter<S>) -> std::result::Result<(), &'static str> {
            let tracker = emitter.track("sync-peer1", "Synchronisation", 100).map_err(|_| "emit")?;
            tracker.advance(10, None).map_err(|_| "emit")?;
            Err("remote server returned status 500")
        }
        assert!(failing_step(&emitter).is_err());

        let completions = log
            .lock()
            .iter()
            .filter(|(c, _)| c == "progress:complete")
            .count();
        assert_eq!(completions, 1);
    }
}
