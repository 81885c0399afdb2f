//! `NotificationCenter`: owner of transient UI feedback state.
//!
//! ## Lifecycle
//!
//! ```text
//! NotificationCenter::new(config)
//!     └─► attach(bridge)     → subscribed to "notification", "progress", "progress:complete"
//!         └─► destroy()      → unsubscribed; later pushes are ignored
//! ```
//!
//! The center is a cheap cloneable handle. Create one at application start,
//! hand clones to whichever UI layer needs it, call `destroy()` at shutdown.
//!
//! ## State
//!
//! Each mutation swaps in a freshly built `CenterSnapshot` and publishes it to
//! the `watch` channel and to registered listeners. A mutation that changes
//! nothing (removing an absent id, clearing an empty collection) publishes
//! nothing.
//!
//! ## Auto-dismiss
//!
//! A positive duration schedules a fire-once removal on the current tokio
//! runtime (or a plain thread when there is none). Timers are not cancellable
//! and hold only a weak reference to the center; removal is idempotent, so a
//! timer that fires after a manual removal or a clear does nothing.

mod config;
mod model;

pub use config::NotificationConfig;
pub use model::{CenterSnapshot, Notification, ProgressEvent};

use std::collections::{BTreeMap, VecDeque};
use std::sync::{
    atomic::{AtomicBool, AtomicU64, Ordering},
    Arc, Weak,
};
use std::time::Duration;

use chrono::Utc;
use parking_lot::Mutex;
use serde_json::Value;
use tokio::sync::watch;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::{
    bridge::{PushBridge, PushHandler},
    error::{BriqueError, Result},
    ipc::events::{NotificationKind, PushEvent, CHANNELS},
};

type Listener = Arc<dyn Fn(&CenterSnapshot) + Send + Sync + 'static>;

/// Handle returned by [`NotificationCenter::add_listener`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Shared notification / progress store.
#[derive(Clone)]
pub struct NotificationCenter {
    inner: Arc<Inner>,
}

struct Inner {
    config: NotificationConfig,
    /// Canonical state. Replaced wholesale on every mutation.
    state: Mutex<CenterSnapshot>,
    snapshot_tx: watch::Sender<CenterSnapshot>,
    listeners: Mutex<Vec<(ListenerId, Listener)>>,
    next_listener: AtomicU64,
    dispatch: Mutex<Dispatch>,
    bridge: Mutex<Option<Arc<dyn PushBridge>>>,
    destroyed: AtomicBool,
    /// Runtime seen at construction; used for timers scheduled from outside
    /// any runtime context.
    runtime: Option<tokio::runtime::Handle>,
}

/// Snapshots waiting for listener delivery, in publish order.
#[derive(Default)]
struct Dispatch {
    queue: VecDeque<CenterSnapshot>,
    /// Set while some thread is draining `queue`.
    running: bool,
}

/// Clears `Dispatch::running` if a listener unwinds mid-drain.
struct DrainGuard<'a> {
    dispatch: &'a Mutex<Dispatch>,
    armed: bool,
}

impl Drop for DrainGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.dispatch.lock().running = false;
        }
    }
}

impl NotificationCenter {
    /// Create an empty center. Not subscribed to anything until `attach()`.
    pub fn new(config: NotificationConfig) -> Self {
        let (snapshot_tx, _) = watch::channel(CenterSnapshot::default());
        Self {
            inner: Arc::new(Inner {
                config,
                state: Mutex::new(CenterSnapshot::default()),
                snapshot_tx,
                listeners: Mutex::new(Vec::new()),
                next_listener: AtomicU64::new(0),
                dispatch: Mutex::new(Dispatch::default()),
                bridge: Mutex::new(None),
                destroyed: AtomicBool::new(false),
                runtime: tokio::runtime::Handle::try_current().ok(),
            }),
        }
    }

    pub fn config(&self) -> &NotificationConfig {
        &self.inner.config
    }

    // ── Notifications ────────────────────────────────────────────────────

    /// Append a notification and return its id.
    ///
    /// With `duration` > 0 the notification is removed that many milliseconds
    /// after this call. `None` or `Some(0)` leaves it until removed.
    pub fn add_notification(
        &self,
        kind: NotificationKind,
        title: &str,
        message: Option<&str>,
        duration: Option<u64>,
    ) -> String {
        let notification = Notification {
            id: Uuid::new_v4().to_string(),
            kind,
            title: title.to_string(),
            message: message.map(str::to_string),
            timestamp: Utc::now(),
            duration,
        };
        let id = notification.id.clone();
        let dismiss_after = notification.duration.filter(|ms| *ms > 0);

        self.mutate(|state| {
            let mut notifications = Vec::with_capacity(state.notifications.len() + 1);
            notifications.extend(state.notifications.iter().cloned());
            notifications.push(notification);
            Some(CenterSnapshot {
                notifications: Arc::new(notifications),
                progress: Arc::clone(&state.progress),
            })
        });

        if let Some(ms) = dismiss_after {
            self.schedule_dismiss(id.clone(), Duration::from_millis(ms));
        }
        debug!(id = %id, kind = kind.as_str(), "notification added");
        id
    }

    /// Remove the notification with `id`. No-op if it is not held.
    pub fn remove_notification(&self, id: &str) {
        self.mutate(|state| {
            if !state.notifications.iter().any(|n| n.id == id) {
                return None;
            }
            let notifications = state
                .notifications
                .iter()
                .filter(|n| n.id != id)
                .cloned()
                .collect();
            Some(CenterSnapshot {
                notifications: Arc::new(notifications),
                progress: Arc::clone(&state.progress),
            })
        });
    }

    /// Drop every notification. Pending auto-dismiss timers stay scheduled
    /// and fire as no-ops.
    pub fn clear_notifications(&self) {
        self.mutate(|state| {
            if state.notifications.is_empty() {
                return None;
            }
            Some(CenterSnapshot {
                notifications: Arc::new(Vec::new()),
                progress: Arc::clone(&state.progress),
            })
        });
    }

    pub fn success(&self, title: &str, message: Option<&str>, duration: Option<u64>) -> String {
        self.add_with_default(NotificationKind::Success, title, message, duration)
    }

    pub fn error(&self, title: &str, message: Option<&str>, duration: Option<u64>) -> String {
        self.add_with_default(NotificationKind::Error, title, message, duration)
    }

    pub fn info(&self, title: &str, message: Option<&str>, duration: Option<u64>) -> String {
        self.add_with_default(NotificationKind::Info, title, message, duration)
    }

    pub fn warning(&self, title: &str, message: Option<&str>, duration: Option<u64>) -> String {
        self.add_with_default(NotificationKind::Warning, title, message, duration)
    }

    // ── Progress ─────────────────────────────────────────────────────────

    /// Insert or replace the progress record for `id`. All fields are
    /// overwritten; nothing is merged from the previous record.
    pub fn update_progress(
        &self,
        id: &str,
        operation: &str,
        current: u64,
        total: u64,
        filename: Option<&str>,
    ) {
        let record = ProgressEvent {
            id: id.to_string(),
            operation: operation.to_string(),
            current,
            total,
            filename: filename.map(str::to_string),
        };
        self.mutate(|state| {
            let mut progress = (*state.progress).clone();
            progress.insert(record.id.clone(), record);
            Some(CenterSnapshot {
                notifications: Arc::clone(&state.notifications),
                progress: Arc::new(progress),
            })
        });
    }

    /// Remove the progress record for `id`. No-op if absent.
    pub fn remove_progress(&self, id: &str) {
        self.mutate(|state| {
            if !state.progress.contains_key(id) {
                return None;
            }
            let mut progress = (*state.progress).clone();
            progress.remove(id);
            Some(CenterSnapshot {
                notifications: Arc::clone(&state.notifications),
                progress: Arc::new(progress),
            })
        });
    }

    pub fn clear_progress(&self) {
        self.mutate(|state| {
            if state.progress.is_empty() {
                return None;
            }
            Some(CenterSnapshot {
                notifications: Arc::clone(&state.notifications),
                progress: Arc::new(BTreeMap::new()),
            })
        });
    }

    // ── Observation ──────────────────────────────────────────────────────

    /// Current state (cheap: two `Arc` clones).
    pub fn snapshot(&self) -> CenterSnapshot {
        self.inner.state.lock().clone()
    }

    /// Receiver that is marked changed after every mutation.
    pub fn subscribe(&self) -> watch::Receiver<CenterSnapshot> {
        self.inner.snapshot_tx.subscribe()
    }

    /// Register a callback run after every mutation with the new snapshot.
    ///
    /// Snapshots reach listeners in the order the mutations were applied.
    /// Callbacks run outside the state lock, so they may call back into the
    /// center; a mutation made from inside a callback is delivered once the
    /// current callback round finishes. When another thread is already
    /// delivering, it also delivers this mutation's snapshot.
    pub fn add_listener<F>(&self, listener: F) -> ListenerId
    where
        F: Fn(&CenterSnapshot) + Send + Sync + 'static,
    {
        let id = ListenerId(self.inner.next_listener.fetch_add(1, Ordering::Relaxed));
        self.inner.listeners.lock().push((id, Arc::new(listener)));
        id
    }

    /// Unregister a callback. Returns `false` if it was not registered.
    pub fn remove_listener(&self, id: ListenerId) -> bool {
        let mut listeners = self.inner.listeners.lock();
        let before = listeners.len();
        listeners.retain(|(lid, _)| *lid != id);
        listeners.len() != before
    }

    // ── Backend push integration ─────────────────────────────────────────

    /// Subscribe to the push channels on `bridge`. A previously attached
    /// bridge is detached first.
    ///
    /// # Errors
    /// - `BriqueError::Bridge` if the center was destroyed or the bridge
    ///   refused a subscription. Channels subscribed before the failure are
    ///   unsubscribed again.
    pub fn attach(&self, bridge: Arc<dyn PushBridge>) -> Result<()> {
        if self.is_destroyed() {
            return Err(destroyed_error());
        }
        self.detach();

        for (idx, &channel) in CHANNELS.iter().enumerate() {
            let handler = push_handler(Arc::downgrade(&self.inner), channel);
            if let Err(e) = bridge.subscribe(channel, handler) {
                for subscribed in &CHANNELS[..idx] {
                    bridge.unsubscribe(subscribed);
                }
                return Err(e);
            }
        }
        *self.inner.bridge.lock() = Some(bridge);

        // `destroy()` may have run while subscribing; its detach could have
        // missed the bridge stored just above.
        if self.is_destroyed() {
            self.detach();
            return Err(destroyed_error());
        }
        info!("notification center attached to push bridge");
        Ok(())
    }

    /// Unsubscribe from every push channel. After this call the center no
    /// longer reacts to backend pushes; its collections stay usable.
    /// Idempotent.
    pub fn destroy(&self) {
        if self.inner.destroyed.swap(true, Ordering::SeqCst) {
            return;
        }
        self.detach();
        info!("notification center destroyed");
    }

    pub fn is_destroyed(&self) -> bool {
        self.inner.destroyed.load(Ordering::SeqCst)
    }

    /// Decode one raw push and apply it.
    ///
    /// Pushes arriving after `destroy()` are ignored.
    ///
    /// # Errors
    /// Returns the decode error for unknown channels or payloads that do not
    /// match the channel's shape; state is left untouched in that case.
    pub fn handle_push(&self, channel: &str, payload: Value) -> Result<()> {
        if self.is_destroyed() {
            debug!(channel, "push ignored by destroyed notification center");
            return Ok(());
        }
        let event = PushEvent::decode(channel, payload)?;
        self.apply(event);
        Ok(())
    }

    /// Apply an already-decoded push, filling in push defaults.
    pub fn apply(&self, event: PushEvent) {
        match event {
            PushEvent::Notification(p) => {
                let kind = p.kind.unwrap_or(self.inner.config.push_kind);
                let duration = p.duration.unwrap_or(self.inner.config.push_duration_ms);
                let message = p.message.as_deref().filter(|m| !m.is_empty());
                self.add_notification(kind, &p.title, message, Some(duration));
            }
            PushEvent::Progress(p) => {
                let filename = p.filename.as_deref().filter(|f| !f.is_empty());
                self.update_progress(&p.id, &p.operation, p.current, p.total, filename);
            }
            PushEvent::ProgressComplete(p) => self.remove_progress(&p.id),
        }
    }

    // ── Internal helpers ─────────────────────────────────────────────────

    fn add_with_default(
        &self,
        kind: NotificationKind,
        title: &str,
        message: Option<&str>,
        duration: Option<u64>,
    ) -> String {
        let duration = duration.unwrap_or_else(|| self.inner.config.default_duration(kind));
        self.add_notification(kind, title, message, Some(duration))
    }

    fn detach(&self) {
        if let Some(bridge) = self.inner.bridge.lock().take() {
            for channel in CHANNELS {
                bridge.unsubscribe(channel);
            }
        }
    }

    /// Build the next state from the current one and publish it. `f`
    /// returning `None` means nothing changed.
    fn mutate<F>(&self, f: F)
    where
        F: FnOnce(&CenterSnapshot) -> Option<CenterSnapshot>,
    {
        {
            let mut state = self.inner.state.lock();
            let Some(next) = f(&state) else {
                return;
            };
            *state = next.clone();
            // Published under the state lock so the watch channel and the
            // listener queue both follow mutation order.
            self.inner.snapshot_tx.send_replace(next.clone());
            self.inner.dispatch.lock().queue.push_back(next);
        }
        self.drain_listeners();
    }

    /// Deliver queued snapshots to listeners unless another call is already
    /// doing so, in which case that call picks up ours too.
    fn drain_listeners(&self) {
        {
            let mut dispatch = self.inner.dispatch.lock();
            if dispatch.running {
                return;
            }
            dispatch.running = true;
        }
        let mut guard = DrainGuard {
            dispatch: &self.inner.dispatch,
            armed: true,
        };

        loop {
            let next = {
                let mut dispatch = self.inner.dispatch.lock();
                match dispatch.queue.pop_front() {
                    Some(next) => next,
                    None => {
                        dispatch.running = false;
                        guard.armed = false;
                        return;
                    }
                }
            };
            let listeners: Vec<Listener> = self
                .inner
                .listeners
                .lock()
                .iter()
                .map(|(_, l)| Arc::clone(l))
                .collect();
            for listener in listeners {
                listener(&next);
            }
        }
    }

    fn schedule_dismiss(&self, id: String, after: Duration) {
        let weak = Arc::downgrade(&self.inner);
        let fire = move || {
            if let Some(inner) = weak.upgrade() {
                NotificationCenter { inner }.remove_notification(&id);
            }
        };

        match tokio::runtime::Handle::try_current()
            .ok()
            .or_else(|| self.inner.runtime.clone())
        {
            Some(handle) => {
                let deadline = tokio::time::Instant::now() + after;
                handle.spawn(async move {
                    tokio::time::sleep_until(deadline).await;
                    fire();
                });
            }
            None => {
                std::thread::spawn(move || {
                    std::thread::sleep(after);
                    fire();
                });
            }
        }
    }
}

impl std::fmt::Debug for NotificationCenter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.inner.state.lock();
        f.debug_struct("NotificationCenter")
            .field("notifications", &state.notifications.len())
            .field("progress", &state.progress.len())
            .field("destroyed", &self.is_destroyed())
            .finish_non_exhaustive()
    }
}

fn destroyed_error() -> BriqueError {
    BriqueError::Bridge("cannot attach a destroyed notification center".into())
}

fn push_handler(center: Weak<Inner>, channel: &'static str) -> PushHandler {
    Arc::new(move |payload: Value| {
        let Some(inner) = center.upgrade() else {
            return;
        };
        if let Err(e) = (NotificationCenter { inner }).handle_push(channel, payload) {
            warn!(channel, "rejected push payload: {e}");
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    fn center() -> NotificationCenter {
        NotificationCenter::new(NotificationConfig::default())
    }

    #[tokio::test(start_paused = true)]
    async fn success_then_remove() {
        let c = center();
        let id = c.success("Saved", Some("Item stored"), None);

        let snap = c.snapshot();
        assert_eq!(snap.notifications.len(), 1);
        assert_eq!(snap.notifications[0].kind, NotificationKind::Success);
        assert_eq!(snap.notifications[0].duration, Some(5000));
        assert_eq!(snap.notifications[0].message.as_deref(), Some("Item stored"));

        c.remove_notification(&id);
        assert!(c.snapshot().notifications.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn convenience_defaults_per_kind() {
        let c = center();
        c.success("a", None, None);
        c.error("b", None, None);
        c.info("c", None, None);
        c.warning("d", None, None);
        c.warning("e", None, Some(1234));

        let durations: Vec<_> = c
            .snapshot()
            .notifications
            .iter()
            .map(|n| (n.kind, n.duration))
            .collect();
        assert_eq!(
            durations,
            vec![
                (NotificationKind::Success, Some(5000)),
                (NotificationKind::Error, Some(8000)),
                (NotificationKind::Info, Some(5000)),
                (NotificationKind::Warning, Some(6000)),
                (NotificationKind::Warning, Some(1234)),
            ]
        );
    }

    #[test]
    fn insertion_order_and_unique_ids() {
        let c = center();
        let ids: Vec<String> = (0..50)
            .map(|i| c.add_notification(NotificationKind::Info, &format!("n{i}"), None, None))
            .collect();

        let snap = c.snapshot();
        let held: Vec<&str> = snap.notifications.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(held, ids.iter().map(String::as_str).collect::<Vec<_>>());

        let mut unique = ids.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), ids.len());
        assert_eq!(snap.notifications[49].title, "n49");
    }

    #[test]
    fn remove_is_idempotent() {
        let c = center();
        let keep = c.add_notification(NotificationKind::Info, "keep", None, None);
        let gone = c.add_notification(NotificationKind::Info, "gone", None, None);

        c.remove_notification(&gone);
        let after_first = c.snapshot();
        c.remove_notification(&gone);
        let after_second = c.snapshot();

        assert_eq!(after_first, after_second);
        assert_eq!(after_second.notifications.len(), 1);
        assert_eq!(after_second.notifications[0].id, keep);
    }

    #[test]
    fn clear_notifications_keeps_progress() {
        let c = center();
        c.add_notification(NotificationKind::Error, "x", None, None);
        c.update_progress("op", "upload", 1, 2, None);
        c.clear_notifications();

        let snap = c.snapshot();
        assert!(snap.notifications.is_empty());
        assert_eq!(snap.progress.len(), 1);
    }

    #[test]
    fn update_progress_overwrites_whole_record() {
        let c = center();
        c.update_progress("op1", "upload", 10, 100, Some("a.jpg"));
        c.update_progress("op1", "verify", 60, 100, None);

        let snap = c.snapshot();
        assert_eq!(snap.progress.len(), 1);
        let rec = snap.progress("op1").expect("record present");
        assert_eq!(rec.operation, "verify");
        assert_eq!(rec.current, 60);
        assert_eq!(rec.filename, None);
    }

    #[test]
    fn remove_absent_progress_is_noop() {
        let c = center();
        c.update_progress("op1", "upload", 1, 2, None);
        let before = c.snapshot();
        c.remove_progress("missing");
        assert_eq!(c.snapshot(), before);

        c.clear_progress();
        assert!(c.snapshot().progress.is_empty());
    }

    #[test]
    fn old_snapshots_are_not_mutated() {
        let c = center();
        c.update_progress("op1", "upload", 1, 2, None);
        let old = c.snapshot();
        c.update_progress("op2", "backup", 0, 100, None);
        c.add_notification(NotificationKind::Info, "x", None, None);

        assert_eq!(old.progress.len(), 1);
        assert!(old.notifications.is_empty());
    }

    #[test]
    fn listeners_receive_each_change_only() {
        let c = center();
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_in_listener = Arc::clone(&calls);
        let lid = c.add_listener(move |_snap| {
            calls_in_listener.fetch_add(1, Ordering::SeqCst);
        });

        let id = c.add_notification(NotificationKind::Info, "x", None, None);
        c.remove_notification(&id);
        c.remove_notification(&id); // unchanged → no publish
        c.clear_progress(); // already empty → no publish
        assert_eq!(calls.load(Ordering::SeqCst), 2);

        assert!(c.remove_listener(lid));
        assert!(!c.remove_listener(lid));
        c.add_notification(NotificationKind::Info, "y", None, None);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn listener_may_call_back_into_center() {
        let c = center();
        let observer = c.clone();
        let seen = Arc::new(AtomicUsize::new(0));
        let seen_in_listener = Arc::clone(&seen);
        c.add_listener(move |snap| {
            assert_eq!(observer.snapshot(), *snap);
            seen_in_listener.fetch_add(1, Ordering::SeqCst);
        });
        c.update_progress("op", "upload", 1, 1, None);
        assert_eq!(seen.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn concurrent_mutations_reach_listeners_in_order() {
        use std::sync::mpsc;

        let c = center();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let (entered_tx, entered_rx) = mpsc::channel::<()>();
        let (release_tx, release_rx) = mpsc::channel::<()>();
        let entered_tx = Mutex::new(entered_tx);
        let release_rx = Mutex::new(release_rx);

        let seen_in_listener = Arc::clone(&seen);
        c.add_listener(move |snap| {
            let first = {
                let mut seen = seen_in_listener.lock();
                seen.push(snap.notifications.len());
                seen.len() == 1
            };
            if first {
                // Hold the first delivery until the other thread has mutated.
                entered_tx.lock().send(()).expect("test alive");
                release_rx.lock().recv().expect("test alive");
            }
        });

        let first_writer = c.clone();
        let handle = std::thread::spawn(move || {
            first_writer.add_notification(NotificationKind::Info, "a", None, None);
        });
        entered_rx.recv().expect("listener entered");

        c.add_notification(NotificationKind::Info, "b", None, None);
        release_tx.send(()).expect("listener waiting");
        handle.join().expect("writer thread");

        assert_eq!(*seen.lock(), vec![1, 2]);
        assert_eq!(c.snapshot().notifications.len(), 2);
    }

    #[test]
    fn mutation_from_listener_is_delivered_after_current_round() {
        let c = center();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_in_listener = Arc::clone(&seen);
        let writer = c.clone();
        c.add_listener(move |snap| {
            seen_in_listener.lock().push(snap.progress.len());
            if snap.progress.len() == 1 {
                writer.update_progress("second", "follow-up", 0, 1, None);
            }
        });

        c.update_progress("first", "upload", 0, 1, None);
        assert_eq!(*seen.lock(), vec![1, 2]);
    }

    #[test]
    fn destroy_during_attach_leaves_nothing_subscribed() {
        use crate::bridge::local::LocalBridge;

        struct DestroyingBridge {
            channels: LocalBridge,
            center: Mutex<Option<NotificationCenter>>,
        }

        impl PushBridge for DestroyingBridge {
            fn subscribe(&self, channel: &str, handler: PushHandler) -> Result<()> {
                if let Some(center) = self.center.lock().take() {
                    center.destroy();
                }
                self.channels.subscribe(channel, handler)
            }

            fn unsubscribe(&self, channel: &str) {
                self.channels.unsubscribe(channel);
            }
        }

        let c = center();
        let bridge = Arc::new(DestroyingBridge {
            channels: LocalBridge::new(),
            center: Mutex::new(Some(c.clone())),
        });

        assert!(c.attach(Arc::clone(&bridge) as Arc<dyn PushBridge>).is_err());
        assert!(c.is_destroyed());
        for channel in CHANNELS {
            assert!(!bridge.channels.has_subscribers(channel), "{channel} still subscribed");
        }
    }

    #[tokio::test(start_paused = true)]
    async fn watch_receiver_sees_latest_snapshot() {
        let c = center();
        let mut rx = c.subscribe();
        c.update_progress("op", "upload", 5, 10, None);

        rx.changed().await.expect("sender alive");
        assert_eq!(rx.borrow_and_update().progress("op").map(|p| p.current), Some(5));
    }

    #[tokio::test(start_paused = true)]
    async fn auto_dismiss_after_duration() {
        let c = center();
        let id = c.add_notification(NotificationKind::Info, "t", None, Some(3000));

        tokio::time::sleep(Duration::from_millis(2999)).await;
        assert!(c.snapshot().notification(&id).is_some());

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert!(c.snapshot().notification(&id).is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn zero_or_absent_duration_never_dismisses() {
        let c = center();
        c.add_notification(NotificationKind::Info, "zero", None, Some(0));
        c.add_notification(NotificationKind::Info, "none", None, None);

        tokio::time::sleep(Duration::from_secs(3600)).await;
        assert_eq!(c.snapshot().notifications.len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn stale_timer_after_manual_removal_is_harmless() {
        let c = center();
        let short = c.add_notification(NotificationKind::Info, "short", None, Some(100));
        c.remove_notification(&short);
        let other = c.add_notification(NotificationKind::Info, "other", None, None);

        tokio::time::sleep(Duration::from_millis(200)).await;
        let snap = c.snapshot();
        assert_eq!(snap.notifications.len(), 1);
        assert_eq!(snap.notifications[0].id, other);
    }

    #[tokio::test(start_paused = true)]
    async fn timer_pending_across_clear_is_harmless() {
        let c = center();
        c.add_notification(NotificationKind::Info, "before clear", None, Some(100));
        c.clear_notifications();
        let after = c.add_notification(NotificationKind::Info, "after clear", None, None);

        tokio::time::sleep(Duration::from_millis(200)).await;
        let snap = c.snapshot();
        assert_eq!(snap.notifications.len(), 1);
        assert_eq!(snap.notifications[0].id, after);
    }

    #[tokio::test(start_paused = true)]
    async fn timer_outliving_center_is_noop() {
        let c = center();
        c.add_notification(NotificationKind::Info, "t", None, Some(50));
        drop(c);
        tokio::time::sleep(Duration::from_millis(100)).await;
    }

    #[tokio::test(start_paused = true)]
    async fn push_defaults_apply() {
        let c = center();
        c.handle_push("notification", serde_json::json!({"title": "Hello", "message": ""}))
            .expect("valid push");

        let snap = c.snapshot();
        let n = &snap.notifications[0];
        assert_eq!(n.kind, NotificationKind::Info);
        assert_eq!(n.duration, Some(5000));
        assert_eq!(n.message, None);
    }

    #[tokio::test(start_paused = true)]
    async fn push_with_empty_type_is_applied_as_info() {
        let c = center();
        c.handle_push(
            "notification",
            serde_json::json!({"type": "", "title": "Hello", "message": "", "duration": 0}),
        )
        .expect("empty type is a missing type");

        let snap = c.snapshot();
        assert_eq!(snap.notifications.len(), 1);
        assert_eq!(snap.notifications[0].kind, NotificationKind::Info);
        assert_eq!(snap.notifications[0].message, None);
    }

    #[test]
    fn rejected_push_leaves_state_untouched() {
        let c = center();
        assert!(c
            .handle_push("notification", serde_json::json!({"message": "no title"}))
            .is_err());
        assert!(c.handle_push("sync", serde_json::json!({})).is_err());
        assert!(c.snapshot().is_empty());
    }

    #[test]
    fn destroyed_center_ignores_pushes_but_keeps_api() {
        let c = center();
        c.destroy();
        c.destroy();
        c.handle_push("progress", serde_json::json!({"id": "x", "operation": "o"}))
            .expect("ignored, not an error");
        assert!(c.snapshot().progress.is_empty());

        c.update_progress("local", "still works", 0, 1, None);
        assert_eq!(c.snapshot().progress.len(), 1);
    }
}
