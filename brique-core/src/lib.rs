//! # brique-core
//!
//! UI state layer of the Brique desktop inventory app.
//!
//! ## Architecture
//!
//! ```text
//! backend ─► PushEmitter ─► PushSink ═══ bridge ═══ PushBridge ─► NotificationCenter
//!                                                                     │
//!                                                       CenterSnapshot (watch + listeners)
//!                                                                     │
//!                                                                  UI views
//! ```
//!
//! Every mutation of the center publishes a new immutable snapshot. Raw push
//! payloads are decoded into a typed [`PushEvent`] at the boundary; anything
//! that does not match its channel's shape is logged and dropped.

#![forbid(unsafe_code)]
#![warn(clippy::all)]

pub mod bridge;
pub mod call;
pub mod dto;
pub mod error;
pub mod ipc;
pub mod notify;

// Convenience re-exports for downstream crates
pub use bridge::{emitter::PushEmitter, emitter::ProgressTracker, local::LocalBridge};
pub use bridge::{PushBridge, PushHandler, PushSink};
pub use call::{safe_call, try_call, SafeResult};
pub use error::{BriqueError, CallError};
pub use ipc::events::{
    NotificationKind, NotificationPayload, ProgressCompletePayload, ProgressPayload, PushEvent,
};
pub use notify::{
    CenterSnapshot, ListenerId, Notification, NotificationCenter, NotificationConfig,
    ProgressEvent,
};

#[cfg(feature = "tauri")]
pub use bridge::tauri::TauriBridge;
