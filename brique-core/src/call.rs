//! Result-tuple wrapper for awaited bridge calls.
//!
//! ```ignore
//! let (err, items) = safe_call(backend.get_all_items()).await;
//! if let Some(err) = err {
//!     center.error("Chargement impossible", Some(err.message()), None);
//! }
//! ```

use std::fmt::Display;
use std::future::Future;
use std::panic::AssertUnwindSafe;

use futures::FutureExt;
use tracing::debug;

use crate::error::CallError;

/// `(Some(error), None)` on failure, `(None, Some(value))` on success.
pub type SafeResult<T> = (Option<CallError>, Option<T>);

/// Await `call`, normalizing any failure into a [`CallError`].
///
/// The error's `Display` form becomes the message. A panic raised while the
/// call is polled is caught and its payload becomes the message as well.
pub async fn try_call<T, E, F>(call: F) -> Result<T, CallError>
where
    F: Future<Output = Result<T, E>>,
    E: Display,
{
    match AssertUnwindSafe(call).catch_unwind().await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => Err(CallError::new(e.to_string())),
        Err(payload) => {
            let err = CallError::from_panic(payload);
            debug!("bridge call panicked: {err}");
            Err(err)
        }
    }
}

/// Tuple form of [`try_call`].
pub async fn safe_call<T, E, F>(call: F) -> SafeResult<T>
where
    F: Future<Output = Result<T, E>>,
    E: Display,
{
    match try_call(call).await {
        Ok(value) => (None, Some(value)),
        Err(e) => (Some(e), None),
    }
}
