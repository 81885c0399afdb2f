use std::any::Any;

use thiserror::Error;

/// All errors produced by brique-core.
#[derive(Debug, Error)]
pub enum BriqueError {
    #[error("unknown push channel: {0}")]
    UnknownChannel(String),

    #[error("malformed payload on channel {channel}: {source}")]
    Payload {
        channel: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to decode {record}: {source}")]
    Dto {
        record: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("bridge error: {0}")]
    Bridge(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, BriqueError>;

/// Normalized failure of an awaited bridge call.
///
/// Whatever the call failed with (a typed error, a plain string, a panic
/// payload) ends up here as its string form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct CallError {
    message: String,
}

impl CallError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build from a `catch_unwind` payload. `panic!("...")` yields either a
    /// `&'static str` or a `String`; anything else has no useful string form.
    pub fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&'static str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "call panicked".to_string()
        };
        Self { message }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
