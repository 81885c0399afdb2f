//! Mirrors of the backend's data-transfer objects.
//!
//! The records carry no behavior beyond construction: [`Dto::create_from`]
//! accepts either the serialized JSON text or an already-decoded JSON value,
//! copies fields one by one (missing fields fall back to their defaults) and
//! rebuilds nested records into their own types.

mod inventory;
mod sync;

pub use inventory::{AssetDto, AssetType, DocumentationHealth, ItemDto, ItemWithAssetsDto};
pub use sync::{GossipInfoResponse, PeerDto, PeerStatus, SyncLogDto, SyncResult, SyncResultDto};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{BriqueError, Result};

/// Input accepted by [`Dto::create_from`].
#[derive(Debug, Clone)]
pub enum DtoSource {
    /// Serialized JSON, parsed before the field copy.
    Text(String),
    Value(Value),
}

impl From<&str> for DtoSource {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for DtoSource {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<Value> for DtoSource {
    fn from(v: Value) -> Self {
        Self::Value(v)
    }
}

/// Construction contract shared by every mirror.
pub trait Dto: DeserializeOwned + Serialize + Sized {
    /// Record name used in error messages.
    const NAME: &'static str;

    /// # Errors
    /// Returns `BriqueError::Dto` if the text is not JSON or a present field
    /// has the wrong type.
    fn create_from(source: impl Into<DtoSource>) -> Result<Self> {
        let decoded = match source.into() {
            DtoSource::Text(text) => serde_json::from_str(&text),
            DtoSource::Value(value) => serde_json::from_value(value),
        };
        decoded.map_err(|source| BriqueError::Dto {
            record: Self::NAME,
            source,
        })
    }

    /// Decode a JSON array of this record.
    fn create_list(source: impl Into<DtoSource>) -> Result<Vec<Self>> {
        let decoded = match source.into() {
            DtoSource::Text(text) => serde_json::from_str(&text),
            DtoSource::Value(value) => serde_json::from_value(value),
        };
        decoded.map_err(|source| BriqueError::Dto {
            record: Self::NAME,
            source,
        })
    }
}

/// Opaque backend timestamp.
///
/// Kept exactly as serialized; no calendar fields are decoded at this
/// boundary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(Value);

impl Timestamp {
    /// The serialized form, unchanged.
    pub fn raw(&self) -> &Value {
        &self.0
    }
}
