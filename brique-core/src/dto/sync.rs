use serde::{Deserialize, Serialize};

use super::{Dto, Timestamp};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeerStatus {
    Online,
    #[default]
    Offline,
    Syncing,
    #[serde(other)]
    Unknown,
}

/// A remote Brique instance known to this one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PeerDto {
    pub id: String,
    pub name: String,
    /// `host:port`.
    pub address: String,
    pub last_seen: String,
    pub last_sync: String,
    pub is_trusted: bool,
    pub status: PeerStatus,
}

impl Dto for PeerDto {
    const NAME: &'static str = "PeerDTO";
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SyncLogDto {
    pub id: i64,
    pub peer_name: String,
    pub timestamp: String,
    pub items_received: i64,
    pub items_sent: i64,
    pub conflicts: i64,
    pub duration_ms: i64,
    /// Empty when the sync succeeded.
    pub error: String,
}

impl Dto for SyncLogDto {
    const NAME: &'static str = "SyncLogDTO";
}

impl SyncLogDto {
    pub fn failed(&self) -> bool {
        !self.error.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SyncResultDto {
    pub items_received: i64,
    pub items_sent: i64,
    pub conflicts: i64,
    pub duration_ms: i64,
}

impl Dto for SyncResultDto {
    const NAME: &'static str = "SyncResultDTO";
}

/// Sync result as returned by the HTTP gossip path (Go field names, no tags).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct SyncResult {
    pub items_received: i64,
    pub items_sent: i64,
    pub conflicts: i64,
    pub duration_ms: i64,
}

impl Dto for SyncResult {
    const NAME: &'static str = "SyncResult";
}

/// Instance summary served to peers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GossipInfoResponse {
    pub instance_id: String,
    pub instance_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_sync: Option<Timestamp>,
    pub item_count: i64,
}

impl Dto for GossipInfoResponse {
    const NAME: &'static str = "GossipInfoResponse";
}
