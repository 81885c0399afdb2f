use serde::{Deserialize, Serialize};

use super::Dto;

/// Kind of file attached to an item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetType {
    Manual,
    ServiceManual,
    ExplodedView,
    Stl,
    Firmware,
    Driver,
    Schematic,
    #[default]
    Other,
    /// A value this build does not know about.
    #[serde(other)]
    Unknown,
}

/// How complete an item's documentation is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentationHealth {
    #[default]
    Incomplete,
    Partial,
    Secured,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ItemDto {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub brand: String,
    pub model: String,
    pub serial_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purchase_date: Option<String>,
    pub photo_path: String,
    pub notes: String,
    pub created_at: String,
    pub updated_at: String,
}

impl Dto for ItemDto {
    const NAME: &'static str = "ItemDTO";
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AssetDto {
    pub id: i64,
    pub item_id: i64,
    #[serde(rename = "type")]
    pub asset_type: AssetType,
    pub name: String,
    pub file_path: String,
    pub file_size: i64,
    /// SHA-256 of the file contents, hex encoded.
    pub file_hash: String,
    pub created_at: String,
}

impl Dto for AssetDto {
    const NAME: &'static str = "AssetDTO";
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemWithAssetsDto {
    pub item: ItemDto,
    pub assets: Vec<AssetDto>,
    pub health: DocumentationHealth,
}

impl Dto for ItemWithAssetsDto {
    const NAME: &'static str = "ItemWithAssetsDTO";
}
