//! JSON:API wire documents for the remote resource model.
//!
//! Attributes are optional throughout: the service omits fields freely and
//! repositories fill in defaults while mapping to domain types.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Single-resource response document.
#[derive(Debug, Clone, Deserialize)]
pub struct Document<A> {
    pub data: Resource<A>,
    #[serde(default)]
    pub links: Links,
}

/// Collection response document.
#[derive(Debug, Clone, Deserialize)]
pub struct CollectionDocument<A> {
    pub data: Vec<Resource<A>>,
    #[serde(default)]
    pub links: Links,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Links {
    #[serde(rename = "self")]
    pub this: Option<String>,
    pub next: Option<String>,
}

/// One resource: identifier, type tag, typed attributes, and raw
/// relationships (consulted only where a parent identifier is needed).
#[derive(Debug, Clone, Deserialize)]
pub struct Resource<A> {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub attributes: Option<A>,
    pub relationships: Option<Value>,
}

impl<A> Resource<A> {
    /// Identifier of a to-one relationship, e.g. `related_id("app")`.
    pub fn related_id(&self, name: &str) -> Option<&str> {
        self.relationships
            .as_ref()?
            .pointer(&format!("/{name}/data/id"))?
            .as_str()
    }

    /// Number of entries in a to-many relationship.
    pub fn related_count(&self, name: &str) -> usize {
        self.relationships
            .as_ref()
            .and_then(|r| r.pointer(&format!("/{name}/data")))
            .and_then(Value::as_array)
            .map(Vec::len)
            .unwrap_or(0)
    }
}

/// Parse a wire enum string (e.g. `"READY_FOR_SALE"`) into its domain enum.
pub fn parse_wire_enum<T: DeserializeOwned>(value: &str) -> Option<T> {
    serde_json::from_value(Value::String(value.to_string())).ok()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppAttributes {
    pub name: Option<String>,
    pub bundle_id: Option<String>,
    pub sku: Option<String>,
    pub primary_locale: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionAttributes {
    pub version_string: Option<String>,
    pub platform: Option<String>,
    pub app_store_state: Option<String>,
    pub created_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildAttributes {
    pub version: Option<String>,
    pub uploaded_date: Option<DateTime<Utc>>,
    pub expiration_date: Option<DateTime<Utc>>,
    pub expired: Option<bool>,
    pub processing_state: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BetaGroupAttributes {
    pub name: Option<String>,
    pub is_internal_group: Option<bool>,
    pub public_link_enabled: Option<bool>,
    pub created_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BetaTesterAttributes {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub invite_type: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionAttributes {
    pub platform: Option<String>,
    pub state: Option<String>,
    pub submitted_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalizationAttributes {
    pub locale: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenshotSetAttributes {
    pub screenshot_display_type: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenshotAttributes {
    pub file_name: Option<String>,
    pub file_size: Option<u64>,
    pub source_file_checksum: Option<String>,
    pub asset_delivery_state: Option<AssetDeliveryStateAttribute>,
    pub image_asset: Option<ImageAssetAttribute>,
    pub upload_operations: Option<Vec<UploadOperationDto>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetDeliveryStateAttribute {
    pub state: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageAssetAttribute {
    pub width: Option<u32>,
    pub height: Option<u32>,
}

/// Server-issued instruction for transferring one byte range of a file.
///
/// All fields are optional on the wire; the upload coordinator skips
/// operations it cannot act on.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadOperationDto {
    pub method: Option<String>,
    pub url: Option<String>,
    pub offset: Option<u64>,
    pub length: Option<u64>,
    pub request_headers: Option<Vec<HttpHeaderDto>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpHeaderDto {
    pub name: Option<String>,
    pub value: Option<String>,
}
