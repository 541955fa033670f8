//! Three-phase binary asset upload: reserve, transfer, confirm.
//!
//! The server drives the plan: the reserve call returns an asset identifier
//! and a list of upload operations, each naming a target URL, method,
//! headers, and a byte range of the local file. Failure at any phase is
//! surfaced as-is; an already-reserved slot is never rolled back — it stays
//! inert server-side until confirmed and can be abandoned or superseded by
//! re-invoking the upload with a fresh reservation.

use crate::client::{ApiClient, ApiRequest};
use crate::dto::{Document, HttpHeaderDto, ScreenshotAttributes, UploadOperationDto};
use crate::error::ApiError;
use crate::screenshots::map_screenshot;
use crate::transport::{StorageTransport, TransferError};
use ascent_domain::Screenshot;
use serde_json::json;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// A validated, actionable upload operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadOperation {
    pub method: String,
    pub url: String,
    pub offset: u64,
    pub length: u64,
    pub headers: Vec<(String, String)>,
}

impl UploadOperation {
    /// `None` if the wire record is missing the url or byte range. A missing
    /// method defaults to PUT; the range must still be transferred.
    fn from_dto(dto: &UploadOperationDto) -> Option<Self> {
        Some(UploadOperation {
            method: dto.method.clone().unwrap_or_else(|| "PUT".to_string()),
            url: dto.url.clone()?,
            offset: dto.offset?,
            length: dto.length?,
            headers: dto
                .request_headers
                .as_deref()
                .unwrap_or_default()
                .iter()
                .filter_map(|HttpHeaderDto { name, value }| {
                    Some((name.clone()?, value.clone()?))
                })
                .collect(),
        })
    }
}

/// Errors from the upload pipeline, tagged by failing phase so callers can
/// decide whether re-running the whole upload is appropriate. Retrying a
/// single phase is never safe: upload operations are single-use,
/// server-issued targets.
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("cannot upload empty file {0}")]
    EmptyFile(PathBuf),

    #[error("failed to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("asset reservation failed")]
    Reserve(#[source] ApiError),

    #[error("transfer operation {index} failed")]
    Transfer {
        index: usize,
        #[source]
        source: TransferError,
    },

    #[error(
        "transfer operation {index} range {offset}+{length} exceeds {file_size}-byte file"
    )]
    InvalidRange {
        index: usize,
        offset: u64,
        length: u64,
        file_size: u64,
    },

    #[error("upload confirmation failed")]
    Confirm(#[source] ApiError),

    #[error("malformed reservation response: {0}")]
    Decoding(String),
}

/// Orchestrates one asset upload over an authenticated API channel plus a
/// direct storage transport.
pub struct UploadCoordinator<'a, C, T> {
    client: &'a C,
    transport: &'a T,
}

impl<'a, C: ApiClient, T: StorageTransport> UploadCoordinator<'a, C, T> {
    pub fn new(client: &'a C, transport: &'a T) -> Self {
        UploadCoordinator { client, transport }
    }

    /// Upload the file at `path` into the screenshot set `set_id`.
    ///
    /// Phases run strictly in order: reserve a slot (authenticated POST),
    /// transfer each server-issued byte range in the order received
    /// (direct, unauthenticated), then confirm with the MD5 of the whole
    /// file (authenticated PATCH). The first failed transfer aborts the
    /// remaining operations and no confirm is attempted.
    pub async fn upload(&self, set_id: &str, path: &Path) -> Result<Screenshot, UploadError> {
        let bytes = tokio::fs::read(path).await.map_err(|source| UploadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        if bytes.is_empty() {
            return Err(UploadError::EmptyFile(path.to_path_buf()));
        }
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "screenshot".to_string());

        let (asset_id, operations) = self.reserve(set_id, &file_name, bytes.len() as u64).await?;
        tracing::debug!(%asset_id, operations = operations.len(), "asset slot reserved");

        self.transfer_all(&operations, &bytes).await?;

        self.confirm(&asset_id, set_id, &bytes).await
    }

    async fn reserve(
        &self,
        set_id: &str,
        file_name: &str,
        file_size: u64,
    ) -> Result<(String, Vec<UploadOperationDto>), UploadError> {
        let body = json!({
            "data": {
                "type": "appScreenshots",
                "attributes": {
                    "fileName": file_name,
                    "fileSize": file_size,
                },
                "relationships": {
                    "appScreenshotSet": {
                        "data": {"type": "appScreenshotSets", "id": set_id}
                    }
                }
            }
        });

        let value = self
            .client
            .send(ApiRequest::post("/v1/appScreenshots", body))
            .await
            .map_err(UploadError::Reserve)?;
        let reserved: Document<ScreenshotAttributes> =
            serde_json::from_value(value).map_err(|e| UploadError::Decoding(e.to_string()))?;

        let operations = reserved
            .data
            .attributes
            .and_then(|attributes| attributes.upload_operations)
            .unwrap_or_default();
        Ok((reserved.data.id, operations))
    }

    async fn transfer_all(
        &self,
        operations: &[UploadOperationDto],
        bytes: &[u8],
    ) -> Result<(), UploadError> {
        let file_size = bytes.len() as u64;
        for (index, dto) in operations.iter().enumerate() {
            let Some(operation) = UploadOperation::from_dto(dto) else {
                tracing::warn!(index, "skipping upload operation with missing fields");
                continue;
            };

            let end = operation
                .offset
                .checked_add(operation.length)
                .filter(|end| *end <= file_size)
                .ok_or(UploadError::InvalidRange {
                    index,
                    offset: operation.offset,
                    length: operation.length,
                    file_size,
                })?;

            // Half-open range [offset, offset + length).
            let chunk = bytes[operation.offset as usize..end as usize].to_vec();
            self.transport
                .transfer(&operation, chunk)
                .await
                .map_err(|source| UploadError::Transfer { index, source })?;
            tracing::debug!(index, offset = operation.offset, length = operation.length, "chunk transferred");
        }
        Ok(())
    }

    async fn confirm(
        &self,
        asset_id: &str,
        set_id: &str,
        bytes: &[u8],
    ) -> Result<Screenshot, UploadError> {
        // Whole-file integrity check, independent of how the transfer phase
        // chunked the bytes.
        let checksum = format!("{:x}", md5::compute(bytes));
        let body = json!({
            "data": {
                "type": "appScreenshots",
                "id": asset_id,
                "attributes": {
                    "sourceFileChecksum": checksum,
                    "uploaded": true,
                }
            }
        });

        let value = self
            .client
            .send(ApiRequest::patch(format!("/v1/appScreenshots/{asset_id}"), body))
            .await
            .map_err(UploadError::Confirm)?;
        let confirmed: Document<ScreenshotAttributes> =
            serde_json::from_value(value).map_err(|e| UploadError::Decoding(e.to_string()))?;
        Ok(map_screenshot(&confirmed.data, set_id))
    }
}
