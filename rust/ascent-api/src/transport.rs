use crate::upload::UploadOperation;
use async_trait::async_trait;
use reqwest::Method;
use thiserror::Error;

/// Errors from a direct transfer to a storage endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransferError {
    #[error("invalid HTTP method {0:?}")]
    InvalidMethod(String),

    #[error("request failed: {0}")]
    Request(String),

    #[error("storage endpoint returned status {0}")]
    Status(u16),
}

/// Direct byte transfer to a server-issued storage target.
///
/// This channel deliberately bypasses bearer authentication: each upload
/// operation carries whatever headers the storage target requires.
#[async_trait]
pub trait StorageTransport: Send + Sync {
    /// Execute one upload operation with the given byte slice as body. The
    /// response body is discarded; only error statuses are surfaced.
    async fn transfer(&self, operation: &UploadOperation, body: Vec<u8>)
    -> Result<(), TransferError>;
}

/// reqwest-backed [`StorageTransport`].
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    http: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        HttpTransport {
            http: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl StorageTransport for HttpTransport {
    async fn transfer(
        &self,
        operation: &UploadOperation,
        body: Vec<u8>,
    ) -> Result<(), TransferError> {
        let method = Method::from_bytes(operation.method.as_bytes())
            .map_err(|_| TransferError::InvalidMethod(operation.method.clone()))?;

        let mut builder = self.http.request(method, &operation.url);
        for (name, value) in &operation.headers {
            builder = builder.header(name, value);
        }

        let response = builder
            .body(body)
            .send()
            .await
            .map_err(|e| TransferError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransferError::Status(status.as_u16()));
        }
        Ok(())
    }
}
