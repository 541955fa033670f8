//! Scripted stand-ins for the API channel and storage transport, used by
//! this crate's tests and by downstream test suites.

use crate::client::{ApiClient, ApiRequest};
use crate::error::ApiError;
use crate::transport::{StorageTransport, TransferError};
use crate::upload::UploadOperation;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Mutex;

/// [`ApiClient`] that replays a queue of scripted responses and records
/// every request it receives.
#[derive(Debug, Default)]
pub struct StubClient {
    responses: Mutex<VecDeque<Result<Value, ApiError>>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl StubClient {
    pub fn new() -> Self {
        StubClient::default()
    }

    /// Queue a successful response.
    pub fn will_return(&self, value: Value) {
        self.responses.lock().unwrap().push_back(Ok(value));
    }

    /// Queue a failure.
    pub fn will_fail(&self, error: ApiError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    /// Every request received so far, in order.
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ApiClient for StubClient {
    async fn send(&self, request: ApiRequest) -> Result<Value, ApiError> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Unknown("stub response queue exhausted".into())))
    }
}

/// [`StorageTransport`] that records every transfer and optionally fails at
/// a fixed call index.
#[derive(Debug, Default)]
pub struct StubTransport {
    calls: Mutex<Vec<(UploadOperation, Vec<u8>)>>,
    fail_at: Option<usize>,
}

impl StubTransport {
    pub fn new() -> Self {
        StubTransport::default()
    }

    /// Succeed until the `index`-th transfer, which fails.
    pub fn failing_at(index: usize) -> Self {
        StubTransport {
            calls: Mutex::new(Vec::new()),
            fail_at: Some(index),
        }
    }

    /// Every `(operation, body)` pair received so far, in order.
    pub fn calls(&self) -> Vec<(UploadOperation, Vec<u8>)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl StorageTransport for StubTransport {
    async fn transfer(
        &self,
        operation: &UploadOperation,
        body: Vec<u8>,
    ) -> Result<(), TransferError> {
        let mut calls = self.calls.lock().unwrap();
        let index = calls.len();
        calls.push((operation.clone(), body));
        if self.fail_at == Some(index) {
            return Err(TransferError::Status(500));
        }
        Ok(())
    }
}
