use crate::config::ApiConfig;
use crate::error::ApiError;
use ascent_auth::{CredentialsResolver, TokenSigner};
use async_trait::async_trait;
use reqwest::Method;
use reqwest::header::AUTHORIZATION;
use serde_json::Value;

/// One API call: method, path relative to the service base URL, query
/// parameters, and an optional JSON body.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>) -> Self {
        ApiRequest {
            method: Method::GET,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn post(path: impl Into<String>, body: Value) -> Self {
        ApiRequest {
            method: Method::POST,
            path: path.into(),
            query: Vec::new(),
            body: Some(body),
        }
    }

    pub fn patch(path: impl Into<String>, body: Value) -> Self {
        ApiRequest {
            method: Method::PATCH,
            path: path.into(),
            query: Vec::new(),
            body: Some(body),
        }
    }

    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }
}

/// The authenticated request channel repositories are built on.
#[async_trait]
pub trait ApiClient: Send + Sync {
    /// Issue one request and return the decoded JSON response body
    /// (`Value::Null` for responses with no body).
    async fn send(&self, request: ApiRequest) -> Result<Value, ApiError>;
}

/// reqwest-backed [`ApiClient`] that authenticates every outgoing request.
///
/// For each call the resolver is consulted and a fresh bearer token is
/// minted; nothing is cached and nothing is retried, so a long batch of
/// calls can never trip over a stale token.
pub struct RestClient<R: CredentialsResolver> {
    config: ApiConfig,
    http: reqwest::Client,
    resolver: R,
    signer: TokenSigner,
}

impl<R: CredentialsResolver> RestClient<R> {
    pub fn new(config: ApiConfig, resolver: R) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(RestClient {
            config,
            http,
            resolver,
            signer: TokenSigner::new(),
        })
    }

    fn build_url(&self, path: &str) -> String {
        let base = self.config.base_url.trim_end_matches('/');
        format!("{base}{path}")
    }
}

#[async_trait]
impl<R: CredentialsResolver> ApiClient for RestClient<R> {
    async fn send(&self, request: ApiRequest) -> Result<Value, ApiError> {
        let credentials = self.resolver.resolve()?;
        let token = self.signer.sign(&credentials)?;

        let url = self.build_url(&request.path);
        tracing::debug!(method = %request.method, %url, "issuing API request");

        let mut builder = self
            .http
            .request(request.method.clone(), &url)
            .header(AUTHORIZATION, format!("Bearer {token}"))
            .query(&request.query);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            tracing::debug!(status = status.as_u16(), path = %request.path, "API request rejected");
            return Err(ApiError::from_status(status.as_u16(), &request.path));
        }

        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_slice(&bytes).map_err(|e| ApiError::Decoding(e.to_string()))
    }
}
