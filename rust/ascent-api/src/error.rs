use ascent_auth::AuthError;
use thiserror::Error;

/// Errors that can occur when calling the remote API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Credential resolution or token signing failed.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// The service rejected the bearer token.
    #[error("unauthorized: the service rejected the credentials")]
    Unauthorized,

    /// The credentials lack access to the requested resource.
    #[error("forbidden: the credentials lack access to this resource")]
    Forbidden,

    /// The requested resource does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The service throttled the request.
    #[error("rate limited by the service")]
    RateLimited,

    /// The service returned a 5xx status.
    #[error("server error (status {0})")]
    Server(u16),

    /// The request never produced a usable response.
    #[error("network error: {0}")]
    Network(String),

    /// The response body could not be decoded.
    #[error("failed to decode response: {0}")]
    Decoding(String),

    /// Anything the other variants do not cover.
    #[error("{0}")]
    Unknown(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            ApiError::Decoding(error.to_string())
        } else if error.is_connect() || error.is_timeout() || error.is_request() {
            ApiError::Network(error.to_string())
        } else {
            ApiError::Unknown(error.to_string())
        }
    }
}

impl ApiError {
    /// Map a non-success HTTP status to an error variant.
    pub fn from_status(status: u16, path: &str) -> Self {
        match status {
            401 => ApiError::Unauthorized,
            403 => ApiError::Forbidden,
            404 => ApiError::NotFound(path.to_string()),
            429 => ApiError::RateLimited,
            500..=599 => ApiError::Server(status),
            _ => ApiError::Unknown(format!("unexpected status {status} for {path}")),
        }
    }
}
