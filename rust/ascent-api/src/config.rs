use std::time::Duration;

/// Configuration for the REST API client.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL of the remote service.
    pub base_url: String,

    /// Per-request timeout.
    pub timeout: Option<Duration>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            base_url: "https://api.appstoreconnect.apple.com".to_string(),
            timeout: Some(Duration::from_secs(30)),
        }
    }
}
