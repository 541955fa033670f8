//! Construction of the shared API client from process environment.

use ascent_api::{ApiConfig, ApiError, RestClient};
use ascent_auth::EnvResolver;

/// Build the authenticated REST client used by every command.
///
/// Credentials are read lazily: construction succeeds with missing
/// environment variables and the first request reports what is absent.
pub fn rest_client() -> Result<RestClient<EnvResolver>, ApiError> {
    RestClient::new(ApiConfig::default(), EnvResolver::from_process_env())
}
