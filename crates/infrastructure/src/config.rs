//! Environment-backed configuration loading.

use porter_application::{ConfigError, PostmanConfig};
use tracing::{debug, warn};

/// Loads the Postman settings from the process environment.
///
/// A `.env` file in the working directory (or a parent) is read first;
/// variables already set in the environment take precedence over it.
///
/// # Errors
///
/// Returns `ConfigError` if `postman_api_url` or `postman_api_key` is
/// missing or invalid.
pub fn load_postman_config() -> Result<PostmanConfig, ConfigError> {
    match dotenvy::dotenv() {
        Ok(path) => debug!(path = %path.display(), "loaded .env file"),
        Err(e) if e.not_found() => {}
        Err(e) => warn!(error = %e, "ignoring unreadable .env file"),
    }

    PostmanConfig::from_lookup(|key| std::env::var(key).ok())
}
