use url::Url;

use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Base URL is an absolute http(s) URL
/// - Timeout is not 0
/// - Username is not empty when credentials are given
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    let base = Url::parse(&config.forum.base_url).map_err(|e| {
        ConfigError::ValidationError(format!(
            "forum.base_url '{}' is not a valid URL: {}",
            config.forum.base_url, e
        ))
    })?;

    if !matches!(base.scheme(), "http" | "https") {
        return Err(ConfigError::ValidationError(format!(
            "forum.base_url must be http or https, got '{}'",
            base.scheme()
        )));
    }

    if config.forum.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "forum.timeout_secs cannot be 0".to_string(),
        ));
    }

    if let Some(credentials) = &config.credentials {
        if credentials.username.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "credentials.username cannot be empty".to_string(),
            ));
        }
    }

    Ok(())
}
