use crate::config::types::{Config, EnumerationConfig, HeuristicsConfig, RequestConfig};
use crate::ConfigError;

/// Upper bound on the request concurrency ceiling
const MAX_CONCURRENT_REQUESTS: usize = 1024;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_request_config(&config.request)?;
    validate_enumeration_config(&config.enumeration)?;
    validate_heuristics_config(&config.heuristics)?;
    Ok(())
}

/// Validates request shaping options
fn validate_request_config(config: &RequestConfig) -> Result<(), ConfigError> {
    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    if config.user_agent.chars().any(|c| c.is_control()) {
        return Err(ConfigError::Validation(format!(
            "user_agent must not contain control characters, got {:?}",
            config.user_agent
        )));
    }

    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "timeout_secs must be >= 1, got {}",
            config.timeout_secs
        )));
    }

    if let Some(cookies) = &config.cookies {
        if cookies.contains('\r') || cookies.contains('\n') {
            return Err(ConfigError::Validation(
                "cookies must not contain line breaks".to_string(),
            ));
        }
    }

    Ok(())
}

/// Validates traversal limits
fn validate_enumeration_config(config: &EnumerationConfig) -> Result<(), ConfigError> {
    // max_depth >= 0 is always true for u32, so no check needed

    if config.max_concurrent_requests < 1 || config.max_concurrent_requests > MAX_CONCURRENT_REQUESTS
    {
        return Err(ConfigError::Validation(format!(
            "max_concurrent_requests must be between 1 and {}, got {}",
            MAX_CONCURRENT_REQUESTS, config.max_concurrent_requests
        )));
    }

    Ok(())
}

/// Validates classifier tuning
fn validate_heuristics_config(config: &HeuristicsConfig) -> Result<(), ConfigError> {
    if config.confirm_threshold < 1 || config.confirm_threshold > 5 {
        return Err(ConfigError::Validation(format!(
            "confirm_threshold must be between 1 and 5, got {}",
            config.confirm_threshold
        )));
    }

    if config.signature_length < 1 {
        return Err(ConfigError::Validation(
            "signature_length must be >= 1".to_string(),
        ));
    }

    if config.directory_patterns.iter().all(|p| p.is_empty()) {
        return Err(ConfigError::Validation(
            "directory_patterns must contain at least one non-empty phrase".to_string(),
        ));
    }

    if let Some(code) = config
        .ok_status_codes
        .iter()
        .find(|code| !(100..=599).contains(*code))
    {
        return Err(ConfigError::Validation(format!(
            "ok_status_codes must be valid HTTP status codes, got {}",
            code
        )));
    }

    Ok(())
}
