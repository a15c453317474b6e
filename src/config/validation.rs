use crate::config::types::{Config, HttpConfig, OutputConfig};
use crate::ConfigError;

const MAX_TIMEOUT_SECS: u64 = 300;
const MAX_REDIRECTS: usize = 30;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_http_config(&config.http)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates HTTP client configuration
fn validate_http_config(config: &HttpConfig) -> Result<(), ConfigError> {
    validate_timeout("page-timeout-secs", config.page_timeout_secs)?;
    validate_timeout("probe-timeout-secs", config.probe_timeout_secs)?;

    if config.max_redirects > MAX_REDIRECTS {
        return Err(ConfigError::Validation(format!(
            "max-redirects must be at most {}, got {}",
            MAX_REDIRECTS, config.max_redirects
        )));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

fn validate_timeout(key: &str, secs: u64) -> Result<(), ConfigError> {
    if secs == 0 || secs > MAX_TIMEOUT_SECS {
        return Err(ConfigError::Validation(format!(
            "{} must be between 1 and {}, got {}",
            key, MAX_TIMEOUT_SECS, secs
        )));
    }
    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.directory.as_os_str().is_empty() {
        return Err(ConfigError::Validation(
            "output directory cannot be empty".to_string(),
        ));
    }
    Ok(())
}
