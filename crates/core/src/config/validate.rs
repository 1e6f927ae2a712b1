use super::{types::Config, ConfigError};

/// Validate a loaded configuration before wiring the engine.
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.remote.base_url.is_empty() {
        return Err(ConfigError::ValidationError(
            "remote.base_url must not be empty".to_string(),
        ));
    }

    if !config.remote.base_url.starts_with("http://")
        && !config.remote.base_url.starts_with("https://")
    {
        return Err(ConfigError::ValidationError(format!(
            "remote.base_url must be an http(s) URL, got '{}'",
            config.remote.base_url
        )));
    }

    if config.remote.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "remote.timeout_secs must be greater than zero".to_string(),
        ));
    }

    if config.views.recent_limit == 0 {
        return Err(ConfigError::ValidationError(
            "views.recent_limit must be greater than zero".to_string(),
        ));
    }

    if config.views.suggestion_limit == 0 {
        return Err(ConfigError::ValidationError(
            "views.suggestion_limit must be greater than zero".to_string(),
        ));
    }

    if config.recency.refresh_interval_secs == 0 {
        return Err(ConfigError::ValidationError(
            "recency.refresh_interval_secs must be greater than zero".to_string(),
        ));
    }

    if config.rows.tick_interval_ms == 0 {
        return Err(ConfigError::ValidationError(
            "rows.tick_interval_ms must be greater than zero".to_string(),
        ));
    }

    if config.rows.step == 0 {
        return Err(ConfigError::ValidationError(
            "rows.step must be greater than zero".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_config_from_str;

    fn valid_toml() -> &'static str {
        r#"
[remote]
base_url = "https://api.example.com"
"#
    }

    #[test]
    fn test_valid_config_passes() {
        let config = load_config_from_str(valid_toml()).unwrap();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_rejects_non_http_base_url() {
        let mut config = load_config_from_str(valid_toml()).unwrap();
        config.remote.base_url = "ftp://example.com".to_string();
        let err = validate_config(&config).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_rejects_empty_base_url() {
        let mut config = load_config_from_str(valid_toml()).unwrap();
        config.remote.base_url = String::new();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_rejects_zero_limits_and_intervals() {
        let mut config = load_config_from_str(valid_toml()).unwrap();
        config.views.recent_limit = 0;
        assert!(validate_config(&config).is_err());

        let mut config = load_config_from_str(valid_toml()).unwrap();
        config.recency.refresh_interval_secs = 0;
        assert!(validate_config(&config).is_err());

        let mut config = load_config_from_str(valid_toml()).unwrap();
        config.rows.step = 0;
        assert!(validate_config(&config).is_err());
    }
}
