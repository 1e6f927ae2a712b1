use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use std::path::Path;

use super::{types::Config, ConfigError};

/// Load configuration from file with environment variable overrides
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.display().to_string()));
    }

    let config: Config = Figment::new()
        .merge(Toml::file(path))
        .merge(Env::prefixed("MARQUEE_").split("_"))
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))?;

    Ok(config)
}

/// Load configuration from TOML string (useful for testing)
pub fn load_config_from_str(toml_str: &str) -> Result<Config, ConfigError> {
    toml::from_str(toml_str).map_err(|e| ConfigError::ParseError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_config_from_str_valid() {
        let toml = r#"
[remote]
base_url = "https://api.example.com"
api_key = "k"
"#;
        let config = load_config_from_str(toml).unwrap();
        assert_eq!(config.remote.base_url, "https://api.example.com");
        assert_eq!(config.remote.timeout_secs, 30);
        assert_eq!(config.views.recent_limit, 15);
        assert_eq!(config.recency.refresh_interval_secs, 60);
        assert_eq!(config.rows.tick_interval_ms, 4000);
    }

    #[test]
    fn test_load_config_from_str_missing_remote() {
        let toml = r#"
[views]
recent_limit = 10
"#;
        let result = load_config_from_str(toml);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result = load_config(Path::new("/nonexistent/config.toml"));
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }

    #[test]
    fn test_load_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(
            temp_file,
            r#"
[remote]
base_url = "http://localhost:5000"

[views]
recent_limit = 10

[rows]
wrap = true
"#
        )
        .unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.remote.base_url, "http://localhost:5000");
        assert_eq!(config.views.recent_limit, 10);
        assert!(config.rows.wrap);
    }
}
