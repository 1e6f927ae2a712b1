use serde::{Deserialize, Serialize};

use crate::favorites::FavoritesConfig;
use crate::recency::RecencyConfig;
use crate::remote::RemoteConfig;
use crate::rows::AutoScrollConfig;
use crate::views::ViewConfig;

/// Root configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Remote catalog service (required: there is no default base URL).
    pub remote: RemoteConfig,
    #[serde(default)]
    pub favorites: FavoritesConfig,
    #[serde(default)]
    pub views: ViewConfig,
    #[serde(default)]
    pub recency: RecencyConfig,
    #[serde(default)]
    pub rows: AutoScrollConfig,
}

/// Sanitized config for logging (API key redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub remote: SanitizedRemoteConfig,
    pub favorites: FavoritesConfig,
    pub views: ViewConfig,
    pub recency: RecencyConfig,
    pub rows: AutoScrollConfig,
}

/// Sanitized remote config (API key hidden)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedRemoteConfig {
    pub base_url: String,
    pub api_key_configured: bool,
    pub timeout_secs: u64,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            remote: SanitizedRemoteConfig {
                base_url: config.remote.base_url.clone(),
                api_key_configured: config.remote.api_key.is_some(),
                timeout_secs: config.remote.timeout_secs,
            },
            favorites: config.favorites.clone(),
            views: config.views.clone(),
            recency: config.recency.clone(),
            rows: config.rows.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitized_config_redacts_api_key() {
        let config = Config {
            remote: RemoteConfig {
                base_url: "https://api.example.com".to_string(),
                api_key: Some("super-secret".to_string()),
                timeout_secs: 30,
            },
            favorites: FavoritesConfig::default(),
            views: ViewConfig::default(),
            recency: RecencyConfig::default(),
            rows: AutoScrollConfig::default(),
        };

        let sanitized = SanitizedConfig::from(&config);
        assert!(sanitized.remote.api_key_configured);

        let json = serde_json::to_string(&sanitized).unwrap();
        assert!(!json.contains("super-secret"));
    }
}
