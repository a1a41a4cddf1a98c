use std::time::Duration;

use yuletree_core::assets::ImageHost;
use yuletree_core::error::CoreError;

/// Default backend API base URL.
pub const DEFAULT_API_URL: &str = "http://localhost:8070/api";

/// Default host serving `/images/...`.
pub const DEFAULT_IMAGE_HOST: &str = "http://localhost:8070";

/// Default HTTP request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client configuration loaded from environment variables.
///
/// All fields have defaults suitable for a local backend.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL every REST path is appended to (default: `http://localhost:8070/api`).
    pub api_url: String,
    /// Host used to template image URLs (default: `http://localhost:8070`).
    pub image_host: String,
    /// Per-request timeout in seconds (default: `30`).
    pub timeout_secs: u64,
    /// Stored access token, if any.
    pub token: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            image_host: DEFAULT_IMAGE_HOST.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            token: None,
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                     |
    /// |-------------------------|-----------------------------|
    /// | `YULETREE_API_URL`      | `http://localhost:8070/api` |
    /// | `YULETREE_IMAGE_HOST`   | `http://localhost:8070`     |
    /// | `YULETREE_TIMEOUT_SECS` | `30`                        |
    /// | `YULETREE_TOKEN`        | --                          |
    pub fn from_env() -> Result<Self, CoreError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CoreError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_url = non_empty("YULETREE_API_URL")
            .unwrap_or_else(|| DEFAULT_API_URL.into())
            .trim_end_matches('/')
            .to_string();

        let image_host =
            non_empty("YULETREE_IMAGE_HOST").unwrap_or_else(|| DEFAULT_IMAGE_HOST.into());

        let timeout_secs = match non_empty("YULETREE_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|_| {
                CoreError::Validation(format!(
                    "YULETREE_TIMEOUT_SECS must be a valid u64, got '{raw}'"
                ))
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        let token = non_empty("YULETREE_TOKEN");

        Ok(Self {
            api_url,
            image_host,
            timeout_secs,
            token,
        })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn image_host(&self) -> ImageHost {
        ImageHost::new(self.image_host.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = ClientConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.image_host, DEFAULT_IMAGE_HOST);
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert_eq!(config.token, None);
    }

    #[test]
    fn overrides_are_applied() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("YULETREE_API_URL", "https://tree.example.com/api/"),
            ("YULETREE_IMAGE_HOST", "https://img.example.com"),
            ("YULETREE_TIMEOUT_SECS", "5"),
            ("YULETREE_TOKEN", "secret"),
        ]))
        .unwrap();
        assert_eq!(config.api_url, "https://tree.example.com/api");
        assert_eq!(config.image_host().base(), "https://img.example.com");
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.token.as_deref(), Some("secret"));
    }

    #[test]
    fn invalid_timeout_is_validation_error() {
        let err = ClientConfig::from_lookup(lookup(&[("YULETREE_TIMEOUT_SECS", "soon")]));
        assert!(matches!(err, Err(CoreError::Validation(_))));
    }

    #[test]
    fn blank_token_counts_as_missing() {
        let config = ClientConfig::from_lookup(lookup(&[("YULETREE_TOKEN", "  ")])).unwrap();
        assert_eq!(config.token, None);
    }
}
