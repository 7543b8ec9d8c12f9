//! Client configuration loaded from environment variables.

use std::time::Duration;

use heroslides_core::hero_slide::FALLBACK_IMAGE_URL;

/// Errors raised while reading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be a valid {expected}, got '{value}'")]
    Invalid {
        var: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Settings for talking to the admin API.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the server, without a trailing slash.
    pub api_url: String,
    /// Bearer token sent with every request, if any.
    pub api_token: Option<String>,
    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
    /// Thumbnail shown when a slide image is missing or broken.
    pub fallback_image_url: String,
}

impl ClientConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                      | Default                        |
    /// |------------------------------|--------------------------------|
    /// | `HERO_SLIDES_API_URL`        | `http://localhost:3000`        |
    /// | `HERO_SLIDES_API_TOKEN`      | unset                          |
    /// | `REQUEST_TIMEOUT_SECS`       | `30`                           |
    /// | `HERO_SLIDES_FALLBACK_IMAGE` | `/public/logo-softwarepar.png` |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Same as [`from_env`](Self::from_env) but reading from `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = lookup("HERO_SLIDES_API_URL")
            .unwrap_or_else(|| "http://localhost:3000".into())
            .trim_end_matches('/')
            .to_string();

        let api_token = lookup("HERO_SLIDES_API_TOKEN").filter(|t| !t.trim().is_empty());

        let request_timeout_secs = match lookup("REQUEST_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|_| ConfigError::Invalid {
                var: "REQUEST_TIMEOUT_SECS",
                expected: "u64",
                value: raw.clone(),
            })?,
            None => 30,
        };

        let fallback_image_url =
            lookup("HERO_SLIDES_FALLBACK_IMAGE").unwrap_or_else(|| FALLBACK_IMAGE_URL.into());

        Ok(Self {
            api_url,
            api_token,
            request_timeout_secs,
            fallback_image_url,
        })
    }

    /// Configuration pointing at `api_url` with every other setting at its
    /// default.
    pub fn for_url(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into().trim_end_matches('/').to_string(),
            api_token: None,
            request_timeout_secs: 30,
            fallback_image_url: FALLBACK_IMAGE_URL.to_string(),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
