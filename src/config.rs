//! Client configuration.

use anyhow::{Context, Result, bail};
use reqwest::Url;
use std::time::Duration;

pub const DEFAULT_ORIGIN: &str = "http://127.0.0.1:8080";
pub const DEFAULT_BASE_PATH: &str = "/api";
pub const DEFAULT_TOKEN_KEY: &str = "token";
pub const DEFAULT_LOGIN_PATH: &str = "/login";

/// How long toasts stay on screen.
pub const TOAST_DURATION: Duration = Duration::from_millis(1000);

/// Delay between the session-expired toast and the login redirect.
pub const REDIRECT_DELAY: Duration = Duration::from_millis(1000);

/// Which completed statuses resolve successfully.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SuccessPolicy {
    /// Only exactly 200; 201, 204 and friends are rejected.
    #[default]
    Exact200,
    /// The whole 2xx range.
    Any2xx,
}

impl SuccessPolicy {
    pub fn accepts(self, status: u16) -> bool {
        match self {
            SuccessPolicy::Exact200 => status == 200,
            SuccessPolicy::Any2xx => (200..300).contains(&status),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Scheme, host and port of the backend.
    pub origin: String,
    /// Prefix prepended to every request path.
    pub base_path: String,
    /// Per-request timeout. None waits indefinitely.
    pub timeout: Option<Duration>,
    /// Send the stored token as the `Authorization` header.
    pub attach_token: bool,
    pub token_key: String,
    pub login_path: String,
    pub toast_duration: Duration,
    pub redirect_delay: Duration,
    pub success_policy: SuccessPolicy,
}

impl ClientConfig {
    pub fn new(origin: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            ..Self::default()
        }
    }

    /// Origin joined with the base path, e.g. `http://127.0.0.1:8080/api`.
    pub fn base_url(&self) -> Result<String> {
        let origin = Url::parse(&self.origin)
            .with_context(|| format!("Invalid origin URL: {}", self.origin))?;
        if origin.cannot_be_a_base() {
            bail!("Origin URL cannot be used as a base: {}", self.origin);
        }
        let origin = self.origin.trim_end_matches('/');
        let base_path = self.base_path.trim_matches('/');
        if base_path.is_empty() {
            Ok(origin.to_string())
        } else {
            Ok(format!("{}/{}", origin, base_path))
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            origin: DEFAULT_ORIGIN.to_string(),
            base_path: DEFAULT_BASE_PATH.to_string(),
            timeout: None,
            attach_token: false,
            token_key: DEFAULT_TOKEN_KEY.to_string(),
            login_path: DEFAULT_LOGIN_PATH.to_string(),
            toast_duration: TOAST_DURATION,
            redirect_delay: REDIRECT_DELAY,
            success_policy: SuccessPolicy::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.base_path, "/api");
        assert_eq!(config.token_key, "token");
        assert_eq!(config.login_path, "/login");
        assert_eq!(config.timeout, None);
        assert!(!config.attach_token);
        assert_eq!(config.toast_duration, Duration::from_secs(1));
        assert_eq!(config.redirect_delay, Duration::from_secs(1));
        assert_eq!(config.success_policy, SuccessPolicy::Exact200);
    }

    #[test]
    fn test_base_url_joins_origin_and_base_path() {
        let config = ClientConfig::new("http://example.com/");
        assert_eq!(config.base_url().unwrap(), "http://example.com/api");

        let mut config = ClientConfig::new("http://example.com");
        config.base_path = "v2/".to_string();
        assert_eq!(config.base_url().unwrap(), "http://example.com/v2");

        config.base_path = String::new();
        assert_eq!(config.base_url().unwrap(), "http://example.com");
    }

    #[test]
    fn test_base_url_rejects_invalid_origin() {
        assert!(ClientConfig::new("not a url").base_url().is_err());
        assert!(ClientConfig::new("mailto:someone@example.com").base_url().is_err());
    }

    #[test]
    fn test_success_policy() {
        assert!(SuccessPolicy::Exact200.accepts(200));
        assert!(!SuccessPolicy::Exact200.accepts(201));
        assert!(!SuccessPolicy::Exact200.accepts(204));
        assert!(SuccessPolicy::Any2xx.accepts(201));
        assert!(SuccessPolicy::Any2xx.accepts(299));
        assert!(!SuccessPolicy::Any2xx.accepts(300));
        assert!(!SuccessPolicy::Any2xx.accepts(404));
    }
}
