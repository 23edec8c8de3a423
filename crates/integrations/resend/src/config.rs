use std::time::Duration;

/// Sender used when none is configured. Resend accepts it on every account.
pub const DEFAULT_FROM_ADDRESS: &str = "onboarding@resend.dev";

/// Base URL of the Resend API.
pub const DEFAULT_API_BASE: &str = "https://api.resend.com";

/// Configuration for the Resend mailer.
#[derive(Clone)]
pub struct ResendConfig {
    /// Resend API key.
    pub api_key: String,

    /// Sender address for every relayed message.
    pub from_address: String,

    /// Base URL for the API. Overridden in tests.
    pub api_base: String,

    /// Per-request timeout.
    pub timeout: Duration,
}

impl std::fmt::Debug for ResendConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResendConfig")
            .field("api_key", &"[REDACTED]")
            .field("from_address", &self.from_address)
            .field("api_base", &self.api_base)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl ResendConfig {
    /// Create a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            from_address: DEFAULT_FROM_ADDRESS.to_owned(),
            api_base: DEFAULT_API_BASE.to_owned(),
            timeout: Duration::from_secs(30),
        }
    }

    #[must_use]
    pub fn with_from_address(mut self, from: impl Into<String>) -> Self {
        self.from_address = from.into();
        self
    }

    /// Set the API base URL. A trailing slash is ignored.
    #[must_use]
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_owned();
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = ResendConfig::new("re_key");
        assert_eq!(config.from_address, "onboarding@resend.dev");
        assert_eq!(config.api_base, "https://api.resend.com");
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn with_all_options() {
        let config = ResendConfig::new("re_key")
            .with_from_address("site@example.com")
            .with_api_base("http://127.0.0.1:9000/")
            .with_timeout(Duration::from_secs(5));
        assert_eq!(config.from_address, "site@example.com");
        assert_eq!(config.api_base, "http://127.0.0.1:9000");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn debug_redacts_api_key() {
        let config = ResendConfig::new("re_test-placeholder");
        let debug = format!("{config:?}");
        assert!(debug.contains("[REDACTED]"), "api_key must be redacted");
        assert!(
            !debug.contains("test-placeholder"),
            "api_key must not appear in debug output"
        );
    }
}
