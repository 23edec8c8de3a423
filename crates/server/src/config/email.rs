use serde::Deserialize;

/// Email relay configuration (`[email]`).
#[derive(Clone, Deserialize)]
pub struct EmailConfig {
    /// `"resend"` relays through the Resend API; `"log"` only logs messages.
    #[serde(default = "default_backend")]
    pub backend: String,
    /// Resend API key. Overridden by `RESEND_API_KEY`.
    pub api_key: Option<String>,
    /// Sender address. Overridden by `EMAIL_FROM`.
    ///
    /// Falls back to the provider's shared onboarding sender when unset.
    pub from_address: Option<String>,
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl std::fmt::Debug for EmailConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmailConfig")
            .field("backend", &self.backend)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("from_address", &self.from_address)
            .field("api_base", &self.api_base)
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            api_key: None,
            from_address: None,
            api_base: default_api_base(),
            timeout_seconds: default_timeout(),
        }
    }
}

fn default_backend() -> String {
    "resend".to_owned()
}

fn default_api_base() -> String {
    sitedesk_resend::config::DEFAULT_API_BASE.to_owned()
}

fn default_timeout() -> u64 {
    30
}
