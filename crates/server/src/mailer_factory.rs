use std::sync::Arc;
use std::time::Duration;

use sitedesk_provider::{DynMailer, LogMailer};
use sitedesk_resend::{ResendConfig, ResendMailer};

use crate::config::EmailConfig;
use crate::error::ServerError;

/// Create the mailer selected by `[email] backend`.
///
/// Returns `None` when the Resend backend has no API key.
pub fn create_mailer(config: &EmailConfig) -> Result<Option<Arc<dyn DynMailer>>, ServerError> {
    let mailer: Option<Arc<dyn DynMailer>> = match config.backend.as_str() {
        "log" => Some(Arc::new(LogMailer::new())),
        "resend" => config.api_key.as_ref().map(|key| {
            let mut resend = ResendConfig::new(key.trim())
                .with_api_base(&config.api_base)
                .with_timeout(Duration::from_secs(config.timeout_seconds));
            if let Some(from) = &config.from_address {
                resend = resend.with_from_address(from.trim());
            }
            Arc::new(ResendMailer::new(resend)) as Arc<dyn DynMailer>
        }),
        other => {
            return Err(ServerError::Config(format!(
                "unknown email backend: {other}"
            )));
        }
    };
    Ok(mailer)
}

/// Sender address for relayed email.
pub fn sender_address(config: &EmailConfig) -> String {
    config
        .from_address
        .as_deref()
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .unwrap_or(sitedesk_resend::config::DEFAULT_FROM_ADDRESS)
        .to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resend_without_key_is_unconfigured() {
        let config = EmailConfig::default();
        assert!(create_mailer(&config).unwrap().is_none());
    }

    #[test]
    fn resend_with_key() {
        let config = EmailConfig {
            api_key: Some("re_key".into()),
            ..EmailConfig::default()
        };
        let mailer = create_mailer(&config).unwrap().expect("mailer");
        assert_eq!(mailer.name(), "resend");
    }

    #[test]
    fn log_backend_needs_no_key() {
        let config = EmailConfig {
            backend: "log".into(),
            ..EmailConfig::default()
        };
        let mailer = create_mailer(&config).unwrap().expect("mailer");
        assert_eq!(mailer.name(), "log");
    }

    #[test]
    fn unknown_backend_is_an_error() {
        let config = EmailConfig {
            backend: "pigeon".into(),
            ..EmailConfig::default()
        };
        assert!(create_mailer(&config).is_err());
    }

    #[test]
    fn sender_falls_back_to_onboarding_address() {
        assert_eq!(sender_address(&EmailConfig::default()), "onboarding@resend.dev");
        let config = EmailConfig {
            from_address: Some("Site <hi@example.com>".into()),
            ..EmailConfig::default()
        };
        assert_eq!(sender_address(&config), "Site <hi@example.com>");
    }
}
