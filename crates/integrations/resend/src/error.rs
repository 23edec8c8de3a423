use sitedesk_provider::ProviderError;
use thiserror::Error;

/// Errors specific to the Resend mailer.
///
/// These are internal errors that get converted into [`ProviderError`] at the
/// public API boundary.
#[derive(Debug, Error)]
pub enum ResendError {
    /// An HTTP-level transport error occurred, including timeouts.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Resend rejected the message.
    #[error("Resend API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Resend answered 2xx with a body we could not read.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl From<ResendError> for ProviderError {
    fn from(err: ResendError) -> Self {
        match err {
            ResendError::Http(e) => ProviderError::Connection(e.to_string()),
            ResendError::Api { status, message } => ProviderError::Rejected { status, message },
            ResendError::InvalidResponse(msg) => ProviderError::Serialization(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_keeps_status() {
        let provider_err: ProviderError = ResendError::Api {
            status: 422,
            message: "Invalid `to` field".into(),
        }
        .into();
        assert_eq!(provider_err.provider_status(), Some(422));
    }

    #[test]
    fn invalid_response_maps_to_serialization() {
        let provider_err: ProviderError =
            ResendError::InvalidResponse("missing id".into()).into();
        assert!(matches!(provider_err, ProviderError::Serialization(_)));
        assert_eq!(provider_err.provider_status(), None);
    }

    #[test]
    fn error_display() {
        let err = ResendError::Api {
            status: 403,
            message: "forbidden".into(),
        };
        assert_eq!(err.to_string(), "Resend API error (403): forbidden");
    }
}
