use thiserror::Error;

/// Errors that can occur while relaying an email.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The provider answered and refused the message.
    ///
    /// `status` is the provider's HTTP status and is forwarded to the caller.
    #[error("provider rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// A network or transport-level error occurred.
    #[error("connection error: {0}")]
    Connection(String),

    /// The provider was given invalid configuration.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// The provider's response could not be understood.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl ProviderError {
    /// The provider-assigned HTTP status, for errors the provider reported.
    pub fn provider_status(&self) -> Option<u16> {
        match self {
            Self::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }
}
