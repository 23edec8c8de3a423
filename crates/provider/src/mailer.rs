use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ProviderError;

/// A fully resolved message, ready for the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundEmail {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<String>,
}

/// The provider's acknowledgement of an accepted message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentEmail {
    /// Provider-assigned message identifier.
    pub id: String,
}

/// Strongly-typed mailer trait with native `async fn`.
///
/// Not object-safe; every `Mailer` gets a [`DynMailer`] implementation for
/// free, which is what the server stores.
pub trait Mailer: Send + Sync {
    /// Returns the name of this provider, used in logs.
    fn name(&self) -> &str;

    /// Send one message. Exactly one outbound call; no retries.
    fn send(
        &self,
        email: &OutboundEmail,
    ) -> impl std::future::Future<Output = Result<SentEmail, ProviderError>> + Send;
}

/// Object-safe mailer trait for use behind `Arc<dyn DynMailer>`.
#[async_trait]
pub trait DynMailer: Send + Sync {
    fn name(&self) -> &str;

    async fn send(&self, email: &OutboundEmail) -> Result<SentEmail, ProviderError>;
}

#[async_trait]
impl<T: Mailer + Sync> DynMailer for T {
    fn name(&self) -> &str {
        Mailer::name(self)
    }

    async fn send(&self, email: &OutboundEmail) -> Result<SentEmail, ProviderError> {
        Mailer::send(self, email).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    struct MockMailer {
        should_fail: bool,
    }

    impl Mailer for MockMailer {
        fn name(&self) -> &str {
            "mock"
        }

        async fn send(&self, email: &OutboundEmail) -> Result<SentEmail, ProviderError> {
            if self.should_fail {
                return Err(ProviderError::Rejected {
                    status: 400,
                    message: "mock failure".into(),
                });
            }
            Ok(SentEmail {
                id: format!("id-for-{}", email.to[0]),
            })
        }
    }

    fn email() -> OutboundEmail {
        OutboundEmail {
            from: "site@example.com".into(),
            to: vec!["reader@example.com".into()],
            subject: "Hi".into(),
            text: "Body".into(),
            reply_to: None,
        }
    }

    #[tokio::test]
    async fn blanket_dyn_mailer_impl() {
        let mailer: Arc<dyn DynMailer> = Arc::new(MockMailer { should_fail: false });
        assert_eq!(mailer.name(), "mock");
        let sent = mailer.send(&email()).await.unwrap();
        assert_eq!(sent.id, "id-for-reader@example.com");
    }

    #[tokio::test]
    async fn dyn_mailer_failure() {
        let mailer: Arc<dyn DynMailer> = Arc::new(MockMailer { should_fail: true });
        let err = mailer.send(&email()).await.unwrap_err();
        assert_eq!(err.provider_status(), Some(400));
    }

    #[test]
    fn reply_to_omitted_when_absent() {
        let json = serde_json::to_value(email()).unwrap();
        assert!(json.get("reply_to").is_none());
        assert_eq!(json["to"][0], "reader@example.com");

        let mut with_reply = email();
        with_reply.reply_to = Some("me@example.com".into());
        let json = serde_json::to_value(with_reply).unwrap();
        assert_eq!(json["reply_to"], "me@example.com");
    }
}
