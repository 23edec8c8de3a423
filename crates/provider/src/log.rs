use std::sync::atomic::{AtomicU64, Ordering};

use tracing::info;

use crate::error::ProviderError;
use crate::mailer::{Mailer, OutboundEmail, SentEmail};

/// A mailer that logs each message and reports success without any external
/// I/O.
///
/// Selected with `backend = "log"` for local development, where no provider
/// credential is available.
#[derive(Debug, Default)]
pub struct LogMailer {
    sent: AtomicU64,
}

impl LogMailer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Mailer for LogMailer {
    #[allow(clippy::unnecessary_literal_bound)]
    fn name(&self) -> &str {
        "log"
    }

    #[allow(clippy::unused_async)]
    async fn send(&self, email: &OutboundEmail) -> Result<SentEmail, ProviderError> {
        let n = self.sent.fetch_add(1, Ordering::SeqCst) + 1;
        info!(
            from = %email.from,
            to = ?email.to,
            subject = %email.subject,
            reply_to = ?email.reply_to,
            "log mailer accepted message"
        );
        Ok(SentEmail {
            id: format!("log-{n}"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn log_mailer_assigns_sequential_ids() {
        let mailer = LogMailer::new();
        let email = OutboundEmail {
            from: "a@example.com".into(),
            to: vec!["b@example.com".into()],
            subject: "s".into(),
            text: "t".into(),
            reply_to: None,
        };
        assert_eq!(mailer.send(&email).await.unwrap().id, "log-1");
        assert_eq!(mailer.send(&email).await.unwrap().id, "log-2");
        assert_eq!(Mailer::name(&mailer), "log");
    }
}
