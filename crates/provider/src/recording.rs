//! Recording mailer that captures every send for verification.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::ProviderError;
use crate::mailer::{Mailer, OutboundEmail, SentEmail};

/// Type alias for the response function.
type ResponseFn = dyn Fn(&OutboundEmail) -> Result<SentEmail, ProviderError> + Send + Sync;

/// A mailer that records every message it is asked to send.
///
/// Useful in tests to assert what would have reached the provider, or that
/// nothing did. Defaults to answering with a fixed message id.
pub struct RecordingMailer {
    calls: Arc<Mutex<Vec<OutboundEmail>>>,
    response_fn: Option<Arc<ResponseFn>>,
}

impl std::fmt::Debug for RecordingMailer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordingMailer")
            .field("call_count", &self.call_count())
            .finish_non_exhaustive()
    }
}

impl Default for RecordingMailer {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingMailer {
    /// Id returned for every send unless a response function is set.
    pub const DEFAULT_ID: &'static str = "recorded-message-id";

    pub fn new() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            response_fn: None,
        }
    }

    /// Set a custom response function.
    #[must_use]
    pub fn with_response_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(&OutboundEmail) -> Result<SentEmail, ProviderError> + Send + Sync + 'static,
    {
        self.response_fn = Some(Arc::new(f));
        self
    }

    /// Get all captured messages.
    pub fn calls(&self) -> Vec<OutboundEmail> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    /// Assert that the mailer was called exactly N times.
    ///
    /// # Panics
    ///
    /// Panics if the mailer was not called exactly N times.
    pub fn assert_called(&self, n: usize) {
        let count = self.call_count();
        assert_eq!(count, n, "expected {n} sends, got {count}");
    }
}

impl Mailer for RecordingMailer {
    #[allow(clippy::unnecessary_literal_bound)]
    fn name(&self) -> &str {
        "recording"
    }

    #[allow(clippy::unused_async)]
    async fn send(&self, email: &OutboundEmail) -> Result<SentEmail, ProviderError> {
        self.calls.lock().push(email.clone());
        match &self.response_fn {
            Some(f) => f(email),
            None => Ok(SentEmail {
                id: Self::DEFAULT_ID.to_owned(),
            }),
        }
    }
}
