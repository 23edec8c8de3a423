use reqwest::Client;
use sitedesk_provider::{Mailer, OutboundEmail, ProviderError, SentEmail};
use tracing::{debug, info, instrument, warn};

use crate::config::ResendConfig;
use crate::error::ResendError;
use crate::types::{ResendErrorResponse, ResendSendRequest, ResendSendResponse};

/// Mailer that relays messages through the Resend API.
pub struct ResendMailer {
    config: ResendConfig,
    client: Client,
}

impl ResendMailer {
    /// Create a new Resend mailer with the given configuration.
    pub fn new(config: ResendConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("failed to build HTTP client");
        Self { config, client }
    }

    /// Create a new Resend mailer with a custom HTTP client.
    pub fn with_client(config: ResendConfig, client: Client) -> Self {
        Self { config, client }
    }

    pub fn config(&self) -> &ResendConfig {
        &self.config
    }

    fn build_request(&self, email: &OutboundEmail) -> ResendSendRequest {
        let from = if email.from.trim().is_empty() {
            self.config.from_address.clone()
        } else {
            email.from.clone()
        };
        ResendSendRequest {
            from,
            to: email.to.clone(),
            subject: email.subject.clone(),
            text: email.text.clone(),
            reply_to: email.reply_to.clone(),
        }
    }

    /// Turn a non-2xx response into [`ResendError::Api`], preferring the
    /// `message` Resend puts in its error body.
    async fn api_error(response: reqwest::Response) -> ResendError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ResendErrorResponse>(&body)
            .ok()
            .and_then(|e| e.message)
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| {
                if body.trim().is_empty() {
                    status
                        .canonical_reason()
                        .unwrap_or("request rejected")
                        .to_owned()
                } else {
                    body
                }
            });
        ResendError::Api {
            status: status.as_u16(),
            message,
        }
    }
}

impl Mailer for ResendMailer {
    #[allow(clippy::unnecessary_literal_bound)]
    fn name(&self) -> &str {
        "resend"
    }

    #[instrument(skip(self, email), fields(provider = "resend", recipients = email.to.len()))]
    async fn send(&self, email: &OutboundEmail) -> Result<SentEmail, ProviderError> {
        let request = self.build_request(email);
        let url = format!("{}/emails", self.config.api_base);

        debug!(from = %request.from, "sending email via Resend");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(ResendError::Http)?;

        let status = response.status();
        if !status.is_success() {
            let err = Self::api_error(response).await;
            warn!(status = status.as_u16(), error = %err, "Resend rejected email");
            return Err(err.into());
        }

        let sent: ResendSendResponse = response
            .json()
            .await
            .map_err(|e| ResendError::InvalidResponse(e.to_string()))?;

        info!(id = %sent.id, "email accepted by Resend");

        Ok(SentEmail { id: sent.id })
    }
}
