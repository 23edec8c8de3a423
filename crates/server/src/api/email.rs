use axum::Json;
use axum::extract::State;
use tracing::{info, warn};

use sitedesk_core::EmailRequest;
use sitedesk_provider::OutboundEmail;

use super::AppState;
use super::extract::ApiJson;
use super::schemas::{ErrorResponse, SendEmailResponse};
use crate::error::ServerError;

/// `POST /api/send-email` -- validate a contact-form message and relay it.
#[utoipa::path(
    post,
    path = "/api/send-email",
    tag = "Email",
    summary = "Send email",
    description = "Validates, sanitizes and HTML-escapes the message, then relays it through the configured email provider. Exactly one provider call is made; nothing is retried.",
    request_body(content = EmailRequest, description = "Message to relay"),
    responses(
        (status = 200, description = "Accepted by the provider", body = SendEmailResponse),
        (status = 400, description = "Missing or invalid fields", body = ErrorResponse),
        (status = 500, description = "Email not configured or provider unreachable", body = ErrorResponse)
    )
)]
pub async fn send_email(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<EmailRequest>,
) -> Result<Json<SendEmailResponse>, ServerError> {
    let email = request.validate()?;
    let mailer = state.mailer()?;

    let outbound = OutboundEmail {
        from: state.from_address.clone(),
        to: vec![email.to],
        subject: email.subject,
        text: email.body,
        reply_to: email.reply_to,
    };

    let sent = mailer.send(&outbound).await.inspect_err(|e| {
        warn!(provider = mailer.name(), error = %e, "email relay failed");
    })?;

    info!(provider = mailer.name(), id = %sent.id, "email relayed");

    Ok(Json(SendEmailResponse {
        success: true,
        id: sent.id,
    }))
}
