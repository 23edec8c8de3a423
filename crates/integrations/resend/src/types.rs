use serde::{Deserialize, Serialize};

/// Body of `POST /emails`.
#[derive(Debug, Clone, Serialize)]
pub struct ResendSendRequest {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<String>,
}

/// Successful response from `POST /emails`.
#[derive(Debug, Clone, Deserialize)]
pub struct ResendSendResponse {
    pub id: String,
}

/// Error body returned by Resend.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResendErrorResponse {
    pub status_code: Option<u16>,
    pub name: Option<String>,
    pub message: Option<String>,
}
