use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Health check response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status indicator.
    #[schema(example = "ok")]
    pub status: String,
    #[schema(example = "sitedesk")]
    pub service: String,
    #[schema(example = "0.1.0")]
    pub version: String,
    /// Whether `/api/send-email` has a mailer.
    pub email_configured: bool,
    /// Whether the content endpoints have a repository.
    pub storage_configured: bool,
}

/// Returned when an email is accepted by the provider.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SendEmailResponse {
    pub success: bool,
    /// Provider-assigned message id.
    #[schema(example = "4ef9a417-02e9-4d39-ad75-9611e0fcc33c")]
    pub id: String,
}

/// Returned when a blog post is committed.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SavePostResponse {
    pub success: bool,
    /// Repository path of the post document.
    #[schema(example = "posts/2024-01-02-hello-world")]
    pub path: String,
    pub message: String,
}

/// Returned when a testimonial is committed.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SaveTestimonialResponse {
    pub success: bool,
    pub message: String,
}

/// Error response body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable error message.
    #[schema(example = "missing required fields: to")]
    pub error: String,
    /// Upstream error detail, when there is one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// How to fix a missing integration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}
