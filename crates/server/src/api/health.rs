use axum::Json;
use axum::extract::State;

use super::AppState;
use super::schemas::HealthResponse;

/// `GET /api/health` -- service status and which integrations are wired.
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "Health",
    summary = "Health check",
    description = "Returns service status and whether the email and storage integrations are configured.",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    )
)]
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".into(),
        service: "sitedesk".into(),
        version: env!("CARGO_PKG_VERSION").into(),
        email_configured: state.mailer.is_some(),
        storage_configured: state.store.is_some(),
    })
}
