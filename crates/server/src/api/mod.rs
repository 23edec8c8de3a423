pub mod email;
pub mod extract;
pub mod health;
pub mod openapi;
pub mod posts;
mod publish;
pub mod schemas;
pub mod testimonials;

use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::routing::{get, post};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use sitedesk_core::{PostLayout, TestimonialDefaults};
use sitedesk_provider::DynMailer;
use sitedesk_store::ContentStore;

use crate::config::SiteConfig;
use crate::error::ServerError;
use crate::mailer_factory::{create_mailer, sender_address};
use crate::store_factory::create_content_store;

use self::openapi::ApiDoc;

const EMAIL_HINT: &str = "Set RESEND_API_KEY (or [email] api_key) and restart the server.";
const STORAGE_HINT: &str =
    "Set GITHUB_TOKEN and GITHUB_REPO (or [github] token and repository) and restart the server.";

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Mailer for `/api/send-email` (None when email is not configured).
    pub mailer: Option<Arc<dyn DynMailer>>,
    /// Content store for posts and testimonials (None when not configured).
    pub store: Option<Arc<dyn ContentStore>>,
    /// Sender address for relayed email.
    pub from_address: String,
    pub post_layout: Arc<PostLayout>,
    pub testimonials: Arc<TestimonialDefaults>,
    /// Largest accepted request body in bytes.
    pub max_body_bytes: usize,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            mailer: None,
            store: None,
            from_address: sitedesk_resend::config::DEFAULT_FROM_ADDRESS.to_owned(),
            post_layout: Arc::new(PostLayout::default()),
            testimonials: Arc::new(TestimonialDefaults::default()),
            max_body_bytes: 8 * 1024 * 1024,
        }
    }
}

impl AppState {
    /// Build the state from a validated configuration, constructing the
    /// configured integrations.
    pub fn from_config(config: &SiteConfig) -> Result<Self, ServerError> {
        Ok(Self {
            mailer: create_mailer(&config.email)?,
            store: create_content_store(&config.github)?,
            from_address: sender_address(&config.email),
            post_layout: Arc::new(config.content.post_layout()),
            testimonials: Arc::new(config.content.testimonial_defaults()),
            max_body_bytes: config.server.max_body_bytes,
        })
    }

    #[must_use]
    pub fn with_mailer(mut self, mailer: Arc<dyn DynMailer>) -> Self {
        self.mailer = Some(mailer);
        self
    }

    #[must_use]
    pub fn with_store(mut self, store: Arc<dyn ContentStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub(crate) fn mailer(&self) -> Result<Arc<dyn DynMailer>, ServerError> {
        self.mailer.clone().ok_or(ServerError::NotConfigured {
            service: "email",
            hint: EMAIL_HINT,
        })
    }

    pub(crate) fn store(&self) -> Result<Arc<dyn ContentStore>, ServerError> {
        self.store.clone().ok_or(ServerError::NotConfigured {
            service: "storage",
            hint: STORAGE_HINT,
        })
    }
}

/// Answers CORS-less `OPTIONS` probes. Real preflights are handled by the
/// CORS layer before they reach this.
async fn options_ok() -> StatusCode {
    StatusCode::OK
}

/// Build the Axum router with all API routes, middleware, and Swagger UI.
pub fn router(state: AppState) -> Router {
    let max_body_bytes = state.max_body_bytes;

    Router::new()
        .route("/api/health", get(health::health))
        .route(
            "/api/send-email",
            post(email::send_email).options(options_ok),
        )
        .route("/api/save-post", post(posts::save_post).options(options_ok))
        .route(
            "/api/save-testimonial",
            post(testimonials::save_testimonial).options(options_ok),
        )
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .with_state(state)
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
