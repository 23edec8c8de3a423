mod content;
mod email;
mod github;
mod logging;
mod server;

#[cfg(test)]
mod tests;

pub use content::*;
pub use email::*;
pub use github::*;
pub use logging::*;
pub use server::*;

use serde::Deserialize;
use sitedesk_core::is_valid_email;

use crate::error::ServerError;

/// Top-level configuration for the sitedesk server, loaded from a TOML file
/// and then overridden from the environment.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SiteConfig {
    /// HTTP server bind configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Email relay configuration.
    #[serde(default)]
    pub email: EmailConfig,
    /// Content repository configuration.
    #[serde(default)]
    pub github: RepositoryConfig,
    /// Repository layout for posts and testimonials.
    #[serde(default)]
    pub content: ContentConfig,
    /// Log level and format.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl SiteConfig {
    /// Parse a TOML document. Missing sections take their defaults.
    pub fn from_toml(contents: &str) -> Result<Self, ServerError> {
        toml::from_str(contents).map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Apply environment overrides using `lookup` to read variables.
    ///
    /// Empty variables are ignored so that `FOO=` in a shell does not clear a
    /// value set in the file.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ServerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = get("RESEND_API_KEY") {
            self.email.api_key = Some(v);
        }
        if let Some(v) = get("EMAIL_FROM") {
            self.email.from_address = Some(v);
        }
        if let Some(v) = get("GITHUB_TOKEN") {
            self.github.token = Some(v);
        }
        if let Some(v) = get("GITHUB_REPO") {
            self.github.repository = Some(v);
        }
        if let Some(v) = get("GITHUB_BRANCH") {
            self.github.branch = v;
        }
        if let Some(v) = get("SITEDESK_HOST") {
            self.server.host = v;
        }
        if let Some(v) = get("SITEDESK_PORT") {
            self.server.port = v
                .trim()
                .parse()
                .map_err(|_| ServerError::Config(format!("SITEDESK_PORT is not a port: {v:?}")))?;
        }
        Ok(())
    }

    /// Reject configurations that are present but unusable.
    ///
    /// A credential that is absent altogether is allowed; the matching
    /// endpoint answers "not configured" instead.
    pub fn validate(&self) -> Result<(), ServerError> {
        let fail = |msg: String| Err(ServerError::Config(msg));

        match self.email.backend.as_str() {
            "resend" | "log" => {}
            other => return fail(format!("unknown email backend {other:?} (expected resend or log)")),
        }
        if self.email.api_key.as_deref().is_some_and(|k| k.trim().is_empty()) {
            return fail("[email] api_key is empty".into());
        }
        if let Some(from) = &self.email.from_address
            && !is_valid_sender(from)
        {
            return fail(format!("[email] from_address is not a valid address: {from:?}"));
        }
        if self.email.timeout_seconds == 0 {
            return fail("[email] timeout_seconds must be greater than 0".into());
        }

        let github = &self.github;
        if github.token.as_deref().is_some_and(|t| t.trim().is_empty()) {
            return fail("[github] token is empty".into());
        }
        match (&github.token, &github.repository) {
            (Some(_), None) => return fail("[github] token is set but repository is missing".into()),
            (None, Some(_)) => return fail("[github] repository is set but token is missing".into()),
            _ => {}
        }
        if let Some(repository) = &github.repository {
            sitedesk_github::config::parse_repository(repository)
                .map_err(|e| ServerError::Config(format!("[github] {e}")))?;
        }
        if github.branch.trim().is_empty() {
            return fail("[github] branch is empty".into());
        }
        if github.timeout_seconds == 0 {
            return fail("[github] timeout_seconds must be greater than 0".into());
        }

        if self.server.max_body_bytes == 0 {
            return fail("[server] max_body_bytes must be greater than 0".into());
        }
        for (key, value) in [
            ("posts_dir", &self.content.posts_dir),
            ("blog_images_dir", &self.content.blog_images_dir),
            ("testimonials_path", &self.content.testimonials_path),
            ("testimonial_images_dir", &self.content.testimonial_images_dir),
        ] {
            if value.trim_matches('/').trim().is_empty() {
                return fail(format!("[content] {key} is empty"));
            }
        }
        Ok(())
    }

    /// Whether `/api/send-email` can reach a mailer.
    pub fn email_configured(&self) -> bool {
        self.email.backend == "log" || self.email.api_key.is_some()
    }

    /// Whether the content endpoints can reach a repository.
    pub fn storage_configured(&self) -> bool {
        self.github.token.is_some() && self.github.repository.is_some()
    }
}

/// Accepts `addr@example.com` and `Name <addr@example.com>`.
fn is_valid_sender(from: &str) -> bool {
    let from = from.trim();
    let address = match (from.rfind('<'), from.strip_suffix('>')) {
        (Some(start), Some(inner)) => &inner[start + 1..],
        _ => from,
    };
    is_valid_email(address)
}
