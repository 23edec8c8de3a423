use serde::Deserialize;

/// GitHub repository the site is published from (`[github]`).
#[derive(Clone, Deserialize)]
pub struct RepositoryConfig {
    /// Token with write access to repository contents. Overridden by
    /// `GITHUB_TOKEN`.
    pub token: Option<String>,
    /// `owner/name`. Overridden by `GITHUB_REPO`.
    pub repository: Option<String>,
    /// Overridden by `GITHUB_BRANCH`.
    #[serde(default = "default_branch")]
    pub branch: String,
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl std::fmt::Debug for RepositoryConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RepositoryConfig")
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("repository", &self.repository)
            .field("branch", &self.branch)
            .field("api_base", &self.api_base)
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            token: None,
            repository: None,
            branch: default_branch(),
            api_base: default_api_base(),
            timeout_seconds: default_timeout(),
        }
    }
}

fn default_branch() -> String {
    "main".to_owned()
}

fn default_api_base() -> String {
    sitedesk_github::config::DEFAULT_API_BASE.to_owned()
}

fn default_timeout() -> u64 {
    30
}
