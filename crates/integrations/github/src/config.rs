use std::time::Duration;

use crate::error::GitHubError;

/// Base URL of the public GitHub API.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Configuration for the GitHub content store.
#[derive(Clone)]
pub struct GitHubConfig {
    /// Token with `contents: write` on the repository.
    pub token: String,

    pub owner: String,

    pub repo: String,

    /// Branch every read and commit targets.
    pub branch: String,

    /// Base URL for the API. Overridden for GitHub Enterprise and in tests.
    pub api_base: String,

    pub timeout: Duration,

    /// Sent as `User-Agent`, which GitHub requires.
    pub user_agent: String,
}

impl std::fmt::Debug for GitHubConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubConfig")
            .field("token", &"[REDACTED]")
            .field("owner", &self.owner)
            .field("repo", &self.repo)
            .field("branch", &self.branch)
            .field("api_base", &self.api_base)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl GitHubConfig {
    pub fn new(token: impl Into<String>, owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            owner: owner.into(),
            repo: repo.into(),
            branch: "main".to_owned(),
            api_base: DEFAULT_API_BASE.to_owned(),
            timeout: Duration::from_secs(30),
            user_agent: concat!("sitedesk/", env!("CARGO_PKG_VERSION")).to_owned(),
        }
    }

    /// Create a configuration from an `owner/name` repository string.
    pub fn from_repository(token: impl Into<String>, repository: &str) -> Result<Self, GitHubError> {
        let (owner, repo) = parse_repository(repository)?;
        Ok(Self::new(token, owner, repo))
    }

    #[must_use]
    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = branch.into();
        self
    }

    /// Set the API base URL. A trailing slash is ignored.
    #[must_use]
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_owned();
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// `owner/name`, as shown on GitHub.
    pub fn repository(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }
}

/// Split `owner/name` into its parts.
///
/// Both parts must be non-empty and use only the characters GitHub allows in
/// account and repository names.
pub fn parse_repository(repository: &str) -> Result<(String, String), GitHubError> {
    let invalid = || GitHubError::InvalidRepository(repository.to_owned());

    let (owner, repo) = repository.trim().split_once('/').ok_or_else(invalid)?;
    let valid_part = |part: &str| {
        !part.is_empty()
            && part != "."
            && part != ".."
            && part
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
    };
    if !valid_part(owner) || !valid_part(repo) {
        return Err(invalid());
    }
    Ok((owner.to_owned(), repo.to_owned()))
}
