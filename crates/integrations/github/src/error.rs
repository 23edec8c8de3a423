use sitedesk_store::StoreError;
use thiserror::Error;

/// Errors specific to the GitHub content store.
///
/// These are internal errors that get converted into [`StoreError`] at the
/// public API boundary.
#[derive(Debug, Error)]
pub enum GitHubError {
    /// An HTTP-level transport error occurred, including timeouts.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The GitHub API returned an error response.
    #[error("GitHub API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The supplied SHA no longer matches the file on the branch.
    #[error("file {path} changed on GitHub since it was read")]
    Conflict { path: String },

    /// A response body could not be decoded.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// The repository is not of the form `owner/name`.
    #[error("invalid repository {0:?}: expected owner/name")]
    InvalidRepository(String),
}

impl From<GitHubError> for StoreError {
    fn from(err: GitHubError) -> Self {
        match err {
            GitHubError::Http(e) => StoreError::Connection(e.to_string()),
            GitHubError::Api { status, message } => StoreError::Api { status, message },
            GitHubError::Conflict { path } => StoreError::Conflict { path },
            GitHubError::InvalidResponse(msg) => StoreError::Serialization(msg),
            GitHubError::InvalidRepository(repo) => {
                StoreError::Configuration(format!("invalid repository {repo:?}"))
            }
        }
    }
}
