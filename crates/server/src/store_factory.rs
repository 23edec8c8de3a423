use std::sync::Arc;
use std::time::Duration;

use sitedesk_github::{GitHubConfig, GitHubContentStore};
use sitedesk_store::ContentStore;

use crate::config::RepositoryConfig;
use crate::error::ServerError;

/// Create the content store from `[github]`.
///
/// Returns `None` when no token or repository is configured.
pub fn create_content_store(
    config: &RepositoryConfig,
) -> Result<Option<Arc<dyn ContentStore>>, ServerError> {
    let (Some(token), Some(repository)) = (&config.token, &config.repository) else {
        return Ok(None);
    };

    let github = GitHubConfig::from_repository(token.trim(), repository)
        .map_err(|e| ServerError::Config(format!("[github] {e}")))?
        .with_branch(config.branch.trim())
        .with_api_base(&config.api_base)
        .with_timeout(Duration::from_secs(config.timeout_seconds));

    Ok(Some(Arc::new(GitHubContentStore::new(github))))
}
