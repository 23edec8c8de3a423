use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as B64;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use reqwest::{Client, RequestBuilder, StatusCode};
use sitedesk_store::{ContentStore, Revision, StoreError, StoredFile};
use tracing::{debug, info, instrument, warn};

use crate::config::GitHubConfig;
use crate::error::GitHubError;
use crate::types::{FileContents, GitHubErrorResponse, PutContentsRequest, PutContentsResponse};

/// Characters left unescaped in a path segment (RFC 3986 unreserved).
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

const API_VERSION: &str = "2022-11-28";

/// Content store that commits files to a GitHub repository.
pub struct GitHubContentStore {
    config: GitHubConfig,
    client: Client,
}

impl GitHubContentStore {
    /// Create a new GitHub content store with the given configuration.
    pub fn new(config: GitHubConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("failed to build HTTP client");
        Self { config, client }
    }

    /// Create a new GitHub content store with a custom HTTP client.
    pub fn with_client(config: GitHubConfig, client: Client) -> Self {
        Self { config, client }
    }

    pub fn config(&self) -> &GitHubConfig {
        &self.config
    }

    fn contents_url(&self, path: &str) -> String {
        let encoded: Vec<String> = path
            .trim_matches('/')
            .split('/')
            .map(|segment| utf8_percent_encode(segment, PATH_SEGMENT).to_string())
            .collect();
        format!(
            "{}/repos/{}/{}/contents/{}",
            self.config.api_base,
            self.config.owner,
            self.config.repo,
            encoded.join("/")
        )
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .bearer_auth(&self.config.token)
            .header(reqwest::header::ACCEPT, "application/vnd.github+json")
            .header(reqwest::header::USER_AGENT, &self.config.user_agent)
            .header("X-GitHub-Api-Version", API_VERSION)
    }

    async fn api_error(response: reqwest::Response) -> GitHubError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<GitHubErrorResponse>(&body)
            .ok()
            .map(|e| e.message)
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| {
                if body.trim().is_empty() {
                    status.canonical_reason().unwrap_or("request failed").to_owned()
                } else {
                    body
                }
            });
        GitHubError::Api {
            status: status.as_u16(),
            message,
        }
    }

    /// GET the contents entry for `path`. Large files (over 1 MB) come back
    /// with `encoding: "none"` and no content, but still carry their `sha`.
    async fn contents(&self, path: &str) -> Result<Option<FileContents>, GitHubError> {
        let url = self.contents_url(path);
        let response = self
            .authorize(self.client.get(&url))
            .query(&[("ref", self.config.branch.as_str())])
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            debug!("file does not exist yet");
            return Ok(None);
        }
        if !status.is_success() {
            return Err(Self::api_error(response).await);
        }

        let file: FileContents = response
            .json()
            .await
            .map_err(|e| GitHubError::InvalidResponse(format!("{path}: {e}")))?;

        if file.kind.as_deref().is_some_and(|kind| kind != "file") {
            return Err(GitHubError::InvalidResponse(format!(
                "{path} is not a file"
            )));
        }
        Ok(Some(file))
    }

    async fn fetch(&self, path: &str) -> Result<Option<StoredFile>, GitHubError> {
        let Some(file) = self.contents(path).await? else {
            return Ok(None);
        };

        if file.encoding.as_deref().is_some_and(|enc| enc != "base64") {
            return Err(GitHubError::InvalidResponse(format!(
                "{path}: unsupported encoding {:?} (file too large for the contents API?)",
                file.encoding.as_deref().unwrap_or_default()
            )));
        }

        // GitHub wraps the payload at 60 columns.
        let compact: String = file
            .content
            .chars()
            .filter(|c| !c.is_ascii_whitespace())
            .collect();
        let content = B64
            .decode(compact.as_bytes())
            .map_err(|e| GitHubError::InvalidResponse(format!("{path}: {e}")))?;

        Ok(Some(StoredFile {
            path: path.to_owned(),
            content,
            revision: Revision::new(file.sha),
        }))
    }

    async fn put(
        &self,
        path: &str,
        content: &[u8],
        base: Option<&Revision>,
        message: &str,
    ) -> Result<Revision, GitHubError> {
        let url = self.contents_url(path);
        let body = PutContentsRequest {
            message,
            content: B64.encode(content),
            branch: &self.config.branch,
            sha: base.map(Revision::as_str),
        };

        let response = self.authorize(self.client.put(&url)).json(&body).send().await?;

        let status = response.status();
        if !status.is_success() {
            let err = Self::api_error(response).await;
            return Err(classify_write_error(path, err));
        }

        let committed: PutContentsResponse = response
            .json()
            .await
            .map_err(|e| GitHubError::InvalidResponse(format!("{path}: {e}")))?;
        Ok(Revision::new(committed.content.sha))
    }
}

/// GitHub reports a stale or missing `sha` as 409, or as 422 with a message
/// that names the sha.
fn classify_write_error(path: &str, err: GitHubError) -> GitHubError {
    match err {
        GitHubError::Api { status: 409, .. } => GitHubError::Conflict {
            path: path.to_owned(),
        },
        GitHubError::Api {
            status: 422,
            ref message,
        } if message.to_ascii_lowercase().contains("sha") => GitHubError::Conflict {
            path: path.to_owned(),
        },
        other => other,
    }
}

#[async_trait]
impl ContentStore for GitHubContentStore {
    #[instrument(skip(self), fields(provider = "github", repo = %self.config.repository()))]
    async fn read(&self, path: &str) -> Result<Option<StoredFile>, StoreError> {
        debug!(branch = %self.config.branch, "reading file from GitHub");
        Ok(self.fetch(path).await?)
    }

    /// Only the `sha` is needed here, so files too large to inline still
    /// resolve.
    #[instrument(skip(self), fields(provider = "github", repo = %self.config.repository()))]
    async fn revision(&self, path: &str) -> Result<Option<Revision>, StoreError> {
        let file = self.contents(path).await?;
        Ok(file.map(|f| Revision::new(f.sha)))
    }

    #[instrument(
        skip(self, content, base),
        fields(provider = "github", repo = %self.config.repository(), bytes = content.len())
    )]
    async fn write(
        &self,
        path: &str,
        content: &[u8],
        base: Option<&Revision>,
        message: &str,
    ) -> Result<Revision, StoreError> {
        debug!(update = base.is_some(), "committing file to GitHub");

        match self.put(path, content, base, message).await {
            Ok(revision) => {
                info!(sha = %revision, "file committed");
                Ok(revision)
            }
            Err(err @ GitHubError::Conflict { .. }) => {
                warn!("commit rejected: file changed since it was read");
                Err(err.into())
            }
            Err(err) => {
                warn!(error = %err, "commit failed");
                Err(err.into())
            }
        }
    }
}
