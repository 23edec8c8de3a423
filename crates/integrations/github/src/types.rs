use serde::{Deserialize, Serialize};

/// Response of `GET /repos/{owner}/{repo}/contents/{path}` for a file.
#[derive(Debug, Clone, Deserialize)]
pub struct FileContents {
    pub sha: String,
    /// Base64 with embedded line breaks. Empty for files over 1 MB.
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub encoding: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

/// Body of `PUT /repos/{owner}/{repo}/contents/{path}`.
#[derive(Debug, Clone, Serialize)]
pub struct PutContentsRequest<'a> {
    pub message: &'a str,
    pub content: String,
    pub branch: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha: Option<&'a str>,
}

/// Response of a successful contents `PUT`.
#[derive(Debug, Clone, Deserialize)]
pub struct PutContentsResponse {
    pub content: CommittedFile,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommittedFile {
    pub sha: String,
    #[serde(default)]
    pub path: Option<String>,
}

/// Error body returned by the GitHub API.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GitHubErrorResponse {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub documentation_url: Option<String>,
}
