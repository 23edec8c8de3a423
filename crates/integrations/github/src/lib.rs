//! GitHub-backed content store for sitedesk.
//!
//! Implements [`ContentStore`](sitedesk_store::ContentStore) on top of the
//! [repository contents API](https://docs.github.com/en/rest/repos/contents).
//! Every write is a commit on the configured branch, and the blob SHA serves
//! as the revision.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use sitedesk_github::{GitHubConfig, GitHubContentStore};
//!
//! let config = GitHubConfig::from_repository("ghp_token", "acme/site")
//!     .expect("valid repository")
//!     .with_branch("gh-pages");
//! let store = GitHubContentStore::new(config);
//! ```

pub mod config;
pub mod error;
pub mod store;
pub mod types;

pub use config::GitHubConfig;
pub use error::GitHubError;
pub use store::GitHubContentStore;
