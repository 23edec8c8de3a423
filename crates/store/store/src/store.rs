use async_trait::async_trait;

use crate::error::StoreError;

/// Opaque version token for a stored file.
///
/// For the GitHub backend this is the blob SHA.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Revision(String);

impl Revision {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Revision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A file read from the store together with its current revision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    pub path: String,
    pub content: Vec<u8>,
    pub revision: Revision,
}

impl StoredFile {
    /// Content as UTF-8, replacing invalid sequences.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.content).into_owned()
    }
}

/// Trait for reading and writing versioned files.
///
/// Implementations must be `Send + Sync` and safe for concurrent access.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Read a file. Returns `None` if it does not exist.
    async fn read(&self, path: &str) -> Result<Option<StoredFile>, StoreError>;

    /// Create or replace a file.
    ///
    /// `base` must be `None` to create a new file and the current revision to
    /// replace an existing one; anything else fails with
    /// [`StoreError::Conflict`]. Returns the new revision. `message` is a
    /// human-readable description of the change (a commit message for
    /// git-backed stores).
    async fn write(
        &self,
        path: &str,
        content: &[u8],
        base: Option<&Revision>,
        message: &str,
    ) -> Result<Revision, StoreError>;

    /// Current revision of a file, if it exists.
    async fn revision(&self, path: &str) -> Result<Option<Revision>, StoreError> {
        Ok(self.read(path).await?.map(|file| file.revision))
    }
}
