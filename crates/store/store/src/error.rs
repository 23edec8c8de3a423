use thiserror::Error;

/// Errors returned by content store backends.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The write was based on a revision that is no longer current, or tried
    /// to create a file that already exists.
    #[error("revision conflict on {path}")]
    Conflict { path: String },

    /// The backend could not be reached.
    #[error("connection error: {0}")]
    Connection(String),

    /// The backend answered with an error status.
    #[error("store API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Stored or returned data could not be decoded.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// The backend is misconfigured.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Any other backend failure.
    #[error("backend error: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }
}
