//! Content store abstraction for sitedesk.
//!
//! A content store is a versioned file tree: every file carries an opaque
//! [`Revision`] and writes to an existing file must name the revision they
//! were based on. Backends reject stale writes with [`StoreError::Conflict`].

pub mod error;
pub mod store;
pub mod testing;

pub use error::StoreError;
pub use store::{ContentStore, Revision, StoredFile};
