use sitedesk_store::{ContentStore, Revision, StoreError};
use tracing::debug;

/// Create or replace `path`, basing the write on its current revision.
///
/// The commit message is `Add <what>` for a new file and `Update <what>` for
/// an existing one.
pub(crate) async fn upsert(
    store: &dyn ContentStore,
    path: &str,
    content: &[u8],
    what: &str,
) -> Result<Revision, StoreError> {
    let base = store.revision(path).await?;
    let verb = if base.is_some() { "Update" } else { "Add" };
    debug!(path, exists = base.is_some(), "writing file");
    store
        .write(path, content, base.as_ref(), &format!("{verb} {what}"))
        .await
}
