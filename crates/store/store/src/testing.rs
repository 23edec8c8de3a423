use crate::error::StoreError;
use crate::store::ContentStore;

/// Run the content store conformance test suite.
///
/// Call this from your backend's test module with a fresh, empty store.
///
/// # Errors
///
/// Returns an error if the backend fails an operation the suite expects to
/// succeed.
pub async fn run_store_conformance_tests(store: &dyn ContentStore) -> Result<(), StoreError> {
    test_read_missing(store).await?;
    test_create_and_read(store).await?;
    test_create_existing_conflicts(store).await?;
    test_update_with_current_revision(store).await?;
    test_update_with_stale_revision(store).await?;
    test_update_missing_with_revision(store).await?;
    test_revision_lookup(store).await?;
    Ok(())
}

async fn test_read_missing(store: &dyn ContentStore) -> Result<(), StoreError> {
    let file = store.read("conformance/missing.md").await?;
    assert!(file.is_none(), "read on missing path should return None");
    Ok(())
}

async fn test_create_and_read(store: &dyn ContentStore) -> Result<(), StoreError> {
    let path = "conformance/create.md";
    let revision = store.write(path, b"hello", None, "create").await?;
    let file = store
        .read(path)
        .await?
        .expect("file should exist after create");
    assert_eq!(file.path, path);
    assert_eq!(file.content, b"hello");
    assert_eq!(file.revision, revision);
    Ok(())
}

async fn test_create_existing_conflicts(store: &dyn ContentStore) -> Result<(), StoreError> {
    let path = "conformance/create-twice.md";
    store.write(path, b"v1", None, "create").await?;
    let err = store
        .write(path, b"v2", None, "create again")
        .await
        .expect_err("creating an existing file should conflict");
    assert!(err.is_conflict(), "expected conflict, got {err}");
    let file = store.read(path).await?.expect("file should still exist");
    assert_eq!(file.content, b"v1", "original content should remain");
    Ok(())
}

async fn test_update_with_current_revision(store: &dyn ContentStore) -> Result<(), StoreError> {
    let path = "conformance/update.yml";
    let first = store.write(path, b"- a\n", None, "create").await?;
    let second = store.write(path, b"- a\n- b\n", Some(&first), "append").await?;
    assert_ne!(first, second, "update should produce a new revision");
    let file = store.read(path).await?.expect("file should exist");
    assert_eq!(file.content, b"- a\n- b\n");
    assert_eq!(file.revision, second);
    Ok(())
}

async fn test_update_with_stale_revision(store: &dyn ContentStore) -> Result<(), StoreError> {
    let path = "conformance/stale.yml";
    let first = store.write(path, b"one", None, "create").await?;
    store.write(path, b"two", Some(&first), "update").await?;
    let err = store
        .write(path, b"three", Some(&first), "stale update")
        .await
        .expect_err("stale revision should conflict");
    assert!(err.is_conflict(), "expected conflict, got {err}");
    let file = store.read(path).await?.expect("file should exist");
    assert_eq!(file.content, b"two", "winning write should remain");
    Ok(())
}

async fn test_update_missing_with_revision(store: &dyn ContentStore) -> Result<(), StoreError> {
    let path = "conformance/never-created.yml";
    let first = store.write("conformance/other.yml", b"x", None, "create").await?;
    let err = store
        .write(path, b"data", Some(&first), "update missing")
        .await
        .expect_err("updating a missing file should conflict");
    assert!(err.is_conflict(), "expected conflict, got {err}");
    Ok(())
}

async fn test_revision_lookup(store: &dyn ContentStore) -> Result<(), StoreError> {
    let path = "conformance/revision.md";
    assert!(store.revision(path).await?.is_none());
    let revision = store.write(path, b"r", None, "create").await?;
    assert_eq!(store.revision(path).await?, Some(revision));
    Ok(())
}
