//! In-memory content store.
//!
//! Used by the test suites and by local runs that should not touch a real
//! repository. Revisions are a process-wide counter rendered as `r<n>`.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use parking_lot::Mutex;

use sitedesk_store::{ContentStore, Revision, StoreError, StoredFile};

#[derive(Debug, Clone)]
struct Slot {
    content: Vec<u8>,
    revision: Revision,
}

/// A write that reached the store, in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteRecord {
    pub path: String,
    pub message: String,
}

/// In-memory [`ContentStore`] backed by a [`DashMap`].
#[derive(Debug, Default)]
pub struct MemoryContentStore {
    files: DashMap<String, Slot>,
    next_revision: AtomicU64,
    failing_prefixes: Mutex<Vec<String>>,
    writes: Mutex<Vec<WriteRecord>>,
}

impl MemoryContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a file without recording a write.
    pub fn insert(&self, path: impl Into<String>, content: impl Into<Vec<u8>>) -> Revision {
        let revision = self.fresh_revision();
        self.files.insert(
            path.into(),
            Slot {
                content: content.into(),
                revision: revision.clone(),
            },
        );
        revision
    }

    /// Make every write under `prefix` fail with a backend error.
    pub fn fail_writes_under(&self, prefix: impl Into<String>) {
        self.failing_prefixes.lock().push(prefix.into());
    }

    /// Current content of `path`, if present.
    pub fn contents(&self, path: &str) -> Option<Vec<u8>> {
        self.files.get(path).map(|slot| slot.content.clone())
    }

    /// Current content of `path` as UTF-8.
    pub fn text(&self, path: &str) -> Option<String> {
        self.contents(path)
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Sorted list of stored paths.
    pub fn paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = self.files.iter().map(|e| e.key().clone()).collect();
        paths.sort();
        paths
    }

    /// Every successful write so far.
    pub fn writes(&self) -> Vec<WriteRecord> {
        self.writes.lock().clone()
    }

    fn fresh_revision(&self) -> Revision {
        let n = self.next_revision.fetch_add(1, Ordering::SeqCst) + 1;
        Revision::new(format!("r{n}"))
    }

    fn is_failing(&self, path: &str) -> bool {
        self.failing_prefixes
            .lock()
            .iter()
            .any(|prefix| path.starts_with(prefix.as_str()))
    }
}

#[async_trait]
impl ContentStore for MemoryContentStore {
    async fn read(&self, path: &str) -> Result<Option<StoredFile>, StoreError> {
        Ok(self.files.get(path).map(|slot| StoredFile {
            path: path.to_owned(),
            content: slot.content.clone(),
            revision: slot.revision.clone(),
        }))
    }

    async fn write(
        &self,
        path: &str,
        content: &[u8],
        base: Option<&Revision>,
        message: &str,
    ) -> Result<Revision, StoreError> {
        if self.is_failing(path) {
            return Err(StoreError::Backend(format!("injected failure for {path}")));
        }

        let conflict = || StoreError::Conflict {
            path: path.to_owned(),
        };

        // The entry guard holds the shard lock, so check and swap are atomic.
        let revision = match (self.files.entry(path.to_owned()), base) {
            (Entry::Vacant(vacant), None) => {
                let revision = self.fresh_revision();
                vacant.insert(Slot {
                    content: content.to_vec(),
                    revision: revision.clone(),
                });
                revision
            }
            (Entry::Occupied(mut occupied), Some(base)) if occupied.get().revision == *base => {
                let revision = self.fresh_revision();
                occupied.insert(Slot {
                    content: content.to_vec(),
                    revision: revision.clone(),
                });
                revision
            }
            _ => return Err(conflict()),
        };

        self.writes.lock().push(WriteRecord {
            path: path.to_owned(),
            message: message.to_owned(),
        });
        Ok(revision)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[tokio::test]
    async fn conformance() {
        let store = MemoryContentStore::new();
        sitedesk_store::testing::run_store_conformance_tests(&store)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn injected_failures_only_hit_prefix() {
        let store = MemoryContentStore::new();
        store.fail_writes_under("assets/");

        let err = store
            .write("assets/images/blog/a.png", b"x", None, "image")
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Backend(_)));
        assert!(store.contents("assets/images/blog/a.png").is_none());

        store.write("posts/a", b"doc", None, "post").await.unwrap();
        assert_eq!(store.text("posts/a").as_deref(), Some("doc"));
        assert_eq!(
            store.writes(),
            vec![WriteRecord {
                path: "posts/a".into(),
                message: "post".into()
            }]
        );
    }

    #[tokio::test]
    async fn seeded_file_requires_its_revision() {
        let store = MemoryContentStore::new();
        let revision = store.insert("_data/t.yml", "- name: a\n");
        assert!(
            store
                .write("_data/t.yml", b"new", None, "blind")
                .await
                .unwrap_err()
                .is_conflict()
        );
        store
            .write("_data/t.yml", b"new", Some(&revision), "update")
            .await
            .unwrap();
        assert_eq!(store.paths(), vec!["_data/t.yml".to_owned()]);
    }

    #[tokio::test]
    async fn concurrent_updates_from_same_base_have_one_winner() {
        let store = Arc::new(MemoryContentStore::new());
        let base = store.insert("doc.yml", "");

        let mut handles = Vec::new();
        for i in 0..8 {
            let store = Arc::clone(&store);
            let base = base.clone();
            handles.push(tokio::spawn(async move {
                store
                    .write("doc.yml", format!("{i}").as_bytes(), Some(&base), "race")
                    .await
            }));
        }

        let mut winners = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => winners += 1,
                Err(e) => assert!(e.is_conflict()),
            }
        }
        assert_eq!(winners, 1);
    }
}
