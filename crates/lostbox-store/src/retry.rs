//! Bounded retry for transient record-store failures.
//!
//! Development environments sometimes sit behind flaky local drivers
//! whose connections drop mid-request. [`RetryRecordStore`] wraps any
//! [`RecordStore`] and retries an operation a bounded number of times,
//! with an increasing delay, when the backend reports
//! [`StoreError::Transient`]. Every other error propagates immediately.
//!
//! Production deployments should use the inner store directly; the
//! decorator is swappable because both expose the same trait.

use std::time::Duration;

use lostbox_types::{Item, ItemId, List, ListId};

use crate::error::{StoreError, StoreResult};
use crate::traits::RecordStore;

/// Retry schedule: `attempts` total tries, sleeping `base_delay * n`
/// before the n-th retry.
#[derive(Clone, Copy, Debug)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 3,
            base_delay: Duration::from_millis(100),
        }
    }
}

/// Decorator adding transient-failure retry to any [`RecordStore`].
pub struct RetryRecordStore<S> {
    inner: S,
    policy: RetryPolicy,
}

impl<S: RecordStore> RetryRecordStore<S> {
    /// Wrap `inner` with the default policy (3 attempts, 100ms step).
    pub fn new(inner: S) -> Self {
        Self::with_policy(inner, RetryPolicy::default())
    }

    pub fn with_policy(inner: S, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }

    /// The wrapped store.
    pub fn inner(&self) -> &S {
        &self.inner
    }

    fn run<T>(&self, op: &str, f: impl Fn(&S) -> StoreResult<T>) -> StoreResult<T> {
        let mut last = None;
        for attempt in 1..=self.policy.attempts.max(1) {
            match f(&self.inner) {
                Err(err) if err.is_transient() && attempt < self.policy.attempts => {
                    tracing::warn!(op, attempt, error = %err, "transient store failure, retrying");
                    std::thread::sleep(self.policy.base_delay * attempt);
                    last = Some(err);
                }
                other => return other,
            }
        }
        // Reachable only when attempts == 0 was clamped; keep the last error.
        Err(last.unwrap_or_else(|| StoreError::Backend("retry exhausted".into())))
    }
}

impl<S: RecordStore> RecordStore for RetryRecordStore<S> {
    fn insert_list(&self, list: &List) -> StoreResult<()> {
        self.run("insert_list", |s| s.insert_list(list))
    }

    fn get_list(&self, id: ListId) -> StoreResult<Option<List>> {
        self.run("get_list", |s| s.get_list(id))
    }

    fn update_list(&self, list: &List) -> StoreResult<bool> {
        self.run("update_list", |s| s.update_list(list))
    }

    fn all_lists(&self) -> StoreResult<Vec<List>> {
        self.run("all_lists", |s| s.all_lists())
    }

    fn insert_item(&self, item: &Item) -> StoreResult<()> {
        self.run("insert_item", |s| s.insert_item(item))
    }

    fn get_item(&self, list_id: ListId, item_id: ItemId) -> StoreResult<Option<Item>> {
        self.run("get_item", |s| s.get_item(list_id, item_id))
    }

    fn items_for_list(&self, list_id: ListId) -> StoreResult<Vec<Item>> {
        self.run("items_for_list", |s| s.items_for_list(list_id))
    }

    fn update_item(&self, item: &Item) -> StoreResult<bool> {
        self.run("update_item", |s| s.update_item(item))
    }

    fn delete_list_with_items(&self, list_id: ListId) -> StoreResult<bool> {
        self.run("delete_list_with_items", |s| {
            s.delete_list_with_items(list_id)
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use super::*;
    use crate::memory::InMemoryRecordStore;

    /// Test double that fails the first `failures` calls with a transient
    /// error before delegating to an in-memory store.
    struct Flaky {
        inner: InMemoryRecordStore,
        failures: AtomicU32,
        calls: AtomicU32,
    }

    impl Flaky {
        fn new(failures: u32) -> Self {
            Self {
                inner: InMemoryRecordStore::new(),
                failures: AtomicU32::new(failures),
                calls: AtomicU32::new(0),
            }
        }

        fn trip(&self) -> StoreResult<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let remaining = self.failures.load(Ordering::SeqCst);
            if remaining > 0 {
                self.failures.store(remaining - 1, Ordering::SeqCst);
                return Err(StoreError::Transient("fetch failed".into()));
            }
            Ok(())
        }
    }

    impl RecordStore for Flaky {
        fn insert_list(&self, list: &List) -> StoreResult<()> {
            self.trip()?;
            self.inner.insert_list(list)
        }
        fn get_list(&self, id: ListId) -> StoreResult<Option<List>> {
            self.trip()?;
            self.inner.get_list(id)
        }
        fn update_list(&self, list: &List) -> StoreResult<bool> {
            self.trip()?;
            self.inner.update_list(list)
        }
        fn all_lists(&self) -> StoreResult<Vec<List>> {
            self.trip()?;
            self.inner.all_lists()
        }
        fn insert_item(&self, item: &Item) -> StoreResult<()> {
            self.trip()?;
            self.inner.insert_item(item)
        }
        fn get_item(&self, list_id: ListId, item_id: ItemId) -> StoreResult<Option<Item>> {
            self.trip()?;
            self.inner.get_item(list_id, item_id)
        }
        fn items_for_list(&self, list_id: ListId) -> StoreResult<Vec<Item>> {
            self.trip()?;
            self.inner.items_for_list(list_id)
        }
        fn update_item(&self, item: &Item) -> StoreResult<bool> {
            self.trip()?;
            self.inner.update_item(item)
        }
        fn delete_list_with_items(&self, list_id: ListId) -> StoreResult<bool> {
            self.trip()?;
            self.inner.delete_list_with_items(list_id)
        }
    }

    fn fast_policy(attempts: u32) -> RetryPolicy {
        RetryPolicy {
            attempts,
            base_delay: Duration::from_millis(1),
        }
    }

    #[test]
    fn retries_through_transient_failures() {
        let store = RetryRecordStore::with_policy(Flaky::new(2), fast_policy(3));
        let list = List::new(Some("flaky".into()));
        store.insert_list(&list).unwrap();
        assert_eq!(store.inner().calls.load(Ordering::SeqCst), 3);
        // The row landed despite the first two failures.
        assert_eq!(store.inner().inner.list_count(), 1);
    }

    #[test]
    fn gives_up_after_budget() {
        let store = RetryRecordStore::with_policy(Flaky::new(5), fast_policy(3));
        let err = store.all_lists().unwrap_err();
        assert!(err.is_transient());
        assert_eq!(store.inner().calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn non_transient_errors_fail_fast() {
        let store = RetryRecordStore::with_policy(Flaky::new(0), fast_policy(3));
        let list = List::new(None);
        store.insert_list(&list).unwrap();
        let err = store.insert_list(&list).unwrap_err();
        assert!(matches!(err, StoreError::DuplicateId(_)));
        // One call for the first insert, one for the duplicate.
        assert_eq!(store.inner().calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn noop_for_healthy_store() {
        let store = RetryRecordStore::new(InMemoryRecordStore::new());
        let list = List::new(Some("healthy".into()));
        store.insert_list(&list).unwrap();
        assert_eq!(store.get_list(list.id).unwrap(), Some(list));
    }
}
