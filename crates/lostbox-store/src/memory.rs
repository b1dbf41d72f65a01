use std::collections::HashMap;
use std::sync::RwLock;

use lostbox_types::{BlobKey, Item, ItemId, List, ListId};

use crate::error::{StoreError, StoreResult};
use crate::object::StoredBlob;
use crate::traits::{ObjectStore, RecordStore};

/// In-memory, HashMap-based record store.
///
/// Intended for tests, local development, and embedding. Both tables sit
/// behind a single `RwLock`, which makes the cascade delete atomic with
/// respect to every other operation. Rows are cloned on read/write.
pub struct InMemoryRecordStore {
    inner: RwLock<Tables>,
}

#[derive(Default)]
struct Tables {
    lists: HashMap<ListId, List>,
    items: HashMap<ItemId, Item>,
}

impl InMemoryRecordStore {
    /// Create a new empty record store.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Tables::default()),
        }
    }

    /// Number of list rows.
    pub fn list_count(&self) -> usize {
        self.inner.read().expect("lock poisoned").lists.len()
    }

    /// Number of item rows across all lists and soft-delete states.
    pub fn item_count(&self) -> usize {
        self.inner.read().expect("lock poisoned").items.len()
    }
}

impl Default for InMemoryRecordStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Newest-first ordering for rows sharing a creation-time key, with the
/// id as a deterministic tiebreaker.
fn newest_first<T, K: Ord>(rows: &mut [T], key: impl Fn(&T) -> K) {
    rows.sort_by(|a, b| key(b).cmp(&key(a)));
}

impl RecordStore for InMemoryRecordStore {
    fn insert_list(&self, list: &List) -> StoreResult<()> {
        let mut tables = self.inner.write().expect("lock poisoned");
        if tables.lists.contains_key(&list.id) {
            return Err(StoreError::DuplicateId(list.id.to_string()));
        }
        tables.lists.insert(list.id, list.clone());
        Ok(())
    }

    fn get_list(&self, id: ListId) -> StoreResult<Option<List>> {
        let tables = self.inner.read().expect("lock poisoned");
        Ok(tables.lists.get(&id).cloned())
    }

    fn update_list(&self, list: &List) -> StoreResult<bool> {
        let mut tables = self.inner.write().expect("lock poisoned");
        match tables.lists.get_mut(&list.id) {
            Some(row) => {
                *row = list.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn all_lists(&self) -> StoreResult<Vec<List>> {
        let tables = self.inner.read().expect("lock poisoned");
        let mut lists: Vec<List> = tables.lists.values().cloned().collect();
        newest_first(&mut lists, |l| (l.created_at, l.id));
        Ok(lists)
    }

    fn insert_item(&self, item: &Item) -> StoreResult<()> {
        let mut tables = self.inner.write().expect("lock poisoned");
        if tables.items.contains_key(&item.id) {
            return Err(StoreError::DuplicateId(item.id.to_string()));
        }
        tables.items.insert(item.id, item.clone());
        Ok(())
    }

    fn get_item(&self, list_id: ListId, item_id: ItemId) -> StoreResult<Option<Item>> {
        let tables = self.inner.read().expect("lock poisoned");
        Ok(tables
            .items
            .get(&item_id)
            .filter(|item| item.list_id == list_id)
            .cloned())
    }

    fn items_for_list(&self, list_id: ListId) -> StoreResult<Vec<Item>> {
        let tables = self.inner.read().expect("lock poisoned");
        let mut items: Vec<Item> = tables
            .items
            .values()
            .filter(|item| item.list_id == list_id)
            .cloned()
            .collect();
        newest_first(&mut items, |i| (i.created_at, i.id));
        Ok(items)
    }

    fn update_item(&self, item: &Item) -> StoreResult<bool> {
        let mut tables = self.inner.write().expect("lock poisoned");
        match tables.items.get_mut(&item.id) {
            Some(row) => {
                *row = item.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn delete_list_with_items(&self, list_id: ListId) -> StoreResult<bool> {
        // One write lock covers both tables, so no other operation can
        // observe the items gone but the list still present.
        let mut tables = self.inner.write().expect("lock poisoned");
        if tables.lists.remove(&list_id).is_none() {
            return Ok(false);
        }
        tables.items.retain(|_, item| item.list_id != list_id);
        Ok(true)
    }
}

impl std::fmt::Debug for InMemoryRecordStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryRecordStore")
            .field("lists", &self.list_count())
            .field("items", &self.item_count())
            .finish()
    }
}

/// In-memory, HashMap-based object store.
///
/// Blobs are held behind a `RwLock` and cloned on read; `bytes::Bytes`
/// makes the clone a cheap reference-count bump.
pub struct InMemoryObjectStore {
    blobs: RwLock<HashMap<BlobKey, StoredBlob>>,
}

impl InMemoryObjectStore {
    /// Create a new empty object store.
    pub fn new() -> Self {
        Self {
            blobs: RwLock::new(HashMap::new()),
        }
    }

    /// Number of blobs currently stored.
    pub fn len(&self) -> usize {
        self.blobs.read().expect("lock poisoned").len()
    }

    /// Returns `true` if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.blobs.read().expect("lock poisoned").is_empty()
    }

    /// Total payload bytes across all stored blobs.
    pub fn total_bytes(&self) -> u64 {
        self.blobs
            .read()
            .expect("lock poisoned")
            .values()
            .map(|blob| blob.len() as u64)
            .sum()
    }

    /// All keys under a list's namespace prefix, unordered.
    pub fn keys_for_list(&self, list_id: ListId) -> Vec<BlobKey> {
        self.blobs
            .read()
            .expect("lock poisoned")
            .keys()
            .filter(|key| key.list_id() == list_id)
            .cloned()
            .collect()
    }
}

impl Default for InMemoryObjectStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ObjectStore for InMemoryObjectStore {
    fn put(&self, key: &BlobKey, blob: StoredBlob) -> StoreResult<()> {
        let mut map = self.blobs.write().expect("lock poisoned");
        map.insert(key.clone(), blob);
        Ok(())
    }

    fn get(&self, key: &BlobKey) -> StoreResult<Option<StoredBlob>> {
        let map = self.blobs.read().expect("lock poisoned");
        Ok(map.get(key).cloned())
    }

    fn delete(&self, key: &BlobKey) -> StoreResult<bool> {
        let mut map = self.blobs.write().expect("lock poisoned");
        Ok(map.remove(key).is_some())
    }

    fn exists(&self, key: &BlobKey) -> StoreResult<bool> {
        let map = self.blobs.read().expect("lock poisoned");
        Ok(map.contains_key(key))
    }
}

impl std::fmt::Debug for InMemoryObjectStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryObjectStore")
            .field("blob_count", &self.len())
            .finish()
    }
}
