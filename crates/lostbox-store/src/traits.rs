//! The [`RecordStore`] and [`ObjectStore`] traits.
//!
//! Any backend (in-memory, SQLite, remote database, bucket service)
//! implements these to plug into the lifecycle service.

use lostbox_types::{BlobKey, Item, ItemId, List, ListId};

use crate::error::StoreResult;
use crate::object::StoredBlob;

/// Relational storage for [`List`] and [`Item`] rows.
///
/// Implementations must be thread-safe (`Send + Sync`). Single-row
/// operations need no cross-row atomicity; the one multi-row primitive,
/// [`delete_list_with_items`](RecordStore::delete_list_with_items), must
/// be all-or-nothing.
pub trait RecordStore: Send + Sync {
    /// Insert a new list row. Fails with `DuplicateId` if the id exists.
    fn insert_list(&self, list: &List) -> StoreResult<()>;

    /// Read a list row. Returns `Ok(None)` if it does not exist.
    fn get_list(&self, id: ListId) -> StoreResult<Option<List>>;

    /// Replace an existing list row. Returns `false` if no row had that id.
    fn update_list(&self, list: &List) -> StoreResult<bool>;

    /// All list rows, newest-first by creation time.
    fn all_lists(&self) -> StoreResult<Vec<List>>;

    /// Insert a new item row. Fails with `DuplicateId` if the id exists.
    fn insert_item(&self, item: &Item) -> StoreResult<()>;

    /// Read an item row scoped to its owning list.
    ///
    /// Returns `Ok(None)` if no item with that id exists under that list,
    /// including when the id exists but belongs to a different list.
    fn get_item(&self, list_id: ListId, item_id: ItemId) -> StoreResult<Option<Item>>;

    /// All item rows for a list, in every soft-delete state, newest-first
    /// by creation time.
    fn items_for_list(&self, list_id: ListId) -> StoreResult<Vec<Item>>;

    /// Replace an existing item row. Returns `false` if no row had that id.
    fn update_item(&self, item: &Item) -> StoreResult<bool>;

    /// Atomically delete every item row belonging to `list_id`, then the
    /// list row itself. All-or-nothing: if interrupted, no row is left in
    /// a partially-deleted state.
    ///
    /// Returns `false` (and deletes nothing) if the list does not exist.
    fn delete_list_with_items(&self, list_id: ListId) -> StoreResult<bool>;
}

/// Key-addressed binary storage for uploaded images.
///
/// A pure key-value store: it never interprets blob contents. Keys are
/// namespaced by list id (see [`BlobKey`]), which is the only structure
/// the system relies on.
pub trait ObjectStore: Send + Sync {
    /// Write a blob under `key`, replacing any existing blob there.
    fn put(&self, key: &BlobKey, blob: StoredBlob) -> StoreResult<()>;

    /// Read a blob. Returns `Ok(None)` if the key is absent.
    fn get(&self, key: &BlobKey) -> StoreResult<Option<StoredBlob>>;

    /// Delete a blob. Returns `true` if it existed.
    fn delete(&self, key: &BlobKey) -> StoreResult<bool>;

    /// Check whether a blob exists under `key`.
    fn exists(&self, key: &BlobKey) -> StoreResult<bool> {
        Ok(self.get(key)?.is_some())
    }
}
