//! The [`LifecycleService`]: every list/item operation, orchestrating
//! the record store and the object store.
//!
//! Ordering rules the service upholds:
//!
//! - **Registration**: validation first (reject-early, no partial
//!   write), then blob write, then row insert. A crash between the last
//!   two steps can leave an orphaned blob but never an item referencing
//!   a missing blob.
//! - **List deletion**: best-effort blob cleanup first (individual
//!   failures are logged and swallowed), then the atomic Items+List row
//!   delete. A crash between the two steps can leave the rows intact
//!   with some blobs already gone, in which case re-running the delete
//!   finishes the job.

use std::sync::Arc;

use bytes::Bytes;
use chrono::Utc;
use lostbox_store::{ObjectStore, RecordStore, StoredBlob};
use lostbox_types::{BlobKey, Item, ItemId, List, ListId};

use crate::error::{LifecycleError, LifecycleResult};
use crate::validate::{
    sanitize_filename, validate_comment, validate_image_size, validate_image_type,
    validate_list_name,
};

/// An image payload accepted from a visitor.
#[derive(Clone, Debug)]
pub struct ImageUpload {
    /// The original filename as uploaded. Sanitized before it becomes
    /// part of a blob key.
    pub filename: String,
    /// Declared MIME type; must start with `image/`.
    pub content_type: String,
    pub data: Bytes,
}

/// Input for registering a found item into a list.
#[derive(Clone, Debug, Default)]
pub struct NewItem {
    pub comment: Option<String>,
    pub image: Option<ImageUpload>,
}

/// Which soft-delete states a listing should include.
///
/// Owner views show everything (with deletion badges); public views show
/// live items only. The choice is the caller's policy, not the core's.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ItemFilter {
    All,
    LiveOnly,
}

/// Enforces the list/item lifecycle rules across the two stores.
///
/// The service holds no in-memory state of its own; each call issues one
/// logical operation at a time against the shared stores.
pub struct LifecycleService {
    records: Arc<dyn RecordStore>,
    objects: Arc<dyn ObjectStore>,
}

impl LifecycleService {
    pub fn new(records: Arc<dyn RecordStore>, objects: Arc<dyn ObjectStore>) -> Self {
        Self { records, objects }
    }

    // -- List lifecycle ----------------------------------------------------

    /// Create a new empty list with an optional display name.
    pub fn create_list(&self, name: Option<String>) -> LifecycleResult<List> {
        let list = List::new(name);
        self.records.insert_list(&list)?;
        tracing::info!(list = %list.id, "list created");
        Ok(list)
    }

    /// Fetch a list by id.
    pub fn get_list(&self, id: ListId) -> LifecycleResult<List> {
        self.records
            .get_list(id)?
            .ok_or(LifecycleError::ListNotFound)
    }

    /// Rename a list. The name must be non-empty after trimming.
    pub fn rename_list(&self, id: ListId, name: &str) -> LifecycleResult<List> {
        let trimmed = validate_list_name(name)?;
        let mut list = self.get_list(id)?;
        list.name = Some(trimmed.to_string());
        if !self.records.update_list(&list)? {
            return Err(LifecycleError::ListNotFound);
        }
        Ok(list)
    }

    /// All lists, newest-first.
    pub fn all_lists(&self) -> LifecycleResult<Vec<List>> {
        Ok(self.records.all_lists()?)
    }

    /// Hard-delete a list: every item row in every soft-delete state, and
    /// every blob those items reference.
    ///
    /// Blob cleanup runs first and is best-effort; a blob that fails to
    /// delete is logged and skipped rather than blocking the operation.
    /// The row removal is atomic (items then list, all-or-nothing).
    pub fn delete_list(&self, id: ListId) -> LifecycleResult<()> {
        self.get_list(id)?;

        let items = self.records.items_for_list(id)?;
        for item in &items {
            let Some(key) = &item.image_key else { continue };
            match self.objects.delete(key) {
                Ok(true) => {}
                Ok(false) => {
                    tracing::warn!(list = %id, key = %key, "blob already absent during cascade")
                }
                Err(err) => {
                    tracing::warn!(list = %id, key = %key, error = %err,
                        "blob deletion failed during cascade, continuing")
                }
            }
        }

        self.records.delete_list_with_items(id)?;
        tracing::info!(list = %id, items = items.len(), "list deleted");
        Ok(())
    }

    // -- Item lifecycle ----------------------------------------------------

    /// Register a found item into a list.
    ///
    /// Validates everything before touching either store. If an image is
    /// present, its blob is written before the item row is inserted.
    pub fn register_item(&self, list_id: ListId, input: NewItem) -> LifecycleResult<Item> {
        self.get_list(list_id)?;

        if let Some(comment) = &input.comment {
            validate_comment(comment)?;
        }
        if let Some(image) = &input.image {
            validate_image_type(&image.content_type)?;
            validate_image_size(image.data.len())?;
        }

        let image_key = match input.image {
            Some(image) => {
                let key = BlobKey::compose(list_id, &sanitize_filename(&image.filename));
                self.objects.put(
                    &key,
                    StoredBlob::new(image.data, Some(image.content_type)),
                )?;
                Some(key)
            }
            None => None,
        };

        let item = Item::new(list_id, input.comment, image_key);
        self.records.insert_item(&item)?;
        tracing::info!(list = %list_id, item = %item.id, "item registered");
        Ok(item)
    }

    /// Items in a list, newest-first, filtered per the caller's policy.
    pub fn list_items(&self, list_id: ListId, filter: ItemFilter) -> LifecycleResult<Vec<Item>> {
        self.get_list(list_id)?;
        let mut items = self.records.items_for_list(list_id)?;
        if filter == ItemFilter::LiveOnly {
            items.retain(Item::is_live);
        }
        Ok(items)
    }

    /// Update an item's comment. Never touches the image or the
    /// soft-delete state.
    pub fn update_comment(
        &self,
        list_id: ListId,
        item_id: ItemId,
        comment: &str,
    ) -> LifecycleResult<Item> {
        validate_comment(comment)?;
        let mut item = self.require_item(list_id, item_id)?;
        item.comment = Some(comment.to_string());
        self.records.update_item(&item)?;
        Ok(item)
    }

    /// Soft-delete an item. Re-deleting an already-deleted item succeeds
    /// and refreshes the timestamp; the blob is kept so restore needs no
    /// re-upload.
    pub fn soft_delete(&self, list_id: ListId, item_id: ItemId) -> LifecycleResult<Item> {
        let mut item = self.require_item(list_id, item_id)?;
        item.deleted_at = Some(Utc::now());
        self.records.update_item(&item)?;
        Ok(item)
    }

    /// Restore a soft-deleted item. Restoring a live item is a state
    /// conflict and performs no mutation.
    pub fn restore(&self, list_id: ListId, item_id: ItemId) -> LifecycleResult<Item> {
        let mut item = self.require_item(list_id, item_id)?;
        if item.deleted_at.is_none() {
            return Err(LifecycleError::NotDeleted);
        }
        item.deleted_at = None;
        self.records.update_item(&item)?;
        Ok(item)
    }

    /// Read an image blob for serving.
    pub fn fetch_image(&self, key: &BlobKey) -> LifecycleResult<StoredBlob> {
        self.objects
            .get(key)?
            .ok_or(LifecycleError::ImageNotFound)
    }

    fn require_item(&self, list_id: ListId, item_id: ItemId) -> LifecycleResult<Item> {
        self.records
            .get_item(list_id, item_id)?
            .ok_or(LifecycleError::ItemNotFound)
    }
}
