//! The two persisted record kinds: [`List`] and [`Item`].
//!
//! Records serialize with camelCase field names, matching the JSON shape
//! the HTTP layer exposes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::blob::BlobKey;
use crate::id::{ItemId, ListId};

/// A named collection of found items, identified by an opaque id that
/// doubles as the sharing key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct List {
    /// Immutable identifier, generated at creation.
    pub id: ListId,
    /// Optional display label.
    pub name: Option<String>,
    /// Set once at creation.
    pub created_at: DateTime<Utc>,
}

impl List {
    /// Create a fresh list record stamped with the current time.
    pub fn new(name: Option<String>) -> Self {
        Self {
            id: ListId::generate(),
            name,
            created_at: Utc::now(),
        }
    }
}

/// A single reported object, owned by exactly one [`List`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Immutable identifier, generated at creation.
    pub id: ItemId,
    /// The owning list. Immutable after creation.
    pub list_id: ListId,
    /// Free-text description, bounded length. Mutable.
    pub comment: Option<String>,
    /// Key of the photo blob in the object store, if one was uploaded.
    /// Set at creation and never reassigned to a different blob.
    pub image_key: Option<BlobKey>,
    /// Set once at creation.
    pub created_at: DateTime<Utc>,
    /// `None` means live; `Some` means soft-deleted at that instant.
    /// Mutated only by the soft-delete and restore operations.
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Item {
    /// Create a fresh live item record stamped with the current time.
    pub fn new(list_id: ListId, comment: Option<String>, image_key: Option<BlobKey>) -> Self {
        Self {
            id: ItemId::generate(),
            list_id,
            comment,
            image_key,
            created_at: Utc::now(),
            deleted_at: None,
        }
    }

    /// Returns `true` if the item has not been soft-deleted.
    pub fn is_live(&self) -> bool {
        self.deleted_at.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_list_has_no_items_and_a_timestamp() {
        let list = List::new(Some("Lost & Found".into()));
        assert_eq!(list.name.as_deref(), Some("Lost & Found"));
        assert!(list.created_at <= Utc::now());
    }

    #[test]
    fn new_item_is_live() {
        let list = List::new(None);
        let item = Item::new(list.id, Some("blue umbrella".into()), None);
        assert!(item.is_live());
        assert_eq!(item.list_id, list.id);
        assert!(item.image_key.is_none());
    }

    #[test]
    fn records_serialize_camel_case() {
        let list = List::new(None);
        let json = serde_json::to_value(&list).unwrap();
        assert!(json.get("createdAt").is_some());

        let item = Item::new(list.id, None, None);
        let json = serde_json::to_value(&item).unwrap();
        assert!(json.get("listId").is_some());
        assert!(json.get("deletedAt").is_some());
    }
}
