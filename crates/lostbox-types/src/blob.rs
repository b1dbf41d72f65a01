use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::TypeError;
use crate::id::ListId;

/// Validated key addressing an image blob in the object store.
///
/// Keys have the form `{listId}/{suffix}-{filename}` where `suffix` is a
/// fresh UUID and `filename` has already been sanitized to the allowed
/// character set. Namespacing by list id is what makes cascading cleanup
/// possible: every blob belonging to a list sits under one prefix.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlobKey(String);

/// Characters permitted in the filename segment of a blob key.
fn allowed_in_name(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-')
}

impl BlobKey {
    /// Compose a fresh key for an upload into `list_id`.
    ///
    /// `sanitized_filename` must already conform to the allowed character
    /// set (see `lostbox-core`'s `sanitize_filename`).
    pub fn compose(list_id: ListId, sanitized_filename: &str) -> Self {
        let suffix = Uuid::now_v7();
        Self(format!("{list_id}/{suffix}-{sanitized_filename}"))
    }

    /// Reassemble a key from its two path segments, validating the result.
    ///
    /// Used by the image-serving route, where the list id and the rest of
    /// the key arrive as separate path parameters.
    pub fn from_segments(list_id: &str, name: &str) -> Result<Self, TypeError> {
        Self::from_str(&format!("{list_id}/{name}"))
    }

    /// The list this blob belongs to.
    pub fn list_id(&self) -> ListId {
        // The first segment is validated as a list id at construction.
        self.0
            .split('/')
            .next()
            .and_then(|s| s.parse().ok())
            .expect("blob key validated at construction")
    }

    /// The full key string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BlobKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for BlobKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BlobKey({})", self.0)
    }
}

impl FromStr for BlobKey {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| TypeError::InvalidBlobKey {
            reason: reason.to_string(),
        };

        let (list_part, name_part) = s
            .split_once('/')
            .ok_or_else(|| invalid("missing '/' separator"))?;
        if list_part.parse::<ListId>().is_err() {
            return Err(invalid("first segment is not a list id"));
        }
        if name_part.is_empty() {
            return Err(invalid("empty name segment"));
        }
        if name_part.contains('/') {
            return Err(invalid("name segment must not contain '/'"));
        }
        if name_part.contains("..") {
            return Err(invalid("name segment must not contain '..'"));
        }
        if let Some(bad) = name_part.chars().find(|c| !allowed_in_name(*c)) {
            return Err(TypeError::InvalidBlobKey {
                reason: format!("forbidden character {bad:?} in name segment"),
            });
        }
        Ok(Self(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compose_produces_parseable_key() {
        let list = ListId::generate();
        let key = BlobKey::compose(list, "photo.png");
        let reparsed: BlobKey = key.as_str().parse().unwrap();
        assert_eq!(reparsed, key);
        assert_eq!(key.list_id(), list);
        assert!(key.as_str().ends_with("-photo.png"));
    }

    #[test]
    fn compose_keys_are_unique_per_upload() {
        let list = ListId::generate();
        let a = BlobKey::compose(list, "same.jpg");
        let b = BlobKey::compose(list, "same.jpg");
        assert_ne!(a, b);
    }

    #[test]
    fn from_segments_round_trip() {
        let list = ListId::generate();
        let key = BlobKey::from_segments(&list.to_string(), "abc-item.jpg").unwrap();
        assert_eq!(key.list_id(), list);
    }

    #[test]
    fn reject_missing_separator() {
        assert!("no-slash-here".parse::<BlobKey>().is_err());
    }

    #[test]
    fn reject_non_uuid_list_segment() {
        assert!("not-a-list/photo.png".parse::<BlobKey>().is_err());
    }

    #[test]
    fn reject_traversal_and_forbidden_chars() {
        let list = ListId::generate();
        assert!(format!("{list}/..secret").parse::<BlobKey>().is_err());
        assert!(format!("{list}/a/b.png").parse::<BlobKey>().is_err());
        assert!(format!("{list}/sp ace.png").parse::<BlobKey>().is_err());
        assert!(format!("{list}/").parse::<BlobKey>().is_err());
    }
}
