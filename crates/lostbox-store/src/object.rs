use bytes::Bytes;

/// An opaque binary payload plus the content type it was uploaded with.
///
/// The object store never inspects `data`; `content_type` is carried as
/// metadata so the image-serving route can echo it back.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoredBlob {
    pub data: Bytes,
    pub content_type: Option<String>,
}

impl StoredBlob {
    pub fn new(data: impl Into<Bytes>, content_type: Option<String>) -> Self {
        Self {
            data: data.into(),
            content_type,
        }
    }

    /// Payload size in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
