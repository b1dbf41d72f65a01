//! Pure input validation helpers. No I/O.
//!
//! Each check returns a distinct [`ValidationError`] variant so the HTTP
//! layer can map the violated rule to its stable reason string.

use thiserror::Error;

/// Maximum comment length, in characters.
pub const MAX_COMMENT_CHARS: usize = 1000;

/// Maximum accepted image payload, in bytes (5 MiB).
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// A caller-input constraint violation.
///
/// Display strings are part of the external contract: the HTTP layer
/// returns them verbatim as the error reason.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Comment too long (max 1000 characters)")]
    CommentTooLong { chars: usize },

    #[error("Invalid file type")]
    NotAnImage { content_type: String },

    #[error("File too large (max 5MB)")]
    FileTooLarge { bytes: usize },

    #[error("Name must not be empty")]
    EmptyName,
}

/// Comments are bounded at [`MAX_COMMENT_CHARS`] characters. Longer
/// input is rejected, never truncated.
pub fn validate_comment(comment: &str) -> Result<(), ValidationError> {
    let chars = comment.chars().count();
    if chars > MAX_COMMENT_CHARS {
        return Err(ValidationError::CommentTooLong { chars });
    }
    Ok(())
}

/// Uploads must declare an image MIME type.
pub fn validate_image_type(content_type: &str) -> Result<(), ValidationError> {
    if !content_type.starts_with("image/") {
        return Err(ValidationError::NotAnImage {
            content_type: content_type.to_string(),
        });
    }
    Ok(())
}

/// Uploads are bounded at [`MAX_IMAGE_BYTES`].
pub fn validate_image_size(bytes: usize) -> Result<(), ValidationError> {
    if bytes > MAX_IMAGE_BYTES {
        return Err(ValidationError::FileTooLarge { bytes });
    }
    Ok(())
}

/// List display names must be non-empty after trimming.
pub fn validate_list_name(name: &str) -> Result<&str, ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    Ok(trimmed)
}

/// Reduce an uploaded filename to the blob-key character set.
///
/// Keeps `[A-Za-z0-9._-]`, drops everything else, and collapses runs of
/// dots so the result can never contain `..`. An input with nothing left
/// falls back to `"upload"`.
pub fn sanitize_filename(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        let keep = c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-');
        if !keep {
            continue;
        }
        if c == '.' && out.ends_with('.') {
            continue;
        }
        out.push(c);
    }
    if out.is_empty() || out.chars().all(|c| c == '.') {
        return "upload".to_string();
    }
    out
}
