//! Stored-filename generation for uploaded attachments.
//!
//! Uploaded files are never written under their client-supplied name: the
//! on-disk name is a random prefix plus a sanitized single path component,
//! so repeated uploads of the same name cannot collide and a hostile name
//! cannot traverse out of the upload directory.

use rand::Rng;

/// Length of the random stored-name prefix.
pub const PREFIX_LENGTH: usize = 8;

/// Characters the random prefix is drawn from.
const PREFIX_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Fallback when sanitization leaves nothing of the original name.
const FALLBACK_NAME: &str = "file";

/// Generate the on-disk name for an uploaded file:
/// `{8 random A-Z0-9 chars}-{sanitized original name}`.
pub fn stored_filename(original: &str) -> String {
    format!(
        "{}-{}",
        random_prefix(PREFIX_LENGTH),
        sanitize_filename(original)
    )
}

fn random_prefix(len: usize) -> String {
    let mut rng = rand::rng();
    (0..len)
        .map(|_| PREFIX_CHARSET[rng.random_range(0..PREFIX_CHARSET.len())] as char)
        .collect()
}

/// Reduce a client-supplied filename to a safe single path component.
///
/// Anything before the last `/` or `\` is dropped, characters outside
/// `[A-Za-z0-9._-]` become `_`, and leading dots are stripped so the result
/// can never nest, traverse, or hide.
pub fn sanitize_filename(original: &str) -> String {
    let base = original.rsplit(['/', '\\']).next().unwrap_or(original);
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let trimmed = cleaned.trim_start_matches('.');
    if trimmed.is_empty() {
        FALLBACK_NAME.to_string()
    } else {
        trimmed.to_string()
    }
}
