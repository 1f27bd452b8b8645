//! Slug helpers for content entries.
//!
//! A content file's slug is its file stem, except for `index.md`-style
//! entries where the containing directory names the entry.

use std::path::Path;

/// Derive a slug from a content file path.
///
/// Returns `None` when no usable stem exists.
///
/// # Example
///
/// ```
/// use std::path::Path;
/// use sift_core::slug_from_path;
///
/// assert_eq!(slug_from_path(Path::new("blog/pt/Endomidface.md")).as_deref(), Some("endomidface"));
/// assert_eq!(slug_from_path(Path::new("blog/browlift/index.mdx")).as_deref(), Some("browlift"));
/// ```
pub fn slug_from_path(path: &Path) -> Option<String> {
    let stem = path.file_stem()?.to_str()?;
    let raw = if stem.eq_ignore_ascii_case("index") {
        path.parent()?.file_name()?.to_str()?
    } else {
        stem
    };
    let slug = normalize_slug(raw);
    (!slug.is_empty()).then_some(slug)
}

/// Normalize a slug: lowercase, whitespace and underscores become `-`,
/// repeated separators collapse, leading/trailing separators are dropped.
pub fn normalize_slug(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut pending_dash = false;
    for ch in raw.trim().chars() {
        if ch.is_whitespace() || ch == '_' || ch == '-' {
            pending_dash = !out.is_empty();
            continue;
        }
        if pending_dash {
            out.push('-');
            pending_dash = false;
        }
        out.extend(ch.to_lowercase());
    }
    out
}
