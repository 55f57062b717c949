//! Identifiers that end up as single path segments in the cache.

/// Whether `s` can be used as one folder or file name component.
///
/// Allows ASCII letters, digits and `._+-`. The special entries `.` and `..`
/// are rejected so a name can never step outside its parent folder.
pub fn is_path_segment(s: &str) -> bool {
  !s.is_empty()
    && s != "."
    && s != ".."
    && s.chars().all(|c| c.is_ascii_alphanumeric() || "._+-".contains(c))
}
