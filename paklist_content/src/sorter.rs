use crate::ManifestEntry;

/// Index of the first tag in `priorities` that occurs in `path` (case-insensitive).
/// Paths without any tag get `priorities.len()`.
pub fn priority_index(path: &str, priorities: &[String]) -> usize {
    let path = path.to_lowercase();
    priorities
        .iter()
        .position(|tag| path.contains(&tag.to_lowercase()))
        .unwrap_or(priorities.len())
}

/// Sorts entries by the priority tag in their output path, then case-insensitively by the path.
///
/// Paths are compared in upper case, so `_` sorts after the letters.
///
/// # Example
///
/// ```rust
/// use paklist_content::{sorter::sort_by_priority, AssetKind, ManifestEntry};
/// let priorities = ["shadow", "prepass", "vsm", "tightshadow", "colpass"].map(String::from);
/// let mut entries = ["b/colpass.rpak", "a/shadow.rpak", "z/none.rpak"]
///     .map(|path| ManifestEntry::new(AssetKind::Material, path))
///     .to_vec();
/// sort_by_priority(&mut entries, &priorities);
/// let paths = entries.iter().map(|entry| entry.output_path.as_str()).collect::<Vec<_>>();
/// assert_eq!(paths, ["a/shadow.rpak", "b/colpass.rpak", "z/none.rpak"]);
/// ```
pub fn sort_by_priority(entries: &mut [ManifestEntry], priorities: &[String]) {
    entries.sort_by_cached_key(|entry| {
        (
            priority_index(&entry.output_path, priorities),
            entry.output_path.to_uppercase(),
        )
    });
}
