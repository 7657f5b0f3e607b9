use std::{collections::HashSet, fs, path::Path};

use crate::{common::normalize_separators, Result};
use paklist_shared::log::info;

/// Identifiers of assets that are already packaged elsewhere and must not show up in the manifest.
///
/// Keys are compared case-insensitively and with `/` and `\` treated as the same separator.
/// The list is immutable once it has been loaded.
#[derive(Debug, Default, Clone)]
pub struct SkipList {
    keys: HashSet<String>,
}

impl SkipList {
    /// Creates a [`SkipList`] that doesn't skip anything.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a [`SkipList`] from newline-delimited text. Blank lines and surrounding whitespace are ignored.
    ///
    /// # Example
    ///
    /// ```rust
    /// use paklist_content::SkipList;
    /// let skip_list = SkipList::from_lines("  Wall_01 \n\nmaterial\\floor.rpak\n".lines());
    /// assert_eq!(skip_list.len(), 2);
    /// assert!(skip_list.contains(&["wall_01.dds", "WALL_01"]));
    /// assert!(skip_list.contains(&["material/floor.rpak"]));
    /// ```
    pub fn from_lines<'a>(lines: impl IntoIterator<Item = &'a str>) -> Self {
        let keys = lines
            .into_iter()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(normalize_key)
            .collect();
        Self { keys }
    }

    /// Reads the [`SkipList`] from a file. A missing file results in an empty list.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            info!("Skip list not found, nothing will be skipped: {}", path.display());
            return Ok(Self::empty());
        }
        let content = fs::read_to_string(path)?;
        let skip_list = Self::from_lines(content.lines());
        info!("Loaded skip list with {} entries: {}", skip_list.len(), path.display());
        Ok(skip_list)
    }

    /// Returns the first of the `candidate_forms` that is in the list.
    pub fn find<'a>(&self, candidate_forms: &[&'a str]) -> Option<&'a str> {
        if self.keys.is_empty() {
            return None;
        }
        candidate_forms
            .iter()
            .find(|candidate| self.keys.contains(&normalize_key(candidate)))
            .copied()
    }

    /// Returns `true` when any of the `candidate_forms` is in the list.
    pub fn contains(&self, candidate_forms: &[&str]) -> bool {
        self.find(candidate_forms).is_some()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

fn normalize_key(key: &str) -> String {
    normalize_separators(key).to_lowercase()
}
