//! Reading of the list sections in companion `.rson` files.
//!
//! Models and animation rigs can come with a sibling file that has the same base name and
//! lists the rigs and sequences that belong to the asset:
//!
//! ```text
//! rigs:
//! [
//!     animrig/weapons/r301.rrig
//! ]
//! seqs:
//! [
//!     animseq/weapons/r301/fire.rseq,
//!     animseq/weapons/r301/reload.rseq
//! ]
//! ```
//!
//! Only these bracketed lists are understood. The reader is line based: one item per line,
//! no nesting, no quoting. A list may also be written on the key line itself
//! (`seqs: [a, b, c]`).

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use crate::{
    common::{normalize_separators, replace_extension},
    AssetKey, Error, Result,
};

/// Returns the items of the list section named `key`.
///
/// Only the first section with that name is read. An absent key yields an empty list.
///
/// # Example
///
/// ```rust
/// use paklist_content::rson::extract_section;
/// let lines = ["rigs:", "[", "    animrig\\r301.rrig,", "]", "seqs: [fire, reload]"];
/// assert_eq!(extract_section(lines, "rigs"), vec!["animrig/r301.rrig"]);
/// assert_eq!(extract_section(lines, "SEQS"), vec!["fire", "reload"]);
/// assert!(extract_section(lines, "bones").is_empty());
/// ```
pub fn extract_section<'a>(lines: impl IntoIterator<Item = &'a str>, key: &str) -> Vec<String> {
    let mut items = Vec::new();
    let mut lines = lines.into_iter();

    let Some(inline) = lines.by_ref().find_map(|line| strip_key(line.trim(), key)) else {
        return items;
    };

    let inline = inline.trim();
    let inline_closed = inline.ends_with(']');
    let inline = inline.strip_prefix('[').unwrap_or(inline);
    items.extend(inline.split(',').filter_map(clean_item));
    if inline_closed {
        return items;
    }

    for line in lines {
        let line = line.trim();
        if line == "]" {
            break;
        }
        items.extend(clean_item(line.strip_prefix('[').unwrap_or(line)));
    }

    items
}

/// Returns the text after `key:` if the line starts with it (case-insensitive).
fn strip_key<'a>(line: &'a str, key: &str) -> Option<&'a str> {
    let name = line.get(..key.len())?;
    if !name.eq_ignore_ascii_case(key) {
        return None;
    }
    line[key.len()..].strip_prefix(':')
}

fn clean_item(item: &str) -> Option<String> {
    let item = item.trim().trim_end_matches([',', ']', ' ']).trim();
    (!item.is_empty()).then(|| normalize_separators(item))
}

/// Source for the companion files of assets.
pub trait ReadCompanion {
    /// Reads the companion file of `asset_key` that has the given extension. Returns `None` when there is none.
    fn read_companion(&self, asset_key: &AssetKey, extension: &str) -> Result<Option<String>>;
}

/// Reads companion files from the asset directory on disk.
pub struct FileSystem {
    root: PathBuf,
}

impl FileSystem {
    /// Creates a new [`FileSystem`] and checks that the given root directory exists.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        if !root.is_dir() {
            return Err(Error::RootNotFound(root));
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ReadCompanion for FileSystem {
    fn read_companion(&self, asset_key: &AssetKey, extension: &str) -> Result<Option<String>> {
        let path = self.root.join(replace_extension(asset_key.as_str(), extension));
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }
}
