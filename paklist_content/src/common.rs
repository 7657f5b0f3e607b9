use std::{
    fmt::{self, Formatter},
    io,
    path::{Component, Path, PathBuf},
    result,
};

use paklist_shared::{pathdiff, thiserror};

pub type Result<T> = result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid path: {0}")]
    InvalidPath(PathBuf),
    #[error("Path {path} is not relative to root {root}")]
    NotRelativeToRoot { path: PathBuf, root: PathBuf },
    #[error("Root directory not found: {0}")]
    RootNotFound(PathBuf),
    #[error("IoError: {0}")]
    IoError(#[from] io::Error),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Identifies the asset. It's the path relative to the asset root with `/` as the separator.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AssetKey(String);

impl AssetKey {
    /// Create a new [`AssetKey`] from a relative path. Separators are normalized but no other validation is done.
    ///
    /// # Example
    ///
    /// ```rust
    /// use paklist_content::AssetKey;
    /// let asset_key = AssetKey::new("texture\\character.dds");
    /// assert_eq!(asset_key.as_str(), "texture/character.dds");
    /// ```
    pub fn new(path: impl AsRef<str>) -> Self {
        Self(normalize_separators(path.as_ref()))
    }

    /// Creates the [`AssetKey`] of `path` which must be located below `root`.
    pub fn from_root(root: impl AsRef<Path>, path: impl AsRef<Path>) -> Result<Self> {
        relative_path(root, path).map(Self)
    }

    /// Returns the root-relative path of the asset.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the root-relative path of the asset as a [`Path`].
    pub fn as_path(&self) -> &Path {
        Path::new(&self.0)
    }

    /// File name including the extension
    ///
    /// # Example
    ///
    /// ```rust
    /// use paklist_content::AssetKey;
    /// let asset_key = AssetKey::new("models/weapons/r301.rmdl");
    /// assert_eq!(asset_key.file_name(), "r301.rmdl");
    /// assert_eq!(asset_key.file_stem(), "r301");
    /// ```
    pub fn file_name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }

    /// File name without the extension
    pub fn file_stem(&self) -> &str {
        let file_name = self.file_name();
        match file_name.rfind('.') {
            Some(0) | None => file_name,
            Some(index) => &file_name[..index],
        }
    }

    /// Lowercase extension without the dot, if there is one.
    pub fn extension(&self) -> Option<String> {
        let file_name = self.file_name();
        match file_name.rfind('.') {
            Some(0) | None => None,
            Some(index) => Some(file_name[index + 1..].to_lowercase()),
        }
    }

    /// Root-relative path of the directory containing the asset. Empty for assets in the root.
    pub fn folder(&self) -> &str {
        match self.0.rfind('/') {
            Some(index) => &self.0[..index],
            None => "",
        }
    }

    /// Name of the directory containing the asset. Empty for assets in the root.
    pub fn folder_name(&self) -> &str {
        let folder = self.folder();
        folder.rsplit('/').next().unwrap_or(folder)
    }
}

impl fmt::Display for AssetKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for AssetKey {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Replaces all `\` with `/`.
pub fn normalize_separators(path: &str) -> String {
    path.replace('\\', "/")
}

/// Returns `path` relative to `root` with `/` as the separator.
///
/// # Example
///
/// ```rust
/// use paklist_content::common::relative_path;
/// assert_eq!(relative_path("/assets", "/assets/texture/a.dds").unwrap(), "texture/a.dds");
/// assert!(relative_path("/assets", "/other/a.dds").is_err());
/// ```
pub fn relative_path(root: impl AsRef<Path>, path: impl AsRef<Path>) -> Result<String> {
    let (root, path) = (root.as_ref(), path.as_ref());
    let not_relative = || Error::NotRelativeToRoot {
        path: path.to_owned(),
        root: root.to_owned(),
    };
    let relative = pathdiff::diff_paths(path, root).ok_or_else(not_relative)?;
    if relative.as_os_str().is_empty() || relative.components().any(|component| !matches!(component, Component::Normal(_))) {
        return Err(not_relative());
    }
    let relative = relative.to_str().ok_or_else(|| Error::InvalidPath(path.to_owned()))?;
    Ok(normalize_separators(relative))
}

/// Swaps the extension of the last path segment for `extension`. Appends it when there is none.
///
/// # Example
///
/// ```rust
/// use paklist_content::common::replace_extension;
/// assert_eq!(replace_extension("datatable/a.b.csv", "rpak"), "datatable/a.b.rpak");
/// assert_eq!(replace_extension("x.y/readme", "rpak"), "x.y/readme.rpak");
/// ```
pub fn replace_extension(path: &str, extension: &str) -> String {
    let file_start = path.rfind('/').map_or(0, |index| index + 1);
    let stem_end = match path[file_start..].rfind('.') {
        Some(0) | None => path.len(),
        Some(index) => file_start + index,
    };
    format!("{}.{extension}", &path[..stem_end])
}

/// Removes the first path segment that equals `segment` (case-insensitive).
///
/// Tools export some folders under a different name than the one the game loads them from,
/// e.g. `dtbl/` instead of `datatable/`.
///
/// # Example
///
/// ```rust
/// use paklist_content::common::strip_segment;
/// assert_eq!(strip_segment("dtbl/datatable/weapons.csv", "dtbl"), "datatable/weapons.csv");
/// assert_eq!(strip_segment("mydtbl/weapons.csv", "dtbl"), "mydtbl/weapons.csv");
/// ```
pub fn strip_segment(path: &str, segment: &str) -> String {
    let segments = path.split('/').collect::<Vec<_>>();
    let Some(index) = segments[..segments.len() - 1]
        .iter()
        .position(|candidate| candidate.eq_ignore_ascii_case(segment))
    else {
        return path.to_owned();
    };
    segments
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != index)
        .map(|(_, s)| *s)
        .collect::<Vec<_>>()
        .join("/")
}
