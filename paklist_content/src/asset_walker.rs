use std::{
    cmp::Ordering,
    path::{Path, PathBuf},
};

use paklist_shared::{
    log::{error, info, trace, warn},
    walkdir::{DirEntry, WalkDir},
};

use crate::{
    classifier::{Classification, Classifier},
    rson::FileSystem,
    AssetGroups, AssetKey, ManifestConfig, Result, SkipList,
};

/// Walks the source directory and classifies every file in it.
///
/// The tree is visited depth-first. In every directory the files come before the
/// subdirectories and both are ordered by name, so the result doesn't depend on the order
/// in which the operating system lists the entries.
pub struct AssetWalker<'a> {
    file_system: FileSystem,
    classifier: Classifier<'a>,
}

impl<'a> AssetWalker<'a> {
    /// Creates a new [`AssetWalker`] and checks that the root directory exists.
    pub fn new(root: impl Into<PathBuf>, config: &'a ManifestConfig, skip_list: &'a SkipList) -> Result<Self> {
        Ok(Self {
            file_system: FileSystem::new(root)?,
            classifier: Classifier::new(config, skip_list),
        })
    }

    /// Creates an [`AssetWalker`] that uses a custom [`Classifier`].
    pub fn with_classifier(root: impl Into<PathBuf>, classifier: Classifier<'a>) -> Result<Self> {
        Ok(Self {
            file_system: FileSystem::new(root)?,
            classifier,
        })
    }

    pub fn root(&self) -> &Path {
        self.file_system.root()
    }

    /// Classifies all files below the root. Files that fail are logged and left out.
    pub fn walk(&self) -> AssetGroups {
        let mut asset_groups = AssetGroups::default();

        let root = self.root();
        info!("Walking asset tree in path: {}", root.display());

        for entry in WalkDir::new(root).sort_by(files_first) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    warn!("Failed to read directory entry: {err}");
                    continue;
                }
            };

            if entry.file_type().is_dir() {
                continue;
            }

            if let Err(err) = self.process(entry.path(), &mut asset_groups) {
                error!("Failed to process file '{}': {err}", entry.path().display());
            }
        }

        info!("Found {} assets in path: {}", asset_groups.len(), root.display());
        asset_groups
    }

    fn process(&self, path: &Path, asset_groups: &mut AssetGroups) -> Result<()> {
        let asset_key = AssetKey::from_root(self.root(), path)?;
        match self.classifier.classify(&asset_key, &self.file_system)? {
            Classification::Entry(entry) => {
                info!("Processed {} asset '{asset_key}'. Path: {}", entry.kind, entry.output_path);
                asset_groups.push(entry);
            }
            Classification::Skipped(form) => info!("Found an asset that is already packaged: {form}, skipping!"),
            Classification::Unsupported => warn!("Asset '{asset_key}' is in an unsupported folder"),
            Classification::Ignored => trace!("Ignoring file '{asset_key}'"),
        }
        Ok(())
    }
}

fn files_first(a: &DirEntry, b: &DirEntry) -> Ordering {
    a.file_type()
        .is_dir()
        .cmp(&b.file_type().is_dir())
        .then_with(|| a.file_name().cmp(b.file_name()))
}
