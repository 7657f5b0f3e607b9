//! # Overview
//!
//! Crate for building the manifest that tells the packaging tool which assets to bundle.
//!
//! The input is a directory tree of exported asset source files. Every file is
//! [classified](Classifier) by its extension and, for some extensions, by the folder it is
//! located in. Each recognized file becomes a [`ManifestEntry`] that carries the kind code
//! and the path of the packaged asset. The entries are collected in [`AssetGroups`] and
//! finally [assembled](ManifestDocument::assemble) into one [`ManifestDocument`].
//!
//! ## Example:
//!
//! **Source Directory:**
//!
//! ```text
//! assets/
//! ├─ dtbl/datatable/
//! │  ├─ weapons.csv
//! ├─ material/
//! │  ├─ wall_shadow_.json
//! ├─ mdl/
//! │  ├─ r301.rmdl
//! │  ├─ r301.rson
//! ├─ texture/
//! │  ├─ r301_col.dds
//! ```
//!
//! **Manifest:**
//!
//! ```text
//! datatable/weapons.rpak        dtbl
//! texture/r301_col.rpak         txtr   $guid: r301_col
//! material/wall_shadow_.rpak    matl
//! mdl/r301.rmdl                 mdl_   $animrigs/$sequences from r301.rson
//! ```
//!
//! # Components
//!
//! - [`SkipList`]: assets that are already packaged elsewhere and are left out
//! - [`rson`]: reads the rig and sequence lists from companion files
//! - [`Classifier`]: the [`Rule`](classifier::Rule) table that maps files to entries
//! - [`AssetWalker`]: visits the tree and collects the entries
//! - [`sorter`]: orders the material entries by render pass
//! - [`ManifestDocument`]: the final document

mod asset_walker;
pub mod classifier;
pub mod common;
mod config;
mod kind;
mod manifest;
pub mod rson;
mod skip_list;
pub mod sorter;

use std::path::PathBuf;

pub use asset_walker::AssetWalker;
pub use classifier::{Classification, Classifier};
pub use common::{AssetKey, Error, Result};
pub use config::{ManifestConfig, ManifestMetadata};
pub use kind::{AssetGroup, AssetKind, OutputStyle, SubList};
pub use manifest::{AssetGroups, ManifestDocument, ManifestEntry};
pub use skip_list::SkipList;

/// Walks the tree below `root` and assembles the manifest of all assets that are not in the `skip_list`.
pub fn build_manifest(root: impl Into<PathBuf>, config: &ManifestConfig, skip_list: &SkipList) -> Result<ManifestDocument> {
    let asset_groups = AssetWalker::new(root, config, skip_list)?.walk();
    Ok(ManifestDocument::assemble(asset_groups, config))
}
