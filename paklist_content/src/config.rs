use std::{collections::HashSet, fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{AssetGroup, Error, Result};

/// Document-level fields of the manifest. They are constant for a given revision of the packaging tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ManifestMetadata {
    pub version: u32,
    pub keep_dev_only: bool,
    pub name: String,
    pub stream_file_mandatory: String,
    pub stream_file_optional: String,
    pub assets_dir: String,
    pub output_dir: String,
    pub compress_level: u32,
    pub compress_workers: u32,
}

impl Default for ManifestMetadata {
    fn default() -> Self {
        Self {
            version: 8,
            keep_dev_only: true,
            name: "output".to_owned(),
            stream_file_mandatory: "paks/Win64/output.starpak".to_owned(),
            stream_file_optional: "paks/Win64/output.opt.starpak".to_owned(),
            assets_dir: "./assets/".to_owned(),
            output_dir: "./build/".to_owned(),
            compress_level: 19,
            compress_workers: 16,
        }
    }
}

/// Configuration for building a manifest
///
/// Every field falls back to its default when it's missing in the YAML file.
///
/// ```yaml
/// metadata:
///   name: weapons
///   compressLevel: 6
/// group_order: [datatable, texture, material, model]
/// sort_priorities: [_shadow_, _colpass_]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ManifestConfig {
    pub metadata: ManifestMetadata,
    /// Groups that are written to the manifest, in this order. Groups that are not listed are left out.
    pub group_order: Vec<AssetGroup>,
    /// Substrings that move material entries to the front. Earlier tags come first.
    pub sort_priorities: Vec<String>,
    /// Extension of the packaged assets without the dot
    pub packaged_extension: String,
    /// Extension of the companion files of models and rigs without the dot
    pub companion_extension: String,
}

impl Default for ManifestConfig {
    fn default() -> Self {
        Self {
            metadata: ManifestMetadata::default(),
            group_order: AssetGroup::ALL.to_vec(),
            sort_priorities: ["_shadow_", "_prepass_", "_vsm_", "_tightshadow_", "_colpass_"]
                .into_iter()
                .map(String::from)
                .collect(),
            packaged_extension: "rpak".to_owned(),
            companion_extension: "rson".to_owned(),
        }
    }
}

impl ManifestConfig {
    /// Parses and validates a configuration from YAML.
    ///
    /// # Example
    ///
    /// ```rust
    /// use paklist_content::{AssetGroup, ManifestConfig};
    /// let config = ManifestConfig::from_yaml_str("group_order: [texture, model]").unwrap();
    /// assert_eq!(config.group_order, vec![AssetGroup::Texture, AssetGroup::Model]);
    /// assert_eq!(config.metadata.version, 8);
    /// ```
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml).map_err(|err| Error::InvalidConfig(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads the configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let yaml = fs::read_to_string(path)?;
        Self::from_yaml_str(&yaml)
    }

    /// Checks the values that serde can't check.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        if let Some(group) = self.group_order.iter().find(|group| !seen.insert(**group)) {
            return Err(Error::InvalidConfig(format!("group '{group:?}' is listed more than once")));
        }
        if self.sort_priorities.iter().any(|tag| tag.is_empty()) {
            return Err(Error::InvalidConfig("sort priorities must not be empty".to_owned()));
        }
        for (name, extension) in [
            ("packaged_extension", &self.packaged_extension),
            ("companion_extension", &self.companion_extension),
        ] {
            if extension.is_empty() || extension.contains(['.', '/', '\\']) {
                return Err(Error::InvalidConfig(format!("{name} '{extension}' must be a bare extension")));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ManifestConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.group_order.first(), Some(&AssetGroup::SettingsLayout));
        assert_eq!(config.group_order.last(), Some(&AssetGroup::Model));
        assert_eq!(config.sort_priorities[0], "_shadow_");
        assert_eq!(config.metadata.compress_workers, 16);
    }

    #[test]
    fn empty_yaml_is_default() {
        assert_eq!(ManifestConfig::from_yaml_str("{}").unwrap(), ManifestConfig::default());
    }

    #[test]
    fn partial_metadata() {
        let config = ManifestConfig::from_yaml_str("metadata:\n  name: weapons\n  compressLevel: 6\n").unwrap();
        assert_eq!(config.metadata.name, "weapons");
        assert_eq!(config.metadata.compress_level, 6);
        assert_eq!(config.metadata.version, 8);
    }

    #[test]
    fn duplicate_group_is_rejected() {
        let result = ManifestConfig::from_yaml_str("group_order: [texture, texture]");
        assert!(matches!(result, Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn unknown_field_is_rejected() {
        let result = ManifestConfig::from_yaml_str("groups: [texture]");
        assert!(matches!(result, Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn dotted_extension_is_rejected() {
        let result = ManifestConfig::from_yaml_str("packaged_extension: .rpak");
        assert!(matches!(result, Err(Error::InvalidConfig(_))));
    }
}
