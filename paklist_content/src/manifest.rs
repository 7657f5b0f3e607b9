use serde::Serialize;

use crate::{sorter::sort_by_priority, AssetGroup, AssetKind, ManifestConfig, ManifestMetadata, SubList};

/// One asset in the manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManifestEntry {
    #[serde(rename = "_type")]
    pub kind: AssetKind,
    #[serde(rename = "_path")]
    pub output_path: String,
    #[serde(rename = "$guid", skip_serializing_if = "Option::is_none")]
    pub guid: Option<String>,
    #[serde(rename = "$animrigs", skip_serializing_if = "Vec::is_empty")]
    pub animrigs: Vec<String>,
    #[serde(rename = "$sequences", skip_serializing_if = "Vec::is_empty")]
    pub sequences: Vec<String>,
}

impl ManifestEntry {
    pub fn new(kind: AssetKind, output_path: impl Into<String>) -> Self {
        Self {
            kind,
            output_path: output_path.into(),
            guid: None,
            animrigs: Vec::new(),
            sequences: Vec::new(),
        }
    }

    pub fn with_guid(mut self, guid: impl Into<String>) -> Self {
        self.guid = Some(guid.into());
        self
    }

    /// Attaches a list from the companion file. Empty items are dropped and an empty list stays absent.
    pub fn set_sub_list(&mut self, sub_list: SubList, items: Vec<String>) {
        let items = items.into_iter().filter(|item| !item.is_empty()).collect();
        match sub_list {
            SubList::AnimRigs => self.animrigs = items,
            SubList::Sequences => self.sequences = items,
        }
    }

    pub fn sub_list(&self, sub_list: SubList) -> &[String] {
        match sub_list {
            SubList::AnimRigs => &self.animrigs,
            SubList::Sequences => &self.sequences,
        }
    }
}

/// Entries collected while walking the asset tree, one collection per [`AssetGroup`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AssetGroups {
    pub settings_layout: Vec<ManifestEntry>,
    pub settings: Vec<ManifestEntry>,
    pub datatable: Vec<ManifestEntry>,
    pub shaderset: Vec<ManifestEntry>,
    pub texture_anim: Vec<ManifestEntry>,
    pub texture: Vec<ManifestEntry>,
    pub material: Vec<ManifestEntry>,
    pub rig: Vec<ManifestEntry>,
    pub model: Vec<ManifestEntry>,
}

impl AssetGroups {
    /// Appends the entry to the group of its kind.
    pub fn push(&mut self, entry: ManifestEntry) {
        self.group_mut(entry.kind.group()).push(entry);
    }

    pub fn group(&self, group: AssetGroup) -> &[ManifestEntry] {
        match group {
            AssetGroup::SettingsLayout => &self.settings_layout,
            AssetGroup::Settings => &self.settings,
            AssetGroup::Datatable => &self.datatable,
            AssetGroup::Shaderset => &self.shaderset,
            AssetGroup::TextureAnim => &self.texture_anim,
            AssetGroup::Texture => &self.texture,
            AssetGroup::Material => &self.material,
            AssetGroup::Rig => &self.rig,
            AssetGroup::Model => &self.model,
        }
    }

    fn group_mut(&mut self, group: AssetGroup) -> &mut Vec<ManifestEntry> {
        match group {
            AssetGroup::SettingsLayout => &mut self.settings_layout,
            AssetGroup::Settings => &mut self.settings,
            AssetGroup::Datatable => &mut self.datatable,
            AssetGroup::Shaderset => &mut self.shaderset,
            AssetGroup::TextureAnim => &mut self.texture_anim,
            AssetGroup::Texture => &mut self.texture,
            AssetGroup::Material => &mut self.material,
            AssetGroup::Rig => &mut self.rig,
            AssetGroup::Model => &mut self.model,
        }
    }

    /// Number of entries in all groups
    pub fn len(&self) -> usize {
        AssetGroup::ALL.iter().map(|group| self.group(*group).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The manifest that is handed to the packaging tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManifestDocument {
    #[serde(flatten)]
    pub metadata: ManifestMetadata,
    pub files: Vec<ManifestEntry>,
}

impl ManifestDocument {
    /// Sorts the material group and concatenates the groups in the configured order.
    ///
    /// # Example
    ///
    /// ```rust
    /// use paklist_content::{AssetGroup, AssetGroups, AssetKind, ManifestConfig, ManifestDocument, ManifestEntry};
    /// let mut groups = AssetGroups::default();
    /// groups.push(ManifestEntry::new(AssetKind::Model, "mdl/r301.rmdl"));
    /// groups.push(ManifestEntry::new(AssetKind::Texture, "texture/r301_col.rpak").with_guid("r301_col"));
    /// let document = ManifestDocument::assemble(groups, &ManifestConfig::default());
    /// assert_eq!(document.files[0].kind, AssetKind::Texture);
    /// assert_eq!(document.files[1].kind, AssetKind::Model);
    /// ```
    pub fn assemble(mut groups: AssetGroups, config: &ManifestConfig) -> Self {
        sort_by_priority(&mut groups.material, &config.sort_priorities);
        let files = config
            .group_order
            .iter()
            .flat_map(|group| groups.group(*group).iter().cloned())
            .collect();
        Self {
            metadata: config.metadata.clone(),
            files,
        }
    }

    /// Serializes the document as indented JSON.
    pub fn to_json_pretty(&self) -> paklist_shared::serde_json::Result<String> {
        paklist_shared::serde_json::to_string_pretty(self)
    }
}
