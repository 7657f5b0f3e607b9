use std::fmt::{self, Formatter};

use serde::{Deserialize, Serialize, Serializer};

/// Type of a packaged asset. Serialized as the short kind code that the packaging tool expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    SettingsLayout,
    Settings,
    Datatable,
    Shaderset,
    Shader,
    TextureAnim,
    Texture,
    Material,
    Rig,
    Model,
}

/// How the output path of an entry is derived from the root-relative source path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputStyle {
    /// Source path with the packaged extension. The named export folder is dropped from the path.
    Rewritten { strip_segment: Option<&'static str> },
    /// `<prefix>/<file stem>.<packaged extension>`. The entry carries the file stem as guid.
    Prefixed { prefix: &'static str },
    /// Source path as it is.
    Raw,
}

/// Named list read from a companion file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubList {
    AnimRigs,
    Sequences,
}

impl SubList {
    /// Key of the section in the companion file
    pub fn section_key(self) -> &'static str {
        match self {
            SubList::AnimRigs => "rigs",
            SubList::Sequences => "seqs",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SubList::AnimRigs => "animrigs",
            SubList::Sequences => "sequences",
        }
    }
}

impl AssetKind {
    /// Short code that identifies the kind in the manifest
    ///
    /// # Example
    ///
    /// ```rust
    /// use paklist_content::AssetKind;
    /// assert_eq!(AssetKind::Model.code(), "mdl_");
    /// ```
    pub fn code(self) -> &'static str {
        match self {
            AssetKind::SettingsLayout => "stlt",
            AssetKind::Settings => "stgs",
            AssetKind::Datatable => "dtbl",
            AssetKind::Shaderset => "shds",
            AssetKind::Shader => "shdr",
            AssetKind::TextureAnim => "txan",
            AssetKind::Texture => "txtr",
            AssetKind::Material => "matl",
            AssetKind::Rig => "arig",
            AssetKind::Model => "mdl_",
        }
    }

    /// Group of the manifest in which entries of this kind are collected.
    pub fn group(self) -> AssetGroup {
        match self {
            AssetKind::SettingsLayout => AssetGroup::SettingsLayout,
            AssetKind::Settings => AssetGroup::Settings,
            AssetKind::Datatable => AssetGroup::Datatable,
            AssetKind::Shaderset | AssetKind::Shader => AssetGroup::Shaderset,
            AssetKind::TextureAnim => AssetGroup::TextureAnim,
            AssetKind::Texture => AssetGroup::Texture,
            AssetKind::Material => AssetGroup::Material,
            AssetKind::Rig => AssetGroup::Rig,
            AssetKind::Model => AssetGroup::Model,
        }
    }

    pub fn output_style(self) -> OutputStyle {
        match self {
            AssetKind::SettingsLayout => OutputStyle::Rewritten { strip_segment: Some("stlt") },
            AssetKind::Settings => OutputStyle::Rewritten { strip_segment: Some("stgs") },
            AssetKind::Datatable => OutputStyle::Rewritten { strip_segment: Some("dtbl") },
            AssetKind::Material => OutputStyle::Rewritten { strip_segment: None },
            AssetKind::Shaderset => OutputStyle::Prefixed { prefix: "shaderset" },
            AssetKind::Shader => OutputStyle::Prefixed { prefix: "shader" },
            AssetKind::TextureAnim => OutputStyle::Prefixed { prefix: "texture_anim" },
            AssetKind::Texture => OutputStyle::Prefixed { prefix: "texture" },
            AssetKind::Rig | AssetKind::Model => OutputStyle::Raw,
        }
    }

    /// Lists that are read from the companion file, in the order they appear in the entry.
    pub fn sub_lists(self) -> &'static [SubList] {
        match self {
            AssetKind::Rig => &[SubList::Sequences],
            AssetKind::Model => &[SubList::AnimRigs, SubList::Sequences],
            _ => &[],
        }
    }

    /// Whether the skip list is checked a second time against the output path.
    ///
    /// Raw output paths equal the root-relative path, which is checked for every asset anyway.
    pub fn rechecks_output_path(self) -> bool {
        matches!(self, AssetKind::Material)
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl Serialize for AssetKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

/// Collections into which the entries are sorted while walking the tree. The manifest
/// concatenates them in a configurable order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetGroup {
    SettingsLayout,
    Settings,
    Datatable,
    Shaderset,
    TextureAnim,
    Texture,
    Material,
    Rig,
    Model,
}

impl AssetGroup {
    pub const ALL: [AssetGroup; 9] = [
        AssetGroup::SettingsLayout,
        AssetGroup::Settings,
        AssetGroup::Datatable,
        AssetGroup::Shaderset,
        AssetGroup::TextureAnim,
        AssetGroup::Texture,
        AssetGroup::Material,
        AssetGroup::Rig,
        AssetGroup::Model,
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shader_kinds_share_a_group() {
        assert_eq!(AssetKind::Shader.group(), AssetKind::Shaderset.group());
        assert_ne!(AssetKind::Shader.code(), AssetKind::Shaderset.code());
    }

    #[test]
    fn only_rigs_and_models_have_sub_lists() {
        assert_eq!(AssetKind::Rig.sub_lists(), &[SubList::Sequences]);
        assert_eq!(AssetKind::Model.sub_lists(), &[SubList::AnimRigs, SubList::Sequences]);
        assert!(AssetKind::Texture.sub_lists().is_empty());
    }

    #[test]
    fn only_materials_recheck_the_output_path() {
        assert!(AssetKind::Material.rechecks_output_path());
        assert!(!AssetKind::Model.rechecks_output_path());
        assert!(!AssetKind::Datatable.rechecks_output_path());
        assert!(!AssetKind::Texture.rechecks_output_path());
    }

    #[test]
    fn kind_serializes_as_code() {
        let json = paklist_shared::serde_json::to_string(&AssetKind::TextureAnim).unwrap();
        assert_eq!(json, "\"txan\"");
    }

    #[test]
    fn group_deserializes_from_snake_case() {
        let group: AssetGroup = serde_yaml::from_str("texture_anim").unwrap();
        assert_eq!(group, AssetGroup::TextureAnim);
    }
}
