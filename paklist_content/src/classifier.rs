//! Classification of source files into manifest entries.
//!
//! The kind of an asset is decided by its extension and, for a few extensions that are used by
//! more than one kind, by a marker in its path. All of that is described by the [`Rule`] table;
//! the first rule that matches a file decides what happens to it.

use paklist_shared::log::info;

use crate::{
    common::{replace_extension, strip_segment},
    rson::{extract_section, ReadCompanion},
    AssetKey, AssetKind, ManifestConfig, ManifestEntry, OutputStyle, Result, SkipList,
};

/// Part of the root-relative path that a [`Marker`] is searched in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerScope {
    /// Name of the directory that contains the file
    FolderName,
    /// Path of the directory that contains the file, followed by `/`
    FolderPath,
    /// Path of the file
    FilePath,
}

/// Case-insensitive substring that must occur in a part of the path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Marker {
    pub scope: MarkerScope,
    pub text: &'static str,
}

impl Marker {
    pub const fn new(scope: MarkerScope, text: &'static str) -> Self {
        Self { scope, text }
    }

    pub fn matches(&self, asset_key: &AssetKey) -> bool {
        let haystack = match self.scope {
            MarkerScope::FolderName => asset_key.folder_name().to_owned(),
            MarkerScope::FolderPath if asset_key.folder().is_empty() => String::new(),
            MarkerScope::FolderPath => format!("{}/", asset_key.folder()),
            MarkerScope::FilePath => asset_key.as_str().to_owned(),
        };
        haystack.to_lowercase().contains(&self.text.to_lowercase())
    }
}

/// What happens to a file that matches a [`Rule`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Emit(AssetKind),
    /// The extension is known but the file is in a folder that can't be packaged.
    Unsupported,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    /// Lowercase extension without the dot
    pub extension: &'static str,
    pub marker: Option<Marker>,
    pub action: Action,
}

impl Rule {
    const fn new(extension: &'static str, marker: Option<Marker>, action: Action) -> Self {
        Self { extension, marker, action }
    }

    pub fn matches(&self, extension: &str, asset_key: &AssetKey) -> bool {
        self.extension.eq_ignore_ascii_case(extension) && self.marker.map_or(true, |marker| marker.matches(asset_key))
    }
}

use Action::{Emit, Unsupported};
use MarkerScope::{FilePath, FolderName, FolderPath};

/// Rules in the order in which they are checked
pub const DEFAULT_RULES: &[Rule] = &[
    Rule::new("csv", Some(Marker::new(FolderName, "datatable")), Emit(AssetKind::Datatable)),
    Rule::new("msw", Some(Marker::new(FolderName, "shaderset")), Emit(AssetKind::Shaderset)),
    Rule::new("msw", Some(Marker::new(FolderName, "shader")), Emit(AssetKind::Shader)),
    Rule::new("msw", None, Unsupported),
    Rule::new("dds", None, Emit(AssetKind::Texture)),
    Rule::new("txan", None, Emit(AssetKind::TextureAnim)),
    Rule::new("json", Some(Marker::new(FolderPath, "settings_layout")), Emit(AssetKind::SettingsLayout)),
    Rule::new("json", Some(Marker::new(FolderPath, "settings/")), Emit(AssetKind::Settings)),
    Rule::new("json", Some(Marker::new(FilePath, "material")), Emit(AssetKind::Material)),
    Rule::new("rrig", None, Emit(AssetKind::Rig)),
    Rule::new("rmdl", None, Emit(AssetKind::Model)),
];

/// Result of classifying one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    Entry(ManifestEntry),
    /// The file is in the skip list. Contains the form of the file's identity that matched.
    Skipped(String),
    /// The file has a known extension but is in a folder that isn't supported for it.
    Unsupported,
    /// No rule matches the file.
    Ignored,
}

/// Turns source files into [`ManifestEntry`]s according to a [`Rule`] table.
pub struct Classifier<'a> {
    rules: &'a [Rule],
    config: &'a ManifestConfig,
    skip_list: &'a SkipList,
}

impl<'a> Classifier<'a> {
    /// Creates a [`Classifier`] that uses the [`DEFAULT_RULES`].
    pub fn new(config: &'a ManifestConfig, skip_list: &'a SkipList) -> Self {
        Self::with_rules(DEFAULT_RULES, config, skip_list)
    }

    pub fn with_rules(rules: &'a [Rule], config: &'a ManifestConfig, skip_list: &'a SkipList) -> Self {
        Self { rules, config, skip_list }
    }

    /// Returns the first rule that matches the asset.
    pub fn rule_for(&self, asset_key: &AssetKey) -> Option<&'a Rule> {
        let extension = asset_key.extension()?;
        self.rules.iter().find(|rule| rule.matches(&extension, asset_key))
    }

    /// Classifies a single file. Companion files are read from `companions`.
    pub fn classify(&self, asset_key: &AssetKey, companions: &dyn ReadCompanion) -> Result<Classification> {
        let identity_forms = [asset_key.file_name(), asset_key.file_stem(), asset_key.as_str()];
        if let Some(form) = self.skip_list.find(&identity_forms) {
            return Ok(Classification::Skipped(form.to_owned()));
        }

        let kind = match self.rule_for(asset_key).map(|rule| rule.action) {
            Some(Emit(kind)) => kind,
            Some(Unsupported) => return Ok(Classification::Unsupported),
            None => return Ok(Classification::Ignored),
        };

        let output_path = self.output_path(kind, asset_key);
        if kind.rechecks_output_path() {
            if let Some(form) = self.skip_list.find(&[output_path.as_str()]) {
                return Ok(Classification::Skipped(form.to_owned()));
            }
        }

        let mut entry = ManifestEntry::new(kind, output_path);
        if let OutputStyle::Prefixed { .. } = kind.output_style() {
            entry = entry.with_guid(asset_key.file_stem());
        }
        if !kind.sub_lists().is_empty() {
            self.attach_sub_lists(&mut entry, asset_key, companions)?;
        }

        Ok(Classification::Entry(entry))
    }

    fn output_path(&self, kind: AssetKind, asset_key: &AssetKey) -> String {
        let packaged_extension = &self.config.packaged_extension;
        match kind.output_style() {
            OutputStyle::Rewritten { strip_segment: None } => replace_extension(asset_key.as_str(), packaged_extension),
            OutputStyle::Rewritten {
                strip_segment: Some(segment),
            } => replace_extension(&strip_segment(asset_key.as_str(), segment), packaged_extension),
            OutputStyle::Prefixed { prefix } => format!("{prefix}/{}.{packaged_extension}", asset_key.file_stem()),
            OutputStyle::Raw => asset_key.as_str().to_owned(),
        }
    }

    fn attach_sub_lists(&self, entry: &mut ManifestEntry, asset_key: &AssetKey, companions: &dyn ReadCompanion) -> Result<()> {
        let Some(companion) = companions.read_companion(asset_key, &self.config.companion_extension)? else {
            return Ok(());
        };
        info!("Found {} file for '{asset_key}'", self.config.companion_extension);

        let lines = companion.lines().collect::<Vec<_>>();
        for sub_list in entry.kind.sub_lists() {
            let items = extract_section(lines.iter().copied(), sub_list.section_key());
            if !items.is_empty() {
                info!("Extracted {} of '{asset_key}': {}", sub_list.name(), items.join(", "));
            }
            entry.set_sub_list(*sub_list, items);
        }

        if entry.kind.sub_lists().iter().all(|sub_list| entry.sub_list(*sub_list).is_empty()) {
            info!("{} file of '{asset_key}' doesn't list anything", self.config.companion_extension);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use paklist_test::setup_logger;

    use super::*;
    use crate::{common::replace_extension, Error, SubList};

    /// Companion files kept in memory, keyed by their root-relative path.
    #[derive(Default)]
    struct Companions(HashMap<String, String>);

    impl Companions {
        fn with(mut self, path: &str, content: &str) -> Self {
            self.0.insert(path.to_owned(), content.to_owned());
            self
        }
    }

    impl ReadCompanion for Companions {
        fn read_companion(&self, asset_key: &AssetKey, extension: &str) -> Result<Option<String>> {
            Ok(self.0.get(&replace_extension(asset_key.as_str(), extension)).cloned())
        }
    }

    struct Unreadable;

    impl ReadCompanion for Unreadable {
        fn read_companion(&self, asset_key: &AssetKey, _extension: &str) -> Result<Option<String>> {
            Err(Error::InvalidPath(asset_key.as_path().to_owned()))
        }
    }

    fn classify_with(path: &str, skip_list: &SkipList, companions: &dyn ReadCompanion) -> Classification {
        let config = ManifestConfig::default();
        Classifier::new(&config, skip_list)
            .classify(&AssetKey::new(path), companions)
            .unwrap()
    }

    fn classify(path: &str) -> Classification {
        classify_with(path, &SkipList::empty(), &Companions::default())
    }

    fn entry(path: &str) -> ManifestEntry {
        match classify(path) {
            Classification::Entry(entry) => entry,
            other => panic!("expected an entry for '{path}' but got {other:?}"),
        }
    }

    #[test]
    fn datatable() {
        let entry = entry("dtbl/datatable/weapons.CSV");
        assert_eq!(entry.kind, AssetKind::Datatable);
        assert_eq!(entry.output_path, "datatable/weapons.rpak");
        assert_eq!(entry.guid, None);
    }

    #[test]
    fn csv_outside_datatable_folder_is_ignored() {
        assert_eq!(classify("datatable/extra/weapons.csv"), Classification::Ignored);
        assert_eq!(classify("weapons.csv"), Classification::Ignored);
    }

    #[test]
    fn shaderset_and_shader() {
        let shaderset = entry("shaderset/wall.msw");
        assert_eq!(shaderset.kind, AssetKind::Shaderset);
        assert_eq!(shaderset.output_path, "shaderset/wall.rpak");
        assert_eq!(shaderset.guid.as_deref(), Some("wall"));

        let shader = entry("export/shader/wall.msw");
        assert_eq!(shader.kind, AssetKind::Shader);
        assert_eq!(shader.output_path, "shader/wall.rpak");
    }

    #[test]
    fn shader_in_unsupported_folder() {
        assert_eq!(classify("misc/wall.msw"), Classification::Unsupported);
    }

    #[test]
    fn textures() {
        let texture = entry("texture/models/r301/R301_col.DDS");
        assert_eq!(texture.kind, AssetKind::Texture);
        assert_eq!(texture.output_path, "texture/R301_col.rpak");
        assert_eq!(texture.guid.as_deref(), Some("R301_col"));

        let texture_anim = entry("anim/water.txan");
        assert_eq!(texture_anim.kind, AssetKind::TextureAnim);
        assert_eq!(texture_anim.output_path, "texture_anim/water.rpak");
        assert_eq!(texture_anim.guid.as_deref(), Some("water"));
    }

    #[test]
    fn json_documents() {
        let layout = entry("stlt/settings_layout/weapons.json");
        assert_eq!(layout.kind, AssetKind::SettingsLayout);
        assert_eq!(layout.output_path, "settings_layout/weapons.rpak");

        let settings = entry("stgs/settings/weapons/r301.json");
        assert_eq!(settings.kind, AssetKind::Settings);
        assert_eq!(settings.output_path, "settings/weapons/r301.rpak");

        let material = entry("material/wall_colpass_.json");
        assert_eq!(material.kind, AssetKind::Material);
        assert_eq!(material.output_path, "material/wall_colpass_.rpak");
        assert_eq!(material.guid, None);

        assert_eq!(classify("scripts/vscripts.json"), Classification::Ignored);
    }

    #[test]
    fn settings_layout_wins_over_settings() {
        let entry = entry("settings/settings_layout/weapons.json");
        assert_eq!(entry.kind, AssetKind::SettingsLayout);
    }

    #[test]
    fn settings_wins_over_material() {
        let entry = entry("settings/material/wall.json");
        assert_eq!(entry.kind, AssetKind::Settings);
    }

    #[test]
    fn unknown_extension_is_ignored() {
        assert_eq!(classify("texture/readme.txt"), Classification::Ignored);
        assert_eq!(classify("texture/README"), Classification::Ignored);
    }

    #[test]
    fn rig_with_sequences() {
        setup_logger();
        let companions = Companions::default().with("animrig/r301.rson", "seqs:\n[\n\tanimseq\\r301\\fire.rseq\n]\n");
        let Classification::Entry(entry) = classify_with("animrig/r301.rrig", &SkipList::empty(), &companions) else {
            panic!("expected an entry");
        };
        assert_eq!(entry.kind, AssetKind::Rig);
        assert_eq!(entry.output_path, "animrig/r301.rrig");
        assert_eq!(entry.sequences, vec!["animseq/r301/fire.rseq"]);
        assert!(entry.animrigs.is_empty());
    }

    #[test]
    fn rig_ignores_rigs_section() {
        setup_logger();
        let companions = Companions::default().with("animrig/r301.rson", "rigs: [a]\n");
        let Classification::Entry(entry) = classify_with("animrig/r301.rrig", &SkipList::empty(), &companions) else {
            panic!("expected an entry");
        };
        assert!(entry.animrigs.is_empty());
        assert!(entry.sequences.is_empty());
    }

    #[test]
    fn model_with_companion() {
        setup_logger();
        let companions = Companions::default().with("mdl/foo.rson", "rigs: [r1]\nseqs: []\n");
        let Classification::Entry(entry) = classify_with("mdl/foo.rmdl", &SkipList::empty(), &companions) else {
            panic!("expected an entry");
        };
        assert_eq!(entry.kind, AssetKind::Model);
        assert_eq!(entry.output_path, "mdl/foo.rmdl");
        assert_eq!(entry.sub_list(SubList::AnimRigs), ["r1"]);
        assert!(entry.sub_list(SubList::Sequences).is_empty());
    }

    #[test]
    fn model_without_companion() {
        let entry = entry("mdl/foo.rmdl");
        assert!(entry.animrigs.is_empty());
        assert!(entry.sequences.is_empty());
    }

    #[test]
    fn unreadable_companion_is_an_error() {
        let config = ManifestConfig::default();
        let skip_list = SkipList::empty();
        let classifier = Classifier::new(&config, &skip_list);
        assert!(classifier.classify(&AssetKey::new("mdl/foo.rmdl"), &Unreadable).is_err());
        // Kinds without companion files never touch the source.
        assert!(classifier.classify(&AssetKey::new("texture/a.dds"), &Unreadable).is_ok());
    }

    #[test]
    fn skip_list_matches_every_identity_form() {
        let cases = [
            ("WALL_COL.dds", "wall_col.dds"),
            ("wall_col", "wall_col"),
            ("Texture\\wall_col.dds", "texture/wall_col.dds"),
        ];
        for (key, matched_form) in cases {
            let skip_list = SkipList::from_lines([key]);
            let result = classify_with("texture/wall_col.dds", &skip_list, &Companions::default());
            assert_eq!(result, Classification::Skipped(matched_form.to_owned()));
        }
    }

    #[test]
    fn material_is_rechecked_against_output_path() {
        let skip_list = SkipList::from_lines(["material\\wall.rpak"]);
        let result = classify_with("material/wall.json", &skip_list, &Companions::default());
        assert_eq!(result, Classification::Skipped("material/wall.rpak".to_owned()));
    }

    #[test]
    fn custom_rule_table() {
        const RULES: &[Rule] = &[Rule::new("png", None, Emit(AssetKind::Texture))];
        let config = ManifestConfig::default();
        let skip_list = SkipList::empty();
        let classifier = Classifier::with_rules(RULES, &config, &skip_list);
        assert!(matches!(
            classifier.classify(&AssetKey::new("ui/logo.png"), &Companions::default()).unwrap(),
            Classification::Entry(_)
        ));
        assert_eq!(
            classifier.classify(&AssetKey::new("ui/logo.dds"), &Companions::default()).unwrap(),
            Classification::Ignored
        );
    }
}
