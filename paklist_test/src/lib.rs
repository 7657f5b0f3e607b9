use std::{
    fs,
    path::{Path, PathBuf},
    sync::Once,
};

use paklist_shared::log::LevelFilter;
use tempdir::TempDir;

#[doc(hidden)]
pub use paklist_shared;

/// Creates a new `TestContext` for the test function in which the macro is executed.
#[macro_export]
macro_rules! test_context {
    () => {{
        let test_name = $crate::paklist_shared::function_name!().replace("::", ".");
        $crate::TestContext::new(&test_name)
    }};
}

/// Installs a logger that prints everything. Can be called from every test; only the first call has an effect.
pub fn setup_logger() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        // Another test harness might have installed a logger already.
        let _ = simple_logger::SimpleLogger::new().with_level(LevelFilter::Trace).init();
    });
}

/// General information for a test
pub struct TestContext {
    pub test_name: String,
    pub asset_tree: AssetTree,
}

impl TestContext {
    /// Creates a new `TestContext` with an empty [`AssetTree`] named after the test.
    pub fn new(test_name: &str) -> Self {
        println!("Creating the asset tree for test '{test_name}'");
        TestContext {
            test_name: test_name.to_owned(),
            asset_tree: AssetTree::new(test_name),
        }
    }
}

/// Temporary directory tree of unpackaged assets that is deleted when dropped.
pub struct AssetTree {
    dir: TempDir,
}

impl AssetTree {
    /// Creates an empty tree in the system's temporary directory.
    pub fn new(prefix: &str) -> Self {
        let prefix = prefix.replace(|c: char| !c.is_ascii_alphanumeric() && c != '_', "_");
        let dir = TempDir::new(&prefix).unwrap_or_else(|err| panic!("Failed to create temporary directory '{prefix}': {err}"));
        Self { dir }
    }

    /// Root directory of the tree
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Writes a file at the given root-relative path and creates the parent directories.
    pub fn add_file(&self, relative_path: impl AsRef<Path>, content: &str) -> PathBuf {
        let path = self.root().join(relative_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap_or_else(|err| panic!("Failed to create directory \"{}\": {err}", parent.display()));
        }
        fs::write(&path, content).unwrap_or_else(|err| panic!("Failed to write file \"{}\": {err}", path.display()));
        path
    }

    /// Creates an empty directory at the given root-relative path.
    pub fn add_dir(&self, relative_path: impl AsRef<Path>) -> PathBuf {
        let path = self.root().join(relative_path);
        fs::create_dir_all(&path).unwrap_or_else(|err| panic!("Failed to create directory \"{}\": {err}", path.display()));
        path
    }
}
