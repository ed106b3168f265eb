//! [`TestWorkspace`] builder for workspace configuration scenarios.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary directory that may be turned into a workspace by writing
/// metadata and profile records directly, bypassing the code under test.
///
/// # Example
///
/// ```rust,no_run
/// use wsconf_test_utils::TestWorkspace;
///
/// let ws = TestWorkspace::new();
/// ws.write_record("default", "build_space = \"/custom/build\"\n");
/// ws.assert_file_exists(".wsconf/profiles/default/config.toml");
/// ```
pub struct TestWorkspace {
    _temp_dir: TempDir,
    root: PathBuf,
}

impl Default for TestWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorkspace {
    /// Create an empty temporary directory.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        // resolve /tmp symlinks (macOS) so paths compare equal to resolved ones
        let root = dunce::canonicalize(temp_dir.path()).unwrap();
        Self {
            _temp_dir: temp_dir,
            root,
        }
    }

    /// Canonical root path of the temporary directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Root as a forward-slash string, matching resolved path output.
    pub fn root_str(&self) -> String {
        self.root.to_string_lossy().replace('\\', "/")
    }

    /// Absolute path of `rel` under the root (not created).
    pub fn path(&self, rel: &str) -> PathBuf {
        self.root.join(rel)
    }

    /// Create `rel` (and parents) under the root and return its path.
    pub fn mkdir(&self, rel: &str) -> PathBuf {
        let path = self.path(rel);
        fs::create_dir_all(&path).unwrap();
        path
    }

    /// Create the `.wsconf` metadata marker without any profile.
    pub fn init_marker(&self) {
        self.mkdir(".wsconf");
    }

    /// Write raw TOML as the record of `profile`, creating the marker.
    pub fn write_record(&self, profile: &str, toml: &str) {
        let dir = self.mkdir(&format!(".wsconf/profiles/{profile}"));
        fs::write(dir.join("config.toml"), toml).unwrap();
    }

    /// Read the raw record of `profile`.
    pub fn read_record(&self, profile: &str) -> String {
        fs::read_to_string(self.path(&format!(".wsconf/profiles/{profile}/config.toml")))
            .unwrap()
    }

    /// Mark `profile` as the active profile.
    pub fn set_active(&self, profile: &str) {
        let dir = self.mkdir(".wsconf/profiles");
        fs::write(
            dir.join("profiles.toml"),
            format!("active = \"{profile}\"\n"),
        )
        .unwrap();
    }

    /// Assert that `path` (relative to the root) exists.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path does not exist.
    pub fn assert_file_exists(&self, path: &str) {
        let full_path = self.path(path);
        assert!(
            full_path.exists(),
            "Expected file to exist: {}",
            full_path.display()
        );
    }

    /// Assert that `path` (relative to the root) does **not** exist.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path exists.
    pub fn assert_file_not_exists(&self, path: &str) {
        let full_path = self.path(path);
        assert!(
            !full_path.exists(),
            "Expected file NOT to exist: {}",
            full_path.display()
        );
    }
}
