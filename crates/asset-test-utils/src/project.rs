//! Temporary project trees with asset roots.
//!
//! All helpers panic on filesystem errors; they are only meant for tests.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Write `content` to `root/relative`, creating parent directories.
///
/// # Panics
/// Panics if the filesystem operations fail.
pub fn write_file(root: &Path, relative: &str, content: &[u8]) -> PathBuf {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .unwrap_or_else(|e| panic!("write_file: failed to create {}: {e}", parent.display()));
    }
    fs::write(&path, content)
        .unwrap_or_else(|e| panic!("write_file: failed to write {}: {e}", path.display()));
    path
}

/// A project root in a temporary directory, removed on drop.
pub struct AssetProject {
    dir: TempDir,
}

impl AssetProject {
    /// An empty project.
    ///
    /// # Panics
    /// Panics if the temporary directory cannot be created.
    pub fn new() -> Self {
        let dir = TempDir::new()
            .unwrap_or_else(|e| panic!("AssetProject::new: failed to create temp dir: {e}"));
        Self { dir }
    }

    /// A project with `public/images/a.png` and `public/images/b.png`.
    pub fn with_two_images() -> Self {
        let project = Self::new();
        project.write("public/images/a.png", b"X");
        project.write("public/images/b.png", b"Y");
        project
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.root().join(relative)
    }

    pub fn write(&self, relative: &str, content: &[u8]) -> PathBuf {
        write_file(self.root(), relative, content)
    }

    /// # Panics
    /// Panics if the file cannot be removed.
    pub fn remove(&self, relative: &str) {
        let path = self.path(relative);
        fs::remove_file(&path)
            .unwrap_or_else(|e| panic!("remove: failed to remove {}: {e}", path.display()));
    }

    /// # Panics
    /// Panics if the file cannot be moved.
    pub fn rename(&self, from: &str, to: &str) {
        let target = self.path(to);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)
                .unwrap_or_else(|e| panic!("rename: failed to create {}: {e}", parent.display()));
        }
        fs::rename(self.path(from), &target)
            .unwrap_or_else(|e| panic!("rename: failed to move {from} to {to}: {e}"));
    }

    /// Contents of a text file, or an empty string if it does not exist.
    pub fn read_or_empty(&self, relative: &str) -> String {
        fs::read_to_string(self.path(relative)).unwrap_or_default()
    }

    pub fn exists(&self, relative: &str) -> bool {
        self.path(relative).exists()
    }
}

impl Default for AssetProject {
    fn default() -> Self {
        Self::new()
    }
}
