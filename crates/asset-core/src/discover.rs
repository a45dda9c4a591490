//! Asset discovery
//!
//! Walks each configured asset root and yields every regular file that is
//! not ignored. Ignore rules are applied to base names while directories are
//! read, so an ignored directory is never descended into.
//!
//! Files the ledger cannot represent are skipped with a warning: names that
//! are not valid UTF-8, and names containing a tab or a line break.

use std::iter;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use asset_fs::NormalizedPath;
use jwalk::{Parallelism, WalkDir};

use crate::config::{IgnoreRule, SyncConfig, is_ignored};
use crate::{Error, Result};

/// A file found under one of the asset roots
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredAsset {
    /// Path relative to the project root; the ledger key
    pub local_key: NormalizedPath,
    /// Path relative to the parent of the asset root it was found under
    pub public_path: NormalizedPath,
    /// Location on disk
    pub path: PathBuf,
}

impl DiscoveredAsset {
    /// File extension without the dot, if any.
    pub fn format(&self) -> Option<&str> {
        self.local_key.extension()
    }
}

#[derive(Debug, Clone)]
struct AssetRoot {
    dir: NormalizedPath,
    parent: NormalizedPath,
}

/// Walks the configured asset roots of a project.
#[derive(Debug, Clone)]
pub struct Discoverer {
    project_root: NormalizedPath,
    roots: Vec<String>,
    ignore: Arc<Vec<IgnoreRule>>,
}

impl Discoverer {
    pub fn new(project_root: NormalizedPath, config: &SyncConfig) -> Self {
        Self {
            project_root,
            roots: config.static_image_dirs.clone(),
            ignore: Arc::new(config.ignore_files.clone()),
        }
    }

    /// Lazily yield every eligible file across all roots, in walk order.
    ///
    /// Roots are visited in configuration order and entries within a
    /// directory in name order. Overlapping roots can yield the same
    /// `local_key` more than once; callers that need uniqueness must
    /// deduplicate.
    pub fn discover(&self) -> impl Iterator<Item = Result<DiscoveredAsset>> + '_ {
        self.existing_roots()
            .into_iter()
            .flat_map(move |root| self.walk_root(root))
    }

    fn existing_roots(&self) -> Vec<AssetRoot> {
        self.roots
            .iter()
            .filter_map(|dir| {
                // `./public/images` and `public/images` must produce the same keys
                let cleaned: PathBuf = Path::new(dir)
                    .components()
                    .filter(|component| !matches!(component, Component::CurDir))
                    .collect();
                let path = if cleaned.is_absolute() {
                    NormalizedPath::new(&cleaned)
                } else if cleaned.as_os_str().is_empty() {
                    self.project_root.clone()
                } else {
                    self.project_root.join(NormalizedPath::new(&cleaned).as_str())
                };
                if !path.is_dir() {
                    tracing::debug!(root = %path, "asset root does not exist, skipping");
                    return None;
                }
                let parent = path.parent().unwrap_or_else(|| self.project_root.clone());
                Some(AssetRoot { dir: path, parent })
            })
            .collect()
    }

    fn walk_root(&self, root: AssetRoot) -> Box<dyn Iterator<Item = Result<DiscoveredAsset>> + '_> {
        if root
            .dir
            .file_name()
            .is_some_and(|name| is_ignored(&self.ignore, name))
        {
            tracing::debug!(root = %root.dir, "asset root itself is ignored");
            return Box::new(iter::empty());
        }

        let rules = Arc::clone(&self.ignore);
        let walker = WalkDir::new(root.dir.to_native())
            .sort(true)
            .skip_hidden(false)
            .follow_links(false)
            .parallelism(Parallelism::Serial)
            .process_read_dir(move |_depth, _dir, _state, children| {
                children.retain(|child| match child {
                    Ok(entry) => !is_ignored(&rules, &entry.file_name().to_string_lossy()),
                    Err(_) => true,
                });
            });

        Box::new(walker.into_iter().filter_map(move |entry| {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    return Some(Err(Error::Walk {
                        root: root.dir.to_native(),
                        message: e.to_string(),
                    }));
                }
            };
            if entry.depth == 0 {
                return None;
            }

            let path = entry.path();
            if entry.file_type().is_dir() || path.is_dir() {
                return None;
            }

            if path.to_str().is_none() {
                tracing::warn!(path = %path.display(), "skipping file: name is not valid UTF-8");
                return None;
            }

            let normalized = NormalizedPath::new(&path);
            let local_key = normalized
                .strip_prefix(&self.project_root)
                .unwrap_or_else(|| normalized.clone());
            if local_key.as_str().contains(['\t', '\n', '\r']) {
                tracing::warn!(
                    local_key = ?local_key.as_str(),
                    "skipping file: name contains a tab or line break"
                );
                return None;
            }
            let public_path = normalized
                .strip_prefix(&root.parent)
                .unwrap_or_else(|| normalized.clone());

            tracing::debug!(local_key = %local_key, public_path = %public_path, "discovered asset");
            Some(Ok(DiscoveredAsset {
                local_key,
                public_path,
                path,
            }))
        }))
    }
}
