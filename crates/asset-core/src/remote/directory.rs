//! Store backed by a local directory
//!
//! Objects live at `<root>/<identity>.<format>`. Identities may contain `/`
//! and map onto subdirectories; any other non-normal path component is
//! rejected so an identity can never escape the root.

use std::fs;
use std::path::{Component, Path, PathBuf};

use asset_fs::{NormalizedPath, io};
use chrono::Utc;

use super::{DestroyOutcome, RemoteAsset, RemoteStore, UploadOptions, UploadRequest};
use crate::{Error, Result};

/// Remote store that writes assets into a directory tree.
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    root: PathBuf,
}

impl DirectoryStore {
    /// Open a store rooted at `root`, creating the directory if needed.
    pub fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root).map_err(|e| asset_fs::Error::io(&root, e))?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the object for `identity` and `format`.
    pub fn object_path(&self, identity: &str, format: Option<&str>) -> Result<PathBuf> {
        let base = self.identity_path(identity, "lookup")?;
        Ok(match format {
            Some(ext) if !ext.is_empty() => {
                let mut name = base.as_os_str().to_owned();
                name.push(".");
                name.push(ext);
                PathBuf::from(name)
            }
            _ => base,
        })
    }

    fn identity_path(&self, identity: &str, operation: &'static str) -> Result<PathBuf> {
        if identity.is_empty() {
            return Err(Error::remote(operation, identity, "empty identity"));
        }
        let relative = Path::new(identity);
        if !relative
            .components()
            .all(|component| matches!(component, Component::Normal(_)))
        {
            return Err(Error::remote(
                operation,
                identity,
                "identity contains unsafe path components",
            ));
        }
        Ok(self.root.join(relative))
    }

    /// Files in the identity's directory named `<stem>` or `<stem>.<ext>`.
    fn stored_files(&self, identity: &str) -> Result<Vec<PathBuf>> {
        let base = self.identity_path(identity, "destroy")?;
        let (Some(dir), Some(stem)) = (base.parent(), base.file_name()) else {
            return Ok(Vec::new());
        };
        let stem = stem.to_string_lossy();

        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(asset_fs::Error::io(dir, e).into()),
        };

        let mut matches = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| asset_fs::Error::io(dir, e))?;
            let name = entry.file_name();
            let name = name.to_string_lossy();
            let same_stem = name == stem
                || name
                    .strip_prefix(stem.as_ref())
                    .is_some_and(|rest| rest.starts_with('.') && !rest[1..].contains('.'));
            if same_stem && entry.path().is_file() {
                matches.push(entry.path());
            }
        }
        Ok(matches)
    }
}

impl RemoteStore for DirectoryStore {
    fn upload(&self, request: &UploadRequest<'_>) -> Result<RemoteAsset> {
        let path = self.object_path(request.identity, request.format)?;
        io::write_atomic(&NormalizedPath::new(&path), request.content)?;

        tracing::debug!(
            identity = request.identity,
            path = %path.display(),
            bytes = request.content.len(),
            "stored asset"
        );

        Ok(RemoteAsset {
            identity: request.identity.to_string(),
            version: Utc::now().timestamp().to_string(),
            width: None,
            height: None,
        })
    }

    fn destroy(&self, identity: &str, _options: &UploadOptions) -> Result<DestroyOutcome> {
        let files = self.stored_files(identity)?;
        if files.is_empty() {
            return Ok(DestroyOutcome::NotFound);
        }
        for file in files {
            io::remove_file_if_exists(&NormalizedPath::new(&file))?;
        }
        Ok(DestroyOutcome::Destroyed)
    }
}
