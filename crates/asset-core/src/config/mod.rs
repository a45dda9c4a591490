//! Sync configuration
//!
//! Configuration is read from `asset-sync.toml` at the project root and passed
//! explicitly to the discoverer and the sync engine. Every field has a
//! default, so a missing file or a partial file is valid.
//!
//! ```toml
//! static_image_dirs = ["app/assets/images", "public/images"]
//! ignore_files = [".git", ".svn", "/^\\.htaccess/"]
//! delete_missing = false
//!
//! [upload]
//! folder = "static"
//!
//! [store]
//! directory = "/var/lib/asset-store"
//! ```

mod ignore;

pub use ignore::{IgnoreRule, is_ignored};

use asset_fs::{AssetPath, ConfigStore, NormalizedPath};
use serde::{Deserialize, Serialize};

use crate::Result;
use crate::remote::UploadOptions;

/// Asset roots scanned when none are configured.
pub const DEFAULT_STATIC_IMAGE_DIRS: &[&str] = &["app/assets/images", "public/images"];

/// Base names skipped when no ignore rules are configured.
pub const DEFAULT_IGNORE_FILES: &[&str] = &[".svn", "CVS", "RCS", ".git", ".hg"];

/// Pattern rule added to the defaults for server config files.
pub const DEFAULT_IGNORE_PATTERN: &str = r"^\.htaccess";

/// Location of the remote store used by the command-line tool
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSection {
    /// Directory backing a [`crate::remote::DirectoryStore`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory: Option<String>,
}

/// Configuration for discovery and reconciliation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Base names (or `/regex/` patterns) pruned during discovery
    pub ignore_files: Vec<IgnoreRule>,

    /// Asset roots, relative to the project root
    pub static_image_dirs: Vec<String>,

    /// Purge trash candidates instead of recording them
    pub delete_missing: bool,

    /// Options forwarded verbatim to every upload and destroy call
    pub upload: UploadOptions,

    pub store: StoreSection,
}

impl Default for SyncConfig {
    fn default() -> Self {
        let mut ignore_files: Vec<IgnoreRule> = DEFAULT_IGNORE_FILES
            .iter()
            .map(|name| IgnoreRule::exact(*name))
            .collect();
        if let Ok(rule) = IgnoreRule::pattern(DEFAULT_IGNORE_PATTERN) {
            ignore_files.push(rule);
        }

        Self {
            ignore_files,
            static_image_dirs: DEFAULT_STATIC_IMAGE_DIRS
                .iter()
                .map(|dir| dir.to_string())
                .collect(),
            delete_missing: false,
            upload: UploadOptions::new(),
            store: StoreSection::default(),
        }
    }
}

impl SyncConfig {
    /// Path of the configuration file for a project root.
    pub fn path(root: &NormalizedPath) -> NormalizedPath {
        root.join(AssetPath::Config.as_str())
    }

    /// Load the project configuration, or defaults if the file is absent.
    pub fn load(root: &NormalizedPath) -> Result<Self> {
        let config = ConfigStore::new().load_or_default(&Self::path(root))?;
        Ok(config)
    }

    /// Write this configuration to the project's config file.
    pub fn save(&self, root: &NormalizedPath) -> Result<()> {
        ConfigStore::new().save(&Self::path(root), self)?;
        Ok(())
    }

    /// Parse configuration from TOML content.
    pub fn parse(content: &str) -> Result<Self> {
        let config: SyncConfig = toml::from_str(content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_vcs_dirs_and_htaccess() {
        let config = SyncConfig::default();
        assert!(is_ignored(&config.ignore_files, ".git"));
        assert!(is_ignored(&config.ignore_files, "CVS"));
        assert!(is_ignored(&config.ignore_files, ".htaccess"));
        assert!(!is_ignored(&config.ignore_files, "logo.png"));
        assert_eq!(
            config.static_image_dirs,
            vec!["app/assets/images".to_string(), "public/images".to_string()]
        );
        assert!(!config.delete_missing);
    }

    #[test]
    fn empty_document_yields_defaults() {
        assert_eq!(SyncConfig::parse("").unwrap(), SyncConfig::default());
    }

    #[test]
    fn partial_document_keeps_other_defaults() {
        let config = SyncConfig::parse("delete_missing = true\n").unwrap();
        assert!(config.delete_missing);
        assert_eq!(config.ignore_files, SyncConfig::default().ignore_files);
    }

    #[test]
    fn upload_table_is_passed_through() {
        let config = SyncConfig::parse(
            r#"
[upload]
folder = "static"
invalidate = true
"#,
        )
        .unwrap();
        assert_eq!(config.upload["folder"], "static");
        assert_eq!(config.upload["invalidate"], true);
    }

    #[test]
    fn invalid_ignore_pattern_fails_to_parse() {
        assert!(SyncConfig::parse("ignore_files = [\"/([/\"]\n").is_err());
    }
}
