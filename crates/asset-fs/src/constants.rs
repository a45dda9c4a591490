//! Well-known files at the project root.

use std::path::Path;

/// Files asset-sync keeps next to the project it manages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetPath {
    /// Live ledger mapping local paths to remote assets
    Ledger,
    /// Records whose local file disappeared, pending purge
    TrashLedger,
    /// Project configuration
    Config,
}

impl AssetPath {
    /// Get the string representation of the path.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ledger => ".asset-sync.ledger",
            Self::TrashLedger => ".asset-sync.ledger.trash",
            Self::Config => "asset-sync.toml",
        }
    }
}

impl AsRef<Path> for AssetPath {
    fn as_ref(&self) -> &Path {
        Path::new(self.as_str())
    }
}

impl AsRef<str> for AssetPath {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for AssetPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
