//! Remote asset store interface
//!
//! The sync engine only needs two operations from a store: upload content
//! under a caller-chosen identity, and destroy an identity. Transport and
//! authentication live behind this trait.

mod directory;
mod memory;

pub use directory::DirectoryStore;
pub use memory::{MemoryStore, StoredObject};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::Result;

/// Free-form options forwarded to the store with every call.
pub type UploadOptions = Map<String, Value>;

/// A single upload call.
#[derive(Debug, Clone, Copy)]
pub struct UploadRequest<'a> {
    /// Raw file content
    pub content: &'a [u8],
    /// Identity the asset must be stored under
    pub identity: &'a str,
    /// File extension without the dot, if the file has one
    pub format: Option<&'a str>,
    /// Project-relative path of the source file
    pub original_filename: &'a str,
    pub options: &'a UploadOptions,
}

/// Metadata returned by the store after a successful upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteAsset {
    pub identity: String,
    /// Opaque version tag, kept for record-keeping only
    pub version: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

/// Result of a destroy call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DestroyOutcome {
    Destroyed,
    /// The store had nothing under that identity
    NotFound,
}

/// A content-addressed remote asset store.
pub trait RemoteStore {
    /// Store `request.content` under `request.identity`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Remote`] if the store rejects the upload.
    fn upload(&self, request: &UploadRequest<'_>) -> Result<RemoteAsset>;

    /// Delete the asset stored under `identity`.
    fn destroy(&self, identity: &str, options: &UploadOptions) -> Result<DestroyOutcome>;
}

impl<S: RemoteStore + ?Sized> RemoteStore for Box<S> {
    fn upload(&self, request: &UploadRequest<'_>) -> Result<RemoteAsset> {
        (**self).upload(request)
    }

    fn destroy(&self, identity: &str, options: &UploadOptions) -> Result<DestroyOutcome> {
        (**self).destroy(identity, options)
    }
}
