//! In-process store that records every call

use std::collections::{BTreeMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::{DestroyOutcome, RemoteAsset, RemoteStore, UploadOptions, UploadRequest};
use crate::{Error, Result};

/// An object held by [`MemoryStore`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub content: Vec<u8>,
    pub format: Option<String>,
    pub version: String,
    pub options: UploadOptions,
}

#[derive(Debug, Default)]
struct State {
    objects: BTreeMap<String, StoredObject>,
    uploads: Vec<String>,
    destroys: Vec<String>,
    failing: HashSet<String>,
    dimensions: Option<(u32, u32)>,
    next_version: u64,
}

/// Store kept entirely in memory.
///
/// Clones share state, so a caller can hand one clone to the sync engine
/// and inspect the recorded calls through another.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<State>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report these dimensions for every subsequent upload.
    pub fn with_dimensions(self, width: u32, height: u32) -> Self {
        self.lock().dimensions = Some((width, height));
        self
    }

    /// Make uploads of `identity` fail with a remote error.
    pub fn fail_upload_for(&self, identity: impl Into<String>) {
        self.lock().failing.insert(identity.into());
    }

    pub fn upload_count(&self) -> usize {
        self.lock().uploads.len()
    }

    pub fn destroy_count(&self) -> usize {
        self.lock().destroys.len()
    }

    /// Identities passed to `upload`, in call order.
    pub fn uploaded(&self) -> Vec<String> {
        self.lock().uploads.clone()
    }

    /// Identities passed to `destroy`, in call order.
    pub fn destroyed(&self) -> Vec<String> {
        self.lock().destroys.clone()
    }

    pub fn contains(&self, identity: &str) -> bool {
        self.lock().objects.contains_key(identity)
    }

    pub fn object(&self, identity: &str) -> Option<StoredObject> {
        self.lock().objects.get(identity).cloned()
    }

    /// Identities currently held.
    pub fn identities(&self) -> Vec<String> {
        self.lock().objects.keys().cloned().collect()
    }

    /// Forget recorded calls but keep stored objects.
    pub fn reset_counters(&self) {
        let mut state = self.lock();
        state.uploads.clear();
        state.destroys.clear();
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl RemoteStore for MemoryStore {
    fn upload(&self, request: &UploadRequest<'_>) -> Result<RemoteAsset> {
        let mut state = self.lock();
        state.uploads.push(request.identity.to_string());

        if state.failing.contains(request.identity) {
            return Err(Error::remote("upload", request.identity, "injected failure"));
        }

        state.next_version += 1;
        let version = state.next_version.to_string();
        state.objects.insert(
            request.identity.to_string(),
            StoredObject {
                content: request.content.to_vec(),
                format: request.format.map(str::to_string),
                version: version.clone(),
                options: request.options.clone(),
            },
        );

        Ok(RemoteAsset {
            identity: request.identity.to_string(),
            version,
            width: state.dimensions.map(|(w, _)| w),
            height: state.dimensions.map(|(_, h)| h),
        })
    }

    fn destroy(&self, identity: &str, _options: &UploadOptions) -> Result<DestroyOutcome> {
        let mut state = self.lock();
        state.destroys.push(identity.to_string());

        Ok(match state.objects.remove(identity) {
            Some(_) => DestroyOutcome::Destroyed,
            None => DestroyOutcome::NotFound,
        })
    }
}
