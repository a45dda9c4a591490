//! SyncEngine implementation
//!
//! One run of [`SyncEngine::sync`]:
//!
//! 1. load the live ledger and the trash ledger
//! 2. for every discovered file (first occurrence of each local key only),
//!    fingerprint the content and upload it unless the ledger already holds
//!    the same remote identity for that key
//! 3. rewrite the live ledger with every discovered file
//! 4. collect trash candidates: ledger entries not seen this run, plus trash
//!    entries whose identity was not rediscovered
//! 5. either destroy every candidate and delete the trash file, or write the
//!    candidates to the trash file
//!
//! The live ledger is written once, after every upload has succeeded. A
//! failure part-way through leaves both ledger files untouched; assets
//! uploaded before the failure are uploaded again on the next run under the
//! same identity.

use std::collections::HashSet;
use std::path::PathBuf;

use asset_fs::{AssetPath, NormalizedPath, fingerprint, io};
use chrono::Utc;

use super::report::SyncReport;
use crate::config::SyncConfig;
use crate::discover::Discoverer;
use crate::ledger::{AssetRecord, Ledger, TrashLedger};
use crate::remote::{DestroyOutcome, RemoteStore, UploadRequest};
use crate::Result;

/// Options for a single sync run
#[derive(Debug, Clone, Default)]
pub struct SyncOptions {
    /// Destroy trash candidates instead of recording them in the trash ledger
    pub delete_missing: bool,
    /// Compute the plan without calling the store or writing ledgers.
    /// Actions are prefixed with "[dry-run] Would ..."
    pub dry_run: bool,
}

impl SyncOptions {
    /// Options taken from the project configuration.
    pub fn from_config(config: &SyncConfig) -> Self {
        Self {
            delete_missing: config.delete_missing,
            dry_run: false,
        }
    }
}

/// Identity an asset is stored under remotely.
///
/// The public path without its extension, a dash, and the content
/// fingerprint: `images/logo.png` with fingerprint `ab12` becomes
/// `images/logo-ab12`.
pub fn remote_identity(public_path: &NormalizedPath, fingerprint: &str) -> String {
    format!("{}-{}", public_path.without_extension(), fingerprint)
}

/// Reconciles a project's asset roots with a remote store
pub struct SyncEngine {
    root: NormalizedPath,
    config: SyncConfig,
    discoverer: Discoverer,
    store: Box<dyn RemoteStore>,
}

impl SyncEngine {
    /// Create a new SyncEngine
    ///
    /// # Arguments
    ///
    /// * `root` - The project root; ledger keys are relative to it
    /// * `config` - Asset roots, ignore rules and pass-through upload options
    /// * `store` - Where assets are uploaded to and destroyed from
    pub fn new(root: NormalizedPath, config: SyncConfig, store: Box<dyn RemoteStore>) -> Self {
        let discoverer = Discoverer::new(root.clone(), &config);
        Self {
            root,
            config,
            discoverer,
            store,
        }
    }

    pub fn root(&self) -> &NormalizedPath {
        &self.root
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    pub fn discoverer(&self) -> &Discoverer {
        &self.discoverer
    }

    /// Get the path to the live ledger file
    pub fn ledger_path(&self) -> PathBuf {
        self.root.join(AssetPath::Ledger.as_str()).to_native()
    }

    /// Get the path to the trash ledger file
    pub fn trash_path(&self) -> PathBuf {
        self.root.join(AssetPath::TrashLedger.as_str()).to_native()
    }

    /// Load the live ledger, or an empty one if it doesn't exist
    pub fn load_ledger(&self) -> Result<Ledger> {
        Ledger::load(&self.ledger_path())
    }

    /// Load the trash ledger, or an empty one if it doesn't exist
    pub fn load_trash(&self) -> Result<TrashLedger> {
        TrashLedger::load(&self.trash_path())
    }

    /// Run one reconciliation pass.
    ///
    /// A vanished ledger entry whose identity was rediscovered under another
    /// path in this run is dropped instead of trashed, so it is never
    /// destroyed while still in use.
    ///
    /// # Errors
    ///
    /// Any I/O, ledger-parse or remote error aborts the run. Errors raised
    /// before the live ledger is written leave both ledger files unchanged.
    pub fn sync(&self, options: &SyncOptions) -> Result<SyncReport> {
        let mut report = SyncReport::new(options.dry_run);
        let now = Utc::now();

        // Both ledgers are read up front so a malformed file fails the run
        // before anything is uploaded.
        let mut remaining = self.load_ledger()?;
        let trash = self.load_trash()?;

        let mut found_keys: HashSet<NormalizedPath> = HashSet::new();
        let mut found_identities: HashSet<String> = HashSet::new();
        let mut rebuilt = Ledger::new();

        for asset in self.discoverer.discover() {
            let asset = asset?;
            if !found_keys.insert(asset.local_key.clone()) {
                tracing::debug!(local_key = %asset.local_key, "already processed, skipping duplicate");
                continue;
            }

            let content = io::read_bytes(&asset.path)?;
            let identity = remote_identity(&asset.public_path, &fingerprint(&content));
            found_identities.insert(identity.clone());

            let local_key = asset.local_key.as_str();
            let previous = remaining.remove(local_key);

            let record = match previous {
                Some(previous) if previous.remote_identity == identity => {
                    tracing::debug!(local_key, identity = %identity, "unchanged");
                    report.unchanged.push(local_key.to_string());
                    previous.refreshed(now)
                }
                _ => {
                    report.action("Upload", format!("{} as {}", local_key, identity));
                    report.uploaded.push(identity.clone());
                    if options.dry_run {
                        continue;
                    }

                    let uploaded = self.store.upload(&UploadRequest {
                        content: &content,
                        identity: &identity,
                        format: asset.format(),
                        original_filename: local_key,
                        options: &self.config.upload,
                    })?;
                    tracing::info!(
                        local_key,
                        identity = %uploaded.identity,
                        version = %uploaded.version,
                        "uploaded asset"
                    );
                    AssetRecord::from_upload(local_key, &uploaded, now)
                }
            };
            rebuilt.insert(record);
        }

        if !options.dry_run {
            rebuilt.save(&self.ledger_path())?;
            tracing::debug!(entries = rebuilt.len(), "wrote ledger");
        }

        let candidates = self.trash_candidates(remaining, trash, &found_identities, &mut report);

        if options.delete_missing {
            self.purge(candidates, &mut report)?;
        } else {
            self.record_trash(candidates, &mut report)?;
        }

        Ok(report)
    }

    /// Ledger entries not rediscovered, followed by trash entries whose
    /// identity did not reappear.
    ///
    /// An identity that is live in this run is never a candidate, even if
    /// the ledger entry it came from was keyed under a path that vanished.
    fn trash_candidates(
        &self,
        remaining: Ledger,
        trash: TrashLedger,
        found_identities: &HashSet<String>,
        report: &mut SyncReport,
    ) -> Vec<AssetRecord> {
        let mut candidates = Vec::new();

        for record in remaining.into_records() {
            if found_identities.contains(&record.remote_identity) {
                tracing::debug!(
                    local_key = %record.local_key,
                    identity = %record.remote_identity,
                    "path vanished but identity is still live"
                );
                continue;
            }
            tracing::info!(local_key = %record.local_key, identity = %record.remote_identity, "local file missing");
            candidates.push(record);
        }

        for record in trash.into_records() {
            if found_identities.contains(&record.remote_identity) {
                tracing::info!(identity = %record.remote_identity, "reclaimed from trash");
                report.action("Reclaim", record.remote_identity.clone());
                report.reclaimed.push(record.remote_identity);
            } else {
                candidates.push(record);
            }
        }

        candidates
    }

    /// Destroy every candidate, then drop the trash file.
    fn purge(&self, candidates: Vec<AssetRecord>, report: &mut SyncReport) -> Result<()> {
        for record in candidates {
            report.action("Destroy", record.remote_identity.clone());
            if !report.dry_run {
                match self
                    .store
                    .destroy(&record.remote_identity, &self.config.upload)?
                {
                    DestroyOutcome::Destroyed => {
                        tracing::info!(identity = %record.remote_identity, "destroyed asset");
                    }
                    DestroyOutcome::NotFound => {
                        tracing::warn!(identity = %record.remote_identity, "asset already absent from store");
                    }
                }
            }
            report.destroyed.push(record.remote_identity);
        }

        if !report.dry_run && TrashLedger::clear_file(&self.trash_path())? {
            tracing::debug!("removed trash ledger");
        }
        Ok(())
    }

    /// Overwrite the trash ledger with the candidates.
    fn record_trash(&self, candidates: Vec<AssetRecord>, report: &mut SyncReport) -> Result<()> {
        for record in &candidates {
            report.action(
                "Trash",
                format!("{} ({})", record.local_key, record.remote_identity),
            );
        }

        if !report.dry_run {
            let trash: TrashLedger = candidates.iter().cloned().collect();
            trash.save(&self.trash_path())?;
        }

        report.trashed = candidates;
        Ok(())
    }
}
