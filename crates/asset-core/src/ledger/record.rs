//! A single ledger entry and its line encoding

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::remote::RemoteAsset;

/// Number of tab-separated fields in a complete ledger line.
pub const FIELD_COUNT: usize = 6;

/// Minimum fields a line may carry; version, width and height may be absent.
const MIN_FIELD_COUNT: usize = 3;

/// What the ledger remembers about one uploaded asset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetRecord {
    /// Project-relative path of the local file; unique within a ledger
    pub local_key: String,
    /// Identity the asset is stored under remotely
    pub remote_identity: String,
    /// When this entry was last written
    pub uploaded_at: DateTime<Utc>,
    /// Version tag reported by the store
    pub remote_version: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl AssetRecord {
    /// Build a record from a fresh upload response.
    pub fn from_upload(
        local_key: impl Into<String>,
        asset: &RemoteAsset,
        uploaded_at: DateTime<Utc>,
    ) -> Self {
        Self {
            local_key: local_key.into(),
            remote_identity: asset.identity.clone(),
            uploaded_at,
            remote_version: asset.version.clone(),
            width: asset.width,
            height: asset.height,
        }
    }

    /// Copy this record forward with a refreshed timestamp.
    pub fn refreshed(&self, uploaded_at: DateTime<Utc>) -> Self {
        Self {
            uploaded_at,
            ..self.clone()
        }
    }

    /// Encode as a ledger line, including the trailing newline.
    pub fn to_line(&self) -> String {
        format!(
            "{}\t{}\t{}\t{}\t{}\t{}\n",
            self.local_key,
            self.remote_identity,
            self.uploaded_at.timestamp(),
            self.remote_version,
            optional_dimension(self.width),
            optional_dimension(self.height),
        )
    }

    /// Decode one ledger line (without its line terminator).
    pub fn parse_line(line: &str) -> Result<Self, String> {
        let fields: Vec<&str> = line.split('\t').collect();
        if !(MIN_FIELD_COUNT..=FIELD_COUNT).contains(&fields.len()) {
            return Err(format!(
                "expected {} to {} tab-separated fields, found {}",
                MIN_FIELD_COUNT,
                FIELD_COUNT,
                fields.len()
            ));
        }
        let field = |i: usize| fields.get(i).copied().unwrap_or("");

        let local_key = field(0);
        if local_key.is_empty() {
            return Err("empty path field".to_string());
        }
        let remote_identity = field(1);
        if remote_identity.is_empty() {
            return Err("empty identity field".to_string());
        }

        let seconds: i64 = field(2)
            .trim()
            .parse()
            .map_err(|_| format!("invalid timestamp {:?}", field(2)))?;
        let uploaded_at = DateTime::from_timestamp(seconds, 0)
            .ok_or_else(|| format!("timestamp {} out of range", seconds))?;

        Ok(Self {
            local_key: local_key.to_string(),
            remote_identity: remote_identity.to_string(),
            uploaded_at,
            remote_version: field(3).to_string(),
            width: parse_dimension("width", field(4))?,
            height: parse_dimension("height", field(5))?,
        })
    }
}

fn optional_dimension(value: Option<u32>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn parse_dimension(name: &str, raw: &str) -> Result<Option<u32>, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse()
        .map(Some)
        .map_err(|_| format!("invalid {} {:?}", name, raw))
}
