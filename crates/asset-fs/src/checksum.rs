//! Content fingerprints
//!
//! A fingerprint is the lowercase hex of the first 128 bits of the SHA-256
//! digest of the raw bytes. It is embedded in remote identities, so the
//! format must stay stable across releases.

use sha2::{Digest, Sha256};

/// Number of digest bytes kept in a fingerprint (32 hex characters).
const FINGERPRINT_BYTES: usize = 16;

/// Compute the fingerprint of raw content.
pub fn fingerprint(content: &[u8]) -> String {
    let digest = Sha256::digest(content);
    digest[..FINGERPRINT_BYTES]
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect()
}
