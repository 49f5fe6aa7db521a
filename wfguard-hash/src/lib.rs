//! SHA-256 helpers shared by the state builder and the contract generator.
//!
//! These are fingerprints for change detection. Nothing here is meant as an
//! integrity or authenticity control.

use sha2::{Digest, Sha256};

/// Prefix used for algorithm-tagged digests, e.g. `sha256:ab12...`.
pub const SHA256_PREFIX: &str = "sha256:";

/// Lowercase hex SHA-256 of `bytes`.
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// `sha256:`-prefixed hex digest of `bytes`.
pub fn tagged_sha256(bytes: &[u8]) -> String {
    format!("{SHA256_PREFIX}{}", sha256_hex(bytes))
}

/// The first `len` hex characters of the SHA-256 of `bytes`.
///
/// `len` is clamped to the full digest length (64).
pub fn short_fingerprint(bytes: &[u8], len: usize) -> String {
    let mut hex = sha256_hex(bytes);
    hex.truncate(len.min(hex.len()));
    hex
}
