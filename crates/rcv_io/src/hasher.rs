//! crates/rcv_io/src/hasher.rs
//!
//! SHA-256 helpers and the result fingerprint.
//!
//! `result_id = "RES:" + sha256(canonical JSON of the result with timestamp
//! and id cleared)`. Identical inputs give identical ids on every platform.
//! Hex digests are lowercase.

use rcv_core::{ElectionResult, ResultId};
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::canonical_json::to_canonical_bytes;
use crate::{IoError, IoResult};

/// SHA-256 over raw bytes, lowercase hex.
pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// SHA-256 over the canonical JSON bytes of any serializable value.
pub fn sha256_canonical<T: Serialize>(value: &T) -> IoResult<String> {
    Ok(sha256_hex(&to_canonical_bytes(value)?))
}

/// Fingerprint of a result's content (engine stamps are ignored).
pub fn result_id_for(result: &ElectionResult) -> IoResult<ResultId> {
    let hex64 = sha256_canonical(&result.without_stamp())?;
    ResultId::from_hex(&hex64).map_err(|e| IoError::Hash(e.to_string()))
}
