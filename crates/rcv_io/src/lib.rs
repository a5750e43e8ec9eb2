//! crates/rcv_io/src/lib.rs
//! File boundary for the RCV engine.
//!
//! - `submission`: read an election file (JSON) into an `ElectionConfig`.
//! - `canonical_json`: sorted-key compact JSON bytes + atomic file writes.
//! - `hasher`: SHA-256 helpers and the `RES:` result fingerprint.
//!
//! Offline only: anything that looks like a URL is refused.

#![forbid(unsafe_code)]

use thiserror::Error;

/// Unified error for rcv_io.
#[derive(Debug, Error)]
pub enum IoError {
    /// Filesystem / path errors (read, create_dir_all, rename, fsync).
    #[error("io/path error: {0}")]
    Path(String),

    /// JSON parse/shape errors with a JSON Pointer to the offending field.
    #[error("json error at {pointer}: {msg}")]
    Json { pointer: String, msg: String },

    #[error("hash error: {0}")]
    Hash(String),

    /// Refused input (e.g. a URL where a local path was expected).
    #[error("invalid: {0}")]
    Invalid(String),
}

pub type IoResult<T> = Result<T, IoError>;

/* ---------------- From conversions (used by file modules) ---------------- */

impl From<std::io::Error> for IoError {
    fn from(e: std::io::Error) -> Self {
        IoError::Path(e.to_string())
    }
}

impl From<serde_json::Error> for IoError {
    fn from(e: serde_json::Error) -> Self {
        // serde_json keeps line/column, not a pointer; report at the root.
        IoError::Json {
            pointer: "/".to_string(),
            msg: e.to_string(),
        }
    }
}

pub mod canonical_json;
pub mod hasher;
pub mod submission;

/// Returns true if `s` looks like a URL (any `<scheme>://`, including `file://`).
#[inline]
pub fn looks_like_url_strict(s: &str) -> bool {
    s.trim().contains("://")
}
