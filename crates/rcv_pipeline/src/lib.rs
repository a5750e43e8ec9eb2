//! rcv_pipeline — election orchestration (lookup → validate → tabulate → annotate).
//! I/O-free apart from the result fingerprint, which is delegated to `rcv_io`;
//! all tabulation lives in `rcv_algo`.

#![forbid(unsafe_code)]

use thiserror::Error;

pub mod engine;

pub use engine::{create_engine, ElectionEngine, EngineOptions};

// Callers usually need these alongside the engine.
pub use rcv_algo::{BallotIssue, BordaMethod, IrvMethod, Validation, VotingMethod};
pub use rcv_core::{Ballot, CandidateId, ElectionConfig, ElectionResult, Round};

/// Message reported when a config asks for zero seats.
pub const SEATS_MESSAGE: &str = "seats must be at least 1";

/// Single error surface for the engine.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Unknown voting method: \"{method}\". Available: {}", .available.join(", "))]
    UnknownMethod { method: String, available: Vec<String> },

    #[error("Ballot validation failed:\n{}", .errors.join("\n"))]
    ValidationFailed { errors: Vec<String> },

    /// Result fingerprinting failed.
    #[error(transparent)]
    Io(#[from] rcv_io::IoError),
}
