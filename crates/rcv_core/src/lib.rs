//! rcv_core — Core types, ordering helpers, and display rounding.
//!
//! This crate is **I/O-free**. It defines stable types/APIs used across the
//! engine (`rcv_algo`, `rcv_io`, `rcv_pipeline`, `rcv_cli`).
//!
//! - Identifiers: `CandidateId` (opaque), `ResultId` (`RES:` + 64-hex)
//! - Inputs: `Ballot`, `ElectionConfig`
//! - Outputs: `Round`, `ElectionResult`
//! - Deterministic ordering helpers (declaration order, score order)
//! - Display rounding and the STV weight epsilon
//!
//! Serialization derives are gated behind the `serde` feature.

#![forbid(unsafe_code)]

pub mod determinism;
pub mod entities;
pub mod ids;
pub mod rounding;

pub use entities::{Ballot, ElectionConfig, ElectionResult, RankDistribution, Round, Tallies};
pub use ids::{CandidateId, IdError, ResultId};

/// Method names understood by the default engine.
pub mod methods {
    pub const IRV: &str = "irv";
    pub const BORDA: &str = "borda";
}
