// crates/rcv_algo/src/lib.rs
#![forbid(unsafe_code)]

// Core types used throughout the algorithm layer
pub use rcv_core::{Ballot, CandidateId, ElectionResult, RankDistribution, Round, Tallies};

// ----------------------------- Validation -------------------------------------------

pub mod validate;
pub use validate::{validate_submission, BallotIssue, InputList, Validation};

// ----------------------------- Tabulation (public surface) ---------------------------

pub mod tabulation {
    // File modules (actual implementations)
    pub mod rank_distribution;
    pub mod borda;
    pub mod ranked_irv;
    pub mod ranked_stv;
    pub mod outcome;

    // Entry points; tabulators take validated input and never fail.
    pub use borda::{borda_points, borda_scores, tabulate_borda};
    pub use rank_distribution::rank_distribution;
    pub use ranked_irv::tabulate_irv;
    pub use ranked_stv::{droop_quota, tabulate_stv, transfer_factor, WeightedBallot};
}

pub use tabulation::{tabulate_borda, tabulate_irv, tabulate_stv};

// ----------------------------- Method dispatch ---------------------------------------

pub mod method;
pub use method::{BordaMethod, IrvMethod, VotingMethod};
