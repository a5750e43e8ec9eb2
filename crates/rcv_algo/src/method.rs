//! crates/rcv_algo/src/method.rs
//! `VotingMethod`: the seam the engine dispatches through.

use rcv_core::{Ballot, CandidateId, ElectionResult};

use crate::tabulation::{borda, ranked_irv, ranked_stv};
use crate::validate::{validate_submission, Validation};

/// A pluggable tabulation method.
///
/// `tabulate` expects input that `validate` accepted; it never fails; a tie
/// is an explicit result.
pub trait VotingMethod: Send + Sync {
    /// Registry key, e.g. `"irv"`.
    fn name(&self) -> &'static str;

    fn validate(&self, candidates: &[CandidateId], ballots: &[Ballot]) -> Validation {
        validate_submission(candidates, ballots)
    }

    fn tabulate(&self, candidates: &[CandidateId], ballots: &[Ballot], seats: u32) -> ElectionResult;
}

/// Instant-runoff for one seat, single transferable vote for more.
#[derive(Clone, Copy, Debug, Default)]
pub struct IrvMethod;

impl VotingMethod for IrvMethod {
    fn name(&self) -> &'static str {
        ranked_irv::METHOD_NAME
    }

    fn tabulate(&self, candidates: &[CandidateId], ballots: &[Ballot], seats: u32) -> ElectionResult {
        if seats <= 1 {
            ranked_irv::tabulate_irv(candidates, ballots)
        } else {
            ranked_stv::tabulate_stv(candidates, ballots, seats)
        }
    }
}

/// Positional scoring over the full candidate field.
#[derive(Clone, Copy, Debug, Default)]
pub struct BordaMethod;

impl VotingMethod for BordaMethod {
    fn name(&self) -> &'static str {
        borda::METHOD_NAME
    }

    fn tabulate(&self, candidates: &[CandidateId], ballots: &[Ballot], seats: u32) -> ElectionResult {
        borda::tabulate_borda(candidates, ballots, seats)
    }
}
