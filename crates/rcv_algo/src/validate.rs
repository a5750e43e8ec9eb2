//! crates/rcv_algo/src/validate.rs
//! Structural validation of a candidate/ballot submission, shared by every method.
//! Never short-circuits: every finding across every ballot is collected.

use std::collections::BTreeSet;
use std::fmt;

use rcv_core::{Ballot, CandidateId};

/// Which top-level list an `InvalidInput` finding refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputList {
    Candidates,
    Ballots,
}

/// One validation finding. Ballot numbers are 1-based.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BallotIssue {
    /// Candidate or ballot list is empty or not a list.
    InvalidInput(InputList),
    /// A ballot is empty or not a list of identifiers.
    MalformedBallot { ballot: usize },
    UnknownCandidate { ballot: usize, candidate: CandidateId },
    DuplicateRanking { ballot: usize, candidate: CandidateId },
}

impl BallotIssue {
    /// Stable code for the taxonomy entry (handy for callers that branch on kind).
    pub fn code(&self) -> &'static str {
        match self {
            BallotIssue::InvalidInput(_) => "InvalidInput",
            BallotIssue::MalformedBallot { .. } => "MalformedBallot",
            BallotIssue::UnknownCandidate { .. } => "UnknownCandidate",
            BallotIssue::DuplicateRanking { .. } => "DuplicateRanking",
        }
    }
}

impl fmt::Display for BallotIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BallotIssue::InvalidInput(InputList::Candidates) => {
                f.write_str("Candidates list must be a non-empty array")
            }
            BallotIssue::InvalidInput(InputList::Ballots) => {
                f.write_str("Ballots list must be a non-empty array")
            }
            BallotIssue::MalformedBallot { ballot } => {
                write!(f, "Ballot {ballot}: must be a non-empty array")
            }
            BallotIssue::UnknownCandidate { ballot, candidate } => {
                write!(f, "Ballot {ballot}: unknown candidate \"{candidate}\"")
            }
            BallotIssue::DuplicateRanking { ballot, candidate } => {
                write!(f, "Ballot {ballot}: duplicate ranking for \"{candidate}\"")
            }
        }
    }
}

/// Validity flag plus every finding, in discovery order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Validation {
    pub valid: bool,
    pub issues: Vec<BallotIssue>,
}

impl Validation {
    pub fn from_issues(issues: Vec<BallotIssue>) -> Self {
        Self {
            valid: issues.is_empty(),
            issues,
        }
    }

    /// Human-readable messages, one per finding.
    pub fn errors(&self) -> Vec<String> {
        self.issues.iter().map(ToString::to_string).collect()
    }
}

/// Validate a submission.
///
/// An empty candidate or ballot list is reported and stops per-ballot checks,
/// since membership cannot be judged without both lists.
pub fn validate_submission(candidates: &[CandidateId], ballots: &[Ballot]) -> Validation {
    let mut issues = Vec::new();

    if candidates.is_empty() {
        issues.push(BallotIssue::InvalidInput(InputList::Candidates));
    }
    if ballots.is_empty() {
        issues.push(BallotIssue::InvalidInput(InputList::Ballots));
    }
    if !issues.is_empty() {
        return Validation::from_issues(issues);
    }

    let known: BTreeSet<&CandidateId> = candidates.iter().collect();

    for (i, ballot) in ballots.iter().enumerate() {
        issues.extend(check_ballot(i + 1, ballot, &known));
    }

    Validation::from_issues(issues)
}

fn check_ballot(number: usize, ballot: &Ballot, known: &BTreeSet<&CandidateId>) -> Vec<BallotIssue> {
    if ballot.is_empty() {
        return vec![BallotIssue::MalformedBallot { ballot: number }];
    }

    let mut issues = Vec::new();
    let mut seen: BTreeSet<&CandidateId> = BTreeSet::new();
    for choice in ballot.ranking() {
        if !known.contains(choice) {
            issues.push(BallotIssue::UnknownCandidate {
                ballot: number,
                candidate: choice.clone(),
            });
        }
        if !seen.insert(choice) {
            issues.push(BallotIssue::DuplicateRanking {
                ballot: number,
                candidate: choice.clone(),
            });
        }
    }
    issues
}
