//! Determinism utilities: stable ordering over candidate declaration order.
//!
//! This module is **I/O-free**. Tallies are keyed in `BTreeMap`s (lexicographic),
//! but every list a caller sees (eliminated, elected, seat order) follows the
//! order candidates were declared in the submission.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use crate::ids::CandidateId;

/// Candidates from `declared` that are members of `subset`, in declaration order.
pub fn in_declaration_order(
    declared: &[CandidateId],
    subset: &BTreeSet<CandidateId>,
) -> Vec<CandidateId> {
    declared
        .iter()
        .filter(|c| subset.contains(*c))
        .cloned()
        .collect()
}

/// Sort `(candidate, score)` pairs by descending score.
/// Equal scores keep declaration order (stable sort over `declared`).
pub fn sort_by_score_desc<V>(
    declared: &[CandidateId],
    scores: &BTreeMap<CandidateId, V>,
) -> Vec<(CandidateId, V)>
where
    V: Copy + PartialOrd + Default,
{
    let mut out: Vec<(CandidateId, V)> = declared
        .iter()
        .map(|c| (c.clone(), scores.get(c).copied().unwrap_or_default()))
        .collect();
    out.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    out
}

/* ---------------------------------- Tests --------------------------------- */
