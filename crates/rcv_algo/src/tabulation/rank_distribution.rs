//! Rank distribution over the active candidate set.
//!
//! For each active candidate, `counts[i]` is the number of ballots whose
//! active-only ranking (inactive candidates removed first) places it at
//! position `i`. Reporting only; never feeds back into a decision.

use std::collections::BTreeSet;

use rcv_core::{Ballot, CandidateId, RankDistribution};

/// Compute the table for `active` over `ballots`. Each ballot counts once,
/// regardless of any STV weight it carries.
pub fn rank_distribution<'a, I>(active: &BTreeSet<CandidateId>, ballots: I) -> RankDistribution
where
    I: IntoIterator<Item = &'a Ballot>,
{
    let width = active.len();
    let mut table: RankDistribution = active
        .iter()
        .map(|c| (c.clone(), vec![0u64; width]))
        .collect();

    for ballot in ballots {
        for (position, candidate) in ballot.active_ranking(active).enumerate() {
            // Validated ballots carry no duplicates, so position < width always holds.
            if let Some(slot) = table.get_mut(candidate).and_then(|row| row.get_mut(position)) {
                *slot += 1;
            }
        }
    }
    table
}
