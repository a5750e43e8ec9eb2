// crates/rcv_algo/src/tabulation/ranked_irv.rs
//
// Single-winner instant-runoff tabulation.
//
// - Majority threshold per round: floor(continuing / 2) + 1.
// - Every candidate tied at the minimum tally is eliminated together.
// - A round where every active candidate has the same tally is an unresolved tie.
// - Exhausted ballots leave the working set permanently.

use std::collections::{BTreeMap, BTreeSet};

use rcv_core::determinism::in_declaration_order;
use rcv_core::{Ballot, CandidateId, ElectionResult, Round, Tallies};
use tracing::debug;

use super::outcome::{build_ranked_result, RankedOutcome};
use super::rank_distribution::rank_distribution;

pub const METHOD_NAME: &str = rcv_core::methods::IRV;

// ---- Round step -------------------------------------------------------------

/// One pass over the working ballots: first-active-choice counts plus the
/// ballots that still have an active choice.
#[derive(Debug)]
pub(crate) struct FirstChoiceCount<'b> {
    pub counts: BTreeMap<CandidateId, u64>,
    pub continuing: Vec<&'b Ballot>,
    pub newly_exhausted: u64,
}

pub(crate) fn count_first_choices<'b>(
    active: &BTreeSet<CandidateId>,
    working: Vec<&'b Ballot>,
) -> FirstChoiceCount<'b> {
    let mut counts: BTreeMap<CandidateId, u64> =
        active.iter().map(|c| (c.clone(), 0)).collect();
    let mut continuing = Vec::with_capacity(working.len());
    let mut newly_exhausted = 0u64;

    for ballot in working {
        match ballot.first_active(active).and_then(|c| counts.get_mut(c)) {
            Some(n) => {
                *n += 1;
                continuing.push(ballot);
            }
            None => newly_exhausted += 1,
        }
    }

    FirstChoiceCount {
        counts,
        continuing,
        newly_exhausted,
    }
}

#[inline]
pub(crate) fn majority_threshold(continuing: u64) -> u64 {
    continuing / 2 + 1
}

fn as_tallies(counts: &BTreeMap<CandidateId, u64>) -> Tallies {
    counts.iter().map(|(c, n)| (c.clone(), *n as f64)).collect()
}

// ---- Main loop --------------------------------------------------------------

/// Tabulate a single-winner IRV election. Ballots are assumed validated.
pub fn tabulate_irv(candidates: &[CandidateId], ballots: &[Ballot]) -> ElectionResult {
    let outcome = run_irv(candidates, ballots);
    build_ranked_result(METHOD_NAME, outcome, ballots.len(), candidates.len(), 1)
}

fn run_irv(candidates: &[CandidateId], ballots: &[Ballot]) -> RankedOutcome {
    let mut active: BTreeSet<CandidateId> = candidates.iter().cloned().collect();
    let mut working: Vec<&Ballot> = ballots.iter().collect();
    let mut rounds: Vec<Round> = Vec::new();
    let mut exhausted = 0u64;

    while active.len() > 1 {
        let step = count_first_choices(&active, working);
        exhausted += step.newly_exhausted;
        working = step.continuing;

        let total_active = working.len() as u64;
        let threshold = majority_threshold(total_active);
        let round_number = rounds.len() as u32 + 1;
        let mut round = Round {
            round_number,
            tallies: as_tallies(&step.counts),
            eliminated: None,
            elected: None,
            total_active_ballots: total_active,
            exhausted_ballots: exhausted,
            threshold: Some(threshold),
            rank_distribution: rank_distribution(&active, working.iter().copied()),
            seat: None,
            score: None,
        };

        // Majority check follows declaration order.
        let winner = candidates
            .iter()
            .find(|c| active.contains(*c) && step.counts.get(*c).copied().unwrap_or(0) >= threshold);
        if let Some(winner) = winner {
            debug!(round = round_number, %winner, threshold, "irv: majority reached");
            round.elected = Some(vec![winner.clone()]);
            rounds.push(round);
            return RankedOutcome {
                rounds,
                winners: vec![winner.clone()],
                is_tie: false,
                exhausted,
            };
        }

        let min = step.counts.values().copied().min().unwrap_or(0);
        let max = step.counts.values().copied().max().unwrap_or(0);
        if min == max {
            debug!(round = round_number, tally = min, "irv: all active candidates tied");
            rounds.push(round);
            return RankedOutcome {
                rounds,
                winners: Vec::new(),
                is_tie: true,
                exhausted,
            };
        }

        let lowest: BTreeSet<CandidateId> = step
            .counts
            .iter()
            .filter(|(_, n)| **n == min)
            .map(|(c, _)| c.clone())
            .collect();
        let eliminated = in_declaration_order(candidates, &lowest);
        debug!(round = round_number, ?eliminated, tally = min, "irv: eliminating");

        for c in &eliminated {
            active.remove(c);
        }
        round.eliminated = Some(eliminated);
        rounds.push(round);
    }

    let Some(last) = active.iter().next().cloned() else {
        // Only reachable with an empty candidate list.
        return RankedOutcome {
            rounds,
            winners: Vec::new(),
            is_tie: true,
            exhausted,
        };
    };

    // Final tally for the sole survivor; ballots ranking only eliminated
    // candidates exhaust here too.
    let step = count_first_choices(&active, working);
    exhausted += step.newly_exhausted;
    let total_active = step.continuing.len() as u64;
    rounds.push(Round {
        round_number: rounds.len() as u32 + 1,
        tallies: as_tallies(&step.counts),
        eliminated: None,
        elected: Some(vec![last.clone()]),
        total_active_ballots: total_active,
        exhausted_ballots: exhausted,
        threshold: Some(majority_threshold(total_active)),
        rank_distribution: rank_distribution(&active, step.continuing.iter().copied()),
        seat: None,
        score: None,
    });
    debug!(%last, "irv: last candidate standing");

    RankedOutcome {
        rounds,
        winners: vec![last],
        is_tie: false,
        exhausted,
    }
}

// ---- Tests ------------------------------------------------------------------
