//! Shared assembly of `ElectionResult` for the elimination methods (IRV/STV).

use rcv_core::{CandidateId, ElectionResult, Round};

/// What an elimination run produced, before it is wrapped into a result.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RankedOutcome {
    pub rounds: Vec<Round>,
    pub winners: Vec<CandidateId>,
    pub is_tie: bool,
    /// Cumulative exhausted-ballot count at the end of the run.
    pub exhausted: u64,
}

/// Wrap an elimination outcome into the public result shape.
/// Title and timestamp stay empty; the engine stamps them.
pub fn build_ranked_result(
    method: &str,
    outcome: RankedOutcome,
    total_ballots: usize,
    total_candidates: usize,
    seats: u32,
) -> ElectionResult {
    let summary = ranked_summary(&outcome);
    ElectionResult {
        method: method.to_string(),
        title: String::new(),
        seats,
        winners: outcome.winners,
        is_tie: outcome.is_tie,
        rounds: outcome.rounds,
        summary,
        total_ballots: total_ballots as u64,
        total_candidates: total_candidates as u64,
        exhausted_ballots: outcome.exhausted,
        scores: None,
        timestamp_utc: None,
        result_id: None,
    }
}

fn ranked_summary(outcome: &RankedOutcome) -> String {
    if outcome.is_tie {
        if outcome.winners.is_empty() {
            return "The election ended in a tie. No winner could be determined.".to_string();
        }
        return format!(
            "Partial result: {} elected. Remaining seats ended in a tie.",
            join(&outcome.winners)
        );
    }

    match outcome.winners.as_slice() {
        [] => "No candidates were elected.".to_string(),
        [winner] => {
            let votes = outcome
                .rounds
                .last()
                .and_then(|r| r.tally(winner.as_str()))
                .unwrap_or(0.0);
            format!(
                "{winner} wins with {votes} votes in round {}.",
                outcome.rounds.len()
            )
        }
        many => format!("{} seats filled: {}.", many.len(), join(many)),
    }
}

pub(crate) fn join(xs: &[CandidateId]) -> String {
    xs.iter().map(CandidateId::as_str).collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn round(tallies: &[(&str, f64)]) -> Round {
        Round {
            round_number: 1,
            tallies: tallies.iter().map(|(c, v)| (CandidateId::from(*c), *v)).collect(),
            eliminated: None,
            elected: None,
            total_active_ballots: 0,
            exhausted_ballots: 0,
            threshold: None,
            rank_distribution: BTreeMap::new(),
            seat: None,
            score: None,
        }
    }

    #[test]
    fn single_winner_summary_uses_final_tally() {
        let outcome = RankedOutcome {
            rounds: vec![round(&[("A", 3.0)]), round(&[("A", 7.0)])],
            winners: vec!["A".into()],
            is_tie: false,
            exhausted: 0,
        };
        let r = build_ranked_result("irv", outcome, 7, 3, 1);
        assert_eq!(r.summary, "A wins with 7 votes in round 2.");
        assert_eq!(r.total_ballots, 7);
        assert_eq!(r.total_candidates, 3);
    }

    #[test]
    fn tie_summaries() {
        let full = RankedOutcome { is_tie: true, ..Default::default() };
        assert_eq!(
            build_ranked_result("irv", full, 2, 2, 1).summary,
            "The election ended in a tie. No winner could be determined."
        );

        let partial = RankedOutcome {
            winners: vec!["A".into()],
            is_tie: true,
            ..Default::default()
        };
        assert_eq!(
            build_ranked_result("irv", partial, 4, 3, 2).summary,
            "Partial result: A elected. Remaining seats ended in a tie."
        );
    }

    #[test]
    fn multi_seat_summary_lists_in_discovery_order() {
        let outcome = RankedOutcome {
            winners: vec!["B".into(), "A".into()],
            ..Default::default()
        };
        assert_eq!(
            build_ranked_result("irv", outcome, 5, 3, 2).summary,
            "2 seats filled: B, A."
        );
    }
}
