// crates/rcv_algo/src/tabulation/borda.rs
//
// Borda count, single- and multi-winner.
//
// Points per ballot position p (0-based): max(0, N - 1 - p), N = total
// candidates. Unranked candidates earn nothing from that ballot.
// Scores are computed once; multi-winner awards seats top-down by score,
// equal scores keeping declaration order. Ties are reported, never broken.

use std::collections::{BTreeMap, BTreeSet};

use rcv_core::determinism::{in_declaration_order, sort_by_score_desc};
use rcv_core::{Ballot, CandidateId, ElectionResult, Round, Tallies};
use tracing::debug;

use super::rank_distribution::rank_distribution;

pub const METHOD_NAME: &str = rcv_core::methods::BORDA;

/// Points for ranking position `position` among `n_candidates`.
#[inline]
pub fn borda_points(n_candidates: usize, position: usize) -> u64 {
    n_candidates.saturating_sub(1).saturating_sub(position) as u64
}

/// Total Borda score per declared candidate (zero when never ranked).
pub fn borda_scores(candidates: &[CandidateId], ballots: &[Ballot]) -> BTreeMap<CandidateId, u64> {
    let n = candidates.len();
    let mut scores: BTreeMap<CandidateId, u64> =
        candidates.iter().map(|c| (c.clone(), 0)).collect();

    for ballot in ballots {
        for (position, choice) in ballot.ranking().iter().enumerate() {
            if let Some(s) = scores.get_mut(choice) {
                *s += borda_points(n, position);
            }
        }
    }
    scores
}

/// Tabulate a Borda election. `seats` of 0 is treated as 1.
pub fn tabulate_borda(candidates: &[CandidateId], ballots: &[Ballot], seats: u32) -> ElectionResult {
    let seats = seats.max(1);
    let scores = borda_scores(candidates, ballots);
    let all: BTreeSet<CandidateId> = candidates.iter().cloned().collect();
    let distribution = rank_distribution(&all, ballots);
    let tallies: Tallies = scores.iter().map(|(c, s)| (c.clone(), *s as f64)).collect();
    let total_ballots = ballots.len() as u64;

    let snapshot = |round_number: u32, elected: Vec<CandidateId>| Round {
        round_number,
        tallies: tallies.clone(),
        eliminated: None,
        elected: Some(elected),
        total_active_ballots: total_ballots,
        exhausted_ballots: 0,
        threshold: None,
        rank_distribution: distribution.clone(),
        seat: None,
        score: None,
    };

    let (winners, is_tie, rounds, summary) = if seats == 1 {
        let best = scores.values().copied().max().unwrap_or(0);
        let top: BTreeSet<CandidateId> = scores
            .iter()
            .filter(|(_, s)| **s == best)
            .map(|(c, _)| c.clone())
            .collect();
        let winners = in_declaration_order(candidates, &top);
        let is_tie = winners.len() > 1;
        let summary = match winners.as_slice() {
            [] => "No candidates were elected.".to_string(),
            [w] => format!("{w} wins with {best} points."),
            many => format!("Tie between {}. A tiebreaker is required.", join_and(many)),
        };
        debug!(?winners, best, "borda: single-winner scores");
        let rounds = vec![snapshot(1, winners.clone())];
        (winners, is_tie, rounds, summary)
    } else {
        let ranked = sort_by_score_desc(candidates, &scores);
        let filled = (seats as usize).min(ranked.len());

        let rounds: Vec<Round> = ranked[..filled]
            .iter()
            .enumerate()
            .map(|(i, (c, s))| {
                let seat = i as u32 + 1;
                Round {
                    seat: Some(seat),
                    score: Some(*s),
                    ..snapshot(seat, vec![c.clone()])
                }
            })
            .collect();
        let winners: Vec<CandidateId> = ranked[..filled].iter().map(|(c, _)| c.clone()).collect();

        // Tie at the cutoff: last awarded seat scores the same as the first
        // candidate left out.
        let cutoff = match (filled.checked_sub(1).map(|i| &ranked[i]), ranked.get(filled)) {
            (Some((_, last_in)), Some((_, first_out))) if last_in == first_out => Some(*last_in),
            _ => None,
        };

        let mut summary = format!("{} seats filled: {}.", winners.len(), join_comma(&winners));
        if let Some(score) = cutoff {
            let tied: Vec<CandidateId> = ranked
                .iter()
                .filter(|(_, s)| *s == score)
                .map(|(c, _)| c.clone())
                .collect();
            debug!(?tied, score, "borda: tie at the last seat");
            summary.push_str(&format!(
                " Tie for the last seat between {} with {score} points. A tiebreaker is required.",
                join_and(&tied)
            ));
        }
        (winners, cutoff.is_some(), rounds, summary)
    };

    ElectionResult {
        method: METHOD_NAME.to_string(),
        title: String::new(),
        seats,
        winners,
        is_tie,
        rounds,
        summary,
        total_ballots,
        total_candidates: candidates.len() as u64,
        exhausted_ballots: 0,
        scores: Some(scores),
        timestamp_utc: None,
        result_id: None,
    }
}

fn join_and(xs: &[CandidateId]) -> String {
    xs.iter().map(CandidateId::as_str).collect::<Vec<_>>().join(" and ")
}

fn join_comma(xs: &[CandidateId]) -> String {
    xs.iter().map(CandidateId::as_str).collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(xs: &[&str]) -> Vec<CandidateId> {
        xs.iter().map(|s| CandidateId::from(*s)).collect()
    }

    fn ballot(xs: &[&str]) -> Ballot {
        xs.iter().copied().collect()
    }

    #[test]
    fn points_never_go_negative() {
        assert_eq!(borda_points(3, 0), 2);
        assert_eq!(borda_points(3, 2), 0);
        assert_eq!(borda_points(3, 5), 0);
        assert_eq!(borda_points(0, 0), 0);
    }

    #[test]
    fn clear_single_winner() {
        let ballots = vec![ballot(&["A", "B", "C"]), ballot(&["A", "B", "C"]), ballot(&["B", "A", "C"])];
        let r = tabulate_borda(&ids(&["A", "B", "C"]), &ballots, 1);

        let scores = r.scores.as_ref().expect("scores");
        assert_eq!(scores["A"], 5);
        assert_eq!(scores["B"], 4);
        assert_eq!(scores["C"], 0);
        assert_eq!(r.winners, ids(&["A"]));
        assert!(!r.is_tie);
        assert_eq!(r.summary, "A wins with 5 points.");
        assert_eq!(r.rounds.len(), 1);
        assert_eq!(r.rounds[0].tally("B"), Some(4.0));
        assert_eq!(r.rounds[0].threshold, None);
        assert_eq!(r.exhausted_ballots, 0);
    }

    #[test]
    fn reversed_pair_is_a_tie() {
        let r = tabulate_borda(&ids(&["A", "B"]), &[ballot(&["A", "B"]), ballot(&["B", "A"])], 1);
        assert!(r.is_tie);
        assert_eq!(r.winners, ids(&["A", "B"]));
        assert_eq!(r.summary, "Tie between A and B. A tiebreaker is required.");
    }

    #[test]
    fn partial_ballot_uses_full_field_size() {
        let r = tabulate_borda(&ids(&["A", "B", "C", "D"]), &[ballot(&["A", "B"])], 1);
        let scores = r.scores.expect("scores");
        assert_eq!(
            scores.into_iter().map(|(c, s)| (c.to_string(), s)).collect::<Vec<_>>(),
            vec![("A".into(), 3), ("B".into(), 2), ("C".into(), 0), ("D".into(), 0)]
        );
    }

    #[test]
    fn multi_seat_rounds_per_seat() {
        let ballots = vec![ballot(&["C", "B", "A"]), ballot(&["C", "A", "B"]), ballot(&["B", "C", "A"])];
        let r = tabulate_borda(&ids(&["A", "B", "C"]), &ballots, 2);

        // C=5, B=3, A=1
        assert_eq!(r.winners, ids(&["C", "B"]));
        assert!(!r.is_tie);
        assert_eq!(r.rounds.len(), 2);
        assert_eq!(r.rounds[0].seat, Some(1));
        assert_eq!(r.rounds[0].score, Some(5));
        assert_eq!(r.rounds[1].elected(), ids(&["B"]).as_slice());
        assert_eq!(r.rounds[1].tally("A"), Some(1.0));
        assert_eq!(r.summary, "2 seats filled: C, B.");
    }

    #[test]
    fn tie_at_cutoff_is_reported() {
        // A=4, B=1, C=1 with 2 seats: B and C tie for the second seat.
        let ballots = vec![ballot(&["A", "B", "C"]), ballot(&["A", "C", "B"])];
        let r = tabulate_borda(&ids(&["A", "B", "C"]), &ballots, 2);

        assert_eq!(r.winners, ids(&["A", "B"]));
        assert!(r.is_tie);
        assert_eq!(
            r.summary,
            "2 seats filled: A, B. Tie for the last seat between B and C with 1 points. A tiebreaker is required."
        );
    }

    #[test]
    fn seats_beyond_field_elect_everyone() {
        let r = tabulate_borda(&ids(&["A", "B"]), &[ballot(&["B", "A"])], 5);
        assert_eq!(r.winners, ids(&["B", "A"]));
        assert_eq!(r.rounds.len(), 2);
        assert!(!r.is_tie);
        assert_eq!(r.seats, 5);
    }
}
