// crates/rcv_algo/src/tabulation/ranked_stv.rs
//
// Multi-winner single transferable vote over weighted ballots.
//
// - Droop quota per round: floor(total_weight / (seats_remaining + 1)) + 1.
// - Elected candidates are processed in descending tally order; a surplus is
//   passed on by scaling the weight of the ballots that counted for them.
// - Each ballot's recipient is fixed when the round is tallied, so electing
//   several candidates in one round never scales a ballot twice.
// - Tallies are reported rounded to 2 dp; every decision uses raw weights,
//   with a 1e-9 slack on the quota comparison for float accumulation.

use std::collections::{BTreeMap, BTreeSet};

use rcv_core::determinism::{in_declaration_order, sort_by_score_desc};
use rcv_core::rounding::{floor_to_u64, reaches_quota, round_display, weight_is_live};
use rcv_core::{Ballot, CandidateId, ElectionResult, Round, Tallies};
use tracing::debug;

use super::outcome::{build_ranked_result, RankedOutcome};
use super::rank_distribution::rank_distribution;

/// A ballot plus its remaining voting weight in (0, 1].
#[derive(Clone, Copy, Debug)]
pub struct WeightedBallot<'b> {
    pub ballot: &'b Ballot,
    pub weight: f64,
}

/// Droop quota for the seats still to fill.
#[inline]
pub fn droop_quota(total_weight: f64, seats_remaining: u32) -> u64 {
    floor_to_u64(total_weight / f64::from(seats_remaining + 1)) + 1
}

/// Scale factor applied to ballots counted for an elected candidate.
/// Zero when the tally is exactly at quota (nothing left to pass on).
#[inline]
pub fn transfer_factor(tally: f64, quota: u64) -> f64 {
    let surplus = tally - quota as f64;
    if surplus > 0.0 && tally > 0.0 {
        surplus / tally
    } else {
        0.0
    }
}

/// Weighted first-choice tally. Returns the raw tallies, each surviving
/// ballot's current recipient (parallel to the returned ballots), and the
/// number of ballots that exhausted in this pass.
struct WeightedCount<'b> {
    tallies: BTreeMap<CandidateId, f64>,
    continuing: Vec<WeightedBallot<'b>>,
    recipients: Vec<CandidateId>,
    newly_exhausted: u64,
}

fn count_weighted<'b>(
    active: &BTreeSet<CandidateId>,
    working: Vec<WeightedBallot<'b>>,
) -> WeightedCount<'b> {
    let mut tallies: BTreeMap<CandidateId, f64> =
        active.iter().map(|c| (c.clone(), 0.0)).collect();
    let mut continuing = Vec::with_capacity(working.len());
    let mut recipients = Vec::with_capacity(working.len());
    let mut newly_exhausted = 0u64;

    for wb in working {
        let top = wb.ballot.first_active(active);
        match top.and_then(|c| tallies.get_mut(c).map(|t| (c, t))) {
            Some((c, t)) => {
                *t += wb.weight;
                recipients.push(c.clone());
                continuing.push(wb);
            }
            None => newly_exhausted += 1,
        }
    }

    WeightedCount {
        tallies,
        continuing,
        recipients,
        newly_exhausted,
    }
}

fn display(tallies: &BTreeMap<CandidateId, f64>) -> Tallies {
    tallies
        .iter()
        .map(|(c, v)| (c.clone(), round_display(*v)))
        .collect()
}

/// Tabulate an STV election for `seats` seats. Ballots are assumed validated.
pub fn tabulate_stv(candidates: &[CandidateId], ballots: &[Ballot], seats: u32) -> ElectionResult {
    let seats = seats.max(1);
    let outcome = run_stv(candidates, ballots, seats);
    build_ranked_result(super::ranked_irv::METHOD_NAME, outcome, ballots.len(), candidates.len(), seats)
}

fn run_stv(candidates: &[CandidateId], ballots: &[Ballot], seats: u32) -> RankedOutcome {
    let mut active: BTreeSet<CandidateId> = candidates.iter().cloned().collect();
    let mut working: Vec<WeightedBallot<'_>> = ballots
        .iter()
        .map(|ballot| WeightedBallot { ballot, weight: 1.0 })
        .collect();
    let mut winners: Vec<CandidateId> = Vec::new();
    let mut rounds: Vec<Round> = Vec::new();
    let mut exhausted = 0u64;

    while (winners.len() as u32) < seats {
        let seats_remaining = seats - winners.len() as u32;
        let round_number = rounds.len() as u32 + 1;

        // Catch-all: no comparison needed once the field fits the open seats.
        if active.len() as u32 <= seats_remaining {
            let mut tallies: BTreeMap<CandidateId, f64> =
                active.iter().map(|c| (c.clone(), 0.0)).collect();
            let mut total_active = 0u64;
            for wb in &working {
                if let Some(t) = wb.ballot.first_active(&active).and_then(|c| tallies.get_mut(c)) {
                    *t += wb.weight;
                    total_active += 1;
                }
            }
            let elected = in_declaration_order(candidates, &active);
            debug!(round = round_number, ?elected, "stv: remaining candidates fill open seats");
            rounds.push(Round {
                round_number,
                tallies: display(&tallies),
                eliminated: None,
                elected: Some(elected.clone()),
                total_active_ballots: total_active,
                exhausted_ballots: exhausted,
                threshold: None,
                rank_distribution: rank_distribution(&active, working.iter().map(|wb| wb.ballot)),
                seat: None,
                score: None,
            });
            winners.extend(elected);
            break;
        }

        let step = count_weighted(&active, working);
        exhausted += step.newly_exhausted;
        let WeightedCount {
            tallies,
            continuing,
            recipients,
            ..
        } = step;
        working = continuing;

        let total_weight: f64 = working.iter().map(|wb| wb.weight).sum();
        let quota = droop_quota(total_weight, seats_remaining);
        let mut round = Round {
            round_number,
            tallies: display(&tallies),
            eliminated: None,
            elected: None,
            total_active_ballots: working.len() as u64,
            exhausted_ballots: exhausted,
            threshold: Some(quota),
            rank_distribution: rank_distribution(&active, working.iter().map(|wb| wb.ballot)),
            seat: None,
            score: None,
        };

        let newly_elected: Vec<(CandidateId, f64)> = sort_by_score_desc(candidates, &tallies)
            .into_iter()
            .filter(|(c, v)| active.contains(c) && reaches_quota(*v, quota))
            .collect();

        if !newly_elected.is_empty() {
            for (elected, tally) in &newly_elected {
                let factor = transfer_factor(*tally, quota);
                debug!(round = round_number, %elected, tally, quota, factor, "stv: elected");
                for (wb, to) in working.iter_mut().zip(&recipients) {
                    if to == elected {
                        wb.weight *= factor;
                    }
                }
                active.remove(elected);
                winners.push(elected.clone());
            }
            working.retain(|wb| weight_is_live(wb.weight));
            round.elected = Some(newly_elected.into_iter().map(|(c, _)| c).collect());
            rounds.push(round);
            continue;
        }

        let min = tallies.values().copied().fold(f64::INFINITY, f64::min);
        let max = tallies.values().copied().fold(f64::NEG_INFINITY, f64::max);

        if min == max && active.len() as u32 > seats_remaining {
            debug!(round = round_number, ?winners, "stv: remaining seats tied");
            rounds.push(round);
            return RankedOutcome {
                rounds,
                winners,
                is_tie: true,
                exhausted,
            };
        }

        let lowest: BTreeSet<CandidateId> = tallies
            .iter()
            .filter(|(_, v)| **v == min)
            .map(|(c, _)| c.clone())
            .collect();
        let eliminated = in_declaration_order(candidates, &lowest);
        debug!(round = round_number, ?eliminated, "stv: eliminating");
        for c in &eliminated {
            active.remove(c);
        }
        round.eliminated = Some(eliminated);
        rounds.push(round);
    }

    RankedOutcome {
        rounds,
        winners,
        is_tie: false,
        exhausted,
    }
}

// ---- Tests ------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(xs: &[&str]) -> Vec<CandidateId> {
        xs.iter().map(|s| CandidateId::from(*s)).collect()
    }

    fn repeat(xs: &[&str], n: usize) -> Vec<Ballot> {
        (0..n).map(|_| xs.iter().copied().collect()).collect()
    }

    #[test]
    fn quota_formula() {
        assert_eq!(droop_quota(5.0, 2), 2);
        assert_eq!(droop_quota(100.0, 3), 26);
        assert_eq!(droop_quota(2.4, 1), 2);
    }

    #[test]
    fn factor_is_zero_at_exact_quota() {
        assert_eq!(transfer_factor(2.0, 2), 0.0);
        assert!((transfer_factor(5.0, 2) - 0.6).abs() < 1e-12);
    }

    #[test]
    fn surplus_flows_to_next_preference() {
        let r = tabulate_stv(&ids(&["A", "B", "C"]), &repeat(&["A", "B", "C"], 5), 2);

        let r1 = &r.rounds[0];
        assert_eq!(r1.threshold, Some(2));
        assert_eq!(r1.elected(), ids(&["A"]).as_slice());
        assert_eq!(r1.tally("A"), Some(5.0));

        // Five ballots at weight 0.6 now count for B.
        let r2 = &r.rounds[1];
        assert_eq!(r2.tally("B"), Some(3.0));
        // Transferred weight 3.0 over one open seat.
        assert_eq!(r2.threshold, Some(2));
        assert_eq!(r2.elected(), ids(&["B"]).as_slice());
        assert_eq!(r.winners, ids(&["A", "B"]));
        assert!(!r.is_tie);
        assert_eq!(r.seats, 2);
        assert_eq!(r.summary, "2 seats filled: A, B.");
    }

    #[test]
    fn exact_quota_spends_ballots() {
        // 3 ballots, 2 seats: quota 2. A has exactly 2, so those ballots are spent.
        let mut ballots = repeat(&["A", "B"], 2);
        ballots.extend(repeat(&["C"], 1));
        let r = tabulate_stv(&ids(&["A", "B", "C"]), &ballots, 2);

        assert_eq!(r.rounds[0].elected(), ids(&["A"]).as_slice());
        let r2 = &r.rounds[1];
        // Only the [C] ballot survives into round 2.
        assert_eq!(r2.total_active_ballots, 1);
        assert_eq!(r2.tally("B"), Some(0.0));
        assert_eq!(r2.tally("C"), Some(1.0));
    }

    #[test]
    fn field_within_open_seats_is_elected_without_comparison() {
        let r = tabulate_stv(&ids(&["B", "A"]), &repeat(&["A"], 3), 3);
        assert_eq!(r.rounds.len(), 1);
        let only = &r.rounds[0];
        assert_eq!(only.threshold, None);
        assert_eq!(only.elected(), ids(&["B", "A"]).as_slice());
        assert_eq!(only.total_active_ballots, 3);
        assert_eq!(r.winners, ids(&["B", "A"]));
    }

    #[test]
    fn partial_tie_keeps_filled_seats() {
        // Quota with 6 ballots and 2 seats is 3: A elected at exactly quota,
        // then B, C, D tie at 1 for the last seat.
        let mut ballots = repeat(&["A"], 3);
        ballots.extend(repeat(&["B"], 1));
        ballots.extend(repeat(&["C"], 1));
        ballots.extend(repeat(&["D"], 1));
        let r = tabulate_stv(&ids(&["A", "B", "C", "D"]), &ballots, 2);

        assert!(r.is_tie);
        assert_eq!(r.winners, ids(&["A"]));
        let last = r.final_round().expect("round");
        assert!(last.elected.is_none() && last.eliminated.is_none());
        assert_eq!(
            r.summary,
            "Partial result: A elected. Remaining seats ended in a tie."
        );
    }

    #[test]
    fn two_elected_in_one_round_do_not_compound() {
        // 9 ballots, 3 seats: quota 3. A=5 (surplus 2) and B=4 (surplus 1)
        // are elected together; A's ballots move to C, not through B.
        let mut ballots = repeat(&["A", "B", "C", "D"], 5);
        ballots.extend(repeat(&["B", "C", "D"], 4));
        let r = tabulate_stv(&ids(&["A", "B", "C", "D"]), &ballots, 3);

        let r1 = &r.rounds[0];
        assert_eq!(r1.threshold, Some(3));
        assert_eq!(r1.elected(), ids(&["A", "B"]).as_slice());

        let r2 = &r.rounds[1];
        assert_eq!(r2.tally("C"), Some(3.0));
        assert_eq!(r2.tally("D"), Some(0.0));
        assert_eq!(r2.threshold, Some(2));
        assert_eq!(r2.elected(), ids(&["C"]).as_slice());
        assert_eq!(r.winners, ids(&["A", "B", "C"]));
    }

    #[test]
    fn fractional_tally_at_quota_is_elected() {
        // 12 ballots, 3 seats: quota 4. A's surplus 3 puts 7 x 3/7 on B, so
        // round 2 shows B=3 and C=3 against quota 3, and both are elected.
        let mut ballots = repeat(&["A", "B"], 7);
        ballots.extend(repeat(&["C"], 3));
        ballots.extend(repeat(&["D", "B"], 2));
        let r = tabulate_stv(&ids(&["A", "B", "C", "D"]), &ballots, 3);

        let r2 = &r.rounds[1];
        assert_eq!(r2.threshold, Some(3));
        assert_eq!(r2.tally("B"), Some(3.0));
        assert_eq!(r2.tally("C"), Some(3.0));
        let mut elected = r2.elected().to_vec();
        elected.sort();
        assert_eq!(elected, ids(&["B", "C"]));
        assert_eq!(r.winners.len(), 3);
        assert!(!r.is_tie);
    }

    #[test]
    fn rounds_carry_running_exhausted_count() {
        // 9 ballots, 2 seats: quota 4. D is eliminated in round 1 and its
        // ballot exhausts in round 2, where A and B reach quota 3.
        let mut ballots = repeat(&["A", "B"], 3);
        ballots.extend(repeat(&["B"], 3));
        ballots.extend(repeat(&["C"], 2));
        ballots.extend(repeat(&["D"], 1));
        let r = tabulate_stv(&ids(&["A", "B", "C", "D"]), &ballots, 2);

        assert_eq!(r.rounds[0].eliminated(), ids(&["D"]).as_slice());
        let counts: Vec<u64> = r.rounds.iter().map(|round| round.exhausted_ballots).collect();
        assert_eq!(counts, vec![0, 1]);
        assert_eq!(r.rounds[1].elected(), ids(&["A", "B"]).as_slice());
        assert_eq!(r.exhausted_ballots, 1);
    }

    #[test]
    fn weighted_tallies_are_display_rounded() {
        // 7 ballots, 2 seats: quota 3. A=7, surplus 4, factor 4/7 onto B and C.
        let mut ballots = repeat(&["A", "B"], 4);
        ballots.extend(repeat(&["A", "C"], 3));
        let r = tabulate_stv(&ids(&["A", "B", "C"]), &ballots, 2);

        let r2 = &r.rounds[1];
        assert_eq!(r2.tally("B"), Some(2.29));
        assert_eq!(r2.tally("C"), Some(1.71));
    }
}
