//! crates/rcv_core/src/entities.rs
//! Domain entities shared across the engine (ballots, election config, rounds, results).
//! Pure types + small accessors. No I/O.

use std::collections::{BTreeMap, BTreeSet};

use crate::ids::{CandidateId, ResultId};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Per-candidate vote totals for one round (plain counts, weighted counts, or Borda scores).
pub type Tallies = BTreeMap<CandidateId, f64>;

/// Per active candidate: `counts[i]` = ballots placing it at active position `i`.
pub type RankDistribution = BTreeMap<CandidateId, Vec<u64>>;

/* ---------------------------------- Ballot ---------------------------------- */

/// One voter's ranking, most preferred first. Partial rankings are allowed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Ballot(Vec<CandidateId>);

impl Ballot {
    #[inline]
    pub fn new(ranking: Vec<CandidateId>) -> Self {
        Self(ranking)
    }

    #[inline]
    pub fn ranking(&self) -> &[CandidateId] {
        &self.0
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// First ranked candidate still in `active`, or `None` if the ballot is exhausted.
    #[inline]
    pub fn first_active<'a>(&'a self, active: &BTreeSet<CandidateId>) -> Option<&'a CandidateId> {
        self.0.iter().find(|c| active.contains(*c))
    }

    /// The ranking with inactive candidates removed, order preserved.
    pub fn active_ranking<'a>(
        &'a self,
        active: &'a BTreeSet<CandidateId>,
    ) -> impl Iterator<Item = &'a CandidateId> + 'a {
        self.0.iter().filter(move |c| active.contains(*c))
    }
}

impl<S: Into<CandidateId>> FromIterator<S> for Ballot {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/* ------------------------------ ElectionConfig ------------------------------ */

#[cfg(feature = "serde")]
fn default_seats() -> u32 {
    1
}

#[cfg(feature = "serde")]
fn default_method() -> String {
    crate::methods::IRV.to_string()
}

/// One election request as submitted by a caller.
/// Invariant (checked by the engine): `seats >= 1`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ElectionConfig {
    #[cfg_attr(feature = "serde", serde(default))]
    pub title: Option<String>,
    pub candidates: Vec<CandidateId>,
    pub ballots: Vec<Ballot>,
    #[cfg_attr(feature = "serde", serde(default = "default_method"))]
    pub method: String,
    #[cfg_attr(feature = "serde", serde(default = "default_seats"))]
    pub seats: u32,
}

impl ElectionConfig {
    /// Single-seat election with no title.
    pub fn new(method: impl Into<String>, candidates: Vec<CandidateId>, ballots: Vec<Ballot>) -> Self {
        Self {
            title: None,
            candidates,
            ballots,
            method: method.into(),
            seats: 1,
        }
    }

    pub fn with_seats(mut self, seats: u32) -> Self {
        self.seats = seats;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/* ----------------------------------- Round ---------------------------------- */

/// Immutable snapshot of one elimination/election step.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Round {
    pub round_number: u32,
    /// Every still-active candidate → its (possibly weighted, display-rounded) total.
    pub tallies: Tallies,
    pub eliminated: Option<Vec<CandidateId>>,
    pub elected: Option<Vec<CandidateId>>,
    pub total_active_ballots: u64,
    /// Ballots exhausted so far, this round included.
    #[cfg_attr(feature = "serde", serde(default))]
    pub exhausted_ballots: u64,
    /// Majority threshold (IRV) or Droop quota (STV); `None` on catch-all rounds and Borda.
    pub threshold: Option<u64>,
    pub rank_distribution: RankDistribution,
    /// Borda multi-seat only: the seat awarded in this round.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub seat: Option<u32>,
    /// Borda multi-seat only: the awardee's score.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub score: Option<u64>,
}

impl Round {
    /// Candidates elected this round (empty slice when none).
    #[inline]
    pub fn elected(&self) -> &[CandidateId] {
        self.elected.as_deref().unwrap_or(&[])
    }

    /// Candidates eliminated this round (empty slice when none).
    #[inline]
    pub fn eliminated(&self) -> &[CandidateId] {
        self.eliminated.as_deref().unwrap_or(&[])
    }

    #[inline]
    pub fn tally(&self, candidate: &str) -> Option<f64> {
        self.tallies.get(candidate).copied()
    }
}

/* ------------------------------ ElectionResult ------------------------------ */

/// Full outcome of one tabulation call.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ElectionResult {
    pub method: String,
    pub title: String,
    pub seats: u32,
    /// Discovery order, not a ranking claim.
    pub winners: Vec<CandidateId>,
    pub is_tie: bool,
    pub rounds: Vec<Round>,
    pub summary: String,
    pub total_ballots: u64,
    pub total_candidates: u64,
    pub exhausted_ballots: u64,
    /// Borda only: final score per candidate.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub scores: Option<BTreeMap<CandidateId, u64>>,
    /// RFC3339 UTC, stamped by the engine.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub timestamp_utc: Option<String>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub result_id: Option<ResultId>,
}

impl ElectionResult {
    #[inline]
    pub fn final_round(&self) -> Option<&Round> {
        self.rounds.last()
    }

    /// Copy with the engine-stamped fields cleared (used for content comparison and hashing).
    pub fn without_stamp(&self) -> Self {
        Self {
            timestamp_utc: None,
            result_id: None,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(xs: &[&str]) -> BTreeSet<CandidateId> {
        xs.iter().map(|s| CandidateId::from(*s)).collect()
    }

    #[test]
    fn first_active_skips_inactive() {
        let b: Ballot = ["A", "B", "C"].into_iter().collect();
        assert_eq!(b.first_active(&set(&["B", "C"])).map(|c| c.as_str()), Some("B"));
        assert_eq!(b.first_active(&set(&["D"])), None);
    }

    #[test]
    fn active_ranking_preserves_order() {
        let b: Ballot = ["C", "A", "B"].into_iter().collect();
        let active = set(&["A", "C"]);
        let got: Vec<&str> = b.active_ranking(&active).map(|c| c.as_str()).collect();
        assert_eq!(got, vec!["C", "A"]);
    }

    #[test]
    fn config_builders() {
        let cfg = ElectionConfig::new("borda", vec!["A".into()], vec![])
            .with_seats(2)
            .with_title("Board");
        assert_eq!(cfg.seats, 2);
        assert_eq!(cfg.title.as_deref(), Some("Board"));
        assert_eq!(cfg.method, "borda");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn config_defaults_from_json() {
        let cfg: ElectionConfig =
            serde_json::from_str(r#"{"candidates":["A","B"],"ballots":[["A"],["B","A"]]}"#).unwrap();
        assert_eq!(cfg.seats, 1);
        assert_eq!(cfg.method, "irv");
        assert_eq!(cfg.title, None);
        assert_eq!(cfg.ballots[1].ranking()[0], "B");
    }
}
