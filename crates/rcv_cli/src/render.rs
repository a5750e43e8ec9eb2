// crates/rcv_cli/src/render.rs
//
// Plain-text rendering of a result: header, one block per round, summary.
// Reads the result as-is; nothing is recomputed.

use std::fmt::Write;

use rcv_core::{ElectionResult, Round};

pub fn render_text(r: &ElectionResult) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_result(&mut out, r);
    out
}

fn write_result(out: &mut String, r: &ElectionResult) -> std::fmt::Result {
    let title = if r.title.is_empty() { "Election" } else { r.title.as_str() };
    let seat_word = if r.seats == 1 { "seat" } else { "seats" };
    writeln!(
        out,
        "{title} (method {}, {} {seat_word}, {} ballots, {} candidates)",
        r.method, r.seats, r.total_ballots, r.total_candidates
    )?;

    for round in &r.rounds {
        writeln!(out)?;
        write_round(out, round)?;
    }

    writeln!(out)?;
    writeln!(out, "{}", r.summary)?;
    if r.exhausted_ballots > 0 {
        writeln!(out, "Exhausted ballots: {}", r.exhausted_ballots)?;
    }
    if let Some(id) = &r.result_id {
        writeln!(out, "Result ID: {id}")?;
    }
    Ok(())
}

fn write_round(out: &mut String, round: &Round) -> std::fmt::Result {
    write!(out, "Round {}", round.round_number)?;
    if let Some(seat) = round.seat {
        write!(out, " (seat {seat})")?;
    }
    if let Some(t) = round.threshold {
        write!(out, ": threshold {t}")?;
    }
    write!(out, ", {} active ballots", round.total_active_ballots)?;
    if round.exhausted_ballots > 0 {
        write!(out, ", {} exhausted", round.exhausted_ballots)?;
    }
    writeln!(out)?;

    let width = round.tallies.keys().map(|c| c.as_str().len()).max().unwrap_or(0);
    for (candidate, tally) in &round.tallies {
        let mark = if round.elected().contains(candidate) {
            "  elected"
        } else if round.eliminated().contains(candidate) {
            "  eliminated"
        } else {
            ""
        };
        writeln!(out, "  {:<width$}  {tally:>8}{mark}", candidate.as_str())?;
    }
    Ok(())
}
