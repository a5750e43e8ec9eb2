// crates/rcv_cli/src/args.rs
//
// Offline CLI argument surface.
//
// - No networked paths (reject any scheme:// like http/https/file)
// - --election is required unless --list-methods is given
// - --method / --seats / --title override the election file
// - --out <dir> writes result.json; --render picks the stdout format

use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, ValueEnum};

/// Stdout format for a finished election.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Render {
    Text,
    Json,
}

/// Parsed CLI arguments (raw).
#[derive(Debug, Parser, Clone)]
#[command(
    name = "rcv",
    disable_help_subcommand = true,
    about = "Offline ranked-choice tabulation (IRV/STV and Borda)"
)]
pub struct Args {
    /// Election JSON file: {title?, method?, seats?, candidates, ballots}.
    #[arg(long, required_unless_present = "list_methods")]
    pub election: Option<Utf8PathBuf>,

    /// Voting method (overrides the file; default "irv").
    #[arg(long)]
    pub method: Option<String>,

    /// Seats to fill (overrides the file; at least 1).
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub seats: Option<u32>,

    /// Title (overrides the file).
    #[arg(long)]
    pub title: Option<String>,

    /// Directory to write result.json into.
    #[arg(long)]
    pub out: Option<Utf8PathBuf>,

    /// Stdout format.
    #[arg(long, value_enum, default_value_t = Render::Text)]
    pub render: Render,

    /// Validate ballots only; do not tabulate.
    #[arg(long)]
    pub validate_only: bool,

    /// Print registered methods and exit.
    #[arg(long)]
    pub list_methods: bool,

    /// Only warnings and errors on stderr.
    #[arg(long)]
    pub quiet: bool,
}

/// Errors surfaced by argument validation.
/// Keep messages short/stable (handy for scripts/tests).
#[derive(Debug)]
pub enum CliError {
    NonLocalPath(String),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::NonLocalPath(p) => write!(f, "path must be local file (no scheme): {p}"),
        }
    }
}

impl std::error::Error for CliError {}

/// Reject any explicit URI scheme (e.g., http://, https://, file://).
#[inline]
fn has_scheme(s: &str) -> bool {
    let lower = s.trim().to_ascii_lowercase();
    rcv_io::looks_like_url_strict(&lower)
        || lower.starts_with("http:")
        || lower.starts_with("https:")
        || lower.starts_with("file:")
}

fn ensure_local_path(p: &Utf8Path) -> Result<(), CliError> {
    if has_scheme(p.as_str()) {
        return Err(CliError::NonLocalPath(p.to_string()));
    }
    Ok(())
}

impl Args {
    /// Check parsed flags beyond what clap enforces.
    pub fn validate(self) -> Result<Self, CliError> {
        for p in [self.election.as_deref(), self.out.as_deref()].into_iter().flatten() {
            ensure_local_path(p)?;
        }
        Ok(self)
    }
}

/// Entry point used by main.rs. Clap exits with code 2 on usage errors.
pub fn parse_and_validate() -> Result<Args, CliError> {
    Args::parse().validate()
}
