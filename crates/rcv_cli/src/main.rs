// crates/rcv_cli/src/main.rs
//
// Wires up: exit codes, typed error mapping, logging, CLI parsing, the
// list/validate-only short-circuits, and the full run path
// (load → overrides → engine → result.json → stdout rendering).

mod args;
mod render;

mod exitcodes {
    pub const OK: i32 = 0;
    pub const VALIDATION: i32 = 2;
    pub const IO: i32 = 4;
}

use std::process::ExitCode;

use rcv_io::canonical_json;
use rcv_io::submission::load_election;
use rcv_pipeline::{create_engine, ElectionConfig, ElectionEngine, EngineError};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use args::{parse_and_validate as parse_cli, Args, Render};

/// Central error type for CLI → exit-code mapping.
#[derive(Debug)]
enum MainError {
    /// JSON shape, unknown method, invalid ballots
    Validation(String),
    /// Read/write/path errors
    Io(String),
}

impl std::fmt::Display for MainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MainError::Validation(m) | MainError::Io(m) => f.write_str(m),
        }
    }
}

fn main() -> ExitCode {
    let args = match parse_cli() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("rcv: error: {e}");
            return ExitCode::from(exitcodes::VALIDATION as u8);
        }
    };
    init_logging(args.quiet);

    let engine = create_engine();
    let outcome = if args.list_methods {
        for name in engine.available_methods() {
            println!("{name}");
        }
        Ok(())
    } else if args.validate_only {
        validate_only(&engine, &args)
    } else {
        run_once(&engine, &args)
    };

    let rc = match outcome {
        Ok(()) => exitcodes::OK,
        Err(e) => {
            eprintln!("rcv: error: {e}");
            map_error(&e)
        }
    };
    ExitCode::from(rc as u8)
}

/// Logs go to stderr; `RUST_LOG` wins over the built-in default.
fn init_logging(quiet: bool) {
    let default = if quiet {
        "warn"
    } else {
        "warn,rcv_cli=info,rcv_pipeline=info,rcv_io=info,rcv_algo=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn map_error(e: &MainError) -> i32 {
    match e {
        MainError::Validation(_) => exitcodes::VALIDATION,
        MainError::Io(_) => exitcodes::IO,
    }
}

/// Translate rcv_io::IoError into MainError buckets for exit-code mapping.
fn map_io_err(e: rcv_io::IoError) -> MainError {
    use rcv_io::IoError::*;
    match e {
        Json { pointer, msg } => MainError::Validation(format!("json {pointer}: {msg}")),
        Invalid(m) => MainError::Validation(m),
        Path(m) => MainError::Io(format!("path: {m}")),
        Hash(m) => MainError::Io(format!("hash: {m}")),
    }
}

fn map_engine_err(e: EngineError) -> MainError {
    match e {
        EngineError::Io(io) => map_io_err(io),
        other @ (EngineError::UnknownMethod { .. } | EngineError::ValidationFailed { .. }) => {
            MainError::Validation(other.to_string())
        }
    }
}

/// Load the election file and apply flag overrides.
fn load_config(args: &Args) -> Result<ElectionConfig, MainError> {
    let path = args
        .election
        .as_deref()
        .ok_or_else(|| MainError::Validation("missing required flag: --election".into()))?;
    let mut cfg = load_election(path).map_err(map_io_err)?;

    if let Some(m) = &args.method {
        cfg.method = m.clone();
    }
    if let Some(s) = args.seats {
        cfg.seats = s;
    }
    if let Some(t) = &args.title {
        cfg.title = Some(t.clone());
    }
    Ok(cfg)
}

/// Validate-only path (no tabulation, no artifacts).
fn validate_only(engine: &ElectionEngine, args: &Args) -> Result<(), MainError> {
    let cfg = load_config(args)?;
    engine.validate_config(&cfg).map_err(map_engine_err)?;

    println!(
        "valid: {} ballots, {} candidates ({})",
        cfg.ballots.len(),
        cfg.candidates.len(),
        cfg.method
    );
    Ok(())
}

fn run_once(engine: &ElectionEngine, args: &Args) -> Result<(), MainError> {
    let cfg = load_config(args)?;
    let result = engine.run_election(&cfg).map_err(map_engine_err)?;

    if let Some(dir) = &args.out {
        let path = canonical_json::write_result_json(dir, &result).map_err(map_io_err)?;
        info!(path = %path, "result written");
    }

    match args.render {
        Render::Text => print!("{}", render::render_text(&result)),
        Render::Json => {
            let bytes = canonical_json::to_canonical_bytes(&result).map_err(map_io_err)?;
            println!("{}", String::from_utf8_lossy(&bytes));
        }
    }

    if result.is_tie {
        warn!("election ended in a tie");
    }
    Ok(())
}
