//! crates/rcv_pipeline/src/engine.rs
//! `ElectionEngine`: a registry of voting methods plus the run path.
//!
//! Registration order is kept so `available_methods` and error texts list
//! methods the way they were registered. Re-registering a name replaces the
//! earlier method in place.

use chrono::{DateTime, SecondsFormat, Utc};
use tracing::{debug, info, warn};

use rcv_algo::{BordaMethod, IrvMethod, Validation, VotingMethod};
use rcv_core::{Ballot, CandidateId, ElectionConfig, ElectionResult};

use crate::{EngineError, SEATS_MESSAGE};

/// Knobs for result annotation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EngineOptions {
    /// Attach a `RES:` fingerprint of the result content.
    pub stamp_result_id: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            stamp_result_id: true,
        }
    }
}

pub struct ElectionEngine {
    methods: Vec<Box<dyn VotingMethod>>,
    options: EngineOptions,
}

impl std::fmt::Debug for ElectionEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ElectionEngine")
            .field("methods", &self.available_methods())
            .field("options", &self.options)
            .finish()
    }
}

/// Engine with the default methods (`irv`, `borda`) registered.
pub fn create_engine() -> ElectionEngine {
    let mut engine = ElectionEngine::empty();
    engine.register_method(IrvMethod).register_method(BordaMethod);
    engine
}

impl Default for ElectionEngine {
    fn default() -> Self {
        create_engine()
    }
}

impl ElectionEngine {
    /// Engine with no methods registered.
    pub fn empty() -> Self {
        Self {
            methods: Vec::new(),
            options: EngineOptions::default(),
        }
    }

    pub fn with_options(mut self, options: EngineOptions) -> Self {
        self.options = options;
        self
    }

    /// Register `method` under its declared name.
    pub fn register_method<M: VotingMethod + 'static>(&mut self, method: M) -> &mut Self {
        let name = method.name();
        match self.methods.iter_mut().find(|m| m.name() == name) {
            Some(slot) => {
                debug!(method = name, "replacing registered method");
                *slot = Box::new(method);
            }
            None => self.methods.push(Box::new(method)),
        }
        self
    }

    pub fn available_methods(&self) -> Vec<String> {
        self.methods.iter().map(|m| m.name().to_string()).collect()
    }

    pub fn method(&self, name: &str) -> Option<&dyn VotingMethod> {
        self.methods
            .iter()
            .find(|m| m.name() == name)
            .map(|m| m.as_ref())
    }

    fn lookup(&self, name: &str) -> Result<&dyn VotingMethod, EngineError> {
        self.method(name).ok_or_else(|| {
            warn!(method = name, "unknown voting method");
            EngineError::UnknownMethod {
                method: name.to_string(),
                available: self.available_methods(),
            }
        })
    }

    /// Validate a submission with a named method's validator.
    pub fn validate(
        &self,
        method: &str,
        candidates: &[CandidateId],
        ballots: &[Ballot],
    ) -> Result<Validation, EngineError> {
        Ok(self.lookup(method)?.validate(candidates, ballots))
    }

    /// Check a whole config: the method exists, its validator accepts the
    /// ballots, and at least one seat is requested.
    pub fn validate_config(&self, config: &ElectionConfig) -> Result<(), EngineError> {
        let method = self.lookup(&config.method)?;
        check_config(method, config)
    }

    /// Run an election, stamping the current time.
    pub fn run_election(&self, config: &ElectionConfig) -> Result<ElectionResult, EngineError> {
        self.run_election_at(config, Utc::now())
    }

    /// Run an election with an explicit timestamp.
    pub fn run_election_at(
        &self,
        config: &ElectionConfig,
        now: DateTime<Utc>,
    ) -> Result<ElectionResult, EngineError> {
        let method = self.lookup(&config.method)?;
        info!(
            method = method.name(),
            seats = config.seats,
            candidates = config.candidates.len(),
            ballots = config.ballots.len(),
            "run_election: start"
        );

        check_config(method, config)?;

        let mut result = method.tabulate(&config.candidates, &config.ballots, config.seats);
        result.title = config.title.clone().unwrap_or_default();
        if self.options.stamp_result_id {
            result.result_id = Some(rcv_io::hasher::result_id_for(&result)?);
        }
        result.timestamp_utc = Some(now.to_rfc3339_opts(SecondsFormat::Secs, true));

        info!(
            winners = ?result.winners,
            is_tie = result.is_tie,
            rounds = result.rounds.len(),
            "run_election: done"
        );
        Ok(result)
    }
}

fn check_config(method: &dyn VotingMethod, config: &ElectionConfig) -> Result<(), EngineError> {
    let mut errors = method.validate(&config.candidates, &config.ballots).errors();
    if config.seats == 0 {
        errors.push(SEATS_MESSAGE.to_string());
    }
    if errors.is_empty() {
        return Ok(());
    }
    warn!(count = errors.len(), "ballot validation failed");
    Err(EngineError::ValidationFailed { errors })
}
