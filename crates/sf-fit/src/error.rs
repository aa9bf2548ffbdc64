//! Error types for the cycle fit.

use sf_cycle::CycleError;
use sf_laws::LawError;
use sf_solver::SolverError;
use sf_stage::StageError;
use thiserror::Error;

/// Per-component fit failure. All variants are fatal for the affected
/// component; no retries happen at this level.
#[derive(Error, Debug)]
pub enum FitError {
    #[error("Per-stage array {array} has {len} entries, need at least {need}")]
    Validation {
        array: &'static str,
        len: usize,
        need: usize,
    },

    #[error("Reference cycle node is not usable: {0}")]
    Reference(#[from] CycleError),

    #[error("Reference cycle node must be processed before fitting")]
    ReferenceNotProcessed,

    #[error("Law construction failed: {0}")]
    Law(#[from] LawError),

    #[error("Staged machine construction failed: {0}")]
    Build(#[from] StageError),

    #[error("Failed to fit to cycle: {0}")]
    Convergence(#[from] SolverError),
}

pub type FitResult<T> = Result<T, FitError>;

/// Aggregate failure of a whole-scheme fit: one line per failed component,
/// tagged by the component name.
#[derive(Error, Debug)]
pub struct SchemeFitError {
    pub failures: Vec<(&'static str, FitError)>,
}

impl std::fmt::Display for SchemeFitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (tag, err) in &self.failures {
            writeln!(f, "{tag}: {err};")?;
        }
        Ok(())
    }
}
