//! Error types for root finding.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SolverError {
    #[error("Residual evaluation failed: {what}")]
    Residual { what: String },

    #[error("Singular Jacobian at iteration {iteration}")]
    SingularJacobian { iteration: usize },

    #[error("No convergence after {iterations} iterations, residual norm = {residual_norm}")]
    NotConverged {
        iterations: usize,
        residual_norm: f64,
    },

    #[error("Residual dimension {got} does not match unknown vector dimension {expected}")]
    DimensionMismatch { expected: usize, got: usize },
}

pub type SolverResult<T> = Result<T, SolverError>;
