//! Error types for law construction.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LawError {
    #[error("Invalid law domain: {what} (x0={x0}, x1={x1})")]
    InvalidDomain {
        what: &'static str,
        x0: f64,
        x1: f64,
    },

    #[error("Peak coordinate {x_peak} outside domain [{x0}, {x1}]")]
    PeakOutsideDomain { x_peak: f64, x0: f64, x1: f64 },
}

pub type LawResult<T> = Result<T, LawError>;
