use thiserror::Error;

pub type CoreResult<T> = Result<T, CoreError>;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Fixed point did not converge for {what} after {iterations} iterations")]
    FixedPoint {
        what: &'static str,
        iterations: usize,
    },

    #[error("Invariant violated: {what}")]
    Invariant { what: &'static str },
}
