//! Error types for cycle nodes and the scheme pass.

use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum CycleError {
    #[error("Invalid cycle parameter: {what}")]
    InvalidSpec { what: &'static str },

    #[error("Non-physical cycle state: {what}")]
    NonPhysical { what: String },

    #[error("Node read before process(): {what}")]
    NotProcessed { what: &'static str },
}

pub type CycleResult<T> = Result<T, CycleError>;
