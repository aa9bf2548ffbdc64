//! Error types for stage stacking.

use sf_core::CoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StageError {
    #[error("Missing input: {what}")]
    MissingInput { what: &'static str },

    #[error("Invalid stage geometry: {what} (stage {stage})")]
    Geometry { what: &'static str, stage: usize },

    #[error("Non-physical stage state: {what}")]
    NonPhysical { what: String },

    #[error("Aggregate read before equilibrate()")]
    NotEquilibrated,

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type StageResult<T> = Result<T, StageError>;
