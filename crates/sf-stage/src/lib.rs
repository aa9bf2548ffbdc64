//! Staged machines: mean-line stage stacking for axial compressors and
//! turbines.
//!
//! A staged machine owns one geometry spec and one set of per-stage laws,
//! and resolves itself stage by stage: compressible continuity sizes the
//! annulus, the loading/heat-drop law sets each stage's work, and the
//! efficiency or velocity-coefficient laws set each stage's losses. The
//! aggregates (overall pressure ratio and efficiency) are what the cycle
//! fit matches against a reference node.
//!
//! Equilibration is an explicit step: aggregate accessors fail until
//! [`StagedMachine::equilibrate`] has run after the latest mutation.

pub mod common;
pub mod compressor;
pub mod error;
pub mod geom;
pub mod machine;
pub mod turbine;

pub use compressor::{CompressorLaws, CompressorStageRecord, StagedCompressor, StackingNumerics};
pub use error::{StageError, StageResult};
pub use geom::{BladeRowSpec, StageGeomSpec};
pub use machine::{Aggregates, StagedMachine};
pub use turbine::{StagedTurbine, TurbineLaws, TurbineStageRecord};
