//! Cycle fitting: binding stage-by-stage machine models to a solved
//! gas-turbine cycle.
//!
//! A solved cycle fixes each component's pressure ratio and efficiency but
//! says nothing about its geometry. This crate closes that gap: a spool
//! config describes the stage count, annulus and parameter profiles, and a
//! two-unknown Newton fit scales the loading (or heat-drop) law and the
//! efficiency law until the staged machine reproduces the cycle node's
//! pressure ratio and efficiency. The scheme orchestrator runs all five
//! fits of a three-shaft unit and aggregates failures without stopping at
//! the first one.

pub mod compressor_config;
pub mod config;
pub mod driver;
pub mod error;
pub mod presets;
pub mod problem;
pub mod scheme;
pub mod turbine_config;

pub use compressor_config::CompressorSpoolConfig;
pub use config::MachineConfig;
pub use driver::fitted_machine;
pub use error::{FitError, FitResult, SchemeFitError};
pub use presets::{ft_config, hpc_config, hpt_config, lpc_config, lpt_config, scheme_configs};
pub use problem::CycleFitProblem;
pub use scheme::{
    SchemeConfigs, StagedScheme, fit_three_shaft_scheme, fit_three_shaft_scheme_par,
};
pub use turbine_config::TurbineSpoolConfig;
