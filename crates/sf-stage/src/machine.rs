//! The staged-machine capability the cycle fit drives.

use crate::error::StageResult;
use sf_cycle::StagnationState;

/// Whole-machine integrated values after a successful equilibration.
#[derive(Clone, Copy, Debug)]
pub struct Aggregates {
    /// Overall pressure ratio (compression or expansion, both above one)
    pub pressure_ratio: f64,
    /// Overall adiabatic efficiency
    pub efficiency: f64,
    /// Total specific work absorbed or heat dropped, J/kg
    pub specific_energy: f64,
    /// Stagnation state behind the last stage
    pub outlet: StagnationState,
}

/// A multi-stage machine under cycle fit.
///
/// The fit mutates the machine through [`set_fit_scales`] and re-runs
/// [`equilibrate`] before every aggregate read; aggregate accessors return
/// an error when the internal state is stale or was never computed.
///
/// [`set_fit_scales`]: StagedMachine::set_fit_scales
/// [`equilibrate`]: StagedMachine::equilibrate
pub trait StagedMachine {
    type Record;

    fn set_inlet(&mut self, inlet: StagnationState);
    fn set_mass_rate(&mut self, mass_rate: f64);

    /// Apply the two fit unknowns. `x1` drives the loading/heat-drop side,
    /// `x2` the efficiency side; the meaning of each is machine-specific.
    fn set_fit_scales(&mut self, x1: f64, x2: f64);

    /// Run the stage-stacking pass, replacing all per-stage records and
    /// the aggregates.
    fn equilibrate(&mut self) -> StageResult<()>;

    fn pressure_ratio(&self) -> StageResult<f64>;
    fn efficiency(&self) -> StageResult<f64>;
    fn stages(&self) -> &[Self::Record];
}
