//! The 2-unknown residual the root-finder drives.

use nalgebra::DVector;
use sf_cycle::ReferenceNode;
use sf_solver::{SolverError, SolverResult};
use sf_stage::StagedMachine;

/// Residual between a staged machine's aggregates and a reference cycle
/// node, as a function of the two law scale factors.
///
/// Exists only for the duration of one fit call. Each evaluation applies
/// the trial scales, explicitly re-equilibrates the machine, then reads
/// the aggregates; ordering is fixed as
/// `[pressure-ratio mismatch, efficiency mismatch]` for both machine
/// kinds (a turbine's first aggregate is its expansion ratio, never its
/// heat drop).
pub struct CycleFitProblem<'a, M: StagedMachine, R: ReferenceNode> {
    machine: &'a mut M,
    reference: &'a R,
}

impl<'a, M: StagedMachine, R: ReferenceNode> CycleFitProblem<'a, M, R> {
    pub fn new(machine: &'a mut M, reference: &'a R) -> Self {
        Self { machine, reference }
    }

    pub fn residual(&mut self, x: &DVector<f64>) -> SolverResult<DVector<f64>> {
        self.machine.set_fit_scales(x[0], x[1]);
        self.machine
            .equilibrate()
            .map_err(|e| SolverError::Residual {
                what: e.to_string(),
            })?;
        let pi = self.machine.pressure_ratio().map_err(to_solver_error)?;
        let eta = self.machine.efficiency().map_err(to_solver_error)?;
        Ok(DVector::from_column_slice(&[
            pi - self.reference.pressure_ratio(),
            eta - self.reference.efficiency(),
        ]))
    }
}

fn to_solver_error(e: sf_stage::StageError) -> SolverError {
    SolverError::Residual {
        what: e.to_string(),
    }
}
