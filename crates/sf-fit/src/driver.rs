//! The fit driver: from a validated config and a processed reference node
//! to a fitted staged machine.

use crate::config::MachineConfig;
use crate::error::{FitError, FitResult};
use crate::problem::CycleFitProblem;
use nalgebra::DVector;
use sf_cycle::ReferenceNode;
use sf_solver::{NewtonSettings, newton_solve};
use sf_stage::StagedMachine;
use tracing::{debug, info};

/// Uniform finite-difference step of the fit's Newton solver.
const DERIVATIVE_STEP: f64 = 1e-5;
/// Newton step damping; the fit runs undamped.
const DAMPING: f64 = 1.0;
/// Newton iteration cap.
const ITER_LIMIT: usize = 1000;

/// Fit a staged machine to a reference cycle node.
///
/// The reference must already be processed; fitting against an
/// unprocessed node would compare against stale values, so it is an error
/// here rather than a silent `process()` call. The two unknowns scale the
/// loading/heat-drop law and the efficiency law; the solver runs from the
/// config's initial guess to the config's precision. Failures are fatal
/// for this component, with no retry.
pub fn fitted_machine<C>(config: &C, reference: &C::Reference) -> FitResult<C::Machine>
where
    C: MachineConfig,
{
    if !reference.is_processed() {
        return Err(FitError::ReferenceNotProcessed);
    }

    let mut machine = config.build_machine()?;
    machine.set_inlet(reference.inlet());
    machine.set_mass_rate(config.mass_rate());

    let guess = config.initial_guess(reference)?;
    debug!(x1 = guess[0], x2 = guess[1], "starting cycle fit");

    let settings = NewtonSettings {
        precision: config.precision(),
        damping: DAMPING,
        derivative_step: DERIVATIVE_STEP,
        iter_limit: ITER_LIMIT,
    };

    let solution = {
        let mut problem = CycleFitProblem::new(&mut machine, reference);
        newton_solve(
            |x| problem.residual(x),
            DVector::from_column_slice(&guess),
            &settings,
        )?
    };

    // leave the machine equilibrated exactly at the converged scales (the
    // solver's last evaluation may have been a Jacobian probe)
    machine.set_fit_scales(solution.x[0], solution.x[1]);
    machine.equilibrate()?;

    info!(
        x1 = solution.x[0],
        x2 = solution.x[1],
        iterations = solution.iterations,
        residual_norm = solution.residual_norm,
        "cycle fit converged"
    );
    Ok(machine)
}
