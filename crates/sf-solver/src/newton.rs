//! Newton iteration with a uniform finite-difference Jacobian.

use crate::error::{SolverError, SolverResult};
use nalgebra::{DMatrix, DVector};
use tracing::debug;

/// Newton solver settings.
#[derive(Clone, Copy, Debug)]
pub struct NewtonSettings {
    /// Absolute tolerance on the residual max-norm
    pub precision: f64,
    /// Step damping factor applied to every Newton update, in (0, 1]
    pub damping: f64,
    /// Uniform finite-difference step for the Jacobian columns
    pub derivative_step: f64,
    /// Iteration cap
    pub iter_limit: usize,
}

impl Default for NewtonSettings {
    fn default() -> Self {
        Self {
            precision: 1e-6,
            damping: 1.0,
            derivative_step: 1e-5,
            iter_limit: 100,
        }
    }
}

/// Converged solution.
#[derive(Clone, Debug)]
pub struct NewtonSolution {
    /// Root estimate
    pub x: DVector<f64>,
    /// Residual max-norm at the root estimate
    pub residual_norm: f64,
    /// Iterations spent
    pub iterations: usize,
}

/// Solve `r(x) = 0` by damped Newton iteration.
///
/// The Jacobian is approximated column-wise by forward differences with the
/// configured uniform step. Residual evaluation failures abort the solve and
/// are reported as [`SolverError::Residual`] through the caller's mapping.
pub fn newton_solve<F>(
    mut residual: F,
    x0: DVector<f64>,
    settings: &NewtonSettings,
) -> SolverResult<NewtonSolution>
where
    F: FnMut(&DVector<f64>) -> SolverResult<DVector<f64>>,
{
    let n = x0.len();
    let mut x = x0;
    let mut r = residual(&x)?;
    if r.len() != n {
        return Err(SolverError::DimensionMismatch {
            expected: n,
            got: r.len(),
        });
    }
    let mut r_norm = r.amax();

    for iter in 0..settings.iter_limit {
        if r_norm < settings.precision {
            debug!(iterations = iter, residual_norm = r_norm, "newton converged");
            return Ok(NewtonSolution {
                x,
                residual_norm: r_norm,
                iterations: iter,
            });
        }

        // Forward-difference Jacobian, one residual evaluation per column
        let mut jac = DMatrix::<f64>::zeros(n, n);
        for j in 0..n {
            let mut x_probe = x.clone();
            x_probe[j] += settings.derivative_step;
            let r_probe = residual(&x_probe)?;
            for i in 0..n {
                jac[(i, j)] = (r_probe[i] - r[i]) / settings.derivative_step;
            }
        }

        // Solve J * dx = -r
        let dx = jac
            .lu()
            .solve(&(-&r))
            .ok_or(SolverError::SingularJacobian { iteration: iter })?;

        x += settings.damping * dx;
        r = residual(&x)?;
        r_norm = r.amax();

        debug!(iteration = iter, residual_norm = r_norm, "newton step");
    }

    if r_norm < settings.precision {
        return Ok(NewtonSolution {
            x,
            residual_norm: r_norm,
            iterations: settings.iter_limit,
        });
    }
    Err(SolverError::NotConverged {
        iterations: settings.iter_limit,
        residual_norm: r_norm,
    })
}
