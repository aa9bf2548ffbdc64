//! Compressible-flow helpers shared by both machine kinds.

use crate::error::{StageError, StageResult};

/// Gas-dynamic temperature function `tau(lambda) = 1 - lambda^2 (k-1)/(k+1)`.
pub(crate) fn gd_tau(lambda: f64, k: f64) -> f64 {
    1.0 - lambda * lambda * (k - 1.0) / (k + 1.0)
}

/// Critical speed of sound for stagnation temperature `t0`.
pub(crate) fn a_crit(k: f64, r: f64, t0: f64) -> f64 {
    (2.0 * k / (k + 1.0) * r * t0).sqrt()
}

/// Static density from stagnation conditions at reduced velocity `lambda`.
///
/// ```text
/// rho = p0 * tau^(1/(k-1)) / (R * T0)
/// ```
pub(crate) fn static_density(lambda: f64, k: f64, r: f64, t0: f64, p0: f64) -> StageResult<f64> {
    if lambda >= 1.0 {
        return Err(StageError::NonPhysical {
            what: format!("axial flow choked (lambda = {lambda:.3})"),
        });
    }
    let tau = gd_tau(lambda, k);
    if tau <= 0.0 {
        return Err(StageError::NonPhysical {
            what: format!("gas-dynamic tau not positive (lambda = {lambda:.3})"),
        });
    }
    Ok(p0 * tau.powf(1.0 / (k - 1.0)) / (r * t0))
}
