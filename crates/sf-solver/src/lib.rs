//! Damped Newton root-finder over R^N.
//!
//! Solves `r(x) = 0` for a black-box residual using a finite-difference
//! Jacobian with a uniform step. This is the solver the cycle fit drives
//! with its two law scale factors; it stays generic over the residual.

pub mod error;
pub mod newton;

pub use error::{SolverError, SolverResult};
pub use newton::{NewtonSettings, NewtonSolution, newton_solve};
