//! Stage-axis distribution laws.
//!
//! A multi-stage machine distributes its design parameters (loading
//! coefficient, efficiency, reactivity, flow coefficient, ...) along the
//! stage axis `[0, N-1]`. This crate provides the shapes those profiles
//! take (constant, linear, bi-parabolic) and the scalable wrapper the
//! cycle-fit root-finder mutates.

pub mod distribution;
pub mod error;
pub mod scaled;

pub use distribution::Distribution;
pub use error::{LawError, LawResult};
pub use scaled::ScaledLaw;
