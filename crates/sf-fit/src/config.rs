//! Shared shape of the two spool-config variants.

use crate::error::{FitError, FitResult};
use sf_cycle::ReferenceNode;
use sf_laws::{Distribution, ScaledLaw};
use sf_stage::StagedMachine;

/// A validated record that knows how to turn itself into an unfitted
/// staged machine. One implementation per machine kind; the fit driver is
/// generic over this trait.
pub trait MachineConfig {
    type Machine: StagedMachine;
    type Reference: ReferenceNode;

    /// Check every per-stage array covers the stage count. Reports the
    /// first offending array by name; side-effect-free.
    fn validate(&self) -> FitResult<()>;

    /// Build the unfitted staged machine (no inlet, no mass flow).
    fn build_machine(&self) -> FitResult<Self::Machine>;

    fn mass_rate(&self) -> f64;
    fn precision(&self) -> f64;

    /// Starting point for the two fit unknowns.
    fn initial_guess(&self, reference: &Self::Reference) -> FitResult<[f64; 2]>;
}

pub(crate) fn check_array(array: &'static str, len: usize, need: usize) -> FitResult<()> {
    if len < need {
        return Err(FitError::Validation { array, len, need });
    }
    Ok(())
}

/// Bi-parabolic law scaled to a peak value, degenerating to a constant at
/// the peak value for a single stage.
pub(crate) fn peak_law(
    stage_num: usize,
    peak: f64,
    peak_coord: f64,
    start_loss: f64,
    end_loss: f64,
    cap: Option<f64>,
) -> FitResult<ScaledLaw> {
    let dist = if stage_num > 1 {
        Distribution::bi_parabolic(
            0.0,
            (stage_num - 1) as f64,
            peak_coord,
            start_loss,
            end_loss,
        )?
    } else {
        Distribution::constant(1.0)
    };
    Ok(match cap {
        Some(cap) => ScaledLaw::with_cap(dist, peak, cap),
        None => ScaledLaw::new(dist, peak),
    })
}

/// Linear law between start and end values, degenerating to a constant at
/// the start value for a single stage.
pub(crate) fn linear_law(stage_num: usize, start: f64, end: f64) -> FitResult<ScaledLaw> {
    let dist = if stage_num > 1 {
        Distribution::linear(0.0, start, (stage_num - 1) as f64, end)?
    } else {
        Distribution::constant(start)
    };
    Ok(ScaledLaw::unscaled(dist))
}
