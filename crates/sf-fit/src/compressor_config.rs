//! Compressor spool configuration.

use crate::config::{MachineConfig, check_array, linear_law, peak_law};
use crate::error::FitResult;
use serde::{Deserialize, Serialize};
use sf_cycle::CompressorNode;
use sf_laws::{Distribution, ScaledLaw};
use sf_stage::{BladeRowSpec, CompressorLaws, StackingNumerics, StageGeomSpec, StagedCompressor};

/// Everything needed to lay out one compressor spool stage by stage.
///
/// Per-stage arrays must cover at least `stage_num` entries. The loading
/// and efficiency parameters describe bi-parabolic profiles over the stage
/// axis `[0, stage_num - 1]`; reactivity and flow coefficient vary
/// linearly. For a single stage every profile collapses to a constant.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CompressorSpoolConfig {
    // global parameters
    pub stage_num: usize,
    pub rpm: f64,
    /// Mass flow through the spool, kg/s; usually set from the solved
    /// cycle after construction
    pub mass_rate: f64,
    /// Inlet hub/tip diameter ratio
    pub d_rel_in: f64,

    // geometric parameters, one entry per stage
    pub rotor_elongation: Vec<f64>,
    pub rotor_gap_rel: Vec<f64>,
    pub stator_elongation: Vec<f64>,
    pub stator_gap_rel: Vec<f64>,
    /// Hub flare angles, rad
    pub gamma_in: Vec<f64>,
    /// Tip flare angles, rad
    pub gamma_out: Vec<f64>,

    // loading coefficient profile (bi-parabolic)
    pub ht_start_loss: f64,
    pub ht_end_loss: f64,
    pub ht_peak: f64,
    pub ht_peak_coord: f64,
    /// Ceiling the fit may raise the per-stage loading to
    pub ht_limit: f64,

    // adiabatic efficiency profile (bi-parabolic)
    pub eta_start_loss: f64,
    pub eta_end_loss: f64,
    pub eta_peak: f64,
    pub eta_peak_coord: f64,
    /// Ceiling the fit may raise the per-stage efficiency to
    pub eta_limit: f64,

    // linear profiles
    pub reactivity_start: f64,
    pub reactivity_end: f64,
    pub ca_start: f64,
    pub ca_end: f64,

    /// Work input coefficient, constant over the stages
    pub labour_coef: f64,

    // numerical parameters
    pub precision: f64,
    pub relax_coef: f64,
    pub init_lambda: f64,
    pub iter_limit: usize,
}

impl CompressorSpoolConfig {
    fn geometry(&self) -> Vec<StageGeomSpec> {
        (0..self.stage_num)
            .map(|i| StageGeomSpec {
                rotor: BladeRowSpec {
                    elongation: self.rotor_elongation[i],
                    gap_rel: self.rotor_gap_rel[i],
                    gamma_in: self.gamma_in[i],
                    gamma_out: self.gamma_out[i],
                    t_rel: None,
                },
                stator: BladeRowSpec {
                    elongation: self.stator_elongation[i],
                    gap_rel: self.stator_gap_rel[i],
                    gamma_in: self.gamma_in[i],
                    gamma_out: self.gamma_out[i],
                    t_rel: None,
                },
            })
            .collect()
    }

    fn laws(&self) -> FitResult<CompressorLaws> {
        Ok(CompressorLaws {
            ht: peak_law(
                self.stage_num,
                self.ht_peak,
                self.ht_peak_coord,
                self.ht_start_loss,
                self.ht_end_loss,
                Some(self.ht_limit),
            )?,
            reactivity: linear_law(self.stage_num, self.reactivity_start, self.reactivity_end)?,
            labour: ScaledLaw::unscaled(Distribution::constant(self.labour_coef)),
            eta: peak_law(
                self.stage_num,
                self.eta_peak,
                self.eta_peak_coord,
                self.eta_start_loss,
                self.eta_end_loss,
                Some(self.eta_limit),
            )?,
            ca: linear_law(self.stage_num, self.ca_start, self.ca_end)?,
        })
    }
}

impl MachineConfig for CompressorSpoolConfig {
    type Machine = StagedCompressor;
    type Reference = CompressorNode;

    fn validate(&self) -> FitResult<()> {
        let need = self.stage_num;
        check_array("rotor_elongation", self.rotor_elongation.len(), need)?;
        check_array("rotor_gap_rel", self.rotor_gap_rel.len(), need)?;
        check_array("stator_elongation", self.stator_elongation.len(), need)?;
        check_array("stator_gap_rel", self.stator_gap_rel.len(), need)?;
        check_array("gamma_in", self.gamma_in.len(), need)?;
        check_array("gamma_out", self.gamma_out.len(), need)?;
        Ok(())
    }

    fn build_machine(&self) -> FitResult<StagedCompressor> {
        self.validate()?;
        let machine = StagedCompressor::new(
            self.rpm,
            self.d_rel_in,
            self.geometry(),
            self.laws()?,
            StackingNumerics {
                precision: self.precision,
                relax_coef: self.relax_coef,
                init_lambda: self.init_lambda,
                iter_limit: self.iter_limit,
            },
        )?;
        Ok(machine)
    }

    fn mass_rate(&self) -> f64 {
        self.mass_rate
    }

    fn precision(&self) -> f64 {
        self.precision
    }

    fn initial_guess(&self, _reference: &CompressorNode) -> FitResult<[f64; 2]> {
        Ok([1.0, 1.0])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FitError;

    pub(crate) fn config(stage_num: usize) -> CompressorSpoolConfig {
        CompressorSpoolConfig {
            stage_num,
            rpm: 6500.0,
            mass_rate: 60.0,
            d_rel_in: 0.5,
            rotor_elongation: vec![4.0; stage_num],
            rotor_gap_rel: vec![0.1; stage_num],
            stator_elongation: vec![4.0; stage_num],
            stator_gap_rel: vec![0.1; stage_num],
            gamma_in: vec![0.3; stage_num],
            gamma_out: vec![0.0; stage_num],
            ht_start_loss: 0.02,
            ht_end_loss: 0.01,
            ht_peak: 0.2,
            ht_peak_coord: 1.0,
            ht_limit: 0.6,
            eta_start_loss: 0.1,
            eta_end_loss: 0.05,
            eta_peak: 0.82,
            eta_peak_coord: 1.0,
            eta_limit: 0.9,
            reactivity_start: 0.5,
            reactivity_end: 0.5,
            ca_start: 0.5,
            ca_end: 0.5,
            labour_coef: 0.99,
            precision: 1e-3,
            relax_coef: 0.1,
            init_lambda: 0.3,
            iter_limit: 1000,
        }
    }

    #[test]
    fn short_array_fails_validation_by_name() {
        let mut bad = config(5);
        bad.gamma_in.truncate(4);
        let err = bad.validate().unwrap_err();
        match err {
            FitError::Validation { array, len, need } => {
                assert_eq!(array, "gamma_in");
                assert_eq!(len, 4);
                assert_eq!(need, 5);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn exact_and_longer_arrays_pass() {
        assert!(config(5).validate().is_ok());
        let mut long = config(5);
        long.rotor_elongation.push(4.0);
        assert!(long.validate().is_ok());
    }

    #[test]
    fn build_produces_machine_with_stage_count() {
        let machine = config(3).build_machine().unwrap();
        assert_eq!(machine.stage_count(), 3);
    }

    #[test]
    fn build_rejects_bad_geometry() {
        let mut bad = config(2);
        bad.rotor_elongation[1] = 0.0;
        assert!(matches!(bad.build_machine(), Err(FitError::Build(_))));
    }
}
