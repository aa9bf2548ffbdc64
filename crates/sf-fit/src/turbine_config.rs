//! Turbine spool configuration.

use crate::config::{MachineConfig, check_array, linear_law, peak_law};
use crate::error::FitResult;
use serde::{Deserialize, Serialize};
use sf_cycle::TurbineNode;
use sf_laws::Distribution;
use sf_stage::{BladeRowSpec, StageGeomSpec, StagedTurbine, TurbineLaws};

/// Velocity coefficients never exceed one, whatever the fit asks for.
const VELOCITY_COEF_CAP: f64 = 1.0;

/// Everything needed to lay out one turbine spool stage by stage.
///
/// The total heat drop may stay unset; the fit then starts from the
/// reference node's heat drop. The phi/psi velocity-coefficient profiles
/// and the unit heat-drop distribution are bi-parabolic over the stage
/// axis; reactivity and relative tip gap vary linearly.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TurbineSpoolConfig {
    // global parameters
    pub stage_num: usize,
    pub rpm: f64,
    /// Mass flow through the spool, kg/s; usually set from the solved
    /// cycle after construction
    pub mass_rate: f64,
    /// Flow direction behind the first stator, rad
    pub alpha1: f64,
    /// Total heat drop, J/kg; deferred to fit time when unset
    pub total_heat_drop: Option<f64>,
    /// Inlet blade length over mean diameter
    pub l_rel_in: f64,

    // geometric parameters, one entry per stage
    pub stator_elongation: Vec<f64>,
    pub stator_gap_rel: Vec<f64>,
    /// Approximate stator pitch/chord ratios
    pub stator_t_rel: Vec<f64>,
    pub rotor_elongation: Vec<f64>,
    pub rotor_gap_rel: Vec<f64>,
    /// Approximate rotor pitch/chord ratios
    pub rotor_t_rel: Vec<f64>,
    pub gamma_in: Vec<f64>,
    pub gamma_out: Vec<f64>,

    // stator velocity coefficient profile (bi-parabolic)
    pub phi_start_loss: f64,
    pub phi_end_loss: f64,
    pub phi_peak: f64,
    pub phi_peak_coord: f64,

    // rotor velocity coefficient profile (bi-parabolic)
    pub psi_start_loss: f64,
    pub psi_end_loss: f64,
    pub psi_peak: f64,
    pub psi_peak_coord: f64,

    // unit heat-drop distribution (bi-parabolic; start loss is usually
    // negative so the first stage carries the largest drop)
    pub ht_start_loss: f64,
    pub ht_end_loss: f64,
    pub ht_peak_coord: f64,

    // linear profiles
    pub reactivity_start: f64,
    pub reactivity_end: f64,
    pub air_gap_rel_start: f64,
    pub air_gap_rel_end: f64,

    // numerical parameters
    pub precision: f64,
}

impl TurbineSpoolConfig {
    fn geometry(&self) -> Vec<StageGeomSpec> {
        (0..self.stage_num)
            .map(|i| StageGeomSpec {
                rotor: BladeRowSpec {
                    elongation: self.rotor_elongation[i],
                    gap_rel: self.rotor_gap_rel[i],
                    gamma_in: self.gamma_in[i],
                    gamma_out: self.gamma_out[i],
                    t_rel: Some(self.rotor_t_rel[i]),
                },
                stator: BladeRowSpec {
                    elongation: self.stator_elongation[i],
                    gap_rel: self.stator_gap_rel[i],
                    gamma_in: self.gamma_in[i],
                    gamma_out: self.gamma_out[i],
                    t_rel: Some(self.stator_t_rel[i]),
                },
            })
            .collect()
    }

    fn laws(&self) -> FitResult<TurbineLaws> {
        let heat_drop_shape = if self.stage_num > 1 {
            Distribution::bi_parabolic(
                0.0,
                (self.stage_num - 1) as f64,
                self.ht_peak_coord,
                self.ht_start_loss,
                self.ht_end_loss,
            )?
        } else {
            Distribution::constant(1.0)
        };
        Ok(TurbineLaws {
            phi: peak_law(
                self.stage_num,
                self.phi_peak,
                self.phi_peak_coord,
                self.phi_start_loss,
                self.phi_end_loss,
                Some(VELOCITY_COEF_CAP),
            )?,
            psi: peak_law(
                self.stage_num,
                self.psi_peak,
                self.psi_peak_coord,
                self.psi_start_loss,
                self.psi_end_loss,
                Some(VELOCITY_COEF_CAP),
            )?,
            reactivity: linear_law(self.stage_num, self.reactivity_start, self.reactivity_end)?,
            air_gap: linear_law(self.stage_num, self.air_gap_rel_start, self.air_gap_rel_end)?,
            heat_drop_shape,
        })
    }
}

impl MachineConfig for TurbineSpoolConfig {
    type Machine = StagedTurbine;
    type Reference = TurbineNode;

    fn validate(&self) -> FitResult<()> {
        let need = self.stage_num;
        check_array("stator_elongation", self.stator_elongation.len(), need)?;
        check_array("stator_gap_rel", self.stator_gap_rel.len(), need)?;
        check_array("stator_t_rel", self.stator_t_rel.len(), need)?;
        check_array("rotor_elongation", self.rotor_elongation.len(), need)?;
        check_array("rotor_gap_rel", self.rotor_gap_rel.len(), need)?;
        check_array("rotor_t_rel", self.rotor_t_rel.len(), need)?;
        check_array("gamma_in", self.gamma_in.len(), need)?;
        check_array("gamma_out", self.gamma_out.len(), need)?;
        Ok(())
    }

    fn build_machine(&self) -> FitResult<StagedTurbine> {
        self.validate()?;
        let machine = StagedTurbine::new(
            self.rpm,
            self.alpha1,
            self.total_heat_drop,
            self.l_rel_in,
            self.geometry(),
            self.laws()?,
        )?;
        Ok(machine)
    }

    fn mass_rate(&self) -> f64 {
        self.mass_rate
    }

    fn precision(&self) -> f64 {
        self.precision
    }

    /// Turbines start from `(Ht, 1)`: the configured heat drop when one is
    /// set, otherwise the reference node's own heat drop.
    fn initial_guess(&self, reference: &TurbineNode) -> FitResult<[f64; 2]> {
        let ht = match self.total_heat_drop {
            Some(ht) => ht,
            None => reference.heat_drop()?,
        };
        Ok([ht, 1.0])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FitError;
    use sf_cycle::{ReferenceNode, StagnationState};
    use sf_gas::GasModel;

    pub(crate) fn config(stage_num: usize) -> TurbineSpoolConfig {
        TurbineSpoolConfig {
            stage_num,
            rpm: 11500.0,
            mass_rate: 60.0,
            alpha1: 0.35,
            total_heat_drop: None,
            l_rel_in: 0.1,
            stator_elongation: vec![1.3; stage_num],
            stator_gap_rel: vec![0.1; stage_num],
            stator_t_rel: vec![0.7; stage_num],
            rotor_elongation: vec![1.75; stage_num],
            rotor_gap_rel: vec![0.1; stage_num],
            rotor_t_rel: vec![0.7; stage_num],
            gamma_in: vec![-0.1; stage_num],
            gamma_out: vec![0.1; stage_num],
            phi_start_loss: 0.0,
            phi_end_loss: 0.0,
            phi_peak: 0.97,
            phi_peak_coord: 0.0,
            psi_start_loss: 0.0,
            psi_end_loss: 0.0,
            psi_peak: 0.97,
            psi_peak_coord: 0.0,
            ht_start_loss: 0.0,
            ht_end_loss: 0.5,
            ht_peak_coord: 0.0,
            reactivity_start: 0.5,
            reactivity_end: 0.3,
            air_gap_rel_start: 0.001,
            air_gap_rel_end: 0.001,
            precision: 1e-3,
        }
    }

    #[test]
    fn short_array_fails_validation_by_name() {
        let mut bad = config(2);
        bad.rotor_t_rel.truncate(1);
        let err = bad.validate().unwrap_err();
        match err {
            FitError::Validation { array, .. } => assert_eq!(array, "rotor_t_rel"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn build_produces_machine_with_stage_count() {
        let machine = config(2).build_machine().unwrap();
        assert_eq!(machine.stage_count(), 2);
    }

    #[test]
    fn initial_guess_uses_reference_heat_drop_when_deferred() {
        let inlet = StagnationState::from_si(1450.0, 18e5, GasModel::CombustionProducts);
        let mut node = TurbineNode::from_heat_drop(inlet, 3.0e5, 0.88).unwrap();
        node.process().unwrap();
        assert!(node.is_processed());

        let guess = config(2).initial_guess(&node).unwrap();
        assert!((guess[0] - 3.0e5).abs() / 3.0e5 < 1e-6);
        assert!((guess[1] - 1.0).abs() < 1e-12);

        let mut fixed = config(2);
        fixed.total_heat_drop = Some(2.5e5);
        assert!((fixed.initial_guess(&node).unwrap()[0] - 2.5e5).abs() < 1e-9);
    }
}
