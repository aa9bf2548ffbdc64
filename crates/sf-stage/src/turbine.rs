//! Mean-line stage stacking for an axial turbine.
//!
//! The total heat drop is the first fit unknown; a unit-height distribution
//! shape splits it over the stages:
//!
//! ```text
//! hd_i = Ht * f(i) / sum_j f(j)
//! ```
//!
//! Stage efficiency comes from the velocity-coefficient laws (phi for the
//! stator, psi for the rotor, both scaled by the second fit unknown and
//! value-capped at one) minus a tip-clearance loss. The stage expansion
//! ratio follows from the isentropic relation, and the mean-line annulus
//! from continuity at the stator exit.

use crate::error::{StageError, StageResult};
use crate::geom::StageGeomSpec;
use crate::machine::{Aggregates, StagedMachine};
use serde::Serialize;
use sf_core::units::omega_from_rpm;
use sf_cycle::StagnationState;
use sf_gas::Gas;
use sf_laws::{Distribution, ScaledLaw};
use std::f64::consts::PI;
use tracing::debug;

/// Per-stage parameter laws of a staged turbine.
#[derive(Clone, Copy, Debug)]
pub struct TurbineLaws {
    /// Stator velocity coefficient, value-capped at 1; scaled by fit x2
    pub phi: ScaledLaw,
    /// Rotor velocity coefficient, value-capped at 1; scaled by fit x2
    pub psi: ScaledLaw,
    /// Degree of reaction
    pub reactivity: ScaledLaw,
    /// Radial tip gap relative to the mean diameter
    pub air_gap: ScaledLaw,
    /// Unit-height heat-drop distribution shape (normalized over stages)
    pub heat_drop_shape: Distribution,
}

/// Resolved state of one turbine stage.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct TurbineStageRecord {
    pub stage: usize,
    /// Stage heat drop, J/kg
    pub heat_drop: f64,
    pub phi: f64,
    pub psi: f64,
    pub eta: f64,
    pub reactivity: f64,
    pub pi: f64,
    /// Mean blade speed, m/s
    pub u: f64,
    pub d_mean: f64,
    pub blade_length: f64,
    /// Blade length over mean diameter
    pub l_rel: f64,
    /// Stator exit velocity, m/s
    pub c1: f64,
    /// Axial component of the stator exit velocity, m/s
    pub c_a1: f64,
    pub stator_blade_count: Option<u32>,
    pub rotor_blade_count: Option<u32>,
    pub t_in: f64,
    pub p_in: f64,
}

/// Staged axial turbine.
#[derive(Clone, Debug)]
pub struct StagedTurbine {
    geom: Vec<StageGeomSpec>,
    laws: TurbineLaws,
    rpm: f64,
    /// Flow angle behind the first stator, rad
    alpha1: f64,
    /// Inlet blade length over mean diameter
    l_rel_in: f64,
    /// Total heat drop, J/kg; the first fit unknown
    total_heat_drop: Option<f64>,
    inlet: Option<StagnationState>,
    mass_rate: Option<f64>,
    records: Vec<TurbineStageRecord>,
    aggregates: Option<Aggregates>,
}

impl StagedTurbine {
    pub fn new(
        rpm: f64,
        alpha1: f64,
        total_heat_drop: Option<f64>,
        l_rel_in: f64,
        geom: Vec<StageGeomSpec>,
        laws: TurbineLaws,
    ) -> StageResult<Self> {
        if geom.is_empty() {
            return Err(StageError::Geometry {
                what: "a staged turbine needs at least one stage",
                stage: 0,
            });
        }
        if !(alpha1 > 0.0 && alpha1 < std::f64::consts::FRAC_PI_2) {
            return Err(StageError::Geometry {
                what: "inlet swirl angle must be in (0, pi/2)",
                stage: 0,
            });
        }
        if !(l_rel_in > 0.0 && l_rel_in < 1.0) {
            return Err(StageError::Geometry {
                what: "inlet relative blade length must be in (0, 1)",
                stage: 0,
            });
        }
        for (i, stage) in geom.iter().enumerate() {
            stage.validate(i)?;
        }
        Ok(Self {
            geom,
            laws,
            rpm,
            alpha1,
            l_rel_in,
            total_heat_drop,
            inlet: None,
            mass_rate: None,
            records: Vec::new(),
            aggregates: None,
        })
    }

    pub fn stage_count(&self) -> usize {
        self.geom.len()
    }

    /// Current total heat drop, J/kg.
    pub fn heat_drop(&self) -> StageResult<f64> {
        self.total_heat_drop.ok_or(StageError::MissingInput {
            what: "turbine total heat drop",
        })
    }

    pub fn outlet(&self) -> StageResult<StagnationState> {
        self.aggregates
            .map(|a| a.outlet)
            .ok_or(StageError::NotEquilibrated)
    }

    /// Normalized per-stage heat-drop weights.
    fn stage_weights(&self) -> StageResult<Vec<f64>> {
        let weights: Vec<f64> = (0..self.geom.len())
            .map(|i| self.laws.heat_drop_shape.value_at(i as f64))
            .collect();
        let sum: f64 = weights.iter().sum();
        if !(sum > 0.0) || weights.iter().any(|w| *w < 0.0) {
            return Err(StageError::NonPhysical {
                what: "heat-drop distribution must be positive over the stages".to_string(),
            });
        }
        Ok(weights.into_iter().map(|w| w / sum).collect())
    }
}

impl StagedMachine for StagedTurbine {
    type Record = TurbineStageRecord;

    fn set_inlet(&mut self, inlet: StagnationState) {
        self.inlet = Some(inlet);
        self.aggregates = None;
    }

    fn set_mass_rate(&mut self, mass_rate: f64) {
        self.mass_rate = Some(mass_rate);
        self.aggregates = None;
    }

    fn set_fit_scales(&mut self, x1: f64, x2: f64) {
        self.total_heat_drop = Some(x1);
        self.laws.phi.set_scale(x2);
        self.laws.psi.set_scale(x2);
        self.aggregates = None;
    }

    fn equilibrate(&mut self) -> StageResult<()> {
        let inlet = self.inlet.ok_or(StageError::MissingInput {
            what: "turbine inlet state",
        })?;
        let mass_rate = self.mass_rate.ok_or(StageError::MissingInput {
            what: "turbine mass rate",
        })?;
        let ht_total = self.heat_drop()?;
        if !(ht_total > 0.0) {
            return Err(StageError::NonPhysical {
                what: format!("total heat drop must be positive, got {ht_total:.1}"),
            });
        }
        if !(mass_rate > 0.0) {
            return Err(StageError::NonPhysical {
                what: format!("mass rate must be positive, got {mass_rate}"),
            });
        }

        let gas = inlet.gas;
        let omega = omega_from_rpm(self.rpm);
        let weights = self.stage_weights()?;

        let t_in_total = inlet.t.value;
        let mut t0 = inlet.t.value;
        let mut p0 = inlet.p.value;

        // cylindrical mean line: set by the first stage, kept thereafter
        let mut d_mean = 0.0;
        let mut l_rel = self.l_rel_in;

        self.records.clear();
        self.aggregates = None;

        for (i, (stage_geom, weight)) in self.geom.iter().zip(&weights).enumerate() {
            let x = i as f64;
            let heat_drop = ht_total * weight;
            let phi = self.laws.phi.value_at(x);
            let psi = self.laws.psi.value_at(x);
            let reactivity = self.laws.reactivity.value_at(x);
            let air_gap = self.laws.air_gap.value_at(x);
            if !(phi > 0.0 && psi > 0.0) {
                return Err(StageError::NonPhysical {
                    what: format!("velocity coefficients must be positive at stage {i}"),
                });
            }
            if !(0.0..1.0).contains(&reactivity) {
                return Err(StageError::NonPhysical {
                    what: format!("reactivity out of [0, 1) at stage {i}"),
                });
            }

            let tip_loss = air_gap / l_rel;
            let eta = phi * psi * (1.0 - tip_loss);
            if !(eta > 0.0) {
                return Err(StageError::NonPhysical {
                    what: format!("tip clearance loss consumes stage {i}"),
                });
            }

            let dt_guess = heat_drop / gas.cp(t0);
            let cp_m = gas.cp_mean(t0, t0 - dt_guess);
            let dt = heat_drop / cp_m;
            let k_m = gas.k_mean(t0, t0 - dt);

            let base = 1.0 - heat_drop / (eta * cp_m * t0);
            if base <= 0.0 {
                return Err(StageError::NonPhysical {
                    what: format!(
                        "stage {i} heat drop {heat_drop:.0} J/kg exceeds the available enthalpy"
                    ),
                });
            }
            let pi = base.powf(-k_m / (k_m - 1.0));

            // stator exit state and continuity
            let hd_stator = (1.0 - reactivity) * heat_drop;
            let c1 = phi * (2.0 * hd_stator).sqrt();
            let c_a1 = c1 * self.alpha1.sin();
            if !(c_a1 > 0.0) {
                return Err(StageError::NonPhysical {
                    what: format!("no axial velocity behind the stator of stage {i}"),
                });
            }
            let t1 = t0 - hd_stator / cp_m;
            if t1 <= 0.0 {
                return Err(StageError::NonPhysical {
                    what: format!("static temperature not positive at stage {i}"),
                });
            }
            let p1 = p0 * (t1 / t0).powf(k_m / (k_m - 1.0));
            let rho1 = p1 / (gas.r() * t1);
            let area = mass_rate / (rho1 * c_a1);

            if i == 0 {
                d_mean = (area / (PI * self.l_rel_in)).sqrt();
            }
            let blade_length = area / (PI * d_mean);
            l_rel = blade_length / d_mean;
            let u = omega * d_mean / 2.0;

            let blade_count = |row: &crate::geom::BladeRowSpec| -> Option<u32> {
                row.t_rel.map(|t_rel| {
                    let chord = blade_length / row.elongation;
                    (PI * d_mean / (t_rel * chord)).round().max(1.0) as u32
                })
            };

            self.records.push(TurbineStageRecord {
                stage: i,
                heat_drop,
                phi,
                psi,
                eta,
                reactivity,
                pi,
                u,
                d_mean,
                blade_length,
                l_rel,
                c1,
                c_a1,
                stator_blade_count: blade_count(&stage_geom.stator),
                rotor_blade_count: blade_count(&stage_geom.rotor),
                t_in: t0,
                p_in: p0,
            });

            t0 -= dt;
            p0 /= pi;
        }

        let pi_total = inlet.p.value / p0;
        let k_m = gas.k_mean(t_in_total, t0);
        let cp_m = gas.cp_mean(t_in_total, t0);
        let ideal_drop = cp_m * t_in_total * (1.0 - pi_total.powf(-(k_m - 1.0) / k_m));
        let efficiency = ht_total / ideal_drop;

        debug!(
            stages = self.geom.len(),
            pi_total, efficiency, "turbine equilibrated"
        );

        self.aggregates = Some(Aggregates {
            pressure_ratio: pi_total,
            efficiency,
            specific_energy: ht_total,
            outlet: StagnationState::from_si(t0, p0, gas),
        });
        Ok(())
    }

    fn pressure_ratio(&self) -> StageResult<f64> {
        self.aggregates
            .map(|a| a.pressure_ratio)
            .ok_or(StageError::NotEquilibrated)
    }

    fn efficiency(&self) -> StageResult<f64> {
        self.aggregates
            .map(|a| a.efficiency)
            .ok_or(StageError::NotEquilibrated)
    }

    fn stages(&self) -> &[TurbineStageRecord] {
        &self.records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::BladeRowSpec;
    use sf_gas::GasModel;

    fn row(t_rel: f64) -> BladeRowSpec {
        BladeRowSpec {
            elongation: 1.75,
            gap_rel: 0.1,
            gamma_in: -0.1,
            gamma_out: 0.1,
            t_rel: Some(t_rel),
        }
    }

    fn laws() -> TurbineLaws {
        TurbineLaws {
            phi: ScaledLaw::with_cap(Distribution::constant(0.97), 1.0, 1.0),
            psi: ScaledLaw::with_cap(Distribution::constant(0.97), 1.0, 1.0),
            reactivity: ScaledLaw::unscaled(Distribution::constant(0.4)),
            air_gap: ScaledLaw::unscaled(Distribution::constant(0.001)),
            heat_drop_shape: Distribution::bi_parabolic(0.0, 1.0, 0.0, 0.0, 0.5).unwrap(),
        }
    }

    fn two_stage() -> StagedTurbine {
        let geom = vec![
            StageGeomSpec {
                rotor: row(0.7),
                stator: row(0.7),
            };
            2
        ];
        StagedTurbine::new(11500.0, 0.35, Some(3.0e5), 0.1, geom, laws()).unwrap()
    }

    fn equilibrated(mut machine: StagedTurbine) -> StagedTurbine {
        machine.set_inlet(StagnationState::from_si(
            1450.0,
            18e5,
            GasModel::CombustionProducts,
        ));
        machine.set_mass_rate(60.0);
        machine.equilibrate().unwrap();
        machine
    }

    #[test]
    fn stage_heat_drops_sum_to_total() {
        let machine = equilibrated(two_stage());
        let sum: f64 = machine.stages().iter().map(|s| s.heat_drop).sum();
        assert!((sum - 3.0e5).abs() < 1e-6);
    }

    #[test]
    fn heat_drop_follows_distribution_shape() {
        let machine = equilibrated(two_stage());
        let records = machine.stages();
        // shape: 1 at stage 0, 0.5 at stage 1 -> weights 2/3 and 1/3
        assert!((records[0].heat_drop / records[1].heat_drop - 2.0).abs() < 1e-9);
    }

    #[test]
    fn expansion_and_efficiency_in_range() {
        let machine = equilibrated(two_stage());
        let pi = machine.pressure_ratio().unwrap();
        let eta = machine.efficiency().unwrap();
        assert!(pi > 1.5 && pi < 6.0, "pi = {pi}");
        assert!(eta > 0.8 && eta < 1.0, "eta = {eta}");
        let out = machine.outlet().unwrap();
        assert!(out.t.value < 1450.0);
    }

    #[test]
    fn velocity_coefficient_scale_raises_efficiency() {
        let mut machine = equilibrated(two_stage());
        let eta_base = machine.efficiency().unwrap();

        machine.set_fit_scales(3.0e5, 0.95);
        machine.equilibrate().unwrap();
        let eta_lossy = machine.efficiency().unwrap();
        assert!(eta_lossy < eta_base);
    }

    #[test]
    fn velocity_coefficients_capped_at_one() {
        let mut machine = equilibrated(two_stage());
        machine.set_fit_scales(3.0e5, 5.0);
        machine.equilibrate().unwrap();
        for record in machine.stages() {
            assert!(record.phi <= 1.0 && record.psi <= 1.0);
        }
    }

    #[test]
    fn missing_heat_drop_reported() {
        let geom = vec![StageGeomSpec {
            rotor: row(0.7),
            stator: row(0.7),
        }];
        let mut machine = StagedTurbine::new(11500.0, 0.35, None, 0.1, geom, laws()).unwrap();
        machine.set_inlet(StagnationState::from_si(
            1450.0,
            18e5,
            GasModel::CombustionProducts,
        ));
        machine.set_mass_rate(60.0);
        assert!(matches!(
            machine.equilibrate(),
            Err(StageError::MissingInput { .. })
        ));
    }

    #[test]
    fn blade_counts_from_pitch() {
        let machine = equilibrated(two_stage());
        for record in machine.stages() {
            assert!(record.stator_blade_count.unwrap() > 10);
            assert!(record.rotor_blade_count.unwrap() > 10);
        }
    }
}
