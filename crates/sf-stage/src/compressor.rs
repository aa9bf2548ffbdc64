//! Mean-line stage stacking for an axial compressor.
//!
//! Per stage, in order:
//! 1. compressible continuity resolves the annulus: the first stage sizes
//!    its outer diameter from the flow-coefficient law and the inlet
//!    hub/tip ratio, later stages inherit an annulus evolved by the flare
//!    angles and resolve the reduced axial velocity instead;
//! 2. stage work from the loading law: `dh = labour * ht * u^2` with `u`
//!    the outer blade speed;
//! 3. stage pressure ratio from the adiabatic-efficiency law:
//!    `pi = (1 + eta * dT/T0)^(k/(k-1))`.
//!
//! Both continuity resolutions are relaxed fixed points on the reduced
//! velocity (initial value, relaxation factor, tolerance and cap come from
//! the machine config).

use crate::common::{a_crit, static_density};
use crate::error::{StageError, StageResult};
use crate::geom::StageGeomSpec;
use crate::machine::{Aggregates, StagedMachine};
use serde::Serialize;
use sf_core::numeric::{RelaxSettings, relaxed_fixed_point};
use sf_core::units::omega_from_rpm;
use sf_cycle::StagnationState;
use sf_gas::Gas;
use sf_laws::ScaledLaw;
use std::f64::consts::PI;
use tracing::debug;

/// Per-stage parameter laws of a staged compressor.
#[derive(Clone, Copy, Debug)]
pub struct CompressorLaws {
    /// Loading coefficient, capped at the configured limit; fit unknown x1
    pub ht: ScaledLaw,
    /// Degree of reaction
    pub reactivity: ScaledLaw,
    /// Work input coefficient
    pub labour: ScaledLaw,
    /// Stage adiabatic efficiency, capped at the configured limit; fit
    /// unknown x2
    pub eta: ScaledLaw,
    /// Flow coefficient `c_a / u`
    pub ca: ScaledLaw,
}

/// Knobs of the per-stage continuity fixed point.
#[derive(Clone, Copy, Debug)]
pub struct StackingNumerics {
    pub precision: f64,
    pub relax_coef: f64,
    pub init_lambda: f64,
    pub iter_limit: usize,
}

/// Resolved state of one compressor stage.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct CompressorStageRecord {
    pub stage: usize,
    /// Effective loading coefficient (after scale and cap)
    pub ht: f64,
    pub eta_ad: f64,
    pub reactivity: f64,
    /// Realized flow coefficient `c_a / u`
    pub ca: f64,
    /// Reduced axial velocity
    pub lambda: f64,
    /// Outer blade speed, m/s
    pub u_out: f64,
    pub d_out: f64,
    pub d_in: f64,
    /// Hub/tip diameter ratio
    pub d_rel: f64,
    pub blade_length: f64,
    /// Axial extent of the stage (both rows plus gaps), m
    pub axial_width: f64,
    pub t_in: f64,
    pub p_in: f64,
    pub pi: f64,
    /// Specific work, J/kg
    pub work: f64,
}

/// Staged axial compressor.
#[derive(Clone, Debug)]
pub struct StagedCompressor {
    geom: Vec<StageGeomSpec>,
    laws: CompressorLaws,
    rpm: f64,
    d_rel_in: f64,
    numerics: StackingNumerics,
    inlet: Option<StagnationState>,
    mass_rate: Option<f64>,
    records: Vec<CompressorStageRecord>,
    aggregates: Option<Aggregates>,
}

impl StagedCompressor {
    pub fn new(
        rpm: f64,
        d_rel_in: f64,
        geom: Vec<StageGeomSpec>,
        laws: CompressorLaws,
        numerics: StackingNumerics,
    ) -> StageResult<Self> {
        if geom.is_empty() {
            return Err(StageError::Geometry {
                what: "a staged compressor needs at least one stage",
                stage: 0,
            });
        }
        if !(d_rel_in > 0.0 && d_rel_in < 1.0) {
            return Err(StageError::Geometry {
                what: "inlet hub/tip ratio must be in (0, 1)",
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
            d_rel_in,
            numerics,
            inlet: None,
            mass_rate: None,
            records: Vec::new(),
            aggregates: None,
        })
    }

    pub fn stage_count(&self) -> usize {
        self.geom.len()
    }

    /// Total specific work after equilibration, J/kg.
    pub fn specific_work(&self) -> StageResult<f64> {
        self.aggregates
            .map(|a| a.specific_energy)
            .ok_or(StageError::NotEquilibrated)
    }

    pub fn outlet(&self) -> StageResult<StagnationState> {
        self.aggregates
            .map(|a| a.outlet)
            .ok_or(StageError::NotEquilibrated)
    }

    fn relax_settings(&self) -> RelaxSettings {
        RelaxSettings {
            relax_coef: self.numerics.relax_coef,
            precision: self.numerics.precision,
            iter_limit: self.numerics.iter_limit,
        }
    }
}

impl StagedMachine for StagedCompressor {
    type Record = CompressorStageRecord;

    fn set_inlet(&mut self, inlet: StagnationState) {
        self.inlet = Some(inlet);
        self.aggregates = None;
    }

    fn set_mass_rate(&mut self, mass_rate: f64) {
        self.mass_rate = Some(mass_rate);
        self.aggregates = None;
    }

    fn set_fit_scales(&mut self, x1: f64, x2: f64) {
        self.laws.ht.set_scale(x1);
        self.laws.eta.set_scale(x2);
        self.aggregates = None;
    }

    fn equilibrate(&mut self) -> StageResult<()> {
        let inlet = self.inlet.ok_or(StageError::MissingInput {
            what: "compressor inlet state",
        })?;
        let mass_rate = self.mass_rate.ok_or(StageError::MissingInput {
            what: "compressor mass rate",
        })?;
        if !(mass_rate > 0.0) {
            return Err(StageError::NonPhysical {
                what: format!("mass rate must be positive, got {mass_rate}"),
            });
        }

        let gas = inlet.gas;
        let omega = omega_from_rpm(self.rpm);
        let settings = self.relax_settings();

        let t_in_total = inlet.t.value;
        let mut t0 = inlet.t.value;
        let mut p0 = inlet.p.value;
        let mut total_work = 0.0;

        // annulus lines, set by the first stage and evolved by the flares
        let mut d_out = 0.0;
        let mut d_in = 0.0;
        let mut lambda_prev = self.numerics.init_lambda;

        self.records.clear();
        self.aggregates = None;

        for (i, stage_geom) in self.geom.iter().enumerate() {
            let x = i as f64;
            let ht = self.laws.ht.value_at(x);
            let eta_ad = self.laws.eta.value_at(x);
            let reactivity = self.laws.reactivity.value_at(x);
            let labour = self.laws.labour.value_at(x);
            let ca = self.laws.ca.value_at(x);
            if !(ca > 0.0) {
                return Err(StageError::NonPhysical {
                    what: format!("flow coefficient must be positive at stage {i}"),
                });
            }
            if !(eta_ad > 0.0) {
                return Err(StageError::NonPhysical {
                    what: format!("stage efficiency must be positive at stage {i}"),
                });
            }

            let k = gas.k(t0);
            let r = gas.r();
            let a_cr = a_crit(k, r, t0);

            let lambda = if i == 0 {
                // Solve annulus size and reduced velocity together: the
                // axial velocity follows the blade speed through the flow
                // coefficient, and the blade speed follows the diameter
                // continuity asks for.
                let d_rel = self.d_rel_in;
                let lambda = relaxed_fixed_point(
                    self.numerics.init_lambda,
                    settings,
                    "inlet annulus sizing",
                    |lambda: f64| -> StageResult<f64> {
                        let rho = static_density(lambda.max(0.0), k, r, t0, p0)?;
                        let d =
                            (8.0 * mass_rate / (PI * rho * ca * omega * (1.0 - d_rel * d_rel)))
                                .cbrt();
                        let c_a = ca * omega * d / 2.0;
                        Ok(c_a / a_cr)
                    },
                )?;
                let rho = static_density(lambda, k, r, t0, p0)?;
                d_out = (8.0 * mass_rate / (PI * rho * ca * omega * (1.0 - d_rel * d_rel))).cbrt();
                d_in = d_rel * d_out;
                lambda
            } else {
                // Annulus fixed by the flare evolution; continuity resolves
                // the reduced axial velocity.
                let area = PI / 4.0 * (d_out * d_out - d_in * d_in);
                relaxed_fixed_point(
                    lambda_prev,
                    settings,
                    "stage continuity",
                    |lambda: f64| -> StageResult<f64> {
                        let rho = static_density(lambda.max(0.0), k, r, t0, p0)?;
                        let c_a = mass_rate / (rho * area);
                        Ok(c_a / a_cr)
                    },
                )?
            };
            lambda_prev = lambda;

            let u_out = omega * d_out / 2.0;
            let c_a = lambda * a_cr;
            let blade_length = (d_out - d_in) / 2.0;
            if blade_length <= 0.0 {
                return Err(StageError::NonPhysical {
                    what: format!("annulus closed at stage {i}"),
                });
            }

            // stage work and pressure ratio
            let work = labour * ht * u_out * u_out;
            let dt_guess = work / gas.cp(t0);
            let cp_m = gas.cp_mean(t0, t0 + dt_guess);
            let dt = work / cp_m;
            let k_m = gas.k_mean(t0, t0 + dt);
            let pi = (1.0 + eta_ad * dt / t0).powf(k_m / (k_m - 1.0));

            let axial_width = stage_geom.rotor.axial_width(blade_length)
                + stage_geom.stator.axial_width(blade_length);

            self.records.push(CompressorStageRecord {
                stage: i,
                ht,
                eta_ad,
                reactivity,
                ca: c_a / u_out,
                lambda,
                u_out,
                d_out,
                d_in,
                d_rel: d_in / d_out,
                blade_length,
                axial_width,
                t_in: t0,
                p_in: p0,
                pi,
                work,
            });

            total_work += work;
            t0 += dt;
            p0 *= pi;

            // evolve the annulus to the next stage inlet
            d_in += 2.0 * axial_width * stage_geom.rotor.gamma_in.tan();
            d_out += 2.0 * axial_width * stage_geom.rotor.gamma_out.tan();
            if d_in >= d_out {
                return Err(StageError::NonPhysical {
                    what: format!("flare angles close the annulus after stage {i}"),
                });
            }
        }

        let pi_total = p0 / inlet.p.value;
        let k_m = gas.k_mean(t_in_total, t0);
        let cp_m = gas.cp_mean(t_in_total, t0);
        let ideal_work = cp_m * t_in_total * (pi_total.powf((k_m - 1.0) / k_m) - 1.0);
        let efficiency = ideal_work / total_work;

        debug!(
            stages = self.geom.len(),
            pi_total, efficiency, "compressor equilibrated"
        );

        self.aggregates = Some(Aggregates {
            pressure_ratio: pi_total,
            efficiency,
            specific_energy: total_work,
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

    fn stages(&self) -> &[CompressorStageRecord] {
        &self.records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::BladeRowSpec;
    use sf_gas::GasModel;
    use sf_laws::Distribution;

    fn row() -> BladeRowSpec {
        BladeRowSpec {
            elongation: 4.0,
            gap_rel: 0.1,
            gamma_in: 0.3,
            gamma_out: 0.0,
            t_rel: None,
        }
    }

    fn laws() -> CompressorLaws {
        CompressorLaws {
            ht: ScaledLaw::with_cap(Distribution::constant(0.25), 1.0, 0.6),
            reactivity: ScaledLaw::unscaled(Distribution::constant(0.5)),
            labour: ScaledLaw::unscaled(Distribution::constant(0.99)),
            eta: ScaledLaw::with_cap(Distribution::constant(0.85), 1.0, 0.92),
            ca: ScaledLaw::unscaled(Distribution::constant(0.5)),
        }
    }

    fn numerics() -> StackingNumerics {
        StackingNumerics {
            precision: 1e-6,
            relax_coef: 0.5,
            init_lambda: 0.4,
            iter_limit: 500,
        }
    }

    fn three_stage() -> StagedCompressor {
        let geom = vec![
            StageGeomSpec {
                rotor: row(),
                stator: row(),
            };
            3
        ];
        StagedCompressor::new(6500.0, 0.5, geom, laws(), numerics()).unwrap()
    }

    fn equilibrated(mut machine: StagedCompressor) -> StagedCompressor {
        machine.set_inlet(StagnationState::from_si(288.0, 1e5, GasModel::Air));
        machine.set_mass_rate(60.0);
        machine.equilibrate().unwrap();
        machine
    }

    #[test]
    fn aggregates_unavailable_before_equilibrate() {
        let machine = three_stage();
        assert!(matches!(
            machine.pressure_ratio(),
            Err(StageError::NotEquilibrated)
        ));
    }

    #[test]
    fn stacking_compresses_and_heats() {
        let machine = equilibrated(three_stage());
        let pi = machine.pressure_ratio().unwrap();
        let eta = machine.efficiency().unwrap();
        assert!(pi > 1.5, "three loaded stages must compress, pi = {pi}");
        assert!(eta > 0.5 && eta < 1.0, "eta = {eta}");
        assert_eq!(machine.stages().len(), 3);
        let out = machine.outlet().unwrap();
        assert!(out.t.value > 288.0);
    }

    #[test]
    fn pressure_ratio_monotone_in_ht_scale() {
        let mut machine = equilibrated(three_stage());
        let pi_base = machine.pressure_ratio().unwrap();

        machine.set_fit_scales(1.3, 1.0);
        machine.equilibrate().unwrap();
        let pi_loaded = machine.pressure_ratio().unwrap();
        assert!(pi_loaded > pi_base);

        machine.set_fit_scales(0.7, 1.0);
        machine.equilibrate().unwrap();
        let pi_unloaded = machine.pressure_ratio().unwrap();
        assert!(pi_unloaded < pi_base);
    }

    #[test]
    fn ht_cap_saturates_loading() {
        let mut machine = equilibrated(three_stage());
        // cap is 0.6; a huge scale must clamp every stage to it
        machine.set_fit_scales(100.0, 1.0);
        machine.equilibrate().unwrap();
        for record in machine.stages() {
            assert!((record.ht - 0.6).abs() < 1e-12);
        }
    }

    #[test]
    fn mutation_invalidates_aggregates() {
        let mut machine = equilibrated(three_stage());
        machine.set_fit_scales(1.1, 1.0);
        assert!(matches!(
            machine.pressure_ratio(),
            Err(StageError::NotEquilibrated)
        ));
    }

    #[test]
    fn hub_rises_through_the_machine() {
        let machine = equilibrated(three_stage());
        let records = machine.stages();
        assert!(records[2].d_rel > records[0].d_rel);
        // constant tip line with gamma_out = 0
        assert!((records[2].d_out - records[0].d_out).abs() < 1e-9);
    }
}
