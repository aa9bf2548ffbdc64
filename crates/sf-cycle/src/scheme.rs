//! Direct solution pass for the three-shaft scheme.

use crate::error::{CycleError, CycleResult};
use crate::node::{CompressorNode, TurbineNode};
use crate::state::StagnationState;
use serde::{Deserialize, Serialize};
use sf_gas::GasModel;
use tracing::info;

/// Parameters of the three-shaft gas turbine cycle: two compressor spools,
/// a gas generator turbine for each, and a free power turbine.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct CycleSpec {
    pub t_atm: f64,
    pub p_atm: f64,
    pub sigma_inlet: f64,

    pub pi_lpc: f64,
    pub eta_lpc: f64,
    pub pi_hpc: f64,
    pub eta_hpc: f64,
    /// Duct loss between the compressor spools
    pub sigma_lpc_duct: f64,

    pub t_gas: f64,
    pub sigma_burn: f64,

    pub eta_hpt: f64,
    pub eta_lpt: f64,
    pub eta_ft: f64,
    pub sigma_hpt_duct: f64,
    pub sigma_lpt_duct: f64,
    /// Exhaust back-pressure loss the free turbine must overcome
    pub sigma_exhaust: f64,

    pub eta_mech_high: f64,
    pub eta_mech_low: f64,

    /// Turbine cooling bleed extracted upstream of the HPT
    pub hpt_cool_bleed: f64,
    pub hpt_leak: f64,
    pub lpt_leak: f64,
    pub ft_leak: f64,

    /// Shaft power delivered by the free turbine, W
    pub net_power: f64,
    /// Transmission efficiency between the free turbine and the load
    pub eta_transmission: f64,
}

impl Default for CycleSpec {
    fn default() -> Self {
        Self {
            t_atm: 288.0,
            p_atm: 1e5,
            sigma_inlet: 0.98,

            pi_lpc: 4.75,
            eta_lpc: 0.84,
            pi_hpc: 4.0,
            eta_hpc: 0.82,
            sigma_lpc_duct: 0.98,

            t_gas: 1450.0,
            sigma_burn: 0.99,

            eta_hpt: 0.88,
            eta_lpt: 0.90,
            eta_ft: 0.92,
            sigma_hpt_duct: 0.98,
            sigma_lpt_duct: 0.98,
            sigma_exhaust: 0.93,

            eta_mech_high: 0.99,
            eta_mech_low: 0.99,

            hpt_cool_bleed: 0.10,
            hpt_leak: 0.01,
            lpt_leak: 0.01,
            ft_leak: 0.01,

            net_power: 16e6,
            eta_transmission: 0.98,
        }
    }
}

/// Absolute mass rate through each spool, kg/s. Bleeds and leaks make the
/// turbine rates smaller than the compressor ones.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct SpoolMassRates {
    pub lpc: f64,
    pub hpc: f64,
    pub hpt: f64,
    pub lpt: f64,
    pub ft: f64,
}

/// The five solved reference nodes plus the cycle mass flow.
///
/// Read-only after [`ThreeShaftCycle::solve`]; the staged-machine fits only
/// read their own sub-node.
#[derive(Clone, Debug)]
pub struct ThreeShaftCycle {
    pub lpc: CompressorNode,
    pub hpc: CompressorNode,
    pub hpt: TurbineNode,
    pub lpt: TurbineNode,
    pub ft: TurbineNode,
    pub mass_rates: SpoolMassRates,
}

impl ThreeShaftCycle {
    /// Single-stream pass: inlet loss, both compressors, burner, then the
    /// three turbines. HPT and LPT heat drops come from the shaft work
    /// balances; the free turbine expands to the exhaust back-pressure and
    /// sets the cycle mass flow from the net power requirement.
    pub fn solve(spec: &CycleSpec) -> CycleResult<ThreeShaftCycle> {
        if spec.net_power <= 0.0 {
            return Err(CycleError::InvalidSpec {
                what: "net power must be positive",
            });
        }

        // relative mass rate through each turbine
        let g_hpt = 1.0 - spec.hpt_cool_bleed - spec.hpt_leak;
        let g_lpt = g_hpt - spec.lpt_leak;
        let g_ft = g_lpt - spec.ft_leak;
        if g_ft <= 0.0 {
            return Err(CycleError::InvalidSpec {
                what: "bleeds and leaks consume the whole flow",
            });
        }

        let ambient = StagnationState::from_si(spec.t_atm, spec.p_atm, GasModel::Air);

        let mut lpc = CompressorNode::new(
            ambient.with_pressure_loss(spec.sigma_inlet),
            spec.pi_lpc,
            spec.eta_lpc,
        )?;
        lpc.process()?;

        let mut hpc = CompressorNode::new(
            lpc.outlet()?.with_pressure_loss(spec.sigma_lpc_duct),
            spec.pi_hpc,
            spec.eta_hpc,
        )?;
        hpc.process()?;

        let burner_exit = StagnationState::from_si(
            spec.t_gas,
            hpc.outlet()?.p.value * spec.sigma_burn,
            GasModel::CombustionProducts,
        );

        // HPT drives the HPC, LPT drives the LPC; both balances are per
        // unit of compressor flow, so the turbine's smaller flow raises
        // its specific heat drop.
        let hd_hpt = hpc.specific_work()? / (spec.eta_mech_high * g_hpt);
        let mut hpt = TurbineNode::from_heat_drop(burner_exit, hd_hpt, spec.eta_hpt)?;
        hpt.process()?;

        let hd_lpt = lpc.specific_work()? / (spec.eta_mech_low * g_lpt);
        let mut lpt = TurbineNode::from_heat_drop(
            hpt.outlet()?.with_pressure_loss(spec.sigma_hpt_duct),
            hd_lpt,
            spec.eta_lpt,
        )?;
        lpt.process()?;

        let ft_inlet = lpt.outlet()?.with_pressure_loss(spec.sigma_lpt_duct);
        let p_exhaust = spec.p_atm / spec.sigma_exhaust;
        let pi_ft = ft_inlet.p.value / p_exhaust;
        if pi_ft <= 1.0 {
            return Err(CycleError::NonPhysical {
                what: format!(
                    "no expansion left for the free turbine (pi_ft = {pi_ft:.3})"
                ),
            });
        }
        let mut ft = TurbineNode::new(ft_inlet, pi_ft, spec.eta_ft)?;
        ft.process()?;

        let mass_rate = spec.net_power / (spec.eta_transmission * g_ft * ft.heat_drop()?);
        let mass_rates = SpoolMassRates {
            lpc: mass_rate,
            hpc: mass_rate,
            hpt: mass_rate * g_hpt,
            lpt: mass_rate * g_lpt,
            ft: mass_rate * g_ft,
        };

        info!(
            mass_rate,
            pi_ft,
            hd_hpt,
            hd_lpt,
            "three-shaft cycle solved"
        );

        Ok(ThreeShaftCycle {
            lpc,
            hpc,
            hpt,
            lpt,
            ft,
            mass_rates,
        })
    }
}
