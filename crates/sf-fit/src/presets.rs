//! Baseline spool configurations for the three-shaft demonstrator.
//!
//! The numbers come from the engine these routines were tuned on: a
//! 16 MW three-shaft unit with a five-stage LPC (6500 rpm), a
//! seven-stage HPC (11500 rpm) and three two-stage turbines. Mass rates
//! are left zero here; [`scheme_configs`] fills them from a solved cycle.

use crate::compressor_config::CompressorSpoolConfig;
use crate::scheme::SchemeConfigs;
use crate::turbine_config::TurbineSpoolConfig;
use sf_cycle::ThreeShaftCycle;

const RPM_HIGH: f64 = 11.5e3;
const RPM_LOW: f64 = 6.5e3;
const RPM_FREE: f64 = 3.0e3;

const PRECISION: f64 = 1e-3;
const RELAX_COEF: f64 = 0.1;
const INIT_LAMBDA: f64 = 0.3;
const ITER_LIMIT: usize = 1000;

fn deg(value: f64) -> f64 {
    value.to_radians()
}

/// Five-stage low-pressure compressor.
pub fn lpc_config() -> CompressorSpoolConfig {
    CompressorSpoolConfig {
        stage_num: 5,
        rpm: RPM_LOW,
        mass_rate: 0.0,
        d_rel_in: 0.5,

        rotor_elongation: vec![4.0; 5],
        rotor_gap_rel: vec![0.1; 5],
        stator_elongation: vec![4.0; 5],
        stator_gap_rel: vec![0.1; 5],
        gamma_in: vec![deg(23.0), deg(23.0), deg(21.0), deg(19.0), deg(17.0)],
        gamma_out: vec![0.0; 5],

        ht_start_loss: 0.02,
        ht_end_loss: 0.01,
        ht_peak: 0.2,
        ht_peak_coord: 1.0,
        ht_limit: 0.7,

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

        precision: PRECISION,
        relax_coef: RELAX_COEF,
        init_lambda: INIT_LAMBDA,
        iter_limit: ITER_LIMIT,
    }
}

/// Seven-stage high-pressure compressor.
pub fn hpc_config() -> CompressorSpoolConfig {
    CompressorSpoolConfig {
        stage_num: 7,
        rpm: RPM_HIGH,
        mass_rate: 0.0,
        d_rel_in: 0.7,

        rotor_elongation: vec![3.0; 7],
        rotor_gap_rel: vec![0.1; 7],
        stator_elongation: vec![3.0; 7],
        stator_gap_rel: vec![0.1; 7],
        gamma_in: vec![
            deg(18.0),
            deg(18.0),
            deg(16.0),
            deg(16.0),
            deg(14.0),
            deg(14.0),
            deg(12.0),
        ],
        gamma_out: vec![0.0; 7],

        ht_start_loss: 0.03,
        ht_end_loss: 0.03,
        ht_peak: 0.32,
        ht_peak_coord: 2.0,
        ht_limit: 0.5,

        eta_start_loss: 0.02,
        eta_end_loss: 0.02,
        eta_peak: 0.82,
        eta_peak_coord: 2.0,
        eta_limit: 0.9,

        reactivity_start: 0.5,
        reactivity_end: 0.5,
        ca_start: 0.5,
        ca_end: 0.5,

        labour_coef: 0.99,

        precision: PRECISION,
        relax_coef: RELAX_COEF,
        init_lambda: INIT_LAMBDA,
        iter_limit: ITER_LIMIT,
    }
}

/// Two-stage high-pressure turbine. The heat drop is left unset and
/// resolved against the reference node during the fit.
pub fn hpt_config() -> TurbineSpoolConfig {
    TurbineSpoolConfig {
        stage_num: 2,
        rpm: RPM_HIGH,
        mass_rate: 0.0,
        alpha1: deg(20.0),
        total_heat_drop: None,
        l_rel_in: 0.10,

        stator_elongation: vec![1.3; 2],
        stator_gap_rel: vec![0.1; 2],
        stator_t_rel: vec![0.7; 2],
        rotor_elongation: vec![1.75; 2],
        rotor_gap_rel: vec![0.1; 2],
        rotor_t_rel: vec![0.7; 2],
        gamma_in: vec![deg(-10.0), deg(-3.0)],
        gamma_out: vec![deg(10.0), deg(3.0)],

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

        precision: PRECISION,
    }
}

/// Two-stage low-pressure turbine.
pub fn lpt_config() -> TurbineSpoolConfig {
    TurbineSpoolConfig {
        stage_num: 2,
        rpm: RPM_LOW,
        mass_rate: 0.0,
        alpha1: deg(23.0),
        total_heat_drop: None,
        l_rel_in: 0.18,

        stator_elongation: vec![1.7; 2],
        stator_gap_rel: vec![0.1; 2],
        stator_t_rel: vec![0.7; 2],
        rotor_elongation: vec![2.0; 2],
        rotor_gap_rel: vec![0.1; 2],
        rotor_t_rel: vec![0.7; 2],
        gamma_in: vec![deg(-5.0); 2],
        gamma_out: vec![deg(5.0); 2],

        phi_start_loss: 0.0,
        phi_end_loss: 0.0,
        phi_peak: 0.97,
        phi_peak_coord: 0.0,

        psi_start_loss: 0.0,
        psi_end_loss: 0.0,
        psi_peak: 0.97,
        psi_peak_coord: 0.0,

        ht_start_loss: 0.0,
        ht_end_loss: 0.0,
        ht_peak_coord: 0.0,

        reactivity_start: 0.4,
        reactivity_end: 0.4,
        air_gap_rel_start: 0.001,
        air_gap_rel_end: 0.001,

        precision: PRECISION,
    }
}

/// Two-stage free (power) turbine.
pub fn ft_config() -> TurbineSpoolConfig {
    TurbineSpoolConfig {
        stage_num: 2,
        rpm: RPM_FREE,
        mass_rate: 0.0,
        alpha1: deg(14.0),
        total_heat_drop: None,
        l_rel_in: 0.12,

        stator_elongation: vec![2.3; 2],
        stator_gap_rel: vec![0.1; 2],
        stator_t_rel: vec![0.7; 2],
        rotor_elongation: vec![2.7; 2],
        rotor_gap_rel: vec![0.1; 2],
        rotor_t_rel: vec![0.7; 2],
        gamma_in: vec![deg(-5.0); 2],
        gamma_out: vec![deg(5.0); 2],

        phi_start_loss: 0.0,
        phi_end_loss: 0.0,
        phi_peak: 0.97,
        phi_peak_coord: 0.0,

        psi_start_loss: 0.0,
        psi_end_loss: 0.0,
        psi_peak: 0.97,
        psi_peak_coord: 0.0,

        ht_start_loss: 0.0,
        ht_end_loss: 0.0,
        ht_peak_coord: 0.0,

        reactivity_start: 0.4,
        reactivity_end: 0.4,
        air_gap_rel_start: 0.001,
        air_gap_rel_end: 0.001,

        precision: PRECISION,
    }
}

/// The full preset set with mass rates taken from a solved cycle.
pub fn scheme_configs(cycle: &ThreeShaftCycle) -> SchemeConfigs {
    let mut configs = SchemeConfigs {
        lpc: lpc_config(),
        hpc: hpc_config(),
        hpt: hpt_config(),
        lpt: lpt_config(),
        ft: ft_config(),
    };
    configs.lpc.mass_rate = cycle.mass_rates.lpc;
    configs.hpc.mass_rate = cycle.mass_rates.hpc;
    configs.hpt.mass_rate = cycle.mass_rates.hpt;
    configs.lpt.mass_rate = cycle.mass_rates.lpt;
    configs.ft.mass_rate = cycle.mass_rates.ft;
    configs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MachineConfig;
    use sf_cycle::CycleSpec;

    #[test]
    fn presets_validate_and_build() {
        assert!(lpc_config().build_machine().is_ok());
        assert!(hpc_config().build_machine().is_ok());
        assert!(hpt_config().build_machine().is_ok());
        assert!(lpt_config().build_machine().is_ok());
        assert!(ft_config().build_machine().is_ok());
    }

    #[test]
    fn scheme_configs_take_cycle_mass_rates() {
        let cycle = ThreeShaftCycle::solve(&CycleSpec::default()).unwrap();
        let configs = scheme_configs(&cycle);
        assert!(configs.lpc.mass_rate > 0.0);
        assert!((configs.lpc.mass_rate - configs.hpc.mass_rate).abs() < 1e-9);
        // turbine flows are reduced by cooling-bleed coefficients
        assert!(configs.hpt.mass_rate < configs.hpc.mass_rate);
        assert!(configs.lpt.mass_rate < configs.hpt.mass_rate);
        assert!(configs.ft.mass_rate < configs.lpt.mass_rate);
    }
}
