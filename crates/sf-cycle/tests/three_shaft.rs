//! Whole-cycle checks on the default three-shaft design point.

use sf_cycle::{CycleSpec, ReferenceNode, ThreeShaftCycle};

fn solved() -> ThreeShaftCycle {
    ThreeShaftCycle::solve(&CycleSpec::default()).unwrap()
}

#[test]
fn all_nodes_come_back_processed() {
    let cycle = solved();
    assert!(cycle.lpc.is_processed());
    assert!(cycle.hpc.is_processed());
    assert!(cycle.hpt.is_processed());
    assert!(cycle.lpt.is_processed());
    assert!(cycle.ft.is_processed());
}

#[test]
fn gas_generator_shafts_balance() {
    let spec = CycleSpec::default();
    let cycle = solved();

    let g_hpt = 1.0 - spec.hpt_cool_bleed - spec.hpt_leak;
    let g_lpt = g_hpt - spec.lpt_leak;

    // per unit of compressor flow, turbine work must cover compressor
    // work through the mechanical efficiency
    let hpt_work = cycle.hpt.heat_drop().unwrap() * g_hpt * spec.eta_mech_high;
    let hpc_work = cycle.hpc.specific_work().unwrap();
    assert!((hpt_work - hpc_work).abs() / hpc_work < 1e-9);

    let lpt_work = cycle.lpt.heat_drop().unwrap() * g_lpt * spec.eta_mech_low;
    let lpc_work = cycle.lpc.specific_work().unwrap();
    assert!((lpt_work - lpc_work).abs() / lpc_work < 1e-9);
}

#[test]
fn free_turbine_delivers_the_net_power() {
    let spec = CycleSpec::default();
    let cycle = solved();

    let power =
        cycle.mass_rates.ft * cycle.ft.heat_drop().unwrap() * spec.eta_transmission;
    assert!((power - spec.net_power).abs() / spec.net_power < 1e-9);
}

#[test]
fn pressures_fall_along_the_expansion() {
    let spec = CycleSpec::default();
    let cycle = solved();

    let burner_p = cycle.hpc.outlet().unwrap().p.value * spec.sigma_burn;
    let hpt_out = cycle.hpt.outlet().unwrap();
    let lpt_out = cycle.lpt.outlet().unwrap();
    let ft_out = cycle.ft.outlet().unwrap();

    assert!(burner_p > hpt_out.p.value);
    assert!(hpt_out.p.value > lpt_out.p.value);
    assert!(lpt_out.p.value > ft_out.p.value);
    // the exhaust must still push through the back-pressure loss
    assert!(ft_out.p.value > spec.p_atm);

    assert!(hpt_out.t.value > lpt_out.t.value);
    assert!(lpt_out.t.value > ft_out.t.value);
}

#[test]
fn mass_rates_shrink_with_bleed_and_leaks() {
    let cycle = solved();
    let rates = &cycle.mass_rates;

    assert!(rates.lpc > 0.0);
    assert_eq!(rates.lpc, rates.hpc);
    assert!(rates.hpt < rates.hpc);
    assert!(rates.lpt < rates.hpt);
    assert!(rates.ft < rates.lpt);

    // 16 MW at these component levels needs tens of kg/s of air
    assert!(rates.lpc > 40.0 && rates.lpc < 150.0);
}

#[test]
fn overall_pressure_ratio_tracks_spool_ratios_and_duct_loss() {
    let spec = CycleSpec::default();
    let cycle = solved();

    let inlet_p = spec.p_atm * spec.sigma_inlet;
    let hpc_exit = cycle.hpc.outlet().unwrap().p.value;
    let expected = inlet_p * spec.pi_lpc * spec.sigma_lpc_duct * spec.pi_hpc;
    assert!((hpc_exit - expected).abs() / expected < 1e-12);
}

#[test]
fn fully_consumed_flow_is_rejected() {
    let mut spec = CycleSpec::default();
    spec.hpt_cool_bleed = 0.98;
    spec.hpt_leak = 0.02;
    assert!(ThreeShaftCycle::solve(&spec).is_err());
}

#[test]
fn free_turbine_needs_expansion_headroom() {
    let mut spec = CycleSpec::default();
    // weak compression leaves nothing for the free turbine
    spec.pi_lpc = 1.05;
    spec.pi_hpc = 1.05;
    assert!(ThreeShaftCycle::solve(&spec).is_err());
}
