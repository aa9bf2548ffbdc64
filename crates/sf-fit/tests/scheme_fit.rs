//! Whole-scheme fits against the solved three-shaft cycle.

use sf_cycle::{CycleSpec, ReferenceNode, ThreeShaftCycle};
use sf_fit::{fit_three_shaft_scheme, fit_three_shaft_scheme_par, scheme_configs};
use sf_stage::StagedMachine;

fn solved_cycle() -> ThreeShaftCycle {
    ThreeShaftCycle::solve(&CycleSpec::default()).unwrap()
}

#[test]
fn preset_scheme_fits_the_solved_cycle() {
    let cycle = solved_cycle();
    let configs = scheme_configs(&cycle);

    let scheme = fit_three_shaft_scheme(&cycle, &configs).unwrap();

    assert!((scheme.lpc.pressure_ratio().unwrap() - cycle.lpc.pressure_ratio()).abs() <= 1e-3);
    assert!((scheme.hpc.pressure_ratio().unwrap() - cycle.hpc.pressure_ratio()).abs() <= 1e-3);
    assert!((scheme.hpt.pressure_ratio().unwrap() - cycle.hpt.pressure_ratio()).abs() <= 1e-3);
    assert!((scheme.lpt.pressure_ratio().unwrap() - cycle.lpt.pressure_ratio()).abs() <= 1e-3);
    assert!((scheme.ft.pressure_ratio().unwrap() - cycle.ft.pressure_ratio()).abs() <= 1e-3);

    assert!((scheme.lpc.efficiency().unwrap() - cycle.lpc.efficiency()).abs() <= 1e-3);
    assert!((scheme.hpt.efficiency().unwrap() - cycle.hpt.efficiency()).abs() <= 1e-3);

    assert_eq!(scheme.lpc.stages().len(), 5);
    assert_eq!(scheme.hpc.stages().len(), 7);
    assert_eq!(scheme.hpt.stages().len(), 2);
    assert_eq!(scheme.lpt.stages().len(), 2);
    assert_eq!(scheme.ft.stages().len(), 2);
}

#[test]
fn failing_component_is_reported_by_tag_and_sinks_the_scheme() {
    let cycle = solved_cycle();
    let mut configs = scheme_configs(&cycle);
    // short per-stage array, guaranteed to fail validation
    configs.hpt.rotor_elongation.truncate(1);

    let err = fit_three_shaft_scheme(&cycle, &configs).unwrap_err();

    assert_eq!(err.failures.len(), 1);
    assert_eq!(err.failures[0].0, "hptErr");
    let message = err.to_string();
    assert!(message.contains("hptErr"));
    assert!(!message.contains("lpcErr"));
}

#[test]
fn every_failure_is_collected_not_just_the_first() {
    let cycle = solved_cycle();
    let mut configs = scheme_configs(&cycle);
    configs.lpc.gamma_in.truncate(2);
    configs.ft.stator_t_rel.clear();

    let err = fit_three_shaft_scheme(&cycle, &configs).unwrap_err();

    let tags: Vec<&str> = err.failures.iter().map(|(tag, _)| *tag).collect();
    assert_eq!(tags, vec!["lpcErr", "ftErr"]);
}

#[test]
fn parallel_fit_matches_the_sequential_one() {
    let cycle = solved_cycle();
    let configs = scheme_configs(&cycle);

    let sequential = fit_three_shaft_scheme(&cycle, &configs).unwrap();
    let parallel = fit_three_shaft_scheme_par(&cycle, &configs).unwrap();

    let pi_seq = sequential.hpc.pressure_ratio().unwrap();
    let pi_par = parallel.hpc.pressure_ratio().unwrap();
    assert!((pi_seq - pi_par).abs() < 1e-9);
}

#[test]
fn parallel_fit_reports_failures_in_component_order() {
    let cycle = solved_cycle();
    let mut configs = scheme_configs(&cycle);
    configs.ft.rotor_t_rel.truncate(1);
    configs.hpc.gamma_out.truncate(3);

    let err = fit_three_shaft_scheme_par(&cycle, &configs).unwrap_err();
    let tags: Vec<&str> = err.failures.iter().map(|(tag, _)| *tag).collect();
    assert_eq!(tags, vec!["hpcErr", "ftErr"]);
}
