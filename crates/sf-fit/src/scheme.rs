//! Whole-scheme orchestration: five spool fits against one solved cycle.

use crate::compressor_config::CompressorSpoolConfig;
use crate::driver::fitted_machine;
use crate::error::{FitError, FitResult, SchemeFitError};
use crate::turbine_config::TurbineSpoolConfig;
use serde::{Deserialize, Serialize};
use sf_cycle::ThreeShaftCycle;
use sf_stage::{StagedCompressor, StagedTurbine};
use tracing::warn;

/// One spool config per component of the three-shaft scheme.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SchemeConfigs {
    pub lpc: CompressorSpoolConfig,
    pub hpc: CompressorSpoolConfig,
    pub hpt: TurbineSpoolConfig,
    pub lpt: TurbineSpoolConfig,
    pub ft: TurbineSpoolConfig,
}

/// The five fitted machines. Read-only after construction.
#[derive(Debug)]
pub struct StagedScheme {
    pub lpc: StagedCompressor,
    pub hpc: StagedCompressor,
    pub hpt: StagedTurbine,
    pub lpt: StagedTurbine,
    pub ft: StagedTurbine,
}

/// Fit all five spools against one already-solved cycle.
///
/// A failing component never stops the others: all five attempts run to
/// completion, and their failures are joined into one aggregate error.
/// Any failure fails the scheme as a whole — successful siblings are
/// discarded, not returned alongside the error.
pub fn fit_three_shaft_scheme(
    cycle: &ThreeShaftCycle,
    configs: &SchemeConfigs,
) -> Result<StagedScheme, SchemeFitError> {
    collect(
        fitted_machine(&configs.lpc, &cycle.lpc),
        fitted_machine(&configs.hpc, &cycle.hpc),
        fitted_machine(&configs.hpt, &cycle.hpt),
        fitted_machine(&configs.lpt, &cycle.lpt),
        fitted_machine(&configs.ft, &cycle.ft),
    )
}

/// Parallel variant of [`fit_three_shaft_scheme`]. The fits only read the
/// shared cycle, so they can run on the rayon pool; the aggregation order
/// (and therefore the joined error message) is identical to the
/// sequential version.
pub fn fit_three_shaft_scheme_par(
    cycle: &ThreeShaftCycle,
    configs: &SchemeConfigs,
) -> Result<StagedScheme, SchemeFitError> {
    let (compressors, turbines) = rayon::join(
        || {
            rayon::join(
                || fitted_machine(&configs.lpc, &cycle.lpc),
                || fitted_machine(&configs.hpc, &cycle.hpc),
            )
        },
        || {
            rayon::join(
                || fitted_machine(&configs.hpt, &cycle.hpt),
                || {
                    rayon::join(
                        || fitted_machine(&configs.lpt, &cycle.lpt),
                        || fitted_machine(&configs.ft, &cycle.ft),
                    )
                },
            )
        },
    );
    let (lpc, hpc) = compressors;
    let (hpt, (lpt, ft)) = turbines;
    collect(lpc, hpc, hpt, lpt, ft)
}

fn collect(
    lpc: FitResult<StagedCompressor>,
    hpc: FitResult<StagedCompressor>,
    hpt: FitResult<StagedTurbine>,
    lpt: FitResult<StagedTurbine>,
    ft: FitResult<StagedTurbine>,
) -> Result<StagedScheme, SchemeFitError> {
    let mut failures: Vec<(&'static str, FitError)> = Vec::new();

    let lpc = note_failure("lpcErr", lpc, &mut failures);
    let hpc = note_failure("hpcErr", hpc, &mut failures);
    let hpt = note_failure("hptErr", hpt, &mut failures);
    let lpt = note_failure("lptErr", lpt, &mut failures);
    let ft = note_failure("ftErr", ft, &mut failures);

    if !failures.is_empty() {
        return Err(SchemeFitError { failures });
    }

    // the unwraps cannot fire: no failures were recorded
    match (lpc, hpc, hpt, lpt, ft) {
        (Some(lpc), Some(hpc), Some(hpt), Some(lpt), Some(ft)) => Ok(StagedScheme {
            lpc,
            hpc,
            hpt,
            lpt,
            ft,
        }),
        _ => unreachable!("component missing without a recorded failure"),
    }
}

fn note_failure<T>(
    tag: &'static str,
    result: FitResult<T>,
    failures: &mut Vec<(&'static str, FitError)>,
) -> Option<T> {
    match result {
        Ok(machine) => Some(machine),
        Err(err) => {
            warn!(component = tag, error = %err, "component fit failed");
            failures.push((tag, err));
            None
        }
    }
}
