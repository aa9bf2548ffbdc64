use clap::{Parser, Subcommand};
use serde::Serialize;
use sf_cycle::{CycleError, CycleSpec, ReferenceNode, ThreeShaftCycle};
use sf_fit::{
    SchemeConfigs, SchemeFitError, StagedScheme, fit_three_shaft_scheme,
    fit_three_shaft_scheme_par, scheme_configs,
};
use sf_stage::{CompressorStageRecord, StageError, StagedMachine, TurbineStageRecord};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Parser)]
#[command(name = "sf-cli")]
#[command(about = "SpoolFit CLI - three-shaft gas turbine cycle fitting", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve the three-shaft cycle and print the component design points
    Cycle {
        /// Cycle spec YAML file; the built-in design point when omitted
        #[arg(long)]
        spec: Option<PathBuf>,
        /// Write the solved cycle as JSON
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Solve the cycle, then fit all five staged machines to it
    Fit {
        /// Cycle spec YAML file; the built-in design point when omitted
        #[arg(long)]
        spec: Option<PathBuf>,
        /// Spool config YAML file; the built-in presets when omitted
        #[arg(long)]
        scheme: Option<PathBuf>,
        /// Write the per-stage tables as JSON
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Run the five component fits on the rayon pool
        #[arg(long)]
        parallel: bool,
    },
}

#[derive(Error, Debug)]
enum CliError {
    #[error("cycle solution failed: {0}")]
    Cycle(#[from] CycleError),
    #[error("scheme fit failed:\n{0}")]
    Fit(#[from] SchemeFitError),
    #[error("machine aggregate unavailable: {0}")]
    Stage(#[from] StageError),
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("cannot parse {path}: {source}")]
    Yaml {
        path: PathBuf,
        source: serde_yaml::Error,
    },
    #[error("cannot serialize output: {0}")]
    Json(#[from] serde_json::Error),
}

type CliResult<T> = Result<T, CliError>;

fn main() -> CliResult<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Cycle { spec, output } => cmd_cycle(spec.as_deref(), output.as_deref()),
        Commands::Fit {
            spec,
            scheme,
            output,
            parallel,
        } => cmd_fit(
            spec.as_deref(),
            scheme.as_deref(),
            output.as_deref(),
            parallel,
        ),
    }
}

fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> CliResult<T> {
    let text = fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_yaml::from_str(&text).map_err(|source| CliError::Yaml {
        path: path.to_path_buf(),
        source,
    })
}

fn cycle_spec(path: Option<&Path>) -> CliResult<CycleSpec> {
    match path {
        Some(path) => load_yaml(path),
        None => Ok(CycleSpec::default()),
    }
}

#[derive(Serialize)]
struct NodeSummary {
    pressure_ratio: f64,
    efficiency: f64,
    mass_rate: f64,
}

#[derive(Serialize)]
struct CycleSummary {
    lpc: NodeSummary,
    hpc: NodeSummary,
    hpt: NodeSummary,
    lpt: NodeSummary,
    ft: NodeSummary,
}

fn summarize(cycle: &ThreeShaftCycle) -> CycleSummary {
    let node = |n: &dyn ReferenceNode, mass_rate: f64| NodeSummary {
        pressure_ratio: n.pressure_ratio(),
        efficiency: n.efficiency(),
        mass_rate,
    };
    CycleSummary {
        lpc: node(&cycle.lpc, cycle.mass_rates.lpc),
        hpc: node(&cycle.hpc, cycle.mass_rates.hpc),
        hpt: node(&cycle.hpt, cycle.mass_rates.hpt),
        lpt: node(&cycle.lpt, cycle.mass_rates.lpt),
        ft: node(&cycle.ft, cycle.mass_rates.ft),
    }
}

fn cmd_cycle(spec_path: Option<&Path>, output: Option<&Path>) -> CliResult<()> {
    let spec = cycle_spec(spec_path)?;
    let cycle = ThreeShaftCycle::solve(&spec)?;
    let summary = summarize(&cycle);

    println!("Three-shaft cycle solved, mass rate {:.2} kg/s", cycle.mass_rates.lpc);
    for (name, node) in [
        ("LPC", &summary.lpc),
        ("HPC", &summary.hpc),
        ("HPT", &summary.hpt),
        ("LPT", &summary.lpt),
        ("FT ", &summary.ft),
    ] {
        println!(
            "  {} pi = {:6.3}  eta = {:.3}  G = {:6.2} kg/s",
            name, node.pressure_ratio, node.efficiency, node.mass_rate
        );
    }

    write_json(output, &summary)?;
    Ok(())
}

#[derive(Serialize)]
struct SchemeReport {
    cycle: CycleSummary,
    lpc_stages: Vec<CompressorStageRecord>,
    hpc_stages: Vec<CompressorStageRecord>,
    hpt_stages: Vec<TurbineStageRecord>,
    lpt_stages: Vec<TurbineStageRecord>,
    ft_stages: Vec<TurbineStageRecord>,
}

fn cmd_fit(
    spec_path: Option<&Path>,
    scheme_path: Option<&Path>,
    output: Option<&Path>,
    parallel: bool,
) -> CliResult<()> {
    let spec = cycle_spec(spec_path)?;
    let cycle = ThreeShaftCycle::solve(&spec)?;

    let configs: SchemeConfigs = match scheme_path {
        Some(path) => load_yaml(path)?,
        None => scheme_configs(&cycle),
    };

    let scheme = if parallel {
        fit_three_shaft_scheme_par(&cycle, &configs)?
    } else {
        fit_three_shaft_scheme(&cycle, &configs)?
    };
    print_scheme(&scheme)?;

    if output.is_some() {
        let report = SchemeReport {
            cycle: summarize(&cycle),
            lpc_stages: scheme.lpc.stages().to_vec(),
            hpc_stages: scheme.hpc.stages().to_vec(),
            hpt_stages: scheme.hpt.stages().to_vec(),
            lpt_stages: scheme.lpt.stages().to_vec(),
            ft_stages: scheme.ft.stages().to_vec(),
        };
        write_json(output, &report)?;
    }
    Ok(())
}

fn print_scheme(scheme: &StagedScheme) -> CliResult<()> {
    println!("All five spools fitted");
    for (name, pi, eta, stages) in [
        (
            "LPC",
            scheme.lpc.pressure_ratio()?,
            scheme.lpc.efficiency()?,
            scheme.lpc.stages().len(),
        ),
        (
            "HPC",
            scheme.hpc.pressure_ratio()?,
            scheme.hpc.efficiency()?,
            scheme.hpc.stages().len(),
        ),
        (
            "HPT",
            scheme.hpt.pressure_ratio()?,
            scheme.hpt.efficiency()?,
            scheme.hpt.stages().len(),
        ),
        (
            "LPT",
            scheme.lpt.pressure_ratio()?,
            scheme.lpt.efficiency()?,
            scheme.lpt.stages().len(),
        ),
        (
            "FT ",
            scheme.ft.pressure_ratio()?,
            scheme.ft.efficiency()?,
            scheme.ft.stages().len(),
        ),
    ] {
        println!(
            "  {} pi = {:6.3}  eta = {:.3}  ({} stages)",
            name, pi, eta, stages
        );
    }
    Ok(())
}

fn write_json<T: Serialize>(output: Option<&Path>, value: &T) -> CliResult<()> {
    let Some(path) = output else {
        return Ok(());
    };
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    println!("Wrote {}", path.display());
    Ok(())
}
