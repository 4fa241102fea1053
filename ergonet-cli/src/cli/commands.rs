//! Command implementations and argument parsing for the ergonet CLI.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use rand::{SeedableRng, rngs::SmallRng};
use thiserror::Error;

use ergonet_core::{
    ErgonetError, Graph, Model, Settings, TrajectoryWriter, estimate_ee, estimate_ee_parallel,
    load_run, parse_config, simulate, sufficient_statistics, write_observed_stats,
};

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "ergonet",
    about = "Estimate and simulate exponential random graph models."
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Estimate coefficients by equilibrium expectation.
    Estimate(EstimateArgs),
    /// Simulate networks from fixed coefficients.
    Simulate(SimulateArgs),
}

/// Options accepted by the `estimate` command.
#[derive(Debug, Args, Clone)]
pub struct EstimateArgs {
    /// Path to the run configuration file.
    pub config: PathBuf,

    /// Number of independent estimation chains.
    #[arg(long, default_value_t = 1)]
    pub chains: usize,
}

/// Options accepted by the `simulate` command.
#[derive(Debug, Args, Clone)]
pub struct SimulateArgs {
    /// Path to the run configuration file.
    pub config: PathBuf,
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// The configuration file itself could not be read.
    #[error("failed to read `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// A core failure: bad configuration, bad input, or a sampler fault.
    #[error(transparent)]
    Core(#[from] ErgonetError),
}

/// What a finished command reports to the user.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    /// The executed command name.
    pub command: &'static str,
    /// Acceptance rate pooled over every chain or interval.
    pub acceptance_rate: f64,
    /// Final coefficients per chain (estimation only).
    pub final_theta: Vec<Vec<f64>>,
    /// Effect names in coefficient order.
    pub effect_names: Vec<&'static str>,
    /// Files written during the run.
    pub outputs: Vec<PathBuf>,
}

/// Executes a parsed command.
///
/// # Errors
/// Returns [`CliError`] when the configuration cannot be read or any
/// core stage fails.
pub fn run_cli(cli: Cli) -> Result<Summary, CliError> {
    match cli.command {
        Command::Estimate(args) => run_estimate(&args),
        Command::Simulate(args) => run_simulate(&args),
    }
}

fn load(config_path: &Path) -> Result<(Settings, Graph, Model), CliError> {
    let text = fs::read_to_string(config_path).map_err(|source| CliError::Io {
        path: config_path.to_path_buf(),
        source,
    })?;
    let config = parse_config(&text).map_err(ErgonetError::from)?;
    let settings = Settings::from_config(&config).map_err(ErgonetError::from)?;
    let (graph, model) = load_run(&settings)?;
    Ok((settings, graph, model))
}

fn run_estimate(args: &EstimateArgs) -> Result<Summary, CliError> {
    let (settings, graph, model) = load(&args.config)?;
    let mut outputs = Vec::new();
    let names = model.names();

    if let Some(path) = &settings.observed_stats_file {
        let observed =
            sufficient_statistics(&graph, model.effects()).map_err(ErgonetError::from)?;
        write_observed_stats(path, &names, &observed).map_err(ErgonetError::from)?;
        outputs.push(path.clone());
    }

    let reports = if args.chains > 1 {
        estimate_ee_parallel(&graph, &model, &settings, args.chains)?
    } else {
        let mut graph = graph;
        let mut model = model.clone();
        let mut rng = SmallRng::seed_from_u64(settings.seed);
        vec![estimate_ee(&mut graph, &mut model, &settings, &mut rng)?]
    };

    for (chain, report) in reports.iter().enumerate() {
        if let Some(path) = &settings.theta_file {
            let path = chain_path(path, chain, reports.len());
            write_trajectory(&path, &names, &report.theta_rows)?;
            outputs.push(path);
        }
        if let Some(path) = &settings.dz_file {
            let path = chain_path(path, chain, reports.len());
            write_trajectory(&path, &names, &report.dz_rows)?;
            outputs.push(path);
        }
    }

    let accepted: f64 = reports.iter().map(|r| r.acceptance_rate).sum();
    Ok(Summary {
        command: "estimate",
        acceptance_rate: accepted / reports.len() as f64,
        final_theta: reports.iter().map(|r| r.final_theta.clone()).collect(),
        effect_names: names,
        outputs,
    })
}

fn run_simulate(args: &SimulateArgs) -> Result<Summary, CliError> {
    let (settings, mut graph, model) = load(&args.config)?;
    let mut outputs = Vec::new();
    let names = model.names();
    let mut rng = SmallRng::seed_from_u64(settings.seed);
    let report = simulate(&mut graph, &model, &settings, &mut rng)?;
    if let Some(path) = &settings.stats_file {
        write_trajectory(path, &names, &report.stats_rows)?;
        outputs.push(path.clone());
    }
    outputs.extend(report.snapshots.iter().cloned());
    Ok(Summary {
        command: "simulate",
        acceptance_rate: report.acceptance_rate,
        final_theta: Vec::new(),
        effect_names: names,
        outputs,
    })
}

fn write_trajectory(
    path: &Path,
    names: &[&str],
    rows: &[(u64, Vec<f64>)],
) -> Result<(), CliError> {
    let mut writer = TrajectoryWriter::create(path, names).map_err(ErgonetError::from)?;
    for (iteration, values) in rows {
        writer.append(*iteration, values).map_err(ErgonetError::from)?;
    }
    writer.flush().map_err(ErgonetError::from)?;
    Ok(())
}

/// Per-chain output path: `theta.txt` becomes `theta_2.txt` when more
/// than one chain runs.
pub(crate) fn chain_path(path: &Path, chain: usize, chains: usize) -> PathBuf {
    if chains <= 1 {
        return path.to_path_buf();
    }
    let stem = path
        .file_stem()
        .map_or_else(|| "out".to_owned(), |s| s.to_string_lossy().into_owned());
    let name = match path.extension() {
        Some(ext) => format!("{stem}_{chain}.{}", ext.to_string_lossy()),
        None => format!("{stem}_{chain}"),
    };
    path.with_file_name(name)
}

/// Renders a summary for the user.
///
/// # Errors
/// Propagates write failures on the output stream.
pub fn render_summary<W: Write>(summary: &Summary, writer: &mut W) -> io::Result<()> {
    writeln!(
        writer,
        "{}: acceptance rate {:.4}",
        summary.command, summary.acceptance_rate
    )?;
    for (chain, theta) in summary.final_theta.iter().enumerate() {
        let rendered: Vec<String> = summary
            .effect_names
            .iter()
            .zip(theta)
            .map(|(name, value)| format!("{name}={value:.6}"))
            .collect();
        writeln!(writer, "chain {chain}: {}", rendered.join(" "))?;
    }
    for output in &summary.outputs {
        writeln!(writer, "wrote {}", output.display())?;
    }
    Ok(())
}
