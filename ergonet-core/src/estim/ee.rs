//! Equilibrium-expectation estimation.
//!
//! The chain starts at the observed network. Each outer iteration runs
//! the sampler for a fixed number of proposals, accumulates the drift of
//! every sufficient statistic away from its observed value (`dzA`), and
//! nudges each coefficient against the sign of its drift. At the fixed
//! point the simulated statistics fluctuate around the observed ones,
//! which is the equilibrium-expectation estimate. The step size follows
//! the Borisenko form `a = rate * (|theta| + 0.1)`, damping coefficients
//! near zero without freezing them.

use rand::{SeedableRng, rngs::SmallRng};
use rayon::prelude::*;
use tracing::{debug, instrument};

use crate::{
    config::{Model, Settings},
    error::ErgonetError,
    graph::Graph,
    sampler::{MoveMode, SamplerConfig, run_sampler},
};

/// Relative weight of the coefficient magnitude in the step size.
const STEP_FLOOR: f64 = 0.1;

/// Trajectories collected by one estimation chain.
#[derive(Clone, Debug, PartialEq)]
pub struct EstimationReport {
    /// One coefficient row per outer iteration.
    pub theta_rows: Vec<(u64, Vec<f64>)>,
    /// One statistic-drift row per outer iteration.
    pub dz_rows: Vec<(u64, Vec<f64>)>,
    /// Coefficients after the final iteration.
    pub final_theta: Vec<f64>,
    /// Acceptance rate pooled over the whole chain.
    pub acceptance_rate: f64,
}

/// Runs one equilibrium-expectation chain in place.
///
/// The graph evolves under the current coefficients for the whole chain;
/// the model's coefficient vector is updated after every outer iteration.
///
/// # Errors
/// Propagates sampler failures; the chain performs no file I/O.
#[instrument(skip_all, fields(outer = settings.outer_iterations))]
pub fn estimate_ee<R: rand::Rng>(
    graph: &mut Graph,
    model: &mut Model,
    settings: &Settings,
    rng: &mut R,
) -> Result<EstimationReport, ErgonetError> {
    let effects = model.len();
    let mut dza = vec![0.0; effects];
    let mut accepted = 0u64;
    let mut proposals = 0u64;
    let mut report = EstimationReport {
        theta_rows: Vec::with_capacity(settings.outer_iterations as usize),
        dz_rows: Vec::with_capacity(settings.outer_iterations as usize),
        final_theta: model.theta().to_vec(),
        acceptance_rate: 0.0,
    };
    let config = SamplerConfig {
        kind: settings.sampler_kind(),
        iterations: settings.iterations,
        mode: MoveMode::Commit,
        conditioning: settings.conditioning(),
    };

    for outer in 1..=settings.outer_iterations {
        let outcome = run_sampler(graph, model, &config, rng)?;
        accepted += outcome.accepted;
        proposals += outcome.proposals;
        for (drift, step) in dza.iter_mut().zip(outcome.net_sums()) {
            *drift += step;
        }
        for (theta, drift) in model.theta_mut().iter_mut().zip(&dza) {
            // signum(0.0) is 1.0, so an undrifted statistic must not step.
            if *drift != 0.0 {
                let step = settings.learning_rate * (theta.abs() + STEP_FLOOR);
                *theta -= step * drift.signum();
            }
        }
        report.theta_rows.push((outer, model.theta().to_vec()));
        report.dz_rows.push((outer, dza.clone()));
    }
    report.final_theta = model.theta().to_vec();
    report.acceptance_rate = if proposals == 0 {
        0.0
    } else {
        accepted as f64 / proposals as f64
    };
    debug!(acceptance_rate = report.acceptance_rate, "estimation chain finished");
    Ok(report)
}

/// Runs several independent estimation chains in parallel.
///
/// Each chain owns a clone of the graph and model and a seed offset by
/// its index, so chains never share mutable state and results are
/// reproducible per seed.
///
/// # Errors
/// Returns the first chain failure.
pub fn estimate_ee_parallel(
    graph: &Graph,
    model: &Model,
    settings: &Settings,
    chains: usize,
) -> Result<Vec<EstimationReport>, ErgonetError> {
    (0..chains)
        .into_par_iter()
        .map(|chain| {
            let mut graph = graph.clone();
            let mut model = model.clone();
            let mut rng = SmallRng::seed_from_u64(settings.seed.wrapping_add(chain as u64));
            estimate_ee(&mut graph, &mut model, settings, &mut rng)
        })
        .collect()
}
