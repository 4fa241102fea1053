//! The improved fixed-density sampler.
//!
//! Add and delete branches are proposed with equal probability; deletions
//! draw a uniform existing tie from the flat list and additions draw a
//! uniform absent dyad by rejection. An auxiliary scalar enters the log
//! acceptance with opposite signs for the two branches, and a
//! Robbins-Monro step after every proposal steers it so the tie count
//! orbits the count observed when the run started.

use rand::Rng;

use crate::{config::Model, graph::Graph};

use super::{
    SamplerConfig, SamplerError, SamplerOutcome,
    kernel::{self, Direction, Proposal},
    proposal,
};

pub(super) fn run<R: Rng>(
    graph: &mut Graph,
    model: &Model,
    config: &SamplerConfig,
    gain: f64,
    rng: &mut R,
) -> Result<SamplerOutcome, SamplerError> {
    let mut outcome = SamplerOutcome::new(model.effects().len());
    let mut deltas = vec![0.0; model.effects().len()];
    let list = config.conditioning.tie_list();
    let observed = graph.tie_count();
    let mut aux = 0.0_f64;

    for _ in 0..config.iterations {
        outcome.proposals += 1;
        let delete = rng.gen_range(0..2) == 0;
        if delete {
            let len = graph.list_len(list);
            if len > 0 {
                let index = rng.gen_range(0..len);
                if let Some((i, j)) = graph.tie_at(list, index) {
                    if proposal::passes_filters(graph, config.conditioning, i, j, Direction::Delete)
                    {
                        let toggle = Proposal {
                            i,
                            j,
                            direction: Direction::Delete,
                            list,
                            index: Some(index),
                            correction: -aux,
                        };
                        kernel::attempt(
                            graph,
                            model,
                            &toggle,
                            config.mode,
                            rng,
                            &mut deltas,
                            &mut outcome,
                        )?;
                    }
                }
            }
        } else if let Some((i, j)) = proposal::draw_absent_dyad(graph, config.conditioning, rng) {
            if proposal::passes_filters(graph, config.conditioning, i, j, Direction::Add) {
                let toggle = Proposal {
                    i,
                    j,
                    direction: Direction::Add,
                    list,
                    index: None,
                    correction: aux,
                };
                kernel::attempt(graph, model, &toggle, config.mode, rng, &mut deltas, &mut outcome)?;
            }
        }
        // Negative feedback: a surplus of ties pushes the correction down,
        // discouraging further additions, and vice versa.
        let shortfall = observed as f64 - graph.tie_count() as f64;
        aux += gain * shortfall / (observed.max(1) as f64);
    }
    outcome.aux = aux;
    Ok(outcome)
}
