//! The basic uniform-dyad sampler.
//!
//! Each iteration draws a uniform dyad from the conditioned space and
//! proposes to toggle it: delete when the tie is present, add otherwise.
//! The proposal distribution is symmetric, so no Hastings correction is
//! applied. The basic sampler performs its toggles without flat-list
//! maintenance; runs that need a live tie list afterwards rebuild it.

use rand::Rng;

use crate::{config::Model, graph::{Graph, TrackedList}};

use super::{
    SamplerConfig, SamplerError, SamplerOutcome,
    kernel::{self, Direction, Proposal},
    proposal,
};

pub(super) fn run<R: Rng>(
    graph: &mut Graph,
    model: &Model,
    config: &SamplerConfig,
    forbid_reciprocity: bool,
    rng: &mut R,
) -> Result<SamplerOutcome, SamplerError> {
    let mut outcome = SamplerOutcome::new(model.effects().len());
    let mut deltas = vec![0.0; model.effects().len()];
    for _ in 0..config.iterations {
        outcome.proposals += 1;
        let Some((i, j)) = proposal::draw_dyad(graph, config.conditioning, rng) else {
            continue;
        };
        let direction = if graph.has_tie(i, j) {
            Direction::Delete
        } else {
            Direction::Add
        };
        if !proposal::passes_filters(graph, config.conditioning, i, j, direction) {
            continue;
        }
        if forbid_reciprocity
            && direction == Direction::Add
            && graph.is_directed()
            && graph.is_arc(j, i)
        {
            continue;
        }
        let toggle = Proposal {
            i,
            j,
            direction,
            list: TrackedList::None,
            index: None,
            correction: 0.0,
        };
        kernel::attempt(graph, model, &toggle, config.mode, rng, &mut deltas, &mut outcome)?;
    }
    Ok(outcome)
}
