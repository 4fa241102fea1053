//! The tie/no-tie sampler.
//!
//! Half the proposals re-draw an existing tie (a guaranteed delete), half
//! draw an absent dyad (a guaranteed add). The asymmetry between the two
//! sampling pools is corrected exactly: with `E` ties in a dyad space of
//! size `D`, an addition carries `ln((D - E) / (E + 1))` and a deletion
//! `ln(E / (D - E + 1))`.

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
    rng: &mut R,
) -> Result<SamplerOutcome, SamplerError> {
    let mut outcome = SamplerOutcome::new(model.effects().len());
    let mut deltas = vec![0.0; model.effects().len()];
    let list = config.conditioning.tie_list();
    let space = proposal::proposal_space(graph, config.conditioning) as f64;

    for _ in 0..config.iterations {
        outcome.proposals += 1;
        let ties = graph.list_len(list);
        let tie_branch = rng.gen_range(0..2) == 0;
        if tie_branch {
            if ties == 0 {
                continue;
            }
            let index = rng.gen_range(0..ties);
            let Some((i, j)) = graph.tie_at(list, index) else {
                continue;
            };
            if !proposal::passes_filters(graph, config.conditioning, i, j, Direction::Delete) {
                continue;
            }
            let present = ties as f64;
            let toggle = Proposal {
                i,
                j,
                direction: Direction::Delete,
                list,
                index: Some(index),
                correction: (present / (space - present + 1.0)).ln(),
            };
            kernel::attempt(graph, model, &toggle, config.mode, rng, &mut deltas, &mut outcome)?;
        } else {
            let Some((i, j)) = proposal::draw_absent_dyad(graph, config.conditioning, rng) else {
                continue;
            };
            if !proposal::passes_filters(graph, config.conditioning, i, j, Direction::Add) {
                continue;
            }
            let present = ties as f64;
            let toggle = Proposal {
                i,
                j,
                direction: Direction::Add,
                list,
                index: None,
                correction: ((space - present) / (present + 1.0)).ln(),
            };
            kernel::attempt(graph, model, &toggle, config.mode, rng, &mut deltas, &mut outcome)?;
        }
    }
    Ok(outcome)
}
