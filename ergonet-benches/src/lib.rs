//! Graph generators shared by the ergonet benchmarks.

use ergonet_core::{Graph, TrackedList};
use rand::{Rng, SeedableRng, rngs::SmallRng};

/// Builds a seeded Erdos-Renyi directed graph with its flat tie list
/// synced, sized for sampler throughput runs.
///
/// # Panics
/// Panics when the density produces an internally inconsistent insert,
/// which would be a bug in the graph store.
#[must_use]
pub fn erdos_renyi_directed(nodes: u32, density: f64, seed: u64) -> Graph {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut graph = Graph::directed(nodes);
    for i in 0..nodes {
        for j in 0..nodes {
            if i != j && rng.gen_range(0.0..1.0) < density {
                graph
                    .insert_arc(i, j, TrackedList::All)
                    .expect("generator proposes each dyad once");
            }
        }
    }
    graph
}

/// A fixed toggle schedule over distinct dyads, for isolating the cost
/// of graph mutations from proposal sampling.
#[must_use]
pub fn toggle_schedule(nodes: u32, count: usize, seed: u64) -> Vec<(u32, u32)> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut dyads = Vec::with_capacity(count);
    while dyads.len() < count {
        let i = rng.gen_range(0..nodes);
        let j = rng.gen_range(0..nodes);
        if i != j {
            dyads.push((i, j));
        }
    }
    dyads
}
