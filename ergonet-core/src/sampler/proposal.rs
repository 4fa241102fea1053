//! Uniform dyad selection and conditional proposal filters.
//!
//! The conditioning rules live here so the three proposal schemes share
//! identical semantics: snowball estimation toggles only inner-zone
//! dyads, rejects ties spanning more than one wave and protects the last
//! tie into the previous wave; citation estimation only toggles arcs sent
//! from last-period nodes.

use rand::Rng;

use crate::graph::{BipartiteSide, Graph, NodeId};

use super::{Conditioning, kernel::Direction};

/// Attempts before a rejection-sampling loop gives up on the iteration.
///
/// Near-complete proposal spaces can make absent-dyad draws arbitrarily
/// rare; a bounded loop keeps the sampler live and merely wastes one
/// proposal when it trips.
pub(super) const DRAW_ATTEMPTS: u32 = 1_000;

/// Draws a uniform dyad from the conditioning's proposal space.
///
/// Returns `None` when the bounded rejection loop failed to find a
/// candidate (for example, all inner nodes share a bipartite mode).
pub(super) fn draw_dyad<R: Rng>(
    graph: &Graph,
    conditioning: Conditioning,
    rng: &mut R,
) -> Option<(NodeId, NodeId)> {
    match conditioning {
        Conditioning::Free => draw_free(graph, rng),
        Conditioning::Snowball => draw_snowball(graph, rng),
        Conditioning::Citation => draw_citation(graph, rng),
    }
}

fn draw_free<R: Rng>(graph: &Graph, rng: &mut R) -> Option<(NodeId, NodeId)> {
    let n = graph.node_count();
    if graph.is_bipartite() {
        let a = rng.gen_range(0..graph.mode_a_count());
        let b = graph.mode_a_count() + rng.gen_range(0..graph.mode_b_count());
        return Some((a, b));
    }
    let i = rng.gen_range(0..n);
    let mut j = rng.gen_range(0..n - 1);
    if j >= i {
        j += 1;
    }
    Some((i, j))
}

fn draw_snowball<R: Rng>(graph: &Graph, rng: &mut R) -> Option<(NodeId, NodeId)> {
    let inner = graph.zones()?.inner_nodes();
    if inner.len() < 2 {
        return None;
    }
    for _ in 0..DRAW_ATTEMPTS {
        let i = inner[rng.gen_range(0..inner.len())];
        let j = inner[rng.gen_range(0..inner.len())];
        if i == j {
            continue;
        }
        if graph.is_bipartite() && graph.side_of(i) == graph.side_of(j) {
            continue;
        }
        let (i, j) = orient(graph, i, j);
        return Some((i, j));
    }
    None
}

fn draw_citation<R: Rng>(graph: &Graph, rng: &mut R) -> Option<(NodeId, NodeId)> {
    let senders = graph.terms()?.max_term_nodes();
    if senders.is_empty() || graph.node_count() < 2 {
        return None;
    }
    for _ in 0..DRAW_ATTEMPTS {
        let i = senders[rng.gen_range(0..senders.len())];
        let j = rng.gen_range(0..graph.node_count());
        if i != j {
            return Some((i, j));
        }
    }
    None
}

/// Draws a uniform absent dyad by rejection over the conditioned space.
pub(super) fn draw_absent_dyad<R: Rng>(
    graph: &Graph,
    conditioning: Conditioning,
    rng: &mut R,
) -> Option<(NodeId, NodeId)> {
    for _ in 0..DRAW_ATTEMPTS {
        let Some((i, j)) = draw_dyad(graph, conditioning, rng) else {
            return None;
        };
        if !graph.has_tie(i, j) {
            return Some((i, j));
        }
    }
    None
}

/// Whether a proposed toggle passes the conditioning filters.
pub(super) fn passes_filters(
    graph: &Graph,
    conditioning: Conditioning,
    i: NodeId,
    j: NodeId,
    direction: Direction,
) -> bool {
    match conditioning {
        Conditioning::Free | Conditioning::Citation => true,
        Conditioning::Snowball => {
            let Some(zones) = graph.zones() else {
                return false;
            };
            if !zones.is_inner_dyad(i, j) || !zones.zones_adjacent(i, j) {
                return false;
            }
            if direction == Direction::Delete {
                // Deleting the last tie into the previous wave would strand
                // the later endpoint's connectivity evidence.
                let (zi, zj) = (zones.zone(i), zones.zone(j));
                let later = if zi == zj + 1 {
                    Some(i)
                } else if zj == zi + 1 {
                    Some(j)
                } else {
                    None
                };
                if let Some(node) = later {
                    if zones.prev_wave_degree(node) <= 1 {
                        return false;
                    }
                }
            }
            true
        }
    }
}

/// Size of the dyad space under a conditioning, for the tie/no-tie
/// Hastings correction.
pub(super) fn proposal_space(graph: &Graph, conditioning: Conditioning) -> u64 {
    match conditioning {
        Conditioning::Free => graph.dyad_count(),
        Conditioning::Snowball => {
            let inner = graph.zones().map_or(&[][..], |zones| zones.inner_nodes());
            if graph.is_bipartite() {
                let a = inner
                    .iter()
                    .filter(|&&node| graph.side_of(node) == BipartiteSide::A)
                    .count() as u64;
                let b = inner.len() as u64 - a;
                a * b
            } else {
                let m = inner.len() as u64;
                let ordered = m.saturating_sub(1) * m;
                if graph.is_directed() { ordered } else { ordered / 2 }
            }
        }
        Conditioning::Citation => {
            let senders = graph
                .terms()
                .map_or(0, |terms| terms.max_term_nodes().len()) as u64;
            senders * u64::from(graph.node_count().saturating_sub(1))
        }
    }
}

/// Puts an undirected dyad into canonical orientation; directed dyads are
/// returned as drawn.
fn orient(graph: &Graph, i: NodeId, j: NodeId) -> (NodeId, NodeId) {
    if graph.is_directed() {
        (i, j)
    } else if graph.is_bipartite() {
        if graph.side_of(i) == BipartiteSide::A {
            (i, j)
        } else {
            (j, i)
        }
    } else {
        (i.min(j), i.max(j))
    }
}
