//! Change statistics specific to two-mode graphs.
//!
//! All of these are driven by the same observation: adding the edge
//! `a -- b` (with `a` in mode A and `b` in mode B) raises the same-mode
//! two-path count by one for exactly the pairs `{a, u}` with
//! `u` a neighbour of `b`, and `{b, w}` with `w` a neighbour of `a`.
//! Callers may pass the endpoints in either order; every function
//! canonicalises first.

use std::collections::HashMap;

use crate::graph::{BipartiteSide, Graph, NodeId};

/// Splits a dyad into its `(mode A, mode B)` endpoints.
fn split(graph: &Graph, i: NodeId, j: NodeId) -> (NodeId, NodeId) {
    debug_assert!(
        graph.side_of(i) != graph.side_of(j),
        "bipartite statistics need endpoints in opposite modes"
    );
    if graph.side_of(i) == BipartiteSide::A {
        (i, j)
    } else {
        (j, i)
    }
}

/// The mode-A endpoint of the dyad.
pub(super) fn side_a(graph: &Graph, i: NodeId, j: NodeId) -> NodeId {
    split(graph, i, j).0
}

/// The mode-B endpoint of the dyad.
pub(super) fn side_b(graph: &Graph, i: NodeId, j: NodeId) -> NodeId {
    split(graph, i, j).1
}

fn ratio(lambda: f64) -> f64 {
    debug_assert!(lambda > 1.0, "decay parameter must exceed one");
    1.0 - 1.0 / lambda
}

/// Four-cycles closed by the new edge: one per two-path from `a` to a
/// co-neighbour of `b`.
pub(super) fn four_cycles(graph: &Graph, i: NodeId, j: NodeId) -> f64 {
    let (a, b) = split(graph, i, j);
    let mut cycles = 0.0;
    for &u in graph.neighbours(b) {
        if u != a {
            cycles += f64::from(graph.same_mode_two_paths(a, u));
        }
    }
    cycles
}

/// Change in the sum over one mode of `C(degree, 2)`.
pub(super) fn two_stars(graph: &Graph, i: NodeId, j: NodeId, mode_a: bool) -> f64 {
    let (a, b) = split(graph, i, j);
    f64::from(graph.degree(if mode_a { a } else { b }))
}

/// Change in the geometrically weighted degree distribution of one mode;
/// the identity is the same as for one-mode alternating stars.
pub(super) fn alt_stars(graph: &Graph, i: NodeId, j: NodeId, lambda: f64, mode_a: bool) -> f64 {
    let (a, b) = split(graph, i, j);
    let degree = graph.degree(if mode_a { a } else { b });
    lambda * (1.0 - ratio(lambda).powi(degree as i32))
}

/// Alternating k-cycles: `z` sums `lambda * (1 - r^t)` over unordered
/// same-mode pairs, with `t` the pair's two-path count.
pub(super) fn alt_kcycles(graph: &Graph, i: NodeId, j: NodeId, lambda: f64, mode_a: bool) -> f64 {
    let (a, b) = split(graph, i, j);
    let r = ratio(lambda);
    let (anchor, through) = if mode_a { (a, b) } else { (b, a) };
    let mut delta = 0.0;
    for &u in graph.neighbours(through) {
        if u != anchor {
            delta += r.powi(graph.same_mode_two_paths(anchor, u) as i32);
        }
    }
    delta
}

/// Alternating four-cycles: `z` sums `lambda * (1 - r^(C(t, 2)))` over
/// unordered same-mode pairs. A pair with `t` two-paths spans `C(t, 2)`
/// four-cycles, so raising `t` by one raises the cycle count by `t`.
pub(super) fn alt_k4cycles(graph: &Graph, i: NodeId, j: NodeId, lambda: f64, mode_a: bool) -> f64 {
    let (a, b) = split(graph, i, j);
    let r = ratio(lambda);
    let (anchor, through) = if mode_a { (a, b) } else { (b, a) };
    let mut delta = 0.0;
    for &u in graph.neighbours(through) {
        if u == anchor {
            continue;
        }
        let t = f64::from(graph.same_mode_two_paths(anchor, u));
        let cycles = t * (t - 1.0) / 2.0;
        delta += lambda * (r.powf(cycles) - r.powf(cycles + t));
    }
    delta
}

/// Change in the sum over all nodes of the four-cycle count through the
/// node raised to `alpha`.
///
/// Each new cycle runs through both endpoints, one co-neighbour of `b`
/// and one co-neighbour of `a`, so four per-node counts move. This is the
/// heaviest statistic in the catalogue: it recounts four-cycle
/// participation for the affected nodes by a two-hop walk.
pub(super) fn four_cycles_node_power(graph: &Graph, i: NodeId, j: NodeId, alpha: f64) -> f64 {
    let (a, b) = split(graph, i, j);
    let mut delta = 0.0;
    let mut new_cycles = 0u64;
    for &u in graph.neighbours(b) {
        if u == a {
            continue;
        }
        let gained = u64::from(graph.same_mode_two_paths(a, u));
        new_cycles += gained;
        delta += power_gain(four_cycles_through(graph, u), gained, alpha);
    }
    for &w in graph.neighbours(a) {
        if w == b {
            continue;
        }
        let gained = u64::from(graph.same_mode_two_paths(b, w));
        delta += power_gain(four_cycles_through(graph, w), gained, alpha);
    }
    delta += power_gain(four_cycles_through(graph, a), new_cycles, alpha);
    delta += power_gain(four_cycles_through(graph, b), new_cycles, alpha);
    delta
}

fn power_gain(base: u64, gained: u64, alpha: f64) -> f64 {
    if gained == 0 {
        return 0.0;
    }
    ((base + gained) as f64).powf(alpha) - (base as f64).powf(alpha)
}

/// Number of four-cycles through `node`, by a two-hop walk.
fn four_cycles_through(graph: &Graph, node: NodeId) -> u64 {
    let mut shared: HashMap<NodeId, u64> = HashMap::new();
    for &w in graph.neighbours(node) {
        for &u in graph.neighbours(w) {
            if u != node {
                *shared.entry(u).or_insert(0) += 1;
            }
        }
    }
    shared.values().map(|&t| t * (t - 1) / 2).sum()
}

/// Continuous sums over the same-mode pairs gaining a two-path; a missing
/// value contributes zero for its node.
pub(super) fn two_path_sum(graph: &Graph, i: NodeId, j: NodeId, attr: usize, mode_a: bool) -> f64 {
    accumulate(graph, i, j, mode_a, |graph, anchor, u| {
        finite_or_zero(graph.attributes().continuous(attr, anchor))
            + finite_or_zero(graph.attributes().continuous(attr, u))
    })
}

/// Continuous absolute differences over the same-mode pairs gaining a
/// two-path; zero when either value is missing.
pub(super) fn two_path_diff(graph: &Graph, i: NodeId, j: NodeId, attr: usize, mode_a: bool) -> f64 {
    accumulate(graph, i, j, mode_a, |graph, anchor, u| {
        let left = graph.attributes().continuous(attr, anchor);
        let right = graph.attributes().continuous(attr, u);
        if left.is_nan() || right.is_nan() {
            0.0
        } else {
            (left - right).abs()
        }
    })
}

/// Categorical matches over the same-mode pairs gaining a two-path.
pub(super) fn two_path_matching(
    graph: &Graph,
    i: NodeId,
    j: NodeId,
    attr: usize,
    mode_a: bool,
) -> f64 {
    accumulate(graph, i, j, mode_a, |graph, anchor, u| {
        if categories_match(graph, attr, anchor, u) {
            1.0
        } else {
            0.0
        }
    })
}

/// Power-damped shared-partner homophily: `z` sums `t^alpha` over
/// matching same-mode pairs.
pub(super) fn nodematch_alpha(
    graph: &Graph,
    i: NodeId,
    j: NodeId,
    attr: usize,
    alpha: f64,
    mode_a: bool,
) -> f64 {
    accumulate(graph, i, j, mode_a, |graph, anchor, u| {
        if !categories_match(graph, attr, anchor, u) {
            return 0.0;
        }
        let t = u64::from(graph.same_mode_two_paths(anchor, u));
        power_gain(t, 1, alpha)
    })
}

/// Geometrically damped shared-partner homophily: `z` sums
/// `1 - (1 - beta)^t` over matching same-mode pairs.
pub(super) fn nodematch_beta(
    graph: &Graph,
    i: NodeId,
    j: NodeId,
    attr: usize,
    beta: f64,
    mode_a: bool,
) -> f64 {
    accumulate(graph, i, j, mode_a, |graph, anchor, u| {
        if !categories_match(graph, attr, anchor, u) {
            return 0.0;
        }
        let t = graph.same_mode_two_paths(anchor, u);
        beta * (1.0 - beta).powi(t as i32)
    })
}

/// Folds a per-pair contribution over the same-mode pairs whose two-path
/// count rises when the edge is added.
fn accumulate(
    graph: &Graph,
    i: NodeId,
    j: NodeId,
    mode_a: bool,
    contribution: impl Fn(&Graph, NodeId, NodeId) -> f64,
) -> f64 {
    let (a, b) = split(graph, i, j);
    let (anchor, through) = if mode_a { (a, b) } else { (b, a) };
    let mut delta = 0.0;
    for &u in graph.neighbours(through) {
        if u != anchor {
            delta += contribution(graph, anchor, u);
        }
    }
    delta
}

fn categories_match(graph: &Graph, attr: usize, left: NodeId, right: NodeId) -> bool {
    match (
        graph.attributes().categorical(attr, left),
        graph.attributes().categorical(attr, right),
    ) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_nan() { 0.0 } else { value }
}
