//! Geometrically weighted (alternating) change statistics.
//!
//! Each statistic damps high counts with the ratio `r = 1 - 1/lambda`,
//! `lambda > 1`. Two identities drive every delta here:
//!
//! - the weight of a count `c` is `w(c) = lambda * (1 - r^c)`, and
//! - raising a count from `c` to `c + 1` raises its weight by exactly
//!   `r^c`.
//!
//! The degree statistics follow the alternating k-star identity
//! `z = lambda^2 * sum_v (r^(d_v) - 1 + d_v / lambda)`, whose change under
//! a unit degree increase is `lambda * (1 - r^d)`. The triangle and
//! two-path statistics sum `w` over the two-path counts of arcs
//! (respectively dyads), which is where the incremental two-path cache
//! earns its keep: every term below is a cached count lookup.

use crate::graph::{Graph, NodeId};

fn ratio(lambda: f64) -> f64 {
    debug_assert!(lambda > 1.0, "decay parameter must exceed one");
    1.0 - 1.0 / lambda
}

/// `lambda * (1 - r^count)`: the geometric weight of one count.
fn weight(lambda: f64, count: u32) -> f64 {
    lambda * (1.0 - ratio(lambda).powi(count as i32))
}

/// `r^count`: the weight increase when a count rises by one.
fn marginal(lambda: f64, count: u32) -> f64 {
    ratio(lambda).powi(count as i32)
}

pub(super) fn alt_in_stars(graph: &Graph, receiver: NodeId, lambda: f64) -> f64 {
    lambda * (1.0 - marginal(lambda, graph.in_degree(receiver)))
}

pub(super) fn alt_out_stars(graph: &Graph, sender: NodeId, lambda: f64) -> f64 {
    lambda * (1.0 - marginal(lambda, graph.out_degree(sender)))
}

pub(super) fn alt_stars(graph: &Graph, node: NodeId, lambda: f64) -> f64 {
    lambda * (1.0 - marginal(lambda, graph.degree(node)))
}

/// Transitive alternating k-triangles: `z` sums `w(mixed(a, b))` over
/// arcs `a -> b`.
///
/// The new arc contributes its own closure weight; each arc `u -> j` with
/// `u -> i` present, and each arc `i -> v` with `j -> v` present, gains
/// one two-path.
pub(super) fn alt_ktriangles_t(graph: &Graph, i: NodeId, j: NodeId, lambda: f64) -> f64 {
    let mut delta = weight(lambda, graph.mixed_two_paths(i, j));
    for &u in graph.in_neighbours(i) {
        if u != j && graph.is_arc(u, j) {
            delta += marginal(lambda, graph.mixed_two_paths(u, j));
        }
    }
    for &v in graph.out_neighbours(j) {
        if v != i && graph.is_arc(i, v) {
            delta += marginal(lambda, graph.mixed_two_paths(i, v));
        }
    }
    delta
}

/// Cyclic alternating k-triangles: `z` sums `w(mixed(b, a))` over arcs
/// `a -> b`.
pub(super) fn alt_ktriangles_c(graph: &Graph, i: NodeId, j: NodeId, lambda: f64) -> f64 {
    let mut delta = weight(lambda, graph.mixed_two_paths(j, i));
    for &u in graph.in_neighbours(i) {
        if u != j && graph.is_arc(j, u) {
            delta += marginal(lambda, graph.mixed_two_paths(u, j));
        }
    }
    for &v in graph.out_neighbours(j) {
        if v != i && graph.is_arc(v, i) {
            delta += marginal(lambda, graph.mixed_two_paths(i, v));
        }
    }
    delta
}

/// Shared-source alternating k-triangles: `z` sums
/// `w(shared_sources(a, b))` over arcs `a -> b`.
///
/// The toggle makes `i` a new shared source of `j` and every `v` that `i`
/// already points at, affecting whichever of the arcs `j -> v` / `v -> j`
/// exist.
pub(super) fn alt_ktriangles_d(graph: &Graph, i: NodeId, j: NodeId, lambda: f64) -> f64 {
    let mut delta = weight(lambda, graph.shared_sources(i, j));
    for &v in graph.out_neighbours(i) {
        if v == j {
            continue;
        }
        let gained = marginal(lambda, graph.shared_sources(j, v));
        if graph.is_arc(j, v) {
            delta += gained;
        }
        if graph.is_arc(v, j) {
            delta += gained;
        }
    }
    delta
}

/// Shared-target alternating k-triangles: `z` sums
/// `w(shared_targets(a, b))` over arcs `a -> b`.
pub(super) fn alt_ktriangles_u(graph: &Graph, i: NodeId, j: NodeId, lambda: f64) -> f64 {
    let mut delta = weight(lambda, graph.shared_targets(i, j));
    for &u in graph.in_neighbours(j) {
        if u == i {
            continue;
        }
        let gained = marginal(lambda, graph.shared_targets(i, u));
        if graph.is_arc(i, u) {
            delta += gained;
        }
        if graph.is_arc(u, i) {
            delta += gained;
        }
    }
    delta
}

/// Alternating independent two-paths, mixed orientation: `z` sums
/// `w(mixed(a, b))` over ordered pairs of distinct nodes.
pub(super) fn alt_two_paths_t(graph: &Graph, i: NodeId, j: NodeId, lambda: f64) -> f64 {
    let mut delta = 0.0;
    for &u in graph.in_neighbours(i) {
        if u != j {
            delta += marginal(lambda, graph.mixed_two_paths(u, j));
        }
    }
    for &v in graph.out_neighbours(j) {
        if v != i {
            delta += marginal(lambda, graph.mixed_two_paths(i, v));
        }
    }
    delta
}

/// Alternating independent two-paths, shared-source orientation: `z` sums
/// `w(shared_sources(a, b))` over unordered pairs.
pub(super) fn alt_two_paths_d(graph: &Graph, i: NodeId, j: NodeId, lambda: f64) -> f64 {
    let mut delta = 0.0;
    for &v in graph.out_neighbours(i) {
        if v != j {
            delta += marginal(lambda, graph.shared_sources(j, v));
        }
    }
    delta
}

/// Alternating independent two-paths, shared-target orientation: `z` sums
/// `w(shared_targets(a, b))` over unordered pairs.
pub(super) fn alt_two_paths_u(graph: &Graph, i: NodeId, j: NodeId, lambda: f64) -> f64 {
    let mut delta = 0.0;
    for &u in graph.in_neighbours(j) {
        if u != i {
            delta += marginal(lambda, graph.shared_targets(i, u));
        }
    }
    delta
}

/// Undirected alternating k-triangles: `z` sums `w(common(a, b))` over
/// edges.
pub(super) fn alt_ktriangles(graph: &Graph, i: NodeId, j: NodeId, lambda: f64) -> f64 {
    let mut delta = weight(lambda, graph.common_neighbours(i, j));
    for &k in graph.neighbours(i) {
        if k != j && graph.is_edge(k, j) {
            delta += marginal(lambda, graph.common_neighbours(i, k))
                + marginal(lambda, graph.common_neighbours(j, k));
        }
    }
    delta
}

/// Undirected alternating two-paths: `z` sums `w(common(a, b))` over
/// unordered pairs of distinct nodes.
pub(super) fn alt_two_paths(graph: &Graph, i: NodeId, j: NodeId, lambda: f64) -> f64 {
    let mut delta = 0.0;
    for &k in graph.neighbours(i) {
        if k != j {
            delta += marginal(lambda, graph.common_neighbours(j, k));
        }
    }
    for &k in graph.neighbours(j) {
        if k != i {
            delta += marginal(lambda, graph.common_neighbours(i, k));
        }
    }
    delta
}
