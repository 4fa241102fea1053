//! Non-alternating structural change statistics.
//!
//! Degree-based deltas read only the endpoint degrees; triad deltas read
//! the two-path counts, so their cost is independent of the graph size.

use crate::graph::{Graph, NodeId};

/// Reciprocity: 1 when the opposing arc `j -> i` is present.
pub(super) fn reciprocity(graph: &Graph, i: NodeId, j: NodeId) -> f64 {
    if graph.is_arc(j, i) { 1.0 } else { 0.0 }
}

/// Sinks are nodes with incoming arcs and no outgoing ones.
///
/// The receiver becomes a sink when it was previously untouched; the
/// sender stops being one when the new arc is its first outgoing tie.
pub(super) fn sink(graph: &Graph, i: NodeId, j: NodeId) -> f64 {
    let mut delta = 0.0;
    if graph.out_degree(j) == 0 && graph.in_degree(j) == 0 {
        delta += 1.0;
    }
    if graph.out_degree(i) == 0 && graph.in_degree(i) > 0 {
        delta -= 1.0;
    }
    delta
}

/// Sources are nodes with outgoing arcs and no incoming ones.
pub(super) fn source(graph: &Graph, i: NodeId, j: NodeId) -> f64 {
    let mut delta = 0.0;
    if graph.in_degree(i) == 0 && graph.out_degree(i) == 0 {
        delta += 1.0;
    }
    if graph.in_degree(j) == 0 && graph.out_degree(j) > 0 {
        delta -= 1.0;
    }
    delta
}

/// Nodes with no ties in either direction.
pub(super) fn isolates(graph: &Graph, i: NodeId, j: NodeId) -> f64 {
    let total = |node: NodeId| graph.out_degree(node) + graph.in_degree(node);
    let mut delta = 0.0;
    if total(i) == 0 {
        delta -= 1.0;
    }
    if total(j) == 0 {
        delta -= 1.0;
    }
    delta
}

/// Directed two-paths gained: `u -> i -> j` for senders into `i` and
/// `i -> j -> v` for receivers of `j`, excluding the two paths that would
/// run through the dyad itself when `j -> i` exists.
pub(super) fn two_paths(graph: &Graph, i: NodeId, j: NodeId) -> f64 {
    let reciprocal = if graph.is_arc(j, i) { 2.0 } else { 0.0 };
    f64::from(graph.in_degree(i)) + f64::from(graph.out_degree(j)) - reciprocal
}

/// Transitive triads closed by the new arc, in any of its three roles:
/// shortcut over a two-path, first leg, or second leg.
pub(super) fn transitive_triangles(graph: &Graph, i: NodeId, j: NodeId) -> f64 {
    f64::from(graph.mixed_two_paths(i, j))
        + f64::from(graph.shared_targets(i, j))
        + f64::from(graph.shared_sources(i, j))
}
