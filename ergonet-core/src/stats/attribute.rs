//! One-mode attribute change statistics.
//!
//! A missing value always contributes zero: the effect neither rewards
//! nor penalises ties whose operands are unobserved.

use crate::graph::{AttributeStore, Graph, NodeId};

/// 1.0 when the binary attribute is present and set.
pub(super) fn binary_indicator(attrs: &AttributeStore, attr: usize, node: NodeId) -> f64 {
    match attrs.binary(attr, node) {
        Some(true) => 1.0,
        _ => 0.0,
    }
}

/// 1.0 when both categorical values are present and equal.
pub(super) fn matching(attrs: &AttributeStore, attr: usize, i: NodeId, j: NodeId) -> f64 {
    match (attrs.categorical(attr, i), attrs.categorical(attr, j)) {
        (Some(a), Some(b)) if a == b => 1.0,
        _ => 0.0,
    }
}

/// 1.0 when both categorical values are present and differ.
pub(super) fn mismatching(attrs: &AttributeStore, attr: usize, i: NodeId, j: NodeId) -> f64 {
    match (attrs.categorical(attr, i), attrs.categorical(attr, j)) {
        (Some(a), Some(b)) if a != b => 1.0,
        _ => 0.0,
    }
}

/// The continuous value, or zero when missing.
pub(super) fn continuous_or_zero(attrs: &AttributeStore, attr: usize, node: NodeId) -> f64 {
    let value = attrs.continuous(attr, node);
    if value.is_nan() { 0.0 } else { value }
}

/// Absolute difference; zero when either value is missing.
pub(super) fn abs_diff(attrs: &AttributeStore, attr: usize, i: NodeId, j: NodeId) -> f64 {
    both_present(attrs, attr, i, j).map_or(0.0, |(a, b)| (a - b).abs())
}

/// Sum of both values; zero when either is missing.
pub(super) fn sum(attrs: &AttributeStore, attr: usize, i: NodeId, j: NodeId) -> f64 {
    both_present(attrs, attr, i, j).map_or(0.0, |(a, b)| a + b)
}

/// Sign of the sender-minus-receiver difference; zero on ties or missing
/// values.
pub(super) fn diff_sign(attrs: &AttributeStore, attr: usize, i: NodeId, j: NodeId) -> f64 {
    both_present(attrs, attr, i, j).map_or(0.0, |(a, b)| {
        if a > b {
            1.0
        } else if a < b {
            -1.0
        } else {
            0.0
        }
    })
}

/// Positive part of the first-minus-second difference.
pub(super) fn diff_positive(attrs: &AttributeStore, attr: usize, first: NodeId, second: NodeId) -> f64 {
    both_present(attrs, attr, first, second).map_or(0.0, |(a, b)| (a - b).max(0.0))
}

/// Jaccard similarity of two set attributes: intersection over union,
/// zero when either side is missing or the union is empty.
pub(super) fn jaccard(attrs: &AttributeStore, attr: usize, i: NodeId, j: NodeId) -> f64 {
    let (Some(a), Some(b)) = (attrs.set(attr, i), attrs.set(attr, j)) else {
        return 0.0;
    };
    let mut intersection = 0usize;
    let mut union = 0usize;
    let width = a.len().max(b.len());
    for index in 0..width {
        let in_a = a.get(index).is_some_and(|bit| *bit);
        let in_b = b.get(index).is_some_and(|bit| *bit);
        if in_a && in_b {
            intersection += 1;
        }
        if in_a || in_b {
            union += 1;
        }
    }
    if union == 0 {
        0.0
    } else {
        intersection as f64 / union as f64
    }
}

/// Product of two binary attributes across the dyad.
///
/// On a directed graph the first attribute is read on the sender and the
/// second on the receiver; on an undirected graph both orientations
/// contribute.
pub(super) fn binary_pair(
    graph: &Graph,
    attrs: &AttributeStore,
    attr_first: usize,
    attr_second: usize,
    i: NodeId,
    j: NodeId,
) -> f64 {
    let forward = binary_indicator(attrs, attr_first, i) * binary_indicator(attrs, attr_second, j);
    if graph.is_directed() {
        forward
    } else {
        forward + binary_indicator(attrs, attr_first, j) * binary_indicator(attrs, attr_second, i)
    }
}

fn both_present(
    attrs: &AttributeStore,
    attr: usize,
    i: NodeId,
    j: NodeId,
) -> Option<(f64, f64)> {
    let a = attrs.continuous(attr, i);
    let b = attrs.continuous(attr, j);
    if a.is_nan() || b.is_nan() {
        None
    } else {
        Some((a, b))
    }
}
