//! Shared test helpers: reference statistic evaluation and graph fixtures.
//!
//! `statistic_value` computes each sufficient statistic from scratch by
//! walking the whole graph, with no reliance on the incremental caches or
//! the change-statistic code paths. Tests use it as the oracle for the
//! delta-correctness law: for any absent dyad,
//! `z(G + tie) - z(G) == change_statistic(G, i, j, effect)`.

use rand::{Rng, SeedableRng, rngs::SmallRng};

use crate::{
    graph::{AttributeColumn, AttributeStore, BipartiteSide, Graph, NodeId, TrackedList},
    stats::Effect,
};

/// Evaluates `effect`'s sufficient statistic on `graph` by exhaustive
/// recount.
pub(crate) fn statistic_value(graph: &Graph, effect: &Effect) -> f64 {
    let attrs = graph.attributes();
    let n = graph.node_count();
    match *effect {
        Effect::Arc | Effect::Edge => graph.tie_count() as f64,
        Effect::Reciprocity => mutual_dyads(graph, |_, _| 1.0),
        Effect::Sink => (0..n)
            .filter(|&v| graph.in_degree(v) > 0 && graph.out_degree(v) == 0)
            .count() as f64,
        Effect::Source => (0..n)
            .filter(|&v| graph.out_degree(v) > 0 && graph.in_degree(v) == 0)
            .count() as f64,
        Effect::Isolates => (0..n)
            .filter(|&v| graph.out_degree(v) == 0 && graph.in_degree(v) == 0)
            .count() as f64,
        Effect::InTwoStars => (0..n).map(|v| choose2(graph.in_degree(v))).sum(),
        Effect::OutTwoStars => (0..n).map(|v| choose2(graph.out_degree(v))).sum(),
        Effect::TwoStars => (0..n).map(|v| choose2(graph.degree(v))).sum(),
        Effect::TwoPaths => ordered_pairs(n)
            .map(|(u, v)| f64::from(graph.count_mixed_two_paths(u, v)))
            .sum(),
        Effect::TransitiveTriangles => {
            let mut count = 0u64;
            for a in 0..n {
                for &b in graph.out_neighbours(a) {
                    for &c in graph.out_neighbours(b) {
                        if c != a && graph.is_arc(a, c) {
                            count += 1;
                        }
                    }
                }
            }
            count as f64
        }
        Effect::CyclicTriangles => {
            let mut rotations = 0u64;
            for a in 0..n {
                for &b in graph.out_neighbours(a) {
                    for &c in graph.out_neighbours(b) {
                        if c != a && graph.is_arc(c, a) {
                            rotations += 1;
                        }
                    }
                }
            }
            rotations as f64 / 3.0
        }
        Effect::AltInStars { lambda } => {
            (0..n).map(|v| alt_star_term(lambda, graph.in_degree(v))).sum()
        }
        Effect::AltOutStars { lambda } => {
            (0..n).map(|v| alt_star_term(lambda, graph.out_degree(v))).sum()
        }
        Effect::AltStars { lambda } => {
            (0..n).map(|v| alt_star_term(lambda, graph.degree(v))).sum()
        }
        Effect::AltKTrianglesT { lambda } => graph
            .iter_ties()
            .map(|(a, b)| geo(lambda, graph.count_mixed_two_paths(a, b)))
            .sum(),
        Effect::AltKTrianglesC { lambda } => graph
            .iter_ties()
            .map(|(a, b)| geo(lambda, graph.count_mixed_two_paths(b, a)))
            .sum(),
        Effect::AltKTrianglesD { lambda } => graph
            .iter_ties()
            .map(|(a, b)| geo(lambda, graph.count_shared_sources(a, b)))
            .sum(),
        Effect::AltKTrianglesU { lambda } => graph
            .iter_ties()
            .map(|(a, b)| geo(lambda, graph.count_shared_targets(a, b)))
            .sum(),
        Effect::AltTwoPathsT { lambda } => ordered_pairs(n)
            .map(|(u, v)| geo(lambda, graph.count_mixed_two_paths(u, v)))
            .sum(),
        Effect::AltTwoPathsD { lambda } => unordered_pairs(n)
            .map(|(u, v)| geo(lambda, graph.count_shared_sources(u, v)))
            .sum(),
        Effect::AltTwoPathsU { lambda } => unordered_pairs(n)
            .map(|(u, v)| geo(lambda, graph.count_shared_targets(u, v)))
            .sum(),
        Effect::AltTwoPathsTD { lambda } => {
            statistic_value(graph, &Effect::AltTwoPathsT { lambda })
                + statistic_value(graph, &Effect::AltTwoPathsD { lambda })
        }
        Effect::Triangles => {
            let total: f64 = graph
                .iter_ties()
                .map(|(a, b)| f64::from(graph.count_common_neighbours(a, b)))
                .sum();
            total / 3.0
        }
        Effect::AltKTriangles { lambda } => graph
            .iter_ties()
            .map(|(a, b)| geo(lambda, graph.count_common_neighbours(a, b)))
            .sum(),
        Effect::AltTwoPaths { lambda } => unordered_pairs(n)
            .map(|(u, v)| geo(lambda, graph.count_common_neighbours(u, v)))
            .sum(),
        Effect::FourCycles => same_mode_pairs(graph, BipartiteSide::A)
            .map(|(u, v)| choose2(graph.count_common_neighbours(u, v)))
            .sum(),
        Effect::BipartiteTwoStarsA => mode_nodes(graph, BipartiteSide::A)
            .map(|v| choose2(graph.degree(v)))
            .sum(),
        Effect::BipartiteTwoStarsB => mode_nodes(graph, BipartiteSide::B)
            .map(|v| choose2(graph.degree(v)))
            .sum(),
        Effect::BipartiteAltStarsA { lambda } => mode_nodes(graph, BipartiteSide::A)
            .map(|v| alt_star_term(lambda, graph.degree(v)))
            .sum(),
        Effect::BipartiteAltStarsB { lambda } => mode_nodes(graph, BipartiteSide::B)
            .map(|v| alt_star_term(lambda, graph.degree(v)))
            .sum(),
        Effect::BipartiteAltKCyclesA { lambda } => same_mode_pairs(graph, BipartiteSide::A)
            .map(|(u, v)| geo(lambda, graph.count_common_neighbours(u, v)))
            .sum(),
        Effect::BipartiteAltKCyclesB { lambda } => same_mode_pairs(graph, BipartiteSide::B)
            .map(|(u, v)| geo(lambda, graph.count_common_neighbours(u, v)))
            .sum(),
        Effect::BipartiteAltK4CyclesA { lambda } => same_mode_pairs(graph, BipartiteSide::A)
            .map(|(u, v)| geo_f(lambda, choose2(graph.count_common_neighbours(u, v))))
            .sum(),
        Effect::BipartiteAltK4CyclesB { lambda } => same_mode_pairs(graph, BipartiteSide::B)
            .map(|(u, v)| geo_f(lambda, choose2(graph.count_common_neighbours(u, v))))
            .sum(),
        Effect::BipartiteFourCyclesNodePower { alpha } => (0..n)
            .map(|v| {
                let cycles: f64 = (0..n)
                    .filter(|&u| u != v && graph.side_of(u) == graph.side_of(v))
                    .map(|u| choose2(graph.count_common_neighbours(v, u)))
                    .sum();
                cycles.powf(alpha)
            })
            .sum(),
        Effect::Sender { attr } => tie_sum(graph, |a, _| binary(attrs, attr, a)),
        Effect::Receiver { attr } => tie_sum(graph, |_, b| binary(attrs, attr, b)),
        Effect::Interaction { attr } => {
            tie_sum(graph, |a, b| binary(attrs, attr, a) * binary(attrs, attr, b))
        }
        Effect::Activity { attr } => {
            tie_sum(graph, |a, b| binary(attrs, attr, a) + binary(attrs, attr, b))
        }
        Effect::Matching { attr } => tie_sum(graph, |a, b| cat_match(attrs, attr, a, b)),
        Effect::MatchingReciprocity { attr } => {
            mutual_dyads(graph, |a, b| cat_match(attrs, attr, a, b))
        }
        Effect::Mismatching { attr } => tie_sum(graph, |a, b| cat_mismatch(attrs, attr, a, b)),
        Effect::MismatchingReciprocity { attr } => {
            mutual_dyads(graph, |a, b| cat_mismatch(attrs, attr, a, b))
        }
        Effect::ContinuousSender { attr } => tie_sum(graph, |a, _| cont(attrs, attr, a)),
        Effect::ContinuousReceiver { attr } => tie_sum(graph, |_, b| cont(attrs, attr, b)),
        Effect::Diff { attr } => tie_sum(graph, |a, b| pair_stat(attrs, attr, a, b, |x, y| (x - y).abs())),
        Effect::Sum { attr } => tie_sum(graph, |a, b| pair_stat(attrs, attr, a, b, |x, y| x + y)),
        Effect::DiffReciprocity { attr } => {
            mutual_dyads(graph, |a, b| pair_stat(attrs, attr, a, b, |x, y| (x - y).abs()))
        }
        Effect::DiffSign { attr } => tie_sum(graph, |a, b| {
            pair_stat(attrs, attr, a, b, |x, y| {
                if x > y {
                    1.0
                } else if x < y {
                    -1.0
                } else {
                    0.0
                }
            })
        }),
        Effect::DiffDirectionalSR { attr } => {
            tie_sum(graph, |a, b| pair_stat(attrs, attr, a, b, |x, y| (x - y).max(0.0)))
        }
        Effect::DiffDirectionalRS { attr } => {
            tie_sum(graph, |a, b| pair_stat(attrs, attr, a, b, |x, y| (y - x).max(0.0)))
        }
        Effect::JaccardSimilarity { attr } => tie_sum(graph, |a, b| jaccard(attrs, attr, a, b)),
        Effect::BinaryPairInteraction {
            attr_first,
            attr_second,
        } => {
            if graph.is_directed() {
                tie_sum(graph, |a, b| {
                    binary(attrs, attr_first, a) * binary(attrs, attr_second, b)
                })
            } else {
                tie_sum(graph, |a, b| {
                    binary(attrs, attr_first, a) * binary(attrs, attr_second, b)
                        + binary(attrs, attr_first, b) * binary(attrs, attr_second, a)
                })
            }
        }
        Effect::BipartiteActivityA { attr } => tie_sum(graph, |a, _| binary(attrs, attr, a)),
        Effect::BipartiteActivityB { attr } => tie_sum(graph, |_, b| binary(attrs, attr, b)),
        Effect::BipartiteTwoPathSumA { attr } => two_path_pair_sum(graph, BipartiteSide::A, |u, v| {
            cont(attrs, attr, u) + cont(attrs, attr, v)
        }),
        Effect::BipartiteTwoPathSumB { attr } => two_path_pair_sum(graph, BipartiteSide::B, |u, v| {
            cont(attrs, attr, u) + cont(attrs, attr, v)
        }),
        Effect::BipartiteTwoPathDiffA { attr } => two_path_pair_sum(graph, BipartiteSide::A, |u, v| {
            pair_stat(attrs, attr, u, v, |x, y| (x - y).abs())
        }),
        Effect::BipartiteTwoPathDiffB { attr } => two_path_pair_sum(graph, BipartiteSide::B, |u, v| {
            pair_stat(attrs, attr, u, v, |x, y| (x - y).abs())
        }),
        Effect::BipartiteTwoPathMatchingA { attr } => {
            two_path_pair_sum(graph, BipartiteSide::A, |u, v| cat_match(attrs, attr, u, v))
        }
        Effect::BipartiteTwoPathMatchingB { attr } => {
            two_path_pair_sum(graph, BipartiteSide::B, |u, v| cat_match(attrs, attr, u, v))
        }
        Effect::BipartiteNodematchAlphaA { attr, alpha } => {
            matching_pair_sum(graph, BipartiteSide::A, attrs, attr, |t| {
                f64::from(t).powf(alpha)
            })
        }
        Effect::BipartiteNodematchAlphaB { attr, alpha } => {
            matching_pair_sum(graph, BipartiteSide::B, attrs, attr, |t| {
                f64::from(t).powf(alpha)
            })
        }
        Effect::BipartiteNodematchBetaA { attr, beta } => {
            matching_pair_sum(graph, BipartiteSide::A, attrs, attr, |t| {
                1.0 - (1.0 - beta).powi(t as i32)
            })
        }
        Effect::BipartiteNodematchBetaB { attr, beta } => {
            matching_pair_sum(graph, BipartiteSide::B, attrs, attr, |t| {
                1.0 - (1.0 - beta).powi(t as i32)
            })
        }
        Effect::GeoDistance { lat, lon } => tie_sum(graph, |a, b| haversine(attrs, lat, lon, a, b)),
        Effect::LogGeoDistance { lat, lon } => tie_sum(graph, |a, b| {
            let d = haversine(attrs, lat, lon, a, b);
            if d > 0.0 { d.ln() } else { 0.0 }
        }),
        Effect::EuclideanDistance { x, y, z } => tie_sum(graph, |a, b| {
            let mut total = 0.0;
            for axis in [x, y, z] {
                let p = attrs.continuous(axis, a);
                let q = attrs.continuous(axis, b);
                if p.is_nan() || q.is_nan() {
                    return 0.0;
                }
                total += (p - q) * (p - q);
            }
            total.sqrt()
        }),
    }
}

fn choose2(count: u32) -> f64 {
    let c = f64::from(count);
    c * (c - 1.0) / 2.0
}

fn geo(lambda: f64, count: u32) -> f64 {
    lambda * (1.0 - (1.0 - 1.0 / lambda).powi(count as i32))
}

fn geo_f(lambda: f64, count: f64) -> f64 {
    lambda * (1.0 - (1.0 - 1.0 / lambda).powf(count))
}

fn alt_star_term(lambda: f64, degree: u32) -> f64 {
    let r = 1.0 - 1.0 / lambda;
    lambda * lambda * (r.powi(degree as i32) - 1.0 + f64::from(degree) / lambda)
}

fn ordered_pairs(n: u32) -> impl Iterator<Item = (NodeId, NodeId)> {
    (0..n).flat_map(move |u| (0..n).filter(move |&v| v != u).map(move |v| (u, v)))
}

fn unordered_pairs(n: u32) -> impl Iterator<Item = (NodeId, NodeId)> {
    (0..n).flat_map(move |u| (u + 1..n).map(move |v| (u, v)))
}

fn mode_nodes(graph: &Graph, side: BipartiteSide) -> impl Iterator<Item = NodeId> + '_ {
    (0..graph.node_count()).filter(move |&v| graph.side_of(v) == side)
}

fn same_mode_pairs(
    graph: &Graph,
    side: BipartiteSide,
) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
    let nodes: Vec<NodeId> = mode_nodes(graph, side).collect();
    let mut pairs = Vec::new();
    for (index, &u) in nodes.iter().enumerate() {
        for &v in &nodes[index + 1..] {
            pairs.push((u, v));
        }
    }
    pairs.into_iter()
}

fn tie_sum(graph: &Graph, f: impl Fn(NodeId, NodeId) -> f64) -> f64 {
    graph.iter_ties().map(|(a, b)| f(a, b)).sum()
}

fn mutual_dyads(graph: &Graph, f: impl Fn(NodeId, NodeId) -> f64) -> f64 {
    let mut total = 0.0;
    for a in 0..graph.node_count() {
        for &b in graph.out_neighbours(a) {
            if a < b && graph.is_arc(b, a) {
                total += f(a, b);
            }
        }
    }
    total
}

fn two_path_pair_sum(
    graph: &Graph,
    side: BipartiteSide,
    f: impl Fn(NodeId, NodeId) -> f64,
) -> f64 {
    same_mode_pairs(graph, side)
        .map(|(u, v)| f64::from(graph.count_common_neighbours(u, v)) * f(u, v))
        .sum()
}

fn matching_pair_sum(
    graph: &Graph,
    side: BipartiteSide,
    attrs: &AttributeStore,
    attr: usize,
    weight: impl Fn(u32) -> f64,
) -> f64 {
    same_mode_pairs(graph, side)
        .filter(|&(u, v)| cat_match(attrs, attr, u, v) == 1.0)
        .map(|(u, v)| {
            let t = graph.count_common_neighbours(u, v);
            if t == 0 { 0.0 } else { weight(t) }
        })
        .sum()
}

fn binary(attrs: &AttributeStore, attr: usize, node: NodeId) -> f64 {
    match attrs.binary(attr, node) {
        Some(true) => 1.0,
        _ => 0.0,
    }
}

fn cat_match(attrs: &AttributeStore, attr: usize, a: NodeId, b: NodeId) -> f64 {
    match (attrs.categorical(attr, a), attrs.categorical(attr, b)) {
        (Some(x), Some(y)) if x == y => 1.0,
        _ => 0.0,
    }
}

fn cat_mismatch(attrs: &AttributeStore, attr: usize, a: NodeId, b: NodeId) -> f64 {
    match (attrs.categorical(attr, a), attrs.categorical(attr, b)) {
        (Some(x), Some(y)) if x != y => 1.0,
        _ => 0.0,
    }
}

fn cont(attrs: &AttributeStore, attr: usize, node: NodeId) -> f64 {
    let value = attrs.continuous(attr, node);
    if value.is_nan() { 0.0 } else { value }
}

fn pair_stat(
    attrs: &AttributeStore,
    attr: usize,
    a: NodeId,
    b: NodeId,
    f: impl Fn(f64, f64) -> f64,
) -> f64 {
    let x = attrs.continuous(attr, a);
    let y = attrs.continuous(attr, b);
    if x.is_nan() || y.is_nan() { 0.0 } else { f(x, y) }
}

fn jaccard(attrs: &AttributeStore, attr: usize, a: NodeId, b: NodeId) -> f64 {
    let (Some(x), Some(y)) = (attrs.set(attr, a), attrs.set(attr, b)) else {
        return 0.0;
    };
    let width = x.len().max(y.len());
    let mut intersection = 0usize;
    let mut union = 0usize;
    for index in 0..width {
        let in_x = x.get(index).is_some_and(|bit| *bit);
        let in_y = y.get(index).is_some_and(|bit| *bit);
        if in_x && in_y {
            intersection += 1;
        }
        if in_x || in_y {
            union += 1;
        }
    }
    if union == 0 {
        0.0
    } else {
        intersection as f64 / union as f64
    }
}

fn haversine(attrs: &AttributeStore, lat: usize, lon: usize, a: NodeId, b: NodeId) -> f64 {
    let (la, lo, lb, lob) = (
        attrs.continuous(lat, a),
        attrs.continuous(lon, a),
        attrs.continuous(lat, b),
        attrs.continuous(lon, b),
    );
    if la.is_nan() || lo.is_nan() || lb.is_nan() || lob.is_nan() {
        return 0.0;
    }
    let h = ((lb - la).to_radians() / 2.0).sin().powi(2)
        + la.to_radians().cos() * lb.to_radians().cos() * ((lob - lo).to_radians() / 2.0).sin().powi(2);
    2.0 * 6371.0 * h.sqrt().min(1.0).asin()
}

/// Seeded Erdos-Renyi directed graph.
pub(crate) fn random_directed(n: u32, p: f64, seed: u64) -> Graph {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut graph = Graph::directed(n);
    for i in 0..n {
        for j in 0..n {
            if i != j && rng.gen_range(0.0..1.0) < p {
                graph.insert_arc(i, j, TrackedList::All).unwrap();
            }
        }
    }
    graph
}

/// Seeded Erdos-Renyi undirected graph.
pub(crate) fn random_undirected(n: u32, p: f64, seed: u64) -> Graph {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut graph = Graph::undirected(n);
    for i in 0..n {
        for j in i + 1..n {
            if rng.gen_range(0.0..1.0) < p {
                graph.insert_edge(i, j, TrackedList::All).unwrap();
            }
        }
    }
    graph
}

/// Seeded random bipartite graph.
pub(crate) fn random_bipartite(mode_a: u32, mode_b: u32, p: f64, seed: u64) -> Graph {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut graph = Graph::bipartite(mode_a, mode_b);
    for a in 0..mode_a {
        for b in mode_a..mode_a + mode_b {
            if rng.gen_range(0.0..1.0) < p {
                graph.insert_edge(a, b, TrackedList::All).unwrap();
            }
        }
    }
    graph
}

/// Attaches one column of every attribute kind, with a sprinkling of
/// missing values, to exercise the attribute effects.
pub(crate) fn attach_sample_attributes(graph: &mut Graph, seed: u64) {
    use bitvec::vec::BitVec;

    let mut rng = SmallRng::seed_from_u64(seed);
    let n = graph.node_count();
    let mut attrs = AttributeStore::default();
    let binary: Vec<Option<bool>> = (0..n)
        .map(|_| match rng.gen_range(0..10) {
            0 => None,
            k => Some(k % 2 == 0),
        })
        .collect();
    attrs.push_binary(AttributeColumn::new("flag", binary));
    let categorical: Vec<Option<u32>> = (0..n)
        .map(|_| match rng.gen_range(0..10) {
            0 => None,
            k => Some(k % 3),
        })
        .collect();
    attrs.push_categorical(AttributeColumn::new("group", categorical));
    for name in ["score", "lat", "lon"] {
        let continuous: Vec<f64> = (0..n)
            .map(|_| {
                if rng.gen_range(0..10) == 0 {
                    f64::NAN
                } else {
                    rng.gen_range(-30.0..60.0)
                }
            })
            .collect();
        attrs.push_continuous(AttributeColumn::new(name, continuous));
    }
    let sets: Vec<Option<BitVec>> = (0..n)
        .map(|_| {
            if rng.gen_range(0..10) == 0 {
                None
            } else {
                let mut bits = BitVec::repeat(false, 6);
                for element in 0..6 {
                    if rng.gen_range(0..3) == 0 {
                        bits.set(element, true);
                    }
                }
                Some(bits)
            }
        })
        .collect();
    attrs.push_set(AttributeColumn::new("tags", sets));
    graph.set_attributes(attrs);
}

/// Canonical comparison snapshot of a graph: mode, sorted adjacency and
/// tie count.
pub(crate) fn snapshot(graph: &Graph) -> (String, Vec<Vec<NodeId>>, Vec<Vec<NodeId>>, u64) {
    let sort = |rows: Vec<Vec<NodeId>>| {
        rows.into_iter()
            .map(|mut row| {
                row.sort_unstable();
                row
            })
            .collect()
    };
    let fwd: Vec<Vec<NodeId>> = (0..graph.node_count())
        .map(|v| graph.out_neighbours(v).to_vec())
        .collect();
    let rev: Vec<Vec<NodeId>> = (0..graph.node_count())
        .map(|v| graph.in_neighbours(v).to_vec())
        .collect();
    (
        format!("{:?}", graph.mode()),
        sort(fwd),
        sort(rev),
        graph.tie_count(),
    )
}
