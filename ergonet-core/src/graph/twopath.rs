//! Incremental two-path bookkeeping.
//!
//! Each map takes an ordered node pair to the exact number of length-two
//! paths of its kind in the current graph. Absent keys mean zero and keys
//! that reach zero are removed, so memory stays proportional to the number
//! of connected pairs. The maps are owned by the graph store and updated
//! inside every insert/remove before the mutation returns; callers never
//! observe a graph whose counts are out of date.

use std::collections::HashMap;

use super::NodeId;

/// A sparse mapping from an ordered node pair to a non-negative count.
#[derive(Clone, Debug, Default)]
pub(crate) struct PairCounts {
    counts: HashMap<(NodeId, NodeId), u32>,
}

impl PairCounts {
    pub(crate) fn get(&self, from: NodeId, to: NodeId) -> u32 {
        self.counts.get(&(from, to)).copied().unwrap_or(0)
    }

    pub(crate) fn inc(&mut self, from: NodeId, to: NodeId) {
        *self.counts.entry((from, to)).or_insert(0) += 1;
    }

    /// Decrements a count, pruning the entry when it reaches zero.
    ///
    /// Decrementing an absent pair indicates the caller and the cache have
    /// diverged; debug builds assert, release builds leave the map at zero.
    pub(crate) fn dec(&mut self, from: NodeId, to: NodeId) {
        match self.counts.get_mut(&(from, to)) {
            Some(count) if *count > 1 => *count -= 1,
            Some(_) => {
                self.counts.remove(&(from, to));
            }
            None => debug_assert!(false, "decrement of absent two-path pair ({from}, {to})"),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.counts.len()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = ((NodeId, NodeId), u32)> + '_ {
        self.counts.iter().map(|(&pair, &count)| (pair, count))
    }
}

/// The per-mode family of two-path maps.
#[derive(Clone, Debug)]
pub(crate) enum TwoPathCache {
    /// Directed graphs track mixed (`u -> w -> v`), shared-target
    /// (`u -> w <- v`) and shared-source (`u <- w -> v`) paths.
    Directed {
        mixed: PairCounts,
        shared_targets: PairCounts,
        shared_sources: PairCounts,
    },
    /// One-mode undirected graphs track common neighbours.
    OneMode { common: PairCounts },
    /// Bipartite graphs track two-paths between nodes of the same mode.
    TwoMode {
        mode_a: PairCounts,
        mode_b: PairCounts,
    },
}

impl TwoPathCache {
    pub(crate) fn directed() -> Self {
        Self::Directed {
            mixed: PairCounts::default(),
            shared_targets: PairCounts::default(),
            shared_sources: PairCounts::default(),
        }
    }

    pub(crate) fn one_mode() -> Self {
        Self::OneMode {
            common: PairCounts::default(),
        }
    }

    pub(crate) fn two_mode() -> Self {
        Self::TwoMode {
            mode_a: PairCounts::default(),
            mode_b: PairCounts::default(),
        }
    }

    /// Applies the incremental update for toggling the arc `i -> j`.
    ///
    /// The adjacency slices must reflect the post-toggle graph; the loops
    /// skip `i` and `j` themselves, so the result is identical whichever
    /// side of the adjacency mutation the call lands on.
    pub(crate) fn toggle_arc(
        &mut self,
        i: NodeId,
        j: NodeId,
        out_i: &[NodeId],
        in_i: &[NodeId],
        out_j: &[NodeId],
        in_j: &[NodeId],
        added: bool,
    ) {
        let Self::Directed {
            mixed,
            shared_targets,
            shared_sources,
        } = self
        else {
            debug_assert!(false, "arc toggle on a non-directed two-path cache");
            return;
        };
        // New or destroyed paths u -> i -> j for every u with an arc to i.
        for &u in in_i {
            if u == i || u == j {
                continue;
            }
            bump(mixed, u, j, added);
        }
        // Paths i -> j -> v for every v that j points at.
        for &v in out_j {
            if v == i || v == j {
                continue;
            }
            bump(mixed, i, v, added);
        }
        // i and v now share the target j for every other v with an arc to j.
        for &v in in_j {
            if v == i || v == j {
                continue;
            }
            bump(shared_targets, i, v, added);
            bump(shared_targets, v, i, added);
        }
        // j and v now share the source i for every other v that i points at.
        for &v in out_i {
            if v == i || v == j {
                continue;
            }
            bump(shared_sources, j, v, added);
            bump(shared_sources, v, j, added);
        }
    }

    /// Applies the incremental update for toggling the undirected edge
    /// `i -- j` in a one-mode graph.
    pub(crate) fn toggle_edge(
        &mut self,
        i: NodeId,
        j: NodeId,
        nbr_i: &[NodeId],
        nbr_j: &[NodeId],
        added: bool,
    ) {
        let Self::OneMode { common } = self else {
            debug_assert!(false, "one-mode edge toggle on a mismatched two-path cache");
            return;
        };
        for &u in nbr_i {
            if u == i || u == j {
                continue;
            }
            bump(common, u, j, added);
            bump(common, j, u, added);
        }
        for &v in nbr_j {
            if v == i || v == j {
                continue;
            }
            bump(common, v, i, added);
            bump(common, i, v, added);
        }
    }

    /// Applies the incremental update for toggling the bipartite edge
    /// `i -- j`, where `i` is the mode-A endpoint and `j` the mode-B one.
    ///
    /// Every neighbour of `j` shares mode with `i`, and every neighbour of
    /// `i` shares mode with `j`, so each loop feeds exactly one same-mode
    /// map.
    pub(crate) fn toggle_bipartite_edge(
        &mut self,
        i: NodeId,
        j: NodeId,
        nbr_i: &[NodeId],
        nbr_j: &[NodeId],
        added: bool,
    ) {
        let Self::TwoMode { mode_a, mode_b } = self else {
            debug_assert!(false, "bipartite edge toggle on a mismatched two-path cache");
            return;
        };
        for &u in nbr_j {
            if u == i {
                continue;
            }
            bump(mode_a, u, i, added);
            bump(mode_a, i, u, added);
        }
        for &v in nbr_i {
            if v == j {
                continue;
            }
            bump(mode_b, v, j, added);
            bump(mode_b, j, v, added);
        }
    }
}

fn bump(counts: &mut PairCounts, from: NodeId, to: NodeId, added: bool) {
    if added {
        counts.inc(from, to);
    } else {
        counts.dec(from, to);
    }
}
