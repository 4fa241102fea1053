//! Full-recount consistency checks for the graph store.
//!
//! The checker re-derives every cached quantity from the adjacency lists
//! and reports disagreements. It is far too slow for the sampling loop and
//! exists for tests and debug sweeps; the mutators themselves rely on the
//! cheap precondition checks instead.

use super::{Graph, GraphMode, NodeId, error::ConsistencyError, ties::TrackedList};

/// Enumerates the recount checks the checker can run.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum GraphInvariant {
    /// Forward and reversed adjacency must mirror each other exactly.
    MirroredAdjacency,
    /// Synced flat tie lists must contain every qualifying tie exactly once.
    TieLists,
    /// Two-path counts must equal a from-scratch recount.
    TwoPathCounts,
    /// Bipartite edges must join distinct modes.
    BipartiteModes,
    /// Ties must join the same or adjacent snowball zones, and the
    /// previous-wave degree counters must match a recount.
    SnowballZones,
}

impl GraphInvariant {
    /// All checks, in evaluation order.
    #[must_use]
    pub const fn all() -> [Self; 5] {
        [
            Self::MirroredAdjacency,
            Self::TieLists,
            Self::TwoPathCounts,
            Self::BipartiteModes,
            Self::SnowballZones,
        ]
    }
}

/// Runs recount checks against a graph.
#[derive(Debug)]
pub struct GraphChecker<'g> {
    graph: &'g Graph,
}

impl<'g> GraphChecker<'g> {
    /// Wraps a graph for checking.
    #[must_use]
    pub fn new(graph: &'g Graph) -> Self {
        Self { graph }
    }

    /// Runs every check and collects the failures.
    #[must_use]
    pub fn check_all(&self) -> Vec<ConsistencyError> {
        let mut failures = Vec::new();
        for invariant in GraphInvariant::all() {
            if let Err(error) = self.check(invariant) {
                failures.push(error);
            }
        }
        failures
    }

    /// Runs a single check.
    ///
    /// # Errors
    /// Returns the first [`ConsistencyError`] the recount uncovers.
    pub fn check(&self, invariant: GraphInvariant) -> Result<(), ConsistencyError> {
        match invariant {
            GraphInvariant::MirroredAdjacency => self.check_mirrored(),
            GraphInvariant::TieLists => self.check_tie_lists(),
            GraphInvariant::TwoPathCounts => self.check_two_paths(),
            GraphInvariant::BipartiteModes => self.check_bipartite(),
            GraphInvariant::SnowballZones => self.check_zones(),
        }
    }

    fn check_mirrored(&self) -> Result<(), ConsistencyError> {
        let graph = self.graph;
        for from in 0..graph.node_count() {
            for &to in graph.out_neighbours(from) {
                let mirrored = if graph.is_directed() {
                    graph.in_neighbours(to).contains(&from)
                } else {
                    graph.out_neighbours(to).contains(&from)
                };
                if !mirrored {
                    return Err(ConsistencyError::MissingTie { from, to });
                }
            }
            if graph.is_directed() {
                for &to in graph.in_neighbours(from) {
                    if !graph.out_neighbours(to).contains(&from) {
                        return Err(ConsistencyError::MissingTie { from: to, to: from });
                    }
                }
            }
        }
        Ok(())
    }

    fn check_tie_lists(&self) -> Result<(), ConsistencyError> {
        let graph = self.graph;
        let counted = graph.iter_ties().count() as u64;
        if counted != graph.tie_count() {
            return Err(ConsistencyError::TieCount {
                counter: graph.tie_count(),
                counted,
            });
        }
        for list in [
            TrackedList::All,
            TrackedList::InnerZone,
            TrackedList::MaxTermSender,
        ] {
            if !graph.list_is_synced(list) {
                continue;
            }
            let mut listed: Vec<(NodeId, NodeId)> =
                (0..graph.list_len(list)).filter_map(|i| graph.tie_at(list, i)).collect();
            listed.sort_unstable();
            let mut recounted: Vec<(NodeId, NodeId)> = graph
                .iter_ties()
                .filter(|&(from, to)| match list {
                    TrackedList::All => true,
                    TrackedList::InnerZone => graph
                        .zones()
                        .is_some_and(|zones| zones.is_inner_dyad(from, to)),
                    TrackedList::MaxTermSender => graph
                        .terms()
                        .is_some_and(|terms| terms.is_max_term(from)),
                    TrackedList::None => false,
                })
                .collect();
            // An unloaded overlay leaves its list legitimately empty.
            if matches!(list, TrackedList::InnerZone) && graph.zones().is_none() {
                recounted.clear();
            }
            if matches!(list, TrackedList::MaxTermSender) && graph.terms().is_none() {
                recounted.clear();
            }
            recounted.sort_unstable();
            if listed != recounted {
                return Err(ConsistencyError::StaleTieList { list });
            }
        }
        Ok(())
    }

    #[cfg(feature = "twopath-cache")]
    fn check_two_paths(&self) -> Result<(), ConsistencyError> {
        use super::twopath::{PairCounts, TwoPathCache};

        use super::BipartiteSide;

        let graph = self.graph;
        let verify = |counts: &PairCounts,
                      recount: &dyn Fn(NodeId, NodeId) -> u32,
                      in_scope: &dyn Fn(NodeId, NodeId) -> bool|
         -> Result<(), ConsistencyError> {
            for ((from, to), cached) in counts.iter() {
                let counted = recount(from, to);
                if cached != counted {
                    return Err(ConsistencyError::CacheMismatch {
                        from,
                        to,
                        cached,
                        counted,
                    });
                }
            }
            // Zero entries are pruned, so the reverse direction only needs
            // to find pairs the cache is missing.
            for u in 0..graph.node_count() {
                for v in 0..graph.node_count() {
                    if u == v || !in_scope(u, v) {
                        continue;
                    }
                    let counted = recount(u, v);
                    if counted != 0 && counts.get(u, v) != counted {
                        return Err(ConsistencyError::CacheMismatch {
                            from: u,
                            to: v,
                            cached: counts.get(u, v),
                            counted,
                        });
                    }
                }
            }
            Ok(())
        };
        let any_pair = |_: NodeId, _: NodeId| true;

        match graph.two_path_cache() {
            TwoPathCache::Directed {
                mixed,
                shared_targets,
                shared_sources,
            } => {
                verify(mixed, &|u, v| graph.count_mixed_two_paths(u, v), &any_pair)?;
                verify(
                    shared_targets,
                    &|u, v| graph.count_shared_targets(u, v),
                    &any_pair,
                )?;
                verify(
                    shared_sources,
                    &|u, v| graph.count_shared_sources(u, v),
                    &any_pair,
                )
            }
            TwoPathCache::OneMode { common } => verify(
                common,
                &|u, v| graph.count_common_neighbours(u, v),
                &any_pair,
            ),
            TwoPathCache::TwoMode { mode_a, mode_b } => {
                verify(
                    mode_a,
                    &|u, v| graph.count_common_neighbours(u, v),
                    &|u, v| {
                        graph.side_of(u) == BipartiteSide::A && graph.side_of(v) == BipartiteSide::A
                    },
                )?;
                verify(
                    mode_b,
                    &|u, v| graph.count_common_neighbours(u, v),
                    &|u, v| {
                        graph.side_of(u) == BipartiteSide::B && graph.side_of(v) == BipartiteSide::B
                    },
                )
            }
        }
    }

    #[cfg(not(feature = "twopath-cache"))]
    fn check_two_paths(&self) -> Result<(), ConsistencyError> {
        Ok(())
    }

    fn check_bipartite(&self) -> Result<(), ConsistencyError> {
        let graph = self.graph;
        if !matches!(graph.mode(), GraphMode::Bipartite { .. }) {
            return Ok(());
        }
        for (from, to) in graph.iter_ties() {
            if graph.side_of(from) == graph.side_of(to) {
                return Err(ConsistencyError::SameModeEdge { from, to });
            }
        }
        Ok(())
    }

    fn check_zones(&self) -> Result<(), ConsistencyError> {
        let graph = self.graph;
        let Some(zones) = graph.zones() else {
            return Ok(());
        };
        let mut recounted = vec![0u32; graph.node_count() as usize];
        for (from, to) in graph.iter_ties() {
            if !zones.zones_adjacent(from, to) {
                return Err(ConsistencyError::ZoneConstraint {
                    from,
                    to,
                    from_zone: zones.zone(from),
                    to_zone: zones.zone(to),
                });
            }
            let (zf, zt) = (zones.zone(from), zones.zone(to));
            if zf == zt + 1 {
                recounted[from as usize] += 1;
            } else if zt == zf + 1 {
                recounted[to as usize] += 1;
            }
        }
        for node in 0..graph.node_count() {
            let counted = recounted[node as usize];
            let cached = zones.prev_wave_degree(node);
            if cached != counted {
                return Err(ConsistencyError::CacheMismatch {
                    from: node,
                    to: node,
                    cached,
                    counted,
                });
            }
        }
        Ok(())
    }
}
