//! In-memory graph store with incremental two-path bookkeeping.
//!
//! The store keeps forward (and, for directed graphs, reversed) adjacency
//! lists, flat tie lists for uniform random selection, nodal attributes and
//! the conditioning overlays. Every mutation updates the two-path counts
//! before returning, so change statistics always observe a consistent view.
//!
//! Adjacency lists are unordered; removal swaps the last entry into the
//! hole. Degrees are the adjacency list lengths, which keeps the degree
//! counters structurally unable to drift from the lists they describe.

use super::{
    NodeId,
    attributes::AttributeStore,
    error::ConsistencyError,
    overlay::{CitationTerms, SnowballZones},
    ties::{TieList, TrackedList},
};

#[cfg(feature = "twopath-cache")]
use super::twopath::TwoPathCache;

/// Whether the graph is directed, one-mode undirected, or bipartite.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum GraphMode {
    /// Ordered dyads; arcs have a sender and a receiver.
    Directed,
    /// Unordered dyads over a single node set.
    Undirected,
    /// Unordered dyads between two disjoint node modes.
    Bipartite {
        /// Number of mode-A nodes (ids `0..mode_a`).
        mode_a: u32,
        /// Number of mode-B nodes (ids `mode_a..mode_a + mode_b`).
        mode_b: u32,
    },
}

impl GraphMode {
    /// Human-readable mode name for diagnostics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Directed => "directed",
            Self::Undirected => "undirected",
            Self::Bipartite { .. } => "bipartite",
        }
    }
}

/// The two node modes of a bipartite graph.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BipartiteSide {
    /// The first mode, ids `0..mode_a`.
    A,
    /// The second mode, ids `mode_a..`.
    B,
}

/// A directed, undirected or bipartite graph with incremental caches.
///
/// Node ids are dense `u32` values in `0..node_count`. Self-loops are
/// rejected throughout. All mutators run in time proportional to the
/// degrees of the two endpoints, independent of the global graph size.
#[derive(Clone, Debug)]
pub struct Graph {
    mode: GraphMode,
    /// Out-neighbours for directed graphs; neighbours otherwise.
    fwd: Vec<Vec<NodeId>>,
    /// In-neighbours; unused (empty) for undirected and bipartite graphs.
    rev: Vec<Vec<NodeId>>,
    tie_count: u64,
    all_ties: TieList,
    inner_ties: TieList,
    max_term_ties: TieList,
    attributes: AttributeStore,
    zones: Option<SnowballZones>,
    terms: Option<CitationTerms>,
    #[cfg(feature = "twopath-cache")]
    two_paths: TwoPathCache,
}

impl Graph {
    /// Creates an empty directed graph with `node_count` nodes.
    #[must_use]
    pub fn directed(node_count: u32) -> Self {
        Self::empty(GraphMode::Directed, node_count, true)
    }

    /// Creates an empty one-mode undirected graph with `node_count` nodes.
    #[must_use]
    pub fn undirected(node_count: u32) -> Self {
        Self::empty(GraphMode::Undirected, node_count, false)
    }

    /// Creates an empty bipartite graph with `mode_a + mode_b` nodes.
    #[must_use]
    pub fn bipartite(mode_a: u32, mode_b: u32) -> Self {
        Self::empty(GraphMode::Bipartite { mode_a, mode_b }, mode_a + mode_b, false)
    }

    fn empty(mode: GraphMode, node_count: u32, directed: bool) -> Self {
        Self {
            mode,
            fwd: vec![Vec::new(); node_count as usize],
            rev: if directed {
                vec![Vec::new(); node_count as usize]
            } else {
                Vec::new()
            },
            tie_count: 0,
            all_ties: TieList::new(),
            inner_ties: TieList::new(),
            max_term_ties: TieList::new(),
            attributes: AttributeStore::default(),
            zones: None,
            terms: None,
            #[cfg(feature = "twopath-cache")]
            two_paths: match mode {
                GraphMode::Directed => TwoPathCache::directed(),
                GraphMode::Undirected => TwoPathCache::one_mode(),
                GraphMode::Bipartite { .. } => TwoPathCache::two_mode(),
            },
        }
    }

    /// The graph mode.
    #[must_use]
    pub fn mode(&self) -> GraphMode {
        self.mode
    }

    /// Whether dyads are ordered.
    #[must_use]
    pub fn is_directed(&self) -> bool {
        matches!(self.mode, GraphMode::Directed)
    }

    /// Whether the node set is split into two modes.
    #[must_use]
    pub fn is_bipartite(&self) -> bool {
        matches!(self.mode, GraphMode::Bipartite { .. })
    }

    /// Total number of nodes.
    #[must_use]
    pub fn node_count(&self) -> u32 {
        self.fwd.len() as u32
    }

    /// Number of mode-A nodes, or the full node count for one-mode graphs.
    #[must_use]
    pub fn mode_a_count(&self) -> u32 {
        match self.mode {
            GraphMode::Bipartite { mode_a, .. } => mode_a,
            _ => self.node_count(),
        }
    }

    /// Number of mode-B nodes; zero for one-mode graphs.
    #[must_use]
    pub fn mode_b_count(&self) -> u32 {
        match self.mode {
            GraphMode::Bipartite { mode_b, .. } => mode_b,
            _ => 0,
        }
    }

    /// Which bipartite mode `node` belongs to.
    #[must_use]
    pub fn side_of(&self, node: NodeId) -> BipartiteSide {
        match self.mode {
            GraphMode::Bipartite { mode_a, .. } if node >= mode_a => BipartiteSide::B,
            _ => BipartiteSide::A,
        }
    }

    /// Current number of arcs or edges.
    #[must_use]
    pub fn tie_count(&self) -> u64 {
        self.tie_count
    }

    /// Size of the dyad space: ordered pairs for directed graphs, unordered
    /// pairs for one-mode undirected, cross-mode pairs for bipartite.
    #[must_use]
    pub fn dyad_count(&self) -> u64 {
        let n = u64::from(self.node_count());
        match self.mode {
            GraphMode::Directed => n * n.saturating_sub(1),
            GraphMode::Undirected => n * n.saturating_sub(1) / 2,
            GraphMode::Bipartite { mode_a, mode_b } => u64::from(mode_a) * u64::from(mode_b),
        }
    }

    /// Out-neighbours of `node` (neighbours for undirected graphs).
    #[must_use]
    pub fn out_neighbours(&self, node: NodeId) -> &[NodeId] {
        self.fwd.get(node as usize).map_or(&[], Vec::as_slice)
    }

    /// In-neighbours of `node`; empty for undirected graphs.
    #[must_use]
    pub fn in_neighbours(&self, node: NodeId) -> &[NodeId] {
        self.rev.get(node as usize).map_or(&[], Vec::as_slice)
    }

    /// Neighbours of `node` in an undirected or bipartite graph.
    #[must_use]
    pub fn neighbours(&self, node: NodeId) -> &[NodeId] {
        self.out_neighbours(node)
    }

    /// Out-degree of `node` (degree for undirected graphs).
    #[must_use]
    pub fn out_degree(&self, node: NodeId) -> u32 {
        self.out_neighbours(node).len() as u32
    }

    /// In-degree of `node`.
    #[must_use]
    pub fn in_degree(&self, node: NodeId) -> u32 {
        self.in_neighbours(node).len() as u32
    }

    /// Degree of `node` in an undirected or bipartite graph.
    #[must_use]
    pub fn degree(&self, node: NodeId) -> u32 {
        self.out_degree(node)
    }

    /// Whether the arc `i -> j` is present. Scans the shorter of the two
    /// incident lists, so the cost is bounded by the smaller degree.
    #[must_use]
    pub fn is_arc(&self, i: NodeId, j: NodeId) -> bool {
        debug_assert!(self.is_directed(), "is_arc on a non-directed graph");
        let out = self.out_neighbours(i);
        let rin = self.in_neighbours(j);
        if out.len() <= rin.len() {
            out.contains(&j)
        } else {
            rin.contains(&i)
        }
    }

    /// Whether the edge `i -- j` is present.
    #[must_use]
    pub fn is_edge(&self, i: NodeId, j: NodeId) -> bool {
        debug_assert!(!self.is_directed(), "is_edge on a directed graph");
        let a = self.out_neighbours(i);
        let b = self.out_neighbours(j);
        if a.len() <= b.len() {
            a.contains(&j)
        } else {
            b.contains(&i)
        }
    }

    /// Whether the dyad `(i, j)` carries a tie, in whichever mode.
    #[must_use]
    pub fn has_tie(&self, i: NodeId, j: NodeId) -> bool {
        if self.is_directed() {
            self.is_arc(i, j)
        } else {
            self.is_edge(i, j)
        }
    }

    /// Read-only attribute tables.
    #[must_use]
    pub fn attributes(&self) -> &AttributeStore {
        &self.attributes
    }

    /// Attaches the attribute tables; read-only from then on.
    pub fn set_attributes(&mut self, attributes: AttributeStore) {
        self.attributes = attributes;
    }

    /// The snowball overlay, when a zone file has been loaded.
    #[must_use]
    pub fn zones(&self) -> Option<&SnowballZones> {
        self.zones.as_ref()
    }

    /// The citation overlay, when a term file has been loaded.
    #[must_use]
    pub fn terms(&self) -> Option<&CitationTerms> {
        self.terms.as_ref()
    }

    /// Attaches the snowball overlay.
    ///
    /// Validates that every existing tie joins the same or adjacent zones,
    /// seeds the previous-wave degree counters from the current ties, and
    /// rebuilds the inner-zone tie list.
    ///
    /// # Errors
    /// Returns [`ConsistencyError::ZoneConstraint`] when an existing tie
    /// spans more than one wave.
    pub fn set_zones(&mut self, mut zones: SnowballZones) -> Result<(), ConsistencyError> {
        for (from, to) in self.iter_ties() {
            if !zones.zones_adjacent(from, to) {
                return Err(ConsistencyError::ZoneConstraint {
                    from,
                    to,
                    from_zone: zones.zone(from),
                    to_zone: zones.zone(to),
                });
            }
            zones.apply_toggle(from, to, true);
        }
        self.zones = Some(zones);
        self.rebuild_tie_lists();
        Ok(())
    }

    /// Attaches the citation overlay and rebuilds the max-term tie list.
    pub fn set_terms(&mut self, terms: CitationTerms) {
        self.terms = Some(terms);
        self.rebuild_tie_lists();
    }

    /// Inserts the arc `i -> j`, maintaining the selected flat list.
    ///
    /// # Errors
    /// Rejects out-of-range ids, self-loops, duplicate arcs, arc operations
    /// on undirected graphs, and inner-zone insertions that break the zone
    /// preconditions.
    pub fn insert_arc(
        &mut self,
        i: NodeId,
        j: NodeId,
        list: TrackedList,
    ) -> Result<(), ConsistencyError> {
        if !self.is_directed() {
            return Err(ConsistencyError::ModeMismatch {
                operation: "insert_arc",
                mode: self.mode.as_str(),
            });
        }
        self.insert_tie(i, j, list)
    }

    /// Removes the arc `i -> j`, maintaining the selected flat list.
    ///
    /// When a list is selected the arc's index is found by linear scan; use
    /// [`Graph::remove_tie_at`] when the index is already known.
    ///
    /// # Errors
    /// Rejects missing arcs, out-of-range ids and mode mismatches.
    pub fn remove_arc(
        &mut self,
        i: NodeId,
        j: NodeId,
        list: TrackedList,
    ) -> Result<(), ConsistencyError> {
        if !self.is_directed() {
            return Err(ConsistencyError::ModeMismatch {
                operation: "remove_arc",
                mode: self.mode.as_str(),
            });
        }
        self.remove_tie(i, j, list)
    }

    /// Inserts the edge `i -- j`, maintaining the selected flat list.
    ///
    /// # Errors
    /// Rejects out-of-range ids, self-loops, duplicate edges, same-mode
    /// bipartite edges, edge operations on directed graphs, and inner-zone
    /// insertions that break the zone preconditions.
    pub fn insert_edge(
        &mut self,
        i: NodeId,
        j: NodeId,
        list: TrackedList,
    ) -> Result<(), ConsistencyError> {
        if self.is_directed() {
            return Err(ConsistencyError::ModeMismatch {
                operation: "insert_edge",
                mode: self.mode.as_str(),
            });
        }
        let (i, j) = self.canonical_edge(i, j)?;
        self.insert_tie(i, j, list)
    }

    /// Removes the edge `i -- j`, maintaining the selected flat list.
    ///
    /// # Errors
    /// Rejects missing edges, out-of-range ids and mode mismatches.
    pub fn remove_edge(
        &mut self,
        i: NodeId,
        j: NodeId,
        list: TrackedList,
    ) -> Result<(), ConsistencyError> {
        if self.is_directed() {
            return Err(ConsistencyError::ModeMismatch {
                operation: "remove_edge",
                mode: self.mode.as_str(),
            });
        }
        let (i, j) = self.canonical_edge(i, j)?;
        self.remove_tie(i, j, list)
    }

    /// Inserts a tie in whichever mode the graph uses.
    ///
    /// # Errors
    /// As [`Graph::insert_arc`] / [`Graph::insert_edge`].
    pub fn insert_dyad(
        &mut self,
        i: NodeId,
        j: NodeId,
        list: TrackedList,
    ) -> Result<(), ConsistencyError> {
        if self.is_directed() {
            self.insert_arc(i, j, list)
        } else {
            self.insert_edge(i, j, list)
        }
    }

    /// Removes a tie in whichever mode the graph uses.
    ///
    /// # Errors
    /// As [`Graph::remove_arc`] / [`Graph::remove_edge`].
    pub fn remove_dyad(
        &mut self,
        i: NodeId,
        j: NodeId,
        list: TrackedList,
    ) -> Result<(), ConsistencyError> {
        if self.is_directed() {
            self.remove_arc(i, j, list)
        } else {
            self.remove_edge(i, j, list)
        }
    }

    /// Removes the tie stored at `index` of the given flat list in O(1).
    ///
    /// This is the deletion primitive behind the fixed-density and
    /// tie/no-tie proposal distributions, which sample the index first.
    ///
    /// # Errors
    /// Rejects stale lists, out-of-bounds indices and `TrackedList::None`.
    pub fn remove_tie_at(
        &mut self,
        list: TrackedList,
        index: usize,
    ) -> Result<(NodeId, NodeId), ConsistencyError> {
        let Some((from, to)) = self.list(list).and_then(|ties| ties.get(index)) else {
            return Err(ConsistencyError::TieListIndex {
                index,
                list,
                len: self.list(list).map_or(0, TieList::len),
            });
        };
        self.remove_tie_known_index(from, to, list, index)?;
        Ok((from, to))
    }

    /// Number of ties in a flat list.
    #[must_use]
    pub fn list_len(&self, list: TrackedList) -> usize {
        self.list(list).map_or(0, TieList::len)
    }

    /// Whether a flat list still mirrors the graph.
    #[must_use]
    pub fn list_is_synced(&self, list: TrackedList) -> bool {
        self.list(list).is_none_or(TieList::is_synced)
    }

    /// The tie stored at `index` of a flat list.
    #[must_use]
    pub fn tie_at(&self, list: TrackedList, index: usize) -> Option<(NodeId, NodeId)> {
        self.list(list).and_then(|ties| ties.get(index))
    }

    /// Repopulates every flat list from the adjacency structure.
    pub fn rebuild_tie_lists(&mut self) {
        self.all_ties.reset();
        self.inner_ties.reset();
        self.max_term_ties.reset();
        let ties: Vec<(NodeId, NodeId)> = self.iter_ties().collect();
        for (from, to) in ties {
            self.all_ties.push(from, to);
            if self.qualifies_inner(from, to) {
                self.inner_ties.push(from, to);
            }
            if self.qualifies_max_term(from) {
                self.max_term_ties.push(from, to);
            }
        }
    }

    /// Iterates every tie once, in canonical orientation.
    pub fn iter_ties(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        let directed = self.is_directed();
        self.fwd.iter().enumerate().flat_map(move |(from, nbrs)| {
            let from = from as NodeId;
            nbrs.iter()
                .copied()
                .filter(move |&to| directed || from < to)
                .map(move |to| (from, to))
        })
    }

    /// Number of length-two directed paths `u -> w -> v` between distinct
    /// nodes.
    #[must_use]
    pub fn mixed_two_paths(&self, u: NodeId, v: NodeId) -> u32 {
        debug_assert!(u != v, "two-path queries are defined for distinct nodes");
        #[cfg(feature = "twopath-cache")]
        {
            match &self.two_paths {
                TwoPathCache::Directed { mixed, .. } => mixed.get(u, v),
                _ => 0,
            }
        }
        #[cfg(not(feature = "twopath-cache"))]
        {
            self.count_mixed_two_paths(u, v)
        }
    }

    /// Number of nodes `w` with `u -> w` and `v -> w`.
    #[must_use]
    pub fn shared_targets(&self, u: NodeId, v: NodeId) -> u32 {
        debug_assert!(u != v, "two-path queries are defined for distinct nodes");
        #[cfg(feature = "twopath-cache")]
        {
            match &self.two_paths {
                TwoPathCache::Directed { shared_targets, .. } => shared_targets.get(u, v),
                _ => 0,
            }
        }
        #[cfg(not(feature = "twopath-cache"))]
        {
            self.count_shared_targets(u, v)
        }
    }

    /// Number of nodes `w` with `w -> u` and `w -> v`.
    #[must_use]
    pub fn shared_sources(&self, u: NodeId, v: NodeId) -> u32 {
        debug_assert!(u != v, "two-path queries are defined for distinct nodes");
        #[cfg(feature = "twopath-cache")]
        {
            match &self.two_paths {
                TwoPathCache::Directed { shared_sources, .. } => shared_sources.get(u, v),
                _ => 0,
            }
        }
        #[cfg(not(feature = "twopath-cache"))]
        {
            self.count_shared_sources(u, v)
        }
    }

    /// Number of common neighbours of two distinct nodes in a one-mode
    /// undirected graph.
    #[must_use]
    pub fn common_neighbours(&self, u: NodeId, v: NodeId) -> u32 {
        debug_assert!(u != v, "two-path queries are defined for distinct nodes");
        #[cfg(feature = "twopath-cache")]
        {
            match &self.two_paths {
                TwoPathCache::OneMode { common } => common.get(u, v),
                _ => 0,
            }
        }
        #[cfg(not(feature = "twopath-cache"))]
        {
            self.count_common_neighbours(u, v)
        }
    }

    /// Number of two-paths between two distinct nodes of the same bipartite
    /// mode.
    #[must_use]
    pub fn same_mode_two_paths(&self, u: NodeId, v: NodeId) -> u32 {
        debug_assert!(u != v, "two-path queries are defined for distinct nodes");
        #[cfg(feature = "twopath-cache")]
        {
            match &self.two_paths {
                TwoPathCache::TwoMode { mode_a, mode_b } => match self.side_of(u) {
                    BipartiteSide::A => mode_a.get(u, v),
                    BipartiteSide::B => mode_b.get(u, v),
                },
                _ => 0,
            }
        }
        #[cfg(not(feature = "twopath-cache"))]
        {
            self.count_common_neighbours(u, v)
        }
    }

    pub(crate) fn count_mixed_two_paths(&self, u: NodeId, v: NodeId) -> u32 {
        let out = self.out_neighbours(u);
        let rin = self.in_neighbours(v);
        if out.len() <= rin.len() {
            out.iter().filter(|&&w| rin.contains(&w)).count() as u32
        } else {
            rin.iter().filter(|&&w| out.contains(&w)).count() as u32
        }
    }

    pub(crate) fn count_shared_targets(&self, u: NodeId, v: NodeId) -> u32 {
        intersection_size(self.out_neighbours(u), self.out_neighbours(v))
    }

    pub(crate) fn count_shared_sources(&self, u: NodeId, v: NodeId) -> u32 {
        intersection_size(self.in_neighbours(u), self.in_neighbours(v))
    }

    pub(crate) fn count_common_neighbours(&self, u: NodeId, v: NodeId) -> u32 {
        intersection_size(self.out_neighbours(u), self.out_neighbours(v))
    }

    #[cfg(feature = "twopath-cache")]
    pub(crate) fn two_path_cache(&self) -> &TwoPathCache {
        &self.two_paths
    }

    fn canonical_edge(&self, i: NodeId, j: NodeId) -> Result<(NodeId, NodeId), ConsistencyError> {
        match self.mode {
            GraphMode::Bipartite { .. } => match (self.side_of(i), self.side_of(j)) {
                (BipartiteSide::A, BipartiteSide::B) => Ok((i, j)),
                (BipartiteSide::B, BipartiteSide::A) => Ok((j, i)),
                _ => Err(ConsistencyError::SameModeEdge { from: i, to: j }),
            },
            _ => Ok((i.min(j), i.max(j))),
        }
    }

    fn check_endpoints(&self, i: NodeId, j: NodeId) -> Result<(), ConsistencyError> {
        let node_count = self.node_count();
        for node in [i, j] {
            if node >= node_count {
                return Err(ConsistencyError::NodeOutOfRange { node, node_count });
            }
        }
        if i == j {
            return Err(ConsistencyError::SelfLoop { node: i });
        }
        Ok(())
    }

    fn check_list_preconditions(
        &self,
        i: NodeId,
        j: NodeId,
        list: TrackedList,
    ) -> Result<(), ConsistencyError> {
        match list {
            TrackedList::None | TrackedList::All => Ok(()),
            TrackedList::InnerZone => {
                let Some(zones) = self.zones.as_ref() else {
                    return Err(ConsistencyError::MissingOverlay { overlay: "zone" });
                };
                if !zones.is_inner_dyad(i, j) || !zones.zones_adjacent(i, j) {
                    return Err(ConsistencyError::ZoneConstraint {
                        from: i,
                        to: j,
                        from_zone: zones.zone(i),
                        to_zone: zones.zone(j),
                    });
                }
                Ok(())
            }
            TrackedList::MaxTermSender => {
                let Some(terms) = self.terms.as_ref() else {
                    return Err(ConsistencyError::MissingOverlay { overlay: "term" });
                };
                if !terms.is_max_term(i) {
                    return Err(ConsistencyError::TermConstraint {
                        from: i,
                        to: j,
                        term: terms.term(i),
                        max_term: terms.max_term(),
                    });
                }
                Ok(())
            }
        }
    }

    fn insert_tie(
        &mut self,
        i: NodeId,
        j: NodeId,
        list: TrackedList,
    ) -> Result<(), ConsistencyError> {
        self.check_endpoints(i, j)?;
        self.check_list_preconditions(i, j, list)?;
        if self.has_tie(i, j) {
            return Err(ConsistencyError::DuplicateTie { from: i, to: j });
        }
        let directed = self.is_directed();
        self.fwd[i as usize].push(j);
        if directed {
            self.rev[j as usize].push(i);
        } else {
            self.fwd[j as usize].push(i);
        }
        self.tie_count += 1;
        self.update_two_paths(i, j, true);
        if let Some(zones) = self.zones.as_mut() {
            zones.apply_toggle(i, j, true);
        }
        self.track_insert(i, j, list);
        Ok(())
    }

    fn remove_tie(
        &mut self,
        i: NodeId,
        j: NodeId,
        list: TrackedList,
    ) -> Result<(), ConsistencyError> {
        let index = match self.list(list) {
            Some(ties) => ties.position(i, j),
            None => None,
        };
        if self.list(list).is_some() && index.is_none() {
            return Err(ConsistencyError::MissingTie { from: i, to: j });
        }
        self.remove_tie_known_index(i, j, list, index.unwrap_or(0))
    }

    fn remove_tie_known_index(
        &mut self,
        i: NodeId,
        j: NodeId,
        list: TrackedList,
        index: usize,
    ) -> Result<(), ConsistencyError> {
        self.check_endpoints(i, j)?;
        if !self.has_tie(i, j) {
            return Err(ConsistencyError::MissingTie { from: i, to: j });
        }
        let directed = self.is_directed();
        detach(&mut self.fwd, i, j);
        if directed {
            detach(&mut self.rev, j, i);
        } else {
            detach(&mut self.fwd, j, i);
        }
        self.tie_count -= 1;
        self.update_two_paths(i, j, false);
        if let Some(zones) = self.zones.as_mut() {
            zones.apply_toggle(i, j, false);
        }
        self.track_remove(list, index);
        Ok(())
    }

    fn update_two_paths(&mut self, i: NodeId, j: NodeId, added: bool) {
        #[cfg(feature = "twopath-cache")]
        {
            let (iu, ju) = (i as usize, j as usize);
            match self.mode {
                GraphMode::Directed => self.two_paths.toggle_arc(
                    i,
                    j,
                    &self.fwd[iu],
                    &self.rev[iu],
                    &self.fwd[ju],
                    &self.rev[ju],
                    added,
                ),
                GraphMode::Undirected => {
                    self.two_paths
                        .toggle_edge(i, j, &self.fwd[iu], &self.fwd[ju], added);
                }
                GraphMode::Bipartite { .. } => {
                    // `insert_tie` receives edges in canonical (A, B) order.
                    self.two_paths
                        .toggle_bipartite_edge(i, j, &self.fwd[iu], &self.fwd[ju], added);
                }
            }
        }
        #[cfg(not(feature = "twopath-cache"))]
        {
            let _ = (i, j, added);
        }
    }

    fn track_insert(&mut self, i: NodeId, j: NodeId, list: TrackedList) {
        self.mark_others_stale(list);
        match list {
            TrackedList::None => {}
            TrackedList::All => self.all_ties.push(i, j),
            TrackedList::InnerZone => self.inner_ties.push(i, j),
            TrackedList::MaxTermSender => self.max_term_ties.push(i, j),
        }
    }

    fn track_remove(&mut self, list: TrackedList, index: usize) {
        self.mark_others_stale(list);
        match list {
            TrackedList::None => {}
            TrackedList::All => {
                self.all_ties.swap_remove(index);
            }
            TrackedList::InnerZone => {
                self.inner_ties.swap_remove(index);
            }
            TrackedList::MaxTermSender => {
                self.max_term_ties.swap_remove(index);
            }
        }
    }

    fn mark_others_stale(&mut self, kept: TrackedList) {
        if kept != TrackedList::All {
            self.all_ties.mark_stale();
        }
        if kept != TrackedList::InnerZone {
            self.inner_ties.mark_stale();
        }
        if kept != TrackedList::MaxTermSender {
            self.max_term_ties.mark_stale();
        }
    }

    fn list(&self, list: TrackedList) -> Option<&TieList> {
        match list {
            TrackedList::None => None,
            TrackedList::All => Some(&self.all_ties),
            TrackedList::InnerZone => Some(&self.inner_ties),
            TrackedList::MaxTermSender => Some(&self.max_term_ties),
        }
    }

    fn qualifies_inner(&self, from: NodeId, to: NodeId) -> bool {
        self.zones
            .as_ref()
            .is_some_and(|zones| zones.is_inner_dyad(from, to))
    }

    fn qualifies_max_term(&self, from: NodeId) -> bool {
        self.terms.as_ref().is_some_and(|terms| terms.is_max_term(from))
    }
}

fn detach(adj: &mut [Vec<NodeId>], from: NodeId, to: NodeId) {
    let list = &mut adj[from as usize];
    if let Some(pos) = list.iter().position(|&n| n == to) {
        list.swap_remove(pos);
    } else {
        debug_assert!(false, "adjacency entry ({from}, {to}) missing during detach");
    }
}

fn intersection_size(a: &[NodeId], b: &[NodeId]) -> u32 {
    let (short, long) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    short.iter().filter(|&&w| long.contains(&w)).count() as u32
}
