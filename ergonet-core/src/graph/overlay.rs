//! Snowball-zone and citation-term overlays.
//!
//! Conditional estimation restricts which dyads a sampler may toggle. The
//! snowball overlay records the wave at which each node was reached and the
//! number of ties every node has into the previous wave; the citation
//! overlay records the discrete time period of each node. Both are loaded
//! once from single-column attribute files and never change during a run,
//! apart from the previous-wave degree counters which track tie toggles.

use super::NodeId;

/// Snowball sampling zones.
#[derive(Clone, Debug)]
pub struct SnowballZones {
    zone: Vec<u32>,
    max_zone: u32,
    inner_nodes: Vec<NodeId>,
    prev_wave_degree: Vec<u32>,
}

impl SnowballZones {
    /// Builds the overlay from one zone number per node.
    ///
    /// The caller (the zone-file reader) has already validated contiguity
    /// from zero; this derives the inner-node set and zeroed wave-degree
    /// counters.
    #[must_use]
    pub fn new(zone: Vec<u32>) -> Self {
        let max_zone = zone.iter().copied().max().unwrap_or(0);
        let inner_nodes = zone
            .iter()
            .enumerate()
            .filter(|&(_, &z)| z < max_zone)
            .map(|(node, _)| node as NodeId)
            .collect();
        let prev_wave_degree = vec![0; zone.len()];
        Self {
            zone,
            max_zone,
            inner_nodes,
            prev_wave_degree,
        }
    }

    /// Zone of `node`.
    #[must_use]
    pub fn zone(&self, node: NodeId) -> u32 {
        self.zone.get(node as usize).copied().unwrap_or(0)
    }

    /// The maximum observed zone number.
    #[must_use]
    pub fn max_zone(&self) -> u32 {
        self.max_zone
    }

    /// Nodes whose zone is strictly below the maximum; only dyads among
    /// these may be toggled under snowball conditioning.
    #[must_use]
    pub fn inner_nodes(&self) -> &[NodeId] {
        &self.inner_nodes
    }

    /// Number of ties `node` has to the zone numbered one less than its own.
    #[must_use]
    pub fn prev_wave_degree(&self, node: NodeId) -> u32 {
        self.prev_wave_degree
            .get(node as usize)
            .copied()
            .unwrap_or(0)
    }

    /// Whether both endpoints sit strictly inside the snowball.
    #[must_use]
    pub fn is_inner_dyad(&self, i: NodeId, j: NodeId) -> bool {
        self.zone(i) < self.max_zone && self.zone(j) < self.max_zone
    }

    /// Whether a tie between the endpoints satisfies the zone-adjacency
    /// requirement.
    #[must_use]
    pub fn zones_adjacent(&self, i: NodeId, j: NodeId) -> bool {
        self.zone(i).abs_diff(self.zone(j)) <= 1
    }

    /// Adjusts the previous-wave counters for a toggled tie.
    ///
    /// Only ties spanning exactly one wave move the counter, and only for
    /// the endpoint in the later wave.
    pub(crate) fn apply_toggle(&mut self, i: NodeId, j: NodeId, added: bool) {
        let (zi, zj) = (self.zone(i), self.zone(j));
        let later = if zi == zj + 1 {
            Some(i)
        } else if zj == zi + 1 {
            Some(j)
        } else {
            None
        };
        let Some(node) = later else { return };
        let Some(counter) = self.prev_wave_degree.get_mut(node as usize) else {
            return;
        };
        if added {
            *counter += 1;
        } else {
            debug_assert!(*counter > 0, "previous-wave degree underflow at {node}");
            *counter = counter.saturating_sub(1);
        }
    }
}

/// Citation-network time periods.
#[derive(Clone, Debug)]
pub struct CitationTerms {
    term: Vec<u32>,
    max_term: u32,
    max_term_nodes: Vec<NodeId>,
}

impl CitationTerms {
    /// Builds the overlay from one term number per node.
    #[must_use]
    pub fn new(term: Vec<u32>) -> Self {
        let max_term = term.iter().copied().max().unwrap_or(0);
        let max_term_nodes = term
            .iter()
            .enumerate()
            .filter(|&(_, &t)| t == max_term)
            .map(|(node, _)| node as NodeId)
            .collect();
        Self {
            term,
            max_term,
            max_term_nodes,
        }
    }

    /// Term of `node`.
    #[must_use]
    pub fn term(&self, node: NodeId) -> u32 {
        self.term.get(node as usize).copied().unwrap_or(0)
    }

    /// The last period number.
    #[must_use]
    pub fn max_term(&self) -> u32 {
        self.max_term
    }

    /// Nodes in the last period; only arcs sent from these may be toggled
    /// under citation conditioning.
    #[must_use]
    pub fn max_term_nodes(&self) -> &[NodeId] {
        &self.max_term_nodes
    }

    /// Whether `node` sits in the last period.
    #[must_use]
    pub fn is_max_term(&self, node: NodeId) -> bool {
        self.term(node) == self.max_term
    }
}
