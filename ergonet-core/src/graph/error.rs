//! Error types for the graph store and its incremental caches.
//!
//! Every variant signals a broken precondition or invariant rather than a
//! recoverable condition: samplers treat these as fatal and abort the run.

use thiserror::Error;

use super::ties::TrackedList;

/// An internal-consistency failure in the graph store.
///
/// These errors indicate a programming error in the caller (for example
/// removing an arc that is not present) or a corrupted structure, never a
/// problem with user input.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ConsistencyError {
    /// A node id was outside `0..node_count`.
    #[error("node {node} is out of range for a graph of {node_count} nodes")]
    NodeOutOfRange {
        /// The offending node id.
        node: u32,
        /// The number of nodes in the graph.
        node_count: u32,
    },
    /// A tie with identical endpoints was supplied.
    #[error("self-loop ({node}, {node}) is not permitted")]
    SelfLoop {
        /// The repeated endpoint.
        node: u32,
    },
    /// An insert found the tie already present.
    #[error("tie ({from}, {to}) is already present")]
    DuplicateTie {
        /// Tail (or first endpoint) of the tie.
        from: u32,
        /// Head (or second endpoint) of the tie.
        to: u32,
    },
    /// A removal referenced a tie that does not exist.
    #[error("tie ({from}, {to}) is not present")]
    MissingTie {
        /// Tail (or first endpoint) of the tie.
        from: u32,
        /// Head (or second endpoint) of the tie.
        to: u32,
    },
    /// An arc operation was applied to an undirected graph or vice versa.
    #[error("{operation} is not applicable to a {mode} graph")]
    ModeMismatch {
        /// Name of the rejected operation.
        operation: &'static str,
        /// Human-readable description of the graph mode.
        mode: &'static str,
    },
    /// A bipartite edge joined two nodes of the same mode.
    #[error("bipartite edge ({from}, {to}) joins two nodes of the same mode")]
    SameModeEdge {
        /// First endpoint.
        from: u32,
        /// Second endpoint.
        to: u32,
    },
    /// A tie violated the snowball zone constraints.
    #[error("tie ({from}, {to}) spans zones {from_zone} and {to_zone}, which are not adjacent")]
    ZoneConstraint {
        /// Tail endpoint.
        from: u32,
        /// Head endpoint.
        to: u32,
        /// Zone of the tail endpoint.
        from_zone: u32,
        /// Zone of the head endpoint.
        to_zone: u32,
    },
    /// A max-term tie was supplied whose sender is not in the last period.
    #[error("arc ({from}, {to}) has sender in term {term}, but only term {max_term} may send")]
    TermConstraint {
        /// Tail endpoint.
        from: u32,
        /// Head endpoint.
        to: u32,
        /// Term of the tail endpoint.
        term: u32,
        /// The last period number.
        max_term: u32,
    },
    /// A tracked-list operation was requested on a list that is out of sync
    /// with the graph.
    #[error("tie list {list:?} is stale; rebuild it before sampling from it")]
    StaleTieList {
        /// The list that was mutated without maintenance.
        list: TrackedList,
    },
    /// The global tie counter disagreed with an adjacency recount.
    #[error("tie counter holds {counter} but the adjacency lists describe {counted} ties")]
    TieCount {
        /// Value of the maintained counter.
        counter: u64,
        /// Ties found by walking the adjacency lists.
        counted: u64,
    },
    /// A tie-list index was outside the list bounds.
    #[error("tie-list index {index} is out of bounds for {list:?} of length {len}")]
    TieListIndex {
        /// The rejected index.
        index: usize,
        /// The list that was indexed.
        list: TrackedList,
        /// Current list length.
        len: usize,
    },
    /// An overlay (zone or term file) was required but has not been loaded.
    #[error("the {overlay} overlay has not been loaded")]
    MissingOverlay {
        /// Name of the missing overlay.
        overlay: &'static str,
    },
    /// A cached two-path count disagreed with a reference recount.
    #[error(
        "two-path cache disagrees with recount for ({from}, {to}): cached {cached}, counted {counted}"
    )]
    CacheMismatch {
        /// First endpoint of the pair.
        from: u32,
        /// Second endpoint of the pair.
        to: u32,
        /// Value held by the incremental cache.
        cached: u32,
        /// Value obtained by walking the adjacency lists.
        counted: u32,
    },
}

impl ConsistencyError {
    /// Returns the stable machine-readable code for this error.
    #[must_use]
    pub const fn code(&self) -> ConsistencyErrorCode {
        match self {
            Self::NodeOutOfRange { .. } => ConsistencyErrorCode::NodeOutOfRange,
            Self::SelfLoop { .. } => ConsistencyErrorCode::SelfLoop,
            Self::DuplicateTie { .. } => ConsistencyErrorCode::DuplicateTie,
            Self::MissingTie { .. } => ConsistencyErrorCode::MissingTie,
            Self::ModeMismatch { .. } => ConsistencyErrorCode::ModeMismatch,
            Self::SameModeEdge { .. } => ConsistencyErrorCode::SameModeEdge,
            Self::ZoneConstraint { .. } => ConsistencyErrorCode::ZoneConstraint,
            Self::TermConstraint { .. } => ConsistencyErrorCode::TermConstraint,
            Self::StaleTieList { .. } => ConsistencyErrorCode::StaleTieList,
            Self::TieCount { .. } => ConsistencyErrorCode::TieCount,
            Self::TieListIndex { .. } => ConsistencyErrorCode::TieListIndex,
            Self::MissingOverlay { .. } => ConsistencyErrorCode::MissingOverlay,
            Self::CacheMismatch { .. } => ConsistencyErrorCode::CacheMismatch,
        }
    }
}

/// Machine-readable codes for [`ConsistencyError`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum ConsistencyErrorCode {
    /// A node id was outside the graph bounds.
    NodeOutOfRange,
    /// A tie with identical endpoints was supplied.
    SelfLoop,
    /// An insert found the tie already present.
    DuplicateTie,
    /// A removal referenced a tie that does not exist.
    MissingTie,
    /// An operation did not match the graph mode.
    ModeMismatch,
    /// A bipartite edge joined two nodes of the same mode.
    SameModeEdge,
    /// A tie violated the snowball zone constraints.
    ZoneConstraint,
    /// An arc's sender was outside the last period.
    TermConstraint,
    /// A tracked tie list was out of sync with the graph.
    StaleTieList,
    /// The tie counter disagreed with a recount.
    TieCount,
    /// A tie-list index was out of bounds.
    TieListIndex,
    /// A required overlay was missing.
    MissingOverlay,
    /// The two-path cache disagreed with a recount.
    CacheMismatch,
}

impl ConsistencyErrorCode {
    /// Returns the symbolic identifier for logging surfaces.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NodeOutOfRange => "NODE_OUT_OF_RANGE",
            Self::SelfLoop => "SELF_LOOP",
            Self::DuplicateTie => "DUPLICATE_TIE",
            Self::MissingTie => "MISSING_TIE",
            Self::ModeMismatch => "MODE_MISMATCH",
            Self::SameModeEdge => "SAME_MODE_EDGE",
            Self::ZoneConstraint => "ZONE_CONSTRAINT",
            Self::TermConstraint => "TERM_CONSTRAINT",
            Self::StaleTieList => "STALE_TIE_LIST",
            Self::TieCount => "TIE_COUNT",
            Self::TieListIndex => "TIE_LIST_INDEX",
            Self::MissingOverlay => "MISSING_OVERLAY",
            Self::CacheMismatch => "CACHE_MISMATCH",
        }
    }
}
