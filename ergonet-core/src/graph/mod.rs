//! Graph store, nodal attributes, conditioning overlays and two-path
//! bookkeeping.
//!
//! The store is built once from input files, mutated only by the samplers,
//! and dropped at the end of a run. Every mutation keeps the two-path
//! counts, the previous-wave degree counters and the selected flat tie
//! list consistent before it returns, so the change statistics never see
//! an intermediate state.

mod attributes;
mod consistency;
mod error;
mod overlay;
mod store;
mod ties;
#[cfg(feature = "twopath-cache")]
mod twopath;

/// Dense node identifier; nodes are numbered `0..node_count`.
pub type NodeId = u32;

pub use self::{
    attributes::{AttributeColumn, AttributeKind, AttributeStore},
    consistency::{GraphChecker, GraphInvariant},
    error::{ConsistencyError, ConsistencyErrorCode},
    overlay::{CitationTerms, SnowballZones},
    store::{BipartiteSide, Graph, GraphMode},
    ties::TrackedList,
};

#[cfg(test)]
mod tests;
