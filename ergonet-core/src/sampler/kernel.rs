//! The shared accept/reject kernel.
//!
//! A proposal toggles one dyad. Deletions are evaluated by temporarily
//! removing the tie so that every change statistic sees a graph in which
//! the tie is absent, then negating the inner product; the tie is
//! restored when the deletion is rejected, or when the whole run is a dry
//! run. Overflow of the acceptance exponent saturates: a large positive
//! exponent always accepts and a large negative one always rejects.

use rand::Rng;

use crate::{
    config::Model,
    graph::{ConsistencyError, Graph, NodeId, TrackedList},
    stats::change_statistic,
};

use super::{MoveMode, SamplerOutcome};

/// Direction of a proposed toggle.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Direction {
    /// Insert the proposed tie, which is currently absent.
    Add,
    /// Remove the proposed tie, which is currently present.
    Delete,
}

/// One dyad toggle ready for the kernel.
#[derive(Clone, Copy, Debug)]
pub(super) struct Proposal {
    pub(super) i: NodeId,
    pub(super) j: NodeId,
    pub(super) direction: Direction,
    /// Flat list maintained through the toggle.
    pub(super) list: TrackedList,
    /// Known index of the tie in `list`, for O(1) deletion.
    pub(super) index: Option<usize>,
    /// Log-ratio correcting the proposal-distribution imbalance.
    pub(super) correction: f64,
}

/// Evaluates and, on acceptance, applies a proposal.
///
/// Returns whether the proposal was accepted. The change-statistic vector
/// is scratch space owned by the caller to avoid re-allocation in the
/// proposal loop.
pub(super) fn attempt<R: Rng>(
    graph: &mut Graph,
    model: &Model,
    proposal: &Proposal,
    mode: MoveMode,
    rng: &mut R,
    deltas: &mut [f64],
    outcome: &mut SamplerOutcome,
) -> Result<bool, ConsistencyError> {
    let Proposal {
        i,
        j,
        direction,
        list,
        index,
        correction,
    } = *proposal;

    // For deletions the statistics are evaluated with the tie absent.
    if direction == Direction::Delete {
        match index {
            Some(index) => {
                graph.remove_tie_at(list, index)?;
            }
            None => graph.remove_dyad(i, j, list)?,
        }
    }

    for (slot, effect) in deltas.iter_mut().zip(model.effects()) {
        *slot = change_statistic(graph, i, j, effect);
    }
    let inner: f64 = deltas
        .iter()
        .zip(model.theta())
        .map(|(delta, theta)| delta * theta)
        .sum();
    let sign = match direction {
        Direction::Add => 1.0,
        Direction::Delete => -1.0,
    };
    let log_accept = sign * inner + correction;
    // exp saturates to +inf / 0 on overflow, which is exactly the certain
    // accept / certain reject the design calls for.
    let accepted = log_accept >= 0.0 || rng.gen_range(0.0..1.0) < log_accept.exp();

    match (accepted, direction, mode) {
        (true, Direction::Add, MoveMode::Commit) => {
            graph.insert_dyad(i, j, list)?;
        }
        (true, Direction::Add, MoveMode::DryRun) => {}
        (true, Direction::Delete, MoveMode::Commit) => {}
        (true, Direction::Delete, MoveMode::DryRun) => {
            graph.insert_dyad(i, j, list)?;
        }
        (false, Direction::Delete, _) => {
            graph.insert_dyad(i, j, list)?;
        }
        (false, Direction::Add, _) => {}
    }

    if accepted {
        outcome.accepted += 1;
        match direction {
            Direction::Add => {
                for (sum, delta) in outcome.add_sums.iter_mut().zip(deltas.iter()) {
                    *sum += delta;
                }
            }
            Direction::Delete => {
                for (sum, delta) in outcome.delete_sums.iter_mut().zip(deltas.iter()) {
                    *sum -= delta;
                }
            }
        }
    }
    Ok(accepted)
}
