//! Metropolis-Hastings dyad samplers.
//!
//! Three proposal schemes (basic, improved fixed density, tie/no-tie)
//! share a single accept/reject kernel. Each iteration proposes one dyad
//! toggle, evaluates the per-effect change statistics on a graph that
//! does not contain the tie, and accepts with probability
//! `exp(sign * theta . delta + correction)`, where the correction absorbs
//! any proposal-distribution imbalance. Accepted deltas are accumulated
//! separately for additions and deletions so the outer estimation
//! algorithms can track the drift of every sufficient statistic.
//!
//! The samplers own the graph exclusively for the duration of a run and
//! drive a single RNG stream; parallelism, where wanted, lives outside
//! (one graph copy and seed per chain).

mod basic;
mod ifd;
mod kernel;
mod proposal;
mod tnt;

use rand::Rng;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::{
    config::Model,
    graph::{ConsistencyError, Graph, TrackedList},
};


/// Whether accepted moves mutate the graph or are rolled back.
///
/// `DryRun` evaluates and accumulates exactly as `Commit` does but leaves
/// the graph, the caches and the tie lists in their initial state when
/// the run returns.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MoveMode {
    /// Roll back every accepted move after accumulating its statistics.
    DryRun,
    /// Apply accepted moves to the graph.
    Commit,
}

/// Restriction of the proposal space for conditional estimation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Conditioning {
    /// No restriction; every dyad may be toggled.
    Free,
    /// Snowball estimation: only dyads among inner-zone nodes, respecting
    /// zone adjacency and previous-wave connectivity.
    Snowball,
    /// Citation estimation: only arcs sent from last-period nodes.
    Citation,
}

impl Conditioning {
    /// The flat tie list matching this proposal space.
    #[must_use]
    pub const fn tie_list(self) -> TrackedList {
        match self {
            Self::Free => TrackedList::All,
            Self::Snowball => TrackedList::InnerZone,
            Self::Citation => TrackedList::MaxTermSender,
        }
    }
}

/// The proposal scheme to run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SamplerKind {
    /// Uniform dyad proposals with no correction.
    Basic {
        /// Reject any addition that would create a reciprocated arc.
        forbid_reciprocity: bool,
    },
    /// Improved fixed density: balanced add/delete branches with an
    /// auxiliary log-correction that pins the expected tie count.
    Ifd {
        /// Robbins-Monro gain for the auxiliary parameter update.
        gain: f64,
    },
    /// Tie/no-tie: half the proposals re-draw an existing tie, half an
    /// absent dyad, with the exact Hastings correction.
    Tnt,
}

/// Configuration of one sampler run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SamplerConfig {
    /// Proposal scheme.
    pub kind: SamplerKind,
    /// Number of proposals to make.
    pub iterations: u64,
    /// Whether accepted moves persist.
    pub mode: MoveMode,
    /// Proposal-space restriction.
    pub conditioning: Conditioning,
}

impl SamplerConfig {
    /// A committed basic-sampler configuration.
    #[must_use]
    pub const fn basic(iterations: u64) -> Self {
        Self {
            kind: SamplerKind::Basic {
                forbid_reciprocity: false,
            },
            iterations,
            mode: MoveMode::Commit,
            conditioning: Conditioning::Free,
        }
    }

    /// Overrides the proposal scheme.
    #[must_use]
    pub const fn with_kind(mut self, kind: SamplerKind) -> Self {
        self.kind = kind;
        self
    }

    /// Overrides the move mode.
    #[must_use]
    pub const fn with_mode(mut self, mode: MoveMode) -> Self {
        self.mode = mode;
        self
    }

    /// Overrides the conditioning.
    #[must_use]
    pub const fn with_conditioning(mut self, conditioning: Conditioning) -> Self {
        self.conditioning = conditioning;
        self
    }
}

/// Accumulated results of a sampler run.
#[derive(Clone, Debug, PartialEq)]
pub struct SamplerOutcome {
    /// Number of proposals made (always the configured iteration count).
    pub proposals: u64,
    /// Number of accepted toggles.
    pub accepted: u64,
    /// Sum of change statistics over accepted additions.
    pub add_sums: Vec<f64>,
    /// Sum of (negated) change statistics over accepted deletions; this is
    /// the actual movement of each sufficient statistic.
    pub delete_sums: Vec<f64>,
    /// Final value of the fixed-density auxiliary parameter, when the IFD
    /// scheme ran.
    pub aux: f64,
}

impl SamplerOutcome {
    pub(crate) fn new(effect_count: usize) -> Self {
        Self {
            proposals: 0,
            accepted: 0,
            add_sums: vec![0.0; effect_count],
            delete_sums: vec![0.0; effect_count],
            aux: 0.0,
        }
    }

    /// Fraction of proposals that were accepted.
    #[must_use]
    pub fn acceptance_rate(&self) -> f64 {
        if self.proposals == 0 {
            0.0
        } else {
            self.accepted as f64 / self.proposals as f64
        }
    }

    /// Per-effect net statistic drift: additions plus deletions.
    #[must_use]
    pub fn net_sums(&self) -> Vec<f64> {
        self.add_sums
            .iter()
            .zip(&self.delete_sums)
            .map(|(add, del)| add + del)
            .collect()
    }
}

/// Errors surfaced before or during a sampler run.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum SamplerError {
    /// The graph store reported an internal inconsistency; this is fatal.
    #[error(transparent)]
    Consistency(#[from] ConsistencyError),
    /// An effect's filters do not admit the loaded graph.
    #[error("effect {effect} cannot be evaluated on a {mode} graph")]
    EffectScope {
        /// Name of the offending effect.
        effect: &'static str,
        /// Graph mode description.
        mode: &'static str,
    },
    /// The coefficient vector does not match the effect list.
    #[error("model has {effects} effects but {theta} coefficients")]
    ThetaLength {
        /// Number of configured effects.
        effects: usize,
        /// Number of supplied coefficients.
        theta: usize,
    },
    /// The proposal space is too small to sample from.
    #[error("proposal space needs at least {needed} eligible nodes, found {available}")]
    TooFewNodes {
        /// Minimum eligible nodes for the configured proposal scheme.
        needed: usize,
        /// Eligible nodes present.
        available: usize,
    },
}

impl SamplerError {
    /// Returns the stable machine-readable code for this error.
    #[must_use]
    pub const fn code(&self) -> SamplerErrorCode {
        match self {
            Self::Consistency(_) => SamplerErrorCode::Consistency,
            Self::EffectScope { .. } => SamplerErrorCode::EffectScope,
            Self::ThetaLength { .. } => SamplerErrorCode::ThetaLength,
            Self::TooFewNodes { .. } => SamplerErrorCode::TooFewNodes,
        }
    }
}

/// Machine-readable codes for [`SamplerError`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum SamplerErrorCode {
    /// A graph invariant was violated.
    Consistency,
    /// An effect did not admit the graph.
    EffectScope,
    /// Coefficients and effects disagreed in length.
    ThetaLength,
    /// The proposal space was too small.
    TooFewNodes,
}

impl SamplerErrorCode {
    /// Returns the symbolic identifier for logging surfaces.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Consistency => "CONSISTENCY",
            Self::EffectScope => "EFFECT_SCOPE",
            Self::ThetaLength => "THETA_LENGTH",
            Self::TooFewNodes => "TOO_FEW_NODES",
        }
    }
}

/// Runs one sampler over the graph and returns the accumulated outcome.
///
/// # Errors
/// Fails before the first iteration on a model/graph mismatch, a missing
/// overlay, a stale tie list, or a degenerate proposal space; fails
/// during iteration only on an internal consistency violation.
#[instrument(skip_all, fields(kind = ?config.kind, iterations = config.iterations))]
pub fn run_sampler<R: Rng>(
    graph: &mut Graph,
    model: &Model,
    config: &SamplerConfig,
    rng: &mut R,
) -> Result<SamplerOutcome, SamplerError> {
    validate(graph, model, config)?;
    let outcome = match config.kind {
        SamplerKind::Basic { forbid_reciprocity } => {
            basic::run(graph, model, config, forbid_reciprocity, rng)
        }
        SamplerKind::Ifd { gain } => ifd::run(graph, model, config, gain, rng),
        SamplerKind::Tnt => tnt::run(graph, model, config, rng),
    }?;
    #[cfg(feature = "metrics")]
    {
        metrics::counter!("sampler_proposals_total").increment(outcome.proposals);
        metrics::counter!("sampler_accepts_total").increment(outcome.accepted);
    }
    debug!(
        accepted = outcome.accepted,
        proposals = outcome.proposals,
        acceptance_rate = outcome.acceptance_rate(),
        "sampler run finished"
    );
    Ok(outcome)
}

fn validate(graph: &Graph, model: &Model, config: &SamplerConfig) -> Result<(), SamplerError> {
    if model.theta().len() != model.effects().len() {
        return Err(SamplerError::ThetaLength {
            effects: model.effects().len(),
            theta: model.theta().len(),
        });
    }
    for effect in model.effects() {
        if !effect.scope().accepts(graph) {
            return Err(SamplerError::EffectScope {
                effect: effect.name(),
                mode: graph.mode().as_str(),
            });
        }
    }
    match config.conditioning {
        Conditioning::Free => {}
        Conditioning::Snowball => {
            let Some(zones) = graph.zones() else {
                return Err(ConsistencyError::MissingOverlay { overlay: "zone" }.into());
            };
            if zones.inner_nodes().len() < 2 {
                return Err(SamplerError::TooFewNodes {
                    needed: 2,
                    available: zones.inner_nodes().len(),
                });
            }
        }
        Conditioning::Citation => {
            if !graph.is_directed() {
                return Err(SamplerError::EffectScope {
                    effect: "citation conditioning",
                    mode: graph.mode().as_str(),
                });
            }
            let Some(terms) = graph.terms() else {
                return Err(ConsistencyError::MissingOverlay { overlay: "term" }.into());
            };
            if terms.max_term_nodes().is_empty() {
                return Err(SamplerError::TooFewNodes {
                    needed: 1,
                    available: 0,
                });
            }
        }
    }
    if matches!(config.kind, SamplerKind::Ifd { .. } | SamplerKind::Tnt) {
        let list = config.conditioning.tie_list();
        if !graph.list_is_synced(list) {
            return Err(ConsistencyError::StaleTieList { list }.into());
        }
    }
    if graph.node_count() < 2 {
        return Err(SamplerError::TooFewNodes {
            needed: 2,
            available: graph.node_count() as usize,
        });
    }
    if graph.is_bipartite() && (graph.mode_a_count() == 0 || graph.mode_b_count() == 0) {
        return Err(SamplerError::TooFewNodes {
            needed: 1,
            available: 0,
        });
    }
    Ok(())
}

pub use self::kernel::Direction;
