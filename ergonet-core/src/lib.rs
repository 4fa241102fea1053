//! Estimation and simulation of exponential random graph models (ERGMs)
//! on directed, undirected and bipartite networks.
//!
//! The crate is built around three cooperating pieces:
//!
//! - a [`Graph`] store whose mutations incrementally maintain exact
//!   two-path counts, so change statistics cost time proportional to the
//!   endpoint degrees rather than the graph size;
//! - a closed catalogue of change statistics ([`Effect`] and
//!   [`change_statistic`]) returning the difference one tie makes to each
//!   sufficient statistic;
//! - Metropolis-Hastings samplers ([`run_sampler`]) over the dyad space,
//!   with basic, improved-fixed-density and tie/no-tie proposal schemes
//!   and optional snowball or citation conditioning.
//!
//! Around them sit the configuration mini-language ([`parse_config`],
//! [`Settings`], [`bind_model`]), Pajek and attribute file I/O, and the
//! outer simulation and equilibrium-expectation drivers.
//!
//! # Feature flags
//!
//! - `twopath-cache` (default): incremental two-path bookkeeping. When
//!   disabled, counts are recomputed by walking the shorter adjacency
//!   list; semantics are identical.
//! - `metrics`: emit sampler proposal/acceptance counters through the
//!   `metrics` facade.

pub mod config;
pub mod estim;
mod error;
pub mod graph;
pub mod io;
pub mod sampler;
pub mod stats;

pub use crate::{
    config::{
        ConfigError, ConfigErrorCode, Model, SamplerChoice, Settings, bind_model, parse_config,
    },
    error::{ErgonetError, ErgonetErrorCode, Result},
    graph::{
        AttributeColumn, AttributeKind, AttributeStore, BipartiteSide, CitationTerms,
        ConsistencyError, ConsistencyErrorCode, Graph, GraphChecker, GraphInvariant, GraphMode,
        NodeId, SnowballZones, TrackedList,
    },
    sampler::{
        Conditioning, Direction, MoveMode, SamplerConfig, SamplerError, SamplerErrorCode,
        SamplerKind, SamplerOutcome, run_sampler,
    },
    stats::{Effect, EffectScope, Requirement, change_statistic, sufficient_statistics},
};

pub use crate::estim::{
    EstimationReport, SimulationReport, estimate_ee, estimate_ee_parallel, load_run, simulate,
};

pub use crate::io::{
    InputError, InputErrorCode, OutputError, TrajectoryWriter, parse_network, read_network,
    render_network, write_network, write_observed_stats, write_snapshot,
};

#[cfg(test)]
pub(crate) mod test_utils;
