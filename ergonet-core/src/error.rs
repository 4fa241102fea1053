//! Crate-level error aggregation.
//!
//! Subsystems define their own error enums; this umbrella maps each onto
//! the four failure classes a run can end with: configuration errors and
//! input errors surface before sampling starts, runtime errors are output
//! failures, and internal-consistency errors are bugs and abort the run.

use thiserror::Error;

use crate::{
    config::ConfigError, graph::ConsistencyError, io::InputError, io::OutputError,
    sampler::SamplerError,
};

/// Any fatal error an estimation or simulation run can produce.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ErgonetError {
    /// The configuration was rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// An input file was unreadable or malformed.
    #[error(transparent)]
    Input(#[from] InputError),
    /// An output file could not be written.
    #[error(transparent)]
    Output(#[from] OutputError),
    /// The sampler refused to start or failed mid-run.
    #[error(transparent)]
    Sampler(#[from] SamplerError),
    /// A graph invariant was violated.
    #[error(transparent)]
    Consistency(#[from] ConsistencyError),
}

impl ErgonetError {
    /// The failure class of this error.
    #[must_use]
    pub const fn code(&self) -> ErgonetErrorCode {
        match self {
            Self::Config(_) => ErgonetErrorCode::Config,
            Self::Input(_) => ErgonetErrorCode::Input,
            Self::Output(_) => ErgonetErrorCode::Runtime,
            Self::Sampler(_) | Self::Consistency(_) => ErgonetErrorCode::InternalConsistency,
        }
    }
}

/// The four failure classes.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ErgonetErrorCode {
    /// Rejected configuration; the sampler never started.
    Config,
    /// Malformed or unreadable input; the sampler never started.
    Input,
    /// An output file failed mid-run.
    Runtime,
    /// A violated invariant; indicates a bug.
    InternalConsistency,
}

impl ErgonetErrorCode {
    /// Returns the symbolic identifier for logging surfaces.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Config => "CONFIG",
            Self::Input => "INPUT",
            Self::Runtime => "RUNTIME",
            Self::InternalConsistency => "INTERNAL_CONSISTENCY",
        }
    }
}

/// Convenient alias for results returned by the drivers.
pub type Result<T> = core::result::Result<T, ErgonetError>;
