//! Errors raised while reading input files and writing outputs.

use std::{io, path::PathBuf};

use thiserror::Error;

/// A malformed or inconsistent input file.
///
/// Every variant identifies the file and, where possible, the line and
/// token that violated the format, so the user sees a single actionable
/// diagnostic.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum InputError {
    /// The file could not be read.
    #[error("failed to read `{path}`: {source}")]
    Io {
        /// The file being read.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// A line violated the expected format.
    #[error("{path}:{line}: {message}")]
    Syntax {
        /// The file being read.
        path: PathBuf,
        /// 1-based line number.
        line: usize,
        /// The rule that was violated.
        message: String,
    },
    /// The file described a different number of nodes than the network.
    #[error("`{path}` has {found} rows but the network has {expected} nodes")]
    NodeCount {
        /// The file being read.
        path: PathBuf,
        /// Node count of the loaded network.
        expected: u32,
        /// Rows found in this file.
        found: usize,
    },
    /// A node number was outside `1..=N`.
    #[error("{path}:{line}: node {id} is out of range 1..={count}")]
    NodeId {
        /// The file being read.
        path: PathBuf,
        /// 1-based line number.
        line: usize,
        /// The offending node number as written.
        id: i64,
        /// Number of declared nodes.
        count: u32,
    },
    /// Zone numbers skipped a value.
    #[error("`{path}`: zones must be contiguous from 0, but zone {missing} has no nodes")]
    NonContiguousZones {
        /// The file being read.
        path: PathBuf,
        /// The first zone number with no member.
        missing: u32,
    },
}

impl InputError {
    /// Returns the stable machine-readable code for this error.
    #[must_use]
    pub const fn code(&self) -> InputErrorCode {
        match self {
            Self::Io { .. } => InputErrorCode::Io,
            Self::Syntax { .. } => InputErrorCode::Syntax,
            Self::NodeCount { .. } => InputErrorCode::NodeCount,
            Self::NodeId { .. } => InputErrorCode::NodeId,
            Self::NonContiguousZones { .. } => InputErrorCode::NonContiguousZones,
        }
    }
}

/// Machine-readable codes for [`InputError`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum InputErrorCode {
    /// The file could not be read.
    Io,
    /// A line violated the format.
    Syntax,
    /// Row count disagreed with the node count.
    NodeCount,
    /// A node number was out of range.
    NodeId,
    /// Zone numbers were not contiguous.
    NonContiguousZones,
}

impl InputErrorCode {
    /// Returns the symbolic identifier for logging surfaces.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Io => "INPUT_IO",
            Self::Syntax => "INPUT_SYNTAX",
            Self::NodeCount => "INPUT_NODE_COUNT",
            Self::NodeId => "INPUT_NODE_ID",
            Self::NonContiguousZones => "INPUT_NON_CONTIGUOUS_ZONES",
        }
    }
}

/// A failure while writing an output file.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum OutputError {
    /// The file could not be created or written.
    #[error("failed to write `{path}`: {source}")]
    Io {
        /// The file being written.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
}

impl OutputError {
    pub(crate) fn io(path: &std::path::Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}
