//! Errors raised while parsing and binding configuration files.

use thiserror::Error;

/// A configuration failure: bad syntax, an unknown or duplicate option,
/// an effect that does not fit the loaded graph, or an unresolvable
/// attribute name. These are user errors, reported before any sampling
/// begins.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ConfigError {
    /// The file violated the keyword/brace grammar.
    #[error("line {line}: {message}")]
    Syntax {
        /// 1-based line number.
        line: usize,
        /// What the parser expected.
        message: String,
    },
    /// An option name is not in the recognised set.
    #[error("line {line}: unknown option `{name}`")]
    UnknownOption {
        /// The unrecognised option name.
        name: String,
        /// 1-based line number.
        line: usize,
    },
    /// An option appeared more than once.
    #[error("line {line}: option `{name}` is set more than once")]
    DuplicateOption {
        /// The repeated option name.
        name: String,
        /// 1-based line number of the second occurrence.
        line: usize,
    },
    /// An option value failed to parse.
    #[error("line {line}: option `{option}` expects {expected}, got `{value}`")]
    InvalidValue {
        /// The option being set.
        option: String,
        /// The rejected raw value.
        value: String,
        /// Description of the accepted values.
        expected: &'static str,
        /// 1-based line number.
        line: usize,
    },
    /// A required option was never set.
    #[error("required option `{name}` is missing")]
    MissingOption {
        /// The missing option name.
        name: &'static str,
    },
    /// An effect name is not in the catalogue for its parameter list.
    #[error("line {line}: unknown effect `{name}`")]
    UnknownEffect {
        /// The unrecognised effect name.
        name: String,
        /// 1-based line number.
        line: usize,
    },
    /// An effect received the wrong number of arguments.
    #[error("line {line}: effect `{effect}` expects {expected}, got {got} argument(s)")]
    EffectArguments {
        /// The effect name.
        effect: String,
        /// Description of the expected arguments.
        expected: &'static str,
        /// Number of arguments supplied.
        got: usize,
        /// 1-based line number.
        line: usize,
    },
    /// An effect referenced an attribute that is not loaded.
    #[error("line {line}: effect `{effect}` references unknown {kind} attribute `{name}`")]
    UnknownAttribute {
        /// The effect name.
        effect: String,
        /// The attribute kind expected.
        kind: &'static str,
        /// The unresolved attribute name.
        name: String,
        /// 1-based line number.
        line: usize,
    },
    /// A numeric effect parameter was out of range.
    #[error("line {line}: effect `{effect}`: {detail}")]
    InvalidParameter {
        /// The effect name.
        effect: String,
        /// Why the parameter was rejected.
        detail: &'static str,
        /// 1-based line number.
        line: usize,
    },
    /// An effect's filters do not admit the loaded graph.
    #[error("line {line}: effect `{effect}` cannot be used with a {mode} graph")]
    EffectScope {
        /// The effect name.
        effect: String,
        /// Graph mode description.
        mode: &'static str,
        /// 1-based line number.
        line: usize,
    },
    /// Snowball and citation conditioning were both requested.
    #[error("zoneFile and termFile are mutually exclusive")]
    ConflictingConditioning,
}

impl ConfigError {
    /// Returns the stable machine-readable code for this error.
    #[must_use]
    pub const fn code(&self) -> ConfigErrorCode {
        match self {
            Self::Syntax { .. } => ConfigErrorCode::Syntax,
            Self::UnknownOption { .. } => ConfigErrorCode::UnknownOption,
            Self::DuplicateOption { .. } => ConfigErrorCode::DuplicateOption,
            Self::InvalidValue { .. } => ConfigErrorCode::InvalidValue,
            Self::MissingOption { .. } => ConfigErrorCode::MissingOption,
            Self::UnknownEffect { .. } => ConfigErrorCode::UnknownEffect,
            Self::EffectArguments { .. } => ConfigErrorCode::EffectArguments,
            Self::UnknownAttribute { .. } => ConfigErrorCode::UnknownAttribute,
            Self::InvalidParameter { .. } => ConfigErrorCode::InvalidParameter,
            Self::EffectScope { .. } => ConfigErrorCode::EffectScope,
            Self::ConflictingConditioning => ConfigErrorCode::ConflictingConditioning,
        }
    }
}

/// Machine-readable codes for [`ConfigError`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum ConfigErrorCode {
    /// The file violated the grammar.
    Syntax,
    /// An option name was not recognised.
    UnknownOption,
    /// An option was set twice.
    DuplicateOption,
    /// An option value failed to parse.
    InvalidValue,
    /// A required option was missing.
    MissingOption,
    /// An effect name was not recognised.
    UnknownEffect,
    /// An effect received the wrong arguments.
    EffectArguments,
    /// An attribute name did not resolve.
    UnknownAttribute,
    /// A numeric parameter was out of range.
    InvalidParameter,
    /// An effect did not admit the graph.
    EffectScope,
    /// Conflicting conditioning files were given.
    ConflictingConditioning,
}

impl ConfigErrorCode {
    /// Returns the symbolic identifier for logging surfaces.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Syntax => "CONFIG_SYNTAX",
            Self::UnknownOption => "CONFIG_UNKNOWN_OPTION",
            Self::DuplicateOption => "CONFIG_DUPLICATE_OPTION",
            Self::InvalidValue => "CONFIG_INVALID_VALUE",
            Self::MissingOption => "CONFIG_MISSING_OPTION",
            Self::UnknownEffect => "CONFIG_UNKNOWN_EFFECT",
            Self::EffectArguments => "CONFIG_EFFECT_ARGUMENTS",
            Self::UnknownAttribute => "CONFIG_UNKNOWN_ATTRIBUTE",
            Self::InvalidParameter => "CONFIG_INVALID_PARAMETER",
            Self::EffectScope => "CONFIG_EFFECT_SCOPE",
            Self::ConflictingConditioning => "CONFIG_CONFLICTING_CONDITIONING",
        }
    }
}
