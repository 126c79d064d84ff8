//! Crate-wide error types.
//!
//! Every fallible entry point on [`crate::Engine`] returns [`EngineError`].
//! Contradiction is deliberately *not* a variant here — an empty
//! [`crate::StateVector`] is a first-class value, not a failure, and is
//! reported via `is_empty()` on the result.

use thiserror::Error;

/// All ways an engine operation can fail.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// A rule string did not match the rule grammar.
    #[error("failed to parse rule {source:?}: {message}")]
    Parse {
        /// The offending rule string.
        source: String,
        /// Human-readable reason.
        message: String,
    },

    /// A rule or evidence map referenced a name not in the declared variable list.
    #[error("unknown variable: {0}")]
    UnknownVariable(String),

    /// Two variables with the same name were declared at construction time.
    #[error("duplicate variable declared: {0}")]
    DuplicateVariable(String),

    /// The same variable was assigned two different boolean values within one
    /// evidence call.
    #[error("conflicting evidence for variable {name}: both {first} and {second} given")]
    ConflictingEvidence {
        /// The variable assigned twice.
        name: String,
        /// The first value seen.
        first: bool,
        /// The second, contradicting value.
        second: bool,
    },

    /// `get_variable_value` was called before `compile`.
    #[error("engine has not been compiled yet; call compile() first")]
    NotCompiled,
}

/// Convenience alias used throughout the crate.
pub type EngineResult<T> = Result<T, EngineError>;
