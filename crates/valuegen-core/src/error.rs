//! Error types for the synthesis engine

use thiserror::Error;

/// Result type alias for engine operations
pub type EngineResult<T> = Result<T, EngineError>;

/// Error type for engine operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The synthesis pass was cancelled cooperatively
    #[error("synthesis cancelled")]
    Cancelled,

    /// An emitter was invoked for a shape it does not support
    #[error("emitter {emitter} does not apply to the {shape} shape of {type_name}")]
    ShapeMismatch {
        emitter: &'static str,
        shape: &'static str,
        type_name: String,
    },

    /// Unexpected failure while resolving descriptors or emitting
    #[error("internal error: {0}")]
    Internal(String),
}

/// A per-declaration diagnostic.
///
/// A declaration whose synthesis fails is reported once and skipped; it
/// never aborts unrelated declarations in the same pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Qualified name of the offending declaration.
    pub type_name: String,

    /// Human-readable failure description.
    pub message: String,
}

impl Diagnostic {
    pub fn new(type_name: impl Into<String>, error: &EngineError) -> Self {
        Self {
            type_name: type_name.into(),
            message: error.to_string(),
        }
    }
}

#[cfg(test)]
#[path = "error/error_tests.rs"]
mod error_tests;
