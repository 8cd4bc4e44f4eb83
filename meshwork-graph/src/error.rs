//! Error types for the analytics engine.

use meshwork_core::{CoreError, NodeId};
use thiserror::Error;

/// Errors that can occur while building a graph or running an analysis.
///
/// These are deterministic structural failures, recovered at the engine
/// boundary into a reported failure result; none of them should ever
/// terminate the process.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Full pairwise reachability was required but the graph is not
    /// strongly connected.
    #[error("graph is not strongly connected")]
    DisconnectedGraph,

    /// A degenerate input fed a ratio computation.
    #[error("division by zero: {0}")]
    DivisionByZero(String),

    /// Power iteration failed to converge within the iteration bound.
    #[error("eigenvector centrality did not converge within {iterations} iterations")]
    Convergence {
        /// Number of iterations performed before giving up.
        iterations: usize,
    },

    /// A degree-distribution frequency sum did not match the number of
    /// nodes considered.
    #[error("frequency sum invariant violated: expected {expected}, got {actual}")]
    InvariantViolation {
        /// The number of nodes the histogram covers.
        expected: usize,
        /// The frequency sum actually observed.
        actual: usize,
    },

    /// A label outside the recognised category set.
    #[error("unknown label: {0}")]
    UnknownLabel(String),

    /// An edge endpoint does not reference an existing node.
    #[error("unknown node: {0}")]
    UnknownNode(NodeId),

    /// A node with the given id already exists.
    #[error("node already exists: {0}")]
    NodeAlreadyExists(NodeId),

    /// An internal error occurred.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<CoreError> for EngineError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::UnknownLabel(label) => Self::UnknownLabel(label),
            CoreError::Validation(msg) => Self::Internal(msg),
        }
    }
}

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = EngineError::UnknownNode(NodeId::new(42));
        assert!(err.to_string().contains("42"));

        let err = EngineError::Convergence { iterations: 100 };
        assert!(err.to_string().contains("100"));
    }

    #[test]
    fn from_core_error() {
        let core_err = CoreError::UnknownLabel("L9".to_owned());
        let engine_err: EngineError = core_err.into();
        assert!(matches!(engine_err, EngineError::UnknownLabel(_)));
    }
}
