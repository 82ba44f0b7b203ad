//! Error types for u-numkit

use thiserror::Error;

/// Result type alias using [`NumError`].
pub type Result<T> = std::result::Result<T, NumError>;

/// Errors that can occur in matrix and graph operations.
///
/// Every variant is a precondition or correctness violation of the requested
/// computation. Nothing is retried and no partial result is returned.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NumError {
    /// A pivot (inversion) or diagonal entry (back-substitution) fell below
    /// the singularity threshold.
    #[error("matrix is singular: |{pivot:e}| at index {index} is below threshold {threshold:e}")]
    SingularMatrix {
        /// Pivot column or diagonal row where the failure was detected
        index: usize,
        /// Offending pivot value
        pivot: f64,
        /// Threshold in effect
        threshold: f64,
    },

    /// Operand sizes are incompatible with the operation.
    #[error(
        "dimension mismatch: expected {}×{}, got {}×{}",
        .expected.0, .expected.1, .got.0, .got.1
    )]
    InvalidDimensions {
        /// Shape the operation required
        expected: (usize, usize),
        /// Shape it was given
        got: (usize, usize),
    },

    /// Inversion requested on a non-square matrix.
    #[error("matrix must be square, got {rows}×{cols}")]
    NonSquareMatrix {
        /// Number of rows
        rows: usize,
        /// Number of columns
        cols: usize,
    },

    /// A graph edge violates the non-negative weight precondition.
    #[error("edge {from} -> {to} has negative weight {weight}")]
    NegativeWeight {
        /// Tail of the edge
        from: usize,
        /// Head of the edge
        to: usize,
        /// Offending weight (negative or NaN)
        weight: f64,
    },

    /// A node index is outside `0..n`.
    #[error("node {node} out of range for graph with {n} nodes")]
    NodeOutOfRange {
        /// The invalid node
        node: usize,
        /// Number of nodes in the graph
        n: usize,
    },

    /// Raw data length does not match the requested dimensions.
    #[error("data length mismatch: expected {expected}, got {got}")]
    InvalidData {
        /// Required length
        expected: usize,
        /// Actual length
        got: usize,
    },

    /// Tolerance configuration was rejected.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
