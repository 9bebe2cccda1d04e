//! Error types for matrix operations.

use thiserror::Error;

/// Errors returned by matrix construction, arithmetic and the binary codec.
#[derive(Debug, Error)]
pub enum MatError {
    /// Operand dimensions are incompatible with the operation.
    #[error("{op}: shape mismatch, expected {expected}, got {actual}")]
    ShapeMismatch {
        /// Operation that rejected its operands.
        op: &'static str,
        /// Required shape or length.
        expected: String,
        /// Shape or length that was supplied.
        actual: String,
    },

    /// A row or column index lies outside the matrix.
    #[error("{op}: index {index} out of range (bound {bound})")]
    IndexOutOfRange {
        /// Operation that rejected the index.
        op: &'static str,
        /// Offending index (or end boundary).
        index: usize,
        /// Exclusive upper bound the index was checked against.
        bound: usize,
    },

    /// Storage for a `rows x cols` buffer could not be obtained.
    #[error("cannot allocate storage for a {rows}x{cols} matrix")]
    Allocation {
        /// Requested row count.
        rows: usize,
        /// Requested column count.
        cols: usize,
    },

    /// The matrix has a zero determinant and no inverse.
    #[error("singular matrix: determinant = {det}")]
    SingularMatrix {
        /// Determinant that was computed.
        det: f64,
    },

    /// The input is not a valid serialized matrix.
    #[error("malformed matrix data: {0}")]
    Parse(String),

    /// Underlying reader or writer failed, including short reads and writes.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl MatError {
    pub(crate) fn shape(
        op: &'static str,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::ShapeMismatch {
            op,
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    pub(crate) fn index(op: &'static str, index: usize, bound: usize) -> Self {
        Self::IndexOutOfRange { op, index, bound }
    }

    /// Returns true for [`MatError::ShapeMismatch`].
    #[must_use]
    pub fn is_shape_mismatch(&self) -> bool {
        matches!(self, Self::ShapeMismatch { .. })
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, MatError>;
