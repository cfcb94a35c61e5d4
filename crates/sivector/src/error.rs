//! Error types for sivector.

use thiserror::Error;

/// Errors that can occur in vector storage operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum VectorError {
    /// Construction input was rejected (bad sparse layout, unknown storage type, ...).
    #[error("invalid input: {message}")]
    InvalidInput { message: String },

    /// Two operands of an element-wise operation have different logical sizes.
    #[error("size mismatch in {operation}: expected {expected} elements, got {actual}")]
    SizeMismatch {
        operation: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Index outside `[0, size)`.
    #[error("index out of range: index {index} is out of range for vector of size {size}")]
    IndexOutOfRange { index: usize, size: usize },

    /// The operation is mathematically undefined for the current values.
    #[error("cannot {operation}: {reason}")]
    DegenerateOperation {
        operation: &'static str,
        reason: String,
    },
}

impl VectorError {
    pub(crate) fn invalid_input(message: impl Into<String>) -> Self {
        VectorError::InvalidInput {
            message: message.into(),
        }
    }

    /// Fails with `SizeMismatch` unless `expected == actual`.
    pub(crate) fn check_size(
        operation: &'static str,
        expected: usize,
        actual: usize,
    ) -> Result<(), Self> {
        if expected == actual {
            Ok(())
        } else {
            Err(VectorError::SizeMismatch {
                operation,
                expected,
                actual,
            })
        }
    }

    /// Fails with `IndexOutOfRange` unless `index < size`.
    pub(crate) fn check_index(index: usize, size: usize) -> Result<(), Self> {
        if index < size {
            Ok(())
        } else {
            Err(VectorError::IndexOutOfRange { index, size })
        }
    }
}
