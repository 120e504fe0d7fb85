//! Error types for vector operations and operation monitoring.

use thiserror::Error;

/// Result alias used by every vector operation.
pub type Result<T> = std::result::Result<T, VectorError>;

/// Errors raised by the vector helpers.
///
/// Dimension and conversion failures are kept as separate kinds: one is
/// about the shape of the input, the other about its contents.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum VectorError {
    /// A supplied vector does not have exactly two components.
    #[error("vector must be 2D (have exactly {expected} components), got {found}")]
    Dimension { expected: usize, found: usize },

    /// A component is not representable as a real number.
    #[error("vector component {index} is not a real number: {reason}")]
    TypeConversion { index: usize, reason: String },

    /// `angle_between` was called with a zero-magnitude vector.
    #[error("cannot compute angle with zero vector")]
    ZeroVector,
}

impl VectorError {
    pub(crate) fn dimension(found: usize) -> Self {
        VectorError::Dimension { expected: 2, found }
    }

    pub(crate) fn conversion(index: usize, reason: impl Into<String>) -> Self {
        VectorError::TypeConversion {
            index,
            reason: reason.into(),
        }
    }
}

/// Errors raised while exporting monitor records.
#[derive(Debug, Error)]
pub enum MonitorError {
    #[error("failed to write monitor export: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize monitor states: {0}")]
    Serialize(#[from] serde_json::Error),
}
