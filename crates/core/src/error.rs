//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// The computation rules themselves never fail: bad numbers coerce to zero and
/// guarded derivations are skipped. What remains are structural rejections at
/// the command boundary (unknown fields, out-of-range rows, disabled
/// capabilities).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. unknown field path).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A line item index did not address an existing row.
    #[error("item index {index} out of range (items: {len})")]
    ItemOutOfRange { index: usize, len: usize },
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn item_out_of_range(index: usize, len: usize) -> Self {
        Self::ItemOutOfRange { index, len }
    }
}
