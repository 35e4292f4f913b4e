//! Errors surfaced by tree operations.

use thiserror::Error;

/// Failures of mutating tree operations. Lookups that legitimately miss return `None` instead.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BstError {
    /// The item to remove is not stored in the tree. Nothing was changed.
    #[error("item not found in tree")]
    NotFound,
}

/// Shorthand for results of tree operations.
pub type Result<T> = std::result::Result<T, BstError>;
