use thiserror::Error;

/// Errors reported by the forest containers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ForestError {
    #[error("key is already present in the tree")]
    DuplicateKey,
    #[error("key not found")]
    NotFound,
    #[error("pop from an empty heap")]
    EmptyHeap,
    #[error("median of an empty tracker")]
    EmptyTracker,
}

pub type Result<T> = std::result::Result<T, ForestError>;
