use thiserror::Error;

/// Errors produced while reading declaration trees.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid declaration tree: {0}")]
    InvalidTree(String),
}

/// Convenience alias for type-level results.
pub type TypeResult<T> = Result<T, TypeError>;
