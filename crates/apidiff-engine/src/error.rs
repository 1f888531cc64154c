//! Error types for the engine crate.

/// Errors raised while setting up a diff engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// A configuration value is out of range.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Convenience alias for engine results.
pub type EngineResult<T> = Result<T, EngineError>;
