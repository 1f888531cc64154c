/// Errors raised while parsing or comparing permission expressions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PermissionError {
    /// The expression contains no tokens.
    #[error("empty permission expression")]
    Empty,

    /// A character that is neither part of an identifier nor a connective.
    #[error("unexpected character '{ch}' at offset {offset}")]
    UnexpectedChar { ch: char, offset: usize },

    /// A token in a position the grammar does not allow.
    #[error("unexpected token {token} at position {position}")]
    UnexpectedToken { token: String, position: usize },

    /// The expression ended where an operand was required.
    #[error("expression ended unexpectedly")]
    UnexpectedEnd,

    /// Parentheses do not pair up.
    #[error("unbalanced parentheses")]
    UnbalancedParen,

    /// Enumerating `2^count` states would exceed the configured ceiling.
    #[error("{count} distinct permissions exceed the limit of {limit}")]
    TooManyVariables { count: usize, limit: usize },
}

/// Convenience alias for permission results.
pub type PermissionResult<T> = Result<T, PermissionError>;
