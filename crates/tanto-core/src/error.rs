use thiserror::Error;

/// Errors that can occur during Tanto core operations.
///
/// Heuristic misses are never errors: a filename that yields no episode
/// number or title still parses successfully. Only structural failures
/// surface here.
#[derive(Debug, Clone, Error)]
pub enum TantoError {
    /// The filename is empty once its extension and ignored strings are removed.
    #[error("input is empty after removing extension and ignored strings")]
    EmptyInput,

    /// The lexer did not produce a single token for the input.
    #[error("no tokens could be extracted from input: {input:?}")]
    NoTokens {
        /// The input that could not be tokenized.
        input: String,
    },

    /// A matcher pattern failed to compile (should not happen with static patterns).
    #[error("regex compilation error: {0}")]
    RegexError(#[from] regex::Error),

    /// The parse options are unusable.
    #[error("invalid options: {0}")]
    InvalidOptions(String),
}

/// Result type alias for Tanto operations.
pub type Result<T> = std::result::Result<T, TantoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_messages() {
        let err = TantoError::EmptyInput;
        assert_eq!(
            err.to_string(),
            "input is empty after removing extension and ignored strings"
        );

        let err = TantoError::NoTokens {
            input: "[]".into(),
        };
        assert!(err.to_string().contains("\"[]\""));

        let err = TantoError::InvalidOptions("delimiter 'a' is alphanumeric".into());
        assert!(err.to_string().starts_with("invalid options"));
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TantoError>();
    }
}
