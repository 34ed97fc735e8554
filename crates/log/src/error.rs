//! Error handling for nebula-log

/// Errors raised while setting up logging
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Filter parsing error
    #[error("Invalid filter '{filter}': {reason}")]
    Filter {
        /// The filter directive as given
        filter: String,
        /// Parser message
        reason: String,
    },

    /// A global subscriber is already installed
    #[error("Logger initialization failed: {0}")]
    Init(String),
}

/// Result type for logger operations
pub type LogResult<T> = Result<T, LogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let error = LogError::Filter {
            filter: "debug[".into(),
            reason: "syntax error".into(),
        };
        assert!(error.to_string().contains("Invalid filter 'debug['"));

        let error = LogError::Config("bad format".into());
        assert_eq!(error.to_string(), "Configuration error: bad format");
    }
}
