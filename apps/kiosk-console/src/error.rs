//! # Application Error Type
//!
//! Errors that end a kiosk session early.
//!
//! ## What Is NOT an Error
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Bad input (letters in a price, 6-digit zip)   → re-prompt, no error    │
//! │  Duplicate seat level                          → warning line           │
//! │  PIN attempts exhausted                        → AccessOutcome::Denied  │
//! │                                                                         │
//! │  Only these stop the session:                                          │
//! │  • the terminal closed (InputClosed)                                   │
//! │  • stdout/stdin failed (Io)                                            │
//! │  • a kiosk.toml that cannot be used (Config)                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use kiosk_core::CoreError;
use thiserror::Error;

use crate::config::ConfigError;

/// Session-ending failures.
#[derive(Debug, Error)]
pub enum AppError {
    /// Reading or writing the terminal failed.
    #[error("Console I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// End of input reached while waiting for the operator.
    #[error("Input closed before the session finished")]
    InputClosed,

    /// Configuration could not be loaded or is inconsistent.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Business rule failure that the flow could not recover from.
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Convenience alias used by every flow.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            AppError::InputClosed.to_string(),
            "Input closed before the session finished"
        );

        let err: AppError = CoreError::SectionNotFound("Club".to_string()).into();
        assert_eq!(err.to_string(), "Section not found: Club");
    }
}
