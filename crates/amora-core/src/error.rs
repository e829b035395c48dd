//! Error types for the Amora engine.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the conversation engine.
///
/// Every mutating operation reports its rejection synchronously through this
/// type; timer-driven internal transitions never surface errors to callers.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AmoraError {
    /// Submitted input was rejected before any state change
    /// (e.g. an empty or whitespace-only message).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A state transition was requested on an entity that is not in the
    /// required prior state, or that does not exist.
    #[error("Invalid state: {0}")]
    InvalidState(String),
}

impl AmoraError {
    /// Creates an InvalidInput error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Creates an InvalidState error
    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState(message.into())
    }

    /// Check if this is an InvalidInput error
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }

    /// Check if this is an InvalidState error
    pub fn is_invalid_state(&self) -> bool {
        matches!(self, Self::InvalidState(_))
    }
}

/// A type alias for `Result<T, AmoraError>`.
pub type Result<T> = std::result::Result<T, AmoraError>;
