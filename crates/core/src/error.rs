//! Store error model.

use thiserror::Error;

/// Result type used across the state modules.
pub type StoreResult<T> = Result<T, StoreError>;

/// State-module level error.
///
/// Mutations themselves are total; these errors come from the edges around
/// them (loading external data, parsing protocol keys, version checks).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// An external data collaborator could not be read.
    #[error("data source unavailable: {0}")]
    Source(String),

    /// External data was read but could not be decoded.
    #[error("malformed data: {0}")]
    Parse(String),

    /// An action name did not match any declared action.
    #[error("unknown action: {0}")]
    UnknownAction(String),

    /// A mutation name did not match any declared mutation.
    #[error("unknown mutation: {0}")]
    UnknownMutation(String),

    /// The state moved on since the caller last observed it.
    #[error("conflict: {0}")]
    Conflict(String),

    /// The state lock was poisoned by a panicking writer.
    #[error("state lock poisoned")]
    Poisoned,
}

impl StoreError {
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Source(msg.into())
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    pub fn unknown_action(name: impl Into<String>) -> Self {
        Self::UnknownAction(name.into())
    }

    pub fn unknown_mutation(name: impl Into<String>) -> Self {
        Self::UnknownMutation(name.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }
}
