//! Error types for the Swallows engine.
//!
//! Character turns never fail: a missing item or a stale memory is a story
//! branch, not an error. These errors cover building the world and loading
//! configuration.

use thiserror::Error;

use crate::types::EntityId;

/// Top-level error type for all Swallows operations.
#[derive(Error, Debug)]
pub enum StoryError {
    /// Invalid configuration, either unparseable or failing validation.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A world description that cannot be built.
    #[error("Setting error: {0}")]
    Setting(String),

    /// Entity not found in the world arena.
    #[error("Entity not found: {0}")]
    UnknownEntity(EntityId),

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience Result type alias.
pub type Result<T> = std::result::Result<T, StoryError>;
