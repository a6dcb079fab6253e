//! Error types for the eight-puzzle crate

use thiserror::Error;

use crate::puzzle::Move;

/// Main error type for the eight-puzzle crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid configuration '{input}': {reason}")]
    InvalidConfiguration { input: String, reason: String },

    #[error("randomization count must be non-negative, got {count}")]
    InvalidRandomizeCount { count: i64 },

    #[error("cannot move {direction}: blank at position {blank} is against the edge")]
    InvalidMove { direction: Move, blank: usize },

    #[error("unknown direction '{0}' (expected up, down, left or right)")]
    UnknownDirection(String),

    #[error("unknown heuristic '{0}' (expected h1 or h2)")]
    UnknownHeuristic(String),

    #[error("unknown command '{0}'")]
    UnknownCommand(String),

    #[error("invalid argument '{value}' for {command}: expected {expected}")]
    InvalidArgument {
        command: String,
        value: String,
        expected: String,
    },

    #[error("exceeded node generation limit of {limit}")]
    ResourceExceeded { limit: usize },

    #[error("goal state unreachable, having considered {generated} nodes")]
    Unreachable { generated: usize },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for the eight-puzzle crate
pub type Result<T> = std::result::Result<T, Error>;
