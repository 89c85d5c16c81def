//! Error types for the core crate.
//!
//! Covers host database access and board file I/O.

use crate::database::PrimitiveId;
use std::io;
use thiserror::Error;

/// Errors raised by the core types and the in-memory board.
#[derive(Error, Debug)]
pub enum CoreError {
    /// A primitive handle no longer refers to a live primitive.
    #[error("Unknown primitive: {0}")]
    UnknownPrimitive(PrimitiveId),

    /// The board file could not be read or written.
    #[error("Board file error: {0}")]
    BoardFile(String),

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    /// JSON serialization/deserialization error.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Result type alias for core operations.
pub type CoreResult<T> = Result<T, CoreError>;
