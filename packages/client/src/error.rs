//! Error types for the terminal client.

use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Error, PartialEq)]
pub enum ClientError {
    /// Connection error
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// A typed line that is not a valid command
    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    /// A 1-based position outside the current queue
    #[error("No item at position {index} (queue has {len} item(s))")]
    IndexOutOfRange { index: usize, len: usize },
}
