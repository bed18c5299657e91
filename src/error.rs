//! Error types for packet-debug.
//!
//! Session operations never return these to the host; they are folded
//! into a [`LogStatus`](crate::session::LogStatus). Configuration and
//! registry loading propagate them normally.

use thiserror::Error;

/// Main error type for packet-debug.
#[derive(Debug, Error)]
pub enum PacketDebugError {
    /// I/O error while opening or writing the log sink.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error while loading configuration or a registry.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration value out of range.
    #[error("Config error: {0}")]
    Config(String),
}

/// Result type alias using PacketDebugError.
pub type Result<T> = std::result::Result<T, PacketDebugError>;
