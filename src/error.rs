//! Error types for pshelp.
//!
//! Defines the main error enum used throughout the crate. Resolution itself
//! never fails; these errors come from running and displaying help.

use thiserror::Error;

/// Main error type for pshelp operations.
#[derive(Error, Debug)]
pub enum PsHelpError {
    /// Configuration errors (unreadable or invalid config file).
    #[error("Configuration error: {0}")]
    Config(String),

    /// Help backend errors (shell missing, non-zero exit, etc.)
    #[error("Backend error: {0}")]
    Backend(String),

    /// Viewer errors (pager failed to start, output unreadable, etc.)
    #[error("Viewer error: {0}")]
    Viewer(String),

    /// File system errors around the temporary help output.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal errors (unexpected states, bugs, etc.)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl PsHelpError {
    /// Creates a configuration error with the given message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates a backend error with the given message.
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }

    /// Creates a viewer error with the given message.
    pub fn viewer(msg: impl Into<String>) -> Self {
        Self::Viewer(msg.into())
    }

    /// Creates an internal error with the given message.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Returns the error category as a string for display purposes.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Config(_) => "Configuration Error",
            Self::Backend(_) => "Backend Error",
            Self::Viewer(_) => "Viewer Error",
            Self::Io(_) => "I/O Error",
            Self::Internal(_) => "Internal Error",
        }
    }
}

/// Result type alias using PsHelpError.
pub type Result<T> = std::result::Result<T, PsHelpError>;
