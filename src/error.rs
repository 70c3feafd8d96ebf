//! Error Taxonomy
//!
//! Every transport failure is classified where it happens, so callers pick a
//! user-facing message from the variant instead of parsing error text.

use thiserror::Error;

use crate::config::messages;

pub type Result<T> = std::result::Result<T, TodoError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TodoError {
    #[error("title must not be empty")]
    EmptyTitle,
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("request timed out after {after_ms} ms")]
    Timeout { after_ms: u32 },
    #[error("server error (HTTP {status})")]
    Server { status: u16 },
    #[error("HTTP error {status}")]
    Http { status: u16 },
    #[error("{0}")]
    Other(String),
}

/// Coarse category used for logging and message selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Network,
    Timeout,
    Server,
    Generic,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "ValidationError",
            ErrorKind::Network => "NetworkError",
            ErrorKind::Timeout => "TimeoutError",
            ErrorKind::Server => "ServerError",
            ErrorKind::Generic => "Error",
        }
    }
}

impl TodoError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TodoError::EmptyTitle => ErrorKind::Validation,
            TodoError::Network(_) => ErrorKind::Network,
            TodoError::Timeout { .. } => ErrorKind::Timeout,
            TodoError::Server { .. } => ErrorKind::Server,
            TodoError::InvalidResponse(_) | TodoError::Http { .. } | TodoError::Other(_) => {
                ErrorKind::Generic
            }
        }
    }

    /// Message shown to the user.
    ///
    /// Categorised errors use the message table. Generic ones use their own
    /// text and fall back to `fallback` when that text is empty.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            TodoError::EmptyTitle => messages::EMPTY_TITLE.to_string(),
            TodoError::Network(_) => messages::NETWORK.to_string(),
            TodoError::Timeout { .. } => messages::TIMEOUT.to_string(),
            TodoError::Server { .. } => messages::SERVER.to_string(),
            TodoError::InvalidResponse(_) => messages::INVALID_RESPONSE.to_string(),
            TodoError::Other(raw) if raw.trim().is_empty() => {
                if fallback.is_empty() { messages::GENERIC.to_string() } else { fallback.to_string() }
            }
            other => format!("{}: {}", if fallback.is_empty() { messages::GENERIC } else { fallback }, other),
        }
    }
}

/// Map a non-2xx status to an error.
pub fn classify_status(status: u16) -> TodoError {
    if (500..600).contains(&status) {
        TodoError::Server { status }
    } else {
        TodoError::Http { status }
    }
}
