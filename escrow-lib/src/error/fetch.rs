//! Page fetch error types

/// Errors raised by a [`PageSource`](crate::api::PageSource).
///
/// These belong to the host page: the grid engine never produces them and
/// never changes its own state when one is returned.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The backing service rejected or failed the request.
    #[error("Source error: {message}")]
    Source {
        /// Description reported by the source.
        message: String,
        /// Status code, if the source has one.
        status: Option<u16>,
    },

    /// A dataset or response body could not be parsed.
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Reading a dataset failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A newer request superseded this one before it completed.
    #[error("Request {sequence} superseded by {latest}")]
    Superseded {
        /// Sequence number of the discarded request.
        sequence: u64,
        /// Sequence number of the newest issued request.
        latest: u64,
    },
}

impl FetchError {
    /// Creates a new source error without a status code.
    pub fn source(message: impl Into<String>) -> Self {
        Self::Source {
            message: message.into(),
            status: None,
        }
    }

    /// Creates a new source error carrying a status code.
    pub fn with_status(status: u16, message: impl Into<String>) -> Self {
        Self::Source {
            message: message.into(),
            status: Some(status),
        }
    }

    /// Returns the status code if the source reported one.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Source { status, .. } => *status,
            _ => None,
        }
    }

    /// Returns `true` if the error only means a newer response is coming.
    pub fn is_superseded(&self) -> bool {
        matches!(self, Self::Superseded { .. })
    }
}
