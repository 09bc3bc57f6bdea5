//! Verifier error types

use thiserror::Error;

/// Broad category of a verification failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// No matching customer record
    NotFound,
    /// Database unreachable or login rejected
    Connection,
    /// A query failed after connecting
    Query,
}

impl ErrorKind {
    /// Get the error kind string
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "NOT_FOUND",
            Self::Connection => "CONNECTION_FAILED",
            Self::Query => "QUERY_FAILED",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur while verifying a submission
#[derive(Debug, Error)]
pub enum VerifyError {
    /// The requested customer does not exist
    #[error("customer {0} not found in database")]
    CustomerNotFound(String),

    /// Neither the lookback window nor the test prefix matched any customer
    #[error("no customers created in the last {minutes_back} minutes and no {prefix} customers found")]
    NoCandidate {
        /// Lookback window that was searched
        minutes_back: u32,
        /// Test prefix that was searched
        prefix: String,
    },

    /// Could not establish the database connection
    #[error("connection failed: {0}")]
    Connection(#[source] sqlx::Error),

    /// A query failed
    #[error("query failed: {0}")]
    Query(#[source] sqlx::Error),
}

impl VerifyError {
    /// Classify this error
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::CustomerNotFound(_) | Self::NoCandidate { .. } => ErrorKind::NotFound,
            Self::Connection(_) => ErrorKind::Connection,
            Self::Query(_) => ErrorKind::Query,
        }
    }
}
