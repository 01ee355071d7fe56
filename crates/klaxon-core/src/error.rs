//! Domain error types.

use thiserror::Error;

/// Top-level domain error type.
#[derive(Debug, Error)]
pub enum DomainError {
    /// Bad command input. Surfaced directly to the caller, never retried.
    #[error("validation error: {0}")]
    Validation(String),

    /// The authoritative write store failed. The command aborts and no event
    /// is published.
    #[error("write store error: {0}")]
    WriteStore(String),

    /// A read store failed while serving a query.
    #[error("read store error: {0}")]
    ReadStore(String),

    /// One read store's upsert failed after a successful write. The command
    /// has already succeeded; the store is stale until redelivery.
    #[error("projection into {store} store failed: {message}")]
    Projection {
        /// The read store whose upsert failed.
        store: String,
        /// The underlying failure.
        message: String,
    },
}
