//! Unified error types for strata.

use tokio_rusqlite::rusqlite;

/// Unified error types for the strata caching engine.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Cache store operation failed.
    #[error("STORE_ERROR: {0}")]
    Database(tokio_rusqlite::Error),

    /// Migration failed to apply.
    #[error("STORE_ERROR: migration failed: {0}")]
    MigrationFailed(String),

    /// Network transport failed while forwarding a request the engine does
    /// not cache (non-GET pass-through).
    #[error("TRANSPORT_ERROR: {0}")]
    Transport(String),

    /// The engine was asked to serve before startup reconciliation completed.
    #[error("NOT_READY: startup reconciliation has not completed")]
    NotReady,

    /// Stored entry could not be decoded (corrupt headers JSON or timestamp).
    #[error("STORE_ERROR: corrupt entry: {0}")]
    CorruptEntry(String),
}

impl From<tokio_rusqlite::Error<Error>> for Error {
    fn from(err: tokio_rusqlite::Error<Error>) -> Self {
        match err {
            tokio_rusqlite::Error::Error(e) => e,
            tokio_rusqlite::Error::ConnectionClosed => Error::Database(tokio_rusqlite::Error::ConnectionClosed),
            tokio_rusqlite::Error::Close(c) => Error::Database(tokio_rusqlite::Error::Close(c)),
            _ => Error::Database(tokio_rusqlite::Error::ConnectionClosed),
        }
    }
}

impl From<tokio_rusqlite::Error<rusqlite::Error>> for Error {
    fn from(err: tokio_rusqlite::Error<rusqlite::Error>) -> Self {
        Error::Database(err)
    }
}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        Error::Database(tokio_rusqlite::Error::Error(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::Transport("connection refused".to_string());
        assert!(err.to_string().contains("TRANSPORT_ERROR"));
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn test_not_ready_display() {
        let err = Error::NotReady;
        assert!(err.to_string().contains("NOT_READY"));
    }
}
