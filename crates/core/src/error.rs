//! Unified error types for quranc.

use tokio_rusqlite::rusqlite;

/// Unified error types for the cache layer.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No cache entry found for the given key.
    #[error("CACHE_MISS: {0}")]
    CacheMiss(String),

    /// The bucket (or one of its parents) has not been created.
    #[error("CACHE_ERROR: bucket not found: {0}")]
    BucketNotFound(String),

    /// Database operation failed.
    #[error("CACHE_ERROR: {0}")]
    Database(tokio_rusqlite::Error),

    /// Required buckets could not be created.
    #[error("CACHE_ERROR: bootstrap failed: {0}")]
    Bootstrap(String),

    /// Migration failed to apply.
    #[error("CACHE_ERROR: migration failed: {0}")]
    MigrationFailed(String),

    /// A value could not be encoded for storage.
    #[error("ENCODE_FAILED: {0}")]
    Encode(String),

    /// A stored value could not be decoded.
    #[error("DECODE_FAILED: {0}")]
    Decode(String),

    /// Call arguments could not be turned into a cache key.
    #[error("INVALID_KEY: {0}")]
    InvalidKey(String),
}

impl Error {
    /// Whether this error only means "nothing usable is cached".
    ///
    /// Absent keys, undecodable values and missing buckets all fall in this
    /// class; everything else is an actual storage failure.
    pub fn is_miss(&self) -> bool {
        matches!(self, Error::CacheMiss(_) | Error::Decode(_) | Error::BucketNotFound(_))
    }
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
