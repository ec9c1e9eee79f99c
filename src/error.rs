use thiserror::Error;

/// Convenience result type for reshaping operations.
pub type ReshapeResult<T> = Result<T, ReshapeError>;

/// Error type returned by the fallible parts of the crate.
///
/// Reshaping and gathering are tolerant and never fail on missing keys; errors come from strict
/// path extraction, key path construction and record ingestion.
#[derive(Debug, Error)]
pub enum ReshapeError {
    /// A strict path lookup hit an absent key. `path` lists the keys consumed up to and
    /// including the missing one, joined with `" => "`.
    #[error("path not found: {path}")]
    NotFound { path: String },

    /// A key path must name at least one key.
    #[error("key path must contain at least one key")]
    EmptyKeyPath,

    /// Underlying JSON (de)serialization error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The input does not have the shape of a record collection.
    #[error("invalid input: {message}")]
    InvalidInput { message: String },
}
