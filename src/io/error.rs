use crate::storage::StorageError;

/// Errors that can occur while writing a record
#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    /// A value cannot be represented in the container
    #[error("Serialization error at \"{key}\" ({kind}): {reason}")]
    Serialization {
        /// Path of the offending entry
        key: String,
        /// Runtime kind of the offending value
        kind: &'static str,
        reason: String,
    },

    /// The record has no tensor to store
    #[error("Serialization error: record has no binary time series data")]
    MissingBinaryData,

    /// The output path is empty
    #[error("Serialization error: empty output path")]
    EmptyPath,

    /// Storage layer error (I/O, ZIP)
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors that can occur while reading a record
#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    /// The container is readable but does not hold a valid record
    #[error("Storage format error: {0}")]
    StorageFormat(String),

    /// Storage layer error (I/O, ZIP, corrupt dataset)
    #[error(transparent)]
    Storage(#[from] StorageError),
}
