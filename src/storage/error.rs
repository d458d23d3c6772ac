use super::codec::CodecError;

/// Errors raised while reading or writing an IPASC container
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// ZIP archive error
    #[error("ZIP error: {0}")]
    ZipError(#[from] zip::result::ZipError),

    /// Manifest (de)serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// A dataset entry could not be decoded
    #[error("Corrupt dataset \"{path}\": {source}")]
    Dataset {
        path: String,
        #[source]
        source: CodecError,
    },

    /// The archive is readable but is not a well-formed IPASC container
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// A node name is empty or contains a path separator
    #[error("Invalid node name: {0:?}")]
    InvalidName(String),
}
