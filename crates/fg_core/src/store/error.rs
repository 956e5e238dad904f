use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] rmp_serde::encode::Error),

    #[error("Deserialization error: {0}")]
    Deserialization(#[from] rmp_serde::decode::Error),

    #[error("Decompression error")]
    Decompression,

    #[error("Corrupted data")]
    Corrupted,

    #[error("Version mismatch: found {found}, expected {expected}")]
    VersionMismatch { found: u32, expected: u32 },

    #[error("Checksum mismatch")]
    ChecksumMismatch,
}

impl StoreError {
    /// Whether retrying the same operation could succeed.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, StoreError::Io(_))
    }
}
