use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FileError {
    #[error("Invalid file type: expected {expected}, got {actual}")]
    InvalidType { expected: String, actual: String },

    #[error("File too large: must be smaller than {max} bytes, got {actual}")]
    TooLarge { max: usize, actual: usize },

    #[error("Too many files for field {field}: maximum {max}")]
    TooManyFiles { field: String, max: usize },

    #[error("File is required in field {0}")]
    MissingField(String),

    #[error("Unexpected field: {0}")]
    UnexpectedField(String),

    #[error("Malformed upload: {0}")]
    Malformed(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl FileError {
    /// Whether the upload itself was at fault rather than the storage.
    pub fn is_validation(&self) -> bool {
        !matches!(self, FileError::Storage(_))
    }
}
