use async_trait::async_trait;

use crate::file::errors::FileError;
use crate::file::models::FieldFiles;
use crate::file::models::FileMetadata;
use crate::file::models::StoredFile;
use crate::file::models::UploadedFile;
use crate::user::models::UserId;

/// Port for upload handling.
#[async_trait]
pub trait FileServicePort: Send + Sync + 'static {
    /// Validate and store the profile photo sent in field `file`.
    ///
    /// # Errors
    /// * `MissingField` / `UnexpectedField` / `TooManyFiles` - Wrong multipart layout
    /// * `InvalidType` - Not an image
    /// * `TooLarge` - 30 KiB or more
    /// * `Storage` - Write failed
    async fn upload_photo(
        &self,
        user_id: &UserId,
        files: Vec<UploadedFile>,
    ) -> Result<StoredFile, FileError>;

    /// Describe files sent in field `files`.
    ///
    /// # Errors
    /// * `UnexpectedField` - A part used another field name
    fn describe_files(&self, files: Vec<UploadedFile>) -> Result<Vec<FileMetadata>, FileError>;

    /// Describe files sent in fields `photo` (at most 1) and `documents` (at most 10).
    ///
    /// # Errors
    /// * `UnexpectedField` - A part used another field name
    /// * `TooManyFiles` - A field exceeded its limit
    fn describe_fields(&self, files: Vec<UploadedFile>) -> Result<FieldFiles, FileError>;
}

/// Byte storage for uploaded files.
#[async_trait]
pub trait FileStorage: Send + Sync + 'static {
    /// Write `bytes` at `relative_path`, replacing any previous content.
    ///
    /// # Errors
    /// * `Storage` - Path is outside the root or the write failed
    async fn store(&self, relative_path: &str, bytes: &[u8]) -> Result<StoredFile, FileError>;
}
