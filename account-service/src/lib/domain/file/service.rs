use std::sync::Arc;

use async_trait::async_trait;

use crate::file::errors::FileError;
use crate::file::models::FieldFiles;
use crate::file::models::FileMetadata;
use crate::file::models::StoredFile;
use crate::file::models::UploadedFile;
use crate::file::ports::FileServicePort;
use crate::file::ports::FileStorage;
use crate::user::models::UserId;

/// Photos must be strictly smaller than this.
pub const MAX_PHOTO_SIZE: usize = 30 * 1024;
pub const MAX_PHOTO_FILES: usize = 1;
pub const MAX_DOCUMENT_FILES: usize = 10;

const PHOTO_FIELD: &str = "file";
const FILES_FIELD: &str = "files";

pub struct FileService<FS>
where
    FS: FileStorage,
{
    storage: Arc<FS>,
}

impl<FS> FileService<FS>
where
    FS: FileStorage,
{
    pub fn new(storage: Arc<FS>) -> Self {
        Self { storage }
    }
}

/// Storage path of a user's profile photo.
pub fn photo_path(user_id: &UserId) -> String {
    format!("photos/photo-{}.png", user_id)
}

fn single_photo(files: Vec<UploadedFile>) -> Result<UploadedFile, FileError> {
    let mut photo = None;
    for file in files {
        if file.field != PHOTO_FIELD {
            return Err(FileError::UnexpectedField(file.field));
        }
        if photo.is_some() {
            return Err(FileError::TooManyFiles {
                field: PHOTO_FIELD.to_string(),
                max: MAX_PHOTO_FILES,
            });
        }
        photo = Some(file);
    }
    photo.ok_or_else(|| FileError::MissingField(PHOTO_FIELD.to_string()))
}

fn validate_photo(photo: &UploadedFile) -> Result<(), FileError> {
    let content_type = photo.content_type.clone().unwrap_or_default();
    if !content_type.starts_with("image/") {
        return Err(FileError::InvalidType {
            expected: "image/*".to_string(),
            actual: content_type,
        });
    }

    if photo.size() >= MAX_PHOTO_SIZE {
        return Err(FileError::TooLarge {
            max: MAX_PHOTO_SIZE,
            actual: photo.size(),
        });
    }

    Ok(())
}

#[async_trait]
impl<FS> FileServicePort for FileService<FS>
where
    FS: FileStorage,
{
    async fn upload_photo(
        &self,
        user_id: &UserId,
        files: Vec<UploadedFile>,
    ) -> Result<StoredFile, FileError> {
        let photo = single_photo(files)?;
        validate_photo(&photo)?;

        let stored = self.storage.store(&photo_path(user_id), &photo.bytes).await?;
        tracing::info!(user_id = %user_id, path = %stored.path, size = stored.size, "Photo stored");

        Ok(stored)
    }

    fn describe_files(&self, files: Vec<UploadedFile>) -> Result<Vec<FileMetadata>, FileError> {
        files
            .iter()
            .map(|file| {
                if file.field == FILES_FIELD {
                    Ok(file.metadata())
                } else {
                    Err(FileError::UnexpectedField(file.field.clone()))
                }
            })
            .collect()
    }

    fn describe_fields(&self, files: Vec<UploadedFile>) -> Result<FieldFiles, FileError> {
        let mut grouped = FieldFiles::default();

        for file in &files {
            let (bucket, max) = match file.field.as_str() {
                "photo" => (&mut grouped.photo, MAX_PHOTO_FILES),
                "documents" => (&mut grouped.documents, MAX_DOCUMENT_FILES),
                other => return Err(FileError::UnexpectedField(other.to_string())),
            };
            if bucket.len() == max {
                return Err(FileError::TooManyFiles {
                    field: file.field.clone(),
                    max,
                });
            }
            bucket.push(file.metadata());
        }

        Ok(grouped)
    }
}
