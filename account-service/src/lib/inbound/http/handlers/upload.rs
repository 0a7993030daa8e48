use axum::extract::Multipart;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::auth::models::RequestIdentity;
use crate::file::errors::FileError;
use crate::file::models::FieldFiles;
use crate::file::models::FileMetadata;
use crate::file::models::StoredFile;
use crate::file::models::UploadedFile;
use crate::file::ports::FileServicePort;
use crate::inbound::http::router::AppState;

pub async fn upload_photo(
    State(state): State<AppState>,
    identity: RequestIdentity,
    multipart: Multipart,
) -> Result<ApiSuccess<PhotoResponseData>, ApiError> {
    let files = read_files(multipart).await?;

    state
        .file_service
        .upload_photo(&identity.user.id, files)
        .await
        .map_err(ApiError::from)
        .map(|stored| ApiSuccess::new(StatusCode::OK, PhotoResponseData { result: stored.into() }))
}

pub async fn upload_files(
    State(state): State<AppState>,
    _identity: RequestIdentity,
    multipart: Multipart,
) -> Result<ApiSuccess<FilesResponseData>, ApiError> {
    let files = read_files(multipart).await?;

    state
        .file_service
        .describe_files(files)
        .map_err(ApiError::from)
        .map(|files| {
            ApiSuccess::new(
                StatusCode::OK,
                FilesResponseData {
                    files: files.iter().map(FileData::from).collect(),
                },
            )
        })
}

pub async fn upload_files_fields(
    State(state): State<AppState>,
    _identity: RequestIdentity,
    multipart: Multipart,
) -> Result<ApiSuccess<FieldFilesResponseData>, ApiError> {
    let files = read_files(multipart).await?;

    state
        .file_service
        .describe_fields(files)
        .map_err(ApiError::from)
        .map(|ref grouped| ApiSuccess::new(StatusCode::OK, grouped.into()))
}

/// Buffer every file part; plain form fields are skipped.
async fn read_files(mut multipart: Multipart) -> Result<Vec<UploadedFile>, FileError> {
    let mut files = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| FileError::Malformed(e.body_text()))?
    {
        if field.file_name().is_none() {
            continue;
        }

        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| FileError::Malformed(e.body_text()))?;

        files.push(UploadedFile {
            field: name,
            file_name,
            content_type,
            bytes: bytes.to_vec(),
        });
    }

    Ok(files)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhotoResponseData {
    pub result: StoredFileData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredFileData {
    pub path: String,
    pub size: u64,
}

impl From<StoredFile> for StoredFileData {
    fn from(stored: StoredFile) -> Self {
        Self {
            path: stored.path,
            size: stored.size,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileData {
    pub field: String,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub size: usize,
}

impl From<&FileMetadata> for FileData {
    fn from(meta: &FileMetadata) -> Self {
        Self {
            field: meta.field.clone(),
            file_name: meta.file_name.clone(),
            content_type: meta.content_type.clone(),
            size: meta.size,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilesResponseData {
    pub files: Vec<FileData>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldFilesResponseData {
    pub photo: Vec<FileData>,
    pub documents: Vec<FileData>,
}

impl From<&FieldFiles> for FieldFilesResponseData {
    fn from(grouped: &FieldFiles) -> Self {
        Self {
            photo: grouped.photo.iter().map(FileData::from).collect(),
            documents: grouped.documents.iter().map(FileData::from).collect(),
        }
    }
}
