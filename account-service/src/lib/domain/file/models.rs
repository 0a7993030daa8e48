/// One file part of a multipart upload, fully buffered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    /// Multipart field the file was sent under.
    pub field: String,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    pub fn metadata(&self) -> FileMetadata {
        FileMetadata {
            field: self.field.clone(),
            file_name: self.file_name.clone(),
            content_type: self.content_type.clone(),
            size: self.size(),
        }
    }
}

/// Description of an uploaded file, without its content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMetadata {
    pub field: String,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub size: usize,
}

/// A file written to storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    /// Path relative to the storage root.
    pub path: String,
    pub size: u64,
}

/// Files of a `photo` + `documents` upload, grouped by field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldFiles {
    pub photo: Vec<FileMetadata>,
    pub documents: Vec<FileMetadata>,
}
