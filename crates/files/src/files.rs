//! In-memory staged file implementation
//!
//! A [`StagedFile`] is created when the user picks or drops a file and lives until it is
//! removed from the intake or the intake is reset. The bytes sit behind an `Arc`, so clones
//! share one buffer and freezing the intake into a submission snapshot does not copy report
//! contents. Transports that need owned bytes (the multipart encoder) copy them once per send.
//!
//! # Detection
//!
//! On construction the content is hashed with SHA-256 and sniffed with `infer` for a media
//! type. Neither result is used for validation: the digest identifies the file in logs and the
//! media type labels the multipart part sent to the analysis service.

use crate::{FilesError, ACCEPTED_EXTENSIONS, FALLBACK_MEDIA_TYPE, HASH_ALGORITHM};
use chrono::{DateTime, Utc};
use medimind_types::NonEmptyText;
use sha2::{Digest, Sha256};
use std::fmt;
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// Descriptive metadata for a staged file
///
/// Carries everything about a staged file except its bytes, so it can be logged or printed
/// without dumping report contents.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
pub struct FileMetadata {
    /// Original file name as selected by the user
    pub original_filename: NonEmptyText,

    /// Size of the file in bytes
    pub size_bytes: u64,

    /// Detected media type (MIME type), if available
    pub media_type: Option<NonEmptyText>,

    /// Hashing algorithm used for `hash`
    pub hash_algorithm: NonEmptyText,

    /// Hexadecimal digest of the file content
    pub hash: NonEmptyText,

    /// UTC timestamp when the file was staged
    pub staged_at: DateTime<Utc>,
}

/// A binary attachment staged for analysis
///
/// Two staged files with the same name are distinct entries; the intake keeps both.
#[derive(Clone)]
pub struct StagedFile {
    name: NonEmptyText,
    bytes: Arc<[u8]>,
    media_type: Option<NonEmptyText>,
    hash: NonEmptyText,
    staged_at: DateTime<Utc>,
}

impl StagedFile {
    /// Stages a file from bytes already in memory (for example a drag-and-drop payload)
    ///
    /// # Errors
    ///
    /// Returns [`FilesError::InvalidFileName`] if `name` is blank.
    pub fn from_bytes(
        name: impl AsRef<str>,
        bytes: impl Into<Vec<u8>>,
    ) -> Result<Self, FilesError> {
        let name = NonEmptyText::new(name.as_ref())
            .map_err(|_| FilesError::InvalidFileName(format!("'{}'", name.as_ref())))?;
        let bytes: Arc<[u8]> = bytes.into().into();

        let hash_hex = hex::encode(Sha256::digest(&bytes));
        let hash = NonEmptyText::new(&hash_hex).expect("hex digest is non-empty");

        let media_type =
            infer::get(&bytes).and_then(|kind| NonEmptyText::new(kind.mime_type()).ok());

        tracing::debug!(
            file = %name,
            size_bytes = bytes.len(),
            hash = %hash,
            "staged file"
        );

        Ok(Self {
            name,
            bytes,
            media_type,
            hash,
            staged_at: Utc::now(),
        })
    }

    /// Stages a file by reading it from disk
    ///
    /// The staged name is the final path component.
    ///
    /// # Errors
    ///
    /// Returns `FilesError` if:
    /// - the path is not a regular file
    /// - the file name is not valid UTF-8
    /// - the file cannot be read (I/O)
    pub fn from_path(source_path: &Path) -> Result<Self, FilesError> {
        if !source_path.is_file() {
            return Err(FilesError::InvalidPath(format!(
                "Not a regular file: {}",
                source_path.display()
            )));
        }

        let name = source_path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                FilesError::InvalidFileName(format!(
                    "File name is not valid UTF-8: {}",
                    source_path.display()
                ))
            })?
            .to_owned();

        let buffer = fs::read(source_path).map_err(|e| {
            FilesError::Io(std::io::Error::new(
                e.kind(),
                format!(
                    "Failed to read source file {}: {}",
                    source_path.display(),
                    e
                ),
            ))
        })?;

        Self::from_bytes(name, buffer)
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn size_bytes(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Detected media type, if the content was recognised
    pub fn media_type(&self) -> Option<&str> {
        self.media_type.as_ref().map(NonEmptyText::as_str)
    }

    /// Media type to declare when uploading this file
    pub fn upload_media_type(&self) -> &str {
        self.media_type().unwrap_or(FALLBACK_MEDIA_TYPE)
    }

    /// Hex SHA-256 digest of the content
    pub fn hash(&self) -> &str {
        self.hash.as_str()
    }

    /// Lowercased extension of the file name, if any
    pub fn extension(&self) -> Option<String> {
        Path::new(self.name.as_str())
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
    }

    /// Whether the extension is one the upload picker offers
    pub fn has_accepted_extension(&self) -> bool {
        self.extension()
            .is_some_and(|ext| ACCEPTED_EXTENSIONS.contains(&ext.as_str()))
    }

    /// Size in kibibytes with one decimal place, e.g. `"12.5 KB"`
    pub fn display_size(&self) -> String {
        format!("{:.1} KB", self.bytes.len() as f64 / 1024.0)
    }

    /// Metadata view without the bytes
    pub fn metadata(&self) -> FileMetadata {
        FileMetadata {
            original_filename: self.name.clone(),
            size_bytes: self.size_bytes(),
            media_type: self.media_type.clone(),
            hash_algorithm: NonEmptyText::new(HASH_ALGORITHM).expect("sha256 is non-empty"),
            hash: self.hash.clone(),
            staged_at: self.staged_at,
        }
    }
}

impl fmt::Debug for StagedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StagedFile")
            .field("name", &self.name.as_str())
            .field("size_bytes", &self.bytes.len())
            .field("media_type", &self.media_type())
            .field("hash", &self.hash.as_str())
            .finish()
    }
}

/// Equal when name and content match; staging time is ignored.
impl PartialEq for StagedFile {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.hash == other.hash
    }
}

impl Eq for StagedFile {}
