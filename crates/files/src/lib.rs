//! MediMind Staged Files
//!
//! Binary attachments (medical reports, scans, photos) that a user stages before asking for an
//! analysis.
//!
//! ## Design Principles
//!
//! - A staged file is an opaque blob with a name and a byte length
//! - Bytes are held in memory and shared cheaply between the intake and a submission snapshot
//! - Media type detection is best-effort and never authoritative
//! - File extensions are informational; staging never rejects a file because of its extension
//!
//! ## Example Usage
//!
//! ```no_run
//! use medimind_files::StagedFile;
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let report = StagedFile::from_path(Path::new("reports/bloods.pdf"))?;
//! println!("{} ({})", report.name(), report.display_size());
//! # Ok(())
//! # }
//! ```

mod constants;
mod files;

pub use constants::{ACCEPTED_EXTENSIONS, FALLBACK_MEDIA_TYPE, HASH_ALGORITHM};
pub use files::{FileMetadata, StagedFile};

/// Errors that can occur while staging a file
#[derive(Debug, thiserror::Error)]
pub enum FilesError {
    /// Path does not point at a regular file
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// The file name is empty or cannot be represented as UTF-8
    #[error("Invalid file name: {0}")]
    InvalidFileName(String),

    /// I/O error occurred
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
