/// Extensions offered by the upload picker (lowercase, without the leading dot).
pub const ACCEPTED_EXTENSIONS: &[&str] = &[
    "pdf", "jpg", "jpeg", "png", "dcm", "dicom", "txt", "doc", "docx",
];

/// Media type sent for a part whose content could not be identified.
pub const FALLBACK_MEDIA_TYPE: &str = "application/octet-stream";

/// Digest algorithm recorded in [`crate::FileMetadata`].
pub const HASH_ALGORITHM: &str = "sha256";
