//! User-facing error taxonomy.
//!
//! Each variant's `Display` string is the exact text shown to the user.
//! Internal detail stays in `#[source]` causes and reaches operators via
//! tracing, never the response body.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RegistrationError {
    #[error("{0}")]
    Validation(String),

    #[error("An account with that email already exists")]
    DuplicateEmail,

    #[error("Failed to create account")]
    Internal,

    #[error("Failed to create account")]
    Persistence(#[source] diesel::result::Error),
}

#[derive(Error, Debug)]
pub enum UploadError {
    #[error("Unsupported file type; allowed: jpg, jpeg, png, webp")]
    UnsupportedFileType(String),

    #[error("Failed to store uploaded file")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum JournalSaveError {
    #[error("Failed to read uploaded form data")]
    MalformedForm,

    #[error("Image too large; maximum size is 10MB")]
    TooLarge,

    #[error("Missing form field: {0}")]
    MissingField(&'static str),

    #[error("Invalid object selection")]
    InvalidObject,

    #[error("Invalid observed date; expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("No image file was provided")]
    MissingImage,

    #[error("Unsupported file type; allowed: jpg, jpeg, png, webp")]
    UnsupportedFileType(String),

    #[error("Failed to save journal entry")]
    Storage(#[source] std::io::Error),

    #[error("Failed to save journal entry")]
    Unavailable,

    #[error("Failed to save journal entry")]
    Persistence(#[source] diesel::result::Error),
}

impl From<UploadError> for JournalSaveError {
    fn from(err: UploadError) -> Self {
        match err {
            UploadError::UnsupportedFileType(name) => JournalSaveError::UnsupportedFileType(name),
            UploadError::Io(e) => JournalSaveError::Storage(e),
        }
    }
}
