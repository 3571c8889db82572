//! Upload intake: validate an incoming image file by extension, give it a
//! collision-resistant storage name, and write it once into the content
//! root. The original filename is retained as metadata only and never
//! touches the filesystem.

use std::fs;
use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::error::UploadError;

/// Allowed image extensions for journal uploads.
pub const ALLOWED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];

/// Maximum accepted upload size (10MB).
pub const MAX_FILE_SIZE: usize = 10 * 1024 * 1024;

/// Public route prefix the stored files are served under.
pub const PUBLIC_PREFIX: &str = "/uploads";

/// Metadata for a file accepted into the content root.
#[derive(Debug, Clone)]
pub struct StoredFile {
    /// Storage name relative to the content root, e.g. `<uuid>.jpg`.
    pub relative_path: String,
    pub content_type: String,
    pub byte_size: i64,
    pub original_filename: String,
}

impl StoredFile {
    /// URL the stored file is served at.
    pub fn public_url(relative_path: &str) -> String {
        format!("{PUBLIC_PREFIX}/{relative_path}")
    }
}

/// Extract the lowercased extension if it is in the allow-list.
/// Checked before any filesystem write.
pub fn allowed_extension(original_filename: &str) -> Result<String, UploadError> {
    let ext = Path::new(original_filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .ok_or_else(|| UploadError::UnsupportedFileType(original_filename.to_string()))?;

    if ALLOWED_EXTENSIONS.contains(&ext.as_str()) {
        Ok(ext)
    } else {
        Err(UploadError::UnsupportedFileType(original_filename.to_string()))
    }
}

fn content_type_for(ext: &str) -> &'static str {
    match ext {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "webp" => "image/webp",
        _ => "application/octet-stream",
    }
}

/// Writes accepted files into a fixed content root.
#[derive(Debug, Clone)]
pub struct UploadIntake {
    root: PathBuf,
}

impl UploadIntake {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create the content root if it does not exist yet.
    pub fn ensure_root(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.root)
    }

    /// Validate and store one uploaded file.
    ///
    /// Rejects disallowed extensions before touching the disk. The write
    /// itself happens exactly once and is not covered by any database
    /// transaction that follows.
    pub fn accept(&self, original_filename: &str, data: &[u8]) -> Result<StoredFile, UploadError> {
        let ext = allowed_extension(original_filename)?;
        let relative_path = format!("{}.{}", Uuid::new_v4(), ext);

        fs::write(self.root.join(&relative_path), data)?;

        Ok(StoredFile {
            relative_path,
            content_type: content_type_for(&ext).to_string(),
            byte_size: data.len() as i64,
            original_filename: original_filename.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn intake() -> (tempfile::TempDir, UploadIntake) {
        let dir = tempfile::tempdir().unwrap();
        let intake = UploadIntake::new(dir.path());
        (dir, intake)
    }

    #[test]
    fn accepts_allowed_extensions_case_insensitively() {
        for name in ["a.jpg", "b.JPEG", "c.png", "d.WebP"] {
            assert!(allowed_extension(name).is_ok(), "{name} should pass");
        }
    }

    #[test]
    fn rejects_disallowed_and_missing_extensions() {
        for name in ["notes.txt", "archive.tar.gz", "noext", ".hidden", "x.gif"] {
            assert!(allowed_extension(name).is_err(), "{name} should fail");
        }
    }

    #[test]
    fn rejected_file_never_reaches_disk() {
        let (dir, intake) = intake();
        let err = intake.accept("notes.txt", b"plain text").unwrap_err();
        assert!(matches!(err, UploadError::UnsupportedFileType(_)));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn accepted_file_gets_fresh_name_and_metadata() {
        let (dir, intake) = intake();
        let stored = intake.accept("My Photo.JPG", &[0xFF, 0xD8, 0xFF]).unwrap();

        assert!(stored.relative_path.ends_with(".jpg"));
        assert_ne!(stored.relative_path, "My Photo.JPG");
        assert_eq!(stored.content_type, "image/jpeg");
        assert_eq!(stored.byte_size, 3);
        assert_eq!(stored.original_filename, "My Photo.JPG");
        assert!(dir.path().join(&stored.relative_path).exists());
    }

    #[test]
    fn storage_names_do_not_collide() {
        let (_dir, intake) = intake();
        let a = intake.accept("same.png", b"one").unwrap();
        let b = intake.accept("same.png", b"two").unwrap();
        assert_ne!(a.relative_path, b.relative_path);
    }

    #[test]
    fn public_url_is_under_uploads() {
        assert_eq!(StoredFile::public_url("abc.png"), "/uploads/abc.png");
    }
}
