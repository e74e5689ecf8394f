//! Attachment storage.
//!
//! Uploaded attachments are written to a single directory under a
//! generated `<uuid>.<ext>` name; the post keeps that name as its
//! attachment reference.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::{BbsError, Result};

/// Flat directory of stored attachments.
#[derive(Debug, Clone)]
pub struct AttachmentStorage {
    base_path: PathBuf,
}

impl AttachmentStorage {
    /// Open the storage directory, creating it if needed.
    pub fn new(base_path: impl Into<PathBuf>) -> Result<Self> {
        let base_path = base_path.into();
        fs::create_dir_all(&base_path)?;

        Ok(Self { base_path })
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Store `content` and return the generated name.
    ///
    /// The extension of `original_name` is kept; files without one get `bin`.
    pub fn save(&self, content: &[u8], original_name: &str) -> Result<String> {
        let stored_name = Self::generate_stored_name(original_name);
        fs::write(self.base_path.join(&stored_name), content)?;
        Ok(stored_name)
    }

    /// Read a stored attachment.
    pub fn load(&self, stored_name: &str) -> Result<Vec<u8>> {
        let file_path = self.file_path(stored_name)?;

        match fs::read(&file_path) {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(BbsError::NotFound(format!("attachment {stored_name}")))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Remove a stored attachment. Returns false if it did not exist.
    pub fn delete(&self, stored_name: &str) -> Result<bool> {
        let file_path = self.file_path(stored_name)?;

        match fs::remove_file(&file_path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    pub fn exists(&self, stored_name: &str) -> bool {
        self.file_path(stored_name)
            .map(|path| path.is_file())
            .unwrap_or(false)
    }

    /// Resolve a stored name inside the storage directory.
    ///
    /// Names that could escape the directory are rejected.
    pub fn file_path(&self, stored_name: &str) -> Result<PathBuf> {
        if !Self::is_safe_name(stored_name) {
            return Err(BbsError::Validation(format!(
                "invalid attachment name: {stored_name}"
            )));
        }
        Ok(self.base_path.join(stored_name))
    }

    fn is_safe_name(name: &str) -> bool {
        !name.is_empty()
            && name != "."
            && !name.contains("..")
            && !name.contains(['/', '\\', '\0'])
    }

    fn extract_extension(filename: &str) -> &str {
        Path::new(filename)
            .extension()
            .and_then(|s| s.to_str())
            .filter(|ext| Self::is_safe_name(ext))
            .unwrap_or("bin")
    }

    /// Generate a unique stored name for an upload.
    pub fn generate_stored_name(original_name: &str) -> String {
        let uuid = Uuid::new_v4();
        let ext = Self::extract_extension(original_name);
        format!("{uuid}.{ext}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup_storage() -> (TempDir, AttachmentStorage) {
        let temp_dir = TempDir::new().unwrap();
        let storage = AttachmentStorage::new(temp_dir.path()).unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_new_creates_directory() {
        let temp_dir = TempDir::new().unwrap();
        let storage_path = temp_dir.path().join("files");
        assert!(!storage_path.exists());

        let storage = AttachmentStorage::new(&storage_path).unwrap();
        assert!(storage_path.exists());
        assert_eq!(storage.base_path(), storage_path);
    }

    #[test]
    fn test_save_and_load() {
        let (_temp_dir, storage) = setup_storage();

        let stored_name = storage.save(b"Hello, World!", "hello.txt").unwrap();
        assert!(stored_name.ends_with(".txt"));
        // Stored flat in the base directory
        assert!(storage.base_path().join(&stored_name).is_file());

        assert_eq!(storage.load(&stored_name).unwrap(), b"Hello, World!");
    }

    #[test]
    fn test_save_extracts_extension() {
        let (_temp_dir, storage) = setup_storage();

        assert!(storage.save(b"d", "report.pdf").unwrap().ends_with(".pdf"));
        assert!(storage.save(b"d", "image.PNG").unwrap().ends_with(".PNG"));
        assert!(storage.save(b"d", "no_extension").unwrap().ends_with(".bin"));
    }

    #[test]
    fn test_stored_names_are_unique() {
        let a = AttachmentStorage::generate_stored_name("a.txt");
        let b = AttachmentStorage::generate_stored_name("a.txt");
        assert_ne!(a, b);
    }

    #[test]
    fn test_load_missing() {
        let (_temp_dir, storage) = setup_storage();
        let result = storage.load("missing.txt");
        assert!(matches!(result, Err(BbsError::NotFound(_))));
    }

    #[test]
    fn test_delete() {
        let (_temp_dir, storage) = setup_storage();
        let stored_name = storage.save(b"data", "a.txt").unwrap();

        assert!(storage.exists(&stored_name));
        assert!(storage.delete(&stored_name).unwrap());
        assert!(!storage.exists(&stored_name));
        assert!(!storage.delete(&stored_name).unwrap());
    }

    #[test]
    fn test_rejects_path_traversal() {
        let (_temp_dir, storage) = setup_storage();

        for name in ["../secret.txt", "a/b.txt", "..", "", "a\\b.txt"] {
            assert!(
                matches!(storage.load(name), Err(BbsError::Validation(_))),
                "accepted {name:?}"
            );
        }
        assert!(!storage.exists("../etc/passwd"));
    }
}
