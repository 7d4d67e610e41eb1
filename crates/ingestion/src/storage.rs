//! On-disk storage for uploaded PDFs
//!
//! Every upload is written as `<uuid>_<original name>` inside the storage
//! directory so identical names never collide.

use crate::errors::IngestionError;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use uuid::Uuid;

const FALLBACK_FILENAME: &str = "upload.pdf";

/// Directory-backed file store
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write an upload to disk and return its path
    pub async fn save(&self, bytes: &[u8], original_filename: &str) -> Result<PathBuf, IngestionError> {
        tokio::fs::create_dir_all(&self.root).await.map_err(|e| {
            IngestionError::StorageError(format!(
                "Failed to create storage directory {}: {}",
                self.root.display(),
                e
            ))
        })?;

        let name = format!("{}_{}", Uuid::new_v4(), sanitize_filename(original_filename));
        let path = self.root.join(name);

        tokio::fs::write(&path, bytes).await?;

        debug!(path = %path.display(), size = bytes.len(), "Stored uploaded file");

        Ok(path)
    }

    /// Remove a stored file. Returns `false` when it was already gone.
    pub async fn remove(&self, path: &Path) -> Result<bool, IngestionError> {
        match tokio::fs::remove_file(path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!(path = %path.display(), "Stored file already missing");
                Ok(false)
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// Reduce a client-supplied filename to its final path component
pub fn sanitize_filename(name: &str) -> String {
    let base = name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();

    match base {
        "" | "." | ".." => FALLBACK_FILENAME.to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("paper.pdf"), "paper.pdf");
        assert_eq!(sanitize_filename("../x.pdf"), "x.pdf");
        assert_eq!(sanitize_filename("/etc/passwd"), "passwd");
        assert_eq!(sanitize_filename("C:\\docs\\scan.pdf"), "scan.pdf");
        assert_eq!(sanitize_filename(""), "upload.pdf");
        assert_eq!(sanitize_filename("dir/.."), "upload.pdf");
    }

    #[tokio::test]
    async fn test_save_creates_directory_and_prefixes_name() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::new(dir.path().join("nested").join("data"));

        let path = storage.save(b"%PDF-1.5", "../paper.pdf").await.unwrap();

        assert_eq!(path.parent().unwrap(), storage.root());
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        let (prefix, rest) = name.split_once('_').unwrap();
        assert!(Uuid::parse_str(prefix).is_ok());
        assert_eq!(rest, "paper.pdf");
        assert_eq!(std::fs::read(&path).unwrap(), b"%PDF-1.5");
    }

    #[tokio::test]
    async fn test_same_name_does_not_collide() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::new(dir.path());

        let first = storage.save(b"a", "same.pdf").await.unwrap();
        let second = storage.save(b"b", "same.pdf").await.unwrap();

        assert_ne!(first, second);
        assert_eq!(std::fs::read(&first).unwrap(), b"a");
    }

    #[tokio::test]
    async fn test_remove_missing_file_is_not_an_error() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::new(dir.path());
        let path = storage.save(b"x", "gone.pdf").await.unwrap();

        assert!(storage.remove(&path).await.unwrap());
        assert!(!storage.remove(&path).await.unwrap());
    }
}
