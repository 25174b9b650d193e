//! In-memory settings storage for unit testing.
//!
//! Lets tests drive [`ConfigStore`](crate::ConfigStore) without touching the
//! file system, seed arbitrary file content, and inject read or write
//! failures.

use std::io;
use std::path::{Path, PathBuf};

use crate::application::config_store::SettingsStorage;

/// Location reported by [`MemoryStorage`] in errors and logs.
const MEMORY_LOCATION: &str = "<memory>/settings.json";

/// A [`SettingsStorage`] backed by a byte buffer.
#[derive(Debug, Clone)]
pub struct MemoryStorage {
    location: PathBuf,
    contents: Option<Vec<u8>>,
    read_failure: Option<io::ErrorKind>,
    write_failure: Option<io::ErrorKind>,
    writes: usize,
}

impl MemoryStorage {
    /// Creates storage with nothing stored, like a missing file.
    pub fn new() -> Self {
        Self {
            location: PathBuf::from(MEMORY_LOCATION),
            contents: None,
            read_failure: None,
            write_failure: None,
            writes: 0,
        }
    }

    /// Creates storage pre-filled with `contents`, like an existing file.
    pub fn with_contents(contents: impl Into<Vec<u8>>) -> Self {
        Self {
            contents: Some(contents.into()),
            ..Self::new()
        }
    }

    /// Makes every read fail with `kind`.
    pub fn failing_reads(mut self, kind: io::ErrorKind) -> Self {
        self.read_failure = Some(kind);
        self
    }

    /// Makes every write fail with `kind`, leaving the contents unchanged.
    pub fn failing_writes(mut self, kind: io::ErrorKind) -> Self {
        self.write_failure = Some(kind);
        self
    }

    /// The stored bytes, if anything has been stored.
    pub fn contents(&self) -> Option<&[u8]> {
        self.contents.as_deref()
    }

    /// The stored bytes as UTF-8, if stored and valid.
    pub fn contents_str(&self) -> Option<&str> {
        self.contents().and_then(|b| std::str::from_utf8(b).ok())
    }

    /// Number of successful writes.
    pub fn write_count(&self) -> usize {
        self.writes
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsStorage for MemoryStorage {
    fn location(&self) -> &Path {
        &self.location
    }

    fn read(&self) -> io::Result<Option<Vec<u8>>> {
        if let Some(kind) = self.read_failure {
            return Err(io::Error::new(kind, "injected read failure"));
        }
        Ok(self.contents.clone())
    }

    fn write(&mut self, contents: &[u8]) -> io::Result<()> {
        if let Some(kind) = self.write_failure {
            return Err(io::Error::new(kind, "injected write failure"));
        }
        self.contents = Some(contents.to_vec());
        self.writes += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_storage_reads_as_missing() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.read().expect("read"), None);
    }

    #[test]
    fn test_write_then_read_returns_bytes() {
        // Arrange
        let mut storage = MemoryStorage::new();

        // Act
        storage.write(b"{}").expect("write");

        // Assert
        assert_eq!(storage.read().expect("read"), Some(b"{}".to_vec()));
        assert_eq!(storage.write_count(), 1);
    }

    #[test]
    fn test_failing_write_keeps_contents() {
        let mut storage =
            MemoryStorage::with_contents("old").failing_writes(io::ErrorKind::WriteZero);

        let err = storage.write(b"new").unwrap_err();

        assert_eq!(err.kind(), io::ErrorKind::WriteZero);
        assert_eq!(storage.contents_str(), Some("old"));
        assert_eq!(storage.write_count(), 0);
    }

    #[test]
    fn test_failing_read_reports_kind() {
        let storage = MemoryStorage::new().failing_reads(io::ErrorKind::PermissionDenied);
        let err = storage.read().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::PermissionDenied);
    }
}
