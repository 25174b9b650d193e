//! JSON file persistence for [`ConfigStore`].
//!
//! # Locations
//!
//! A location may be absolute or relative, written with `/` or `\`.  On
//! non-Windows hosts backslashes are rewritten to `/`; relative locations are
//! resolved against the current working directory when the storage is
//! created, so a later `chdir` does not move the file.
//!
//! # Crash-safe writes
//!
//! A save never truncates the existing file in place.  The new content is
//! written to a temporary file in the same directory, flushed to disk, and
//! renamed over the target.  A failure at any step leaves the previous file
//! intact.  The parent directory is not created: writing into a missing
//! directory is an error.
//!
//! If the location is a symlink, the file it points to is replaced and the
//! link itself is left in place.

use std::fs;
use std::io::{self, Write};
use std::path::{Component, Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::application::config_store::{ConfigStore, SettingsStorage};
use dotconf_core::SettingsTree;

/// Location used when the caller does not name one.
pub const DEFAULT_LOCATION: &str = "./config.json";

/// A [`SettingsStorage`] backed by a JSON file on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    /// Binds storage to `location`, resolved as described in the module docs.
    pub fn new(location: impl AsRef<Path>) -> Self {
        Self {
            path: resolve_location(location.as_ref()),
        }
    }
}

impl Default for JsonFileStorage {
    fn default() -> Self {
        Self::new(DEFAULT_LOCATION)
    }
}

impl SettingsStorage for JsonFileStorage {
    fn location(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> io::Result<Option<Vec<u8>>> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn write(&mut self, contents: &[u8]) -> io::Result<()> {
        // Renaming onto a symlink would replace the link, so stage next to
        // and persist onto the file it resolves to.
        let target = match fs::canonicalize(&self.path) {
            Ok(resolved) => resolved,
            Err(e) if e.kind() == io::ErrorKind::NotFound => self.path.clone(),
            Err(e) => return Err(e),
        };
        let dir = target
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        let mut staged = NamedTempFile::new_in(dir)?;
        // Keep the mode of a file we are replacing rather than the temp
        // file's owner-only default.
        if let Ok(meta) = fs::metadata(&target) {
            staged.as_file().set_permissions(meta.permissions())?;
        }
        staged.write_all(contents)?;
        staged.as_file().sync_all()?;
        staged.persist(&target).map_err(|e| e.error)?;
        Ok(())
    }
}

impl ConfigStore<JsonFileStorage> {
    /// Creates an unloaded store for the JSON file at `location`.
    ///
    /// No file I/O happens until [`load_and_apply_defaults`] or [`save`].
    ///
    /// [`load_and_apply_defaults`]: ConfigStore::load_and_apply_defaults
    /// [`save`]: ConfigStore::save
    pub fn new(location: impl AsRef<Path>, defaults: Option<SettingsTree>) -> Self {
        Self::with_storage(JsonFileStorage::new(location), defaults)
    }

    /// Rebinds the store to the JSON file at `location`.
    ///
    /// Nothing is read or written and the in-memory tree and state are kept:
    /// the next [`save`](ConfigStore::save) writes the current tree to the
    /// new file, and the next load reads from it.
    pub fn set_location(&mut self, location: impl AsRef<Path>) {
        let storage = JsonFileStorage::new(location);
        debug!("settings location set to {}", storage.location().display());
        *self.storage_mut() = storage;
    }
}

/// Normalizes separators and anchors relative locations at the current
/// working directory.
pub fn resolve_location(location: &Path) -> PathBuf {
    let normalized = normalize_separators(location);
    let absolute = if normalized.is_absolute() {
        normalized
    } else {
        match std::env::current_dir() {
            Ok(cwd) => cwd.join(normalized),
            Err(e) => {
                warn!(
                    "cannot resolve {} against the working directory: {e}",
                    normalized.display()
                );
                normalized
            }
        }
    };
    absolute
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

#[cfg(windows)]
fn normalize_separators(location: &Path) -> PathBuf {
    location.to_path_buf()
}

#[cfg(not(windows))]
fn normalize_separators(location: &Path) -> PathBuf {
    match location.to_str() {
        Some(s) if s.contains('\\') => PathBuf::from(s.replace('\\', "/")),
        _ => location.to_path_buf(),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
