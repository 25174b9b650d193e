//! ConfigStore: load, default, read, write, and save a settings tree.
//!
//! # Lifecycle
//!
//! ```text
//!   new / with_storage  ──►  Unloaded  ──load_and_apply_defaults──►  Loaded
//!                                                                      │
//!                                    load_and_apply_defaults (reload) ─┘
//! ```
//!
//! - `fetch` / `push` work in either state.  Before the first load they see
//!   the empty tree the store was constructed with.
//! - `push` changes memory only.  Nothing reaches storage until `save`.
//! - `set_defaults` after a load does not touch the loaded tree; call
//!   [`ConfigStore::apply_defaults`] or reload to merge the new defaults.
//! - A failed load leaves both the tree and the state as they were.
//!
//! # Corrupt files
//!
//! A file that exists but is not well-formed JSON is a [`StoreError::Load`]
//! by default.  [`CorruptFilePolicy::ResetToDefaults`] instead logs a warning
//! and continues from an empty tree.  Blank files and files whose root is not
//! a JSON object always load as an empty tree.

use std::io;
use std::path::{Path, PathBuf};

use dotconf_core::{
    decode_settings, encode_settings, fetch, merge_defaults, push, Decoded, DottedPath,
    MergeReport, SettingsTree, TreeError, Value,
};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors surfaced by [`ConfigStore`].
#[derive(Debug, Error)]
pub enum StoreError {
    /// The settings file exists but could not be read.
    #[error("failed to read settings at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The settings file exists but is not well-formed JSON.
    #[error("failed to parse settings at {path}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Writing the settings file failed (permissions, missing directory,
    /// disk full).
    #[error("failed to write settings at {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The in-memory tree could not be serialized.
    #[error("failed to encode settings: {0}")]
    Encode(#[source] serde_json::Error),

    /// A `push` was blocked by a non-mapping on the way to its target.
    #[error(transparent)]
    Path(#[from] TreeError),
}

/// Where the settings tree is persisted.
///
/// The production implementation is a JSON file; tests use an in-memory
/// buffer.  Implementations deal in raw bytes and know nothing of the tree.
pub trait SettingsStorage {
    /// The location reported in errors and logs.
    fn location(&self) -> &Path;

    /// Returns the stored bytes, or `Ok(None)` if nothing has been stored yet.
    fn read(&self) -> io::Result<Option<Vec<u8>>>;

    /// Replaces the stored bytes.  Must not leave partial content behind on
    /// failure.
    fn write(&mut self, contents: &[u8]) -> io::Result<()>;
}

/// Load state of a [`ConfigStore`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StoreState {
    /// Constructed; nothing read from storage yet.
    #[default]
    Unloaded,
    /// At least one load has completed.
    Loaded,
}

/// What a load does with a file that is not well-formed JSON.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CorruptFilePolicy {
    /// Return [`StoreError::Load`] and leave the store untouched.
    #[default]
    Surface,
    /// Log a warning, discard the content, and continue from an empty tree.
    ResetToDefaults,
}

/// A settings tree bound to a storage location and a defaults tree.
///
/// Single-owner and synchronous: mutators take `&mut self` and there is no
/// internal locking.
#[derive(Debug)]
pub struct ConfigStore<S> {
    storage: S,
    defaults: SettingsTree,
    settings: SettingsTree,
    state: StoreState,
    on_corrupt: CorruptFilePolicy,
    persist_on_load: bool,
}

impl<S: SettingsStorage> ConfigStore<S> {
    /// Creates an unloaded store over `storage`.  No I/O is performed.
    pub fn with_storage(storage: S, defaults: Option<SettingsTree>) -> Self {
        Self {
            storage,
            defaults: defaults.unwrap_or_default(),
            settings: SettingsTree::new(),
            state: StoreState::Unloaded,
            on_corrupt: CorruptFilePolicy::default(),
            persist_on_load: false,
        }
    }

    /// Sets how a load treats malformed content.
    pub fn on_corrupt_file(mut self, policy: CorruptFilePolicy) -> Self {
        self.on_corrupt = policy;
        self
    }

    /// When enabled, a load saves immediately if the file was missing, was
    /// reset as corrupt, or gained at least one default.  Off by default.
    pub fn persist_on_load(mut self, enabled: bool) -> Self {
        self.persist_on_load = enabled;
        self
    }

    pub fn location(&self) -> &Path {
        self.storage.location()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub(crate) fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    pub fn state(&self) -> StoreState {
        self.state
    }

    pub fn is_loaded(&self) -> bool {
        self.state == StoreState::Loaded
    }

    /// The whole in-memory tree.
    pub fn settings(&self) -> &SettingsTree {
        &self.settings
    }

    pub fn defaults(&self) -> &SettingsTree {
        &self.defaults
    }

    /// Replaces the defaults tree.  Does not merge into an already loaded
    /// tree.
    pub fn set_defaults(&mut self, defaults: SettingsTree) {
        self.defaults = defaults;
    }

    /// Reads storage into memory and merges the defaults into it.
    ///
    /// Returns the paths that were filled from defaults.  Does not write to
    /// storage unless [`persist_on_load`](Self::persist_on_load) is enabled.
    ///
    /// # Errors
    ///
    /// - [`StoreError::Read`] if existing content cannot be read.
    /// - [`StoreError::Load`] if the content is malformed JSON and the policy
    ///   is [`CorruptFilePolicy::Surface`].
    /// - [`StoreError::Write`] / [`StoreError::Encode`] if persist-on-load is
    ///   enabled and the save fails.  The tree is loaded in that case.
    pub fn load_and_apply_defaults(&mut self) -> Result<MergeReport, StoreError> {
        let path = self.storage.location().to_path_buf();
        let raw = self.storage.read().map_err(|source| StoreError::Read {
            path: path.clone(),
            source,
        })?;

        let mut needs_persist = false;
        let mut settings = match raw {
            None => {
                debug!("no settings at {}; starting from an empty tree", path.display());
                needs_persist = true;
                SettingsTree::new()
            }
            Some(bytes) => match decode_settings(&bytes) {
                Ok(Decoded::Tree(tree)) => tree,
                Ok(Decoded::Blank) => {
                    debug!("settings at {} are blank; starting from an empty tree", path.display());
                    SettingsTree::new()
                }
                Ok(Decoded::NotAMapping { found }) => {
                    warn!(
                        "settings at {} hold a JSON {found}, not an object; starting from an empty tree",
                        path.display()
                    );
                    SettingsTree::new()
                }
                Err(source) => match self.on_corrupt {
                    CorruptFilePolicy::Surface => return Err(StoreError::Load { path, source }),
                    CorruptFilePolicy::ResetToDefaults => {
                        warn!(
                            "discarding malformed settings at {}: {source}",
                            path.display()
                        );
                        needs_persist = true;
                        SettingsTree::new()
                    }
                },
            },
        };

        let report = merge_defaults(&mut settings, &self.defaults);
        self.settings = settings;
        self.state = StoreState::Loaded;

        if report.is_empty() {
            debug!("loaded {}; no defaults written", path.display());
        } else {
            info!("loaded {}; wrote {} defaults", path.display(), report.len());
        }

        if self.persist_on_load && (needs_persist || !report.is_empty()) {
            info!("persisting settings to {} after load", path.display());
            self.save()?;
        }
        Ok(report)
    }

    /// Merges the current defaults into the in-memory tree.
    pub fn apply_defaults(&mut self) -> MergeReport {
        let report = merge_defaults(&mut self.settings, &self.defaults);
        if !report.is_empty() {
            debug!("applied {} defaults", report.len());
        }
        report
    }

    /// Returns the value at `path`, or `None` if it is not present.
    ///
    /// Never falls back to the defaults tree; see
    /// [`fetch_or_default`](Self::fetch_or_default) for that.
    pub fn fetch(&self, path: impl Into<DottedPath>) -> Option<&Value> {
        fetch(&self.settings, &path.into())
    }

    /// Returns the value at `path` from the settings tree, else from the
    /// defaults tree, else `None`.
    pub fn fetch_or_default(&self, path: impl Into<DottedPath>) -> Option<&Value> {
        let path = path.into();
        fetch(&self.settings, &path).or_else(|| fetch(&self.defaults, &path))
    }

    /// Sets the value at `path` in memory, creating intermediate mappings as
    /// needed.  Returns the previous value.  Does not save.
    ///
    /// # Errors
    ///
    /// [`StoreError::Path`] wrapping [`TreeError::PathConflict`] if an
    /// intermediate segment holds a non-mapping, or [`TreeError::EmptyPath`].
    pub fn push(
        &mut self,
        path: impl Into<DottedPath>,
        value: impl Into<Value>,
    ) -> Result<Option<Value>, StoreError> {
        let path = path.into();
        let value = value.into();
        debug!("setting {path} = {value}");
        Ok(push(&mut self.settings, &path, value)?)
    }

    /// Writes the whole in-memory tree to storage, replacing what was there.
    ///
    /// # Errors
    ///
    /// [`StoreError::Write`] if storage rejects the write, or
    /// [`StoreError::Encode`] if serialization fails.
    pub fn save(&mut self) -> Result<(), StoreError> {
        let bytes = encode_settings(&self.settings).map_err(StoreError::Encode)?;
        self.storage
            .write(&bytes)
            .map_err(|source| StoreError::Write {
                path: self.storage.location().to_path_buf(),
                source,
            })?;
        debug!("saved settings to {}", self.storage.location().display());
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
