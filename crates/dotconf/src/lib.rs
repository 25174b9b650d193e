//! # dotconf
//!
//! A JSON-backed settings store.  Load a file, fill in whatever it lacks from
//! a defaults tree, read and write values by dotted path, and save it back.
//!
//! ```no_run
//! use dotconf::{ConfigStore, Value};
//! use serde_json::json;
//!
//! # fn main() -> Result<(), dotconf::StoreError> {
//! let Value::Object(defaults) = json!({
//!     "app": {"dark_mode": true, "username": "Guest"},
//!     "version": "1.0"
//! }) else { unreachable!() };
//!
//! let mut store = ConfigStore::new("./config.json", Some(defaults));
//! store.load_and_apply_defaults()?;
//! store.push("app.username", "Gemini")?;
//! store.save()?;
//!
//! assert_eq!(store.fetch("app.dark_mode"), Some(&json!(true)));
//! # Ok(())
//! # }
//! ```
//!
//! # Layers
//!
//! - **`application`** – [`ConfigStore`] and the [`SettingsStorage`] port it
//!   persists through.  No direct file access.
//! - **`infrastructure`** – [`JsonFileStorage`], the file-system adapter, and
//!   [`MemoryStorage`], an in-memory stand-in for tests.
//!
//! The store is single-owner and synchronous.  It performs no locking; callers
//! that share one across threads must serialize access themselves.

pub mod application;
pub mod infrastructure;

pub use application::config_store::{
    ConfigStore, CorruptFilePolicy, SettingsStorage, StoreError, StoreState,
};
pub use dotconf_core::{DottedPath, MergeReport, SettingsTree, TreeError, Value};
pub use infrastructure::storage::json_file::JsonFileStorage;
pub use infrastructure::storage::memory::MemoryStorage;
