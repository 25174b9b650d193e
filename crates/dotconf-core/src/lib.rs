//! # dotconf-core
//!
//! Pure domain logic for dotconf: the in-memory settings tree, dotted-path
//! addressing into it, the recursive defaults merge, and the JSON codec that
//! turns file bytes into a tree and back.
//!
//! Nothing in this crate touches the file system.  The `dotconf` crate owns
//! the store, its storage port, and the file adapter.
//!
//! # Architecture overview
//!
//! - **`domain`** – The settings tree itself.  A tree is a JSON object
//!   (`serde_json::Map`) whose values form a closed sum type: null, boolean,
//!   number, string, sequence, or a nested tree.  Paths such as
//!   `"app.window.width"` address one location inside it.
//!
//! - **`codec`** – Decoding file content into a tree (tolerating blank files
//!   and non-object roots) and encoding a tree as indented JSON.

pub mod codec;
pub mod domain;

// Re-export the most-used types at the crate root so callers can write
// `dotconf_core::DottedPath` instead of `dotconf_core::domain::path::DottedPath`.
pub use codec::{decode_settings, encode_settings, Decoded};
pub use domain::merge::{merge_defaults, MergeReport};
pub use domain::path::DottedPath;
pub use domain::tree::{fetch, leaf_paths, push, SettingsTree, TreeError};
pub use serde_json::Value;
