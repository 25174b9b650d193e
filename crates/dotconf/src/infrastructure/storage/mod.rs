//! Storage adapters: where the settings bytes live.
//!
//! - `json_file` – the production adapter: a JSON file on disk, replaced
//!   atomically on every save.
//! - `memory`    – a byte buffer with injectable failures, for tests.

pub mod json_file;
pub mod memory;
