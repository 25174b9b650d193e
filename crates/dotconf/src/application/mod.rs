//! Application layer.
//!
//! [`config_store::ConfigStore`] orchestrates the domain operations from
//! `dotconf-core` (decode, merge, fetch, push, encode) around a storage port.
//! It depends on the [`config_store::SettingsStorage`] trait, never on the
//! file system, so every use case can be tested against an in-memory store.

pub mod config_store;
