//! Infrastructure layer.
//!
//! Contains the storage adapters that implement the
//! [`SettingsStorage`](crate::application::config_store::SettingsStorage) port.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `dotconf_core`, but MUST NOT be imported by the application layer outside
//! of its tests.

pub mod storage;
