//! Domain entities for dotconf.
//!
//! This module contains pure logic with no infrastructure dependencies: no
//! file handles, no environment reads, no logging subscriber.  Everything here
//! can be unit-tested in isolation on any platform.
//!
//! - [`path`]  – how a location inside a tree is named.
//! - [`tree`]  – reading and writing one location.
//! - [`merge`] – filling in whatever a defaults tree has that the settings
//!   tree lacks.

pub mod merge;
pub mod path;
pub mod tree;
