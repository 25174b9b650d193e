//! The settings tree and path-based access to it.
//!
//! Reads never fabricate values: a path that is missing, or that walks
//! through a non-mapping, yields `None`.  Writes create missing intermediate
//! mappings but refuse to replace an existing non-mapping on the way down.

use serde_json::{Map, Value};
use thiserror::Error;

use super::path::DottedPath;

/// A nested mapping from string keys to JSON values.
pub type SettingsTree = Map<String, Value>;

/// Errors raised when writing into a settings tree.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// A segment on the way to the target holds a value that is not a mapping.
    #[error("cannot set `{path}`: `{conflict}` holds a non-mapping value")]
    PathConflict {
        /// The path that was being written.
        path: String,
        /// The intermediate location that blocked the write.
        conflict: String,
    },

    /// The path has no segments.
    #[error("an empty path does not address any value")]
    EmptyPath,
}

/// Returns the value at `path`, or `None` if any segment is missing or
/// descends into a non-mapping.
pub fn fetch<'a>(tree: &'a SettingsTree, path: &DottedPath) -> Option<&'a Value> {
    let (last, parents) = path.segments().split_last()?;
    let mut node = tree;
    for segment in parents {
        node = node.get(segment)?.as_object()?;
    }
    node.get(last)
}

/// Sets the value at `path`, creating empty mappings for missing intermediate
/// segments.  Returns the value previously stored at `path`, if any.
///
/// # Errors
///
/// [`TreeError::PathConflict`] if an intermediate segment exists but is not a
/// mapping; the tree is left untouched in that case.  [`TreeError::EmptyPath`]
/// for a path with no segments.
pub fn push(
    tree: &mut SettingsTree,
    path: &DottedPath,
    value: Value,
) -> Result<Option<Value>, TreeError> {
    let (last, parents) = path.segments().split_last().ok_or(TreeError::EmptyPath)?;

    // Validate before creating anything so a conflict never leaves freshly
    // created empty mappings behind.
    let mut walk = &*tree;
    for (depth, segment) in parents.iter().enumerate() {
        match walk.get(segment) {
            None => break,
            Some(Value::Object(map)) => walk = map,
            Some(_) => {
                return Err(TreeError::PathConflict {
                    path: path.to_string(),
                    conflict: path.prefix(depth + 1).to_string(),
                })
            }
        }
    }

    let mut node = tree;
    for segment in parents {
        let child = node
            .entry(segment.clone())
            .or_insert_with(|| Value::Object(Map::new()));
        node = match child {
            Value::Object(map) => map,
            _ => {
                return Err(TreeError::PathConflict {
                    path: path.to_string(),
                    conflict: segment.clone(),
                })
            }
        };
    }
    Ok(node.insert(last.clone(), value))
}

/// Lists the path of every leaf in `tree`, depth first in key order.
///
/// A leaf is any non-mapping value, or an empty mapping.
pub fn leaf_paths(tree: &SettingsTree) -> Vec<DottedPath> {
    let mut out = Vec::new();
    collect_leaves(tree, &DottedPath::from_segments(Vec::<String>::new()), &mut out);
    out
}

fn collect_leaves(tree: &SettingsTree, prefix: &DottedPath, out: &mut Vec<DottedPath>) {
    for (key, value) in tree {
        let path = prefix.child(key.as_str());
        match value {
            Value::Object(nested) if !nested.is_empty() => collect_leaves(nested, &path, out),
            _ => out.push(path),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
