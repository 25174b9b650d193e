//! JSON codec for settings files.
//!
//! # Decoding rules
//!
//! | File content                      | Result                        |
//! |-----------------------------------|-------------------------------|
//! | empty or JSON whitespace only     | [`Decoded::Blank`]            |
//! | valid JSON object                 | [`Decoded::Tree`]             |
//! | valid JSON, root is not an object | [`Decoded::NotAMapping`]      |
//! | malformed JSON / invalid UTF-8    | `Err(serde_json::Error)`      |
//!
//! Callers decide what a blank file or a non-object root means; the store
//! treats both as "start from an empty tree".
//!
//! # Encoding
//!
//! Trees are written pretty-printed with a trailing newline.  Indentation is
//! whatever `serde_json`'s pretty printer emits and is not part of the format.

use serde_json::Value;

use crate::domain::tree::SettingsTree;

/// Outcome of decoding the bytes of a settings file.
#[derive(Debug, Clone, PartialEq)]
pub enum Decoded {
    /// The content was a JSON object.
    Tree(SettingsTree),
    /// The content was empty or whitespace.
    Blank,
    /// The content was valid JSON whose root is not an object.
    NotAMapping {
        /// Kind of the root value, e.g. `"array"`.
        found: &'static str,
    },
}

/// Decodes the raw bytes of a settings file.
///
/// # Errors
///
/// Returns the `serde_json` error if the content is not well-formed JSON.
pub fn decode_settings(bytes: &[u8]) -> Result<Decoded, serde_json::Error> {
    if bytes
        .iter()
        .all(|b| matches!(b, b' ' | b'\t' | b'\n' | b'\r'))
    {
        return Ok(Decoded::Blank);
    }
    match serde_json::from_slice::<Value>(bytes)? {
        Value::Object(tree) => Ok(Decoded::Tree(tree)),
        other => Ok(Decoded::NotAMapping {
            found: kind_of(&other),
        }),
    }
}

/// Encodes `tree` as indented JSON followed by a newline.
///
/// # Errors
///
/// Propagates `serde_json` serialization errors.
pub fn encode_settings(tree: &SettingsTree) -> Result<Vec<u8>, serde_json::Error> {
    let mut bytes = serde_json::to_vec_pretty(tree)?;
    bytes.push(b'\n');
    Ok(bytes)
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
