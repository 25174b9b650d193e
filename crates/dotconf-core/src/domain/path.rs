//! Dotted-path addressing.
//!
//! A [`DottedPath`] names one location in a settings tree as a list of map
//! keys, outermost first.  The string form joins the keys with `.`, so
//! `"app.window.width"` means `tree["app"]["window"]["width"]`.
//!
//! Keys that themselves contain `.` cannot be addressed through the string
//! form.  The segment form ([`DottedPath::from_segments`]) stores keys
//! verbatim and can reach them.

use std::fmt;

/// Separator between keys in the string form of a path.
pub const SEPARATOR: char = '.';

/// A location in a settings tree, as an ordered list of keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DottedPath {
    segments: Vec<String>,
}

impl DottedPath {
    /// Splits `path` on [`SEPARATOR`].
    ///
    /// Splitting is literal: `"a..b"` yields the three keys `"a"`, `""`, `"b"`,
    /// and `""` yields the single empty key.  Empty keys are legal JSON.
    pub fn parse(path: &str) -> Self {
        Self {
            segments: path.split(SEPARATOR).map(str::to_owned).collect(),
        }
    }

    /// Builds a path from individual keys without splitting them.
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    /// The keys of this path, outermost first.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Number of keys in the path.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns `true` if the path has no keys and so addresses nothing.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns a new path with `key` appended.
    pub fn child(&self, key: impl Into<String>) -> Self {
        let mut segments = Vec::with_capacity(self.segments.len() + 1);
        segments.extend(self.segments.iter().cloned());
        segments.push(key.into());
        Self { segments }
    }

    /// Returns the path made of the first `len` keys.
    pub fn prefix(&self, len: usize) -> Self {
        Self {
            segments: self.segments[..len.min(self.segments.len())].to_vec(),
        }
    }
}

impl fmt::Display for DottedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                write!(f, "{SEPARATOR}")?;
            }
            f.write_str(segment)?;
        }
        Ok(())
    }
}

impl From<&str> for DottedPath {
    fn from(path: &str) -> Self {
        Self::parse(path)
    }
}

impl From<String> for DottedPath {
    fn from(path: String) -> Self {
        Self::parse(&path)
    }
}

impl From<&String> for DottedPath {
    fn from(path: &String) -> Self {
        Self::parse(path)
    }
}

impl From<&DottedPath> for DottedPath {
    fn from(path: &DottedPath) -> Self {
        path.clone()
    }
}

impl From<Vec<String>> for DottedPath {
    fn from(segments: Vec<String>) -> Self {
        Self { segments }
    }
}

impl From<&[&str]> for DottedPath {
    fn from(segments: &[&str]) -> Self {
        Self::from_segments(segments.iter().copied())
    }
}

impl<const N: usize> From<[&str; N]> for DottedPath {
    fn from(segments: [&str; N]) -> Self {
        Self::from_segments(segments)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_splits_on_dots() {
        let path = DottedPath::parse("app.window.width");
        assert_eq!(path.segments(), ["app", "window", "width"]);
        assert_eq!(path.len(), 3);
    }

    #[test]
    fn test_parse_single_key_has_one_segment() {
        let path = DottedPath::parse("version");
        assert_eq!(path.segments(), ["version"]);
    }

    #[test]
    fn test_parse_keeps_empty_segments() {
        assert_eq!(DottedPath::parse("a..b").segments(), ["a", "", "b"]);
        assert_eq!(DottedPath::parse("").segments(), [""]);
        assert!(!DottedPath::parse("").is_empty());
    }

    #[test]
    fn test_from_segments_does_not_split() {
        // Arrange / Act
        let path = DottedPath::from_segments(["hosts", "example.com"]);

        // Assert
        assert_eq!(path.segments(), ["hosts", "example.com"]);
        assert_eq!(path.len(), 2);
    }

    #[test]
    fn test_from_no_segments_is_empty() {
        let path = DottedPath::from_segments(Vec::<String>::new());
        assert!(path.is_empty());
    }

    #[test]
    fn test_display_joins_with_separator() {
        let path = DottedPath::from_segments(["app", "dark_mode"]);
        assert_eq!(path.to_string(), "app.dark_mode");
    }

    #[test]
    fn test_child_and_prefix() {
        let base = DottedPath::parse("a.b");
        assert_eq!(base.child("c"), DottedPath::parse("a.b.c"));
        assert_eq!(base.child("c").prefix(1), DottedPath::parse("a"));
        // Over-long prefixes clamp to the whole path.
        assert_eq!(base.prefix(10), base);
    }

    #[test]
    fn test_conversions_agree() {
        let expected = DottedPath::parse("x.y");
        assert_eq!(DottedPath::from("x.y"), expected);
        assert_eq!(DottedPath::from("x.y".to_string()), expected);
        assert_eq!(DottedPath::from(["x", "y"]), expected);
        assert_eq!(DottedPath::from(&["x", "y"][..]), expected);
        assert_eq!(DottedPath::from(&expected), expected);
    }
}
