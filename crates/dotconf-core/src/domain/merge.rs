//! Non-destructive defaults merging.
//!
//! For every key in the defaults tree:
//!
//! ```text
//! absent in settings              -> insert the default (whole subtree)
//! mapping in both                 -> recurse key by key
//! present, not mapping in both    -> keep the settings value
//! ```
//!
//! The merge never removes or overwrites anything already in the settings
//! tree, and never modifies the defaults tree.

use serde_json::Value;

use super::path::DottedPath;
use super::tree::SettingsTree;

/// Paths that a merge filled in from defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeReport {
    /// One entry per inserted key, in the order they were inserted.  An
    /// inserted subtree is reported once, at its root.
    pub inserted: Vec<DottedPath>,
}

impl MergeReport {
    /// Number of keys inserted.
    pub fn len(&self) -> usize {
        self.inserted.len()
    }

    /// Returns `true` if the merge changed nothing.
    pub fn is_empty(&self) -> bool {
        self.inserted.is_empty()
    }
}

/// Fills every path of `defaults` that `settings` lacks.
pub fn merge_defaults(settings: &mut SettingsTree, defaults: &SettingsTree) -> MergeReport {
    let mut report = MergeReport::default();
    merge_into(
        settings,
        defaults,
        &DottedPath::from_segments(Vec::<String>::new()),
        &mut report,
    );
    report
}

fn merge_into(
    settings: &mut SettingsTree,
    defaults: &SettingsTree,
    prefix: &DottedPath,
    report: &mut MergeReport,
) {
    for (key, default) in defaults {
        match settings.get_mut(key) {
            None => {
                settings.insert(key.clone(), default.clone());
                report.inserted.push(prefix.child(key.as_str()));
            }
            Some(Value::Object(existing)) => {
                if let Value::Object(nested) = default {
                    merge_into(existing, nested, &prefix.child(key.as_str()), report);
                }
            }
            Some(_) => {}
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tree(value: Value) -> SettingsTree {
        match value {
            Value::Object(map) => map,
            other => panic!("fixture must be an object, got {other}"),
        }
    }

    #[test]
    fn test_merge_into_empty_copies_defaults() {
        // Arrange
        let defaults = tree(json!({
            "app": {"dark_mode": true, "username": "Guest"},
            "version": "1.0"
        }));
        let mut settings = SettingsTree::new();

        // Act
        let report = merge_defaults(&mut settings, &defaults);

        // Assert
        assert_eq!(settings, defaults);
        let inserted: Vec<String> = report.inserted.iter().map(ToString::to_string).collect();
        assert_eq!(inserted, ["app", "version"]);
    }

    #[test]
    fn test_merge_recurses_into_nested_mappings() {
        let defaults = tree(json!({"app": {"dark_mode": true, "username": "Guest"}}));
        let mut settings = tree(json!({"app": {"username": "Gemini"}}));

        let report = merge_defaults(&mut settings, &defaults);

        assert_eq!(
            Value::Object(settings),
            json!({"app": {"username": "Gemini", "dark_mode": true}})
        );
        assert_eq!(report.inserted, vec![DottedPath::parse("app.dark_mode")]);
    }

    #[test]
    fn test_merge_never_overwrites_existing_scalar() {
        let defaults = tree(json!({"volume": 50, "theme": {"name": "light"}}));
        let mut settings = tree(json!({"volume": 80, "theme": {"name": "dark"}}));

        let report = merge_defaults(&mut settings, &defaults);

        assert!(report.is_empty());
        assert_eq!(
            Value::Object(settings),
            json!({"volume": 80, "theme": {"name": "dark"}})
        );
    }

    #[test]
    fn test_merge_keeps_scalar_where_default_is_mapping() {
        let defaults = tree(json!({"window": {"width": 800}}));
        let mut settings = tree(json!({"window": "maximized"}));

        let report = merge_defaults(&mut settings, &defaults);

        assert!(report.is_empty());
        assert_eq!(Value::Object(settings), json!({"window": "maximized"}));
    }

    #[test]
    fn test_merge_keeps_mapping_where_default_is_scalar() {
        let defaults = tree(json!({"window": "maximized"}));
        let mut settings = tree(json!({"window": {"width": 800}}));

        merge_defaults(&mut settings, &defaults);

        assert_eq!(Value::Object(settings), json!({"window": {"width": 800}}));
    }

    #[test]
    fn test_merge_treats_sequences_as_leaves() {
        let defaults = tree(json!({"recent": ["a", "b"]}));
        let mut settings = tree(json!({"recent": []}));

        merge_defaults(&mut settings, &defaults);

        assert_eq!(Value::Object(settings), json!({"recent": []}));
    }

    #[test]
    fn test_merge_keeps_keys_absent_from_defaults() {
        let defaults = tree(json!({"a": 1}));
        let mut settings = tree(json!({"custom": {"x": 1}}));

        merge_defaults(&mut settings, &defaults);

        assert_eq!(Value::Object(settings), json!({"custom": {"x": 1}, "a": 1}));
    }

    #[test]
    fn test_merge_twice_is_idempotent() {
        let defaults = tree(json!({"app": {"dark_mode": true}, "version": "1.0"}));
        let mut settings = SettingsTree::new();

        merge_defaults(&mut settings, &defaults);
        let second = merge_defaults(&mut settings, &defaults);

        assert!(second.is_empty());
        assert_eq!(settings, defaults);
    }

    #[test]
    fn test_merge_with_empty_defaults_changes_nothing() {
        let mut settings = tree(json!({"a": 1}));
        let report = merge_defaults(&mut settings, &SettingsTree::new());
        assert_eq!(report.len(), 0);
        assert_eq!(Value::Object(settings), json!({"a": 1}));
    }
}
