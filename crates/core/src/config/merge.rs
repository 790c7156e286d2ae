//! Merge semantics for configuration declarations.
//!
//! The two entry points mirror the two shapes of `config.set` in scripts: a
//! bulk table merge and a dot-path assignment. Both mutate the accumulator in
//! script execution order, so the last write to a key or path wins.

use super::value::{ConfigObject, ConfigValue};

/// Merge `incoming` into `root` at the top level.
///
/// Each top-level key replaces any existing value at that key wholesale;
/// nested mappings are not merged recursively.
pub fn set_top_level(root: &mut ConfigObject, incoming: ConfigObject) {
    for (key, value) in incoming {
        root.insert(key, value);
    }
}

/// Set `value` at a dot-delimited `path` inside `root`.
///
/// All segments but the last are walked as mappings, created when missing. An
/// existing intermediate that is not a mapping is overwritten with a fresh
/// one. The final segment's value replaces whatever was there before.
pub fn set_path(root: &mut ConfigObject, path: &str, value: ConfigValue) {
    let segments: Vec<&str> = path.split('.').collect();
    let Some((last, parents)) = segments.split_last() else {
        return;
    };

    let mut current = root;
    for segment in parents {
        let entry = current
            .entry((*segment).to_string())
            .or_insert_with(|| ConfigValue::Object(ConfigObject::new()));
        if !matches!(entry, ConfigValue::Object(_)) {
            *entry = ConfigValue::Object(ConfigObject::new());
        }
        let ConfigValue::Object(next) = entry else {
            unreachable!("intermediate was just replaced with a mapping");
        };
        current = next;
    }
    current.insert((*last).to_string(), value);
}

/// Look up the value at a dot-delimited `path` inside `root`.
///
/// Returns `None` when a segment is missing or a non-final segment is not a
/// mapping.
pub fn value_at<'a>(root: &'a ConfigObject, path: &str) -> Option<&'a ConfigValue> {
    let mut segments = path.split('.');
    let mut current = root.get(segments.next()?)?;
    for segment in segments {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn object(entries: Vec<(&str, ConfigValue)>) -> ConfigObject {
        entries.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
    }

    #[test]
    fn top_level_merge_replaces_wholesale() {
        let mut root = object(vec![(
            "editor",
            object(vec![("theme", "dark".into())]).into(),
        )]);

        set_top_level(
            &mut root,
            object(vec![("editor", object(vec![("font", "mono".into())]).into())]),
        );

        // Old nested content is gone, not deep-merged.
        let editor = root.get("editor").unwrap().as_object().unwrap();
        assert_eq!(editor.get("font"), Some(&"mono".into()));
        assert_eq!(editor.get("theme"), None);
    }

    #[test]
    fn top_level_merge_keeps_unrelated_keys() {
        let mut root = object(vec![("a", 1_i64.into())]);
        set_top_level(&mut root, object(vec![("b", 2_i64.into())]));
        assert_eq!(root.get("a"), Some(&1_i64.into()));
        assert_eq!(root.get("b"), Some(&2_i64.into()));
    }

    #[test]
    fn path_set_creates_intermediates() {
        let mut root = ConfigObject::new();
        set_path(&mut root, "a.b.c", 5_i64.into());
        assert_eq!(value_at(&root, "a.b.c"), Some(&5_i64.into()));
    }

    #[test]
    fn path_set_overwrites_non_mapping_intermediate() {
        let mut root = object(vec![("a", "scalar".into())]);
        set_path(&mut root, "a.b", true.into());
        assert_eq!(value_at(&root, "a.b"), Some(&true.into()));
    }

    #[test]
    fn path_set_last_write_wins() {
        let mut root = ConfigObject::new();
        set_path(&mut root, "a.b", 1_i64.into());
        set_path(&mut root, "a.b", 2_i64.into());
        assert_eq!(value_at(&root, "a.b"), Some(&2_i64.into()));
    }

    #[test]
    fn path_set_single_segment() {
        let mut root = ConfigObject::new();
        set_path(&mut root, "top", "v".into());
        assert_eq!(root.get("top"), Some(&"v".into()));
    }

    #[test]
    fn path_set_keeps_sibling_keys() {
        let mut root = ConfigObject::new();
        set_path(&mut root, "a.x", 1_i64.into());
        set_path(&mut root, "a.y", 2_i64.into());
        assert_eq!(value_at(&root, "a.x"), Some(&1_i64.into()));
        assert_eq!(value_at(&root, "a.y"), Some(&2_i64.into()));
    }

    #[test]
    fn value_at_misses() {
        let root = object(vec![("a", 1_i64.into())]);
        assert_eq!(value_at(&root, "missing"), None);
        assert_eq!(value_at(&root, "a.deeper"), None);
    }
}
