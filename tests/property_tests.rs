//! Property-based tests for the config document.
//!
//! These tests use proptest to verify invariants hold across
//! randomly generated keys and values.

use proptest::prelude::*;

use reeve_cli::core::config::{ConfigDocument, ConfigError, ConfigStore, ConfigValue, TypeHint};
use reeve_cli::core::types::KeyPath;

/// Strategy for a single key segment.
fn segment() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_-]{0,7}"
}

/// Strategy for dotted keys of one to four segments.
fn key_path() -> impl Strategy<Value = KeyPath> {
    prop::collection::vec(segment(), 1..=4)
        .prop_map(|segments| KeyPath::new(segments.join(".")).unwrap())
}

/// Strategy for scalar values of every kind.
fn scalar() -> impl Strategy<Value = ConfigValue> {
    prop_oneof![
        "[ -~]{0,16}".prop_map(ConfigValue::String),
        any::<bool>().prop_map(ConfigValue::Boolean),
        any::<i64>().prop_map(ConfigValue::from),
        (-1.0e9f64..1.0e9).prop_map(ConfigValue::from),
    ]
}

proptest! {
    /// A value that was set can be read back.
    #[test]
    fn set_then_get(key in key_path(), value in scalar()) {
        let mut doc = ConfigDocument::new();
        doc.set(&key, value.clone()).unwrap();
        prop_assert_eq!(doc.get(&key).unwrap(), &value);
    }

    /// Unsetting a value makes it unset again.
    #[test]
    fn set_then_unset(key in key_path(), value in scalar()) {
        let mut doc = ConfigDocument::new();
        doc.set(&key, value).unwrap();
        doc.unset(&key).unwrap();
        let err = doc.get(&key).unwrap_err();
        prop_assert!(err.is_not_set());
    }

    /// A scalar never replaces a section, and the section survives.
    #[test]
    fn scalar_over_section_conflicts(
        parent in segment(),
        child in segment(),
        inner in scalar(),
        outer in scalar(),
    ) {
        let nested = KeyPath::new(format!("{}.{}", parent, child)).unwrap();
        let parent = KeyPath::new(parent).unwrap();

        let mut doc = ConfigDocument::new();
        doc.set(&nested, inner.clone()).unwrap();
        let before = doc.clone();

        let err = doc.set(&parent, outer).unwrap_err();
        let is_section_err = matches!(err, ConfigError::IsASection { .. });
        prop_assert!(is_section_err);
        prop_assert_eq!(&doc, &before);
        prop_assert_eq!(doc.get(&nested).unwrap(), &inner);
    }

    /// A key never descends through a scalar.
    #[test]
    fn section_under_scalar_conflicts(
        parent in segment(),
        child in segment(),
        outer in scalar(),
        inner in scalar(),
    ) {
        let nested = KeyPath::new(format!("{}.{}", parent, child)).unwrap();
        let parent = KeyPath::new(parent).unwrap();

        let mut doc = ConfigDocument::new();
        doc.set(&parent, outer.clone()).unwrap();

        let err = doc.set(&nested, inner).unwrap_err();
        prop_assert!(err.is_conflict());
        prop_assert_eq!(doc.get(&parent).unwrap(), &outer);
    }

    /// Serialized documents parse back to the same tree.
    #[test]
    fn toml_round_trip(entries in prop::collection::vec((key_path(), scalar()), 0..8)) {
        let mut doc = ConfigDocument::new();
        for (key, value) in entries {
            // Conflicting keys are skipped; the rest still builds a valid tree.
            let _ = doc.set(&key, value);
        }
        let text = doc.to_toml_string().unwrap();
        let parsed = ConfigDocument::from_toml_str(&text).unwrap();
        prop_assert_eq!(parsed, doc);
    }

    /// Auto-coercion of integers reads back as the same number.
    #[test]
    fn auto_coerces_integers(n in any::<i64>()) {
        let value = TypeHint::Auto.coerce(&n.to_string()).unwrap();
        prop_assert_eq!(value, ConfigValue::from(n));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// The store file reloads to the document that was written.
    #[test]
    fn store_persists_every_set(entries in prop::collection::vec((key_path(), "[a-z]{1,8}"), 1..6)) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".reevecli");

        let mut store = ConfigStore::open(&path).unwrap();
        for (key, value) in &entries {
            let _ = store.set(key.as_str(), value, TypeHint::String);
        }

        let reloaded = ConfigStore::open(&path).unwrap();
        prop_assert_eq!(reloaded.list(), store.list());
    }
}
