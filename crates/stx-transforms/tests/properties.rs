//! Property tests for the string transforms.

use proptest::prelude::*;
use stx_transforms::{
    DEFAULT_HASH_ALGORITHM, hash_string, multi_replace, normalize, snake_case, split_camel,
    strip_punctuation,
};

/// Printable ASCII plus a handful of accented Latin letters.
fn text() -> impl Strategy<Value = String> {
    "[ -~àéîõüçñÀÉÎÕÜÇÑ]{0,40}"
}

fn assert_snake_shape(value: &str) {
    assert!(!value.contains(' '), "space in {value:?}");
    assert!(!value.chars().any(char::is_uppercase), "uppercase in {value:?}");
}

proptest! {
    #[test]
    fn snake_case_output_has_no_spaces_or_capitals(s in text()) {
        assert_snake_shape(&snake_case(&s));
        assert_snake_shape(&snake_case(&normalize(&s)));
        assert_snake_shape(&snake_case(&strip_punctuation(&s, " ")));
        assert_snake_shape(&snake_case(&split_camel(&s)));
        assert_snake_shape(&snake_case(&multi_replace(&s, [("a", "B C")])));
        assert_snake_shape(&snake_case(&hash_string(&s, DEFAULT_HASH_ALGORITHM).unwrap()));
    }

    #[test]
    fn snake_case_is_idempotent(s in text()) {
        let once = snake_case(&s);
        prop_assert_eq!(snake_case(&once), once);
    }

    #[test]
    fn normalize_yields_ascii(s in text()) {
        prop_assert!(normalize(&s).is_ascii());
    }

    #[test]
    fn normalize_keeps_ascii_input(s in "[ -~]{0,40}") {
        prop_assert_eq!(normalize(&s), s);
    }

    #[test]
    fn strip_punctuation_removes_all_punctuation(s in text()) {
        prop_assert!(!strip_punctuation(&s, "").chars().any(|c| c.is_ascii_punctuation()));
    }

    #[test]
    fn split_camel_only_adds_spaces(s in text()) {
        let split = split_camel(&s);
        prop_assert_eq!(split.replace(' ', ""), s.replace(' ', ""));
    }
}
