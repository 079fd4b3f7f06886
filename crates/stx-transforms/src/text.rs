//! Character-level text transforms.

use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Default substitute used by [`strip_punctuation`]: punctuation is deleted.
pub const DEFAULT_PUNCTUATION_REPLACEMENT: &str = "";

/// A lowercase-or-digit run followed by a single uppercase letter.
static CAMEL_BOUNDARY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([a-z0-9]+)([A-Z])").expect("camel boundary pattern is valid")
});

/// Normalizes accented characters to their ASCII base letters.
///
/// The value is decomposed (NFKD) and every character that is still outside
/// ASCII afterwards is dropped, so the result is always pure ASCII.
///
/// # Examples
///
/// ```
/// use stx_transforms::normalize;
///
/// assert_eq!(normalize("Crème Brûlée"), "Creme Brulee");
/// assert_eq!(normalize("ﬁancé"), "fiance");
/// assert_eq!(normalize("Straße"), "Strae");
/// ```
pub fn normalize(value: &str) -> String {
    value.nfkd().filter(char::is_ascii).collect()
}

/// Replaces every ASCII punctuation character with `replace`.
///
/// The punctuation set is ``!"#$%&'()*+,-./:;<=>?@[\]^_`{|}~``. Pass
/// [`DEFAULT_PUNCTUATION_REPLACEMENT`] to delete punctuation.
///
/// # Examples
///
/// ```
/// use stx_transforms::strip_punctuation;
///
/// assert_eq!(strip_punctuation("a,b.c!", ""), "abc");
/// assert_eq!(strip_punctuation("a,b", "_"), "a_b");
/// ```
pub fn strip_punctuation(value: &str, replace: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        if ch.is_ascii_punctuation() {
            out.push_str(replace);
        } else {
            out.push(ch);
        }
    }
    out
}

/// Applies literal `search -> replace` pairs one after another.
///
/// Replacements run sequentially in the order of `mapping`, each on the
/// output of the previous one. A later rule therefore sees the text produced
/// by earlier rules:
///
/// ```
/// use stx_transforms::multi_replace;
///
/// assert_eq!(multi_replace("abc", [("a", "b"), ("b", "c")]), "ccc");
/// assert_eq!(multi_replace("abc", [("b", "c"), ("a", "b")]), "bcc");
/// ```
pub fn multi_replace<I, K, V>(value: &str, mapping: I) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    mapping
        .into_iter()
        .fold(value.to_string(), |acc, (search, replace)| {
            acc.replace(search.as_ref(), replace.as_ref())
        })
}

/// Splits `CamelCase` words by inserting a space before each capital that
/// follows a lowercase letter or digit.
///
/// Matching is a single leftmost-first pass, so runs of capitals are not
/// split from each other.
///
/// # Examples
///
/// ```
/// use stx_transforms::split_camel;
///
/// assert_eq!(split_camel("CamelCaseValue"), "Camel Case Value");
/// assert_eq!(split_camel("version2Beta"), "version2 Beta");
/// ```
pub fn split_camel(value: &str) -> String {
    CAMEL_BOUNDARY.replace_all(value, "${1} ${2}").into_owned()
}

/// Lowercases the value and replaces every space with an underscore.
///
/// # Examples
///
/// ```
/// use stx_transforms::snake_case;
///
/// assert_eq!(snake_case("Camel Case Value"), "camel_case_value");
/// assert_eq!(snake_case(" One Two "), "_one_two_");
/// ```
pub fn snake_case(value: &str) -> String {
    value.to_lowercase().replace(' ', "_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_accents() {
        assert_eq!(normalize("àéîõü"), "aeiou");
        assert_eq!(normalize("Ñandú"), "Nandu");
    }

    #[test]
    fn test_normalize_drops_non_decomposable() {
        assert_eq!(normalize("Æsir"), "sir");
        assert_eq!(normalize("日本 text"), " text");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_normalize_compatibility_forms() {
        // Full-width letters and ligatures decompose to ASCII.
        assert_eq!(normalize("ＡＢＣ"), "ABC");
        assert_eq!(normalize("ﬀ"), "ff");
    }

    #[test]
    fn test_strip_punctuation_full_set() {
        let all = "!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";
        assert_eq!(strip_punctuation(all, ""), "");
        assert_eq!(strip_punctuation(all, "x").len(), 32);
    }

    #[test]
    fn test_strip_punctuation_keeps_other_chars() {
        assert_eq!(strip_punctuation("héllo wörld 42", ""), "héllo wörld 42");
        // Non-ASCII punctuation is not part of the set.
        assert_eq!(strip_punctuation("«quoted»", ""), "«quoted»");
    }

    #[test]
    fn test_strip_punctuation_multi_char_replacement() {
        assert_eq!(strip_punctuation("a-b", "--"), "a--b");
        assert_eq!(
            strip_punctuation("x.y", DEFAULT_PUNCTUATION_REPLACEMENT),
            "xy"
        );
    }

    #[test]
    fn test_multi_replace_sequential() {
        assert_eq!(multi_replace("abc", [("a", "b"), ("b", "c")]), "ccc");
    }

    #[test]
    fn test_multi_replace_empty_mapping() {
        let mapping: Vec<(&str, &str)> = Vec::new();
        assert_eq!(multi_replace("unchanged", mapping), "unchanged");
    }

    #[test]
    fn test_multi_replace_owned_pairs() {
        let mapping = vec![("&".to_string(), " and ".to_string())];
        assert_eq!(multi_replace("salt&pepper", mapping), "salt and pepper");
    }

    #[test]
    fn test_split_camel_runs_of_capitals() {
        assert_eq!(split_camel("getHTTPResponse"), "get HTTPResponse");
        assert_eq!(split_camel("ABC"), "ABC");
        assert_eq!(split_camel("lowercase"), "lowercase");
    }

    #[test]
    fn test_split_camel_existing_spaces() {
        assert_eq!(split_camel("already Split"), "already Split");
        assert_eq!(split_camel("aB cD"), "a B c D");
    }

    #[test]
    fn test_snake_case() {
        assert_eq!(snake_case("Hello World"), "hello_world");
        assert_eq!(snake_case("ALL  CAPS"), "all__caps");
        assert_eq!(snake_case("already_snake"), "already_snake");
    }
}
