//! Text normalization applied to resume and job description text before matching

use once_cell::sync::Lazy;
use regex::Regex;

static SPACE_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r" {2,}").expect("Invalid space regex"));

/// Normalize raw document text for skill matching.
///
/// Whitespace of any kind becomes a single space, every character other than
/// ASCII letters, digits, `+`, `.`, `#` and space is dropped, and the result is
/// lower-cased. Dropping happens before runs are collapsed so that removed
/// characters never leave a double space behind, which keeps the function
/// idempotent.
pub fn normalize(raw: &str) -> String {
    let filtered: String = raw
        .chars()
        .filter_map(|c| {
            if c.is_whitespace() {
                Some(' ')
            } else if c.is_ascii_alphanumeric() || matches!(c, '+' | '.' | '#') {
                Some(c.to_ascii_lowercase())
            } else {
                None
            }
        })
        .collect();

    SPACE_RUNS.replace_all(&filtered, " ").into_owned()
}

/// Normalize optional text from an external source; absent text is empty.
pub fn normalize_opt(raw: Option<&str>) -> String {
    raw.map(normalize).unwrap_or_default()
}

/// True when the text carries no matchable content
pub fn is_blank(normalized: &str) -> bool {
    normalized.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_collapses_whitespace_and_lowercases() {
        assert_eq!(normalize("Python\t\tSQL\n\nExcel"), "python sql excel");
    }

    #[test]
    fn test_keeps_symbol_skills() {
        assert_eq!(normalize("C++, C#, Node.js!"), "c++ c# node.js");
    }

    #[test]
    fn test_strips_punctuation_and_non_ascii() {
        assert_eq!(normalize("Résumé: (Power-BI)"), "rsum powerbi");
        assert_eq!(normalize("a é b"), "a b");
    }

    #[test]
    fn test_empty_and_absent() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize_opt(None), "");
        assert!(is_blank(&normalize("   \n\t ")));
        assert!(!is_blank(&normalize("sql")));
    }

    proptest! {
        #[test]
        fn normalize_is_idempotent(input in "\\PC*") {
            let once = normalize(&input);
            prop_assert_eq!(normalize(&once), once);
        }

        #[test]
        fn normalize_output_alphabet(input in "\\PC*") {
            let out = normalize(&input);
            let allowed = out.chars().all(|c| {
                c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '+' | '.' | '#' | ' ')
            });
            prop_assert!(allowed, "unexpected character in {:?}", out);
            prop_assert!(!out.contains("  "));
        }
    }
}
