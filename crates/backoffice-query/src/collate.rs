//! Locale-aware string ordering.
//!
//! Approximates the default collation a browser applies for
//! `localeCompare`: letters compare by base form first (accents and case
//! are ignored), then lowercase sorts before uppercase, then raw code
//! points decide.

use std::cmp::Ordering;

use deunicode::deunicode;

/// Compares two strings for display ordering.
///
/// ```
/// use std::cmp::Ordering;
/// use backoffice_query::collate::locale_cmp;
///
/// assert_eq!(locale_cmp("apple", "Banana"), Ordering::Less);
/// assert_eq!(locale_cmp("Émile", "Eve"), Ordering::Less);
/// assert_eq!(locale_cmp("a", "A"), Ordering::Less);
/// ```
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    base_key(a)
        .cmp(&base_key(b))
        .then_with(|| case_cmp(a, b))
        .then_with(|| a.cmp(b))
}

/// Transliterated, lowercased form used as the primary sort key.
fn base_key(s: &str) -> String {
    deunicode(s).to_lowercase()
}

/// Orders by the first position where the strings differ only in case.
fn case_cmp(a: &str, b: &str) -> Ordering {
    for (ca, cb) in a.chars().zip(b.chars()) {
        if ca == cb {
            continue;
        }
        return match (ca.is_lowercase(), cb.is_lowercase()) {
            (true, false) if cb.is_uppercase() => Ordering::Less,
            (false, true) if ca.is_uppercase() => Ordering::Greater,
            _ => Ordering::Equal,
        };
    }
    Ordering::Equal
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ignores_case_at_primary_level() {
        assert_eq!(locale_cmp("alpha", "Beta"), Ordering::Less);
        assert_eq!(locale_cmp("Zeta", "alpha"), Ordering::Greater);
    }

    #[test]
    fn lowercase_first_on_case_tie() {
        assert_eq!(locale_cmp("john", "John"), Ordering::Less);
        assert_eq!(locale_cmp("John", "john"), Ordering::Greater);
    }

    #[test]
    fn accents_sort_with_base_letter() {
        // Raw code points would put "Émile" after every ASCII name.
        assert_eq!(locale_cmp("Émile", "Frank"), Ordering::Less);
        assert_eq!(locale_cmp("e", "é"), Ordering::Less);
    }

    #[test]
    fn identical_strings_are_equal() {
        assert_eq!(locale_cmp("Jane Smith", "Jane Smith"), Ordering::Equal);
    }

    #[test]
    fn prefix_sorts_first() {
        assert_eq!(locale_cmp("Yoga", "Yoga Mat"), Ordering::Less);
    }
}
