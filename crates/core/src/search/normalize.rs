//! Accent- and case-insensitive text normalization.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::canonical_combining_class;

/// Normalizes text for fuzzy comparison.
///
/// Applies compatibility decomposition (NFKD), drops combining marks and
/// case-folds the result, so `"Élodie"` and `"elodie"` compare equal.
#[must_use]
pub fn normalize_text(value: &str) -> String {
    let stripped: String = value
        .nfkd()
        .filter(|c| canonical_combining_class(*c) == 0)
        .collect();
    fold_case(&stripped)
}

/// Full case folding on top of [`str::to_lowercase`].
///
/// Covers the folds where lowercasing and case folding disagree for names:
/// sharp s expands to `ss` and final sigma folds to the medial form.
#[must_use]
pub fn fold_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            'ß' | 'ẞ' => out.push_str("ss"),
            'ς' | 'Σ' => out.push('σ'),
            _ => out.extend(c.to_lowercase()),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Alice", "alice")]
    #[case("Élodie", "elodie")]
    #[case("José Núñez", "jose nunez")]
    #[case("Straße", "strasse")]
    #[case("ﬁona", "fiona")]
    #[case("ΟΔΥΣΣΕΥΣ", "οδυσσευσ")]
    #[case("", "")]
    fn test_normalize_text(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(normalize_text(input), expected);
    }

    #[test]
    fn test_fold_case_keeps_marks() {
        assert_eq!(fold_case("ÉLODIE"), "élodie");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let once = normalize_text("Ångström Müller");
        assert_eq!(normalize_text(&once), once);
    }
}
