//! Placeholder availability oracle
//!
//! Stands in for a registrar lookup. A name is reported available when its
//! normalized form is longer than five characters, has an even length, and
//! contains no run of three or more consecutive vowels. These rules have no
//! relationship to real domain registries.

use regex::Regex;
use std::sync::LazyLock;

static VOWEL_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[aeiou]{3,}").expect("vowel-run pattern is valid"));

/// Trim and lowercase a candidate name
pub fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Deterministic availability verdict for a candidate name
pub fn is_available(name: &str) -> bool {
    let name = normalize(name);
    let length = name.chars().count();

    length > 5 && length % 2 == 0 && !VOWEL_RUN.is_match(&name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_names_are_unavailable() {
        assert!(!is_available("ab"));
        assert!(!is_available("abcd"));
        // length 5 is odd and not > 5
        assert!(!is_available("abcde"));
    }

    #[test]
    fn test_even_long_names_without_vowel_runs() {
        assert!(is_available("abcdef"));
        assert!(is_available("Stripe"));
        assert!(is_available("GrainWorks"));
    }

    #[test]
    fn test_odd_lengths_are_unavailable() {
        assert!(!is_available("abcdefg"));
        assert!(!is_available("Notion1"));
    }

    #[test]
    fn test_vowel_runs_are_unavailable() {
        assert!(!is_available("aeiouville"));
        assert!(!is_available("beautyco"));
        // two vowels in a row are fine
        assert!(is_available("nuevos"));
    }

    #[test]
    fn test_normalization() {
        assert!(is_available("  ABCDEF  "));
        assert!(!is_available("  AEIOUX  "));
        assert_eq!(normalize("  GrainWorks "), "grainworks");
    }

    #[test]
    fn test_verdicts_are_stable() {
        for name in ["blvnk", "nuvem", "Airtable", "Vercel", "Canva", "Figma"] {
            let first = is_available(name);
            for _ in 0..5 {
                assert_eq!(is_available(name), first);
            }
        }
    }
}
