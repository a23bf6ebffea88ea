//! Component F: lookup/check, including the capitalization policy that
//! `check` (but not `check_exact`) applies on a miss.

use crate::dictionary::FlagSet;
use crate::flags::FlagId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharCase {
    /// All characters are lowercase, or the word has no case at all.
    Lower,
    /// First character uppercase, everything after is lowercase.
    Initial,
    /// Every cased character is uppercase.
    Upper,
    /// Anything else (mixed case such as `"McDonald"` or `"iPhone"`).
    Other,
}

pub fn classify_case(word: &str) -> CharCase {
    let mut chars = word.chars();
    let Some(first) = chars.next() else {
        return CharCase::Lower;
    };
    let first_upper = first.is_uppercase();
    let rest_has_lower = chars.clone().any(|c| c.is_lowercase());
    let rest_has_upper = chars.any(|c| c.is_uppercase());

    if !first_upper && !rest_has_upper {
        CharCase::Lower
    } else if first_upper && !rest_has_upper {
        CharCase::Initial
    } else if first_upper && rest_has_upper && !rest_has_lower {
        CharCase::Upper
    } else {
        CharCase::Other
    }
}

/// Renders `word` as all-lowercase.
pub fn to_lower(word: &str) -> String {
    word.to_lowercase()
}

/// Renders `word` with only its first character uppercase (used as a
/// fallback candidate for all-uppercase input, e.g. checking `"PARIS"`
/// against a dictionary entry stored as `"Paris"`).
pub fn to_initial_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => {
            let mut out = String::new();
            out.extend(first.to_uppercase());
            out.push_str(&chars.as_str().to_lowercase());
            out
        }
        None => String::new(),
    }
}

/// `has_flag` semantics: a flag that was never configured in the loaded
/// affix data fails open and is treated as absent, never as "blocking".
pub fn has_flag(flags: &FlagSet, target: Option<FlagId>) -> bool {
    match target {
        Some(flag) => flags.contains(&flag),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_case_buckets() {
        assert_eq!(classify_case("cat"), CharCase::Lower);
        assert_eq!(classify_case("Cat"), CharCase::Initial);
        assert_eq!(classify_case("CAT"), CharCase::Upper);
        assert_eq!(classify_case("CaT"), CharCase::Other);
        assert_eq!(classify_case(""), CharCase::Lower);
    }

    #[test]
    fn initial_case_rewrites_first_letter_only() {
        assert_eq!(to_initial_case("PARIS"), "Paris");
        assert_eq!(to_initial_case(""), "");
    }

    #[test]
    fn has_flag_fails_open_when_unconfigured() {
        let flags: FlagSet = Default::default();
        assert!(!has_flag(&flags, None));
    }
}
