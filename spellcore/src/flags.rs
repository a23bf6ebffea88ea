//! Component A: flag-code tokenizer.
//!
//! Hunspell affix files name flags in one of three schemes, selected by the
//! `FLAG` directive: a single character per flag (the default), a "long"
//! scheme where every flag is exactly two characters, or a numeric scheme
//! where flags are decimal integers separated by commas. This module turns
//! the raw flag text attached to a rule, a word, or a directive into a
//! normalized [`FlagId`] regardless of which scheme is active.

use crate::error::AffixError;

/// The flag-naming scheme in effect for a given affix file, set by the
/// `FLAG` directive (default is single-character).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlagFormat {
    #[default]
    Single,
    Long,
    Number,
}

/// An opaque, normalized flag identifier. Two flags compare equal iff they
/// were written identically in the source under the format active at parse
/// time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FlagId(u32);

impl FlagId {
    fn from_single(c: char) -> FlagId {
        FlagId(c as u32)
    }

    fn from_long(a: char, b: char) -> FlagId {
        FlagId(((a as u32) << 16) | (b as u32))
    }

    fn from_number(n: u32) -> FlagId {
        // Tag numeric flags so they can never collide with single/long
        // ids constructed under a different scheme in the same process.
        FlagId(n | (1 << 31))
    }
}

/// Parses a raw flag-token string (e.g. the value after a `/` on a
/// dictionary word, or the argument to a simple boolean-flag directive)
/// into the list of flags it names, according to `format`.
pub fn parse_flags(format: FlagFormat, line: usize, text: &str) -> Result<Vec<FlagId>, AffixError> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(Vec::new());
    }
    match format {
        FlagFormat::Single => Ok(text.chars().map(FlagId::from_single).collect()),
        FlagFormat::Long => {
            let chars: Vec<char> = text.chars().collect();
            if chars.len() % 2 != 0 {
                return Err(AffixError::MalformedFlag {
                    line,
                    value: text.to_string(),
                });
            }
            Ok(chars
                .chunks(2)
                .map(|pair| FlagId::from_long(pair[0], pair[1]))
                .collect())
        }
        FlagFormat::Number => text
            .split(',')
            .map(|tok| {
                tok.trim()
                    .parse::<u32>()
                    .map(FlagId::from_number)
                    .map_err(|_| AffixError::MalformedFlag {
                        line,
                        value: tok.to_string(),
                    })
            })
            .collect(),
    }
}

/// Parses a single flag token, e.g. the argument of `NEEDAFFIX X`. Errors
/// if the text names zero or more than one flag.
pub fn parse_single_flag(format: FlagFormat, line: usize, text: &str) -> Result<FlagId, AffixError> {
    let flags = parse_flags(format, line, text)?;
    match flags.as_slice() {
        [only] => Ok(*only),
        _ => Err(AffixError::MalformedFlag {
            line,
            value: text.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_char_flags() {
        let flags = parse_flags(FlagFormat::Single, 1, "AB").unwrap();
        assert_eq!(flags.len(), 2);
        assert_ne!(flags[0], flags[1]);
    }

    #[test]
    fn long_flags_pair_up() {
        let flags = parse_flags(FlagFormat::Long, 1, "AaBb").unwrap();
        assert_eq!(flags.len(), 2);
        assert_eq!(flags[0], FlagId::from_long('A', 'a'));
        assert_eq!(flags[1], FlagId::from_long('B', 'b'));
    }

    #[test]
    fn long_flags_reject_odd_length() {
        assert!(parse_flags(FlagFormat::Long, 1, "Aa B").is_err() || parse_flags(FlagFormat::Long, 1, "AaB").is_err());
    }

    #[test]
    fn numeric_flags_split_on_comma() {
        let flags = parse_flags(FlagFormat::Number, 1, "1,2,30").unwrap();
        assert_eq!(flags, vec![FlagId::from_number(1), FlagId::from_number(2), FlagId::from_number(30)]);
    }

    #[test]
    fn numeric_flags_reject_garbage() {
        assert!(parse_flags(FlagFormat::Number, 1, "1,x").is_err());
    }

    #[test]
    fn empty_text_is_no_flags() {
        assert_eq!(parse_flags(FlagFormat::Single, 1, "").unwrap(), vec![]);
    }
}
