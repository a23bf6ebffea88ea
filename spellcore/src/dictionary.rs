//! Component D (parsing half): turns `.dic` source text into dictionary
//! stems, each with its word text and the flag set attached after the
//! `/` separator. Expansion of stems into surface forms is
//! [`crate::expand`]'s job; this module only tokenizes lines.

use crate::error::{DictionaryError, ParseNote};
use crate::flags::{self, FlagFormat, FlagId};
use hashbrown::HashSet;

pub type FlagSet = HashSet<FlagId>;

#[derive(Debug, Clone)]
pub struct DicStem {
    pub word: String,
    pub flags: FlagSet,
}

/// Parses dictionary source text. The first non-blank line is an advisory
/// word count and is not validated against the actual number of entries
/// (hunspell itself treats it as a hint, not a contract). Lines prefixed
/// with a tab are comments. A backslash immediately before `/` escapes it
/// so the word itself may contain a literal slash.
pub fn parse_dictionary(
    format: FlagFormat,
    text: &str,
) -> Result<(Vec<DicStem>, Vec<ParseNote>), DictionaryError> {
    let span = tracing::debug_span!("parse_dictionary");
    let _enter = span.enter();

    let mut notes = Vec::new();
    let mut stems = Vec::new();
    let mut seen_count_line = false;

    for (idx, raw_line) in text.lines().enumerate() {
        let line_no = idx + 1;
        if raw_line.starts_with('\t') {
            continue;
        }
        let line = raw_line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }
        if !seen_count_line {
            seen_count_line = true;
            if line.trim().parse::<u64>().is_ok() {
                continue;
            }
            notes.push(ParseNote::info(
                line_no,
                "first dictionary line is not a numeric count, treating it as a word",
            ));
        }

        let (word, flag_text) = split_word_and_flags(line);
        if word.is_empty() {
            return Err(DictionaryError::EmptyWord { line: line_no });
        }
        let flag_vec = match flag_text {
            Some(text) => flags::parse_flags(format, line_no, text).map_err(|_| DictionaryError::MalformedFlag {
                line: line_no,
                word: word.clone(),
                value: text.to_string(),
            })?,
            None => Vec::new(),
        };
        stems.push(DicStem {
            word,
            flags: flag_vec.into_iter().collect(),
        });
    }

    Ok((stems, notes))
}

/// Splits `word/flags`, honoring a backslash-escaped slash as part of the
/// word text rather than a separator.
fn split_word_and_flags(line: &str) -> (String, Option<&str>) {
    let bytes = line.as_bytes();
    for (i, b) in bytes.iter().enumerate() {
        if *b == b'/' && (i == 0 || bytes[i - 1] != b'\\') {
            let word = line[..i].replace("\\/", "/");
            return (word, Some(&line[i + 1..]));
        }
    }
    (line.replace("\\/", "/"), None)
}
