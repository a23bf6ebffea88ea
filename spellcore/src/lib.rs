//! A hunspell-compatible spellchecking core.
//!
//! [`Dictionary::from_sources`] takes two decoded text blobs — affix
//! source and dictionary source — and builds an immutable dictionary that
//! answers `check`, `check_exact`, and `suggest` queries. Construction
//! does all the work (flag parsing, affix expansion, compound-rule
//! compilation); queries afterward are pure table lookups, never
//! recursive backtracking.
//!
//! No filesystem access, environment variables, or network calls happen
//! in this crate: resource loading is the caller's job (see
//! `spellcore_cli` and `spellcore_wasm` for two different callers).

pub mod affix;
pub mod compound;
pub mod condition;
pub mod dictionary;
pub mod error;
pub mod expand;
pub mod flags;
pub mod lookup;
pub mod suggest;

use affix::AffixSettings;
use compound::CompoundRuleSet;
use dictionary::FlagSet;
use hashbrown::HashMap;
use hashbrown::HashSet;
use thiserror::Error;

pub use error::{AffixError, DictionaryError, NoteLevel, ParseNote};
pub use flags::{FlagFormat, FlagId};

#[derive(Debug, Error)]
pub enum BuildError {
    #[error(transparent)]
    Affix(#[from] AffixError),
    #[error(transparent)]
    Dictionary(#[from] DictionaryError),
}

/// An immutable, constructed spellchecking dictionary for one language.
#[derive(Debug)]
pub struct Dictionary {
    settings: AffixSettings,
    table: HashMap<String, FlagSet>,
    compound_rules: CompoundRuleSet,
    alphabet: Vec<char>,
}

impl Dictionary {
    /// Builds a dictionary from affix (`.aff`) and word-list (`.dic`)
    /// source text. Returns the dictionary plus any tolerated anomalies
    /// collected while parsing; a [`BuildError`] is only raised for
    /// genuinely malformed input (see `error` module).
    pub fn from_sources(affix_text: &str, dictionary_text: &str) -> Result<(Dictionary, Vec<ParseNote>), BuildError> {
        let span = tracing::info_span!("build_dictionary");
        let _enter = span.enter();

        let (affix_data, mut notes) = affix::parse_affix(affix_text)?;
        let (stems, dic_notes) = dictionary::parse_dictionary(affix_data.settings.flag_format, dictionary_text)?;
        notes.extend(dic_notes);

        let mut table: HashMap<String, FlagSet> = HashMap::new();
        let mut alphabet_set: HashSet<char> = HashSet::new();

        {
            let span = tracing::debug_span!("expand_stems", count = stems.len());
            let _enter = span.enter();
            for stem in &stems {
                alphabet_set.extend(stem.word.chars());
                for (surface, flags) in expand::expand_stem(&stem.word, &stem.flags, &affix_data) {
                    alphabet_set.extend(surface.chars());
                    table.entry(surface).or_default().extend(flags);
                }
            }
        }
        alphabet_set.extend(affix_data.settings.try_string.chars());

        if let Some(forbidden) = affix_data.settings.forbidden_word {
            let forbidden_words: Vec<String> = table
                .iter()
                .filter(|(_, flags)| flags.contains(&forbidden))
                .map(|(word, _)| word.clone())
                .collect();
            for word in forbidden_words {
                table.remove(&word);
                notes.push(ParseNote::info(0, format!("pruned forbidden surface form {word:?}")));
            }
        }

        let compound_rules = CompoundRuleSet::compile(
            &affix_data.settings.compound_rule_patterns,
            affix_data.settings.flag_format,
        )?;

        let mut alphabet: Vec<char> = alphabet_set.into_iter().collect();
        alphabet.sort_unstable();

        for note in &notes {
            note.emit();
        }

        Ok((
            Dictionary {
                settings: affix_data.settings,
                table,
                compound_rules,
                alphabet,
            },
            notes,
        ))
    }

    /// Exact lookup: the word (or a valid compound built from dictionary
    /// words) exists verbatim. No capitalization fallback.
    pub fn check_exact(&self, word: &str) -> bool {
        if let Some(flags) = self.table.get(word) {
            // A word marked ONLYINCOMPOUND is a valid dictionary entry
            // only when it takes part in a compound, never standing
            // alone.
            if !lookup::has_flag(flags, self.settings.only_in_compound) {
                return true;
            }
        }
        self.compound_check(word)
    }

    /// Lookup with the capitalization policy: an initial-capital or
    /// all-uppercase query also matches a lowercase dictionary entry,
    /// unless that entry is marked KEEPCASE. Mixed-case input that isn't
    /// present verbatim is rejected (see `SPEC_FULL.md` Open Question 2).
    pub fn check(&self, word: &str) -> bool {
        if self.check_exact(word) {
            return true;
        }
        match lookup::classify_case(word) {
            lookup::CharCase::Lower | lookup::CharCase::Other => false,
            lookup::CharCase::Initial => self.case_insensitive_hit(&lookup::to_lower(word)),
            lookup::CharCase::Upper => {
                self.case_insensitive_hit(&lookup::to_lower(word))
                    || self.case_insensitive_hit(&lookup::to_initial_case(word))
            }
        }
    }

    /// Suggests up to `limit` replacement words for a query `check`
    /// rejects. Ranking and candidate generation are described in
    /// `suggest`.
    pub fn suggest(&self, word: &str, limit: usize) -> Vec<String> {
        suggest::suggest(self, &self.settings.rep_pairs, &self.alphabet, word, limit)
    }

    fn case_insensitive_hit(&self, candidate: &str) -> bool {
        match self.table.get(candidate) {
            Some(flags) => {
                !lookup::has_flag(flags, self.settings.keep_case)
                    && !lookup::has_flag(flags, self.settings.only_in_compound)
            }
            None => false,
        }
    }

    fn compound_check(&self, word: &str) -> bool {
        if self.compound_rules.is_empty() || word.is_empty() {
            return false;
        }
        // COMPOUNDMIN gates the whole candidate word once, before any
        // rule is tried at all; it is not a per-constituent floor, so a
        // compound may still be built out of parts shorter than it.
        if word.chars().count() < self.settings.compound_min.max(1) as usize {
            return false;
        }
        let mut parts = Vec::new();
        self.try_compound_split(word, &mut parts)
    }

    fn try_compound_split<'a>(&'a self, remaining: &str, parts: &mut Vec<&'a FlagSet>) -> bool {
        if remaining.is_empty() {
            return !parts.is_empty() && self.compound_rules.matches(parts);
        }
        let char_indices: Vec<usize> = remaining.char_indices().map(|(i, _)| i).collect();
        let char_count = char_indices.len();
        for end in 1..=char_count {
            let byte_end = if end == char_count {
                remaining.len()
            } else {
                char_indices[end]
            };
            let candidate = &remaining[..byte_end];
            let Some(flags) = self.table.get(candidate) else {
                continue;
            };
            parts.push(flags);
            if self.try_compound_split(&remaining[byte_end..], parts) {
                return true;
            }
            parts.pop();
        }
        false
    }
}

impl suggest::SuggestSource for Dictionary {
    fn is_valid(&self, word: &str) -> bool {
        self.check_exact(word)
    }

    fn is_no_suggest(&self, word: &str) -> bool {
        match self.table.get(word) {
            Some(flags) => lookup::has_flag(flags, self.settings.no_suggest),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn s1_basic_suffix_expansion() {
        let aff = "SFX S Y 1\nSFX S 0 s .\n";
        let dic = "1\ncat/S\n";
        let (dict, notes) = Dictionary::from_sources(aff, dic).unwrap();
        assert!(notes.is_empty());
        assert!(dict.check("cat"));
        assert!(dict.check("cats"));
        assert!(!dict.check("dogs"));
    }

    #[test]
    fn s2_prefix_and_suffix_combine() {
        let aff = "PFX P Y 1\nPFX P 0 un .\nSFX S Y 1\nSFX S 0 s .\n";
        let dic = "1\nwrap/PS\n";
        let (dict, _) = Dictionary::from_sources(aff, dic).unwrap();
        assert!(dict.check("unwrap"));
        assert!(dict.check("wraps"));
        assert!(dict.check("unwraps"));
    }

    #[test]
    fn s3_keepcase_blocks_lowercase_fallback() {
        let aff = "KEEPCASE K\n";
        let dic = "1\nNASA/K\n";
        let (dict, _) = Dictionary::from_sources(aff, dic).unwrap();
        assert!(dict.check_exact("NASA"));
        assert!(!dict.check("nasa"));
    }

    #[test]
    fn s4_onlyincompound_plus_compoundrule() {
        let aff = "ONLYINCOMPOUND O\nCOMPOUNDRULE 1\nCOMPOUNDRULE AB\n";
        let dic = "2\nfoo/AO\nbar/B\n";
        let (dict, _) = Dictionary::from_sources(aff, dic).unwrap();
        assert!(!dict.check("foo"));
        assert!(dict.check("bar"));
        assert!(dict.check("foobar"));
        assert!(!dict.check("barfoo"));
    }

    #[test]
    fn compoundmin_gates_the_whole_word_not_each_constituent() {
        // Each constituent ("ab", "cd", "ef") is shorter than COMPOUNDMIN,
        // but the assembled compound word is not; COMPOUNDMIN only bars
        // compounds below that length overall, per spec.
        let aff = "COMPOUNDMIN 3\nCOMPOUNDRULE 1\nCOMPOUNDRULE AAA\n";
        let dic = "3\nab/A\ncd/A\nef/A\n";
        let (dict, _) = Dictionary::from_sources(aff, dic).unwrap();
        assert!(dict.check("abcdef"));
    }

    #[test]
    fn s5_rep_driven_suggestion() {
        let aff = "REP 1\nREP ph f\n";
        let dic = "1\nfoto\n";
        let (dict, _) = Dictionary::from_sources(aff, dic).unwrap();
        let suggestions = dict.suggest("photo", 5);
        assert_eq!(suggestions.first(), Some(&"foto".to_string()));
    }

    #[test]
    fn s6_edit_distance_one_ranking() {
        let aff = "";
        let dic = "1\nhello\n";
        let (dict, _) = Dictionary::from_sources(aff, dic).unwrap();
        let suggestions = dict.suggest("hallo", 5);
        assert!(suggestions.contains(&"hello".to_string()));
    }

    #[test]
    fn nosuggest_word_is_found_but_never_suggested() {
        let aff = "NOSUGGEST N\n";
        let dic = "1\nhello/N\n";
        let (dict, _) = Dictionary::from_sources(aff, dic).unwrap();
        assert!(dict.check("hello"));
        let suggestions = dict.suggest("hallo", 5);
        assert!(!suggestions.contains(&"hello".to_string()));
    }

    #[test]
    fn forbiddenword_prunes_an_otherwise_generated_form() {
        let aff = "FORBIDDENWORD F\nSFX S Y 1\nSFX S 0 s .\n";
        let dic = "2\ncat/S\ncats/F\n";
        let (dict, _) = Dictionary::from_sources(aff, dic).unwrap();
        assert!(dict.check("cat"));
        assert!(!dict.check_exact("cats"));
    }

    #[test]
    fn has_flag_fails_open_for_unconfigured_flag() {
        let aff = "";
        let dic = "1\nhello\n";
        let (dict, _) = Dictionary::from_sources(aff, dic).unwrap();
        // KEEPCASE was never configured; an Initial-case query must still
        // fall back to the lowercase entry.
        assert!(dict.check("Hello"));
    }
}
