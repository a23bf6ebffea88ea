//! Component E: compound matcher.
//!
//! `COMPOUNDRULE` patterns are tiny regular expressions over flags: each
//! token in the pattern names a flag, and matches any dictionary word
//! carrying that flag, with the same `*`/`?` quantifiers hunspell allows
//! after a token. The teacher's affix parser reads these patterns
//! (`parse_compoundrule_flags`) but never implements matching against
//! them; this module compiles each pattern into a real [`regex::Regex`]
//! over a private-use-area symbol assigned to each flag, so matching a
//! candidate split of a compound word becomes a single regex test.

use crate::error::AffixError;
use crate::flags::{self, FlagFormat, FlagId};
use hashbrown::HashMap;
use regex::Regex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Quantifier {
    One,
    ZeroOrMore,
    ZeroOrOne,
}

#[derive(Debug, Default)]
pub struct CompoundRuleSet {
    rules: Vec<Regex>,
    symbol_of: HashMap<FlagId, char>,
}

impl CompoundRuleSet {
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn compile(patterns: &[String], format: FlagFormat) -> Result<CompoundRuleSet, AffixError> {
        let mut symbol_of: HashMap<FlagId, char> = HashMap::new();
        let mut next_symbol: u32 = 0xE000;
        let mut token_lists = Vec::new();

        for pattern in patterns {
            let tokens = tokenize(format, pattern)?;
            for (flag, _) in &tokens {
                symbol_of.entry(*flag).or_insert_with(|| {
                    let c = char::from_u32(next_symbol).expect("valid private-use codepoint");
                    next_symbol += 1;
                    c
                });
            }
            token_lists.push((pattern.clone(), tokens));
        }

        let mut rules = Vec::new();
        for (pattern, tokens) in &token_lists {
            let mut regex_src = String::from("^");
            for (flag, quant) in tokens {
                let symbol = symbol_of[flag];
                regex_src.push_str(&regex::escape(&symbol.to_string()));
                match quant {
                    Quantifier::One => {}
                    Quantifier::ZeroOrMore => regex_src.push('*'),
                    Quantifier::ZeroOrOne => regex_src.push('?'),
                }
            }
            regex_src.push('$');
            let compiled = Regex::new(&regex_src).map_err(|e| AffixError::InvalidCompoundRule {
                line: 0,
                pattern: pattern.clone(),
                reason: e.to_string(),
            })?;
            rules.push(compiled);
        }

        Ok(CompoundRuleSet { rules, symbol_of })
    }

    /// Does any compiled rule accept a compound built from words whose
    /// flag sets are, in order, `word_flags`? Each word can carry several
    /// flags; since a rule only cares about one flag per position, this
    /// tries every assignment of "which flag does this word present
    /// here" combination until one satisfies a rule or all are exhausted.
    pub fn matches<'a>(&self, word_flags: &[&'a hashbrown::HashSet<FlagId>]) -> bool {
        if self.rules.is_empty() || word_flags.is_empty() {
            return false;
        }
        let mut candidates: Vec<Vec<char>> = Vec::with_capacity(word_flags.len());
        for flags in word_flags {
            let symbols: Vec<char> = self
                .symbol_of
                .iter()
                .filter(|(flag, _)| flags.contains(*flag))
                .map(|(_, symbol)| *symbol)
                .collect();
            if symbols.is_empty() {
                return false;
            }
            candidates.push(symbols);
        }
        let mut buf = String::with_capacity(word_flags.len());
        self.try_combinations(&candidates, 0, &mut buf)
    }

    fn try_combinations(&self, candidates: &[Vec<char>], pos: usize, buf: &mut String) -> bool {
        if pos == candidates.len() {
            return self.rules.iter().any(|r| r.is_match(buf));
        }
        for symbol in &candidates[pos] {
            buf.push(*symbol);
            if self.try_combinations(candidates, pos + 1, buf) {
                buf.pop();
                return true;
            }
            buf.pop();
        }
        false
    }
}

fn tokenize(format: FlagFormat, pattern: &str) -> Result<Vec<(FlagId, Quantifier)>, AffixError> {
    let mut out = Vec::new();
    let mut chars = pattern.chars().peekable();
    while let Some(c) = chars.next() {
        let flag_text = if c == '(' {
            let mut group = String::new();
            for gc in chars.by_ref() {
                if gc == ')' {
                    break;
                }
                group.push(gc);
            }
            group
        } else {
            c.to_string()
        };
        let flag = flags::parse_single_flag(format, 0, &flag_text)?;
        let quant = match chars.peek() {
            Some('*') => {
                chars.next();
                Quantifier::ZeroOrMore
            }
            Some('?') => {
                chars.next();
                Quantifier::ZeroOrOne
            }
            _ => Quantifier::One,
        };
        out.push((flag, quant));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hashbrown::HashSet as HbSet;

    fn flag(format: FlagFormat, text: &str) -> FlagId {
        flags::parse_single_flag(format, 0, text).unwrap()
    }

    #[test]
    fn matches_a_begin_middle_end_rule() {
        let patterns = vec!["AB*C".to_string()];
        let set = CompoundRuleSet::compile(&patterns, FlagFormat::Single).unwrap();

        let a: HbSet<FlagId> = [flag(FlagFormat::Single, "A")].into_iter().collect();
        let b: HbSet<FlagId> = [flag(FlagFormat::Single, "B")].into_iter().collect();
        let c: HbSet<FlagId> = [flag(FlagFormat::Single, "C")].into_iter().collect();

        assert!(set.matches(&[&a, &c]));
        assert!(set.matches(&[&a, &b, &c]));
        assert!(set.matches(&[&a, &b, &b, &c]));
        assert!(!set.matches(&[&a, &b]));
    }

    #[test]
    fn empty_rule_set_never_matches() {
        let set = CompoundRuleSet::compile(&[], FlagFormat::Single).unwrap();
        assert!(set.is_empty());
        let a: HbSet<FlagId> = Default::default();
        assert!(!set.matches(&[&a]));
    }
}
