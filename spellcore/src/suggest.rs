//! Component G: suggestion engine.
//!
//! Generates spelling suggestions for a word the dictionary rejects: REP
//! pairs (common, known typo patterns) are tried first, then generic
//! edit-distance-1 and edit-distance-2 candidates built by deleting,
//! transposing, replacing, and inserting characters from the observed
//! alphabet. Each candidate is checked against the dictionary; NOSUGGEST
//! entries are dropped even if otherwise a valid hit. Results are ranked
//! by distance (REP hits first, then edit-1, then edit-2) and, within a
//! distance tier, by how many distinct edits produced the same surface
//! form, then truncated to the caller's limit.

use hashbrown::HashMap;

/// What a suggestion source needs to provide: whether a candidate word is
/// a valid dictionary entry, and whether a valid entry is nonetheless
/// marked NOSUGGEST (present, but never offered as a suggestion).
pub trait SuggestSource {
    fn is_valid(&self, word: &str) -> bool;
    fn is_no_suggest(&self, word: &str) -> bool;
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Candidate {
    word: String,
    distance: u8,
    hits: u32,
}

pub fn suggest(
    source: &impl SuggestSource,
    rep_pairs: &[(String, String)],
    alphabet: &[char],
    word: &str,
    limit: usize,
) -> Vec<String> {
    if source.is_valid(word) {
        return Vec::new();
    }

    let mut found: HashMap<String, Candidate> = HashMap::new();

    for candidate in rep_candidates(rep_pairs, word) {
        record(&mut found, source, candidate, 0);
    }

    for candidate in edit_distance_1(word, alphabet) {
        record(&mut found, source, candidate, 1);
    }

    let have_enough = found.len() >= limit;
    if !have_enough {
        let edit1_set = edit_distance_1(word, alphabet);
        for base in &edit1_set {
            for candidate in edit_distance_1(base, alphabet) {
                record(&mut found, source, candidate, 2);
            }
        }
    }

    let mut ranked: Vec<Candidate> = found.into_values().collect();
    ranked.sort_by(|a, b| {
        a.distance
            .cmp(&b.distance)
            .then_with(|| b.hits.cmp(&a.hits))
            .then_with(|| a.word.cmp(&b.word))
    });
    ranked.truncate(limit);
    ranked.into_iter().map(|c| c.word).collect()
}

fn record(found: &mut HashMap<String, Candidate>, source: &impl SuggestSource, word: String, distance: u8) {
    if word.is_empty() || !source.is_valid(&word) || source.is_no_suggest(&word) {
        return;
    }
    found
        .entry(word.clone())
        .and_modify(|c| {
            c.hits += 1;
            c.distance = c.distance.min(distance);
        })
        .or_insert(Candidate { word, distance, hits: 1 });
}

/// REP-table substitution: replaces the first occurrence only of each
/// known "from" fragment with its "to" replacement.
fn rep_candidates(rep_pairs: &[(String, String)], word: &str) -> Vec<String> {
    let mut out = Vec::new();
    for (from, to) in rep_pairs {
        if from.is_empty() {
            continue;
        }
        if let Some(idx) = word.find(from.as_str()) {
            let mut candidate = String::with_capacity(word.len());
            candidate.push_str(&word[..idx]);
            candidate.push_str(to);
            candidate.push_str(&word[idx + from.len()..]);
            out.push(candidate);
        }
    }
    out
}

fn edit_distance_1(word: &str, alphabet: &[char]) -> Vec<String> {
    let chars: Vec<char> = word.chars().collect();
    let len = chars.len();
    let mut out = Vec::with_capacity(len * (2 + alphabet.len() * 2));

    for i in 0..len {
        let mut s: String = chars[..i].iter().collect();
        s.extend(&chars[i + 1..]);
        out.push(s);
    }

    for i in 0..len.saturating_sub(1) {
        let mut swapped = chars.clone();
        swapped.swap(i, i + 1);
        out.push(swapped.into_iter().collect());
    }

    for i in 0..len {
        for &c in alphabet {
            if c == chars[i] {
                continue;
            }
            let mut replaced = chars.clone();
            replaced[i] = c;
            out.push(replaced.into_iter().collect());
        }
    }

    for i in 0..=len {
        for &c in alphabet {
            let mut inserted: Vec<char> = chars[..i].to_vec();
            inserted.push(c);
            inserted.extend(&chars[i..]);
            out.push(inserted.into_iter().collect());
        }
    }

    out
}

fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let mut dp = vec![vec![0usize; b.len() + 1]; a.len() + 1];
    for (i, row) in dp.iter_mut().enumerate() {
        row[0] = i;
    }
    for j in 0..=b.len() {
        dp[0][j] = j;
    }
    for i in 1..=a.len() {
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            dp[i][j] = (dp[i - 1][j] + 1).min(dp[i][j - 1] + 1).min(dp[i - 1][j - 1] + cost);
        }
    }
    dp[a.len()][b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use hashbrown::HashSet;
    use proptest::prelude::*;

    struct FakeSource {
        words: HashSet<String>,
        no_suggest: HashSet<String>,
    }

    impl SuggestSource for FakeSource {
        fn is_valid(&self, word: &str) -> bool {
            self.words.contains(word)
        }
        fn is_no_suggest(&self, word: &str) -> bool {
            self.no_suggest.contains(word)
        }
    }

    #[test]
    fn rep_pair_beats_generic_edit_distance() {
        let source = FakeSource {
            words: ["photo".to_string(), "foto".to_string()].into_iter().collect(),
            no_suggest: HashSet::new(),
        };
        let rep_pairs = vec![("ph".to_string(), "f".to_string())];
        let alphabet: Vec<char> = "abcdefghijklmnopqrstuvwxyz".chars().collect();
        let suggestions = suggest(&source, &rep_pairs, &alphabet, "photo", 5);
        assert_eq!(suggestions.first(), Some(&"foto".to_string()));
    }

    #[test]
    fn a_valid_word_gets_no_suggestions() {
        let source = FakeSource {
            words: ["foo".to_string()].into_iter().collect(),
            no_suggest: HashSet::new(),
        };
        let alphabet: Vec<char> = "fo".chars().collect();
        // "foo" has an adjacent repeated letter, so a transpose edit of
        // distance 1 reproduces it verbatim; without a short-circuit this
        // would "suggest" the input back to itself.
        let suggestions = suggest(&source, &[], &alphabet, "foo", 5);
        assert!(suggestions.is_empty());
    }

    #[test]
    fn edit_distance_one_finds_a_single_typo() {
        let source = FakeSource {
            words: ["hello".to_string()].into_iter().collect(),
            no_suggest: HashSet::new(),
        };
        let alphabet: Vec<char> = "helo".chars().collect();
        let suggestions = suggest(&source, &[], &alphabet, "hollo", 5);
        assert!(suggestions.contains(&"hello".to_string()));
    }

    #[test]
    fn no_suggest_entries_are_excluded() {
        let source = FakeSource {
            words: ["hello".to_string()].into_iter().collect(),
            no_suggest: ["hello".to_string()].into_iter().collect(),
        };
        let alphabet: Vec<char> = "helo".chars().collect();
        let suggestions = suggest(&source, &[], &alphabet, "hollo", 5);
        assert!(!suggestions.contains(&"hello".to_string()));
    }

    proptest! {
        #[test]
        fn generic_suggestions_stay_within_edit_distance_two(
            word in "[a-e]{3,6}",
            dict_words in prop::collection::vec("[a-e]{3,6}", 1..8),
        ) {
            let source = FakeSource {
                words: dict_words.into_iter().collect(),
                no_suggest: HashSet::new(),
            };
            let alphabet: Vec<char> = "abcde".chars().collect();
            let suggestions = suggest(&source, &[], &alphabet, &word, 5);
            for s in &suggestions {
                prop_assert!(levenshtein(&word, s) <= 2);
            }
        }
    }
}
