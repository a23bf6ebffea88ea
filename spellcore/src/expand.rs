//! Component C: rule applier / expansion.
//!
//! Where the teacher's engine stripped hypothesized affixes off a query
//! word at lookup time (`check_decased_word`, recursively backtracking
//! over every possible split), this module does the opposite: once, at
//! construction time, it walks every dictionary stem and enumerates every
//! surface form the stem's affix flags allow, producing flat
//! `(word, flags)` pairs. Lookup (`crate::lookup`) then never recurses —
//! it queries the resulting table directly.
//!
//! A derived form's flags are the continuation flags carried by the rule
//! that produced it, plus a small set of "sticky" markers (FORBIDDENWORD,
//! SUBSTANDARD, WARN) copied down from the stem so they still govern
//! lookup/suggestion behavior on the derived word. KEEPCASE and NOSUGGEST
//! are deliberately not copied down; see `derived_flags`.

use crate::affix::{AffixData, AffixRule, AffixSettings};
use crate::dictionary::FlagSet;

/// Bounds how many affix applications (direct + continuation) a single
/// stem's expansion chain may take. Mirrors the teacher's
/// `slg_prefix_max`/`slg_suffix_max` recursion bound, repurposed here as
/// an expansion-time bound instead of a lookup-time one.
pub const MAX_AFFIX_CHAIN: u32 = 3;

pub fn expand_stem(
    word: &str,
    stem_flags: &FlagSet,
    affix: &AffixData,
) -> Vec<(String, FlagSet)> {
    let settings = &affix.settings;
    let mut out = Vec::new();

    let needs_affix = settings
        .need_affix
        .map(|f| stem_flags.contains(&f))
        .unwrap_or(false);
    if !needs_affix {
        out.push((word.to_string(), stem_flags.clone()));
    }

    let prefix_forms = apply_side(word, stem_flags, affix, true);
    let suffix_forms = apply_side(word, stem_flags, affix, false);

    for form in &prefix_forms {
        if !form.circumfix {
            out.push((form.word.clone(), form.flags.clone()));
        }
    }
    for form in &suffix_forms {
        if !form.circumfix {
            out.push((form.word.clone(), form.flags.clone()));
        }
    }

    for p in &prefix_forms {
        for s in &suffix_forms {
            if p.circumfix != s.circumfix {
                // Circumfix affixes only ever combine with another
                // circumfix affix on the opposite side; a lone circumfix
                // pairing with a plain affix is not a valid surface form.
                continue;
            }
            if !p.cross_product || !s.cross_product {
                // Cross-product (the header's Y/N field) must hold on
                // both sides; a non-combineable affix never joins a
                // prefix and a suffix into one surface form.
                continue;
            }
            if let Some((word, flags)) = combine_cross_product(word, p, s) {
                out.push((word, flags));
            }
        }
    }

    let mut continuations = Vec::new();
    for (form_word, form_flags) in &out {
        continue_chain(form_word, form_flags, affix, 1, &mut continuations);
    }
    out.extend(continuations);

    out
}

struct AppliedForm {
    word: String,
    flags: FlagSet,
    circumfix: bool,
    /// The owning class's `cross_product` (the PFX/SFX header's `Y`/`N`
    /// field): whether this form may combine with an opposite-side form
    /// into one prefix+suffix surface form.
    cross_product: bool,
    /// Bytes removed from the stem's edge (front for a prefix rule, back
    /// for a suffix rule) to produce `word`. Kept so a cross-product
    /// combination can splice both edits without re-deriving strip
    /// lengths from ambiguous length arithmetic.
    stripped_len: usize,
}

fn apply_side(word: &str, flags: &FlagSet, affix: &AffixData, is_prefix: bool) -> Vec<AppliedForm> {
    let mut out = Vec::new();
    for class in affix.classes.iter().filter(|c| c.is_prefix == is_prefix) {
        if !flags.contains(&class.flag) {
            continue;
        }
        for rule in &class.entries {
            if let Some(new_word) = apply_rule(word, rule, is_prefix) {
                out.push(AppliedForm {
                    word: new_word,
                    flags: derived_flags(flags, &affix.settings, rule),
                    circumfix: is_circumfix(rule, &affix.settings),
                    cross_product: class.cross_product,
                    stripped_len: rule.strip.len(),
                });
            }
        }
    }
    out
}

fn apply_rule(word: &str, rule: &AffixRule, is_prefix: bool) -> Option<String> {
    if is_prefix {
        if !word.starts_with(&rule.strip) || !rule.condition.prefix_match(word) {
            return None;
        }
        Some(format!("{}{}", rule.add, &word[rule.strip.len()..]))
    } else {
        if !word.ends_with(&rule.strip) || !rule.condition.suffix_match(word) {
            return None;
        }
        Some(format!("{}{}", &word[..word.len() - rule.strip.len()], rule.add))
    }
}

/// Splices an independently-validated prefix transform and suffix
/// transform of the same stem into one combined surface form: the
/// prefix's added head, the stem's untouched middle, the suffix's added
/// tail.
fn combine_cross_product(stem: &str, prefix: &AppliedForm, suffix: &AppliedForm) -> Option<(String, FlagSet)> {
    if prefix.stripped_len + suffix.stripped_len > stem.len() {
        return None;
    }
    let prefix_head_len = prefix.word.len() - (stem.len() - prefix.stripped_len);
    let prefix_head = &prefix.word[..prefix_head_len];
    let suffix_tail_len = suffix.word.len() - (stem.len() - suffix.stripped_len);
    let suffix_tail = &suffix.word[suffix.word.len() - suffix_tail_len..];
    let middle = &stem[prefix.stripped_len..stem.len() - suffix.stripped_len];

    let mut flags = prefix.flags.clone();
    flags.extend(suffix.flags.iter().copied());
    Some((format!("{prefix_head}{middle}{suffix_tail}"), flags))
}

/// An affix-derived surface form's flags are the rule's own continuation
/// flags plus a small set of markers sticky enough to survive derivation
/// even though the stem's full flag set otherwise does not: a derived
/// word built from a `FORBIDDENWORD`/`SUBSTANDARD`/`WARN` stem inherits
/// that same marker, since every surface form of a bad or substandard
/// stem should be treated the same way. `KEEPCASE` and `NOSUGGEST` are
/// deliberately NOT copied down — a derived form carries neither unless
/// its own rule names it via a continuation flag, so e.g. a capitalized
/// `KEEPCASE` stem's lowercase-suffixed derivation is still eligible for
/// the capitalization fallback in `lookup`.
fn derived_flags(stem_flags: &FlagSet, settings: &AffixSettings, rule: &AffixRule) -> FlagSet {
    let mut out: FlagSet = rule.add_flags.iter().copied().collect();
    for marker in [settings.forbidden_word, settings.substandard, settings.warn]
        .into_iter()
        .flatten()
    {
        if stem_flags.contains(&marker) {
            out.insert(marker);
        }
    }
    out
}

fn is_circumfix(rule: &AffixRule, settings: &AffixSettings) -> bool {
    match settings.circumfix {
        Some(flag) => rule.add_flags.contains(&flag),
        None => false,
    }
}

fn continue_chain(
    word: &str,
    flags: &FlagSet,
    affix: &AffixData,
    depth: u32,
    out: &mut Vec<(String, FlagSet)>,
) {
    if depth >= MAX_AFFIX_CHAIN {
        return;
    }
    for class in &affix.classes {
        if !flags.contains(&class.flag) {
            continue;
        }
        for form in &apply_side(word, flags, affix, class.is_prefix) {
            if form.circumfix {
                continue;
            }
            out.push((form.word.clone(), form.flags.clone()));
            continue_chain(&form.word, &form.flags, affix, depth + 1, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::affix::parse_affix;
    use crate::dictionary::parse_dictionary;
    use crate::flags::FlagFormat;

    fn expand_all(aff: &str, dic: &str) -> Vec<(String, FlagSet)> {
        let (affix, _) = parse_affix(aff).unwrap();
        let (stems, _) = parse_dictionary(affix.settings.flag_format, dic).unwrap();
        let mut out = Vec::new();
        for stem in &stems {
            out.extend(expand_stem(&stem.word, &stem.flags, &affix));
        }
        out
    }

    #[test]
    fn basic_suffix_expansion() {
        let aff = "SFX S Y 1\nSFX S 0 s .\n";
        let dic = "1\ncat/S\n";
        let forms: Vec<String> = expand_all(aff, dic).into_iter().map(|(w, _)| w).collect();
        assert!(forms.contains(&"cat".to_string()));
        assert!(forms.contains(&"cats".to_string()));
    }

    #[test]
    fn prefix_and_suffix_combine() {
        let aff = "PFX P Y 1\nPFX P 0 un .\nSFX S Y 1\nSFX S 0 s .\n";
        let dic = "1\nwrap/PS\n";
        let forms: Vec<String> = expand_all(aff, dic).into_iter().map(|(w, _)| w).collect();
        assert!(forms.contains(&"wrap".to_string()));
        assert!(forms.contains(&"unwrap".to_string()));
        assert!(forms.contains(&"wraps".to_string()));
        assert!(forms.contains(&"unwraps".to_string()));
    }

    #[test]
    fn non_combineable_affix_is_excluded_from_cross_product() {
        let aff = "PFX P N 1\nPFX P 0 un .\nSFX S Y 1\nSFX S 0 s .\n";
        let dic = "1\nwrap/PS\n";
        let forms: Vec<String> = expand_all(aff, dic).into_iter().map(|(w, _)| w).collect();
        assert!(forms.contains(&"wrap".to_string()));
        assert!(forms.contains(&"unwrap".to_string()));
        assert!(forms.contains(&"wraps".to_string()));
        assert!(!forms.contains(&"unwraps".to_string()));
    }

    #[test]
    fn need_affix_stem_does_not_stand_alone() {
        let aff = "NEEDAFFIX X\nSFX S Y 1\nSFX S 0 s .\n";
        let dic = "1\nfoo/XS\n";
        let forms: Vec<String> = expand_all(aff, dic).into_iter().map(|(w, _)| w).collect();
        assert!(!forms.contains(&"foo".to_string()));
        assert!(forms.contains(&"foos".to_string()));
    }

    #[test]
    fn circumfix_affixes_never_apply_alone() {
        let aff = "CIRCUMFIX C\nPFX P Y 1\nPFX P 0 un/C .\nSFX S Y 1\nSFX S 0 ed/C .\n";
        let dic = "1\nlove/PS\n";
        let forms: Vec<String> = expand_all(aff, dic).into_iter().map(|(w, _)| w).collect();
        assert!(!forms.contains(&"unlove".to_string()));
        assert!(!forms.contains(&"loveed".to_string()));
        assert!(forms.contains(&"unloveed".to_string()));
    }
}
