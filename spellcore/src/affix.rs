//! Component B: affix parser.
//!
//! Turns `.aff` source text into [`AffixData`]: the scalar/string/table
//! settings (`TRY`, `KEY`, `WORDCHARS`, `COMPOUNDMIN`, `REP`,
//! `COMPOUNDRULE`, the simple boolean-flag directives) plus the PFX/SFX
//! affix classes that [`crate::expand`] turns into surface forms.

use crate::condition::Condition;
use crate::error::{AffixError, ParseNote};
use crate::flags::{self, FlagFormat, FlagId};

#[derive(Debug, Clone)]
pub struct AffixRule {
    pub strip: String,
    pub add: String,
    pub add_flags: Vec<FlagId>,
    pub condition: Condition,
}

#[derive(Debug, Clone)]
pub struct AffixClass {
    pub flag: FlagId,
    pub is_prefix: bool,
    pub cross_product: bool,
    pub entries: Vec<AffixRule>,
}

#[derive(Debug, Clone, Default)]
pub struct AffixSettings {
    pub flag_format: FlagFormat,
    pub try_string: String,
    pub keyboard_string: String,
    pub wordchars: String,
    pub compound_min: u32,
    pub rep_pairs: Vec<(String, String)>,
    pub compound_rule_patterns: Vec<String>,
    pub compound_begin: Option<FlagId>,
    pub compound_middle: Option<FlagId>,
    pub compound_end: Option<FlagId>,
    pub compound_permit: Option<FlagId>,
    pub compound_forbid: Option<FlagId>,
    pub compound_root: Option<FlagId>,
    pub only_in_compound: Option<FlagId>,
    pub need_affix: Option<FlagId>,
    pub circumfix: Option<FlagId>,
    pub forbidden_word: Option<FlagId>,
    pub keep_case: Option<FlagId>,
    pub no_suggest: Option<FlagId>,
    pub substandard: Option<FlagId>,
    pub warn: Option<FlagId>,
    pub force_ucase: Option<FlagId>,
}

impl AffixSettings {
    const DEFAULT_COMPOUND_MIN: u32 = 3;

    fn new() -> AffixSettings {
        AffixSettings {
            compound_min: Self::DEFAULT_COMPOUND_MIN,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AffixData {
    pub settings: AffixSettings,
    pub classes: Vec<AffixClass>,
}

impl AffixData {
    /// Returns the prefix or suffix class for `flag`, creating an empty
    /// one first if this is the flag's first `PFX`/`SFX` block.
    pub fn class_mut(&mut self, flag: FlagId, is_prefix: bool) -> &mut AffixClass {
        if let Some(idx) = self
            .classes
            .iter()
            .position(|c| c.flag == flag && c.is_prefix == is_prefix)
        {
            return &mut self.classes[idx];
        }
        self.classes.push(AffixClass {
            flag,
            is_prefix,
            cross_product: false,
            entries: Vec::new(),
        });
        self.classes.last_mut().unwrap()
    }
}

struct Parser<'a> {
    lines: std::str::Lines<'a>,
    line_no: usize,
    notes: Vec<ParseNote>,
    data: AffixData,
}

pub fn parse_affix(text: &str) -> Result<(AffixData, Vec<ParseNote>), AffixError> {
    let span = tracing::debug_span!("parse_affix");
    let _enter = span.enter();
    let mut parser = Parser {
        lines: text.lines(),
        line_no: 0,
        notes: Vec::new(),
        data: AffixData {
            settings: AffixSettings::new(),
            classes: Vec::new(),
        },
    };
    parser.run()?;
    Ok((parser.data, parser.notes))
}

impl<'a> Parser<'a> {
    fn next_line(&mut self) -> Option<&'a str> {
        let line = self.lines.next()?;
        self.line_no += 1;
        Some(strip_comment(line))
    }

    fn run(&mut self) -> Result<(), AffixError> {
        while let Some(line) = self.next_line() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            self.dispatch(line)?;
        }
        Ok(())
    }

    fn dispatch(&mut self, line: &str) -> Result<(), AffixError> {
        let mut it = line.split_whitespace();
        let keyword = it.next().unwrap_or("");
        let rest: Vec<&str> = it.collect();
        match keyword {
            "FLAG" => self.parse_flag_directive(rest.first().copied()),
            "TRY" => {
                self.data.settings.try_string = rest.first().map(|s| s.to_string()).unwrap_or_default();
                Ok(())
            }
            "KEY" => {
                self.data.settings.keyboard_string = rest.first().map(|s| s.to_string()).unwrap_or_default();
                Ok(())
            }
            "WORDCHARS" => {
                self.data.settings.wordchars = rest.first().map(|s| s.to_string()).unwrap_or_default();
                Ok(())
            }
            "COMPOUNDMIN" => self.parse_compound_min(rest.first().copied()),
            "REP" => self.parse_rep_table(rest.first().copied()),
            "COMPOUNDRULE" => self.parse_compound_rule_table(rest.first().copied()),
            "PFX" => self.parse_affix_class(rest, true),
            "SFX" => self.parse_affix_class(rest, false),
            "COMPOUNDBEGIN" => self.parse_simple_flag(rest.first().copied(), |s, v| s.compound_begin = Some(v)),
            "COMPOUNDMIDDLE" => self.parse_simple_flag(rest.first().copied(), |s, v| s.compound_middle = Some(v)),
            "COMPOUNDEND" => self.parse_simple_flag(rest.first().copied(), |s, v| s.compound_end = Some(v)),
            "COMPOUNDPERMITFLAG" => self.parse_simple_flag(rest.first().copied(), |s, v| s.compound_permit = Some(v)),
            "COMPOUNDFORBIDFLAG" => self.parse_simple_flag(rest.first().copied(), |s, v| s.compound_forbid = Some(v)),
            "COMPOUNDROOT" => self.parse_simple_flag(rest.first().copied(), |s, v| s.compound_root = Some(v)),
            "ONLYINCOMPOUND" => self.parse_simple_flag(rest.first().copied(), |s, v| s.only_in_compound = Some(v)),
            "NEEDAFFIX" => self.parse_simple_flag(rest.first().copied(), |s, v| s.need_affix = Some(v)),
            "CIRCUMFIX" => self.parse_simple_flag(rest.first().copied(), |s, v| s.circumfix = Some(v)),
            "FORBIDDENWORD" => self.parse_simple_flag(rest.first().copied(), |s, v| s.forbidden_word = Some(v)),
            "KEEPCASE" => self.parse_simple_flag(rest.first().copied(), |s, v| s.keep_case = Some(v)),
            "NOSUGGEST" => self.parse_simple_flag(rest.first().copied(), |s, v| s.no_suggest = Some(v)),
            "SUBSTANDARD" => self.parse_simple_flag(rest.first().copied(), |s, v| s.substandard = Some(v)),
            "WARN" => self.parse_simple_flag(rest.first().copied(), |s, v| s.warn = Some(v)),
            "FORCEUCASE" => self.parse_simple_flag(rest.first().copied(), |s, v| s.force_ucase = Some(v)),
            // Directives this core does not model (PHONE/MAP/BREAK/ICONV/OCONV/AF and
            // anything else unrecognized): tolerated, recorded, ignored.
            other => {
                self.notes.push(ParseNote::info(
                    self.line_no,
                    format!("unrecognized or unsupported directive {other:?}, ignored"),
                ));
                Ok(())
            }
        }
    }

    fn parse_flag_directive(&mut self, value: Option<&str>) -> Result<(), AffixError> {
        let value = value.unwrap_or("");
        self.data.settings.flag_format = match value {
            "long" => FlagFormat::Long,
            "num" => FlagFormat::Number,
            "UTF-8" => FlagFormat::Single,
            other => {
                return Err(AffixError::UnknownFlagFormat {
                    line: self.line_no,
                    value: other.to_string(),
                })
            }
        };
        Ok(())
    }

    fn parse_simple_flag(
        &mut self,
        value: Option<&str>,
        apply: impl FnOnce(&mut AffixSettings, FlagId),
    ) -> Result<(), AffixError> {
        let value = value.unwrap_or("");
        let flag = flags::parse_single_flag(self.data.settings.flag_format, self.line_no, value)?;
        apply(&mut self.data.settings, flag);
        Ok(())
    }

    fn parse_compound_min(&mut self, value: Option<&str>) -> Result<(), AffixError> {
        let value = value.unwrap_or("");
        self.data.settings.compound_min = value
            .parse()
            .map_err(|_| AffixError::InvalidCompoundMin {
                line: self.line_no,
                value: value.to_string(),
            })?;
        Ok(())
    }

    fn parse_rep_table(&mut self, count: Option<&str>) -> Result<(), AffixError> {
        let count: usize = count.unwrap_or("0").parse().unwrap_or(0);
        for _ in 0..count {
            let Some(line) = self.next_line() else {
                break;
            };
            let mut it = line.trim().split_whitespace();
            let tag = it.next();
            if tag != Some("REP") {
                self.notes.push(ParseNote::warning(self.line_no, "expected REP entry"));
                continue;
            }
            let from = it.next();
            let to = it.next();
            match (from, to) {
                (Some(f), Some(t)) => self.data.settings.rep_pairs.push((f.to_string(), t.to_string())),
                _ => return Err(AffixError::IncompleteReplacement { line: self.line_no }),
            }
        }
        Ok(())
    }

    fn parse_compound_rule_table(&mut self, count: Option<&str>) -> Result<(), AffixError> {
        let count: usize = count.unwrap_or("0").parse().unwrap_or(0);
        for _ in 0..count {
            let Some(line) = self.next_line() else {
                break;
            };
            let mut it = line.trim().split_whitespace();
            let tag = it.next();
            if tag != Some("COMPOUNDRULE") {
                self.notes.push(ParseNote::warning(self.line_no, "expected COMPOUNDRULE entry"));
                continue;
            }
            if let Some(pattern) = it.next() {
                self.data.settings.compound_rule_patterns.push(pattern.to_string());
            }
        }
        Ok(())
    }

    fn parse_affix_class(&mut self, header_rest: Vec<&str>, is_prefix: bool) -> Result<(), AffixError> {
        let keyword = if is_prefix { "PFX" } else { "SFX" };
        let flag_text = header_rest.first().copied().ok_or(AffixError::IncompleteAffixHeader {
            line: self.line_no,
        })?;
        let cross_product = header_rest.get(1).copied().unwrap_or("N") == "Y";
        let count: u32 = header_rest
            .get(2)
            .and_then(|s| s.parse().ok())
            .ok_or(AffixError::IncompleteAffixHeader { line: self.line_no })?;
        let flag = flags::parse_single_flag(self.data.settings.flag_format, self.line_no, flag_text)?;

        let mut entries = Vec::new();
        for _ in 0..count {
            let Some(line) = self.next_line() else {
                return Err(AffixError::UnterminatedAffixClass {
                    line: self.line_no,
                    flag: flag_text.to_string(),
                    expected: count,
                    found: entries.len() as u32,
                });
            };
            let mut it = line.trim().split_whitespace();
            let tag = it.next();
            if tag != Some(keyword) {
                return Err(AffixError::IncompleteAffixEntry { line: self.line_no });
            }
            let _flag_col = it.next();
            let strip = it.next().ok_or(AffixError::IncompleteAffixEntry { line: self.line_no })?;
            let add_col = it.next().ok_or(AffixError::IncompleteAffixEntry { line: self.line_no })?;
            let condition_col = it.next().unwrap_or(".");

            let (add, add_flags_text) = match add_col.split_once('/') {
                Some((a, f)) => (a, Some(f)),
                None => (add_col, None),
            };
            let add_flags = match add_flags_text {
                Some(text) => flags::parse_flags(self.data.settings.flag_format, self.line_no, text)?,
                None => Vec::new(),
            };

            entries.push(AffixRule {
                strip: zero_to_empty(strip),
                add: zero_to_empty(add),
                add_flags,
                condition: Condition::parse(condition_col),
            });
        }
        let class = self.data.class_mut(flag, is_prefix);
        class.cross_product = cross_product;
        class.entries = entries;
        Ok(())
    }
}

fn zero_to_empty(field: &str) -> String {
    if field == "0" {
        String::new()
    } else {
        field.to_string()
    }
}

fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(idx) => &line[..idx],
        None => line,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_basic_suffix_class() {
        let text = "SFX A Y 1\nSFX A 0 s .\n";
        let (data, notes) = parse_affix(text).unwrap();
        assert!(notes.is_empty());
        assert_eq!(data.classes.len(), 1);
        let class = &data.classes[0];
        assert!(!class.is_prefix);
        assert!(class.cross_product);
        assert_eq!(class.entries.len(), 1);
        assert_eq!(class.entries[0].add, "s");
        assert_eq!(class.entries[0].strip, "");
    }

    #[test]
    fn parses_compoundmin_and_rep() {
        let text = "COMPOUNDMIN 2\nREP 1\nREP ph f\n";
        let (data, _) = parse_affix(text).unwrap();
        assert_eq!(data.settings.compound_min, 2);
        assert_eq!(data.settings.rep_pairs, vec![("ph".to_string(), "f".to_string())]);
    }

    #[test]
    fn unterminated_affix_class_is_an_error() {
        let text = "SFX A Y 2\nSFX A 0 s .\n";
        assert!(parse_affix(text).is_err());
    }

    #[test]
    fn unknown_directive_is_tolerated() {
        let text = "SOMETHINGNEW foo\nCOMPOUNDMIN 3\n";
        let (data, notes) = parse_affix(text).unwrap();
        assert_eq!(data.settings.compound_min, 3);
        assert_eq!(notes.len(), 1);
    }
}
