use thiserror::Error;

/// A fatal problem in an affix (`.aff`) source that prevents building a
/// [`crate::Dictionary`] at all.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AffixError {
    #[error("line {line}: unknown flag format {value:?}, expected long, num or UTF-8")]
    UnknownFlagFormat { line: usize, value: String },

    #[error("line {line}: malformed flag token {value:?} for the active flag format")]
    MalformedFlag { line: usize, value: String },

    #[error("line {line}: PFX/SFX header missing a field")]
    IncompleteAffixHeader { line: usize },

    #[error("line {line}: PFX/SFX entry missing a field")]
    IncompleteAffixEntry { line: usize },

    #[error("line {line}: affix class {flag:?} declared {expected} entries but only {found} were read before the file ended")]
    UnterminatedAffixClass {
        line: usize,
        flag: String,
        expected: u32,
        found: u32,
    },

    #[error("line {line}: COMPOUNDMIN value {value:?} is not a number")]
    InvalidCompoundMin { line: usize, value: String },

    #[error("line {line}: REP table entry missing a replacement field")]
    IncompleteReplacement { line: usize },

    #[error("line {line}: COMPOUNDRULE pattern {pattern:?} could not be compiled: {reason}")]
    InvalidCompoundRule {
        line: usize,
        pattern: String,
        reason: String,
    },
}

/// A fatal problem in a dictionary (`.dic`) source.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DictionaryError {
    #[error("line {line}: word entry is empty")]
    EmptyWord { line: usize },

    #[error("line {line}: flag token {value:?} on word {word:?} is not valid under the active flag format")]
    MalformedFlag {
        line: usize,
        word: String,
        value: String,
    },
}

/// Severity of a tolerated anomaly. Matches the teacher's note-category
/// split between "worth mentioning" and "worth mentioning loudly".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteLevel {
    Info,
    Warning,
}

/// A non-fatal parsing anomaly collected during construction, mirroring
/// the teacher's `ParseNote`/line-note buffer. Construction still
/// succeeds; these are surfaced to the caller for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseNote {
    pub level: NoteLevel,
    pub line: usize,
    pub message: String,
}

impl ParseNote {
    pub fn info(line: usize, message: impl Into<String>) -> Self {
        ParseNote {
            level: NoteLevel::Info,
            line,
            message: message.into(),
        }
    }

    pub fn warning(line: usize, message: impl Into<String>) -> Self {
        ParseNote {
            level: NoteLevel::Warning,
            line,
            message: message.into(),
        }
    }

    pub fn emit(&self) {
        match self.level {
            NoteLevel::Info => tracing::debug!(line = self.line, "{}", self.message),
            NoteLevel::Warning => tracing::warn!(line = self.line, "{}", self.message),
        }
    }
}
