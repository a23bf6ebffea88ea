//! Filesystem/CLI binding for `spellcore`. Reads `.aff`/`.dic` files from
//! disk, builds a [`spellcore::Dictionary`], and checks text files or
//! stdin against it. Everything here is the "external collaborator" the
//! core itself never touches: file I/O, environment variables, argument
//! parsing, process exit codes.

mod dict_search;

use clap::Parser;
use spellcore::error::NoteLevel;
use spellcore::Dictionary;
use std::fs;
use std::io::{self, BufWriter, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

const NEA_DICPATH: &str = "NEA_DICPATH";
const COMMON_DICPATH: &str = "DICPATH";

/// A hunspell-compatible spellchecker.
#[derive(Parser, Debug)]
#[command(name = "spellcore", version, about)]
struct Cli {
    /// Dictionary base name or path (without .aff/.dic extension).
    #[arg(short = 'd', long = "dict")]
    dict: String,

    /// List misspelled words only.
    #[arg(short = 'l', long = "list")]
    list: bool,

    /// Report misspelled words with suggestions.
    #[arg(short = 'a', long = "all")]
    all: bool,

    /// Write output to this file instead of stdout.
    #[arg(long = "out-file")]
    out_file: Option<PathBuf>,

    /// Maximum number of parse notes to print (0 = unlimited).
    #[arg(long = "max-notes", default_value_t = 0)]
    max_notes: u32,

    /// Warning categories to show (currently just a pass-through flag).
    #[arg(long = "warn", value_delimiter = ',')]
    warn: Vec<String>,

    /// Text files to check. Reads stdin if none are given.
    files: Vec<PathBuf>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(found_errors) => {
            if found_errors {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(err) => {
            eprintln!("spellcore: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> io::Result<bool> {
    let roots = {
        let mut roots = dict_search::search_roots(NEA_DICPATH);
        if roots.is_empty() {
            roots = dict_search::search_roots(COMMON_DICPATH);
        }
        roots
    };
    let base = dict_search::find_dict_base(&cli.dict, &roots).ok_or_else(|| {
        io::Error::new(io::ErrorKind::NotFound, format!("no .aff/.dic pair found for {:?}", cli.dict))
    })?;

    let affix_text = fs::read_to_string(base.with_extension("aff"))?;
    let dictionary_text = fs::read_to_string(base.with_extension("dic"))?;

    let (dictionary, notes) = Dictionary::from_sources(&affix_text, &dictionary_text)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))?;

    let mut shown = 0u32;
    for note in &notes {
        if cli.max_notes != 0 && shown >= cli.max_notes {
            break;
        }
        if note.level == NoteLevel::Warning && !cli.warn.is_empty() && !cli.warn.iter().any(|w| w == "all") {
            continue;
        }
        eprintln!("note: line {}: {}", note.line, note.message);
        shown += 1;
    }

    let mut out: Box<dyn Write> = match &cli.out_file {
        Some(path) => Box::new(BufWriter::new(fs::File::create(path)?)),
        None => Box::new(io::stdout()),
    };

    let mut found_errors = false;
    if cli.files.is_empty() {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text)?;
        found_errors |= check_text(&dictionary, &text, cli, out.as_mut())?;
    } else {
        for path in &cli.files {
            let text = fs::read_to_string(path)?;
            found_errors |= check_text(&dictionary, &text, cli, out.as_mut())?;
        }
    }

    Ok(found_errors)
}

fn check_text(dictionary: &Dictionary, text: &str, cli: &Cli, out: &mut dyn Write) -> io::Result<bool> {
    let mut found_errors = false;
    for word in text.split(|c: char| !(c.is_alphanumeric() || c == '\'')) {
        if word.is_empty() {
            continue;
        }
        if dictionary.check(word) {
            continue;
        }
        found_errors = true;
        if cli.list {
            writeln!(out, "{word}")?;
        } else if cli.all {
            let suggestions = dictionary.suggest(word, 5);
            if suggestions.is_empty() {
                writeln!(out, "& {word} 0 0: ")?;
            } else {
                writeln!(out, "& {word} {} 0: {}", suggestions.len(), suggestions.join(", "))?;
            }
        }
    }
    Ok(found_errors)
}
