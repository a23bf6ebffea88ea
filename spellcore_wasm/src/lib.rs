//! WASM binding for `spellcore`. Exposes `load_language`/`spell_text` to
//! JavaScript; the heavy lifting is entirely in the `spellcore` crate,
//! this module only holds the one global dictionary instance a
//! single-threaded WASM module needs between calls.

use spellcore::Dictionary;
use std::sync::{Mutex, OnceLock};
use wasm_bindgen::prelude::*;

fn dictionary_slot() -> &'static Mutex<Option<Dictionary>> {
    static SLOT: OnceLock<Mutex<Option<Dictionary>>> = OnceLock::new();
    SLOT.get_or_init(|| Mutex::new(None))
}

/// Builds the global dictionary from affix/word-list source text.
/// Returns any tolerated parse notes as plain strings for display.
#[wasm_bindgen]
pub fn load_language(affix_text: String, dictionary_text: String) -> Vec<String> {
    match Dictionary::from_sources(&affix_text, &dictionary_text) {
        Ok((dictionary, notes)) => {
            *dictionary_slot().lock().unwrap() = Some(dictionary);
            notes.into_iter().map(|n| n.message).collect()
        }
        Err(err) => vec![err.to_string()],
    }
}

/// Checks every word in `text`, returning each token prefixed with `+`
/// (correct), `#` (misspelled), or nothing (not a word, e.g. punctuation
/// or whitespace run) — wasm-bindgen cannot return a vector of tuples, so
/// the marker is encoded into the string itself.
#[wasm_bindgen]
pub fn spell_text(text: String) -> Vec<String> {
    let slot = dictionary_slot().lock().unwrap();
    let Some(dictionary) = slot.as_ref() else {
        return Vec::new();
    };
    text.split_inclusive(|c: char| !(c.is_alphanumeric() || c == '\''))
        .filter(|chunk| !chunk.is_empty())
        .map(|chunk| {
            let word_len = chunk
                .char_indices()
                .take_while(|(_, c)| c.is_alphanumeric() || *c == '\'')
                .last()
                .map(|(i, c)| i + c.len_utf8())
                .unwrap_or(0);
            let (word, rest) = chunk.split_at(word_len);
            if word.is_empty() {
                rest.to_string()
            } else if dictionary.check(word) {
                format!("+{word}{rest}")
            } else {
                format!("#{word}{rest}")
            }
        })
        .collect()
}

#[wasm_bindgen(start)]
fn main() -> Result<(), JsValue> {
    Ok(())
}
