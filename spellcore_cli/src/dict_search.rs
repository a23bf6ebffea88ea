//! `DICPATH`/`NEA_DICPATH`-style dictionary search: directories named in
//! an environment variable, with at most one trailing `*` wildcard
//! segment, are searched for `<name>.aff`/`<name>.dic` pairs. Grounded in
//! the teacher's `process_path_environment_variable`/`list_wildcarded`
//! (`neaspell_std/src/lib.rs`), simplified since this crate always wants
//! a matched `.aff`/`.dic` pair rather than the teacher's broader
//! aff/dic/good/wrong/neadic extension list.

use std::env;
use std::path::{Path, PathBuf};

const PATH_SEPARATOR: char = if cfg!(windows) { ';' } else { ':' };

/// Reads `var_name` (if set) into a list of search-root directories,
/// expanding a single trailing `*` segment into every immediate
/// subdirectory.
pub fn search_roots(var_name: &str) -> Vec<PathBuf> {
    let Ok(value) = env::var(var_name) else {
        return Vec::new();
    };
    let mut roots = Vec::new();
    for entry in value.split(PATH_SEPARATOR) {
        if let Some(parent) = entry.strip_suffix('*') {
            let parent = if parent.is_empty() { "." } else { parent };
            if let Ok(read_dir) = std::fs::read_dir(parent) {
                for dir_entry in read_dir.flatten() {
                    if dir_entry.path().is_dir() {
                        roots.push(dir_entry.path());
                    }
                }
            }
        } else if !entry.is_empty() {
            roots.push(PathBuf::from(entry));
        }
    }
    roots
}

/// Finds a base path (without extension) whose `.aff` and `.dic` siblings
/// both exist, first trying `name` directly, then each search root
/// joined with `name`.
pub fn find_dict_base(name: &str, roots: &[PathBuf]) -> Option<PathBuf> {
    let direct = PathBuf::from(name);
    if has_pair(&direct) {
        return Some(direct);
    }
    for root in roots {
        let candidate = root.join(name);
        if has_pair(&candidate) {
            return Some(candidate);
        }
    }
    None
}

fn has_pair(base: &Path) -> bool {
    base.with_extension("aff").is_file() && base.with_extension("dic").is_file()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn finds_a_pair_under_a_wildcarded_root() {
        let tmp = tempfile::tempdir().unwrap();
        let lang_dir = tmp.path().join("en_US");
        fs::create_dir(&lang_dir).unwrap();
        fs::write(lang_dir.join("en_US.aff"), "").unwrap();
        fs::write(lang_dir.join("en_US.dic"), "0\n").unwrap();

        let pattern = format!("{}/*", tmp.path().display());
        let roots = {
            let saved = env::var("NEA_DICPATH_TEST");
            drop(saved);
            std::env::set_var("NEA_DICPATH_TEST", &pattern);
            let roots = search_roots("NEA_DICPATH_TEST");
            std::env::remove_var("NEA_DICPATH_TEST");
            roots
        };
        assert_eq!(roots.len(), 1);

        let base = find_dict_base("en_US", &roots).expect("dictionary pair should be found");
        assert_eq!(base, lang_dir.join("en_US"));
    }

    #[test]
    fn missing_dic_sibling_is_not_a_pair() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("partial.aff"), "").unwrap();
        assert!(!has_pair(&tmp.path().join("partial")));
    }
}
