//! `test` subcommand: checks each line of one or more text files against a
//! pattern file's `main` rule, grounded in `dandy-cli`'s grapheme-based
//! `accepts_graphemes` line testing. `skein`'s `Dfa` is generic over `char`
//! here, not graphemes — `unicode_segmentation` is used only to split each
//! line into extended grapheme clusters, which are then mapped to `char`
//! by taking the cluster's first scalar value, a CLI-layer convenience
//! noted as a scope narrowing from dandy's native grapheme alphabet (see
//! `DESIGN.md`).
use crate::pattern_file;
use std::path::PathBuf;
use unicode_segmentation::UnicodeSegmentation;

pub fn run(pattern: &PathBuf, files: &[PathBuf]) -> Result<(), String> {
    let dfa = pattern_file::load(pattern, "main").map_err(|e| e.to_string())?;

    for file in files {
        let contents = std::fs::read_to_string(file).map_err(|e| e.to_string())?;
        println!("Testing file {}:", file.display());
        let mut total = 0;
        let mut passed = 0;
        for line in contents.lines() {
            total += 1;
            let word: Vec<char> = line.graphemes(true).filter_map(|g| g.chars().next()).collect();
            let ok = if dfa.accepts(&word) {
                passed += 1;
                "[ OK ]"
            } else {
                "[FAIL]"
            };
            println!("{ok} {line}");
        }
        println!("{passed}/{total} lines passed in file {}", file.display());
    }

    Ok(())
}
