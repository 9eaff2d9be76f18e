//! `equivalent` subcommand: checks whether two pattern files' `main` rules
//! denote the same language, via [`skein::Dfa::is_equivalent`] — the
//! single-pair counterpart to `dandy-cli`'s many-files-against-one
//! `equivalence.rs` sweep, trimmed down because skein's CLI has one file
//! format (pattern scripts) rather than three (DFA/NFA/regex tables).
use crate::pattern_file;
use std::path::PathBuf;
use tracing::info;

pub fn run(first: &PathBuf, second: &PathBuf) -> Result<(), String> {
    let dfa1 = pattern_file::load(first, "main").map_err(|e| e.to_string())?;
    let dfa2 = pattern_file::load(second, "main").map_err(|e| e.to_string())?;

    info!(states1 = dfa1.state_count(), states2 = dfa2.state_count(), "comparing");

    if dfa1.is_equivalent(&dfa2) {
        println!("EQUIVALENT");
    } else {
        println!("NOT EQUIVALENT");
    }
    Ok(())
}
