//! `enumerate` subcommand: print the first `n` words of a pattern file's
//! language, length-lexicographic order, via [`skein::Dfa::enumerate`] —
//! the same "load, enumerate, report if the language ran out early" shape
//! as `dandy-cli`'s `enumerate_nfa`.
use crate::pattern_file;
use std::path::PathBuf;

pub fn run(file: &PathBuf, amount: usize) -> Result<(), String> {
    let dfa = pattern_file::load(file, "main").map_err(|e| e.to_string())?;

    println!("First {amount} words of the language:");
    let mut produced = 0;
    for word in dfa.enumerate().take(amount) {
        if word.is_empty() {
            println!("(empty word)");
        } else {
            println!("{}", word.iter().collect::<String>());
        }
        produced += 1;
    }
    if produced != amount {
        println!("(only {produced} words exist in this language)");
    }
    Ok(())
}
