//! Loads an on-disk pattern-algebra script — a small ABNF-like rule file,
//! per [`skein::abnf`] — and compiles its `main` rule into a `Dfa<char>`.
//! This is the CLI's one file format, a stand-in for the "front-end"
//! spec.md names as an external collaborator; the core itself parses
//! nothing (spec.md §1 non-goals: "no concrete syntax for regular
//! expressions").
use skein::abnf::{AbnfError, Ruleset};
use skein::Dfa;
use std::io;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("reading {path}: {source}")]
    Io { path: String, source: io::Error },
    #[error("parsing rules: {0}")]
    Parse(#[from] AbnfError),
}

/// Loads `path`, parses it as a ruleset, and lowers the rule named
/// `rule_name` into a `Dfa<char>`, minimized (minimization is free
/// correctness insurance for anything about to be printed or combined).
pub fn load(path: &Path, rule_name: &str) -> Result<Dfa<char>, Error> {
    let source = std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.display().to_string(),
        source,
    })?;
    let ruleset = Ruleset::parse(&source)?;
    let pattern = ruleset.resolve(rule_name)?;
    Ok(Dfa::from_pattern(&pattern).minimize())
}
