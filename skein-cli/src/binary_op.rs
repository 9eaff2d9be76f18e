//! `union`/`intersection`/`difference` subcommands: load two pattern files,
//! combine them with the requested [`skein::Dfa`] closure operation, and
//! print the (optionally minimized) result — the same "load, combine,
//! print, optionally minimize" shape as `dandy-cli`'s `binary_op.rs`,
//! generalized from dandy's own `Dfa::union`/`intersection`/`difference`
//! (which return `Option` because dandy requires matching alphabets) to
//! skein's total versions (skein's product construction handles differing
//! alphabets directly, so there is no alphabet-mismatch error case here).
use crate::dfa_table;
use crate::pattern_file;
use clap::ValueEnum;
use std::path::PathBuf;
use tracing::info;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum BinaryOperation {
    Union,
    Intersection,
    Difference,
}

impl BinaryOperation {
    fn apply(self, a: &skein::Dfa<char>, b: &skein::Dfa<char>) -> skein::Dfa<char> {
        match self {
            BinaryOperation::Union => a.union(b),
            BinaryOperation::Intersection => a.intersection(b),
            BinaryOperation::Difference => a.difference(b),
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            BinaryOperation::Union => "union",
            BinaryOperation::Intersection => "intersection",
            BinaryOperation::Difference => "difference",
        }
    }
}

pub fn run(first: &PathBuf, second: &PathBuf, op: BinaryOperation, minimize: bool) -> Result<(), String> {
    let dfa1 = pattern_file::load(first, "main").map_err(|e| e.to_string())?;
    let dfa2 = pattern_file::load(second, "main").map_err(|e| e.to_string())?;

    let mut combined = op.apply(&dfa1, &dfa2);
    info!(states = combined.state_count(), "computed {}", op.as_str());

    if minimize {
        combined = combined.minimize();
        info!(states = combined.state_count(), "minimized");
    }

    println!("{}", dfa_table::render(&combined));
    Ok(())
}
