//! `skein-cli`: a thin `clap`-backed front end exercising the `skein`
//! library — compiles a small pattern-algebra script (an ABNF-like rule
//! file, see [`pattern_file`]) into a `Dfa<char>` and then prints it,
//! combines it with another file's DFA, enumerates its language, checks
//! equivalence, or tests it against lines of text. Grounded in
//! `dandy-cli`'s subcommand layout (`union`/`intersection`/`enumerate`/
//! `equivalence`/`test`), generalized from dandy's DFA/NFA/regex table
//! format to skein's pattern-script format.
mod binary_op;
mod dfa_table;
mod enumerate;
mod equivalence;
mod pattern_file;
mod table;
mod test_files;

use binary_op::BinaryOperation;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "skein-cli", version, about = "Compile and combine regular-pattern scripts with skein")]
struct Cli {
    /// Increase log verbosity (info-level spans for each step taken).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compile a pattern file's `main` rule and print it as a table.
    Show {
        file: PathBuf,
        /// Minimize before printing.
        #[arg(short, long)]
        minimize: bool,
    },
    /// Combine two pattern files with a DFA closure operation.
    Combine {
        #[arg(value_enum)]
        op: BinaryOperation,
        first: PathBuf,
        second: PathBuf,
        /// Minimize the result before printing.
        #[arg(short, long)]
        minimize: bool,
    },
    /// Print the first N words of a pattern file's language.
    Enumerate {
        file: PathBuf,
        #[arg(short, long, default_value_t = 10)]
        amount: usize,
    },
    /// Check whether two pattern files denote the same language.
    Equivalent { first: PathBuf, second: PathBuf },
    /// Test each line of one or more files against a pattern file.
    Test { pattern: PathBuf, files: Vec<PathBuf> },
}

fn main() -> Result<(), String> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
        .init();

    match cli.command {
        Command::Show { file, minimize } => {
            let dfa = pattern_file::load(&file, "main").map_err(|e| e.to_string())?;
            let dfa = if minimize { dfa.minimize() } else { dfa };
            println!("{}", dfa_table::render(&dfa));
            Ok(())
        }
        Command::Combine { op, first, second, minimize } => binary_op::run(&first, &second, op, minimize),
        Command::Enumerate { file, amount } => enumerate::run(&file, amount),
        Command::Equivalent { first, second } => equivalence::run(&first, &second),
        Command::Test { pattern, files } => test_files::run(&pattern, &files),
    }
}
