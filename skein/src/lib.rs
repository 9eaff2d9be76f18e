//! `skein` — a generic finite-automata and formal-language toolkit.
//!
//! Where `dandy` builds DFAs, NFAs and regexes over `&str`/`Rc<str>`
//! alphabets for teaching and visualization, `skein` generalizes the same
//! algorithms (subset construction, Hopcroft minimization, product
//! construction, state elimination) to *any* symbol type satisfying
//! [`symbol::Symbol`] — an opaque, hashable, totally ordered type — and adds
//! the automaton flavors that generalization makes possible: symbol-class
//! DFAs over partitioned alphabets, deterministic transducers, and a
//! DFA-with-equivalence-classes structure for regular dictionaries.
//!
//! Start at [`dfa::Dfa`] for the core automaton type, or [`pattern`] for the
//! algebra used to build automata compositionally from patterns rather than
//! concrete syntax (this crate has no regex/ABNF parser of its own — see
//! [`abnf`] for the external front-end contract).

pub mod alphabet;
pub mod dfa;
pub mod dfae;
pub mod dft;
pub mod fpl;
pub mod pattern;
pub mod seq;
pub mod symbol;
pub mod symclass;
pub mod unicode;

pub mod abnf;
pub mod catalog;
pub mod cfg;

mod nfa;

#[cfg(test)]
mod proptests;

pub use alphabet::{Alphabet, Table};
pub use dfa::Dfa;
pub use dfae::{Atom, Dfae};
pub use dft::Dft;
pub use fpl::Fpl;
pub use pattern::{Pattern, PatternTarget};
pub use seq::Seq;
pub use symbol::Symbol;
pub use symclass::ClassDfa;
