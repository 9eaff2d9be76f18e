//! # Symbol-class DFA
//!
//! [`ClassDfa`] exposes the same contract as [`crate::dfa::Dfa`] but
//! transitions on equivalence classes of symbols rather than individual
//! symbols: reading input `s` looks up `reduce[s]` first, and absence from
//! the map signals oblivion just as a missing table entry does for a plain
//! DFA. This is the crate's "symbol ranges as single transition atoms"
//! story — `dandy` has no equivalent (its alphabet is always concrete
//! strings), so this module leans on [`crate::alphabet`] for the
//! partitioning algebra instead.
use crate::alphabet::{alphabet_combine, Alphabet};
use crate::dfa::{Dfa, StateId};
use crate::symbol::Symbol;
use std::collections::BTreeMap;

#[derive(Clone, Debug)]
pub struct ClassDfa<S: Symbol> {
    /// The inner DFA, keyed by canonical representatives.
    dfa: Dfa<S>,
    /// Maps every raw symbol this class DFA knows about to the canonical
    /// representative (the least element) of its partition.
    reduce: BTreeMap<S, S>,
}

impl<S: Symbol> ClassDfa<S> {
    /// Builds a `ClassDfa` from a plain DFA: computes
    /// [`Dfa::alphabet_partitions`], picks the least element of each as
    /// canonical, and re-keys the transition table onto those
    /// representatives.
    pub fn from_dfa(dfa: &Dfa<S>) -> Self {
        let partitions = dfa.alphabet_partitions();
        let mut reduce = BTreeMap::new();
        for part in &partitions {
            let rep = part.iter().next().expect("partitions are non-empty").clone();
            for sym in part {
                reduce.insert(sym.clone(), rep.clone());
            }
        }

        let mut table = Vec::with_capacity(dfa.state_count());
        for state in 0..dfa.state_count() {
            let mut row = BTreeMap::new();
            for (sym, target) in dfa.transitions(state) {
                row.insert(reduce[sym].clone(), *target);
            }
            table.push(row);
        }
        let canonical = Dfa::from_raw_parts(table, dfa.initial_state(), dfa.final_states().clone());
        Self { dfa: canonical, reduce }
    }

    pub fn step(&self, state: StateId, sym: &S) -> Option<StateId> {
        let rep = self.reduce.get(sym)?;
        self.dfa.step(state, rep)
    }

    pub fn run(&self, word: &[S]) -> Option<StateId> {
        word.iter().try_fold(self.dfa.initial_state(), |s, sym| self.step(s, sym))
    }

    pub fn accepts(&self, word: &[S]) -> bool {
        self.run(word).is_some_and(|s| self.dfa.is_final(s))
    }

    pub fn is_final(&self, state: StateId) -> bool {
        self.dfa.is_final(state)
    }

    /// The alphabet this class DFA partitions, grouped by representative.
    pub fn alphabet(&self) -> Alphabet<S> {
        let mut by_rep: BTreeMap<S, std::collections::BTreeSet<S>> = BTreeMap::new();
        for (sym, rep) in &self.reduce {
            by_rep.entry(rep.clone()).or_default().insert(sym.clone());
        }
        Alphabet::from_disjoint_partitions(by_rep.into_values().collect())
    }

    /// Re-encodes this class DFA's transition table onto `combined`'s
    /// representatives. `combined` must be a refinement of `self.alphabet()`
    /// (every `combined` partition a subset of one of `self`'s) — callers
    /// only ever pass the result of [`alphabet_combine`], which guarantees
    /// this.
    fn reencode(&self, combined: &Alphabet<S>) -> Dfa<S> {
        let mut table = Vec::with_capacity(self.dfa.state_count());
        for state in 0..self.dfa.state_count() {
            let mut row = BTreeMap::new();
            for part in combined.partitions() {
                let new_rep = part.iter().next().expect("partitions are non-empty");
                if let Some(old_rep) = self.reduce.get(new_rep) {
                    if let Some(target) = self.dfa.step(state, old_rep) {
                        row.insert(new_rep.clone(), target);
                    }
                }
            }
            table.push(row);
        }
        Dfa::from_raw_parts(table, self.dfa.initial_state(), self.dfa.final_states().clone())
    }

    fn reduce_from_alphabet(alphabet: &Alphabet<S>) -> BTreeMap<S, S> {
        let mut reduce = BTreeMap::new();
        for part in alphabet.partitions() {
            let rep = part.iter().next().expect("partitions are non-empty").clone();
            for sym in part {
                reduce.insert(sym.clone(), rep.clone());
            }
        }
        reduce
    }

    /// Combines `self` and `other` under `combine`, first re-partitioning
    /// both onto the mutual refinement of their alphabets via
    /// [`alphabet_combine`] and re-encoding each machine onto it, per the
    /// combinator contract: "re-partition the union of their partition
    /// sets, then re-encode both machines before the combining operation."
    fn combine(&self, other: &Self, combine: impl Fn(&Dfa<S>, &Dfa<S>) -> Dfa<S>) -> Self {
        let combined_alphabet = alphabet_combine(&self.alphabet(), &other.alphabet());
        let a = self.reencode(&combined_alphabet);
        let b = other.reencode(&combined_alphabet);
        Self {
            dfa: combine(&a, &b),
            reduce: Self::reduce_from_alphabet(&combined_alphabet),
        }
    }

    pub fn union(&self, other: &Self) -> Self {
        self.combine(other, Dfa::union)
    }

    pub fn intersection(&self, other: &Self) -> Self {
        self.combine(other, Dfa::intersection)
    }

    pub fn difference(&self, other: &Self) -> Self {
        self.combine(other, Dfa::difference)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn digit_class_dfa() -> ClassDfa<char> {
        // A DFA where every digit '0'..'9' behaves identically: one step to
        // an accepting state.
        let mut row0 = BTreeMap::new();
        for d in '0'..='9' {
            row0.insert(d, 1);
        }
        let table = vec![row0, BTreeMap::new()];
        let dfa = Dfa::from_raw_parts(table, 0, BTreeSet::from([1]));
        ClassDfa::from_dfa(&dfa)
    }

    #[test]
    fn from_dfa_collapses_interchangeable_symbols() {
        let cd = digit_class_dfa();
        assert_eq!(cd.alphabet().partitions().len(), 1);
        assert!(cd.accepts(&['7']));
        assert!(cd.accepts(&['0']));
        assert!(!cd.accepts(&['a']));
    }

    #[test]
    fn union_reconciles_differing_partitions() {
        let digits = digit_class_dfa();
        // A second class DFA that only recognizes '0'..'4' as one class.
        let mut row0 = BTreeMap::new();
        for d in '0'..='4' {
            row0.insert(d, 1);
        }
        let table = vec![row0, BTreeMap::new()];
        let low = ClassDfa::from_dfa(&Dfa::from_raw_parts(table, 0, BTreeSet::from([1])));

        let u = digits.union(&low);
        assert!(u.accepts(&['0']));
        assert!(u.accepts(&['9']));
        assert!(!u.accepts(&['a']));
    }
}
