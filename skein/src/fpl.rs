//! # Finite partitioned language (FPL)
//!
//! An [`Fpl`] is an explicit finite set of sequences together with a
//! partitioning of that set into disjoint labeled groups — the "I already
//! have the answer, here's the set" counterpart to the DFAs elsewhere in
//! this crate, which describe a language implicitly via a transition
//! function. It interoperates with [`crate::dfa::Dfa`] by degrading to one
//! on demand for membership testing.
use crate::dfa::Dfa;
use crate::seq::Seq;
use crate::symbol::Symbol;
use std::collections::{BTreeMap, BTreeSet};

/// An explicit finite language over `S`, partitioned into labeled groups.
///
/// The invariant from the data model — "the union of partitions equals the
/// element set; partitions are pairwise disjoint" — is maintained by
/// construction: [`Fpl::new`] and [`Fpl::insert`] are the only ways to
/// populate a partition, and both route through the same disjointness
/// bookkeeping.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fpl<S: Symbol, L: Symbol> {
    partitions: BTreeMap<L, BTreeSet<Seq<S>>>,
}

impl<S: Symbol, L: Symbol> Fpl<S, L> {
    pub fn new() -> Self {
        Self {
            partitions: BTreeMap::new(),
        }
    }

    /// All elements across every partition.
    pub fn elements(&self) -> BTreeSet<Seq<S>> {
        self.partitions.values().flatten().cloned().collect()
    }

    pub fn partition(&self, label: &L) -> Option<&BTreeSet<Seq<S>>> {
        self.partitions.get(label)
    }

    pub fn contains(&self, word: &Seq<S>) -> bool {
        self.partitions.values().any(|p| p.contains(word))
    }

    /// Adds `word` to the named partition. If `word` already belongs to a
    /// different partition it is moved — partitions stay pairwise disjoint.
    pub fn insert(&mut self, label: L, word: Seq<S>) {
        for (existing_label, set) in self.partitions.iter_mut() {
            if *existing_label != label {
                set.remove(&word);
            }
        }
        self.partitions.entry(label).or_default().insert(word);
    }

    pub fn remove(&mut self, word: &Seq<S>) {
        for set in self.partitions.values_mut() {
            set.remove(word);
        }
    }

    /// Set union of the element sets; a word's label is taken from `self`
    /// when it appears in both (arbitrary but deterministic tie-break).
    pub fn union(&self, other: &Self) -> Self {
        let mut result = self.clone();
        for (label, words) in &other.partitions {
            for word in words {
                if !result.contains(word) {
                    result.insert(label.clone(), word.clone());
                }
            }
        }
        result
    }

    /// Pairwise concatenation of every element of `self` with every
    /// element of `other`, within matching labels is not implied by the
    /// spec — concatenation is over the raw element sets, with the result
    /// placed in `self`'s label when it originated from `self`'s word.
    pub fn concatenate(&self, other: &Self) -> Self {
        let mut result = Fpl::new();
        for (label, words) in &self.partitions {
            for a in words {
                for b in other.elements() {
                    result.insert(label.clone(), a.clone().concat(b));
                }
            }
        }
        result
    }

    /// Elementwise reverse of every sequence, preserving partition labels.
    pub fn reverse(&self) -> Self {
        let mut result = Fpl::new();
        for (label, words) in &self.partitions {
            for word in words {
                let reversed: Seq<S> = word.iter().rev().cloned().collect();
                result.insert(label.clone(), reversed);
            }
        }
        result
    }

    /// Drops `prefix` from the front of every element that starts with it;
    /// elements that don't are dropped from the result entirely (they have
    /// no derivative).
    pub fn derive(&self, prefix: &[S]) -> Self {
        let mut result = Fpl::new();
        for (label, words) in &self.partitions {
            for word in words {
                let slice = word.as_slice();
                if slice.len() >= prefix.len() && &slice[..prefix.len()] == prefix {
                    result.insert(label.clone(), slice[prefix.len()..].iter().cloned().collect());
                }
            }
        }
        result
    }

    /// `star`/`plus` are only defined for the empty and epsilon languages —
    /// starring any other finite language is generally infinite, which an
    /// explicit finite-set representation cannot hold. Callers hitting this
    /// on a non-trivial `Fpl` have made a programmer error (§7, category 1).
    pub fn star(&self, label: L) -> Self {
        let elements = self.elements();
        assert!(
            elements.is_empty() || (elements.len() == 1 && elements.contains(&Seq::empty())),
            "star is only defined on the empty and epsilon finite languages; this language has {} elements",
            elements.len()
        );
        let mut result = Fpl::new();
        result.insert(label, Seq::empty());
        result
    }

    pub fn plus(&self, label: L) -> Self
    where
        L: Clone,
    {
        self.star(label)
    }

    /// Degrades to a DFA (a verbatim-word union) for membership testing of
    /// sequences outside the explicit set via the normal DFA contract.
    pub fn to_dfa(&self) -> Dfa<S> {
        self.elements()
            .into_iter()
            .map(|seq| Dfa::verbatim(seq.into_vec()))
            .reduce(|a, b| a.union(&b))
            .unwrap_or_else(Dfa::empty)
    }
}

impl<S: Symbol, L: Symbol> Default for Fpl<S, L> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seq(word: &str) -> Seq<char> {
        word.chars().collect()
    }

    #[test]
    fn insert_moves_word_between_partitions() {
        let mut fpl: Fpl<char, &str> = Fpl::new();
        fpl.insert("a", seq("x"));
        fpl.insert("b", seq("x"));
        assert!(fpl.partition(&"a").unwrap().is_empty());
        assert!(fpl.partition(&"b").unwrap().contains(&seq("x")));
    }

    #[test]
    fn union_combines_element_sets() {
        let mut a: Fpl<char, &str> = Fpl::new();
        a.insert("a", seq("x"));
        let mut b: Fpl<char, &str> = Fpl::new();
        b.insert("b", seq("y"));
        let u = a.union(&b);
        assert_eq!(u.elements(), BTreeSet::from([seq("x"), seq("y")]));
    }

    #[test]
    fn concatenate_is_pairwise_append() {
        let mut a: Fpl<char, &str> = Fpl::new();
        a.insert("a", seq("x"));
        let mut b: Fpl<char, &str> = Fpl::new();
        b.insert("a", seq("y"));
        b.insert("a", seq("z"));
        let c = a.concatenate(&b);
        assert_eq!(c.elements(), BTreeSet::from([seq("xy"), seq("xz")]));
    }

    #[test]
    fn derive_drops_matching_prefix_and_excludes_non_matching() {
        let mut a: Fpl<char, &str> = Fpl::new();
        a.insert("a", seq("xy"));
        a.insert("a", seq("zz"));
        let d = a.derive(&['x']);
        assert_eq!(d.elements(), BTreeSet::from([seq("y")]));
    }

    #[test]
    fn to_dfa_accepts_exactly_the_explicit_set() {
        let mut a: Fpl<char, &str> = Fpl::new();
        a.insert("a", seq("ab"));
        a.insert("a", seq("cd"));
        let dfa = a.to_dfa();
        assert!(dfa.accepts(&['a', 'b']));
        assert!(dfa.accepts(&['c', 'd']));
        assert!(!dfa.accepts(&['a', 'c']));
    }

    #[test]
    #[should_panic(expected = "star is only defined")]
    fn star_of_non_trivial_language_panics() {
        let mut a: Fpl<char, &str> = Fpl::new();
        a.insert("a", seq("x"));
        a.star("a");
    }

    #[test]
    fn star_of_empty_language_is_epsilon() {
        let a: Fpl<char, &str> = Fpl::new();
        let s = a.star("a");
        assert_eq!(s.elements(), BTreeSet::from([Seq::empty()]));
    }
}
