//! # Alphabet & partition engine
//!
//! An [`Alphabet`] is a set of pairwise-disjoint, non-empty subsets
//! ("partitions") of a symbol type. It is the machinery that lets an
//! automaton treat a whole range or class of symbols as a single transition
//! atom while still being able to refine the partitioning when two
//! automata with different granularity are combined — see
//! [`crate::symclass::ClassDfa`], which is the consumer of this module.
use crate::symbol::Symbol;
use std::collections::{BTreeMap, BTreeSet};

/// A set of pairwise-disjoint non-empty subsets of `S`.
///
/// The invariant (every partition non-empty, all partitions pairwise
/// disjoint) is maintained by construction: the only way to populate an
/// `Alphabet` is through [`Alphabet::insert`], which always
/// splits-then-drops-empties rather than letting the caller push a raw
/// partition in directly.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Alphabet<S: Symbol> {
    partitions: Vec<BTreeSet<S>>,
}

impl<S: Symbol> Alphabet<S> {
    pub fn new() -> Self {
        Self {
            partitions: Vec::new(),
        }
    }

    pub fn partitions(&self) -> &[BTreeSet<S>] {
        &self.partitions
    }

    pub fn contains(&self, sym: &S) -> bool {
        self.partitions.iter().any(|p| p.contains(sym))
    }

    /// The partition containing `sym`, or `None` if `sym` isn't covered by
    /// this alphabet (the "expected negative result" case — §7 of the
    /// error-handling design: absence-of-value, not failure).
    pub fn siblings(&self, sym: &S) -> Option<&BTreeSet<S>> {
        self.partitions.iter().find(|p| p.contains(sym))
    }

    pub fn is_equivalent(&self, a: &S, b: &S) -> bool {
        self.siblings(a) == self.siblings(b)
    }

    /// Refines this alphabet by `subset`: every existing partition that
    /// overlaps `subset` is split into `partition ∩ subset` and
    /// `partition \ subset` (both kept, if non-empty), then whatever of
    /// `subset` wasn't already covered is added as a new partition.
    ///
    /// This is `partitionReduce` applied to a single base set — see
    /// [`partition_reduce`], which this delegates to.
    pub fn insert(&mut self, subset: BTreeSet<S>) {
        self.partitions = partition_reduce(std::mem::take(&mut self.partitions), &subset);
    }

    /// Subtracts `subset` from every overlapping partition, dropping any
    /// partition that becomes empty.
    pub fn remove(&mut self, subset: &BTreeSet<S>) {
        self.partitions = self
            .partitions
            .drain(..)
            .flat_map(|p| {
                let remaining: BTreeSet<S> = p.difference(subset).cloned().collect();
                (!remaining.is_empty()).then_some(remaining)
            })
            .collect();
    }

    /// Refines `self` by every partition of `other`.
    pub fn conjunction(&mut self, other: &Alphabet<S>) {
        for part in &other.partitions {
            self.insert(part.clone());
        }
    }

    /// The full set of symbols covered by this alphabet.
    pub fn symbols(&self) -> BTreeSet<S> {
        self.partitions.iter().flatten().cloned().collect()
    }

    /// Build an alphabet directly from a disjoint collection of partitions
    /// (used when the partitions are already known to be pairwise disjoint,
    /// e.g. when lifting [`crate::dfa::Dfa::alphabet_partitions`] results).
    pub fn from_disjoint_partitions(partitions: Vec<BTreeSet<S>>) -> Self {
        debug_assert!(
            is_pairwise_disjoint(&partitions),
            "partitions passed to from_disjoint_partitions must be pairwise disjoint"
        );
        Self {
            partitions: partitions.into_iter().filter(|p| !p.is_empty()).collect(),
        }
    }
}

fn is_pairwise_disjoint<S: Symbol>(partitions: &[BTreeSet<S>]) -> bool {
    for (i, a) in partitions.iter().enumerate() {
        for b in &partitions[i + 1..] {
            if !a.is_disjoint(b) {
                return false;
            }
        }
    }
    true
}

/// The partition-refine primitive: given base partitions `base` and a new
/// set `new`, produce `{b ∩ new, b \ new : b ∈ base} ∪ {new \ ⋃base}`,
/// dropping empties.
pub fn partition_reduce<S: Symbol>(base: Vec<BTreeSet<S>>, new: &BTreeSet<S>) -> Vec<BTreeSet<S>> {
    let mut covered: BTreeSet<S> = BTreeSet::new();
    let mut result = Vec::with_capacity(base.len() + 1);
    for b in base {
        covered.extend(b.iter().cloned());
        let intersection: BTreeSet<S> = b.intersection(new).cloned().collect();
        let difference: BTreeSet<S> = b.difference(new).cloned().collect();
        if !intersection.is_empty() {
            result.push(intersection);
        }
        if !difference.is_empty() {
            result.push(difference);
        }
    }
    let leftover: BTreeSet<S> = new.difference(&covered).cloned().collect();
    if !leftover.is_empty() {
        result.push(leftover);
    }
    result
}

/// Re-partitions two alphabets against each other so both are expressed
/// over one common, mutually-refining partition set — the `alphabetCombine`
/// operation [`crate::symclass::ClassDfa`] combinators need before they can
/// re-encode two differently-partitioned machines onto a shared alphabet.
pub fn alphabet_combine<S: Symbol>(a: &Alphabet<S>, b: &Alphabet<S>) -> Alphabet<S> {
    let mut combined = a.clone();
    combined.conjunction(b);
    combined
}

/// A sorted map from symbol to value, used as the transition table for
/// both [`crate::dfa::Dfa`] (keyed by raw symbols) and
/// [`crate::symclass::ClassDfa`] (keyed by canonical representatives).
/// `BTreeMap` is used directly rather than being re-wrapped, but this
/// type alias documents the role it plays as shared presentation
/// machinery across both automaton flavors.
pub type Table<S, V> = BTreeMap<S, V>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_refines_overlapping_partitions() {
        let mut a = Alphabet::new();
        a.insert(BTreeSet::from([1, 2, 3, 4]));
        a.insert(BTreeSet::from([3, 4, 5, 6]));
        // {1,2,3,4} ∩ {3,4,5,6} = {3,4} should now be its own partition,
        // split apart from {1,2} and {5,6}.
        assert!(a.is_equivalent(&3, &4));
        assert!(!a.is_equivalent(&1, &3));
        assert!(!a.is_equivalent(&5, &3));
        assert_eq!(a.symbols(), BTreeSet::from([1, 2, 3, 4, 5, 6]));
    }

    #[test]
    fn insert_union_is_base_union_new() {
        let mut a = Alphabet::new();
        a.insert(BTreeSet::from(['a', 'b']));
        let before: BTreeSet<char> = a.symbols();
        a.insert(BTreeSet::from(['b', 'c']));
        let after: BTreeSet<char> = a.symbols();
        let mut expected = before;
        expected.extend(['b', 'c']);
        assert_eq!(after, expected);
    }

    #[test]
    fn siblings_of_uncovered_symbol_is_none() {
        let mut a = Alphabet::new();
        a.insert(BTreeSet::from([1, 2]));
        assert_eq!(a.siblings(&99), None);
    }

    #[test]
    fn combine_refines_both_sides_mutually() {
        let mut a = Alphabet::new();
        a.insert(BTreeSet::from([1, 2, 3]));
        let mut b = Alphabet::new();
        b.insert(BTreeSet::from([2, 3, 4]));
        let combined = alphabet_combine(&a, &b);
        assert!(combined.is_equivalent(&2, &3));
        assert!(!combined.is_equivalent(&1, &2));
        assert!(!combined.is_equivalent(&4, &2));
    }
}
