//! Property-based tests for the algebraic invariants named in spec.md §8,
//! grounded in `dandy`'s own property-test module: same `proptest!`-block
//! shape and recursive pattern-generator idiom `dandy`'s orphaned
//! `random_regex` strategy uses for fuzzing its regex parser, adapted here
//! to build `Pattern<char>` trees directly (skein has no concrete syntax to
//! fuzz through a parser — the algebra itself is what's under test).
use crate::alphabet::Alphabet;
use crate::dfa::Dfa;
use crate::pattern::{lower, Pattern};
use proptest::prelude::*;
use std::collections::BTreeSet;

const ALPHABET: [char; 3] = ['a', 'b', 'c'];

fn small_pattern() -> impl Strategy<Value = Pattern<char>> {
    let leaf = prop_oneof![
        Just(Pattern::epsilon()),
        prop::sample::select(&ALPHABET[..]).prop_map(Pattern::symbol),
    ];
    leaf.prop_recursive(4, 32, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 1..4).prop_map(Pattern::union),
            prop::collection::vec(inner.clone(), 1..4).prop_map(Pattern::concatenate),
            inner.prop_map(|p| Pattern::star(p)),
        ]
    })
}

fn small_word() -> impl Strategy<Value = Vec<char>> {
    prop::collection::vec(prop::sample::select(&ALPHABET[..]), 0..6)
}

fn full_alphabet() -> BTreeSet<char> {
    ALPHABET.into_iter().collect()
}

proptest! {
    /// `L(a∪b) = L(b∪a)`.
    #[test]
    fn union_is_commutative(a in small_pattern(), b in small_pattern(), word in small_word()) {
        let ab: Dfa<char> = lower(&Pattern::union(vec![a.clone(), b.clone()]));
        let ba: Dfa<char> = lower(&Pattern::union(vec![b, a]));
        prop_assert_eq!(ab.accepts(&word), ba.accepts(&word));
    }

    /// `L((a∪b)∪c) = L(a∪(b∪c))`.
    #[test]
    fn union_is_associative(
        a in small_pattern(), b in small_pattern(), c in small_pattern(), word in small_word()
    ) {
        let left: Dfa<char> = lower(&Pattern::union(vec![Pattern::union(vec![a.clone(), b.clone()]), c.clone()]));
        let right: Dfa<char> = lower(&Pattern::union(vec![a, Pattern::union(vec![b, c])]));
        prop_assert_eq!(left.accepts(&word), right.accepts(&word));
    }

    /// `L((a·b)·c) = L(a·(b·c))`.
    #[test]
    fn concat_is_associative(
        a in small_pattern(), b in small_pattern(), c in small_pattern(), word in small_word()
    ) {
        let left: Dfa<char> =
            lower(&Pattern::concatenate(vec![Pattern::concatenate(vec![a.clone(), b.clone()]), c.clone()]));
        let right: Dfa<char> = lower(&Pattern::concatenate(vec![a, Pattern::concatenate(vec![b, c])]));
        prop_assert_eq!(left.accepts(&word), right.accepts(&word));
    }

    /// `L(ε·a) = L(a·ε) = L(a)`.
    #[test]
    fn epsilon_is_concat_identity(a in small_pattern(), word in small_word()) {
        let base: Dfa<char> = lower(&a);
        let left: Dfa<char> = lower(&Pattern::concatenate(vec![Pattern::epsilon(), a.clone()]));
        let right: Dfa<char> = lower(&Pattern::concatenate(vec![a, Pattern::epsilon()]));
        prop_assert_eq!(base.accepts(&word), left.accepts(&word));
        prop_assert_eq!(base.accepts(&word), right.accepts(&word));
    }

    /// `L(∅·a) = L(a·∅) = ∅`.
    #[test]
    fn empty_is_concat_absorbing(a in small_pattern(), word in small_word()) {
        let left: Dfa<char> = lower(&Pattern::concatenate(vec![Pattern::empty(), a.clone()]));
        let right: Dfa<char> = lower(&Pattern::concatenate(vec![a, Pattern::empty()]));
        prop_assert!(!left.accepts(&word));
        prop_assert!(!right.accepts(&word));
    }

    /// `L(a*) = L(ε ∪ a·a*)`.
    #[test]
    fn star_law(a in small_pattern(), word in small_word()) {
        let star_a = Pattern::star(a.clone());
        let starred: Dfa<char> = lower(&star_a);
        let unrolled: Dfa<char> =
            lower(&Pattern::union(vec![Pattern::epsilon(), Pattern::concatenate(vec![a, star_a])]));
        prop_assert_eq!(starred.accepts(&word), unrolled.accepts(&word));
    }

    /// `L(¬(a∩b)) = L(¬a ∪ ¬b)` (De Morgan), complementing with respect to
    /// the fixed three-symbol alphabet every generated pattern draws from.
    #[test]
    fn de_morgan_over_intersection(a in small_pattern(), b in small_pattern(), word in small_word()) {
        let over = full_alphabet();
        let da: Dfa<char> = lower(&a);
        let db: Dfa<char> = lower(&b);
        let left = da.intersection(&db).complement(&over);
        let right = da.complement(&over).union(&db.complement(&over));
        prop_assert_eq!(left.accepts(&word), right.accepts(&word));
    }

    /// `minimize(minimize(d)) = minimize(d)`, same state count and equal
    /// as a value (not just language-equivalent).
    #[test]
    fn minimize_is_idempotent(a in small_pattern()) {
        let dfa: Dfa<char> = lower(&a);
        let once = dfa.minimize();
        let twice = once.minimize();
        prop_assert_eq!(once.state_count(), twice.state_count());
        prop_assert_eq!(once, twice);
    }

    /// Lowering a pattern to a DFA, back to a pattern, and to a DFA again
    /// yields a DFA equivalent to the original.
    #[test]
    fn pattern_dfa_round_trip_preserves_language(a in small_pattern()) {
        let dfa: Dfa<char> = lower(&a);
        let pattern_again = dfa.to_pattern();
        let dfa_again: Dfa<char> = lower(&pattern_again);
        prop_assert!(dfa.is_equivalent(&dfa_again));
    }

    /// `insert(w)` on partition set `B` yields partitions each a subset of
    /// some element of `B ∪ {w}`, whose union is `(⋃B) ∪ w`.
    #[test]
    fn alphabet_insert_refines_without_losing_coverage(
        base in prop::collection::vec(prop::sample::select(&ALPHABET[..]), 0..4),
        new in prop::collection::vec(prop::sample::select(&ALPHABET[..]), 0..4),
    ) {
        let base_set: BTreeSet<char> = base.into_iter().collect();
        let new_set: BTreeSet<char> = new.into_iter().collect();

        let mut alphabet = Alphabet::new();
        if !base_set.is_empty() {
            alphabet.insert(base_set.clone());
        }
        alphabet.insert(new_set.clone());

        let expected_coverage: BTreeSet<char> = base_set.union(&new_set).cloned().collect();
        prop_assert_eq!(alphabet.symbols(), expected_coverage);

        for part in alphabet.partitions() {
            let subset_of_base = base_set.is_superset(part);
            let subset_of_new = new_set.is_superset(part);
            prop_assert!(subset_of_base || subset_of_new);
        }
    }
}
