//! # Regular-pattern algebra
//!
//! [`PatternTarget`] is the interface every compilation target for a
//! regular pattern implements (a DFA, a symbol-class DFA, or the tree ADT
//! itself); [`lower`] is the generic fold driver that walks a [`Pattern`]
//! tree and replays it against any `PatternTarget` implementation. This is
//! an "interface + fold driver" pairing, chosen over an associated-type
//! protocol because it gives static dispatch without forcing every target
//! to agree on one associated type shape.
use crate::dfa::Dfa;
use crate::symbol::Symbol;
use std::collections::BTreeMap;

/// The operations any regular-language target must support to be a
/// compilation target for [`Pattern`]. `optional`, `plus`, and the
/// `repeating*` family have default implementations in terms of the
/// required five core operations, which is all an implementer needs to
/// provide.
pub trait PatternTarget<S: Symbol>: Sized + Clone {
    fn empty() -> Self;
    fn epsilon() -> Self;
    fn symbol(sym: S) -> Self;
    fn union(parts: Vec<Self>) -> Self;
    fn concatenate(parts: Vec<Self>) -> Self;
    fn star(self) -> Self;

    fn optional(self) -> Self {
        Self::union(vec![Self::epsilon(), self])
    }

    fn plus(self) -> Self {
        Self::concatenate(vec![self.clone(), self.star()])
    }

    /// Exactly `n` repetitions.
    fn repeating(self, n: usize) -> Self {
        Self::concatenate(std::iter::repeat(self).take(n).collect())
    }

    /// Between `from` and `to` repetitions, inclusive.
    fn repeating_range(self, from: usize, to: usize) -> Self {
        debug_assert!(from <= to, "repeating_range requires from <= to");
        Self::union((from..=to).map(|n| self.clone().repeating(n)).collect())
    }

    /// `from` or more repetitions.
    fn repeating_from(self, from: usize) -> Self {
        Self::concatenate(vec![self.clone().repeating(from), self.star()])
    }
}

/// The pattern tree ADT: a concrete, inspectable implementation of the
/// pattern algebra. All construction goes through the normalizing
/// associated functions ([`Pattern::union`], [`Pattern::concatenate`],
/// [`Pattern::star`]) rather than the enum variants directly, so the
/// invariants in the data model (flattened alternations/concatenations, no
/// duplicate alternatives, `concat` absorbing `∅`, idempotent `star`) hold
/// by construction.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Pattern<S: Symbol> {
    Empty,
    Epsilon,
    Symbol(S),
    Alternation(Vec<Pattern<S>>),
    Concatenation(Vec<Pattern<S>>),
    Star(Box<Pattern<S>>),
}

impl<S: Symbol> Pattern<S> {
    pub fn empty() -> Self {
        Pattern::Empty
    }

    pub fn epsilon() -> Self {
        Pattern::Epsilon
    }

    pub fn symbol(sym: S) -> Self {
        Pattern::Symbol(sym)
    }

    /// Flattens nested alternations, drops `∅` (the identity of union),
    /// deduplicates, and unwraps a single remaining alternative.
    pub fn union(parts: Vec<Pattern<S>>) -> Self {
        let mut flat: Vec<Pattern<S>> = Vec::with_capacity(parts.len());
        for part in parts {
            match part {
                Pattern::Alternation(inner) => flat.extend(inner),
                Pattern::Empty => {}
                other => flat.push(other),
            }
        }
        let deduped: std::collections::BTreeSet<Pattern<S>> = flat.into_iter().collect();
        let mut deduped: Vec<Pattern<S>> = deduped.into_iter().collect();
        match deduped.len() {
            0 => Pattern::Empty,
            1 => deduped.pop().unwrap(),
            _ => Pattern::Alternation(deduped),
        }
    }

    /// Flattens nested concatenations, absorbs `∅` (`concat` with `∅` is
    /// `∅`), drops `ε` components (the identity of concatenation), and
    /// unwraps a single remaining element.
    pub fn concatenate(parts: Vec<Pattern<S>>) -> Self {
        let mut flat: Vec<Pattern<S>> = Vec::with_capacity(parts.len());
        for part in parts {
            match part {
                Pattern::Empty => return Pattern::Empty,
                Pattern::Epsilon => {}
                Pattern::Concatenation(inner) => flat.extend(inner),
                other => flat.push(other),
            }
        }
        match flat.len() {
            0 => Pattern::Epsilon,
            1 => flat.pop().unwrap(),
            _ => Pattern::Concatenation(flat),
        }
    }

    /// Idempotent: `star(star(x)) = star(x)`; `star(∅) = star(ε) = ε`.
    pub fn star(inner: Pattern<S>) -> Self {
        match inner {
            Pattern::Empty | Pattern::Epsilon => Pattern::Epsilon,
            already @ Pattern::Star(_) => already,
            other => Pattern::Star(Box::new(other)),
        }
    }
}

impl<S: Symbol> PatternTarget<S> for Pattern<S> {
    fn empty() -> Self {
        Pattern::empty()
    }

    fn epsilon() -> Self {
        Pattern::epsilon()
    }

    fn symbol(sym: S) -> Self {
        Pattern::symbol(sym)
    }

    fn union(parts: Vec<Self>) -> Self {
        Pattern::union(parts)
    }

    fn concatenate(parts: Vec<Self>) -> Self {
        Pattern::concatenate(parts)
    }

    fn star(self) -> Self {
        Pattern::star(self)
    }
}

/// The generic fold driver: walks `pattern` and replays its shape against
/// `T`'s constructors. This is how a single pattern tree compiles to a DFA,
/// a symbol-class DFA, or (trivially) back to a pattern tree.
pub fn lower<S: Symbol, T: PatternTarget<S>>(pattern: &Pattern<S>) -> T {
    match pattern {
        Pattern::Empty => T::empty(),
        Pattern::Epsilon => T::epsilon(),
        Pattern::Symbol(sym) => T::symbol(sym.clone()),
        Pattern::Alternation(parts) => T::union(parts.iter().map(lower).collect()),
        Pattern::Concatenation(parts) => T::concatenate(parts.iter().map(lower).collect()),
        Pattern::Star(inner) => lower::<S, T>(inner).star(),
    }
}

impl<S: Symbol> PatternTarget<S> for Dfa<S> {
    fn empty() -> Self {
        Dfa::empty()
    }

    fn epsilon() -> Self {
        Dfa::epsilon()
    }

    fn symbol(sym: S) -> Self {
        Dfa::symbol(sym)
    }

    fn union(parts: Vec<Self>) -> Self {
        parts.into_iter().reduce(|a, b| a.union(&b)).unwrap_or_else(Dfa::empty)
    }

    fn concatenate(parts: Vec<Self>) -> Self {
        parts.into_iter().reduce(|a, b| a.concatenation(&b)).unwrap_or_else(Dfa::epsilon)
    }

    fn star(self) -> Self {
        Dfa::star(&self)
    }
}

impl<S: Symbol> Dfa<S> {
    /// Compiles a pattern directly into a DFA via [`lower`].
    pub fn from_pattern(pattern: &Pattern<S>) -> Self {
        lower(pattern)
    }

    /// Turns this DFA back into a pattern tree by state elimination:
    /// states are removed one at a time, each removal folding its
    /// incoming·(self-loop)*·outgoing edges into direct edges between its
    /// predecessors and successors, until only a virtual start and end
    /// state remain.
    pub fn to_pattern(&self) -> Pattern<S> {
        let reachable = self.remove_unreachable_states();
        let n = reachable.table.len();
        let start = n;
        let end = n + 1;

        let mut edges: BTreeMap<(usize, usize), Pattern<S>> = BTreeMap::new();
        add_edge(&mut edges, start, reachable.initial, Pattern::Epsilon);
        for &f in &reachable.finals {
            add_edge(&mut edges, f, end, Pattern::Epsilon);
        }
        for (s, row) in reachable.table.iter().enumerate() {
            for (sym, t) in row {
                add_edge(&mut edges, s, *t, Pattern::Symbol(sym.clone()));
            }
        }

        for r in 0..n {
            let self_loop = edges.remove(&(r, r));
            let self_pattern = match self_loop {
                Some(p) => Pattern::star(p),
                None => Pattern::Epsilon,
            };

            let preds: Vec<(usize, Pattern<S>)> = edges
                .iter()
                .filter(|((_, to), _)| *to == r)
                .map(|((from, _), label)| (*from, label.clone()))
                .collect();
            let succs: Vec<(usize, Pattern<S>)> = edges
                .iter()
                .filter(|((from, _), _)| *from == r)
                .map(|((_, to), label)| (*to, label.clone()))
                .collect();

            edges.retain(|&(from, to), _| from != r && to != r);

            for (from, label_in) in &preds {
                for (to, label_out) in &succs {
                    let combined = Pattern::concatenate(vec![
                        label_in.clone(),
                        self_pattern.clone(),
                        label_out.clone(),
                    ]);
                    add_edge(&mut edges, *from, *to, combined);
                }
            }
        }

        edges.get(&(start, end)).cloned().unwrap_or(Pattern::Empty)
    }
}

fn add_edge<S: Symbol>(edges: &mut BTreeMap<(usize, usize), Pattern<S>>, from: usize, to: usize, label: Pattern<S>) {
    edges
        .entry((from, to))
        .and_modify(|existing| *existing = Pattern::union(vec![existing.clone(), label.clone()]))
        .or_insert(label);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn union_flattens_and_dedupes() {
        let p = Pattern::union(vec![
            Pattern::symbol('a'),
            Pattern::union(vec![Pattern::symbol('b'), Pattern::symbol('a')]),
        ]);
        assert_eq!(p, Pattern::Alternation(vec![Pattern::symbol('a'), Pattern::symbol('b')]));
    }

    #[test]
    fn concatenate_absorbs_empty() {
        let p = Pattern::concatenate(vec![Pattern::symbol('a'), Pattern::empty()]);
        assert_eq!(p, Pattern::Empty);
    }

    #[test]
    fn concatenate_drops_epsilon_unit() {
        let p = Pattern::concatenate(vec![Pattern::epsilon(), Pattern::symbol('a'), Pattern::epsilon()]);
        assert_eq!(p, Pattern::symbol('a'));
    }

    #[test]
    fn star_is_idempotent() {
        let once = Pattern::star(Pattern::symbol('a'));
        let twice = Pattern::star(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn lower_to_dfa_matches_direct_construction() {
        let pattern = Pattern::concatenate(vec![
            Pattern::star(Pattern::union(vec![Pattern::symbol('a'), Pattern::symbol('b')])),
            Pattern::symbol('a'),
            Pattern::union(vec![Pattern::symbol('a'), Pattern::symbol('b')]),
        ]);
        let dfa: Dfa<char> = lower(&pattern);
        let min = dfa.minimize();
        assert_eq!(min.state_count(), 4);
        assert!(min.accepts(&['a', 'a']));
        assert!(min.accepts(&['a', 'a', 'b']));
        assert!(min.accepts(&['b', 'a', 'b']));
        assert!(!min.accepts(&['a']));
        assert!(!min.accepts(&['b']));
        assert!(!min.accepts(&[]));
        assert!(!min.accepts(&['b', 'b']));
    }

    #[test]
    fn to_pattern_round_trips_through_dfa() {
        let original = Dfa::verbatim("ab".chars()).union(&Dfa::verbatim("ac".chars()));
        let pattern = original.to_pattern();
        let rebuilt: Dfa<char> = lower(&pattern);
        assert!(original.is_equivalent(&rebuilt));
    }
}
