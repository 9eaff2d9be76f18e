//! Crate-private epsilon-NFA scaffolding.
//!
//! spec.md's System Overview table has no row for a non-deterministic
//! automaton — the public surface is DFA-only. But several DFA closure
//! operations are naturally built as "make an NFA with epsilon bridges,
//! then determinize", exactly the way `dandy::regex::Regex::to_nfa` builds
//! an NFA and then calls `Nfa::to_dfa` (subset construction). This module
//! is that scaffolding, generalized to an arbitrary symbol type and kept
//! `pub(crate)`: it is an implementation detail of
//! [`crate::dfa::Dfa::concatenation`], [`crate::dfa::Dfa::star`],
//! [`crate::dfa::Dfa::reverse`] and [`crate::pattern::lower`]'s DFA target.
use crate::dfa::{Dfa, StateId};
use crate::symbol::Symbol;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Clone, Debug)]
pub(crate) struct NfaState<S: Symbol> {
    pub(crate) accepting: bool,
    pub(crate) epsilon: Vec<StateId>,
    pub(crate) transitions: BTreeMap<S, Vec<StateId>>,
}

impl<S: Symbol> NfaState<S> {
    fn empty() -> Self {
        Self {
            accepting: false,
            epsilon: Vec::new(),
            transitions: BTreeMap::new(),
        }
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Nfa<S: Symbol> {
    pub(crate) states: Vec<NfaState<S>>,
    pub(crate) initial: StateId,
}

impl<S: Symbol> Nfa<S> {
    pub(crate) fn from_symbol(sym: S) -> Self {
        let mut start = NfaState::empty();
        start.transitions.insert(sym, vec![1]);
        let accept = NfaState {
            accepting: true,
            ..NfaState::empty()
        };
        Self {
            states: vec![start, accept],
            initial: 0,
        }
    }

    pub(crate) fn from_epsilon() -> Self {
        Self {
            states: vec![NfaState {
                accepting: true,
                ..NfaState::empty()
            }],
            initial: 0,
        }
    }

    pub(crate) fn from_empty() -> Self {
        Self {
            states: vec![NfaState::empty()],
            initial: 0,
        }
    }

    /// Epsilon closure of a single state.
    pub(crate) fn closure(&self, start: StateId) -> BTreeSet<StateId> {
        let mut seen = BTreeSet::from([start]);
        let mut frontier = vec![start];
        while let Some(s) = frontier.pop() {
            for &t in &self.states[s].epsilon {
                if seen.insert(t) {
                    frontier.push(t);
                }
            }
        }
        seen
    }

    /// Merge `other` into `self`'s state vector, renumbering `other`'s
    /// state ids by the given offset. Returns the renumbered initial state
    /// id of `other`.
    fn absorb(&mut self, other: Nfa<S>) -> StateId {
        let offset = self.states.len();
        for mut state in other.states {
            state.epsilon.iter_mut().for_each(|s| *s += offset);
            for targets in state.transitions.values_mut() {
                targets.iter_mut().for_each(|s| *s += offset);
            }
            self.states.push(state);
        }
        other.initial + offset
    }

    /// n-ary concatenation: bridge each component's finals to the next
    /// component's initial with an epsilon edge, demoting the bridged
    /// finals to non-final (acceptance now only happens at the very end).
    pub(crate) fn concatenate(parts: Vec<Nfa<S>>) -> Self {
        let mut parts = parts.into_iter();
        let Some(mut acc) = parts.next() else {
            return Nfa::from_epsilon();
        };
        for part in parts {
            let new_initial = acc.absorb(part);
            for state in acc.states.iter_mut() {
                if state.accepting {
                    state.accepting = false;
                    state.epsilon.push(new_initial);
                }
            }
        }
        acc
    }

    /// Kleene star: new initial state, final, epsilon to the old initial;
    /// every old final gets an epsilon back to the (new) initial.
    pub(crate) fn star(self) -> Self {
        let Nfa { states, initial } = self;
        let new_initial = states.len();
        let mut states = states;
        for state in states.iter_mut() {
            if state.accepting {
                state.epsilon.push(new_initial);
            }
        }
        states.push(NfaState {
            accepting: true,
            epsilon: vec![initial],
            transitions: BTreeMap::new(),
        });
        Nfa {
            states,
            initial: new_initial,
        }
    }

    /// n-ary union: new initial state with epsilon edges to every
    /// component's initial state.
    pub(crate) fn union(parts: Vec<Nfa<S>>) -> Self {
        let mut acc = Nfa {
            states: vec![NfaState::empty()],
            initial: 0,
        };
        let mut inits = Vec::with_capacity(parts.len());
        for part in parts {
            inits.push(acc.absorb(part));
        }
        acc.states[0].epsilon = inits;
        acc
    }

    /// Reverse every edge; the old finals become (epsilon-joined) new
    /// initial, and the old initial becomes the sole new final.
    pub(crate) fn reverse(self) -> Self {
        let Nfa { states, initial } = self;
        let n = states.len();
        let mut rev: Vec<NfaState<S>> = (0..n).map(|_| NfaState::empty()).collect();
        for (from, state) in states.iter().enumerate() {
            for &to in &state.epsilon {
                rev[to].epsilon.push(from);
            }
            for (sym, targets) in &state.transitions {
                for &to in targets {
                    rev[to].transitions.entry(sym.clone()).or_default().push(from);
                }
            }
        }
        let new_final_marker = initial;
        rev[new_final_marker].accepting = true;
        let new_initial = rev.len();
        let bridges: Vec<StateId> = states
            .iter()
            .enumerate()
            .filter(|(_, s)| s.accepting)
            .map(|(i, _)| i)
            .collect();
        rev.push(NfaState {
            accepting: false,
            epsilon: bridges,
            transitions: BTreeMap::new(),
        });
        Nfa {
            states: rev,
            initial: new_initial,
        }
    }

    /// Subset construction: determinize this epsilon-NFA into a `Dfa<S>`.
    pub(crate) fn to_dfa(&self) -> Dfa<S> {
        let alphabet: BTreeSet<S> = self
            .states
            .iter()
            .flat_map(|s| s.transitions.keys().cloned())
            .collect();

        let start_set = self.closure(self.initial);
        let mut set_to_id: BTreeMap<BTreeSet<StateId>, StateId> = BTreeMap::new();
        set_to_id.insert(start_set.clone(), 0);
        let mut frontier = vec![start_set];
        let mut table: Vec<BTreeMap<S, StateId>> = Vec::new();
        let mut finals = BTreeSet::new();

        while let Some(set) = frontier.pop() {
            let this_id = set_to_id[&set];
            if this_id >= table.len() {
                table.resize_with(this_id + 1, BTreeMap::new);
            }
            if set.iter().any(|&s| self.states[s].accepting) {
                finals.insert(this_id);
            }
            for sym in &alphabet {
                let mut next: BTreeSet<StateId> = BTreeSet::new();
                for &s in &set {
                    if let Some(targets) = self.states[s].transitions.get(sym) {
                        for &t in targets {
                            next.extend(self.closure(t));
                        }
                    }
                }
                if next.is_empty() {
                    continue;
                }
                let next_id = *set_to_id.entry(next.clone()).or_insert_with(|| {
                    let id = set_to_id.len();
                    frontier.push(next.clone());
                    id
                });
                table[this_id].insert(sym.clone(), next_id);
            }
        }

        Dfa::from_raw_parts(table, 0, finals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn concatenation_of_two_symbols_accepts_exactly_that_word() {
        let ab = Nfa::concatenate(vec![Nfa::from_symbol('a'), Nfa::from_symbol('b')]);
        let dfa = ab.to_dfa();
        assert!(dfa.accepts(&['a', 'b']));
        assert!(!dfa.accepts(&['a']));
        assert!(!dfa.accepts(&['b', 'a']));
    }

    #[test]
    fn star_accepts_empty_and_repeats() {
        let star = Nfa::from_symbol('a').star();
        let dfa = star.to_dfa();
        assert!(dfa.accepts(&[]));
        assert!(dfa.accepts(&['a']));
        assert!(dfa.accepts(&['a', 'a', 'a']));
        assert!(!dfa.accepts(&['b']));
    }

    #[test]
    fn union_accepts_either() {
        let u = Nfa::union(vec![Nfa::from_symbol('a'), Nfa::from_symbol('b')]);
        let dfa = u.to_dfa();
        assert!(dfa.accepts(&['a']));
        assert!(dfa.accepts(&['b']));
        assert!(!dfa.accepts(&['a', 'b']));
    }

    #[test]
    fn reverse_of_ab_accepts_ba() {
        let ab = Nfa::concatenate(vec![Nfa::from_symbol('a'), Nfa::from_symbol('b')]);
        let dfa = ab.reverse().to_dfa();
        assert!(dfa.accepts(&['b', 'a']));
        assert!(!dfa.accepts(&['a', 'b']));
    }
}
