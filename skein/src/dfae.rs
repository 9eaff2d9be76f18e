//! # DFA-with-equivalence (DFAE)
//!
//! A [`Dfae`] is a regular dictionary: given `label → DFA<Symbol>`, it
//! builds a single DFA over the tagged alphabet `Symbol ⊎ Label`
//! ([`Atom`]) such that every accepted input maps to exactly one label.
//! This reuses the same n-ary product-construction machinery
//! [`crate::dfa::Dfa::union`] already implements rather than writing a
//! bespoke combiner — the only new code is the tag-injection step and the
//! final-state-to-label scan.
use crate::dfa::{Dfa, StateId};
use crate::symbol::Symbol;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// The tagged alphabet a [`Dfae`] runs over: either a symbol from the
/// original alphabet, or a label tag marking which partition accepted. The
/// derived `Ord` places every `Raw` before every `Tag` because `Raw` is
/// declared first — this is the "symbols precede tags" total order the
/// construction depends on.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Atom<S, L> {
    Raw(S),
    Tag(L),
}

#[derive(thiserror::Error, Debug)]
pub enum DfaeError<L: fmt::Debug> {
    #[error("labels {0:?} overlap: at least one input is accepted by more than one partition")]
    Overlap(Vec<L>),
}

#[derive(Clone, Debug)]
pub struct Dfae<S: Symbol, L: Symbol> {
    dfa: Dfa<Atom<S, L>>,
    state_to_label: BTreeMap<StateId, L>,
}

impl<S: Symbol, L: Symbol> Dfae<S, L> {
    /// Builds a `Dfae` from `partitions`, a map from label to the DFA that
    /// recognizes that label's inputs. Fails if any two partitions' DFAs
    /// cause the union to reach a final state with more than one tag.
    pub fn build(partitions: BTreeMap<L, Dfa<S>>) -> Result<Self, DfaeError<L>> {
        let mut injected: Vec<Dfa<Atom<S, L>>> = Vec::with_capacity(partitions.len());
        for (label, dfa) in &partitions {
            injected.push(inject_tag(dfa, label.clone()));
        }

        let mut union = injected
            .into_iter()
            .reduce(|acc, next| acc.union(&next))
            .unwrap_or_else(Dfa::empty);
        union = union.remove_unreachable_states();

        let mut state_to_label = BTreeMap::new();
        for &state in union.final_states() {
            let labels: BTreeSet<L> = union
                .transitions(state)
                .keys()
                .filter_map(|atom| match atom {
                    Atom::Tag(label) => Some(label.clone()),
                    Atom::Raw(_) => None,
                })
                .collect();
            if labels.len() > 1 {
                return Err(DfaeError::Overlap(labels.into_iter().collect()));
            }
            if let Some(label) = labels.into_iter().next() {
                state_to_label.insert(state, label);
            }
        }

        Ok(Self { dfa: union, state_to_label })
    }

    /// Runs `word` (over the raw, untagged alphabet) and returns the label
    /// of the partition it belongs to, or `None` if no partition accepts
    /// it.
    pub fn lookup(&self, word: &[S]) -> Option<&L> {
        let tagged: Vec<Atom<S, L>> = word.iter().cloned().map(Atom::Raw).collect();
        let state = self.dfa.run(&tagged)?;
        if !self.dfa.is_final(state) {
            return None;
        }
        self.state_to_label.get(&state)
    }

    pub fn is_equivalent(&self, a: &[S], b: &[S]) -> bool {
        self.lookup(a) == self.lookup(b)
    }
}

/// Lifts `dfa` onto the tagged alphabet and adds a self-loop `Tag(label)`
/// transition at every final state.
fn inject_tag<S: Symbol, L: Symbol>(dfa: &Dfa<S>, label: L) -> Dfa<Atom<S, L>> {
    let mut table: Vec<BTreeMap<Atom<S, L>, StateId>> = Vec::with_capacity(dfa.state_count());
    for state in 0..dfa.state_count() {
        let mut row: BTreeMap<Atom<S, L>, StateId> = dfa
            .transitions(state)
            .iter()
            .map(|(sym, target)| (Atom::Raw(sym.clone()), *target))
            .collect();
        if dfa.is_final(state) {
            row.insert(Atom::Tag(label.clone()), state);
        }
        table.push(row);
    }
    Dfa::from_raw_parts(table, dfa.initial_state(), dfa.final_states().clone())
}
