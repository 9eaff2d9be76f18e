//! # Deterministic transducer (DFT)
//!
//! A [`Dft`] is a [`crate::dfa::Dfa`] extended with a per-transition output
//! sequence and a per-accept final output. Running it over an input maps
//! the input to an output stream rather than a boolean; the fibers of that
//! map (which inputs produce the same output) are the equivalence classes a
//! DFT induces — this is the construction [`crate::dfae::Dfae`] specializes
//! for the "tag the input with a label" case.
use crate::dfa::{Dfa, StateId};
use crate::seq::Seq;
use crate::symbol::Symbol;
use std::collections::BTreeMap;

#[derive(Clone, Debug)]
pub struct Dft<S: Symbol> {
    dfa: Dfa<S>,
    /// Per-state, per-symbol output emitted on that transition. Co-indexed
    /// with `dfa`'s table; every key here also appears as a transition of
    /// the corresponding `dfa` state (the constructors below maintain this).
    output: Vec<BTreeMap<S, Seq<S>>>,
    /// Output appended once, on acceptance, for each final state.
    final_output: BTreeMap<StateId, Seq<S>>,
}

impl<S: Symbol> Dft<S> {
    pub fn from_parts(
        dfa: Dfa<S>,
        output: Vec<BTreeMap<S, Seq<S>>>,
        final_output: BTreeMap<StateId, Seq<S>>,
    ) -> Self {
        debug_assert_eq!(dfa.state_count(), output.len());
        Self {
            dfa,
            output,
            final_output,
        }
    }

    pub fn dfa(&self) -> &Dfa<S> {
        &self.dfa
    }

    fn step(&self, state: StateId, sym: &S) -> Option<(StateId, &Seq<S>)> {
        let target = self.dfa.step(state, sym)?;
        let out = self.output[state].get(sym)?;
        Some((target, out))
    }

    /// Runs `word` against the transducer, returning the concatenated
    /// output if the underlying run accepts, or `None` otherwise.
    pub fn translate(&self, word: &[S]) -> Option<Seq<S>> {
        let mut state = self.dfa.initial_state();
        let mut acc = Seq::empty();
        for sym in word {
            let (next, out) = self.step(state, sym)?;
            acc = acc.concat(out.clone());
            state = next;
        }
        if self.dfa.is_final(state) {
            let tail = self.final_output.get(&state).cloned().unwrap_or_else(Seq::empty);
            Some(acc.concat(tail))
        } else {
            None
        }
    }

    /// True iff `a` and `b` translate to equal output streams. Input
    /// position has no bearing on this — two inputs of different length can
    /// translate to the same output (every `Dft::top` transition emits the
    /// empty sequence, for instance), so this compares the *outputs*
    /// directly rather than requiring the two runs to stay aligned symbol
    /// for symbol.
    pub fn is_equivalent(&self, a: &[S], b: &[S]) -> bool {
        self.translate(a) == self.translate(b)
    }

    /// The coarsest transducer over `dfa`'s shape: every transition and
    /// every final output is empty, so every accepted input translates to
    /// the empty sequence and the induced partition has a single class.
    pub fn top(dfa: &Dfa<S>) -> Self {
        let output = (0..dfa.state_count())
            .map(|state| dfa.transitions(state).keys().cloned().map(|sym| (sym, Seq::empty())).collect())
            .collect();
        let final_output = dfa.final_states().iter().map(|&s| (s, Seq::empty())).collect();
        Self::from_parts(dfa.clone(), output, final_output)
    }

    /// The finest transducer over `dfa`'s shape: every transition emits the
    /// symbol it consumes, so `translate(w) == Some(w)` for every accepted
    /// `w` and the induced partition is as fine as the accepted language
    /// itself allows (every distinct accepted word its own class).
    pub fn bottom(dfa: &Dfa<S>) -> Self {
        let output = (0..dfa.state_count())
            .map(|state| {
                dfa.transitions(state)
                    .keys()
                    .cloned()
                    .map(|sym| (sym.clone(), Seq::single(sym)))
                    .collect()
            })
            .collect();
        let final_output = dfa.final_states().iter().map(|&s| (s, Seq::empty())).collect();
        Self::from_parts(dfa.clone(), output, final_output)
    }
}
