//! # Deterministic finite automaton
//!
//! [`Dfa`] is the workhorse type of this crate: a sparse, partial transition
//! table over an arbitrary [`Symbol`] type, with absence of a transition
//! meaning implicit rejection (the "oblivion state" is never materialized).
//! This mirrors `dandy::dfa::Dfa` in spirit — states are plain indices, the
//! table is state-major — but trades its dense `Vec<usize>` row-per-state
//! table (one entry per alphabet symbol, oblivion a real numbered state) for
//! a `BTreeMap<S, StateId>` per state, since `skein`'s alphabet is not known
//! up front and need not be finite in the way `dandy`'s `&str`-keyed one is.
use crate::nfa::Nfa;
use crate::symbol::Symbol;
use std::collections::{BTreeMap, BTreeSet, VecDeque};

pub type StateId = usize;

/// A deterministic finite automaton over `S`.
///
/// `table[state]` gives that state's outgoing transitions; a symbol missing
/// from the map means "go to oblivion and reject", exactly as spec'd.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dfa<S: Symbol> {
    table: Vec<BTreeMap<S, StateId>>,
    initial: StateId,
    finals: BTreeSet<StateId>,
}

impl<S: Symbol> Dfa<S> {
    pub(crate) fn from_raw_parts(
        table: Vec<BTreeMap<S, StateId>>,
        initial: StateId,
        finals: BTreeSet<StateId>,
    ) -> Self {
        Self {
            table,
            initial,
            finals,
        }
    }

    pub fn state_count(&self) -> usize {
        self.table.len()
    }

    pub fn initial_state(&self) -> StateId {
        self.initial
    }

    pub fn final_states(&self) -> &BTreeSet<StateId> {
        &self.finals
    }

    pub fn is_final(&self, state: StateId) -> bool {
        self.finals.contains(&state)
    }

    /// Outgoing transitions of `state`, keyed by symbol.
    pub fn transitions(&self, state: StateId) -> &BTreeMap<S, StateId> {
        &self.table[state]
    }

    /// The inverse of [`Dfa::transitions`]: `state`'s outgoing edges grouped
    /// by destination rather than by symbol, per the DFA contract.
    pub fn targets(&self, state: StateId) -> BTreeMap<StateId, BTreeSet<S>> {
        let mut grouped: BTreeMap<StateId, BTreeSet<S>> = BTreeMap::new();
        for (sym, target) in &self.table[state] {
            grouped.entry(*target).or_default().insert(sym.clone());
        }
        grouped
    }

    /// Single-step transition function; `None` is oblivion.
    pub fn step(&self, state: StateId, sym: &S) -> Option<StateId> {
        self.table[state].get(sym).copied()
    }

    /// Runs `word` from the initial state, returning the state reached or
    /// `None` if the run fell into oblivion along the way.
    pub fn run(&self, word: &[S]) -> Option<StateId> {
        word.iter().try_fold(self.initial, |s, sym| self.step(s, sym))
    }

    pub fn accepts(&self, word: &[S]) -> bool {
        self.run(word).is_some_and(|s| self.is_final(s))
    }

    /// The full set of symbols mentioned anywhere in the transition table.
    pub fn alphabet(&self) -> BTreeSet<S> {
        self.table.iter().flat_map(|row| row.keys().cloned()).collect()
    }

    // ---- primitive constructors ----

    /// The automaton that rejects every word (empty language).
    pub fn empty() -> Self {
        Self {
            table: vec![BTreeMap::new()],
            initial: 0,
            finals: BTreeSet::new(),
        }
    }

    /// The automaton that accepts exactly the empty word.
    pub fn epsilon() -> Self {
        Self {
            table: vec![BTreeMap::new()],
            initial: 0,
            finals: BTreeSet::from([0]),
        }
    }

    /// The automaton that accepts exactly the single-symbol word `sym`.
    pub fn symbol(sym: S) -> Self {
        let mut start = BTreeMap::new();
        start.insert(sym, 1);
        Self {
            table: vec![start, BTreeMap::new()],
            initial: 0,
            finals: BTreeSet::from([1]),
        }
    }

    /// The automaton that accepts exactly the given word, nothing else.
    pub fn verbatim(word: impl IntoIterator<Item = S>) -> Self {
        let word: Vec<S> = word.into_iter().collect();
        if word.is_empty() {
            return Self::epsilon();
        }
        let mut table = Vec::with_capacity(word.len() + 1);
        for (i, sym) in word.into_iter().enumerate() {
            let mut row = BTreeMap::new();
            row.insert(sym, i + 1);
            table.push(row);
        }
        table.push(BTreeMap::new());
        let last = table.len() - 1;
        Self {
            initial: 0,
            finals: BTreeSet::from([last]),
            table,
        }
    }

    // ---- reachability bookkeeping (carried over from the teacher almost verbatim) ----

    pub fn reachable_states(&self) -> BTreeSet<StateId> {
        let mut seen = BTreeSet::from([self.initial]);
        let mut frontier = VecDeque::from([self.initial]);
        while let Some(s) = frontier.pop_front() {
            for &t in self.table[s].values() {
                if seen.insert(t) {
                    frontier.push_back(t);
                }
            }
        }
        seen
    }

    pub fn unreachable_states(&self) -> BTreeSet<StateId> {
        let reachable = self.reachable_states();
        (0..self.table.len()).filter(|s| !reachable.contains(s)).collect()
    }

    /// Drops every unreachable state and renumbers the rest densely,
    /// preserving relative order.
    pub fn remove_unreachable_states(&self) -> Self {
        let reachable = self.reachable_states();
        let mut renumber: BTreeMap<StateId, StateId> = BTreeMap::new();
        for (new_id, old_id) in reachable.iter().enumerate() {
            renumber.insert(*old_id, new_id);
        }
        let mut table = Vec::with_capacity(reachable.len());
        for &old in &reachable {
            let row = self.table[old]
                .iter()
                .map(|(sym, target)| (sym.clone(), renumber[target]))
                .collect();
            table.push(row);
        }
        let finals = self
            .finals
            .iter()
            .filter_map(|f| renumber.get(f).copied())
            .collect();
        Self {
            table,
            initial: renumber[&self.initial],
            finals,
        }
    }

    // ---- product construction (union / intersection / difference) ----

    fn product(a: &Self, b: &Self, accept: impl Fn(bool, bool) -> bool) -> Self {
        let alphabet: BTreeSet<S> = a.alphabet().into_iter().chain(b.alphabet()).collect();
        // Each component of a pair is `None` once that side has fallen into
        // oblivion — a permanent, absorbing state rather than a dead end
        // for the whole product, so a symbol outside one component's
        // alphabet doesn't kill the other component's continued run. This
        // is what lets union/difference behave correctly when the two
        // inputs have different alphabets.
        type Pair = (Option<StateId>, Option<StateId>);
        let is_final_a = |s: Option<StateId>| s.is_some_and(|s| a.is_final(s));
        let is_final_b = |s: Option<StateId>| s.is_some_and(|s| b.is_final(s));

        let mut pair_to_id: BTreeMap<Pair, StateId> = BTreeMap::new();
        let start: Pair = (Some(a.initial), Some(b.initial));
        pair_to_id.insert(start, 0);
        let mut frontier = VecDeque::from([start]);
        let mut table: Vec<BTreeMap<S, StateId>> = Vec::new();
        let mut finals = BTreeSet::new();

        while let Some(pair) = frontier.pop_front() {
            let id = pair_to_id[&pair];
            if id >= table.len() {
                table.resize_with(id + 1, BTreeMap::new);
            }
            if accept(is_final_a(pair.0), is_final_b(pair.1)) {
                finals.insert(id);
            }
            for sym in &alphabet {
                let next_a = pair.0.and_then(|s| a.step(s, sym));
                let next_b = pair.1.and_then(|s| b.step(s, sym));
                if next_a.is_none() && next_b.is_none() {
                    continue;
                }
                let next_pair = (next_a, next_b);
                let next_id = *pair_to_id.entry(next_pair).or_insert_with(|| {
                    let id = pair_to_id.len();
                    frontier.push_back(next_pair);
                    id
                });
                table[id].insert(sym.clone(), next_id);
            }
        }

        Self {
            table,
            initial: 0,
            finals,
        }
        .remove_unreachable_states()
    }

    pub fn union(&self, other: &Self) -> Self {
        Self::product(self, other, |a, b| a || b)
    }

    pub fn intersection(&self, other: &Self) -> Self {
        Self::product(self, other, |a, b| a && b)
    }

    pub fn difference(&self, other: &Self) -> Self {
        Self::product(self, other, |a, b| a && !b)
    }

    /// Complement with respect to a total alphabet: symbols outside `over`
    /// that already appear in `self` are preserved; transitions missing for
    /// some `over` symbol are completed by routing through an explicit
    /// oblivion state, which becomes final (so it must then be accepted) —
    /// this is the one place the crate materializes oblivion as a real
    /// state, because complementing an implicit reject requires it.
    pub fn complement(&self, over: &BTreeSet<S>) -> Self {
        let oblivion = self.table.len();
        let mut table = self.table.clone();
        table.push(BTreeMap::new());
        for row in table.iter_mut() {
            for sym in over {
                row.entry(sym.clone()).or_insert(oblivion);
            }
        }
        let finals: BTreeSet<StateId> = (0..table.len())
            .filter(|s| *s == oblivion || !self.finals.contains(s))
            .collect();
        Self {
            table,
            initial: self.initial,
            finals,
        }
    }

    // ---- NFA-mediated closures ----

    fn to_nfa(&self) -> Nfa<S> {
        let mut states = Vec::with_capacity(self.table.len());
        for (i, row) in self.table.iter().enumerate() {
            let mut transitions = BTreeMap::new();
            for (sym, target) in row {
                transitions.insert(sym.clone(), vec![*target]);
            }
            states.push(crate::nfa::NfaState {
                accepting: self.is_final(i),
                epsilon: Vec::new(),
                transitions,
            });
        }
        Nfa {
            states,
            initial: self.initial,
        }
    }

    pub fn concatenation(&self, other: &Self) -> Self {
        Nfa::concatenate(vec![self.to_nfa(), other.to_nfa()]).to_dfa()
    }

    pub fn star(&self) -> Self {
        self.to_nfa().star().to_dfa()
    }

    /// `self+` = `self` concatenated with `self*`.
    pub fn plus(&self) -> Self {
        self.concatenation(&self.star())
    }

    /// `self?` = `self` unioned with the epsilon language.
    pub fn optional(&self) -> Self {
        self.union(&Dfa::epsilon())
    }

    pub fn reverse(&self) -> Self {
        self.to_nfa().reverse().to_dfa()
    }

    pub fn is_equivalent(&self, other: &Self) -> bool {
        self.difference(other).is_empty_language() && other.difference(self).is_empty_language()
    }

    pub fn is_empty_language(&self) -> bool {
        let reachable = self.reachable_states();
        reachable.is_disjoint(&self.finals)
    }

    // ---- minimization (Hopcroft) ----

    /// Minimizes via Hopcroft's partition-refinement algorithm, after first
    /// dropping unreachable states (a DFA with unreachable junk can't be
    /// meaningfully minimized — those states aren't distinguishable from
    /// anything because nothing ever visits them).
    pub fn minimize(&self) -> Self {
        let reachable = self.remove_unreachable_states();
        let n = reachable.table.len();
        if n == 0 {
            return reachable;
        }
        let alphabet: Vec<S> = reachable.alphabet().into_iter().collect();

        let finals: BTreeSet<StateId> = reachable.finals.clone();
        let non_finals: BTreeSet<StateId> = (0..n).filter(|s| !finals.contains(s)).collect();

        let mut partitions: Vec<BTreeSet<StateId>> =
            [finals.clone(), non_finals].into_iter().filter(|p| !p.is_empty()).collect();
        let mut worklist: Vec<BTreeSet<StateId>> = partitions.clone();

        // Reverse transition index: for each symbol, which states lead into
        // a given state on that symbol.
        let mut predecessors: BTreeMap<&S, BTreeMap<StateId, Vec<StateId>>> = BTreeMap::new();
        for sym in &alphabet {
            let mut by_target: BTreeMap<StateId, Vec<StateId>> = BTreeMap::new();
            for s in 0..n {
                if let Some(t) = reachable.step(s, sym) {
                    by_target.entry(t).or_default().push(s);
                }
            }
            predecessors.insert(sym, by_target);
        }

        while let Some(splitter) = worklist.pop() {
            for sym in &alphabet {
                let by_target = &predecessors[sym];
                let mut into_splitter: BTreeSet<StateId> = BTreeSet::new();
                for s in &splitter {
                    if let Some(preds) = by_target.get(s) {
                        into_splitter.extend(preds.iter().copied());
                    }
                }
                if into_splitter.is_empty() {
                    continue;
                }
                let mut next_partitions = Vec::with_capacity(partitions.len());
                for block in partitions.drain(..) {
                    let inside: BTreeSet<StateId> = block.intersection(&into_splitter).cloned().collect();
                    let outside: BTreeSet<StateId> = block.difference(&into_splitter).cloned().collect();
                    if inside.is_empty() || outside.is_empty() {
                        next_partitions.push(block);
                        continue;
                    }
                    if let Some(pos) = worklist.iter().position(|w| *w == block) {
                        worklist.remove(pos);
                        worklist.push(inside.clone());
                        worklist.push(outside.clone());
                    } else if inside.len() <= outside.len() {
                        worklist.push(inside.clone());
                    } else {
                        worklist.push(outside.clone());
                    }
                    next_partitions.push(inside);
                    next_partitions.push(outside);
                }
                partitions = next_partitions;
            }
        }

        // Build the minimized table: one state per block, canonical
        // representative picked as the block's least element so the result
        // is deterministic given the same input.
        partitions.sort();
        let mut state_to_block: BTreeMap<StateId, StateId> = BTreeMap::new();
        for (block_id, block) in partitions.iter().enumerate() {
            for &s in block {
                state_to_block.insert(s, block_id);
            }
        }
        let mut table = Vec::with_capacity(partitions.len());
        for block in &partitions {
            let rep = *block.iter().next().unwrap();
            let row = reachable.table[rep]
                .iter()
                .map(|(sym, target)| (sym.clone(), state_to_block[target]))
                .collect();
            table.push(row);
        }
        let initial = state_to_block[&reachable.initial];
        let new_finals = partitions
            .iter()
            .enumerate()
            .filter(|(_, block)| block.iter().any(|s| finals.contains(s)))
            .map(|(id, _)| id)
            .collect();

        Self {
            table,
            initial,
            finals: new_finals,
        }
        .renumber_breadth_first()
    }

    /// Renumbers states in breadth-first order from the initial state. Used
    /// after minimization so that the result is stable across equal inputs,
    /// independent of whatever internal block ordering produced it.
    fn renumber_breadth_first(&self) -> Self {
        let mut order = Vec::with_capacity(self.table.len());
        let mut seen = BTreeSet::from([self.initial]);
        let mut frontier = VecDeque::from([self.initial]);
        order.push(self.initial);
        while let Some(s) = frontier.pop_front() {
            for t in self.table[s].values() {
                if seen.insert(*t) {
                    order.push(*t);
                    frontier.push_back(*t);
                }
            }
        }
        let renumber: BTreeMap<StateId, StateId> =
            order.iter().enumerate().map(|(new, &old)| (old, new)).collect();
        let table = order
            .iter()
            .map(|old| {
                self.table[*old]
                    .iter()
                    .map(|(sym, target)| (sym.clone(), renumber[target]))
                    .collect()
            })
            .collect();
        let finals = self.finals.iter().map(|f| renumber[f]).collect();
        Self {
            table,
            initial: 0,
            finals,
        }
    }

    // ---- enumeration ----

    /// Length-lexicographic enumeration of the language, shortest words
    /// first and lexicographically within each length (the canonical
    /// `Ord` on `S` giving the "lexicographic" order). Infinite languages
    /// yield an infinite iterator; callers `take()` what they need.
    pub fn enumerate(&self) -> Enumerate<'_, S> {
        Enumerate {
            dfa: self,
            queue: VecDeque::from([(self.initial, Vec::new())]),
        }
    }

    /// Whether the language is finite: true iff no reachable-and-co-reachable
    /// state lies on a cycle. Implemented by checking, for every state that
    /// can both be reached from the initial state and can reach a final
    /// state, whether it is revisitable — i.e. whether a DFS from it can
    /// return to it.
    pub fn is_finite(&self) -> bool {
        let reachable = self.reachable_states();
        let co_reachable = self.co_reachable_states();
        let live: BTreeSet<StateId> = reachable.intersection(&co_reachable).cloned().collect();
        if live.is_empty() {
            return true;
        }
        // DFS-based cycle detection restricted to the live subgraph.
        #[derive(Clone, Copy, PartialEq)]
        enum Mark {
            Unvisited,
            InProgress,
            Done,
        }
        let mut mark = vec![Mark::Unvisited; self.table.len()];
        fn visit<S: Symbol>(
            dfa: &Dfa<S>,
            live: &BTreeSet<StateId>,
            mark: &mut Vec<Mark>,
            s: StateId,
        ) -> bool {
            mark[s] = Mark::InProgress;
            for t in dfa.table[s].values() {
                if !live.contains(t) {
                    continue;
                }
                match mark[*t] {
                    Mark::InProgress => return true,
                    Mark::Done => continue,
                    Mark::Unvisited => {
                        if visit(dfa, live, mark, *t) {
                            return true;
                        }
                    }
                }
            }
            mark[s] = Mark::Done;
            false
        }
        for &s in &live {
            if mark[s] == Mark::Unvisited && visit(self, &live, &mut mark, s) {
                return false;
            }
        }
        true
    }

    fn co_reachable_states(&self) -> BTreeSet<StateId> {
        let mut predecessors: BTreeMap<StateId, Vec<StateId>> = BTreeMap::new();
        for (s, row) in self.table.iter().enumerate() {
            for t in row.values() {
                predecessors.entry(*t).or_default().push(s);
            }
        }
        let mut seen: BTreeSet<StateId> = self.finals.clone();
        let mut frontier: VecDeque<StateId> = self.finals.iter().copied().collect();
        while let Some(s) = frontier.pop_front() {
            if let Some(preds) = predecessors.get(&s) {
                for &p in preds {
                    if seen.insert(p) {
                        frontier.push_back(p);
                    }
                }
            }
        }
        seen
    }

    // ---- alphabet partitioning ----

    /// Groups this DFA's alphabet into classes of symbols that are
    /// interchangeable at every state: two symbols are in the same class
    /// iff, for every state, they lead to the same target (including both
    /// leading to oblivion). This is the basis for
    /// [`crate::symclass::ClassDfa`] conversion.
    pub fn alphabet_partitions(&self) -> Vec<BTreeSet<S>> {
        let alphabet = self.alphabet();
        let mut classes: BTreeMap<Vec<Option<StateId>>, BTreeSet<S>> = BTreeMap::new();
        for sym in alphabet {
            let signature: Vec<Option<StateId>> = self.table.iter().map(|row| row.get(&sym).copied()).collect();
            classes.entry(signature).or_default().insert(sym);
        }
        classes.into_values().collect()
    }
}

pub struct Enumerate<'a, S: Symbol> {
    dfa: &'a Dfa<S>,
    queue: VecDeque<(StateId, Vec<S>)>,
}

impl<'a, S: Symbol> Iterator for Enumerate<'a, S> {
    type Item = Vec<S>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (state, word) = self.queue.pop_front()?;
            for (sym, &target) in self.dfa.table[state].iter() {
                let mut next_word = word.clone();
                next_word.push(sym.clone());
                self.queue.push_back((target, next_word));
            }
            if self.dfa.is_final(state) {
                return Some(word);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dfa_ab_star() -> Dfa<char> {
        Dfa::verbatim("ab".chars()).star()
    }

    #[test]
    fn verbatim_accepts_only_itself() {
        let d = Dfa::verbatim("cat".chars());
        assert!(d.accepts(&['c', 'a', 't']));
        assert!(!d.accepts(&['c', 'a']));
        assert!(!d.accepts(&['c', 'a', 't', 's']));
    }

    #[test]
    fn union_accepts_both_languages() {
        let a = Dfa::verbatim("a".chars());
        let b = Dfa::verbatim("b".chars());
        let u = a.union(&b);
        assert!(u.accepts(&['a']));
        assert!(u.accepts(&['b']));
        assert!(!u.accepts(&['c']));
    }

    #[test]
    fn intersection_of_disjoint_languages_is_empty() {
        let a = Dfa::verbatim("a".chars());
        let b = Dfa::verbatim("b".chars());
        let i = a.intersection(&b);
        assert!(i.is_empty_language());
    }

    #[test]
    fn complement_flips_acceptance_over_alphabet() {
        let a = Dfa::symbol('a');
        let over = BTreeSet::from(['a', 'b']);
        let c = a.complement(&over);
        assert!(!c.accepts(&['a']));
        assert!(c.accepts(&['b']));
        assert!(c.accepts(&[]));
    }

    #[test]
    fn minimize_preserves_language() {
        let d = dfa_ab_star();
        let m = d.minimize();
        for w in [vec![], vec!['a', 'b'], vec!['a', 'b', 'a', 'b'], vec!['a']] {
            assert_eq!(d.accepts(&w), m.accepts(&w), "word {w:?}");
        }
    }

    #[test]
    fn minimize_merges_equivalent_states() {
        // Two disjoint paths accepting "a" should collapse into one minimal DFA.
        let a1 = Dfa::verbatim("a".chars());
        let a2 = Dfa::verbatim("a".chars());
        let u = a1.union(&a2).minimize();
        assert_eq!(u.state_count(), Dfa::verbatim("a".chars()).state_count());
    }

    #[test]
    fn enumerate_is_length_lexicographic() {
        let d = Dfa::verbatim("a".chars()).union(&Dfa::verbatim("b".chars()));
        let words: Vec<Vec<char>> = d.enumerate().take(2).collect();
        assert_eq!(words, vec![vec!['a'], vec!['b']]);
    }

    #[test]
    fn star_of_symbol_is_infinite() {
        let d = Dfa::symbol('a').star();
        assert!(!d.is_finite());
    }

    #[test]
    fn verbatim_language_is_finite() {
        let d = Dfa::verbatim("abc".chars());
        assert!(d.is_finite());
    }

    #[test]
    fn alphabet_partitions_group_interchangeable_symbols() {
        // A DFA where 'a' and 'b' behave identically (both just go to the
        // same accepting sink) should class them together.
        let mut row0 = BTreeMap::new();
        row0.insert('a', 1);
        row0.insert('b', 1);
        let table = vec![row0, BTreeMap::new()];
        let d = Dfa::from_raw_parts(table, 0, BTreeSet::from([1]));
        let partitions = d.alphabet_partitions();
        assert_eq!(partitions.len(), 1);
        assert_eq!(partitions[0], BTreeSet::from(['a', 'b']));
    }
}
