//! # Nondeterministic Finite Automata
//!
//! NFA states live in an arena (`Vec` of state records) and refer to each
//! other by [`StateId`] index. The arena breaks the ownership cycles that
//! ε-loops would otherwise create and makes state sets cheap to hash and
//! order during subset construction.
//!
//! The only way to build an [`Nfa`] is through [`ThompsonBuilder`], which
//! compiles postfix patterns rule by rule and merges the per-rule fragments
//! under a fresh start state. Accept states are stamped with their rule's
//! kind exactly once, when the rule is added; nothing mutates a label
//! afterwards.

use crate::intern::KindId;
use hashbrown::HashMap;
use smallvec::SmallVec;
use std::collections::BTreeSet;

mod thompson;

pub use thompson::ThompsonBuilder;

/// Identity of an NFA state within its arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StateId(u32);

impl StateId {
    fn new(index: usize) -> Self {
        Self(u32::try_from(index).expect("NFA state count exceeds u32::MAX"))
    }

    /// Position of this state in its arena
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

type SymbolEdges = HashMap<char, SmallVec<[StateId; 2]>, ahash::RandomState>;

/// One NFA state: symbol edges, ε-edges, and an optional accept label.
#[derive(Debug, Default)]
pub struct NfaState {
    transitions: SymbolEdges,
    epsilon: SmallVec<[StateId; 4]>,
    accept: Option<KindId>,
}

impl NfaState {
    fn add_transition(&mut self, symbol: char, to: StateId) {
        self.transitions.entry(symbol).or_default().push(to);
    }

    fn add_epsilon(&mut self, to: StateId) {
        self.epsilon.push(to);
    }

    /// Successors on the given symbol; empty if the symbol has no edge
    #[must_use]
    pub fn successors(&self, symbol: char) -> &[StateId] {
        self.transitions.get(&symbol).map_or(&[], SmallVec::as_slice)
    }

    /// Iterate over all symbol edges of this state
    pub fn transitions(&self) -> impl Iterator<Item = (char, &[StateId])> {
        self.transitions.iter().map(|(&c, to)| (c, to.as_slice()))
    }

    /// ε-successors of this state
    #[must_use]
    pub fn epsilon(&self) -> &[StateId] {
        &self.epsilon
    }

    /// The rule kind accepted at this state, if it is an accept state
    #[must_use]
    pub const fn accept(&self) -> Option<KindId> {
        self.accept
    }
}

/// A merged, multi-accepting NFA ready for subset construction.
#[derive(Debug)]
pub struct Nfa {
    states: Vec<NfaState>,
    start: StateId,
    accepts: Vec<StateId>,
}

impl Nfa {
    /// The merged start state
    #[must_use]
    pub const fn start(&self) -> StateId {
        self.start
    }

    /// All accept states, each carrying its rule's kind
    #[must_use]
    pub fn accepts(&self) -> &[StateId] {
        &self.accepts
    }

    /// Look up a state by id
    #[must_use]
    pub fn state(&self, id: StateId) -> &NfaState {
        &self.states[id.index()]
    }

    /// Number of states in the arena
    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Whether the arena holds no states; never true for a merged NFA,
    /// which always contains at least its start state
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Collect the input alphabet: every symbol on a non-ε edge reachable
    /// from the start state.
    #[must_use]
    pub fn alphabet(&self) -> BTreeSet<char> {
        let mut alphabet = BTreeSet::new();
        let mut visited = vec![false; self.states.len()];
        let mut stack = vec![self.start];

        while let Some(id) = stack.pop() {
            if visited[id.index()] {
                continue;
            }
            visited[id.index()] = true;

            let state = &self.states[id.index()];
            for (symbol, targets) in state.transitions() {
                alphabet.insert(symbol);
                for &next in targets {
                    if !visited[next.index()] {
                        stack.push(next);
                    }
                }
            }
            for &next in state.epsilon() {
                if !visited[next.index()] {
                    stack.push(next);
                }
            }
        }

        alphabet
    }
}
