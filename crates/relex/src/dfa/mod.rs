//! # Deterministic Finite Automata
//!
//! A [`Dfa`] is produced from a merged NFA by [`subset_construction`] and
//! then rebuilt by [`minimize`], which also completes it with a sink state.
//! Like the NFA, DFA states live in an arena addressed by [`DfaStateId`].
//!
//! Every DFA state remembers its kernel: the set of NFA states it stands
//! for. Subset construction keys its canonical map on the kernel, so no two
//! distinct DFA states ever share one. Accepting states carry the full
//! [`KindSet`] of rules accepting there; the set is never collapsed to a
//! single winner.

use crate::intern::KindSet;
use crate::nfa::StateId;
use std::collections::{BTreeMap, BTreeSet};

mod minimize;
mod subset;

pub use minimize::minimize;
pub use subset::subset_construction;

/// Identity of a DFA state within its arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DfaStateId(u32);

impl DfaStateId {
    fn new(index: usize) -> Self {
        Self(u32::try_from(index).expect("DFA state count exceeds u32::MAX"))
    }

    /// Position of this state in its arena
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// One DFA state: its NFA kernel, symbol transitions, and accepted kinds.
#[derive(Debug, Clone)]
pub struct DfaState {
    kernel: BTreeSet<StateId>,
    transitions: BTreeMap<char, DfaStateId>,
    kinds: KindSet,
}

impl DfaState {
    fn new(kernel: BTreeSet<StateId>, kinds: KindSet) -> Self {
        Self {
            kernel,
            transitions: BTreeMap::new(),
            kinds,
        }
    }

    /// The set of NFA states this DFA state represents.
    ///
    /// After minimization this is the union over the merged block, kept for
    /// debugging and visualization; the scanner never reads it.
    #[must_use]
    pub const fn kernel(&self) -> &BTreeSet<StateId> {
        &self.kernel
    }

    /// The successor on `symbol`, if one is defined
    #[must_use]
    pub fn transition(&self, symbol: char) -> Option<DfaStateId> {
        self.transitions.get(&symbol).copied()
    }

    /// Iterate over transitions in symbol order
    pub fn transitions(&self) -> impl Iterator<Item = (char, DfaStateId)> + '_ {
        self.transitions.iter().map(|(&c, &to)| (c, to))
    }

    /// Whether any rule accepts at this state
    #[must_use]
    pub fn is_accepting(&self) -> bool {
        !self.kinds.is_empty()
    }

    /// Every rule kind accepting at this state
    #[must_use]
    pub const fn kinds(&self) -> &KindSet {
        &self.kinds
    }
}

/// A deterministic finite automaton over a dynamically derived alphabet.
///
/// Fresh out of [`subset_construction`] the transition function is partial
/// and `sink` is unset. After [`minimize`] the automaton is total: every
/// (state, alphabet symbol) pair has a successor, with the tagged sink
/// absorbing all dead ends.
#[derive(Debug, Clone)]
pub struct Dfa {
    states: Vec<DfaState>,
    start: DfaStateId,
    sink: Option<DfaStateId>,
    alphabet: BTreeSet<char>,
}

impl Dfa {
    /// The start state
    #[must_use]
    pub const fn start(&self) -> DfaStateId {
        self.start
    }

    /// The sink state, once completion has run
    #[must_use]
    pub const fn sink(&self) -> Option<DfaStateId> {
        self.sink
    }

    /// Whether `id` is the sink state
    #[must_use]
    pub fn is_sink(&self, id: DfaStateId) -> bool {
        self.sink == Some(id)
    }

    /// Look up a state by id
    #[must_use]
    pub fn state(&self, id: DfaStateId) -> &DfaState {
        &self.states[id.index()]
    }

    /// Iterate over all states with their ids
    pub fn states(&self) -> impl Iterator<Item = (DfaStateId, &DfaState)> {
        self.states
            .iter()
            .enumerate()
            .map(|(i, s)| (DfaStateId::new(i), s))
    }

    /// Number of states
    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Whether the arena holds no states; never true for a constructed DFA,
    /// which always contains at least its start state
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// The input alphabet this automaton is defined over
    #[must_use]
    pub const fn alphabet(&self) -> &BTreeSet<char> {
        &self.alphabet
    }

    /// Run the automaton over a whole string, returning the accepted kinds
    /// if it ends in an accepting state.
    #[must_use]
    pub fn accepts(&self, input: &str) -> Option<&KindSet> {
        let mut current = self.start;
        for symbol in input.chars() {
            current = self.state(current).transition(symbol)?;
        }
        let state = self.state(current);
        state.is_accepting().then(|| state.kinds())
    }
}
