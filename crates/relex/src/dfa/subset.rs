//! Subset (powerset) construction from a merged NFA.

use super::{Dfa, DfaState, DfaStateId};
use crate::intern::KindSet;
use crate::nfa::{Nfa, StateId};
use hashbrown::HashMap;
use smallvec::SmallVec;
use std::collections::{BTreeSet, VecDeque};

type CanonicalMap = HashMap<BTreeSet<StateId>, DfaStateId, ahash::RandomState>;

/// Convert a merged NFA into a DFA.
///
/// Each DFA state's kernel is an ε-closed set of NFA states; a canonical map
/// keyed on the kernel guarantees that equal kernels never yield two states.
/// Accepting kinds are the union of the kernel members' labels, so a lexeme
/// matched by several rules keeps all of them. The resulting transition
/// function is partial; completion happens during minimization.
#[must_use]
pub fn subset_construction(nfa: &Nfa) -> Dfa {
    let alphabet = nfa.alphabet();
    let mut states: Vec<DfaState> = Vec::new();
    let mut canonical = CanonicalMap::default();
    let mut worklist: VecDeque<DfaStateId> = VecDeque::new();

    let start_kernel = epsilon_closure(nfa, [nfa.start()]);
    let start = intern_state(nfa, &mut states, &mut canonical, start_kernel);
    worklist.push_back(start);

    while let Some(current) = worklist.pop_front() {
        // The kernel is cloned so the arena can grow while we expand it.
        let kernel = states[current.index()].kernel.clone();

        for &symbol in &alphabet {
            let moved = move_on(nfa, &kernel, symbol);
            if moved.is_empty() {
                continue;
            }
            let next_kernel = epsilon_closure(nfa, moved);

            let next = match canonical.get(&next_kernel) {
                Some(&existing) => existing,
                None => {
                    let created = intern_state(nfa, &mut states, &mut canonical, next_kernel);
                    worklist.push_back(created);
                    created
                }
            };

            states[current.index()].transitions.insert(symbol, next);
        }
    }

    Dfa {
        states,
        start,
        sink: None,
        alphabet,
    }
}

/// Register a kernel as a new DFA state, deriving its accepted kinds from
/// the labels of its members.
fn intern_state(
    nfa: &Nfa,
    states: &mut Vec<DfaState>,
    canonical: &mut CanonicalMap,
    kernel: BTreeSet<StateId>,
) -> DfaStateId {
    let kinds: KindSet = kernel
        .iter()
        .filter_map(|&id| nfa.state(id).accept())
        .collect();

    let id = DfaStateId::new(states.len());
    canonical.insert(kernel.clone(), id);
    states.push(DfaState::new(kernel, kinds));
    id
}

/// Smallest superset of `seed` closed under ε-edges, via a depth-first
/// frontier walk.
pub(crate) fn epsilon_closure(
    nfa: &Nfa,
    seed: impl IntoIterator<Item = StateId>,
) -> BTreeSet<StateId> {
    let mut closure = BTreeSet::new();
    let mut stack: Vec<StateId> = seed.into_iter().collect();

    while let Some(id) = stack.pop() {
        if !closure.insert(id) {
            continue;
        }
        for &next in nfa.state(id).epsilon() {
            if !closure.contains(&next) {
                stack.push(next);
            }
        }
    }

    closure
}

/// Union of non-ε successors under `symbol` over all states in `from`.
fn move_on(nfa: &Nfa, from: &BTreeSet<StateId>, symbol: char) -> SmallVec<[StateId; 8]> {
    let mut reached = SmallVec::new();
    for &id in from {
        reached.extend_from_slice(nfa.state(id).successors(symbol));
    }
    reached
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intern::Interner;
    use crate::nfa::ThompsonBuilder;
    use std::collections::HashSet;

    fn dfa_for(rules: &[(&str, &str)]) -> Dfa {
        let mut interner = Interner::new();
        let mut builder = ThompsonBuilder::new();
        for (name, pattern) in rules {
            builder
                .add_rule(interner.intern(name), pattern)
                .expect("pattern compiles");
        }
        subset_construction(&builder.finish())
    }

    #[test]
    fn test_epsilon_closure_follows_chains() {
        let mut interner = Interner::new();
        let mut builder = ThompsonBuilder::new();
        builder.add_rule(interner.intern("A"), "a*").expect("compiles");
        let nfa = builder.finish();

        // From the merged start, the closure must reach the star's accept
        // state without consuming input.
        let closure = epsilon_closure(&nfa, [nfa.start()]);
        assert!(closure.contains(&nfa.accepts()[0]));
    }

    #[test]
    fn test_kernels_are_canonical() {
        let dfa = dfa_for(&[("A", "ab|ab|.ab|*."), ("B", "ba.")]);
        let mut seen = HashSet::new();
        for (_, state) in dfa.states() {
            assert!(
                seen.insert(state.kernel().clone()),
                "duplicate kernel produced"
            );
        }
    }

    #[test]
    fn test_accepting_iff_kernel_labeled() {
        let mut interner = Interner::new();
        let mut builder = ThompsonBuilder::new();
        builder
            .add_rule(interner.intern("KW"), "if.")
            .expect("compiles");
        let nfa = builder.finish();
        let dfa = subset_construction(&nfa);

        for (_, state) in dfa.states() {
            let labeled: KindSet = state
                .kernel()
                .iter()
                .filter_map(|&id| nfa.state(id).accept())
                .collect();
            assert_eq!(state.is_accepting(), !labeled.is_empty());
            assert_eq!(*state.kinds(), labeled);
        }
    }

    #[test]
    fn test_ambiguous_rules_union_kinds() {
        // "if" matches KW; it also matches two-letter identifiers built from
        // the letters i and f.
        let dfa = dfa_for(&[("KW", "if."), ("ID", "if|if|*.")]);
        let kinds = dfa.accepts("if").expect("accepts the lexeme");
        assert_eq!(kinds.len(), 2);
    }

    #[test]
    fn test_transitions_stay_within_alphabet() {
        let dfa = dfa_for(&[("AB", "ab|")]);
        for (_, state) in dfa.states() {
            for (symbol, _) in state.transitions() {
                assert!(dfa.alphabet().contains(&symbol));
            }
        }
    }

    #[test]
    fn test_no_rules_yields_single_rejecting_state() {
        let dfa = subset_construction(&ThompsonBuilder::new().finish());
        assert_eq!(dfa.len(), 1);
        assert!(!dfa.state(dfa.start()).is_accepting());
        assert!(dfa.alphabet().is_empty());
    }
}
