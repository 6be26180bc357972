//! DFA minimization: reachability and liveness pruning, partition
//! refinement, and completion with a sink state.

use super::{Dfa, DfaState, DfaStateId};
use crate::intern::KindSet;
use hashbrown::{HashMap, HashSet};
use std::collections::{BTreeSet, VecDeque};

type StateSet = HashSet<DfaStateId, ahash::RandomState>;

/// Minimize a DFA and complete it with a sink state.
///
/// Builds a brand-new automaton; the input is never mutated. Three passes
/// run before completion:
///
/// 1. drop states unreachable from the start,
/// 2. drop dead states that cannot reach any accepting state,
/// 3. merge equivalent states by partition refinement, where accepting
///    states start out grouped by their exact [`KindSet`] so that states
///    accepting different rule sets are never conflated.
///
/// The returned automaton is total: every (state, alphabet symbol) pair
/// transitions somewhere, with a tagged non-accepting sink absorbing
/// everything that cannot lead to an accept. If the language is empty the
/// result is the one-state sink automaton.
#[must_use]
pub fn minimize(dfa: &Dfa) -> Dfa {
    let reachable = reachable_states(dfa);
    let live = live_states(dfa, &reachable);

    if !live.contains(&dfa.start()) {
        return sink_only();
    }

    let blocks = refine_partitions(dfa, &live);
    let mut minimized = build_from_blocks(dfa, &live, &blocks);
    complete(&mut minimized);
    minimized
}

/// Forward BFS from the start state.
fn reachable_states(dfa: &Dfa) -> StateSet {
    let mut reachable = StateSet::default();
    let mut queue = VecDeque::new();

    reachable.insert(dfa.start());
    queue.push_back(dfa.start());

    while let Some(id) = queue.pop_front() {
        for (_, next) in dfa.state(id).transitions() {
            if reachable.insert(next) {
                queue.push_back(next);
            }
        }
    }

    reachable
}

/// Backward BFS over the reachable subgraph, seeded with every accepting
/// state. States outside the result can never contribute to a token.
fn live_states(dfa: &Dfa, reachable: &StateSet) -> StateSet {
    let mut predecessors: HashMap<DfaStateId, Vec<DfaStateId>, ahash::RandomState> =
        HashMap::default();
    for &id in reachable {
        for (_, next) in dfa.state(id).transitions() {
            if reachable.contains(&next) {
                predecessors.entry(next).or_default().push(id);
            }
        }
    }

    let mut live = StateSet::default();
    let mut queue = VecDeque::new();
    for &id in reachable {
        if dfa.state(id).is_accepting() {
            live.insert(id);
            queue.push_back(id);
        }
    }

    while let Some(id) = queue.pop_front() {
        if let Some(preds) = predecessors.get(&id) {
            for &pred in preds {
                if live.insert(pred) {
                    queue.push_back(pred);
                }
            }
        }
    }

    live
}

/// Partition the live states into equivalence classes.
///
/// The initial partition puts all non-accepting states in one block and
/// buckets accepting states by their exact kind set. Refinement then splits
/// any block whose members disagree on which block a symbol leads to,
/// following the classic smaller-half worklist discipline.
fn refine_partitions(dfa: &Dfa, live: &StateSet) -> Vec<Vec<DfaStateId>> {
    // Deterministic ordering keeps block contents stable across runs.
    let mut live_list: Vec<DfaStateId> = live.iter().copied().collect();
    live_list.sort_unstable();

    let alphabet: BTreeSet<char> = live_list
        .iter()
        .flat_map(|&id| dfa.state(id).transitions().map(|(c, _)| c))
        .collect();

    let mut accepting: HashMap<KindSet, Vec<DfaStateId>, ahash::RandomState> = HashMap::default();
    let mut non_accepting: Vec<DfaStateId> = Vec::new();
    for &id in &live_list {
        let state = dfa.state(id);
        if state.is_accepting() {
            accepting.entry(state.kinds().clone()).or_default().push(id);
        } else {
            non_accepting.push(id);
        }
    }

    let mut blocks: Vec<Vec<DfaStateId>> = Vec::new();
    if !non_accepting.is_empty() {
        blocks.push(non_accepting);
    }
    let mut kind_groups: Vec<(KindSet, Vec<DfaStateId>)> = accepting.drain().collect();
    kind_groups.sort_by(|(a, _), (b, _)| a.cmp(b));
    blocks.extend(kind_groups.into_iter().map(|(_, group)| group));

    let mut worklist: VecDeque<usize> = (0..blocks.len()).collect();
    let mut in_worklist = vec![true; blocks.len()];

    while let Some(splitter_index) = worklist.pop_front() {
        in_worklist[splitter_index] = false;
        let splitter: StateSet = blocks[splitter_index].iter().copied().collect();

        for &symbol in &alphabet {
            // X: live states whose transition on `symbol` lands in the splitter.
            let landing: StateSet = live_list
                .iter()
                .copied()
                .filter(|&id| {
                    dfa.state(id)
                        .transition(symbol)
                        .is_some_and(|t| splitter.contains(&t))
                })
                .collect();
            if landing.is_empty() {
                continue;
            }

            let block_count = blocks.len();
            for block_index in 0..block_count {
                if blocks[block_index].len() < 2 {
                    continue;
                }
                let (inside, outside): (Vec<_>, Vec<_>) = blocks[block_index]
                    .iter()
                    .copied()
                    .partition(|id| landing.contains(id));
                if inside.is_empty() || outside.is_empty() {
                    continue;
                }

                blocks[block_index] = inside;
                blocks.push(outside);
                let new_index = blocks.len() - 1;
                in_worklist.push(false);

                if in_worklist[block_index] {
                    // The split block was pending; both halves must be.
                    worklist.push_back(new_index);
                    in_worklist[new_index] = true;
                } else {
                    let smaller = if blocks[block_index].len() <= blocks[new_index].len() {
                        block_index
                    } else {
                        new_index
                    };
                    worklist.push_back(smaller);
                    in_worklist[smaller] = true;
                }
            }
        }
    }

    blocks
}

/// Build the minimized automaton, one state per block.
fn build_from_blocks(dfa: &Dfa, live: &StateSet, blocks: &[Vec<DfaStateId>]) -> Dfa {
    let mut block_of: HashMap<DfaStateId, usize, ahash::RandomState> = HashMap::default();
    for (index, block) in blocks.iter().enumerate() {
        for &id in block {
            block_of.insert(id, index);
        }
    }

    let mut states: Vec<DfaState> = blocks
        .iter()
        .map(|block| {
            let mut kernel = BTreeSet::new();
            for &id in block {
                kernel.extend(dfa.state(id).kernel().iter().copied());
            }
            // Kinds are equal across the block by construction of the
            // initial partition; any member serves.
            let kinds = dfa.state(block[0]).kinds().clone();
            DfaState::new(kernel, kinds)
        })
        .collect();

    for (index, block) in blocks.iter().enumerate() {
        let representative = block[0];
        for (symbol, target) in dfa.state(representative).transitions() {
            if live.contains(&target) {
                let target_block = DfaStateId::new(block_of[&target]);
                states[index].transitions.insert(symbol, target_block);
            }
        }
    }

    let start = DfaStateId::new(block_of[&dfa.start()]);
    Dfa {
        states,
        start,
        sink: None,
        alphabet: BTreeSet::new(),
    }
}

/// Make the transition function total.
///
/// The alphabet is recomputed over the minimized transitions; one fresh
/// non-accepting sink self-loops on every symbol, and every missing
/// (state, symbol) transition is redirected to it.
fn complete(dfa: &mut Dfa) {
    let alphabet: BTreeSet<char> = dfa
        .states
        .iter()
        .flat_map(|state| state.transitions.keys().copied())
        .collect();

    let sink = DfaStateId::new(dfa.states.len());
    let mut sink_state = DfaState::new(BTreeSet::new(), KindSet::new());
    for &symbol in &alphabet {
        sink_state.transitions.insert(symbol, sink);
    }

    for state in &mut dfa.states {
        for &symbol in &alphabet {
            state.transitions.entry(symbol).or_insert(sink);
        }
    }

    dfa.states.push(sink_state);
    dfa.sink = Some(sink);
    dfa.alphabet = alphabet;
}

/// The automaton of the empty language: a lone sink over an empty alphabet.
fn sink_only() -> Dfa {
    let sink = DfaStateId::new(0);
    Dfa {
        states: vec![DfaState::new(BTreeSet::new(), KindSet::new())],
        start: sink,
        sink: Some(sink),
        alphabet: BTreeSet::new(),
    }
}
