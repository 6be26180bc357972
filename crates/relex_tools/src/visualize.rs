//! Graphviz rendering of NFAs and DFAs.
//!
//! Both renderers emit edges in a sorted order so the output is stable
//! across runs and easy to diff.

use relex::intern::KindSet;
use relex::nfa::StateId;
use relex::{Dfa, Nfa};
use std::fmt::Write;

/// Render the merged NFA as a directed graph.
///
/// Only states reachable from the start are drawn. Symbol edges are black;
/// ε-edges are red and labeled `ε`. Accept states are double circles filled
/// light blue, everything else a light grey circle.
#[must_use]
pub fn nfa_dot(nfa: &Nfa) -> String {
    let mut reachable: Vec<StateId> = Vec::new();
    let mut visited = vec![false; nfa.len()];
    let mut stack = vec![nfa.start()];
    while let Some(id) = stack.pop() {
        if visited[id.index()] {
            continue;
        }
        visited[id.index()] = true;
        reachable.push(id);
        let state = nfa.state(id);
        for (_, targets) in state.transitions() {
            stack.extend(targets.iter().copied());
        }
        stack.extend(state.epsilon().iter().copied());
    }
    reachable.sort_unstable();

    // (from, label, to, is_epsilon), sorted for stable output
    let mut edges: Vec<(StateId, char, StateId, bool)> = Vec::new();
    for &id in &reachable {
        let state = nfa.state(id);
        for (symbol, targets) in state.transitions() {
            for &to in targets {
                edges.push((id, symbol, to, false));
            }
        }
        for &to in state.epsilon() {
            edges.push((id, 'ε', to, true));
        }
    }
    edges.sort_unstable();

    let mut out = String::new();
    writeln!(out, "digraph Nfa {{").unwrap();
    writeln!(
        out,
        "    node [shape=circle, style=filled, fillcolor=lightgrey];"
    )
    .unwrap();

    for (from, label, to, is_epsilon) in edges {
        let color = if is_epsilon { "red" } else { "black" };
        writeln!(
            out,
            "    {} -> {} [label=\"{}\", color={}];",
            from.index(),
            to.index(),
            label,
            color
        )
        .unwrap();
    }

    for &id in nfa.accepts() {
        writeln!(
            out,
            "    {} [shape=doublecircle, fillcolor=lightblue];",
            id.index()
        )
        .unwrap();
    }

    writeln!(out, "}}").unwrap();
    out
}

/// Render a DFA as a directed graph.
///
/// States are named `qN`. Accepting states are double circles filled light
/// blue and labeled with their comma-joined kind names; the start state is
/// marked by an arrow from a point-shaped pseudo-node.
#[must_use]
pub fn dfa_dot(dfa: &Dfa, kind_label: impl Fn(&KindSet) -> String) -> String {
    let mut out = String::new();
    writeln!(out, "digraph Dfa {{").unwrap();
    writeln!(out, "    rankdir=LR;").unwrap();
    writeln!(out, "    size=\"8,5\";").unwrap();

    writeln!(
        out,
        "    node [shape=doublecircle, style=filled, fillcolor=lightblue];"
    )
    .unwrap();
    for (id, state) in dfa.states() {
        if state.is_accepting() {
            writeln!(
                out,
                "    q{} [label=\"q{}\\n{}\"];",
                id.index(),
                id.index(),
                kind_label(state.kinds())
            )
            .unwrap();
        }
    }

    writeln!(
        out,
        "    node [shape=circle, style=filled, fillcolor=lightgrey];"
    )
    .unwrap();
    for (id, state) in dfa.states() {
        if !state.is_accepting() {
            writeln!(out, "    q{} [label=\"q{}\"];", id.index(), id.index()).unwrap();
        }
    }

    for (id, state) in dfa.states() {
        for (symbol, to) in state.transitions() {
            writeln!(
                out,
                "    q{} -> q{} [label=\"{}\"];",
                id.index(),
                to.index(),
                symbol
            )
            .unwrap();
        }
    }

    writeln!(out, "    start [shape=point];").unwrap();
    writeln!(out, "    start -> q{};", dfa.start().index()).unwrap();
    writeln!(out, "}}").unwrap();
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use relex::LexerBuilder;

    fn demo() -> relex::CompiledLexer {
        LexerBuilder::new()
            .rule("KW", "if.")
            .rule("ID", "if|if|*.")
            .build()
    }

    #[test]
    fn test_nfa_dot_shape() {
        let lexer = demo();
        let dot = nfa_dot(lexer.nfa());

        assert!(dot.starts_with("digraph Nfa {"));
        assert!(dot.ends_with("}\n"));
        assert!(dot.contains("color=red"));
        assert!(dot.contains("label=\"ε\""));
        assert!(dot.contains("doublecircle"));
    }

    #[test]
    fn test_dfa_dot_shape() {
        let lexer = demo();
        let dot = dfa_dot(lexer.dfa(), |kinds| lexer.kind_names(kinds).join(","));

        assert!(dot.starts_with("digraph Dfa {"));
        assert!(dot.contains("rankdir=LR;"));
        // the ambiguous accept state lists both kinds
        assert!(dot.contains("ID,KW"));
        assert!(dot.contains("start [shape=point];"));
        assert!(dot.ends_with("}\n"));
    }

    #[test]
    fn test_dfa_dot_draws_every_state() {
        let lexer = demo();
        let dot = dfa_dot(lexer.dfa(), |kinds| lexer.kind_names(kinds).join(","));
        for (id, _) in lexer.dfa().states() {
            assert!(dot.contains(&format!("q{} [label=", id.index())));
        }
    }
}
