//! Thompson construction over postfix patterns.
//!
//! Operators: `*` (Kleene star, unary), `.` (concatenation, binary) and `|`
//! (alternation, binary). A backslash escapes the next character into a
//! literal, so `\.` is the dot symbol rather than concatenation. Whitespace
//! is skipped. Any other character, including unrecognized punctuation, is a
//! literal.

use super::{Nfa, NfaState, StateId};
use crate::error::PatternError;
use crate::intern::KindId;

/// A partial NFA on the builder's stack: classical Thompson fragments have
/// exactly one start and one accept state.
#[derive(Debug, Clone, Copy)]
struct Fragment {
    start: StateId,
    accept: StateId,
}

/// Compiles postfix patterns into per-rule NFA fragments sharing one arena,
/// then merges them under a fresh start state.
#[derive(Debug, Default)]
pub struct ThompsonBuilder {
    states: Vec<NfaState>,
    rule_starts: Vec<StateId>,
    accepts: Vec<StateId>,
}

impl ThompsonBuilder {
    /// Create a builder with an empty arena
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn alloc(&mut self) -> StateId {
        let id = StateId::new(self.states.len());
        self.states.push(NfaState::default());
        id
    }

    fn literal(&mut self, symbol: char) -> Fragment {
        let start = self.alloc();
        let accept = self.alloc();
        self.states[start.index()].add_transition(symbol, accept);
        Fragment { start, accept }
    }

    /// Compile one rule's postfix pattern and stamp its accept state with
    /// `kind`.
    ///
    /// # Errors
    ///
    /// Returns a [`PatternError`] if the pattern is malformed. The rule then
    /// contributes nothing to the final NFA; states allocated while compiling
    /// it are left unreachable and are never visited by later stages.
    pub fn add_rule(&mut self, kind: KindId, pattern: &str) -> Result<(), PatternError> {
        let fragment = self.compile(pattern)?;

        let accept = &mut self.states[fragment.accept.index()];
        debug_assert!(accept.accept.is_none(), "accept label stamped twice");
        accept.accept = Some(kind);

        self.rule_starts.push(fragment.start);
        self.accepts.push(fragment.accept);
        Ok(())
    }

    fn compile(&mut self, pattern: &str) -> Result<Fragment, PatternError> {
        let mut stack: Vec<Fragment> = Vec::new();
        let mut chars = pattern.chars();

        while let Some(token) = chars.next() {
            if token.is_whitespace() {
                continue;
            }

            match token {
                '\\' => {
                    let Some(escaped) = chars.next() else {
                        return Err(PatternError::TrailingEscape);
                    };
                    let fragment = self.literal(escaped);
                    stack.push(fragment);
                }
                '*' => {
                    let inner = stack
                        .pop()
                        .ok_or(PatternError::MissingOperand { operator: '*' })?;
                    let start = self.alloc();
                    let accept = self.alloc();
                    self.states[start.index()].add_epsilon(inner.start);
                    self.states[start.index()].add_epsilon(accept);
                    self.states[inner.accept.index()].add_epsilon(inner.start);
                    self.states[inner.accept.index()].add_epsilon(accept);
                    stack.push(Fragment { start, accept });
                }
                '.' => {
                    let second = stack
                        .pop()
                        .ok_or(PatternError::MissingOperand { operator: '.' })?;
                    let first = stack
                        .pop()
                        .ok_or(PatternError::MissingOperand { operator: '.' })?;
                    self.states[first.accept.index()].add_epsilon(second.start);
                    stack.push(Fragment {
                        start: first.start,
                        accept: second.accept,
                    });
                }
                '|' => {
                    let second = stack
                        .pop()
                        .ok_or(PatternError::MissingOperand { operator: '|' })?;
                    let first = stack
                        .pop()
                        .ok_or(PatternError::MissingOperand { operator: '|' })?;
                    let start = self.alloc();
                    let accept = self.alloc();
                    self.states[start.index()].add_epsilon(first.start);
                    self.states[start.index()].add_epsilon(second.start);
                    self.states[first.accept.index()].add_epsilon(accept);
                    self.states[second.accept.index()].add_epsilon(accept);
                    stack.push(Fragment { start, accept });
                }
                literal => {
                    let fragment = self.literal(literal);
                    stack.push(fragment);
                }
            }
        }

        let fragment = stack.pop().ok_or(PatternError::EmptyPattern)?;
        if stack.is_empty() {
            Ok(fragment)
        } else {
            Err(PatternError::UnusedOperands { extra: stack.len() })
        }
    }

    /// Merge every successfully added rule under a fresh start state.
    ///
    /// The merged start has an ε-edge to each rule fragment's start; the
    /// accept set is the union of the per-rule accepts, labels intact. With
    /// zero valid rules the result is a single unlabeled start state, which
    /// accepts nothing.
    #[must_use]
    pub fn finish(mut self) -> Nfa {
        let start = self.alloc();
        for rule_start in &self.rule_starts {
            self.states[start.index()].add_epsilon(*rule_start);
        }
        Nfa {
            states: self.states,
            start,
            accepts: self.accepts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intern::Interner;

    fn builder_with(pattern: &str) -> Result<Nfa, PatternError> {
        let mut interner = Interner::new();
        let mut builder = ThompsonBuilder::new();
        builder.add_rule(interner.intern("T"), pattern)?;
        Ok(builder.finish())
    }

    #[test]
    fn test_single_literal() {
        let nfa = builder_with("a").expect("compiles");
        // merged start, plus the two-state literal fragment
        assert_eq!(nfa.len(), 3);
        assert_eq!(nfa.accepts().len(), 1);
    }

    #[test]
    fn test_concatenation_links_fragments() {
        let nfa = builder_with("ab.").expect("compiles");
        let alphabet: Vec<char> = nfa.alphabet().into_iter().collect();
        assert_eq!(alphabet, vec!['a', 'b']);
    }

    #[test]
    fn test_star_adds_loop_edges() {
        let nfa = builder_with("a*").expect("compiles");
        // 2 literal states + 2 star states + merged start
        assert_eq!(nfa.len(), 5);
        // the star wrapper's accept is the rule accept
        assert_eq!(nfa.accepts().len(), 1);
    }

    #[test]
    fn test_whitespace_in_pattern_skipped() {
        let nfa = builder_with(" a b . ").expect("compiles");
        let alphabet: Vec<char> = nfa.alphabet().into_iter().collect();
        assert_eq!(alphabet, vec!['a', 'b']);
    }

    #[test]
    fn test_escape_makes_operator_literal() {
        let nfa = builder_with("\\*").expect("compiles");
        let alphabet: Vec<char> = nfa.alphabet().into_iter().collect();
        assert_eq!(alphabet, vec!['*']);
    }

    #[test]
    fn test_escaped_dot_is_symbol() {
        let nfa = builder_with("a\\..").expect("compiles");
        let alphabet: Vec<char> = nfa.alphabet().into_iter().collect();
        assert_eq!(alphabet, vec!['.', 'a']);
    }

    #[test]
    fn test_unknown_punctuation_is_literal() {
        let nfa = builder_with("+").expect("compiles");
        let alphabet: Vec<char> = nfa.alphabet().into_iter().collect();
        assert_eq!(alphabet, vec!['+']);
    }

    #[test]
    fn test_star_underflow() {
        assert_eq!(
            builder_with("*").unwrap_err(),
            PatternError::MissingOperand { operator: '*' }
        );
    }

    #[test]
    fn test_concat_underflow() {
        assert_eq!(
            builder_with("a.").unwrap_err(),
            PatternError::MissingOperand { operator: '.' }
        );
    }

    #[test]
    fn test_trailing_escape() {
        assert_eq!(builder_with("a\\").unwrap_err(), PatternError::TrailingEscape);
    }

    #[test]
    fn test_empty_pattern() {
        assert_eq!(builder_with("").unwrap_err(), PatternError::EmptyPattern);
        assert_eq!(builder_with("   ").unwrap_err(), PatternError::EmptyPattern);
    }

    #[test]
    fn test_unused_operands() {
        assert_eq!(
            builder_with("ab").unwrap_err(),
            PatternError::UnusedOperands { extra: 1 }
        );
    }

    #[test]
    fn test_failed_rule_leaves_no_accepts() {
        let mut interner = Interner::new();
        let mut builder = ThompsonBuilder::new();
        assert!(builder.add_rule(interner.intern("BAD"), "*").is_err());
        assert!(builder.add_rule(interner.intern("OK"), "a").is_ok());

        let nfa = builder.finish();
        assert_eq!(nfa.accepts().len(), 1);
        // the failed rule's states are unreachable, so they contribute no symbols
        let alphabet: Vec<char> = nfa.alphabet().into_iter().collect();
        assert_eq!(alphabet, vec!['a']);
    }
}
