//! # Lexer Building
//!
//! The front door of the crate: collect rules, compile them through the
//! whole pipeline, tokenize text.
//!
//! ## Overview
//!
//! [`LexerBuilder`] accumulates [`Rule`]s, then [`LexerBuilder::build`]
//! runs, in order:
//!
//! 1. Thompson construction of one NFA fragment per rule,
//! 2. merging of all fragments under a fresh start state,
//! 3. subset construction into a DFA,
//! 4. minimization and completion with a sink state.
//!
//! The result is an immutable [`CompiledLexer`]. Rules that fail to compile
//! are reported as diagnostics on the compiled lexer and simply do not
//! contribute; building never fails as a whole. With no usable rules the
//! lexer rejects every character.
//!
//! ## Usage
//!
//! ```rust
//! use relex::LexerBuilder;
//!
//! let lexer = LexerBuilder::new()
//!     .rule("KEYWORD", "if.")
//!     .rule("IDENTIFIER", "if|if|*.")
//!     .build();
//!
//! let result = lexer.tokenize("if fi");
//! assert!(result.is_clean());
//! assert_eq!(result.tokens[0].text, "if");
//! // "if" is both a keyword and an identifier; the lexer reports both.
//! assert_eq!(lexer.kind_names(&result.tokens[0].kinds), vec!["IDENTIFIER", "KEYWORD"]);
//! assert_eq!(lexer.kind_names(&result.tokens[1].kinds), vec!["IDENTIFIER"]);
//! ```

use crate::dfa::{Dfa, minimize, subset_construction};
use crate::error::CompileError;
use crate::intern::{FrozenInterner, Interner, KindSet};
use crate::nfa::{Nfa, ThompsonBuilder};
use crate::rules::Rule;
use crate::scanner::{ScanResult, Scanner};

/// Accumulates token rules for compilation into a [`CompiledLexer`].
#[derive(Debug, Default)]
pub struct LexerBuilder {
    rules: Vec<Rule>,
}

impl LexerBuilder {
    /// Create a builder with no rules
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one rule from a kind name and a postfix pattern.
    ///
    /// The same name may be used by several rules; they become alternatives
    /// for the same kind.
    #[must_use]
    pub fn rule(mut self, name: &str, pattern: &str) -> Self {
        self.rules.push(Rule::new(name, pattern));
        self
    }

    /// Add a batch of rules, typically from [`crate::rules::parse_rules`]
    #[must_use]
    pub fn rules(mut self, rules: impl IntoIterator<Item = Rule>) -> Self {
        self.rules.extend(rules);
        self
    }

    /// Compile every rule into a single minimized, complete automaton.
    ///
    /// Rules whose pattern fails to compile are dropped and reported via
    /// [`CompiledLexer::diagnostics`]; the remaining rules still produce a
    /// working lexer.
    #[must_use]
    pub fn build(self) -> CompiledLexer {
        let mut interner = Interner::new();
        let mut thompson = ThompsonBuilder::new();
        let mut diagnostics = Vec::new();

        for rule in &self.rules {
            let kind = interner.intern(&rule.name);
            if let Err(source) = thompson.add_rule(kind, &rule.pattern) {
                diagnostics.push(CompileError::Pattern {
                    rule: rule.name.to_string(),
                    source,
                });
            }
        }

        let nfa = thompson.finish();
        let dfa = minimize(&subset_construction(&nfa));

        CompiledLexer {
            interner: interner.into_frozen(),
            nfa,
            dfa,
            diagnostics,
        }
    }
}

/// A compiled lexer: the completed automaton plus everything needed to
/// resolve kind names back to strings.
///
/// Immutable once built. A shared reference can back any number of
/// concurrent [`CompiledLexer::tokenize`] calls.
#[derive(Debug)]
pub struct CompiledLexer {
    interner: FrozenInterner,
    nfa: Nfa,
    dfa: Dfa,
    diagnostics: Vec<CompileError>,
}

impl CompiledLexer {
    /// Tokenize input with longest-match scanning
    #[must_use]
    pub fn tokenize(&self, input: &str) -> ScanResult {
        Scanner::new(&self.dfa).scan(input)
    }

    /// Per-rule problems encountered while compiling
    #[must_use]
    pub fn diagnostics(&self) -> &[CompileError] {
        &self.diagnostics
    }

    /// The merged NFA, kept for inspection and visualization
    #[must_use]
    pub const fn nfa(&self) -> &Nfa {
        &self.nfa
    }

    /// The minimized, complete DFA driving the scanner
    #[must_use]
    pub const fn dfa(&self) -> &Dfa {
        &self.dfa
    }

    /// The interner mapping kind ids back to rule names
    #[must_use]
    pub const fn interner(&self) -> &FrozenInterner {
        &self.interner
    }

    /// Resolve a kind set to rule names, sorted alphabetically
    #[must_use]
    pub fn kind_names(&self, kinds: &KindSet) -> Vec<&str> {
        let mut names: Vec<&str> = kinds.iter().map(|k| self.interner.resolve(k)).collect();
        names.sort_unstable();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_reports_bad_rules_and_keeps_good_ones() {
        let lexer = LexerBuilder::new()
            .rule("BROKEN", "*")
            .rule("A", "a")
            .build();

        assert_eq!(lexer.diagnostics().len(), 1);
        let result = lexer.tokenize("a");
        assert!(result.is_clean());
        assert_eq!(result.tokens.len(), 1);
    }

    #[test]
    fn test_no_rules_rejects_everything() {
        let lexer = LexerBuilder::new().build();
        let result = lexer.tokenize("xy");
        assert!(result.tokens.is_empty());
        assert_eq!(result.errors.len(), 2);
    }

    #[test]
    fn test_duplicate_rule_names_are_alternatives() {
        let lexer = LexerBuilder::new()
            .rule("KW", "if.")
            .rule("KW", "fi.")
            .build();

        let result = lexer.tokenize("if fi");
        assert!(result.is_clean());
        assert_eq!(result.tokens.len(), 2);
        for token in &result.tokens {
            assert_eq!(lexer.kind_names(&token.kinds), vec!["KW"]);
        }
    }

    #[test]
    fn test_kind_names_sorted() {
        let lexer = LexerBuilder::new()
            .rule("ZULU", "a")
            .rule("ALPHA", "a")
            .build();

        let result = lexer.tokenize("a");
        assert_eq!(
            lexer.kind_names(&result.tokens[0].kinds),
            vec!["ALPHA", "ZULU"]
        );
    }
}
