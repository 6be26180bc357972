//! # Relex
//!
//! A lexer generator driven by named token rules written as postfix regular
//! expressions.
//!
//! ## Overview
//!
//! From a list of `(kind name, postfix pattern)` rules, relex builds one
//! deterministic automaton and tokenizes text against it with longest-match
//! scanning:
//!
//! - **Thompson construction** turns each postfix pattern (`*` star, `.`
//!   concatenation, `|` alternation, `\` escape) into an NFA fragment.
//! - **Merging** joins all fragments into one multi-accepting NFA whose
//!   accept states remember their rule's kind.
//! - **Subset construction** determinizes the merged NFA, preserving the
//!   union of kinds on every accept state.
//! - **Minimization** prunes unreachable and dead states, merges equivalent
//!   states without ever conflating different kind sets, and completes the
//!   automaton with a sink state.
//! - **Scanning** emits, at every position, the longest prefix that reaches
//!   any accepting state, tagged with *all* kinds whose rules accept it.
//!   A lexeme like `if` matching both a keyword rule and an identifier rule
//!   carries both kinds; choosing between them is the caller's business.
//!
//! ## Quick Start
//!
//! ```rust
//! use relex::LexerBuilder;
//!
//! let lexer = LexerBuilder::new()
//!     .rule("KEYWORD", "if.")
//!     .rule("IDENTIFIER", "aa*.")
//!     .build();
//!
//! let result = lexer.tokenize("if aaaa $");
//! assert_eq!(result.tokens.len(), 2);
//! assert_eq!(result.tokens[0].text, "if");
//! assert_eq!(result.tokens[1].text, "aaaa");
//! // '$' starts no token: reported with its character index, then skipped.
//! assert_eq!(result.errors.len(), 1);
//! assert_eq!(result.errors[0].index, 8);
//! ```
//!
//! Rules can also be loaded from line-oriented rule files; see
//! [`rules::parse_rules`].
//!
//! ## Modules
//!
//! - [`lexer`] - rule collection and the compiled lexer
//! - [`rules`] - the rule-file format
//! - [`nfa`] - Thompson construction and the merged NFA
//! - [`dfa`] - subset construction, minimization, completion
//! - [`scanner`] - longest-match tokenization
//! - [`intern`] - token-kind interning and kind sets
//! - [`error`] - diagnostics for compilation and scanning

pub mod dfa;
pub mod error;
pub mod intern;
pub mod lexer;
pub mod nfa;
pub mod rules;
pub mod scanner;

// Re-export commonly used types
pub use dfa::{Dfa, DfaState, DfaStateId, minimize, subset_construction};
pub use error::{CompileError, PatternError, ScanError};
pub use intern::{FrozenInterner, Interner, KindId, KindSet};
pub use lexer::{CompiledLexer, LexerBuilder};
pub use nfa::{Nfa, NfaState, StateId, ThompsonBuilder};
pub use rules::{Rule, parse_rules};
pub use scanner::{ScanResult, Scanner, Token};
