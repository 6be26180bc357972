//! # Error Types
//!
//! Error and diagnostic types for rule compilation and scanning.
//!
//! ## Overview
//!
//! No stage of the pipeline aborts on bad input. Each stage either completes
//! or reports a diagnostic value and continues:
//!
//! - [`CompileError`]: a rule line could not be parsed, or a rule's postfix
//!   pattern could not be compiled. The offending rule is dropped; remaining
//!   rules still contribute to the automaton.
//! - [`PatternError`]: the reason a postfix pattern was rejected by the
//!   Thompson builder.
//! - [`ScanError`]: the scanner found a character that starts no token. The
//!   character is skipped and scanning resumes.
//!
//! When the `diagnostics` feature is enabled, all error types derive
//! [`miette::Diagnostic`] for rich terminal rendering.

use thiserror::Error;

#[cfg(feature = "diagnostics")]
use miette::Diagnostic;

/// A diagnostic produced while turning rules into a lexer.
#[derive(Debug, Clone, Error)]
#[cfg_attr(feature = "diagnostics", derive(Diagnostic))]
pub enum CompileError {
    /// A rule-file line without both a name and a pattern.
    #[error("Invalid rule format at line {line}: {text}")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(relex::malformed_rule)))]
    MalformedRule {
        /// 1-based line number in the rule file
        line: usize,
        text: String,
    },

    /// A rule whose postfix pattern could not be compiled.
    #[error("rule `{rule}`: {source}")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(relex::bad_pattern)))]
    Pattern {
        rule: String,
        #[source]
        source: PatternError,
    },
}

/// Why a postfix pattern was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "diagnostics", derive(Diagnostic))]
pub enum PatternError {
    #[error("operator `{operator}` is missing an operand")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(relex::missing_operand)))]
    MissingOperand { operator: char },

    #[error("escape character at end of pattern")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(relex::trailing_escape)))]
    TrailingEscape,

    #[error("empty pattern")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(relex::empty_pattern)))]
    EmptyPattern,

    #[error("{extra} operand(s) left unconsumed at end of pattern")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(relex::unused_operands)))]
    UnusedOperands { extra: usize },
}

/// A scanning error: the character at `index` starts no token.
///
/// Indices count characters, not bytes. The scanner recovers by skipping the
/// single offending character and resuming.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "diagnostics", derive(Diagnostic))]
#[cfg_attr(feature = "diagnostics", diagnostic(code(relex::unexpected_char)))]
#[error("Lexer error at index {index}: unexpected character '{ch}'")]
pub struct ScanError {
    pub index: usize,
    pub ch: char,
}

impl ScanError {
    /// Character position of the error in the scanned input
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// The offending character
    #[must_use]
    pub const fn ch(&self) -> char {
        self.ch
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_error_display() {
        let error = ScanError { index: 3, ch: '$' };
        assert_eq!(
            format!("{error}"),
            "Lexer error at index 3: unexpected character '$'"
        );
    }

    #[test]
    fn test_pattern_error_display() {
        let error = PatternError::MissingOperand { operator: '*' };
        assert!(format!("{error}").contains('*'));

        let error = PatternError::TrailingEscape;
        assert!(format!("{error}").contains("escape"));
    }

    #[test]
    fn test_compile_error_carries_rule_name() {
        let error = CompileError::Pattern {
            rule: "NUMBER".to_string(),
            source: PatternError::EmptyPattern,
        };
        let text = format!("{error}");
        assert!(text.contains("NUMBER"));
        assert!(text.contains("empty pattern"));
    }

    #[test]
    fn test_malformed_rule_display() {
        let error = CompileError::MalformedRule {
            line: 7,
            text: "LONELY".to_string(),
        };
        let text = format!("{error}");
        assert!(text.contains("line 7"));
        assert!(text.contains("LONELY"));
    }
}
