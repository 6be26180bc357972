//! # Rule Files
//!
//! Line-oriented rule files pair a token-kind name with a postfix pattern:
//!
//! ```text
//! # keywords outrank nothing here; both rules survive side by side
//! KEYWORD    if.
//! IDENTIFIER aa*.
//! ```
//!
//! Blank lines and lines whose first non-whitespace character is `#` are
//! ignored. Every other line splits on its first run of whitespace; the
//! remainder is the pattern (which may itself contain whitespace, skipped by
//! the pattern compiler). Lines with fewer than two fields are reported and
//! skipped. Duplicate names are allowed and act as alternative rules for the
//! same kind.

use crate::error::CompileError;
use compact_str::CompactString;

/// One named token rule: a kind name and a postfix pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub name: CompactString,
    pub pattern: CompactString,
}

impl Rule {
    /// Create a rule from a kind name and a postfix pattern
    #[must_use]
    pub fn new(name: impl Into<CompactString>, pattern: impl Into<CompactString>) -> Self {
        Self {
            name: name.into(),
            pattern: pattern.into(),
        }
    }
}

/// Parse rule-file text into rules plus diagnostics for the lines that
/// could not be parsed. Parsing never fails as a whole.
#[must_use]
pub fn parse_rules(text: &str) -> (Vec<Rule>, Vec<CompileError>) {
    let mut rules = Vec::new();
    let mut errors = Vec::new();

    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        match line.split_once(char::is_whitespace) {
            Some((name, rest)) if !rest.trim().is_empty() => {
                rules.push(Rule::new(name, rest.trim()));
            }
            _ => {
                errors.push(CompileError::MalformedRule {
                    line: idx + 1,
                    text: line.to_string(),
                });
            }
        }
    }

    (rules, errors)
}
