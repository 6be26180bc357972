//! # Longest-Match Scanner
//!
//! Tokenizes input against a completed DFA using maximal munch: every time
//! the automaton enters an accepting state the position is remembered, and
//! scanning keeps consuming in the hope of a longer match. On the first
//! failed step the scanner falls back to the remembered accept.
//!
//! A token carries the full set of kinds whose rules accept its lexeme; the
//! scanner never picks a winner between them. Prioritization (say, keywords
//! over identifiers) belongs to whatever consumes the tokens.

use crate::dfa::Dfa;
use crate::error::ScanError;
use crate::intern::KindSet;
use compact_str::CompactString;

/// One recognized lexeme and every rule kind that accepts it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: CompactString,
    pub kinds: KindSet,
}

impl Token {
    /// Create a token from its lexeme and accepting kinds
    #[must_use]
    pub fn new(text: impl Into<CompactString>, kinds: KindSet) -> Self {
        Self {
            text: text.into(),
            kinds,
        }
    }
}

/// Everything a scan produced: tokens in input order plus the errors
/// recovered from along the way.
#[derive(Debug, Default)]
pub struct ScanResult {
    pub tokens: Vec<Token>,
    pub errors: Vec<ScanError>,
}

impl ScanResult {
    /// Whether the scan completed without a single unexpected character
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// A longest-match tokenizer borrowing a completed DFA.
///
/// The scanner holds no mutable state between calls; one DFA can back any
/// number of concurrent scans.
#[derive(Debug, Clone, Copy)]
pub struct Scanner<'dfa> {
    dfa: &'dfa Dfa,
}

impl<'dfa> Scanner<'dfa> {
    /// Create a scanner over a completed DFA
    #[must_use]
    pub const fn new(dfa: &'dfa Dfa) -> Self {
        Self { dfa }
    }

    /// Tokenize the whole input.
    ///
    /// Whitespace between tokens is skipped. A character that starts no
    /// token is reported (with its character index) and skipped, and the
    /// scan resumes on the next character, so progress is guaranteed on
    /// arbitrary input.
    #[must_use]
    pub fn scan(&self, input: &str) -> ScanResult {
        let chars: Vec<(usize, char)> = input.char_indices().collect();
        let mut result = ScanResult::default();
        let mut index = 0;

        while index < chars.len() {
            let (_, first) = chars[index];
            if first.is_whitespace() {
                index += 1;
                continue;
            }

            // Longest-match attempt from `index`.
            let mut current = self.dfa.start();
            let mut last_accept: Option<(usize, crate::dfa::DfaStateId)> = None;
            let mut i = index;

            while i < chars.len() {
                let (_, symbol) = chars[i];
                let Some(next) = self.dfa.state(current).transition(symbol) else {
                    // Symbol outside the alphabet: no later accept possible.
                    break;
                };
                if self.dfa.is_sink(next) {
                    // The sink has no accepting successor; stop early.
                    break;
                }
                current = next;
                if self.dfa.state(current).is_accepting() {
                    last_accept = Some((i, current));
                }
                i += 1;
            }

            match last_accept {
                Some((end, state)) => {
                    let start_byte = chars[index].0;
                    let end_byte = chars[end].0 + chars[end].1.len_utf8();
                    result.tokens.push(Token::new(
                        &input[start_byte..end_byte],
                        self.dfa.state(state).kinds().clone(),
                    ));
                    index = end + 1;
                }
                None => {
                    result.errors.push(ScanError { index, ch: first });
                    index += 1;
                }
            }
        }

        result
    }
}
